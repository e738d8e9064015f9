//! Line renderer for curve objects.
//!
//! Each object in the [`Group`] gets its own [`GpuLineStrip`]. Structural
//! changes to the group trigger a full re-upload; segment recolors are
//! patched into the existing color buffers.

use std::collections::HashMap;

use wgpu::util::DeviceExt;

use crate::camera::core::{Camera, CameraUniform};
use crate::gpu::line_buffer::{
    GpuLineStrip, COLOR_VERTEX_BYTES, POSITION_VERTEX_BYTES,
};
use crate::gpu::render_context::RenderContext;
use crate::renderer::pipeline_util;
use crate::scene::{DrawType, Group, Mesh, ObjectHandle};

const POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![0 => Float32x3];
const COLOR_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![1 => Float32x4];

/// Primitive topology for a draw type.
#[must_use]
pub fn topology(draw_type: DrawType) -> wgpu::PrimitiveTopology {
    match draw_type {
        DrawType::LineStrip => wgpu::PrimitiveTopology::LineStrip,
        DrawType::Lines => wgpu::PrimitiveTopology::LineList,
    }
}

/// Pipeline slot for a draw type and transparency flag.
fn pipeline_index(draw_type: DrawType, z_transparent: bool) -> usize {
    let base = match draw_type {
        DrawType::LineStrip => 0,
        DrawType::Lines => 2,
    };
    base + usize::from(z_transparent)
}

/// Take the entry for `handle` out of `previous` and refresh it, or create
/// one if the handle is new.
fn reuse_or_create<T>(
    previous: &mut HashMap<ObjectHandle, T>,
    handle: ObjectHandle,
    refresh: impl FnOnce(&mut T),
    create: impl FnOnce() -> T,
) -> T {
    match previous.remove(&handle) {
        Some(mut existing) => {
            refresh(&mut existing);
            existing
        }
        None => create(),
    }
}

/// The `(segment, rgb)` writes for recolored segments of `mesh`. Segments
/// the mesh no longer has are skipped.
fn segment_recolors(mesh: &Mesh, dirty: &[usize]) -> Vec<(usize, [f32; 3])> {
    dirty
        .iter()
        .filter_map(|&segment| {
            let colors = mesh.segment_colors(segment)?;
            Some((segment, [colors[0], colors[1], colors[2]]))
        })
        .collect()
}

struct UploadedLine {
    strip: GpuLineStrip,
    pipeline: usize,
}

/// Draws every line object of a [`Group`].
pub struct LineStripRenderer {
    pipelines: [wgpu::RenderPipeline; 4],
    uniform: CameraUniform,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    lines: HashMap<ObjectHandle, UploadedLine>,
    draw_order: Vec<ObjectHandle>,
}

impl LineStripRenderer {
    /// Create the pipelines and uniform resources for the context's surface
    /// format.
    pub fn new(context: &RenderContext) -> Self {
        let device = &context.device;
        let uniform = CameraUniform::new();
        let uniform_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Line Uniform Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Line Uniform Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Line Uniform Bind Group"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipelines = [
            Self::create_pipeline(context, &layout, DrawType::LineStrip, false),
            Self::create_pipeline(context, &layout, DrawType::LineStrip, true),
            Self::create_pipeline(context, &layout, DrawType::Lines, false),
            Self::create_pipeline(context, &layout, DrawType::Lines, true),
        ];

        Self {
            pipelines,
            uniform,
            uniform_buffer,
            bind_group,
            lines: HashMap::new(),
            draw_order: Vec::new(),
        }
    }

    fn create_pipeline(
        context: &RenderContext,
        layout: &wgpu::BindGroupLayout,
        draw_type: DrawType,
        z_transparent: bool,
    ) -> wgpu::RenderPipeline {
        let shader = context.device.create_shader_module(wgpu::include_wgsl!(
            "../../assets/shaders/line_strip.wgsl"
        ));

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Line Pipeline Layout"),
                bind_group_layouts: &[layout],
                push_constant_ranges: &[],
            },
        );

        let buffers = [
            wgpu::VertexBufferLayout {
                array_stride: POSITION_VERTEX_BYTES,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &POSITION_ATTRIBUTES,
            },
            wgpu::VertexBufferLayout {
                array_stride: COLOR_VERTEX_BYTES,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &COLOR_ATTRIBUTES,
            },
        ];

        context
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(&format!("Line Pipeline ({draw_type:?})")),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &buffers,
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &pipeline_util::surface_fragment_targets(
                        context.format(),
                    ),
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: topology(draw_type),
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: Some(pipeline_util::depth_stencil_state(
                    !z_transparent,
                )),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
    }

    /// Push the camera matrix and line opacity to the GPU.
    pub fn update_uniform(
        &mut self,
        queue: &wgpu::Queue,
        camera: &Camera,
        opacity: f32,
    ) {
        self.uniform.update_view_proj(camera);
        self.uniform.opacity = opacity.clamp(0.0, 1.0);
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(&[self.uniform]),
        );
    }

    /// Bring the GPU buffers in line with `group`.
    ///
    /// After structural changes every object is re-uploaded: strips whose
    /// handle survived are refilled in place, new objects get fresh strips
    /// and strips of removed objects are released. Otherwise only recolored
    /// segments are written.
    pub fn sync(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        group: &mut Group,
    ) {
        if group.is_dirty() {
            let mut previous = std::mem::take(&mut self.lines);
            self.draw_order.clear();
            for (handle, object) in group.iter_mut() {
                let _ = object.mesh_mut().take_dirty_segments();
                let mesh = object.mesh();
                let strip = reuse_or_create(
                    &mut previous,
                    handle,
                    |line| line.strip.upload(device, queue, mesh),
                    || UploadedLine {
                        strip: GpuLineStrip::new(device, mesh),
                        pipeline: 0,
                    },
                )
                .strip;
                let pipeline =
                    pipeline_index(object.draw_type(), object.z_transparent());
                let _ = self
                    .lines
                    .insert(handle, UploadedLine { strip, pipeline });
                self.draw_order.push(handle);
            }
            group.mark_rendered();
            log::debug!(
                "uploaded {} curve objects, released {}",
                self.lines.len(),
                previous.len()
            );
            return;
        }

        for (handle, object) in group.iter_mut() {
            let dirty = object.mesh_mut().take_dirty_segments();
            let Some(line) = self.lines.get(&handle) else {
                continue;
            };
            for (segment, rgb) in segment_recolors(object.mesh(), &dirty) {
                if let Err(e) =
                    line.strip.write_segment_color(queue, segment, rgb)
                {
                    log::warn!("skipped segment recolor: {e}");
                }
            }
        }
    }

    /// Draw every uploaded line into the pass.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        for handle in &self.draw_order {
            let Some(line) = self.lines.get(handle) else {
                continue;
            };
            let vertex_count = line.strip.vertex_count();
            if vertex_count == 0 {
                continue;
            }
            render_pass.set_pipeline(&self.pipelines[line.pipeline]);
            render_pass
                .set_vertex_buffer(0, line.strip.position_buffer().slice(..));
            render_pass
                .set_vertex_buffer(1, line.strip.color_buffer().slice(..));
            render_pass.draw(0..vertex_count, 0..1);
        }
    }
}
