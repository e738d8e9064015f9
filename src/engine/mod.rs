//! The curve render engine.
//!
//! [`CurveRenderEngine`] owns the GPU context, the scene [`Group`], the
//! line renderer, the orbit camera and the loader. Background fetches are
//! drained in [`update`](CurveRenderEngine::update), on the thread that
//! renders, so every build touches the group from one place.

mod frame_timing;

use glam::{Vec2, Vec3};

pub use frame_timing::FrameTiming;

use crate::camera::CameraController;
use crate::curve::fasta::fasta_to_curve;
use crate::curve::Curve;
use crate::error::WCurveError;
use crate::fetch::{AutoFetcher, CurveSource, FileFetcher};
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::DepthTarget;
use crate::input::{DragMode, InputEvent, PointerState};
use crate::loader::{
    CurveFetcher, CurveLoader, LoadOutcome, PendingLoad, TransportError,
};
use crate::options::Options;
use crate::renderer::LineStripRenderer;
use crate::scene::{Group, ObjectHandle};

/// Every vertex of every object in `group`, as points.
fn group_positions(group: &Group) -> Vec<Vec3> {
    group
        .iter()
        .flat_map(|(_, object)| object.mesh().positions().chunks_exact(3))
        .map(Vec3::from_slice)
        .collect()
}

/// Renders loaded W-curves into a window surface.
pub struct CurveRenderEngine {
    context: RenderContext,
    camera_controller: CameraController,
    renderer: LineStripRenderer,
    depth: DepthTarget,
    group: Group,
    options: Options,
    loader: CurveLoader,
    pending: Vec<PendingLoad>,
    last_outcome: Option<LoadOutcome>,
    pointer: PointerState,
    frame_timing: FrameTiming,
}

impl CurveRenderEngine {
    /// Create the engine on a window surface.
    ///
    /// # Errors
    ///
    /// Returns [`WCurveError::Gpu`] if the GPU context cannot be created.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: Options,
    ) -> Result<Self, WCurveError> {
        let context = RenderContext::new(window, size).await?;
        let camera_controller =
            CameraController::new(&options.camera, context.aspect());
        let renderer = LineStripRenderer::new(&context);
        let depth = DepthTarget::new(
            &context.device,
            context.config.width,
            context.config.height,
        );
        let loader = CurveLoader::new().with_options(options.curve.clone());

        Ok(Self {
            context,
            camera_controller,
            renderer,
            depth,
            group: Group::new(),
            options,
            loader,
            pending: Vec::new(),
            last_outcome: None,
            pointer: PointerState::default(),
            frame_timing: FrameTiming::new(),
        })
    }

    /// Current options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Apply new options. Scale changes affect subsequent loads only.
    pub fn set_options(&mut self, options: Options) {
        self.camera_controller.set_options(&options.camera);
        self.loader = CurveLoader::new().with_options(options.curve.clone());
        self.options = options;
    }

    /// The scene group holding every loaded curve.
    pub fn group(&self) -> &Group {
        &self.group
    }

    /// Outcome of the most recently completed load.
    pub fn last_outcome(&self) -> Option<LoadOutcome> {
        self.last_outcome
    }

    /// Number of fetches still in flight.
    pub fn pending_loads(&self) -> usize {
        self.pending.len()
    }

    /// Smoothed frame rate.
    pub fn fps(&self) -> f32 {
        self.frame_timing.fps()
    }

    /// Start loading `source`.
    ///
    /// JSON sources are fetched in the background and attached on a later
    /// [`update`](Self::update). FASTA files are read and built
    /// immediately.
    ///
    /// # Errors
    ///
    /// Returns [`WCurveError::Transport`] or [`WCurveError::Fasta`] when a
    /// FASTA file cannot be read or parsed.
    pub fn load_source(
        &mut self,
        source: &CurveSource,
    ) -> Result<(), WCurveError> {
        match source {
            CurveSource::FastaFile(path) => {
                let text = FileFetcher.fetch(&path.to_string_lossy())?;
                let curve = fasta_to_curve(&text)?;
                let _ = self.load_curve(&curve);
            }
            CurveSource::Remote(_) | CurveSource::JsonFile(_) => {
                self.load_url(&source.location());
            }
        }
        Ok(())
    }

    /// Fetch `url` on a background thread.
    pub fn load_url(&mut self, url: &str) {
        self.pending.push(self.loader.spawn_load(AutoFetcher::new(), url));
    }

    /// Build an in-memory curve right away.
    pub fn load_curve(&mut self, curve: &Curve) -> LoadOutcome {
        let outcome = self.loader.load_from_data(curve, &mut self.group);
        self.finish_load(outcome);
        outcome
    }

    /// Finish a load whose body was fetched elsewhere (e.g. by the
    /// browser).
    pub fn complete_load(
        &mut self,
        url: &str,
        body: Result<String, TransportError>,
    ) -> LoadOutcome {
        let outcome = self.loader.complete(url, body, &mut self.group);
        self.finish_load(outcome);
        outcome
    }

    fn finish_load(&mut self, outcome: LoadOutcome) {
        self.last_outcome = Some(outcome);
        if outcome.is_valid() {
            self.fit_to_curves();
        }
    }

    /// Recolor one segment of a loaded curve.
    ///
    /// # Errors
    ///
    /// Returns [`WCurveError::UnknownObject`] or
    /// [`WCurveError::SegmentOutOfRange`]; nothing is changed in either
    /// case.
    pub fn set_segment_color(
        &mut self,
        handle: ObjectHandle,
        segment: usize,
        rgb: [f32; 3],
    ) -> Result<(), WCurveError> {
        self.group.set_segment_color(handle, segment, rgb)
    }

    /// Remove every loaded curve.
    pub fn clear(&mut self) {
        self.group.clear();
        self.last_outcome = None;
    }

    /// Frame every loaded curve.
    pub fn fit_to_curves(&mut self) {
        self.camera_controller
            .fit_to_positions(&group_positions(&self.group));
    }

    /// Drain finished background loads.
    pub fn update(&mut self) {
        let mut finished = Vec::new();
        for pending in &mut self.pending {
            if let Some(outcome) = pending.poll(&self.loader, &mut self.group)
            {
                finished.push(outcome);
            }
        }
        self.pending.retain(|pending| !pending.is_finished());
        for outcome in finished {
            self.finish_load(outcome);
        }
    }

    /// Resize the surface, depth target and camera aspect.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.depth = DepthTarget::new(&self.context.device, width, height);
        self.camera_controller.resize(width, height);
    }

    /// Feed one input event to the camera.
    pub fn handle_input(&mut self, event: InputEvent) {
        let controller = &mut self.camera_controller;
        match event {
            InputEvent::CursorMoved { x, y } => {
                let (dx, dy) = self.pointer.moved_to(x, y);
                if !controller.mouse_pressed {
                    return;
                }
                let delta = Vec2::new(dx, dy);
                match DragMode::from_shift(controller.shift_pressed) {
                    DragMode::Rotate => controller.rotate(delta),
                    DragMode::Pan => controller.pan(delta),
                }
            }
            InputEvent::PrimaryButton { pressed } => {
                controller.mouse_pressed = pressed;
            }
            InputEvent::Scroll { delta } => controller.zoom(delta),
            InputEvent::ModifiersChanged { shift } => {
                controller.shift_pressed = shift;
            }
            InputEvent::FitView => self.fit_to_curves(),
        }
    }

    /// Upload scene changes and draw one frame.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the next frame cannot be acquired.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.renderer.sync(
            &self.context.device,
            &self.context.queue,
            &mut self.group,
        );
        self.renderer.update_uniform(
            &self.context.queue,
            &self.camera_controller.camera,
            self.options.display.line_opacity,
        );

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let [r, g, b] = self.options.display.background_color;

        let mut encoder = self.context.create_encoder();
        {
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Curve Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &view,
                            depth_slice: None,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color {
                                    r: f64::from(r),
                                    g: f64::from(g),
                                    b: f64::from(b),
                                    a: 1.0,
                                }),
                                store: wgpu::StoreOp::Store,
                            },
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: &self.depth.view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });
            self.renderer.draw(&mut pass);
        }
        self.context.submit(encoder);
        frame.present();

        self.frame_timing.end_frame();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{build, CurveRecord};

    #[test]
    fn positions_cover_every_object() {
        let mut group = Group::new();
        let curve: Curve = vec![
            CurveRecord::new(1.0, 2.0, 0.0, 0.0, 0.0),
            CurveRecord::new(3.0, 4.0, 0.0, 0.0, 0.0),
        ]
        .into();
        let _ = build(&curve, &mut group, 1.0, 1.0);
        let _ = build(&curve, &mut group, 2.0, 1.0);

        let points = group_positions(&group);
        assert_eq!(points.len(), 4);
        assert_eq!(points[0], Vec3::new(0.0, 2.0, 1.0));
        assert_eq!(points[3], Vec3::new(1.0, 8.0, 6.0));
    }

    #[test]
    fn empty_group_has_no_positions() {
        assert!(group_positions(&Group::new()).is_empty());
    }
}
