use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::curve::builder::{
    LineStripGeometry, COLOR_STRIDE, SEGMENT_COLOR_FLOATS,
    SEGMENT_POSITION_FLOATS,
};
use crate::error::WCurveError;

/// Primitive assembly for a scene object's vertices.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum DrawType {
    /// Each vertex connects to the next.
    #[default]
    LineStrip,
    /// Vertices pair up into independent segments.
    Lines,
}

/// Surface shading parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Material {
    /// Skip lighting; vertex colors are shown as-is.
    pub shadeless: bool,
}

impl Material {
    /// Unlit material.
    #[must_use]
    pub const fn shadeless() -> Self {
        Self { shadeless: true }
    }
}

/// Flat vertex buffers plus the set of color segments patched since the
/// last upload.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    positions: Vec<f32>,
    colors: Vec<f32>,
    dirty_segments: Vec<usize>,
}

impl Mesh {
    /// `(z, y, x)` position triples.
    #[must_use]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// `(r, g, b, a)` color quadruples.
    #[must_use]
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// Number of two-vertex segments.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.positions.len() / SEGMENT_POSITION_FLOATS
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.segment_count() * 2
    }

    /// The eight color floats of `segment`, if it exists.
    #[must_use]
    pub fn segment_colors(&self, segment: usize) -> Option<&[f32]> {
        let start = segment.checked_mul(SEGMENT_COLOR_FLOATS)?;
        self.colors
            .get(start..start.checked_add(SEGMENT_COLOR_FLOATS)?)
    }

    /// Overwrite both vertex colors of `segment` with `(r, g, b, 1)`.
    ///
    /// # Errors
    ///
    /// Returns [`WCurveError::SegmentOutOfRange`] if the mesh has no such
    /// segment; the buffer is left untouched.
    pub fn set_segment_color(
        &mut self,
        segment: usize,
        rgb: [f32; 3],
    ) -> Result<(), WCurveError> {
        let segment_count = self.colors.len() / SEGMENT_COLOR_FLOATS;
        if segment >= segment_count {
            return Err(WCurveError::SegmentOutOfRange {
                segment,
                segment_count,
            });
        }

        let start = segment * SEGMENT_COLOR_FLOATS;
        let rgba = [rgb[0], rgb[1], rgb[2], 1.0];
        for vertex in self.colors[start..start + SEGMENT_COLOR_FLOATS]
            .chunks_exact_mut(COLOR_STRIDE)
        {
            vertex.copy_from_slice(&rgba);
        }

        if !self.dirty_segments.contains(&segment) {
            self.dirty_segments.push(segment);
        }
        Ok(())
    }

    /// Segments patched since the last call, in patch order.
    pub fn take_dirty_segments(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.dirty_segments)
    }
}

impl From<LineStripGeometry> for Mesh {
    fn from(geometry: LineStripGeometry) -> Self {
        Self {
            positions: geometry.positions,
            colors: geometry.colors,
            dirty_segments: Vec::new(),
        }
    }
}

/// A renderable attached to a scene container.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SceneObject {
    draw_type: DrawType,
    mesh: Mesh,
    material: Material,
    z_transparent: bool,
}

impl SceneObject {
    /// Object with a default (lit, opaque) material.
    #[must_use]
    pub fn new(draw_type: DrawType, mesh: Mesh) -> Self {
        Self {
            draw_type,
            mesh,
            material: Material::default(),
            z_transparent: false,
        }
    }

    /// Replace the material.
    #[must_use]
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Enable or disable depth-sorted transparency.
    #[must_use]
    pub fn with_z_transparent(mut self, z_transparent: bool) -> Self {
        self.z_transparent = z_transparent;
        self
    }

    /// Primitive assembly mode.
    #[must_use]
    pub fn draw_type(&self) -> DrawType {
        self.draw_type
    }

    /// Vertex data.
    #[must_use]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Mutable vertex data.
    pub fn mesh_mut(&mut self) -> &mut Mesh {
        &mut self.mesh
    }

    /// Shading parameters.
    #[must_use]
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Whether the object is blended with depth-sorted transparency.
    #[must_use]
    pub fn z_transparent(&self) -> bool {
        self.z_transparent
    }
}
