//! Curve → line-strip geometry.
//!
//! Each consecutive record pair becomes one segment: two `(z, y, x)`
//! position triples and two `(r, g, b, a)` color quadruples. Segment
//! endpoints are duplicated, so the buffers hold `2 * (n - 1)` vertices for
//! an `n`-record curve. The record color weights are not consulted; every
//! segment gets the same start/end color pair.

use super::record::Curve;
use crate::scene::{
    DrawType, Material, Mesh, ObjectHandle, SceneContainer, SceneObject,
};

/// Color of the first vertex of every segment.
pub const SEGMENT_START_COLOR: [f32; 4] = [0.0, 0.0, 255.0, 1.0];
/// Color of the second vertex of every segment.
pub const SEGMENT_END_COLOR: [f32; 4] = [0.0, 0.0, 225.0, 1.0];

/// Floats per position triple.
pub const POSITION_STRIDE: usize = 3;
/// Floats per color quadruple.
pub const COLOR_STRIDE: usize = 4;
/// Floats of position data per segment.
pub const SEGMENT_POSITION_FLOATS: usize = 2 * POSITION_STRIDE;
/// Floats of color data per segment.
pub const SEGMENT_COLOR_FLOATS: usize = 2 * COLOR_STRIDE;

/// How a built curve looks: segment vertex colors and primitive assembly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveStyle {
    /// Color of each segment's first vertex.
    pub start_color: [f32; 4],
    /// Color of each segment's second vertex.
    pub end_color: [f32; 4],
    /// Primitive assembly of the attached object.
    pub draw_type: DrawType,
}

impl Default for CurveStyle {
    fn default() -> Self {
        Self {
            start_color: SEGMENT_START_COLOR,
            end_color: SEGMENT_END_COLOR,
            draw_type: DrawType::LineStrip,
        }
    }
}

/// Flat position and color buffers for one line-strip.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineStripGeometry {
    /// `(z, y, x)` triples, two per segment.
    pub positions: Vec<f32>,
    /// `(r, g, b, a)` quadruples, two per segment.
    pub colors: Vec<f32>,
}

impl LineStripGeometry {
    /// Number of vertices (two per segment).
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / POSITION_STRIDE
    }

    /// Number of segments.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.positions.len() / SEGMENT_POSITION_FLOATS
    }

    /// Whether the geometry has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Build line-strip buffers with the default segment colors.
#[must_use]
pub fn build_geometry(
    curve: &Curve,
    xy_scale: f32,
    z_scale: f32,
) -> LineStripGeometry {
    build_geometry_with_style(
        curve,
        xy_scale,
        z_scale,
        &CurveStyle::default(),
    )
}

/// Build line-strip buffers, coloring every segment with the style's pair.
#[must_use]
pub fn build_geometry_with_style(
    curve: &Curve,
    xy_scale: f32,
    z_scale: f32,
    style: &CurveStyle,
) -> LineStripGeometry {
    let segments = curve.segment_count();
    let mut geometry = LineStripGeometry {
        positions: Vec::with_capacity(segments * SEGMENT_POSITION_FLOATS),
        colors: Vec::with_capacity(segments * SEGMENT_COLOR_FLOATS),
    };

    for (i, pair) in curve.records().windows(2).enumerate() {
        let (current, next) = (pair[0], pair[1]);

        geometry.positions.extend_from_slice(&[
            i as f32 * z_scale,
            current.y * xy_scale,
            current.x * xy_scale,
            (i + 1) as f32 * z_scale,
            next.y * xy_scale,
            next.x * xy_scale,
        ]);

        geometry.colors.extend_from_slice(&style.start_color);
        geometry.colors.extend_from_slice(&style.end_color);
    }

    geometry
}

/// Build a curve into a renderable line-strip and attach it to `container`.
///
/// The object is unlit, depth-sorted for transparency and drawn as a line
/// strip. Returns the handle the container assigned to it; the color of any
/// segment can later be patched through that handle.
pub fn build<C: SceneContainer + ?Sized>(
    curve: &Curve,
    container: &mut C,
    xy_scale: f32,
    z_scale: f32,
) -> ObjectHandle {
    build_with_style(
        curve,
        container,
        xy_scale,
        z_scale,
        &CurveStyle::default(),
    )
}

/// [`build`] with explicit segment colors and draw type.
pub fn build_with_style<C: SceneContainer + ?Sized>(
    curve: &Curve,
    container: &mut C,
    xy_scale: f32,
    z_scale: f32,
    style: &CurveStyle,
) -> ObjectHandle {
    let geometry =
        build_geometry_with_style(curve, xy_scale, z_scale, style);
    log::debug!(
        "built w-curve: {} records, {} segments",
        curve.len(),
        geometry.segment_count()
    );

    let line = SceneObject::new(style.draw_type, Mesh::from(geometry))
        .with_material(Material::shadeless())
        .with_z_transparent(true);
    container.add_child(line)
}
