//! GPU-resident line-strip buffers for one curve.

use super::dynamic_buffer::TypedBuffer;
use crate::curve::builder::{
    COLOR_STRIDE, POSITION_STRIDE, SEGMENT_COLOR_FLOATS,
};
use crate::error::WCurveError;
use crate::scene::Mesh;

/// Byte stride of one position vertex.
pub const POSITION_VERTEX_BYTES: u64 =
    (POSITION_STRIDE * size_of::<f32>()) as u64;
/// Byte stride of one color vertex.
pub const COLOR_VERTEX_BYTES: u64 =
    (COLOR_STRIDE * size_of::<f32>()) as u64;

/// Two RGBA vertices carrying `rgb` at full alpha.
fn segment_color_floats(rgb: [f32; 3]) -> [f32; SEGMENT_COLOR_FLOATS] {
    let [r, g, b] = rgb;
    [r, g, b, 1.0, r, g, b, 1.0]
}

/// Float offset into the color buffer and the floats to write there when
/// recoloring `segment` of a strip with `segment_count` segments.
///
/// # Errors
///
/// Returns [`WCurveError::SegmentOutOfRange`] if `segment` is not a segment
/// of the strip.
pub(crate) fn segment_color_patch(
    segment: usize,
    segment_count: usize,
    rgb: [f32; 3],
) -> Result<(usize, [f32; SEGMENT_COLOR_FLOATS]), WCurveError> {
    let out_of_range = || WCurveError::SegmentOutOfRange {
        segment,
        segment_count,
    };
    if segment >= segment_count {
        return Err(out_of_range());
    }
    let offset = segment
        .checked_mul(SEGMENT_COLOR_FLOATS)
        .ok_or_else(out_of_range)?;
    Ok((offset, segment_color_floats(rgb)))
}

/// Position and color vertex buffers for a single line-strip.
pub struct GpuLineStrip {
    positions: TypedBuffer<f32>,
    colors: TypedBuffer<f32>,
    segment_count: usize,
}

impl GpuLineStrip {
    /// Upload a mesh's buffers.
    pub fn new(device: &wgpu::Device, mesh: &Mesh) -> Self {
        Self {
            positions: TypedBuffer::new_with_data(
                device,
                "Curve Positions",
                mesh.positions(),
                wgpu::BufferUsages::VERTEX,
            ),
            colors: TypedBuffer::new_with_data(
                device,
                "Curve Colors",
                mesh.colors(),
                wgpu::BufferUsages::VERTEX,
            ),
            segment_count: mesh.segment_count(),
        }
    }

    /// Re-upload every buffer from `mesh`, growing them if it got longer.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        mesh: &Mesh,
    ) {
        let _ = self.positions.write(device, queue, mesh.positions());
        let _ = self.colors.write(device, queue, mesh.colors());
        self.segment_count = mesh.segment_count();
    }

    /// Overwrite both color vertices of one segment.
    ///
    /// The write lands at byte offset `segment * 32` of the color buffer.
    ///
    /// # Errors
    ///
    /// Returns [`WCurveError::SegmentOutOfRange`] if `segment` is not a
    /// segment of this strip.
    pub fn write_segment_color(
        &self,
        queue: &wgpu::Queue,
        segment: usize,
        rgb: [f32; 3],
    ) -> Result<(), WCurveError> {
        let (offset, floats) =
            segment_color_patch(segment, self.segment_count, rgb)?;
        if self.colors.write_at(queue, offset, &floats) {
            Ok(())
        } else {
            Err(WCurveError::SegmentOutOfRange {
                segment,
                segment_count: self.segment_count,
            })
        }
    }

    /// Number of vertices to draw.
    pub fn vertex_count(&self) -> u32 {
        u32::try_from(self.positions.count() / POSITION_STRIDE)
            .unwrap_or(u32::MAX)
    }

    /// Number of segments.
    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    /// Vertex buffer for slot 0.
    pub fn position_buffer(&self) -> &wgpu::Buffer {
        self.positions.buffer()
    }

    /// Vertex buffer for slot 1.
    pub fn color_buffer(&self) -> &wgpu::Buffer {
        self.colors.buffer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::dynamic_buffer::checked_byte_range;

    #[test]
    fn segment_colors_are_opaque_pairs() {
        assert_eq!(
            segment_color_floats([0.1, 0.2, 0.3]),
            [0.1, 0.2, 0.3, 1.0, 0.1, 0.2, 0.3, 1.0]
        );
    }

    #[test]
    fn segment_writes_land_every_32_bytes() {
        let count = 4 * SEGMENT_COLOR_FLOATS;
        for segment in 0..4 {
            let range = checked_byte_range::<f32>(
                segment * SEGMENT_COLOR_FLOATS,
                SEGMENT_COLOR_FLOATS,
                count,
            )
            .unwrap();
            assert_eq!(range, (segment as u64 * 32)..(segment as u64 * 32 + 32));
        }
        assert!(checked_byte_range::<f32>(
            4 * SEGMENT_COLOR_FLOATS,
            SEGMENT_COLOR_FLOATS,
            count
        )
        .is_none());
    }

    #[test]
    fn patch_offsets_step_one_segment_at_a_time() {
        for segment in 0..5 {
            let (offset, floats) =
                segment_color_patch(segment, 5, [0.5, 0.25, 1.0]).unwrap();
            assert_eq!(offset, segment * 8);
            assert_eq!(offset * size_of::<f32>(), segment * 32);
            assert_eq!(floats, [0.5, 0.25, 1.0, 1.0, 0.5, 0.25, 1.0, 1.0]);
        }
    }

    #[test]
    fn patch_past_last_segment_is_rejected() {
        for (segment, count) in [(3, 3), (0, 0), (usize::MAX, 4)] {
            match segment_color_patch(segment, count, [1.0, 0.0, 0.0]) {
                Err(WCurveError::SegmentOutOfRange {
                    segment: s,
                    segment_count,
                }) => {
                    assert_eq!(s, segment);
                    assert_eq!(segment_count, count);
                }
                other => panic!("expected out of range, got {other:?}"),
            }
        }
    }

    #[test]
    fn vertex_strides_match_layout() {
        assert_eq!(POSITION_VERTEX_BYTES, 12);
        assert_eq!(COLOR_VERTEX_BYTES, 16);
    }
}
