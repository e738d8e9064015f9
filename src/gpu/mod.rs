//! GPU resource management: device/surface setup, growable vertex
//! buffers, per-curve line buffers and the depth attachment.

/// Growable typed GPU buffers.
pub mod dynamic_buffer;
/// Position and color buffers of one uploaded curve.
pub mod line_buffer;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// Depth attachment texture.
pub mod texture;
