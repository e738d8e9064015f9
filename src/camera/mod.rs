//! Orbital camera for inspecting a curve.

/// Orbit controller: rotation, pan, zoom and framing.
pub mod controller;
/// Core camera struct and GPU uniform types.
pub mod core;

pub use controller::CameraController;
pub use core::{Camera, CameraUniform};
