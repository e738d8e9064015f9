//! Curve data and geometry generation.
//!
//! A [`Curve`] is an ordered list of [`CurveRecord`]s. The
//! [`builder`] turns it into flat line-strip position/color buffers and
//! attaches the result to a [`SceneContainer`](crate::scene::SceneContainer).
//! [`fasta`] produces curves from nucleotide sequences.

pub mod builder;
pub mod fasta;
mod record;

pub use builder::{
    build, build_geometry, build_geometry_with_style, build_with_style,
    CurveStyle, LineStripGeometry,
};
pub use record::{Curve, CurveRecord};
