//! Line rendering of curve objects.

pub mod line_strip;
pub(crate) mod pipeline_util;

pub use line_strip::LineStripRenderer;
