use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::curve::builder::{SEGMENT_END_COLOR, SEGMENT_START_COLOR};
use crate::curve::CurveStyle;
use crate::scene::DrawType;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Curve", inline)]
#[serde(default)]
/// Scale constants and segment styling applied to every loaded curve.
pub struct CurveOptions {
    /// Multiplier applied to each record's x and y.
    #[schemars(title = "XY Scale", range(min = 0.1, max = 4.0), extend("step" = 0.05))]
    pub xy_scale: f32,
    /// Spacing between consecutive records along z.
    #[schemars(title = "Z Spacing", range(min = 0.001, max = 0.5), extend("step" = 0.001))]
    pub z_scale: f32,
    /// RGBA of each segment's first vertex.
    #[schemars(skip)]
    pub segment_start_color: [f32; 4],
    /// RGBA of each segment's second vertex.
    #[schemars(skip)]
    pub segment_end_color: [f32; 4],
    /// Primitive assembly for built curves.
    #[schemars(title = "Draw Type")]
    pub draw_type: DrawType,
}

impl Default for CurveOptions {
    fn default() -> Self {
        Self {
            xy_scale: 0.8,
            z_scale: 0.03125,
            segment_start_color: SEGMENT_START_COLOR,
            segment_end_color: SEGMENT_END_COLOR,
            draw_type: DrawType::LineStrip,
        }
    }
}

impl CurveOptions {
    /// Builder style derived from these options.
    #[must_use]
    pub fn style(&self) -> CurveStyle {
        CurveStyle {
            start_color: self.segment_start_color,
            end_color: self.segment_end_color,
            draw_type: self.draw_type,
        }
    }
}
