use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Viewport appearance.
pub struct DisplayOptions {
    /// Clear color behind the curve.
    #[schemars(skip)]
    pub background_color: [f32; 3],
    /// Multiplier on every vertex alpha.
    #[schemars(title = "Line Opacity", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub line_opacity: f32,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            background_color: [0.0, 0.0, 0.0],
            line_opacity: 1.0,
        }
    }
}
