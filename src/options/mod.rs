//! Centralized runtime options with TOML preset support.
//!
//! Curve scale constants, camera and display settings are consolidated
//! here. Options serialize to/from TOML so a viewer session can be started
//! from a preset file.

mod camera;
mod curve;
mod display;

use std::path::Path;

pub use camera::CameraOptions;
pub use curve::CurveOptions;
pub use display::DisplayOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::WCurveError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[curve]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Curve scale constants and styling.
    pub curve: CurveOptions,
    /// Camera projection and control parameters.
    pub camera: CameraOptions,
    /// Viewport appearance.
    pub display: DisplayOptions,
}

impl Options {
    /// Generate JSON Schema describing the user-tunable options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`WCurveError::OptionsParse`] if the text is not valid TOML
    /// for these options.
    pub fn from_toml(text: &str) -> Result<Self, WCurveError> {
        toml::from_str(text)
            .map_err(|e| WCurveError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`WCurveError::Io`] if the file cannot be read, or
    /// [`WCurveError::OptionsParse`] if it does not parse.
    pub fn load(path: &Path) -> Result<Self, WCurveError> {
        let content =
            std::fs::read_to_string(path).map_err(WCurveError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`WCurveError`] if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), WCurveError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| WCurveError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(WCurveError::Io)?;
        }
        std::fs::write(path, content).map_err(WCurveError::Io)
    }
}
