use std::path::Path;

use egui::Color32;
use log::debug;

use crate::error::CanvasError;

/// Width of every stroke, in pixels. Has to be a float.
pub const STROKE_WIDTH: f32 = 12.0;

/// Distance between the view edges and the decorative frame
pub const FRAME_INSET: i32 = 40;

/// Minimum per-axis movement before a sample counts as intentional
pub const TOUCH_TOLERANCE: f32 = 8.0;

/// Host-provided constants, read once when the view is constructed.
///
/// Every field has a default, so a partial JSON document only overrides
/// what it names.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ViewConfig {
    /// Color the paint cache is filled with on every resize
    pub background: Color32,
    /// Color used for strokes and the frame
    pub paint_color: Color32,
    pub touch_tolerance: f32,
    pub stroke_width: f32,
    pub frame_inset: i32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            background: Color32::from_rgb(0xFF, 0x55, 0x00),
            paint_color: Color32::from_rgb(0xFF, 0xEB, 0x3B),
            touch_tolerance: TOUCH_TOLERANCE,
            stroke_width: STROKE_WIDTH,
            frame_inset: FRAME_INSET,
        }
    }
}

impl ViewConfig {
    /// Parse a configuration from a JSON document
    pub fn from_json(json: &str) -> Result<Self, CanvasError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CanvasError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        debug!("Loaded view configuration from {}", path.display());
        Ok(config)
    }
}
