//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::input::ShapeKind;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing defaults applied when the editor starts.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Initial drawing color - a named color or an RGB array like `[255, 0, 0]`
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Tool selected at startup
    #[serde(default = "default_tool")]
    pub default_tool: ShapeKind,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_tool: default_tool(),
        }
    }
}

/// Canvas surface and history settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Canvas width in pixels (valid range: 1 - 8192)
    #[serde(default = "default_width")]
    pub width: i32,

    /// Canvas height in pixels (valid range: 1 - 8192)
    #[serde(default = "default_height")]
    pub height: i32,

    /// Color shown beneath the drawing; the eraser paints with it
    #[serde(default = "default_background")]
    pub background: ColorSpec,

    /// Number of undo steps kept (valid range: 1 - 256)
    #[serde(default = "default_history_depth")]
    pub history_depth: usize,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            background: default_background(),
            history_depth: default_history_depth(),
        }
    }
}

/// Eraser settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EraserConfig {
    /// Stamp radius in pixels (valid range: 1.0 - 100.0)
    #[serde(default = "default_eraser_radius")]
    pub radius: f64,
}

impl Default for EraserConfig {
    fn default() -> Self {
        Self {
            radius: default_eraser_radius(),
        }
    }
}

fn default_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_tool() -> ShapeKind {
    ShapeKind::Line
}

fn default_width() -> i32 {
    1600
}

fn default_height() -> i32 {
    750
}

fn default_background() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_history_depth() -> usize {
    32
}

fn default_eraser_radius() -> f64 {
    crate::input::tool::DEFAULT_ERASER_RADIUS
}
