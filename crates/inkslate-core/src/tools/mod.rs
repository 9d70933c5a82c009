//! Tool configuration supplied by the UI chrome.

use crate::stroke::StrokeColor;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default pen width in canvas units.
pub const DEFAULT_BRUSH_WIDTH: f64 = 2.0;

/// Default eraser size in canvas units.
pub const DEFAULT_ERASER_SIZE: f64 = 20.0;

/// Configuration errors.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Brush width must be positive, got {0}")]
    NonPositiveBrushWidth(f64),
    #[error("Eraser size must be positive, got {0}")]
    NonPositiveEraserSize(f64),
    #[error("Minimum point distance must be non-negative, got {0}")]
    NegativeMinPointDistance(f64),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    #[default]
    Pen,
    Eraser,
}

/// How the eraser removes ink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EraserMode {
    /// Remove points under the eraser, splitting strokes where they break.
    #[default]
    Partial,
    /// Remove the whole topmost stroke under the eraser.
    Stroke,
}

impl EraserMode {
    /// Cycle to the other eraser mode.
    pub fn next(self) -> Self {
        match self {
            EraserMode::Partial => EraserMode::Stroke,
            EraserMode::Stroke => EraserMode::Partial,
        }
    }
}

/// Snapshot of the tool settings, read on every pointer event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Active tool.
    pub tool: ToolKind,
    /// Eraser behavior when the eraser is active.
    pub eraser_mode: EraserMode,
    /// Width of new pen strokes.
    pub brush_width: f64,
    /// Eraser diameter. Partial erasing removes points within this distance;
    /// stroke erasing hit-tests with half of it.
    pub eraser_size: f64,
    /// Color of new pen strokes.
    pub color: StrokeColor,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            tool: ToolKind::default(),
            eraser_mode: EraserMode::default(),
            brush_width: DEFAULT_BRUSH_WIDTH,
            eraser_size: DEFAULT_ERASER_SIZE,
            color: StrokeColor::default(),
        }
    }
}

impl ToolConfig {
    /// Create the default configuration (black pen, partial eraser).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tool(mut self, tool: ToolKind) -> Self {
        self.tool = tool;
        self
    }

    pub fn with_eraser_mode(mut self, eraser_mode: EraserMode) -> Self {
        self.eraser_mode = eraser_mode;
        self
    }

    pub fn with_brush_width(mut self, brush_width: f64) -> Self {
        self.brush_width = brush_width;
        self
    }

    pub fn with_eraser_size(mut self, eraser_size: f64) -> Self {
        self.eraser_size = eraser_size;
        self
    }

    pub fn with_color(mut self, color: StrokeColor) -> Self {
        self.color = color;
        self
    }

    /// Radius used to hit-test whole strokes in stroke-eraser mode.
    pub fn stroke_eraser_radius(&self) -> f64 {
        self.eraser_size / 2.0
    }

    /// Radius within which points are removed in partial-eraser mode.
    pub fn partial_eraser_radius(&self) -> f64 {
        self.eraser_size
    }

    /// Check that sizes are positive (NaN is rejected too).
    pub fn validate(&self) -> ConfigResult<()> {
        if self.brush_width.is_nan() || self.brush_width <= 0.0 {
            return Err(ConfigError::NonPositiveBrushWidth(self.brush_width));
        }
        if self.eraser_size.is_nan() || self.eraser_size <= 0.0 {
            return Err(ConfigError::NonPositiveEraserSize(self.eraser_size));
        }
        Ok(())
    }
}
