//! Recorded pointer sessions.

use inkslate_core::{Canvas, ConfigError, PointerEvent, Presenter, Stroke, StrokeStore, ToolConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Replay errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration at step {step}: {source}")]
    Config {
        step: usize,
        #[source]
        source: ConfigError,
    },
}

/// Result type for replay operations.
pub type ReplayResult<T> = Result<T, ReplayError>;

/// One recorded input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// The user changed tool settings.
    Tools(ToolConfig),
    /// A pointer event reached the canvas.
    Pointer(PointerEvent),
}

/// A recorded session: optional sampling threshold plus ordered steps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub min_point_distance: Option<f64>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// Logs every snapshot it is handed.
#[derive(Debug, Default)]
struct LogPresenter {
    frames: usize,
}

impl Presenter for LogPresenter {
    fn present(&mut self, strokes: &[Stroke]) {
        self.frames += 1;
        let renderable = strokes.iter().filter(|s| s.is_renderable()).count();
        log::debug!(
            "Frame {}: {} stroke(s), {} renderable",
            self.frames,
            strokes.len(),
            renderable
        );
    }
}

impl Session {
    /// Read a session from a JSON file.
    pub fn load(path: &Path) -> ReplayResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse a session from JSON.
    pub fn from_json(json: &str) -> ReplayResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Feed every step through a fresh canvas.
    pub fn replay(&self) -> ReplayResult<Canvas> {
        let store = match self.min_point_distance {
            Some(distance) => StrokeStore::with_min_point_distance(distance)
                .map_err(|source| ReplayError::Config { step: 0, source })?,
            None => StrokeStore::new(),
        };
        let mut canvas = Canvas::with_store(store);
        let mut presenter = LogPresenter::default();

        for (step, entry) in self.steps.iter().enumerate() {
            match entry {
                Step::Tools(tools) => canvas
                    .set_tools(tools.clone())
                    .map_err(|source| ReplayError::Config { step, source })?,
                Step::Pointer(event) => {
                    canvas.dispatch(event, &mut presenter);
                }
            }
        }

        log::debug!("Presented {} frame(s)", presenter.frames);
        Ok(canvas)
    }
}
