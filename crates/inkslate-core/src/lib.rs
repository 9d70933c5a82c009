//! Inkslate Core Library
//!
//! Stroke data model and geometric editing engine for a freehand canvas:
//! point sampling while drawing, hit-testing, and the splitting eraser.

pub mod canvas;
pub mod geometry;
pub mod gesture;
pub mod input;
pub mod presenter;
pub mod store;
pub mod stroke;
pub mod tools;

pub use canvas::Canvas;
pub use geometry::{erase_near, hit_test, point_to_polyline_dist, point_to_segment_dist, split_runs};
pub use gesture::{GestureController, GestureState};
pub use input::PointerEvent;
pub use presenter::Presenter;
pub use store::{MIN_POINT_DISTANCE, StrokeStore};
pub use stroke::{Stroke, StrokeColor, StrokeId};
pub use tools::{ConfigError, ConfigResult, EraserMode, ToolConfig, ToolKind};
