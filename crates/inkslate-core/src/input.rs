//! Pointer events delivered by the input source.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pointer event in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerEvent {
    /// Primary button pressed.
    Down { position: Point },
    /// Pointer moved. `position` is `None` when the input source could not
    /// resolve a canvas position (e.g. outside the trackable area).
    Move {
        #[serde(default)]
        position: Option<Point>,
        #[serde(default)]
        primary_held: bool,
    },
    /// Primary button released.
    Up,
    /// Pointer left the canvas.
    Leave,
}

impl PointerEvent {
    pub fn down(x: f64, y: f64) -> Self {
        PointerEvent::Down {
            position: Point::new(x, y),
        }
    }

    /// Move with no button held.
    pub fn hover(x: f64, y: f64) -> Self {
        PointerEvent::Move {
            position: Some(Point::new(x, y)),
            primary_held: false,
        }
    }

    /// Move with the primary button held.
    pub fn drag(x: f64, y: f64) -> Self {
        PointerEvent::Move {
            position: Some(Point::new(x, y)),
            primary_held: true,
        }
    }

    /// Canvas position carried by the event, if any.
    pub fn position(&self) -> Option<Point> {
        match self {
            PointerEvent::Down { position } => Some(*position),
            PointerEvent::Move { position, .. } => *position,
            PointerEvent::Up | PointerEvent::Leave => None,
        }
    }

    /// Whether this event ends a gesture.
    pub fn is_release(&self) -> bool {
        matches!(self, PointerEvent::Up | PointerEvent::Leave)
    }
}
