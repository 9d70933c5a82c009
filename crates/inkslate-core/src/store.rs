//! Authoritative stroke collection.

use crate::stroke::{Stroke, StrokeColor, StrokeId};
use crate::tools::{ConfigError, ConfigResult};
use kurbo::Point;

/// Points closer than this to the previous recorded point are dropped.
pub const MIN_POINT_DISTANCE: f64 = 3.0;

/// Ordered stroke collection. Insertion order is paint order (back to front).
///
/// Every mutation is applied synchronously and returns whether the visible
/// collection changed.
#[derive(Debug, Clone)]
pub struct StrokeStore {
    strokes: Vec<Stroke>,
    /// Stroke currently receiving points, if a pen gesture is in progress.
    open: Option<StrokeId>,
    min_point_distance: f64,
}

impl Default for StrokeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StrokeStore {
    /// Create an empty store with the default sampling threshold.
    pub fn new() -> Self {
        Self {
            strokes: Vec::new(),
            open: None,
            min_point_distance: MIN_POINT_DISTANCE,
        }
    }

    /// Create an empty store with a custom sampling threshold.
    pub fn with_min_point_distance(min_point_distance: f64) -> ConfigResult<Self> {
        if min_point_distance.is_nan() || min_point_distance < 0.0 {
            return Err(ConfigError::NegativeMinPointDistance(min_point_distance));
        }
        Ok(Self {
            min_point_distance,
            ..Self::new()
        })
    }

    pub fn min_point_distance(&self) -> f64 {
        self.min_point_distance
    }

    /// Start a new one-point stroke on top of the stack.
    pub fn begin_stroke(&mut self, color: StrokeColor, width: f64, first: Point) -> StrokeId {
        let stroke = Stroke::new(color, width, first);
        let id = stroke.id();
        log::debug!("Begin stroke {} at ({:.1}, {:.1})", id, first.x, first.y);
        self.strokes.push(stroke);
        self.open = Some(id);
        id
    }

    /// Append a point to the open stroke.
    ///
    /// Points within the sampling threshold of the last recorded point are
    /// dropped. Does nothing if no stroke is open.
    pub fn append_point(&mut self, point: Point) -> bool {
        let min_distance = self.min_point_distance;
        let Some(stroke) = self.open_stroke_mut() else {
            return false;
        };

        if let Some(last) = stroke.last_point() {
            if last.distance(point) <= min_distance {
                log::trace!("Dropped point ({:.1}, {:.1}): too close", point.x, point.y);
                return false;
            }
        }

        stroke.push_point(point);
        true
    }

    /// Close the open stroke. A stroke that never got past its first point
    /// is removed, so committed strokes always have a segment.
    pub fn end_stroke(&mut self) -> bool {
        let Some(id) = self.open.take() else {
            return false;
        };

        let Some(pos) = self.strokes.iter().rposition(|s| s.id() == id) else {
            return false;
        };

        if self.strokes[pos].is_renderable() {
            log::debug!("Committed stroke {} ({} points)", id, self.strokes[pos].len());
            false
        } else {
            log::debug!("Discarded single-point stroke {}", id);
            self.strokes.remove(pos);
            true
        }
    }

    /// Remove a stroke. Absent identities are ignored.
    pub fn delete_stroke(&mut self, id: StrokeId) -> bool {
        let before = self.strokes.len();
        self.strokes.retain(|s| s.id() != id);
        if self.open == Some(id) {
            self.open = None;
        }
        let removed = self.strokes.len() != before;
        if removed {
            log::debug!("Deleted stroke {}", id);
        }
        removed
    }

    /// Replace the whole collection, e.g. with the result of a partial erase.
    pub fn replace_all(&mut self, strokes: Vec<Stroke>) {
        if let Some(id) = self.open {
            if !strokes.iter().any(|s| s.id() == id) {
                self.open = None;
            }
        }
        log::debug!("Replaced {} stroke(s) with {}", self.strokes.len(), strokes.len());
        self.strokes = strokes;
    }

    /// Remove every stroke.
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.open = None;
    }

    /// Read-only view of the collection in paint order.
    pub fn snapshot(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Strokes that can be drawn as lines (at least two points), in paint order.
    pub fn renderable(&self) -> impl Iterator<Item = &Stroke> {
        self.strokes.iter().filter(|s| s.is_renderable())
    }

    /// Get a stroke by identity.
    pub fn get(&self, id: StrokeId) -> Option<&Stroke> {
        self.strokes.iter().find(|s| s.id() == id)
    }

    /// Stroke currently receiving points.
    pub fn open_stroke(&self) -> Option<&Stroke> {
        self.open.and_then(|id| self.strokes.iter().rev().find(|s| s.id() == id))
    }

    fn open_stroke_mut(&mut self) -> Option<&mut Stroke> {
        let id = self.open?;
        self.strokes.iter_mut().rev().find(|s| s.id() == id)
    }

    /// Get the number of strokes.
    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}
