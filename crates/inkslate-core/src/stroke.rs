//! Freehand stroke data model.

use crate::geometry::point_to_segment_dist;
use kurbo::{BezPath, Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for strokes.
///
/// Fresh identities are random (v4). Identities of strokes produced by the
/// partial eraser are name-based (v5) on the parent identity and run index, so
/// the two kinds never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrokeId(Uuid);

impl StrokeId {
    /// Mint a new random identity.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Identity of the `run`-th piece split off `parent`.
    pub fn derived(parent: StrokeId, run: usize) -> Self {
        Self(Uuid::new_v5(&parent.0, &(run as u64).to_le_bytes()))
    }

    /// Get the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for StrokeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StrokeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Stroke color (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrokeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl StrokeColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }
}

impl Default for StrokeColor {
    fn default() -> Self {
        Self::black()
    }
}

impl From<Color> for StrokeColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<StrokeColor> for Color {
    fn from(color: StrokeColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// A freehand stroke: an ordered polyline with a color and a width.
///
/// A stroke holds at least one point while it is being drawn and at least two
/// once it is committed. Points are never reordered or rewritten after they
/// are recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub(crate) id: StrokeId,
    pub(crate) points: Vec<Point>,
    pub(crate) color: StrokeColor,
    pub(crate) width: f64,
}

impl Stroke {
    /// Start a new stroke at `first`.
    pub fn new(color: StrokeColor, width: f64, first: Point) -> Self {
        Self::from_points(vec![first], color, width)
    }

    /// Create from existing points with a fresh identity.
    pub fn from_points(points: Vec<Point>, color: StrokeColor, width: f64) -> Self {
        Self {
            id: StrokeId::new(),
            points,
            color,
            width,
        }
    }

    /// Build the `run`-th piece of this stroke after a partial erase.
    pub(crate) fn derive(&self, run: usize, points: Vec<Point>) -> Self {
        Self {
            id: StrokeId::derived(self.id, run),
            points,
            color: self.color,
            width: self.width,
        }
    }

    pub fn id(&self) -> StrokeId {
        self.id
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn color(&self) -> StrokeColor {
        self.color
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the stroke has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the stroke has at least one segment and can be drawn as a line.
    pub fn is_renderable(&self) -> bool {
        self.points.len() >= 2
    }

    /// Last recorded point.
    pub fn last_point(&self) -> Option<Point> {
        self.points.last().copied()
    }

    pub(crate) fn push_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Check if any segment passes within `tolerance + width / 2` of `point`.
    ///
    /// Single-point strokes have no segment and are never hit.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let reach = tolerance + self.width / 2.0;
        self.points
            .windows(2)
            .any(|w| point_to_segment_dist(point, w[0], w[1]) <= reach)
    }

    /// Bounding box of the recorded points (stroke width not included).
    pub fn bounds(&self) -> Rect {
        let Some(&first) = self.points.first() else {
            return Rect::ZERO;
        };

        self.points
            .iter()
            .skip(1)
            .fold(Rect::from_points(first, first), |rect, &p| rect.union_pt(p))
    }

    /// Polyline path through the recorded points, for presentation adapters.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();

        let Some((&first, rest)) = self.points.split_first() else {
            return path;
        };

        path.move_to(first);
        for &point in rest {
            path.line_to(point);
        }

        path
    }
}
