//! Geometry kernel: distance, hit-testing and the partial eraser.
//!
//! Everything here is a pure function over borrowed strokes. Callers own the
//! collection and decide whether to install the result.

use crate::stroke::{Stroke, StrokeId};
use kurbo::Point;

/// Distance from a point to a line segment (a→b).
///
/// A zero-length segment measures the distance to its single point.
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    point.distance(a + seg * t)
}

/// Minimum distance from a point to a polyline (sequence of connected segments).
///
/// Returns infinity for fewer than two points.
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| point_to_segment_dist(point, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

/// Find the topmost stroke passing within `hit_radius` of `query`.
///
/// Strokes are checked front to back (reverse insertion order) so the result
/// matches what is painted on top.
pub fn hit_test(query: Point, strokes: &[Stroke], hit_radius: f64) -> Option<StrokeId> {
    strokes
        .iter()
        .rev()
        .find(|stroke| stroke.hit_test(query, hit_radius))
        .map(Stroke::id)
}

/// Partition `points` into maximal contiguous runs of points satisfying `keep`.
///
/// Rejected points act as cut points and appear in no run. Runs of any
/// length, including single points, are returned in their original order.
pub fn split_runs(points: &[Point], keep: impl Fn(Point) -> bool) -> Vec<Vec<Point>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();

    for &point in points {
        if keep(point) {
            current.push(point);
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }

    runs
}

/// Remove every point within `eraser_radius` of `query`, splitting strokes
/// where their continuity is broken.
///
/// A stroke of two or more points that loses no point is carried over as is,
/// identity included. Otherwise each surviving run of two or more points
/// becomes a new stroke with the parent's color and width and an identity
/// derived from the parent and the run's position; shorter runs are dropped,
/// so a lone-point stroke never survives an erase. Output keeps the input's
/// stroke order and each stroke's run order.
pub fn erase_near(query: Point, strokes: &[Stroke], eraser_radius: f64) -> Vec<Stroke> {
    let keep = |p: Point| p.distance(query) > eraser_radius;
    let mut erased = Vec::with_capacity(strokes.len());

    for stroke in strokes {
        if stroke.is_renderable() && stroke.points().iter().all(|&p| keep(p)) {
            erased.push(stroke.clone());
            continue;
        }

        let before = erased.len();
        erased.extend(
            split_runs(stroke.points(), keep)
                .into_iter()
                .filter(|run| run.len() >= 2)
                .enumerate()
                .map(|(run, points)| stroke.derive(run, points)),
        );
        log::trace!(
            "Eraser at ({:.1}, {:.1}) split stroke {} into {} piece(s)",
            query.x,
            query.y,
            stroke.id(),
            erased.len() - before
        );
    }

    erased
}
