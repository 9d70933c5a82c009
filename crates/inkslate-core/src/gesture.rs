//! Pointer gesture state machine.

use crate::geometry::{erase_near, hit_test};
use crate::input::PointerEvent;
use crate::store::StrokeStore;
use crate::tools::{EraserMode, ToolConfig, ToolKind};
use kurbo::Point;

/// State of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    /// No pen stroke in progress.
    #[default]
    Idle,
    /// A pen stroke is receiving points.
    Drawing,
}

/// Turns pointer events into stroke store mutations.
#[derive(Debug, Clone, Default)]
pub struct GestureController {
    state: GestureState,
}

impl GestureController {
    /// Create a controller in the idle state.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Check if a pen stroke is in progress.
    pub fn is_drawing(&self) -> bool {
        self.state == GestureState::Drawing
    }

    /// Apply one pointer event. Returns whether the store changed.
    pub fn handle(
        &mut self,
        event: &PointerEvent,
        tools: &ToolConfig,
        store: &mut StrokeStore,
    ) -> bool {
        match *event {
            PointerEvent::Down { position } => {
                // A missed release leaves us drawing; close that stroke first.
                let mut changed = self.finish(store);
                changed |= match tools.tool {
                    ToolKind::Pen => {
                        store.begin_stroke(tools.color, tools.brush_width, position);
                        self.state = GestureState::Drawing;
                        true
                    }
                    ToolKind::Eraser => erase_at(position, tools, store),
                };
                changed
            }
            PointerEvent::Move {
                position: Some(position),
                primary_held,
            } => match tools.tool {
                ToolKind::Pen if self.is_drawing() => store.append_point(position),
                ToolKind::Eraser if primary_held => erase_at(position, tools, store),
                _ => false,
            },
            PointerEvent::Move { position: None, .. } => false,
            PointerEvent::Up | PointerEvent::Leave => self.finish(store),
        }
    }

    /// End any pen stroke in progress and return to idle.
    fn finish(&mut self, store: &mut StrokeStore) -> bool {
        if !self.is_drawing() {
            return false;
        }
        self.state = GestureState::Idle;
        store.end_stroke()
    }

    /// Drop any gesture without touching the store.
    pub fn reset(&mut self) {
        self.state = GestureState::Idle;
    }
}

/// Run the eraser once at `position`.
fn erase_at(position: Point, tools: &ToolConfig, store: &mut StrokeStore) -> bool {
    match tools.eraser_mode {
        EraserMode::Stroke => hit_test(position, store.snapshot(), tools.stroke_eraser_radius())
            .is_some_and(|id| store.delete_stroke(id)),
        EraserMode::Partial => {
            let erased = erase_near(position, store.snapshot(), tools.partial_eraser_radius());
            if erased.as_slice() == store.snapshot() {
                return false;
            }
            store.replace_all(erased);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::{Stroke, StrokeColor, StrokeId};

    fn pen() -> ToolConfig {
        ToolConfig::new().with_brush_width(2.0)
    }

    fn eraser(mode: EraserMode, size: f64) -> ToolConfig {
        ToolConfig::new()
            .with_tool(ToolKind::Eraser)
            .with_eraser_mode(mode)
            .with_eraser_size(size)
    }

    fn draw(store: &mut StrokeStore, points: &[(f64, f64)]) -> StrokeId {
        let mut gesture = GestureController::new();
        let tools = pen();
        let (x, y) = points[0];
        gesture.handle(&PointerEvent::down(x, y), &tools, store);
        let id = store.open_stroke().map(Stroke::id).unwrap();
        for &(x, y) in &points[1..] {
            gesture.handle(&PointerEvent::drag(x, y), &tools, store);
        }
        gesture.handle(&PointerEvent::Up, &tools, store);
        id
    }

    #[test]
    fn test_pen_gesture() {
        let mut store = StrokeStore::new();
        let mut gesture = GestureController::new();
        let tools = pen().with_color(StrokeColor::new(255, 0, 0, 255));

        assert!(gesture.handle(&PointerEvent::down(0.0, 0.0), &tools, &mut store));
        assert_eq!(gesture.state(), GestureState::Drawing);
        assert!(gesture.handle(&PointerEvent::drag(10.0, 0.0), &tools, &mut store));
        assert!(!gesture.handle(&PointerEvent::Up, &tools, &mut store));
        assert_eq!(gesture.state(), GestureState::Idle);

        let stroke = &store.snapshot()[0];
        assert_eq!(stroke.len(), 2);
        assert_eq!(stroke.color(), StrokeColor::new(255, 0, 0, 255));
        assert!((stroke.width() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pen_sampling_skips_small_moves() {
        let mut store = StrokeStore::new();
        let mut gesture = GestureController::new();
        let tools = pen();

        gesture.handle(&PointerEvent::down(0.0, 0.0), &tools, &mut store);
        // 1 unit from (0, 0): dropped. 5 units from (0, 0): recorded.
        // 2 units from (5, 0): dropped.
        assert!(!gesture.handle(&PointerEvent::drag(1.0, 0.0), &tools, &mut store));
        assert!(gesture.handle(&PointerEvent::drag(5.0, 0.0), &tools, &mut store));
        assert!(!gesture.handle(&PointerEvent::drag(7.0, 0.0), &tools, &mut store));
        gesture.handle(&PointerEvent::Up, &tools, &mut store);

        assert_eq!(
            store.snapshot()[0].points(),
            &[Point::new(0.0, 0.0), Point::new(5.0, 0.0)]
        );
    }

    #[test]
    fn test_pointer_leave_ends_stroke() {
        let mut store = StrokeStore::new();
        let mut gesture = GestureController::new();
        let tools = pen();

        gesture.handle(&PointerEvent::down(0.0, 0.0), &tools, &mut store);
        gesture.handle(&PointerEvent::drag(10.0, 0.0), &tools, &mut store);
        gesture.handle(&PointerEvent::Leave, &tools, &mut store);
        assert_eq!(gesture.state(), GestureState::Idle);

        // Further moves append nothing.
        assert!(!gesture.handle(&PointerEvent::drag(50.0, 0.0), &tools, &mut store));
        assert_eq!(store.snapshot()[0].len(), 2);
    }

    #[test]
    fn test_click_without_move_leaves_nothing() {
        let mut store = StrokeStore::new();
        let mut gesture = GestureController::new();
        let tools = pen();

        gesture.handle(&PointerEvent::down(5.0, 5.0), &tools, &mut store);
        assert!(gesture.handle(&PointerEvent::Up, &tools, &mut store));
        assert!(store.is_empty());
    }

    #[test]
    fn test_down_while_drawing_finishes_previous_stroke() {
        let mut store = StrokeStore::new();
        let mut gesture = GestureController::new();
        let tools = pen();

        gesture.handle(&PointerEvent::down(0.0, 0.0), &tools, &mut store);
        gesture.handle(&PointerEvent::drag(10.0, 0.0), &tools, &mut store);
        gesture.handle(&PointerEvent::down(50.0, 50.0), &tools, &mut store);
        gesture.handle(&PointerEvent::drag(60.0, 50.0), &tools, &mut store);

        assert_eq!(store.len(), 2);
        assert_eq!(store.snapshot()[0].len(), 2);
        assert_eq!(store.snapshot()[1].points()[0], Point::new(50.0, 50.0));
    }

    #[test]
    fn test_idle_moves_do_nothing() {
        let mut store = StrokeStore::new();
        let id = draw(&mut store, &[(0.0, 0.0), (10.0, 0.0)]);
        let mut gesture = GestureController::new();

        assert!(!gesture.handle(&PointerEvent::hover(5.0, 0.0), &pen(), &mut store));
        assert!(!gesture.handle(&PointerEvent::drag(5.0, 0.0), &pen(), &mut store));
        let stroke_eraser = eraser(EraserMode::Stroke, 10.0);
        assert!(!gesture.handle(&PointerEvent::hover(5.0, 0.0), &stroke_eraser, &mut store));
        assert!(!gesture.handle(&PointerEvent::Up, &stroke_eraser, &mut store));
        assert!(store.get(id).is_some());
    }

    #[test]
    fn test_move_without_position_is_ignored() {
        let mut store = StrokeStore::new();
        let mut gesture = GestureController::new();
        let tools = pen();

        gesture.handle(&PointerEvent::down(0.0, 0.0), &tools, &mut store);
        let lost = PointerEvent::Move {
            position: None,
            primary_held: true,
        };
        assert!(!gesture.handle(&lost, &tools, &mut store));
        assert_eq!(gesture.state(), GestureState::Drawing);
        assert_eq!(store.snapshot()[0].len(), 1);
    }

    #[test]
    fn test_stroke_eraser_removes_topmost_only() {
        let mut store = StrokeStore::new();
        let a = draw(&mut store, &[(0.0, 0.0), (100.0, 0.0)]);
        let b = draw(&mut store, &[(50.0, -50.0), (50.0, 50.0)]);
        let mut gesture = GestureController::new();

        let tools = eraser(EraserMode::Stroke, 10.0);
        assert!(gesture.handle(&PointerEvent::down(50.0, 0.0), &tools, &mut store));

        assert!(store.get(a).is_some());
        assert!(store.get(b).is_none());
        assert_eq!(gesture.state(), GestureState::Idle);
    }

    #[test]
    fn test_stroke_eraser_uses_half_size() {
        let mut store = StrokeStore::new();
        let id = draw(&mut store, &[(0.0, 0.0), (100.0, 0.0)]);
        let mut gesture = GestureController::new();
        let tools = eraser(EraserMode::Stroke, 10.0);

        // Reach is 10 / 2 + 2 / 2 = 6.
        assert!(!gesture.handle(&PointerEvent::down(50.0, 7.0), &tools, &mut store));
        assert!(gesture.handle(&PointerEvent::down(50.0, 5.5), &tools, &mut store));
        assert!(store.get(id).is_none());
    }

    #[test]
    fn test_stroke_eraser_drag() {
        let mut store = StrokeStore::new();
        let a = draw(&mut store, &[(0.0, 0.0), (0.0, 100.0)]);
        let b = draw(&mut store, &[(50.0, 0.0), (50.0, 100.0)]);
        let mut gesture = GestureController::new();
        let tools = eraser(EraserMode::Stroke, 4.0);

        gesture.handle(&PointerEvent::down(25.0, 50.0), &tools, &mut store);
        assert_eq!(store.len(), 2);
        // Hovering across does nothing; dragging across erases.
        assert!(!gesture.handle(&PointerEvent::hover(0.0, 50.0), &tools, &mut store));
        assert!(gesture.handle(&PointerEvent::drag(0.0, 50.0), &tools, &mut store));
        assert!(gesture.handle(&PointerEvent::drag(50.0, 50.0), &tools, &mut store));
        assert!(store.get(a).is_none());
        assert!(store.get(b).is_none());
    }

    #[test]
    fn test_partial_eraser_splits_stroke() {
        let mut store = StrokeStore::new();
        let id = draw(
            &mut store,
            &[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0), (30.0, 0.0), (40.0, 0.0)],
        );
        let mut gesture = GestureController::new();
        let tools = eraser(EraserMode::Partial, 5.0);

        assert!(gesture.handle(&PointerEvent::down(20.0, 0.0), &tools, &mut store));

        let strokes = store.snapshot();
        assert_eq!(strokes.len(), 2);
        assert_eq!(strokes[0].id(), StrokeId::derived(id, 0));
        assert_eq!(strokes[1].id(), StrokeId::derived(id, 1));
        assert_eq!(strokes[0].points(), &[Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
        assert_eq!(strokes[1].points(), &[Point::new(30.0, 0.0), Point::new(40.0, 0.0)]);
    }

    #[test]
    fn test_partial_eraser_miss_is_no_change() {
        let mut store = StrokeStore::new();
        let id = draw(&mut store, &[(0.0, 0.0), (10.0, 0.0)]);
        let mut gesture = GestureController::new();
        let tools = eraser(EraserMode::Partial, 5.0);

        assert!(!gesture.handle(&PointerEvent::down(100.0, 100.0), &tools, &mut store));
        assert_eq!(store.snapshot()[0].id(), id);
    }

    #[test]
    fn test_partial_eraser_drag_needs_button() {
        let mut store = StrokeStore::new();
        draw(&mut store, &[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]);
        let mut gesture = GestureController::new();
        let tools = eraser(EraserMode::Partial, 2.0);

        assert!(!gesture.handle(&PointerEvent::hover(10.0, 0.0), &tools, &mut store));
        assert_eq!(store.len(), 1);
        assert!(gesture.handle(&PointerEvent::drag(10.0, 0.0), &tools, &mut store));
        assert!(store.is_empty());
    }

    /// Start a pen stroke from `from` to `to` and leave it open.
    fn begin_open_stroke(
        gesture: &mut GestureController,
        store: &mut StrokeStore,
        from: (f64, f64),
        to: (f64, f64),
    ) -> StrokeId {
        gesture.handle(&PointerEvent::down(from.0, from.1), &pen(), store);
        gesture.handle(&PointerEvent::drag(to.0, to.1), &pen(), store);
        store.open_stroke().map(Stroke::id).unwrap()
    }

    #[test]
    fn test_stroke_erase_drag_while_drawing_keeps_open_stroke() {
        let mut store = StrokeStore::new();
        let committed = draw(&mut store, &[(0.0, 0.0), (20.0, 0.0)]);
        let mut gesture = GestureController::new();
        let open = begin_open_stroke(&mut gesture, &mut store, (0.0, 50.0), (20.0, 50.0));

        let tools = eraser(EraserMode::Stroke, 10.0);
        assert!(gesture.handle(&PointerEvent::drag(10.0, 0.0), &tools, &mut store));
        assert!(store.get(committed).is_none());
        assert_eq!(gesture.state(), GestureState::Drawing);
        assert_eq!(store.open_stroke().map(Stroke::id), Some(open));

        // Back on the pen, the same stroke keeps growing.
        assert!(gesture.handle(&PointerEvent::drag(40.0, 50.0), &pen(), &mut store));
        assert_eq!(store.get(open).map(Stroke::len), Some(3));
    }

    #[test]
    fn test_stroke_erase_drag_while_drawing_deletes_open_stroke() {
        let mut store = StrokeStore::new();
        let committed = draw(&mut store, &[(0.0, 0.0), (20.0, 0.0)]);
        let mut gesture = GestureController::new();
        let open = begin_open_stroke(&mut gesture, &mut store, (0.0, 50.0), (20.0, 50.0));

        let tools = eraser(EraserMode::Stroke, 10.0);
        assert!(gesture.handle(&PointerEvent::drag(10.0, 50.0), &tools, &mut store));
        assert!(store.get(open).is_none());
        assert!(store.get(committed).is_some());
        assert_eq!(gesture.state(), GestureState::Drawing);
        assert!(store.open_stroke().is_none());

        assert!(!gesture.handle(&PointerEvent::drag(40.0, 50.0), &pen(), &mut store));
        assert!(!gesture.handle(&PointerEvent::Up, &tools, &mut store));
        assert_eq!(gesture.state(), GestureState::Idle);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_partial_erase_drag_while_drawing_keeps_open_stroke() {
        let mut store = StrokeStore::new();
        let committed = draw(
            &mut store,
            &[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0), (30.0, 0.0), (40.0, 0.0)],
        );
        let mut gesture = GestureController::new();
        let open = begin_open_stroke(&mut gesture, &mut store, (0.0, 50.0), (20.0, 50.0));

        let tools = eraser(EraserMode::Partial, 5.0);
        assert!(gesture.handle(&PointerEvent::drag(20.0, 0.0), &tools, &mut store));

        let ids: Vec<StrokeId> = store.snapshot().iter().map(Stroke::id).collect();
        assert_eq!(
            ids,
            vec![
                StrokeId::derived(committed, 0),
                StrokeId::derived(committed, 1),
                open
            ]
        );
        assert_eq!(gesture.state(), GestureState::Drawing);
        assert_eq!(store.open_stroke().map(Stroke::id), Some(open));

        assert!(gesture.handle(&PointerEvent::drag(40.0, 50.0), &pen(), &mut store));
        assert!(!gesture.handle(&PointerEvent::Up, &pen(), &mut store));
        assert_eq!(store.get(open).map(Stroke::len), Some(3));
    }

    #[test]
    fn test_partial_erase_drag_while_drawing_splits_open_stroke() {
        let mut store = StrokeStore::new();
        let mut gesture = GestureController::new();
        let tools = pen();
        gesture.handle(&PointerEvent::down(0.0, 50.0), &tools, &mut store);
        for x in [10.0, 20.0, 30.0, 40.0] {
            gesture.handle(&PointerEvent::drag(x, 50.0), &tools, &mut store);
        }
        let open = store.open_stroke().map(Stroke::id).unwrap();

        let partial = eraser(EraserMode::Partial, 5.0);
        assert!(gesture.handle(&PointerEvent::drag(20.0, 50.0), &partial, &mut store));
        assert_eq!(store.len(), 2);
        assert!(store.get(open).is_none());
        assert_eq!(gesture.state(), GestureState::Drawing);
        // The pieces are committed strokes now; nothing is receiving points.
        assert!(store.open_stroke().is_none());

        assert!(!gesture.handle(&PointerEvent::drag(60.0, 50.0), &tools, &mut store));
        assert!(!gesture.handle(&PointerEvent::Up, &tools, &mut store));
        assert_eq!(gesture.state(), GestureState::Idle);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_partial_erase_while_drawing_clears_lone_open_point() {
        let mut store = StrokeStore::new();
        let mut gesture = GestureController::new();
        gesture.handle(&PointerEvent::down(100.0, 100.0), &pen(), &mut store);

        // Far from the eraser, but a single point is nothing to keep.
        let tools = eraser(EraserMode::Partial, 2.0);
        assert!(gesture.handle(&PointerEvent::drag(0.0, 0.0), &tools, &mut store));
        assert!(store.is_empty());
        assert!(store.open_stroke().is_none());
        assert_eq!(gesture.state(), GestureState::Drawing);

        assert!(!gesture.handle(&PointerEvent::Up, &tools, &mut store));
        assert_eq!(gesture.state(), GestureState::Idle);
    }
}
