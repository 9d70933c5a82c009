//! Canvas state: strokes, gesture and tool settings.

use crate::gesture::{GestureController, GestureState};
use crate::input::PointerEvent;
use crate::presenter::Presenter;
use crate::store::StrokeStore;
use crate::stroke::Stroke;
use crate::tools::{ConfigResult, ToolConfig};

/// Runtime canvas state.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    /// The stroke collection being edited.
    store: StrokeStore,
    /// Pointer gesture state machine.
    gesture: GestureController,
    /// Current tool settings.
    tools: ToolConfig,
}

impl Canvas {
    /// Create a canvas with an empty store and default tools.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a canvas around an existing store.
    pub fn with_store(store: StrokeStore) -> Self {
        Self {
            store,
            ..Self::default()
        }
    }

    pub fn tools(&self) -> &ToolConfig {
        &self.tools
    }

    /// Replace the tool settings. Invalid settings are rejected and the
    /// current ones kept.
    pub fn set_tools(&mut self, tools: ToolConfig) -> ConfigResult<()> {
        tools.validate()?;
        log::debug!("Tools set to {:?} ({:?} eraser)", tools.tool, tools.eraser_mode);
        self.tools = tools;
        Ok(())
    }

    pub fn store(&self) -> &StrokeStore {
        &self.store
    }

    /// Current stroke collection in paint order.
    pub fn snapshot(&self) -> &[Stroke] {
        self.store.snapshot()
    }

    pub fn gesture_state(&self) -> GestureState {
        self.gesture.state()
    }

    /// Apply a pointer event. Returns whether the strokes changed.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) -> bool {
        self.gesture.handle(event, &self.tools, &mut self.store)
    }

    /// Apply a pointer event and hand the new snapshot to `presenter` if
    /// anything changed.
    pub fn dispatch<P: Presenter + ?Sized>(
        &mut self,
        event: &PointerEvent,
        presenter: &mut P,
    ) -> bool {
        let changed = self.handle_pointer_event(event);
        if changed {
            presenter.present(self.store.snapshot());
        }
        changed
    }

    /// Remove every stroke and drop any gesture in progress.
    pub fn clear(&mut self) {
        self.store.clear();
        self.gesture.reset();
    }
}
