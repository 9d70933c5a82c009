//! Presentation adapter seam.

use crate::stroke::Stroke;

/// Receives the stroke collection after every mutation.
///
/// Implementors own all drawing concerns (curve smoothing, grid, viewport).
/// The strokes handed over are the geometric source of truth and must not be
/// altered for rendering.
pub trait Presenter {
    /// Show the post-mutation collection, in paint order (back to front).
    ///
    /// This is the full snapshot. Right after a pen down it holds the new
    /// stroke with its single point; adapters skip strokes that are not
    /// [`Stroke::is_renderable`].
    fn present(&mut self, strokes: &[Stroke]);
}

impl<F> Presenter for F
where
    F: FnMut(&[Stroke]),
{
    fn present(&mut self, strokes: &[Stroke]) {
        self(strokes)
    }
}
