use spritedeck_engine::coords::Rect;

use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;

/// A top-level UI surface owning a rectangle of the window.
///
/// Widgets are retained across frames; `rect` is the area the caller assigned.
pub trait Widget {
    /// Draw this widget into `painter` within `rect`.
    fn paint(&self, painter: &mut Painter, rect: Rect);

    /// Route an input event. Return [`EventResult::Consumed`] to stop propagation.
    fn on_event(&mut self, _event: &UiEvent, _rect: Rect) -> EventResult {
        EventResult::Ignored
    }
}
