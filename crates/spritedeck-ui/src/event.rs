use spritedeck_engine::coords::Vec2;

/// Pointer events routed to widgets, in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiEvent {
    /// Primary button went down at `pos`.
    Press { pos: Vec2 },
    /// Primary button came up at `pos`; `start` is where it went down.
    ///
    /// Delivered wherever `pos` is, including outside the receiving widget.
    Release { pos: Vec2, start: Vec2 },
    /// Pointer moved to `pos`.
    Move { pos: Vec2 },
}

/// Result returned by [`Widget::on_event`](crate::widget::Widget::on_event).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was handled; stop routing to later widgets.
    Consumed,
    /// Event was not handled; keep routing.
    Ignored,
}

impl EventResult {
    #[inline]
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }
}
