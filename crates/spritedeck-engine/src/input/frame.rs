use std::collections::HashSet;

use super::types::{InputEvent, MouseButton};

/// Per-frame input deltas.
///
/// `InputState` holds what is down right now; `InputFrame` holds what happened
/// since the last frame, in arrival order.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order, including synthesized releases.
    pub events: Vec<InputEvent>,

    /// Buttons pressed this frame.
    pub buttons_pressed: HashSet<MouseButton>,

    /// Buttons released this frame.
    pub buttons_released: HashSet<MouseButton>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
    }
}
