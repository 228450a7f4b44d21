use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{ButtonState, InputEvent, MouseButton, PointerButtonEvent, PointerMoveEvent};

/// Current pointer state for a single window.
///
/// Per-frame transitions are recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in logical pixels; `None` while outside the window.
    pub pointer_pos: Option<(f32, f32)>,

    /// Last position seen inside the window.
    pub last_pointer_pos: (f32, f32),

    /// Buttons currently held.
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies `ev` to the current state and records it in `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // A release that happens while unfocused never reaches us;
                    // synthesize it so nothing stays pressed.
                    let (x, y) = self.last_pointer_pos;
                    let held: Vec<MouseButton> = self.buttons_down.drain().collect();
                    for button in held {
                        frame.buttons_released.insert(button);
                        frame.events.push(InputEvent::PointerButton(PointerButtonEvent {
                            button,
                            state: ButtonState::Released,
                            x,
                            y,
                        }));
                    }
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some((*x, *y));
                self.last_pointer_pos = (*x, *y);
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::PointerButton(PointerButtonEvent { button, state, x, y }) => {
                self.last_pointer_pos = (*x, *y);
                match state {
                    ButtonState::Pressed => {
                        if self.buttons_down.insert(*button) {
                            frame.buttons_pressed.insert(*button);
                        }
                    }
                    ButtonState::Released => {
                        if self.buttons_down.remove(button) {
                            frame.buttons_released.insert(*button);
                        }
                    }
                }
            }
        }

        frame.events.push(ev);
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(button: MouseButton, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent { button, state: ButtonState::Pressed, x, y })
    }

    fn release(button: MouseButton, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent { button, state: ButtonState::Released, x, y })
    }

    #[test]
    fn press_and_release_record_transitions() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, press(MouseButton::Left, 1.0, 2.0));
        assert!(state.button_down(MouseButton::Left));
        assert!(frame.buttons_pressed.contains(&MouseButton::Left));

        state.apply_event(&mut frame, release(MouseButton::Left, 3.0, 4.0));
        assert!(!state.button_down(MouseButton::Left));
        assert!(frame.buttons_released.contains(&MouseButton::Left));
        assert_eq!(frame.events.len(), 2);
    }

    #[test]
    fn release_without_press_is_not_a_transition() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, release(MouseButton::Left, 0.0, 0.0));
        assert!(frame.buttons_released.is_empty());
    }

    #[test]
    fn pointer_left_keeps_last_position() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, InputEvent::PointerMoved(PointerMoveEvent { x: 5.0, y: 6.0 }));
        state.apply_event(&mut frame, InputEvent::PointerLeft);
        assert_eq!(state.pointer_pos, None);
        assert_eq!(state.last_pointer_pos, (5.0, 6.0));
    }

    #[test]
    fn focus_loss_synthesizes_release_at_last_position() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, press(MouseButton::Left, 10.0, 20.0));
        frame.clear();

        state.apply_event(&mut frame, InputEvent::Focused(false));

        assert!(!state.button_down(MouseButton::Left));
        assert!(frame.buttons_released.contains(&MouseButton::Left));
        assert_eq!(frame.events[0], release(MouseButton::Left, 10.0, 20.0));
        assert_eq!(frame.events[1], InputEvent::Focused(false));
    }
}
