use spritedeck_engine::coords::{Rect, Vec2};
use spritedeck_engine::input::{ButtonState, InputEvent, InputFrame, InputState, MouseButton};
use spritedeck_engine::scene::DrawList;
use spritedeck_engine::text::{FontId, FontLoadError, FontSystem};

use crate::event::UiEvent;
use crate::painter::Painter;
use crate::widget::Widget;

// ── UiInput ───────────────────────────────────────────────────────────────

/// One primary-pointer transition, in window coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PointerInput {
    Moved(Vec2),
    Pressed(Vec2),
    Released(Vec2),
}

/// Input for one UI frame.
#[derive(Debug, Clone, Default)]
pub struct UiInput {
    /// Pointer transitions since the last frame, in arrival order.
    pub pointer: Vec<PointerInput>,
    /// Current pointer position; `None` while outside the window.
    pub hover: Option<Vec2>,
}

impl UiInput {
    /// Extracts primary-button pointer input from the engine's per-frame state.
    pub fn from_engine(state: &InputState, frame: &InputFrame) -> Self {
        let pointer = frame
            .events
            .iter()
            .filter_map(|ev| match ev {
                InputEvent::PointerMoved(m) => Some(PointerInput::Moved(Vec2::new(m.x, m.y))),
                InputEvent::PointerButton(b) if b.button == MouseButton::Left => {
                    let pos = Vec2::new(b.x, b.y);
                    Some(match b.state {
                        ButtonState::Pressed => PointerInput::Pressed(pos),
                        ButtonState::Released => PointerInput::Released(pos),
                    })
                }
                _ => None,
            })
            .collect();

        Self {
            pointer,
            hover: state.pointer_pos.map(|(x, y)| Vec2::new(x, y)),
        }
    }
}

// ── UiScene ───────────────────────────────────────────────────────────────

/// Owns the resources shared across frames: fonts, the draw list, and the
/// position of the press in progress.
pub struct UiScene {
    pub font_system: FontSystem,
    /// Draw list filled by the most recent [`paint`](Self::paint).
    pub draw_list: DrawList,
    font: Option<FontId>,
    press_start: Option<Vec2>,
}

impl UiScene {
    pub fn new() -> Self {
        Self {
            font_system: FontSystem::new(),
            draw_list: DrawList::new(),
            font: None,
            press_start: None,
        }
    }

    /// Loads a font; the first one loaded becomes the label font.
    pub fn load_font(&mut self, data: &[u8]) -> Result<FontId, FontLoadError> {
        let id = self.font_system.load_font(data)?;
        self.font.get_or_insert(id);
        Ok(id)
    }

    #[inline]
    pub fn font(&self) -> Option<FontId> {
        self.font
    }

    /// Turns pointer transitions into widget events, pairing each release with
    /// the press that started it.
    pub fn events(&mut self, input: &UiInput) -> Vec<UiEvent> {
        input
            .pointer
            .iter()
            .map(|p| match *p {
                PointerInput::Moved(pos) => UiEvent::Move { pos },
                PointerInput::Pressed(pos) => {
                    self.press_start = Some(pos);
                    UiEvent::Press { pos }
                }
                PointerInput::Released(pos) => UiEvent::Release {
                    pos,
                    start: self.press_start.take().unwrap_or(pos),
                },
            })
            .collect()
    }

    /// Routes this frame's events to `widgets` front to back, stopping an
    /// event at the first widget that consumes it.
    pub fn dispatch(&mut self, widgets: &mut [(&mut dyn Widget, Rect)], input: &UiInput) {
        for event in self.events(input) {
            for (widget, rect) in widgets.iter_mut() {
                if widget.on_event(&event, *rect).is_consumed() {
                    break;
                }
            }
        }
    }

    /// Clears [`draw_list`](Self::draw_list) and paints `widgets` into it in order.
    pub fn paint(&mut self, widgets: &[(&dyn Widget, Rect)], hover: Option<Vec2>) {
        self.draw_list.clear();
        let mut painter = Painter::new(&mut self.draw_list, &self.font_system, self.font, hover);
        for (widget, rect) in widgets {
            widget.paint(&mut painter, *rect);
        }
    }
}

impl Default for UiScene {
    fn default() -> Self {
        Self::new()
    }
}
