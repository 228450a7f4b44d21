use spritedeck_engine::asset::ImageSource;
use spritedeck_engine::coords::{Anchor, Rect, Vec2};
use spritedeck_engine::paint::Color;
use spritedeck_engine::scene::DrawList;
use spritedeck_engine::text::{FontId, FontSystem};

/// Drawing surface passed to [`Widget::paint`](crate::widget::Widget::paint).
///
/// Wraps the engine's `DrawList` and carries the frame's hover position so
/// widgets can express hover visuals directly in `paint`.
pub struct Painter<'a> {
    draw_list: &'a mut DrawList,
    font_system: &'a FontSystem,
    font: Option<FontId>,
    /// Pointer position in logical pixels; `None` while outside the window.
    pub hover_pos: Option<Vec2>,
}

impl<'a> Painter<'a> {
    pub fn new(
        draw_list: &'a mut DrawList,
        font_system: &'a FontSystem,
        font: Option<FontId>,
        hover_pos: Option<Vec2>,
    ) -> Self {
        Self { draw_list, font_system, font, hover_pos }
    }

    // ── queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn is_hovered(&self, rect: Rect) -> bool {
        self.hover_pos.is_some_and(|p| rect.contains(p))
    }

    /// Font used by [`label`](Self::label), if one was loaded.
    #[inline]
    pub fn font(&self) -> Option<FontId> {
        self.font
    }

    /// Size of `text` in the default font; zero when no font is loaded.
    pub fn measure_text(&self, text: &str, size: f32, max_width: Option<f32>) -> Vec2 {
        match self.font {
            Some(font) => self.font_system.measure(text, font, size, max_width),
            None => Vec2::zero(),
        }
    }

    // ── drawing ───────────────────────────────────────────────────────────

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.draw_list.push_fill(rect, color);
    }

    pub fn sprite(&mut self, image: &ImageSource, position: Vec2, size: Vec2, anchor: Anchor, tint: Color) {
        self.draw_list.push_sprite(image.clone(), position, size, anchor, tint);
    }

    /// Text at `origin` (top-left of the first line). Skipped when no font is loaded.
    pub fn label(
        &mut self,
        text: impl Into<String>,
        size: f32,
        color: Color,
        origin: Vec2,
        max_width: Option<f32>,
    ) {
        if let Some(font) = self.font {
            self.draw_list.push_label(text, font, size, color, origin, max_width);
        }
    }

    // ── clipping ──────────────────────────────────────────────────────────

    /// Begin a scissor region. Must be paired with [`pop_clip`](Self::pop_clip).
    pub fn push_clip(&mut self, rect: Rect) {
        self.draw_list.push_clip(rect);
    }

    pub fn pop_clip(&mut self) {
        self.draw_list.pop_clip();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_skipped_without_a_font() {
        let mut list = DrawList::new();
        let fonts = FontSystem::new();
        let mut painter = Painter::new(&mut list, &fonts, None, None);
        painter.label("cena", 14.0, Color::WHITE, Vec2::zero(), None);
        assert_eq!(painter.measure_text("cena", 14.0, None), Vec2::zero());
        painter.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::BLACK);
        assert_eq!(list.len(), 1);
        assert_eq!(list.labels().count(), 0);
    }

    #[test]
    fn hover_requires_a_pointer() {
        let mut list = DrawList::new();
        let fonts = FontSystem::new();
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);

        let painter = Painter::new(&mut list, &fonts, None, None);
        assert!(!painter.is_hovered(rect));

        let painter = Painter::new(&mut list, &fonts, None, Some(Vec2::new(5.0, 5.0)));
        assert!(painter.is_hovered(rect));
    }
}
