use spritedeck_engine::coords::{Anchor, Rect, Vec2};
use spritedeck_engine::paint::Color;

use crate::catalog::{Catalog, ItemTemplate};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::Widget;

/// Look of the picker column.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerStyle {
    /// Width reserved on the left edge of the window.
    pub width: f32,
    pub row_height: f32,
    pub padding: f32,
    pub font_size: f32,
    pub background: Color,
    pub row_background: Color,
    pub hover_background: Color,
    pub text_color: Color,
}

impl Default for PickerStyle {
    fn default() -> Self {
        Self {
            width: 240.0,
            row_height: 180.0,
            padding: 10.0,
            font_size: 18.0,
            background: Color::from_srgb_u8(32, 33, 38, 255),
            row_background: Color::from_srgb_u8(44, 46, 53, 255),
            hover_background: Color::from_srgb_u8(64, 68, 80, 255),
            text_color: Color::WHITE,
        }
    }
}

/// Column of catalog entries; clicking one emits its [`ItemTemplate`].
///
/// Holds nothing but the catalog, the style and the callback. A click is a
/// release whose press started in the same row.
///
/// # Example
/// ```rust,ignore
/// PickerPanel::new(catalog, PickerStyle::default())
///     .on_add(|template| pending.borrow_mut().push(template))
/// ```
pub struct PickerPanel {
    catalog: Catalog,
    style: PickerStyle,
    on_add: Option<Box<dyn FnMut(ItemTemplate)>>,
}

impl PickerPanel {
    pub fn new(catalog: Catalog, style: PickerStyle) -> Self {
        Self { catalog, style, on_add: None }
    }

    /// Callback invoked once per click with a copy of the clicked entry.
    pub fn on_add(mut self, f: impl FnMut(ItemTemplate) + 'static) -> Self {
        self.on_add = Some(Box::new(f));
        self
    }

    #[inline]
    pub fn style(&self) -> &PickerStyle {
        &self.style
    }

    #[inline]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Rect of row `index` inside `rect`, rows stacked top to bottom.
    pub fn row_rect(&self, rect: Rect, index: usize) -> Rect {
        Rect::new(
            rect.origin.x,
            rect.origin.y + self.style.row_height * index as f32,
            rect.size.x,
            self.style.row_height,
        )
    }

    /// Index of the row under `pos`, if any.
    pub fn row_at(&self, rect: Rect, pos: Vec2) -> Option<usize> {
        if !rect.contains(pos) || self.style.row_height <= 0.0 {
            return None;
        }
        let index = ((pos.y - rect.origin.y) / self.style.row_height) as usize;
        (index < self.catalog.len()).then_some(index)
    }

    /// Thumbnail size for an entry: fits inside `bounds`, keeping its aspect.
    fn thumbnail_size(width: f32, height: f32, bounds: Vec2) -> Vec2 {
        if width <= 0.0 || height <= 0.0 {
            return Vec2::zero();
        }
        let scale = (bounds.x / width).min(bounds.y / height).min(1.0);
        Vec2::new(width * scale, height * scale)
    }
}

impl Widget for PickerPanel {
    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let s = &self.style;
        painter.push_clip(rect);
        painter.fill_rect(rect, s.background);

        for (index, entry) in self.catalog.iter().enumerate() {
            let row = self.row_rect(rect, index);
            let inner = row.inset(s.padding / 2.0);
            let bg = if painter.is_hovered(row) { s.hover_background } else { s.row_background };
            painter.fill_rect(inner, bg);

            let content = inner.inset(s.padding / 2.0);
            let text_h = painter.measure_text(&entry.name, s.font_size, Some(content.size.x)).y;
            painter.label(
                entry.name.clone(),
                s.font_size,
                s.text_color,
                content.origin,
                Some(content.size.x),
            );

            let gap = if text_h > 0.0 { s.padding / 2.0 } else { 0.0 };
            let thumb_area = Rect::new(
                content.origin.x,
                content.origin.y + text_h + gap,
                content.size.x,
                (content.size.y - text_h - gap).max(0.0),
            );
            let size = Self::thumbnail_size(entry.width, entry.height, thumb_area.size);
            let centre = thumb_area.origin + thumb_area.size * 0.5;
            painter.sprite(&entry.image, centre, size, Anchor::CENTER, Color::WHITE);
        }

        painter.pop_clip();
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect) -> EventResult {
        match *event {
            UiEvent::Press { pos } if rect.contains(pos) => EventResult::Consumed,
            UiEvent::Release { pos, start } => {
                let (Some(a), Some(b)) = (self.row_at(rect, start), self.row_at(rect, pos)) else {
                    return EventResult::Ignored;
                };
                if a != b {
                    return EventResult::Consumed;
                }
                if let (Some(entry), Some(f)) = (self.catalog.get(a), self.on_add.as_mut()) {
                    log::debug!("picked {:?}", entry.name);
                    f(entry.template());
                }
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use spritedeck_engine::asset::ImageSource;
    use spritedeck_engine::scene::DrawList;
    use spritedeck_engine::text::FontSystem;

    use super::*;
    use crate::catalog::CatalogEntry;

    const RECT: Rect = Rect::new(0.0, 0.0, 240.0, 720.0);

    fn catalog() -> Catalog {
        Catalog::new(vec![
            CatalogEntry::new("cena", ImageSource::path("cena.webp"), 300.0, 300.0),
            CatalogEntry::new("scala", ImageSource::path("scala.png"), 300.0, 300.0),
        ])
    }

    fn picker() -> (PickerPanel, Rc<RefCell<Vec<ItemTemplate>>>) {
        let picked = Rc::new(RefCell::new(Vec::new()));
        let sink = picked.clone();
        let panel = PickerPanel::new(catalog(), PickerStyle::default())
            .on_add(move |t| sink.borrow_mut().push(t));
        (panel, picked)
    }

    fn click(panel: &mut PickerPanel, pos: Vec2) -> EventResult {
        panel.on_event(&UiEvent::Press { pos }, RECT);
        panel.on_event(&UiEvent::Release { pos, start: pos }, RECT)
    }

    // ── clicks ────────────────────────────────────────────────────────────

    #[test]
    fn click_emits_template_copy() {
        let (mut panel, picked) = picker();
        assert_eq!(click(&mut panel, Vec2::new(100.0, 50.0)), EventResult::Consumed);
        assert_eq!(*picked.borrow(), vec![catalog().entries()[0].template()]);
    }

    #[test]
    fn clicks_arrive_in_order() {
        let (mut panel, picked) = picker();
        click(&mut panel, Vec2::new(100.0, 50.0));
        click(&mut panel, Vec2::new(100.0, 250.0));
        let names: Vec<String> = picked.borrow().iter().map(|t| t.name.clone()).collect();
        assert_eq!(names, vec!["cena", "scala"]);
    }

    #[test]
    fn click_below_last_row_is_ignored() {
        let (mut panel, picked) = picker();
        assert_eq!(click(&mut panel, Vec2::new(100.0, 500.0)), EventResult::Ignored);
        assert!(picked.borrow().is_empty());
    }

    #[test]
    fn click_outside_panel_is_ignored() {
        let (mut panel, picked) = picker();
        click(&mut panel, Vec2::new(400.0, 50.0));
        assert!(picked.borrow().is_empty());
    }

    #[test]
    fn press_and_release_in_different_rows_is_not_a_click() {
        let (mut panel, picked) = picker();
        let r = panel.on_event(
            &UiEvent::Release { pos: Vec2::new(100.0, 250.0), start: Vec2::new(100.0, 50.0) },
            RECT,
        );
        assert_eq!(r, EventResult::Consumed);
        assert!(picked.borrow().is_empty());
    }

    #[test]
    fn drag_released_over_panel_passes_through() {
        let (mut panel, picked) = picker();
        let r = panel.on_event(
            &UiEvent::Release { pos: Vec2::new(100.0, 50.0), start: Vec2::new(600.0, 300.0) },
            RECT,
        );
        assert_eq!(r, EventResult::Ignored);
        assert!(picked.borrow().is_empty());
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn rows_stack_top_to_bottom() {
        let (panel, _) = picker();
        assert_eq!(panel.row_rect(RECT, 1), Rect::new(0.0, 180.0, 240.0, 180.0));
        assert_eq!(panel.row_at(RECT, Vec2::new(1.0, 179.0)), Some(0));
        assert_eq!(panel.row_at(RECT, Vec2::new(1.0, 180.0)), Some(1));
    }

    #[test]
    fn thumbnails_fit_and_keep_aspect() {
        let s = PickerPanel::thumbnail_size(300.0, 150.0, Vec2::new(200.0, 200.0));
        assert_eq!(s, Vec2::new(200.0, 100.0));
        let s = PickerPanel::thumbnail_size(50.0, 50.0, Vec2::new(200.0, 200.0));
        assert_eq!(s, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn paints_one_thumbnail_per_entry_with_hover() {
        let (panel, _) = picker();
        let mut list = DrawList::new();
        let fonts = FontSystem::new();
        let mut painter = Painter::new(&mut list, &fonts, None, Some(Vec2::new(10.0, 10.0)));
        panel.paint(&mut painter, RECT);

        assert_eq!(list.sprites().count(), 2);
        let fills: Vec<Color> = list.fills().map(|(f, _)| f.color).collect();
        let style = PickerStyle::default();
        assert_eq!(fills, vec![style.background, style.hover_background, style.row_background]);
    }
}
