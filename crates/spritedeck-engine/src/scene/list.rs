use crate::asset::ImageSource;
use crate::coords::{Anchor, Rect, Vec2};
use crate::paint::Color;
use crate::text::FontId;

use super::{DrawCmd, FillCmd, LabelCmd, SpriteCmd};

/// A recorded command plus the clip rect active when it was recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub cmd: DrawCmd,
    /// Scissor rect in logical pixels. `None` = no clipping (draw everywhere).
    pub clip_rect: Option<Rect>,
}

/// Recorded draw stream for a frame.
///
/// Commands are kept in recording order. Each renderer walks the list and
/// picks out its own kind, so within a kind the later command paints on top.
///
/// # Clipping
///
/// Use [`push_clip`](Self::push_clip) / [`pop_clip`](Self::pop_clip) to scope
/// commands to a scissor rect. Nested clips intersect with their parent.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,

    /// Top is the current effective clip, already intersected with all parents.
    clip_stack: Vec<Rect>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items and the clip stack. Keeps allocated capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.clip_stack.clear();
    }

    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Records a command under the current clip rect.
    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        self.items.push(DrawItem {
            cmd,
            clip_rect: self.clip_stack.last().copied(),
        });
    }

    #[inline]
    pub fn push_fill(&mut self, rect: Rect, color: Color) {
        self.push(DrawCmd::Fill(FillCmd { rect, color }));
    }

    #[inline]
    pub fn push_sprite(
        &mut self,
        image: ImageSource,
        position: Vec2,
        size: Vec2,
        anchor: Anchor,
        tint: Color,
    ) {
        self.push(DrawCmd::Sprite(SpriteCmd { image, position, size, anchor, tint }));
    }

    pub fn push_label(
        &mut self,
        text: impl Into<String>,
        font: FontId,
        size: f32,
        color: Color,
        origin: Vec2,
        max_width: Option<f32>,
    ) {
        self.push(DrawCmd::Label(LabelCmd {
            text: text.into(),
            font,
            size,
            color,
            origin,
            max_width,
        }));
    }

    /// Begins a scissor region. Calls must be balanced with [`pop_clip`](Self::pop_clip).
    #[inline]
    pub fn push_clip(&mut self, rect: Rect) {
        let effective = match self.clip_stack.last() {
            None => rect,
            // No overlap with the parent: zero-area clip, renderers skip the draw.
            Some(&parent) => parent.intersect(rect).unwrap_or_default(),
        };
        self.clip_stack.push(effective);
    }

    /// Ends the most recent scissor region.
    #[inline]
    pub fn pop_clip(&mut self) {
        debug_assert!(!self.clip_stack.is_empty(), "pop_clip called without matching push_clip");
        self.clip_stack.pop();
    }

    /// Sprite commands in recording order, with their clip rects.
    pub fn sprites(&self) -> impl Iterator<Item = (&SpriteCmd, Option<Rect>)> {
        self.items.iter().filter_map(|item| match &item.cmd {
            DrawCmd::Sprite(cmd) => Some((cmd, item.clip_rect)),
            _ => None,
        })
    }

    /// Fill commands in recording order, with their clip rects.
    pub fn fills(&self) -> impl Iterator<Item = (&FillCmd, Option<Rect>)> {
        self.items.iter().filter_map(|item| match &item.cmd {
            DrawCmd::Fill(cmd) => Some((cmd, item.clip_rect)),
            _ => None,
        })
    }

    /// Label commands in recording order, with their clip rects.
    pub fn labels(&self) -> impl Iterator<Item = (&LabelCmd, Option<Rect>)> {
        self.items.iter().filter_map(|item| match &item.cmd {
            DrawCmd::Label(cmd) => Some((cmd, item.clip_rect)),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprite(list: &mut DrawList, x: f32) {
        list.push_sprite(
            ImageSource::remote("https://example.invalid/a.png"),
            Vec2::new(x, 0.0),
            Vec2::splat(10.0),
            Anchor::CENTER,
            Color::WHITE,
        );
    }

    // ── ordering ──────────────────────────────────────────────────────────

    #[test]
    fn sprites_come_back_in_recording_order() {
        let mut list = DrawList::new();
        sprite(&mut list, 1.0);
        list.push_fill(Rect::new(0.0, 0.0, 1.0, 1.0), Color::RED);
        sprite(&mut list, 2.0);

        let xs: Vec<f32> = list.sprites().map(|(s, _)| s.position.x).collect();
        assert_eq!(xs, vec![1.0, 2.0]);
        assert_eq!(list.fills().count(), 1);
        assert_eq!(list.len(), 3);
    }

    // ── clipping ──────────────────────────────────────────────────────────

    #[test]
    fn items_inherit_current_clip() {
        let mut list = DrawList::new();
        sprite(&mut list, 0.0);
        list.push_clip(Rect::new(0.0, 0.0, 100.0, 100.0));
        sprite(&mut list, 1.0);
        list.pop_clip();
        sprite(&mut list, 2.0);

        let clips: Vec<Option<Rect>> = list.sprites().map(|(_, c)| c).collect();
        assert_eq!(clips, vec![None, Some(Rect::new(0.0, 0.0, 100.0, 100.0)), None]);
    }

    #[test]
    fn nested_clip_intersects_parent() {
        let mut list = DrawList::new();
        list.push_clip(Rect::new(0.0, 0.0, 100.0, 100.0));
        list.push_clip(Rect::new(50.0, 50.0, 100.0, 100.0));
        list.push_fill(Rect::new(0.0, 0.0, 1.0, 1.0), Color::RED);

        let (_, clip) = list.fills().next().unwrap();
        assert_eq!(clip, Some(Rect::new(50.0, 50.0, 50.0, 50.0)));
    }

    #[test]
    fn disjoint_nested_clip_is_empty() {
        let mut list = DrawList::new();
        list.push_clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        list.push_clip(Rect::new(20.0, 20.0, 10.0, 10.0));
        list.push_fill(Rect::new(0.0, 0.0, 1.0, 1.0), Color::RED);

        let (_, clip) = list.fills().next().unwrap();
        assert!(clip.unwrap().is_empty());
    }

    #[test]
    fn clear_resets_items_and_clips() {
        let mut list = DrawList::new();
        list.push_clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        sprite(&mut list, 0.0);
        list.clear();
        sprite(&mut list, 0.0);

        assert_eq!(list.len(), 1);
        assert_eq!(list.sprites().next().unwrap().1, None);
    }
}
