//! The parent container of every draggable node.
//!
//! Owns the controller arena and turns window-level pointer input into
//! per-node events.

use std::collections::HashMap;

use spritedeck_engine::coords::{LocalSpace, Rect, Vec2};
use spritedeck_engine::paint::Color;
use spritedeck_engine::render::StageOptions;

use crate::assembler::ItemId;
use crate::drag::{DragController, NodeEvent};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::Widget;

/// Pointer input in window coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum StagePointer {
    Down(Vec2),
    Up(Vec2),
    Move(Vec2),
}

/// Node arena plus pointer routing.
///
/// Render order is the order of [`order`](Self::order); the last node is on
/// top and is hit first.
pub struct Stage {
    rect: Rect,
    space: LocalSpace,
    background: Color,
    nodes: HashMap<ItemId, DragController>,
    order: Vec<ItemId>,
    /// Node that received the last `PointerDown`, until the matching up.
    pressed: Option<ItemId>,
}

impl Stage {
    /// Stage covering `rect` (window coordinates). Node positions are relative
    /// to `rect.origin`.
    pub fn new(rect: Rect, background: Color) -> Self {
        Self {
            rect,
            space: LocalSpace::new(rect.origin),
            background,
            nodes: HashMap::new(),
            order: Vec::new(),
            pressed: None,
        }
    }

    /// Resolves `options.sizing` against the window size once, at mount.
    pub fn mount(options: &StageOptions, window: Vec2, left: f32) -> Self {
        let rect = options.sizing.resolve(window, left);
        log::info!("stage mounted at {rect:?}");
        Self::new(rect, options.background)
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[inline]
    pub fn space(&self) -> LocalSpace {
        self.space
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: ItemId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node(&self, id: ItemId) -> Option<&DragController> {
        self.nodes.get(&id)
    }

    /// Ids in render order.
    #[inline]
    pub fn order(&self) -> &[ItemId] {
        &self.order
    }

    // ── arena ─────────────────────────────────────────────────────────────

    /// Adds `controller` under `id` on top of the render order.
    ///
    /// An id that is already mounted keeps its existing controller.
    pub fn mount_node(&mut self, id: ItemId, controller: DragController) -> bool {
        if self.nodes.contains_key(&id) {
            return false;
        }
        log::debug!("mount node {id} at {:?}", controller.position());
        self.nodes.insert(id, controller);
        self.order.push(id);
        true
    }

    pub fn unmount_node(&mut self, id: ItemId) -> Option<DragController> {
        let removed = self.nodes.remove(&id)?;
        log::debug!("unmount node {id}");
        self.order.retain(|&o| o != id);
        if self.pressed == Some(id) {
            self.pressed = None;
        }
        Some(removed)
    }

    /// Replaces the render order. Ids without a controller are dropped and
    /// mounted ids missing from `order` are appended in their old order.
    pub fn set_order(&mut self, order: impl IntoIterator<Item = ItemId>) {
        let mut next: Vec<ItemId> = Vec::with_capacity(self.order.len());
        for id in order {
            if self.nodes.contains_key(&id) && !next.contains(&id) {
                next.push(id);
            }
        }
        for &id in &self.order {
            if !next.contains(&id) {
                next.push(id);
            }
        }
        self.order = next;
    }

    // ── routing ───────────────────────────────────────────────────────────

    /// Delivers `pointer` to the nodes it concerns and reports each delivery.
    pub fn route(&mut self, pointer: StagePointer) -> Vec<(ItemId, NodeEvent)> {
        let mut delivered = Vec::new();
        match pointer {
            StagePointer::Down(pos) => {
                let local = self.space.to_local(pos);
                let hit = self
                    .order
                    .iter()
                    .rev()
                    .copied()
                    .find(|id| self.nodes.get(id).is_some_and(|n| n.bounds().contains(local)));
                if let Some(id) = hit {
                    self.deliver(id, NodeEvent::PointerDown, &mut delivered);
                    self.pressed = Some(id);
                }
            }
            StagePointer::Up(pos) => {
                let local = self.space.to_local(pos);
                if let Some(id) = self.pressed.take() {
                    let inside = self.nodes.get(&id).is_some_and(|n| n.bounds().contains(local));
                    let event = if inside { NodeEvent::PointerUp } else { NodeEvent::PointerUpOutside };
                    self.deliver(id, event, &mut delivered);
                }
            }
            StagePointer::Move(pos) => {
                let local = self.space.to_local(pos);
                for i in 0..self.order.len() {
                    let id = self.order[i];
                    self.deliver(id, NodeEvent::PointerMove(local), &mut delivered);
                }
            }
        }
        delivered
    }

    fn deliver(&mut self, id: ItemId, event: NodeEvent, out: &mut Vec<(ItemId, NodeEvent)>) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.handle(event);
            out.push((id, event));
        }
    }
}

impl Widget for Stage {
    fn paint(&self, painter: &mut Painter, rect: Rect) {
        painter.push_clip(rect);
        painter.fill_rect(rect, self.background);
        for id in &self.order {
            let Some(node) = self.nodes.get(id) else { continue };
            let binding = node.binding();
            painter.sprite(
                &binding.node.image,
                self.space.to_global(binding.position),
                binding.size(),
                binding.anchor,
                Color::WHITE,
            );
        }
        painter.pop_clip();
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect) -> EventResult {
        match *event {
            // Nodes can hang past the stage edge; only the visible part grabs.
            UiEvent::Press { pos } if rect.contains(pos) => {
                let hit = self.route(StagePointer::Down(pos));
                if hit.is_empty() { EventResult::Ignored } else { EventResult::Consumed }
            }
            UiEvent::Press { .. } => EventResult::Ignored,
            UiEvent::Release { pos, .. } => {
                self.route(StagePointer::Up(pos));
                EventResult::Ignored
            }
            UiEvent::Move { pos } => {
                self.route(StagePointer::Move(pos));
                EventResult::Ignored
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use spritedeck_engine::asset::ImageSource;
    use spritedeck_engine::scene::DrawList;
    use spritedeck_engine::text::FontSystem;

    use super::*;
    use crate::drag::NodeSprite;

    fn node(x: f32, y: f32) -> DragController {
        let sprite = NodeSprite::sized(ImageSource::path("n.png"), Vec2::new(100.0, 100.0));
        DragController::with_node(Vec2::new(x, y), sprite)
    }

    /// Stage at window x = 200 with two overlapping nodes; `b` is on top.
    fn stage() -> (Stage, ItemId, ItemId) {
        let mut stage = Stage::new(Rect::new(200.0, 0.0, 800.0, 600.0), Color::RED);
        let (a, b) = (ItemId::next(), ItemId::next());
        stage.mount_node(a, node(100.0, 100.0));
        stage.mount_node(b, node(150.0, 100.0));
        (stage, a, b)
    }

    // ── hit testing ───────────────────────────────────────────────────────

    #[test]
    fn press_hits_topmost_node() {
        let (mut stage, a, b) = stage();
        let delivered = stage.route(StagePointer::Down(Vec2::new(325.0, 100.0)));
        assert_eq!(delivered, vec![(b, NodeEvent::PointerDown)]);
        assert!(stage.node(b).is_some_and(|n| n.is_dragging()));
        assert!(stage.node(a).is_some_and(|n| !n.is_dragging()));
    }

    #[test]
    fn press_translates_into_stage_space() {
        let (mut stage, a, _) = stage();
        // Local (60, 100) is inside `a` only; window x = 260.
        let delivered = stage.route(StagePointer::Down(Vec2::new(260.0, 100.0)));
        assert_eq!(delivered, vec![(a, NodeEvent::PointerDown)]);
    }

    #[test]
    fn press_on_empty_space_hits_nothing() {
        let (mut stage, _, _) = stage();
        assert!(stage.route(StagePointer::Down(Vec2::new(900.0, 500.0))).is_empty());
        assert!(stage.route(StagePointer::Up(Vec2::new(900.0, 500.0))).is_empty());
    }

    // ── release ───────────────────────────────────────────────────────────

    #[test]
    fn release_inside_is_pointer_up() {
        let (mut stage, _, b) = stage();
        stage.route(StagePointer::Down(Vec2::new(350.0, 100.0)));
        let delivered = stage.route(StagePointer::Up(Vec2::new(350.0, 100.0)));
        assert_eq!(delivered, vec![(b, NodeEvent::PointerUp)]);
    }

    #[test]
    fn release_elsewhere_is_pointer_up_outside() {
        let (mut stage, _, b) = stage();
        stage.route(StagePointer::Down(Vec2::new(350.0, 100.0)));
        let delivered = stage.route(StagePointer::Up(Vec2::new(10.0, 590.0)));
        assert_eq!(delivered, vec![(b, NodeEvent::PointerUpOutside)]);
        assert!(stage.node(b).is_some_and(|n| !n.is_dragging()));
    }

    // ── moves ─────────────────────────────────────────────────────────────

    #[test]
    fn move_is_broadcast_in_local_space() {
        let (mut stage, a, b) = stage();
        stage.route(StagePointer::Down(Vec2::new(350.0, 100.0)));
        let delivered = stage.route(StagePointer::Move(Vec2::new(210.0, 20.0)));

        let local = Vec2::new(10.0, 20.0);
        assert_eq!(
            delivered,
            vec![(a, NodeEvent::PointerMove(local)), (b, NodeEvent::PointerMove(local))]
        );
        assert_eq!(stage.node(b).map(|n| n.position()), Some(local));
        assert_eq!(stage.node(a).map(|n| n.position()), Some(Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn drag_follows_pointer_then_stops() {
        let (mut stage, _, b) = stage();
        stage.route(StagePointer::Down(Vec2::new(350.0, 100.0)));
        stage.route(StagePointer::Move(Vec2::new(500.0, 300.0)));
        stage.route(StagePointer::Up(Vec2::new(500.0, 300.0)));
        stage.route(StagePointer::Move(Vec2::new(700.0, 400.0)));
        assert_eq!(stage.node(b).map(|n| n.position()), Some(Vec2::new(300.0, 300.0)));
    }

    // ── arena ─────────────────────────────────────────────────────────────

    #[test]
    fn remount_keeps_existing_controller() {
        let (mut stage, a, _) = stage();
        assert!(!stage.mount_node(a, node(0.0, 0.0)));
        assert_eq!(stage.node(a).map(|n| n.position()), Some(Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn unmount_clears_press() {
        let (mut stage, _, b) = stage();
        stage.route(StagePointer::Down(Vec2::new(350.0, 100.0)));
        assert!(stage.unmount_node(b).is_some());
        assert!(stage.route(StagePointer::Up(Vec2::new(350.0, 100.0))).is_empty());
        assert_eq!(stage.len(), 1);
    }

    #[test]
    fn set_order_changes_hit_priority() {
        let (mut stage, a, b) = stage();
        stage.set_order([b, a]);
        assert_eq!(stage.order(), &[b, a]);
        let delivered = stage.route(StagePointer::Down(Vec2::new(325.0, 100.0)));
        assert_eq!(delivered, vec![(a, NodeEvent::PointerDown)]);
    }

    // ── widget ────────────────────────────────────────────────────────────

    #[test]
    fn press_outside_stage_rect_is_ignored() {
        let mut stage = Stage::new(Rect::new(200.0, 0.0, 800.0, 600.0), Color::RED);
        let id = ItemId::next();
        // Hangs 50px past the left edge of the stage.
        stage.mount_node(id, node(0.0, 100.0));
        let rect = stage.rect();
        let r = stage.on_event(&UiEvent::Press { pos: Vec2::new(180.0, 100.0) }, rect);
        assert_eq!(r, EventResult::Ignored);
        assert!(stage.node(id).is_some_and(|n| !n.is_dragging()));
    }

    #[test]
    fn paints_background_then_nodes_in_order() {
        let (stage, _, _) = stage();
        let mut list = DrawList::new();
        let fonts = FontSystem::new();
        let mut painter = Painter::new(&mut list, &fonts, None, None);
        stage.paint(&mut painter, stage.rect());

        assert_eq!(list.fills().count(), 1);
        let sprites: Vec<(Vec2, Option<Rect>)> =
            list.sprites().map(|(s, clip)| (s.position, clip)).collect();
        assert_eq!(
            sprites,
            vec![
                (Vec2::new(300.0, 100.0), Some(stage.rect())),
                (Vec2::new(350.0, 100.0), Some(stage.rect())),
            ]
        );
    }

    #[test]
    fn mount_resolves_sizing_once() {
        let stage = Stage::mount(&StageOptions::default(), Vec2::new(1280.0, 720.0), 240.0);
        assert_eq!(stage.rect(), Rect::new(240.0, 0.0, 1040.0, 720.0));
        assert_eq!(stage.space().origin, Vec2::new(240.0, 0.0));
    }
}
