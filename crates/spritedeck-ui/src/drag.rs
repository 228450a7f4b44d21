//! Per-node drag state machine.
//!
//! A [`DragController`] is either IDLE or DRAGGING. Pointer positions reach it
//! already translated into the parent container's space.

use spritedeck_engine::asset::ImageSource;
use spritedeck_engine::coords::{Anchor, Rect, Vec2};

/// Horizontal offset between default positions of consecutive items.
pub const NODE_SPACING: f32 = 300.0;
/// Default y of a node.
pub const DEFAULT_NODE_Y: f32 = 300.0;
/// Default x of a free-standing node.
pub const DEFAULT_NODE_X: f32 = 400.0;
/// Nodes are anchored at their centre.
pub const DEFAULT_ANCHOR: f32 = 0.5;
/// Scale applied to a node that has no explicit size.
pub const DEFAULT_NODE_SCALE: f32 = 4.0;
/// Image drawn by a node constructed without one.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://s3-us-west-2.amazonaws.com/s.cdpn.io/693612/IaUrttj.png";
/// Pixel size of [`PLACEHOLDER_IMAGE_URL`].
pub const PLACEHOLDER_NATURAL_SIZE: Vec2 = Vec2::new(26.0, 37.0);

// ── node description ──────────────────────────────────────────────────────

/// What a draggable node draws.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSprite {
    pub image: ImageSource,
    /// Explicit on-screen size. When set, `scale` is ignored.
    pub size: Option<Vec2>,
    /// Intrinsic size of `image`, scaled by `scale` when `size` is `None`.
    pub natural_size: Vec2,
    pub anchor: Anchor,
    pub scale: f32,
}

impl NodeSprite {
    /// Node showing `image` at exactly `size`.
    pub fn sized(image: ImageSource, size: Vec2) -> Self {
        Self { size: Some(size), natural_size: size, ..Self::default() }.with_image(image)
    }

    pub fn with_image(mut self, image: ImageSource) -> Self {
        self.image = image;
        self
    }

    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Size the node occupies on the stage.
    pub fn display_size(&self) -> Vec2 {
        self.size.unwrap_or(self.natural_size * self.scale)
    }
}

impl Default for NodeSprite {
    fn default() -> Self {
        Self {
            image: ImageSource::remote(PLACEHOLDER_IMAGE_URL),
            size: None,
            natural_size: PLACEHOLDER_NATURAL_SIZE,
            anchor: Anchor::uniform(DEFAULT_ANCHOR),
            scale: DEFAULT_NODE_SCALE,
        }
    }
}

// ── state machine ─────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DragState {
    pub is_dragging: bool,
    pub position: Vec2,
}

/// Pointer events a node understands.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum NodeEvent {
    PointerDown,
    PointerUp,
    PointerUpOutside,
    /// Pointer position in the node's parent space.
    PointerMove(Vec2),
}

/// Read-only view of a node, taken by the painter each frame.
#[derive(Debug, Copy, Clone)]
pub struct DragBinding<'a> {
    pub is_dragging: bool,
    pub position: Vec2,
    pub anchor: Anchor,
    pub node: &'a NodeSprite,
}

impl DragBinding<'_> {
    #[inline]
    pub fn size(&self) -> Vec2 {
        self.node.display_size()
    }
}

/// Drag behaviour for a single node instance.
#[derive(Debug, Clone)]
pub struct DragController {
    state: DragState,
    node: NodeSprite,
}

impl DragController {
    /// IDLE controller at `initial` drawing the placeholder node.
    pub fn new(initial: Vec2) -> Self {
        Self::with_node(initial, NodeSprite::default())
    }

    pub fn with_node(initial: Vec2, node: NodeSprite) -> Self {
        Self {
            state: DragState { is_dragging: false, position: initial },
            node,
        }
    }

    /// Placeholder node at the default free-standing position.
    pub fn free_standing() -> Self {
        Self::new(Vec2::new(DEFAULT_NODE_X, DEFAULT_NODE_Y))
    }

    pub fn pointer_down(&mut self) {
        if !self.state.is_dragging {
            log::trace!("drag start at {:?}", self.state.position);
        }
        self.state.is_dragging = true;
    }

    pub fn pointer_up(&mut self) {
        self.end_drag("up");
    }

    /// Same transition as [`pointer_up`](Self::pointer_up).
    pub fn pointer_up_outside(&mut self) {
        self.end_drag("up outside");
    }

    /// Follows the pointer while dragging; ignored while idle.
    pub fn pointer_move(&mut self, local: Vec2) {
        if self.state.is_dragging {
            self.state.position = local;
        }
    }

    pub fn handle(&mut self, event: NodeEvent) {
        match event {
            NodeEvent::PointerDown => self.pointer_down(),
            NodeEvent::PointerUp => self.pointer_up(),
            NodeEvent::PointerUpOutside => self.pointer_up_outside(),
            NodeEvent::PointerMove(local) => self.pointer_move(local),
        }
    }

    #[inline]
    pub fn state(&self) -> DragState {
        self.state
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.state.position
    }

    #[inline]
    pub fn node(&self) -> &NodeSprite {
        &self.node
    }

    pub fn binding(&self) -> DragBinding<'_> {
        DragBinding {
            is_dragging: self.state.is_dragging,
            position: self.state.position,
            anchor: self.node.anchor,
            node: &self.node,
        }
    }

    /// Node bounds in parent space.
    pub fn bounds(&self) -> Rect {
        self.node.anchor.place(self.state.position, self.node.display_size())
    }

    fn end_drag(&mut self, how: &str) {
        if self.state.is_dragging {
            log::trace!("drag end ({how}) at {:?}", self.state.position);
        }
        self.state.is_dragging = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── transitions ───────────────────────────────────────────────────────

    #[test]
    fn starts_idle_at_initial_position() {
        let c = DragController::new(Vec2::new(5.0, 6.0));
        assert_eq!(c.state(), DragState { is_dragging: false, position: Vec2::new(5.0, 6.0) });
    }

    #[test]
    fn down_move_up_outside() {
        let mut c = DragController::new(Vec2::zero());
        c.pointer_down();
        c.pointer_move(Vec2::new(10.0, 20.0));
        assert!(c.is_dragging());
        assert_eq!(c.position(), Vec2::new(10.0, 20.0));

        c.pointer_up_outside();
        assert!(!c.is_dragging());
        assert_eq!(c.position(), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn up_and_up_outside_are_identical() {
        let mut a = DragController::new(Vec2::zero());
        let mut b = a.clone();
        for c in [&mut a, &mut b] {
            c.pointer_down();
            c.pointer_move(Vec2::new(3.0, 4.0));
        }
        a.pointer_up();
        b.pointer_up_outside();
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn idle_move_is_ignored() {
        let mut c = DragController::new(Vec2::new(1.0, 2.0));
        c.pointer_move(Vec2::new(99.0, 99.0));
        assert_eq!(c.position(), Vec2::new(1.0, 2.0));
        assert!(!c.is_dragging());
    }

    #[test]
    fn moves_after_release_are_ignored() {
        let mut c = DragController::new(Vec2::zero());
        c.handle(NodeEvent::PointerDown);
        c.handle(NodeEvent::PointerMove(Vec2::new(7.0, 7.0)));
        c.handle(NodeEvent::PointerUp);
        c.handle(NodeEvent::PointerMove(Vec2::new(50.0, 50.0)));
        assert_eq!(c.position(), Vec2::new(7.0, 7.0));
    }

    #[test]
    fn repeated_down_keeps_dragging() {
        let mut c = DragController::new(Vec2::zero());
        c.pointer_down();
        c.pointer_down();
        assert!(c.is_dragging());
    }

    #[test]
    fn up_while_idle_is_a_no_op() {
        let mut c = DragController::new(Vec2::new(2.0, 2.0));
        c.pointer_up();
        assert_eq!(c.state(), DragState { is_dragging: false, position: Vec2::new(2.0, 2.0) });
    }

    // ── geometry ──────────────────────────────────────────────────────────

    #[test]
    fn sized_node_is_centred_on_position() {
        let node = NodeSprite::sized(ImageSource::path("a.png"), Vec2::new(300.0, 300.0));
        let c = DragController::with_node(Vec2::new(300.0, 300.0), node);
        assert_eq!(c.bounds(), Rect::new(150.0, 150.0, 300.0, 300.0));
    }

    #[test]
    fn explicit_size_overrides_scale() {
        let node = NodeSprite::sized(ImageSource::path("a.png"), Vec2::new(10.0, 20.0));
        assert_eq!(node.display_size(), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn placeholder_node_is_scaled() {
        let c = DragController::free_standing();
        assert_eq!(c.position(), Vec2::new(DEFAULT_NODE_X, DEFAULT_NODE_Y));
        assert_eq!(c.node().image, ImageSource::remote(PLACEHOLDER_IMAGE_URL));
        assert_eq!(c.binding().size(), Vec2::new(104.0, 148.0));
    }

    #[test]
    fn binding_reflects_state() {
        let mut c = DragController::new(Vec2::zero());
        c.pointer_down();
        c.pointer_move(Vec2::new(4.0, 2.0));
        let b = c.binding();
        assert!(b.is_dragging);
        assert_eq!(b.position, Vec2::new(4.0, 2.0));
        assert_eq!(b.anchor, Anchor::CENTER);
    }
}
