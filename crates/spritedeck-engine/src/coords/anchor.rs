use super::{Rect, Vec2};

/// Normalized origin of a drawable node.
///
/// `(0, 0)` is the top-left corner, `(0.5, 0.5)` the centre, `(1, 1)` the
/// bottom-right. A node's position names the point of its box that sits
/// under the anchor.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Anchor(pub Vec2);

impl Anchor {
    pub const TOP_LEFT: Anchor = Anchor(Vec2::new(0.0, 0.0));
    pub const CENTER: Anchor = Anchor(Vec2::new(0.5, 0.5));

    /// Same normalized value on both axes.
    #[inline]
    pub const fn uniform(v: f32) -> Self {
        Anchor(Vec2::new(v, v))
    }

    /// Box of `size` whose anchor point lies at `position`.
    #[inline]
    pub fn place(self, position: Vec2, size: Vec2) -> Rect {
        Rect::from_origin_size(position - size.scale(self.0), size)
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Anchor::TOP_LEFT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_left_anchor_keeps_position_as_origin() {
        let r = Anchor::TOP_LEFT.place(Vec2::new(10.0, 20.0), Vec2::new(4.0, 6.0));
        assert_eq!(r, Rect::new(10.0, 20.0, 4.0, 6.0));
    }

    #[test]
    fn center_anchor_centres_box_on_position() {
        let r = Anchor::CENTER.place(Vec2::new(300.0, 300.0), Vec2::new(300.0, 200.0));
        assert_eq!(r, Rect::new(150.0, 200.0, 300.0, 200.0));
    }

    #[test]
    fn uniform_matches_center_at_half() {
        assert_eq!(Anchor::uniform(0.5), Anchor::CENTER);
    }
}
