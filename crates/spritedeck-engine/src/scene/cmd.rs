use crate::asset::ImageSource;
use crate::coords::{Anchor, Rect, Vec2};
use crate::paint::Color;
use crate::text::FontId;

/// Renderer-agnostic draw command.
///
/// Extending the scene:
/// - add a payload struct here and a variant on `DrawCmd`
/// - add a push helper on `DrawList`
/// - add a matching renderer under `render::*`
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Fill(FillCmd),
    Sprite(SpriteCmd),
    Label(LabelCmd),
}

/// Solid axis-aligned rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct FillCmd {
    pub rect: Rect,
    pub color: Color,
}

/// Textured quad.
///
/// `position` is where the anchor point of the quad lands; `size` is the
/// final on-screen size in logical pixels (scale already applied).
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteCmd {
    pub image: ImageSource,
    pub position: Vec2,
    pub size: Vec2,
    pub anchor: Anchor,
    /// Multiplied with the sampled texel.
    pub tint: Color,
}

impl SpriteCmd {
    /// On-screen bounds of the quad.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.anchor.place(self.position, self.size)
    }
}

/// Single-style text run.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelCmd {
    pub text: String,
    pub font: FontId,
    /// Font size in logical pixels.
    pub size: f32,
    pub color: Color,
    /// Top-left of the text block in logical pixels.
    pub origin: Vec2,
    /// Wrapping width in logical pixels. `None` = no wrapping.
    pub max_width: Option<f32>,
}
