//! Geometry types shared by the renderers and the UI layer.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! Renderers convert to NDC in shaders using a viewport uniform.

mod anchor;
mod rect;
mod space;
mod vec2;
mod viewport;

pub use anchor::Anchor;
pub use rect::Rect;
pub use space::LocalSpace;
pub use vec2::Vec2;
pub use viewport::Viewport;
