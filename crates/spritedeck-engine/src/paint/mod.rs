//! Colour model shared between UI and renderers.
//!
//! Colours are linear premultiplied RGBA; fills and sprite tints both use it.

mod color;

pub use color::Color;
