//! Font loading and text measurement for labels.

mod font_system;

pub use font_system::{FontId, FontLoadError, FontSystem};
