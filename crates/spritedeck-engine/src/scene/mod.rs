//! Scene (draw stream) types.
//!
//! Responsibilities:
//! - store renderer-agnostic draw commands
//! - preserve recording order, which is also paint order within each kind
//! - scope commands to clip rects

mod cmd;
mod list;

pub use cmd::{DrawCmd, FillCmd, LabelCmd, SpriteCmd};
pub use list::{DrawItem, DrawList};
