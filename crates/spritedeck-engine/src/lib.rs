//! Spritedeck engine crate.
//!
//! Platform and GPU runtime for the sprite canvas: a winit window and event
//! loop, a wgpu device, pointer input, a recorded draw list, and the fill,
//! sprite and label renderers that consume it.

pub mod asset;
pub mod coords;
pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod text;
pub mod window;
