//! Contract between the runtime loop and higher layers.
//!
//! Keeps winit and wgpu plumbing out of user code behind a per-frame context.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
