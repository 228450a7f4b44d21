//! GPU rendering subsystem.
//!
//! Renderers consume `scene` draw streams and issue GPU commands via wgpu.
//! Each renderer owns its GPU resources (pipelines, buffers, textures) and
//! creates them lazily on first use.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - Vertex shaders convert to NDC using a viewport uniform.

mod common;
mod ctx;
mod label;
mod options;
mod quad;
mod sprite;

pub use ctx::{RenderCtx, RenderTarget};
pub use label::LabelRenderer;
pub use options::{StageOptions, StageSizing};
pub use quad::QuadRenderer;
pub use sprite::SpriteRenderer;
