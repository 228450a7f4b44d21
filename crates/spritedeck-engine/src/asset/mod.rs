//! Image sources and decoding.
//!
//! A sprite names its texture by [`ImageSource`]; the sprite renderer decodes
//! each source once and caches the GPU texture under the same key.

mod loader;
mod source;

pub use loader::{decode, decode_bytes, DecodedImage, TextureError};
pub use source::ImageSource;
