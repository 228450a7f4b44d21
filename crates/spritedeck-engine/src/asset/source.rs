use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Where a sprite's pixels come from.
///
/// Cheap to clone; used directly as the texture cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImageSource {
    /// Encoded image file on disk (PNG, JPEG, GIF, WebP).
    Path(PathBuf),
    /// Encoded image bytes already in memory.
    Bytes(Arc<[u8]>),
    /// Encoded image behind an HTTP(S) URL, fetched once on first use.
    Remote(String),
}

impl ImageSource {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        ImageSource::Path(path.into())
    }

    pub fn bytes(bytes: impl Into<Arc<[u8]>>) -> Self {
        ImageSource::Bytes(bytes.into())
    }

    pub fn remote(url: impl Into<String>) -> Self {
        ImageSource::Remote(url.into())
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Path(p) => write!(f, "{}", p.display()),
            ImageSource::Bytes(b) => write!(f, "<{} bytes>", b.len()),
            ImageSource::Remote(url) => f.write_str(url),
        }
    }
}
