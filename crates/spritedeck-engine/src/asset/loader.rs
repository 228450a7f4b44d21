use std::path::PathBuf;

use thiserror::Error;

use super::ImageSource;

/// Failure to turn an [`ImageSource`] into pixels.
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to fetch {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("image has zero width or height")]
    Empty,
}

/// Straight-alpha RGBA8 pixels, row-major, tightly packed.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Loads and decodes `source`.
///
/// `Remote` sources block on the network; callers cache the result.
pub fn decode(source: &ImageSource) -> Result<DecodedImage, TextureError> {
    match source {
        ImageSource::Path(path) => {
            let bytes = std::fs::read(path).map_err(|source| TextureError::Io {
                path: path.clone(),
                source,
            })?;
            decode_bytes(&bytes)
        }
        ImageSource::Bytes(bytes) => decode_bytes(bytes),
        ImageSource::Remote(url) => {
            log::info!("fetching remote image {url}");
            let bytes = fetch(url).map_err(|source| TextureError::Http {
                url: url.clone(),
                source,
            })?;
            decode_bytes(&bytes)
        }
    }
}

/// Decodes an in-memory encoded image, sniffing the format from its header.
pub fn decode_bytes(bytes: &[u8]) -> Result<DecodedImage, TextureError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(TextureError::Empty);
    }
    Ok(DecodedImage { width, height, rgba: rgba.into_raw() })
}

fn fetch(url: &str) -> Result<Vec<u8>, reqwest::Error> {
    let response = reqwest::blocking::get(url)?.error_for_status()?;
    Ok(response.bytes()?.to_vec())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([255, 0, 0, 128]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn decodes_png_bytes_to_rgba() {
        let decoded = decode_bytes(&png(2, 3)).unwrap();
        assert_eq!((decoded.width, decoded.height), (2, 3));
        assert_eq!(decoded.rgba.len(), 2 * 3 * 4);
        assert_eq!(&decoded.rgba[..4], &[255, 0, 0, 128]);
    }

    #[test]
    fn bytes_source_goes_through_decoder() {
        let decoded = decode(&ImageSource::bytes(png(1, 1))).unwrap();
        assert_eq!((decoded.width, decoded.height), (1, 1));
    }

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        let err = decode_bytes(b"definitely not an image").unwrap_err();
        assert!(matches!(err, TextureError::Decode(_)));
    }

    #[test]
    fn missing_file_is_an_io_error_naming_the_path() {
        let err = decode(&ImageSource::path("/nonexistent/spritedeck/cena.webp")).unwrap_err();
        assert!(matches!(err, TextureError::Io { .. }));
        assert!(err.to_string().contains("cena.webp"));
    }
}
