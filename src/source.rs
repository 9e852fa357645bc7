//! Source image acquisition
//!
//! Decoding happens outside the slicing model; these helpers turn a path or
//! an in-memory buffer into the RGBA raster the model and renderer consume.

use image::RgbaImage;
use std::path::Path;
use thiserror::Error;

/// Error raised when the source image cannot be read or decoded
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("Failed to read image: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Pixel buffer of {len} bytes does not match {width}x{height} RGBA")]
    BadBuffer { width: u32, height: u32, len: usize },
}

/// Decode an image file into RGBA.
pub fn load_image(path: &Path) -> Result<RgbaImage, SourceError> {
    let bytes = std::fs::read(path)?;
    decode_image(&bytes)
}

/// Decode encoded image bytes (PNG, GIF, ...) into RGBA.
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage, SourceError> {
    let image = image::load_from_memory(bytes)?;
    Ok(image.to_rgba8())
}

/// Wrap a raw RGBA8 pixel buffer.
pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<RgbaImage, SourceError> {
    let len = pixels.len();
    RgbaImage::from_raw(width, height, pixels).ok_or(SourceError::BadBuffer { width, height, len })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::tempdir;

    #[test]
    fn test_load_png_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sheet.png");
        RgbaImage::from_pixel(6, 4, Rgba([1, 2, 3, 255])).save(&path).unwrap();

        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded.dimensions(), (6, 4));
        assert_eq!(*loaded.get_pixel(5, 3), Rgba([1, 2, 3, 255]));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = load_image(&dir.path().join("nope.png")).unwrap_err();
        assert!(matches!(err, SourceError::Io(_)));
    }

    #[test]
    fn test_garbage_bytes_fail_decode() {
        let err = decode_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, SourceError::Decode(_)));
    }

    #[test]
    fn test_from_rgba_checks_length() {
        assert!(from_rgba(2, 2, vec![0; 16]).is_ok());
        assert!(matches!(
            from_rgba(2, 2, vec![0; 15]),
            Err(SourceError::BadBuffer { len: 15, .. })
        ));
    }
}
