//! PNG output, scaling and export file naming

use image::imageops::FilterType;
use image::RgbaImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for export operations
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    /// No source image has been loaded yet
    #[error("Source image is not ready")]
    NotReady,
    /// Every frame is excluded
    #[error("No active frames to export")]
    Empty,
}

/// Create the parent directory of `path` if it is missing.
pub(crate) fn ensure_parent(path: &Path) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Save an RGBA image to a PNG file, creating parent directories.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), ExportError> {
    ensure_parent(path)?;
    image.save(path)?;
    Ok(())
}

/// Scale image by integer factor using nearest-neighbor interpolation.
///
/// Factors of 0 and 1 return the image unchanged.
pub fn scale_image(image: RgbaImage, factor: u32) -> RgbaImage {
    if factor <= 1 {
        return image;
    }
    let (w, h) = image.dimensions();
    image::imageops::resize(&image, w * factor, h * factor, FilterType::Nearest)
}

/// Path of the PNG for the frame at `position` in playback order:
/// `{dir}/{stem}_{position:03}.png`.
pub fn frame_path(dir: &Path, stem: &str, position: usize) -> PathBuf {
    dir.join(format!("{}_{:03}.png", stem, position))
}

/// File stem to use for an input image, falling back to "sheet".
pub fn output_stem(input: &Path) -> String {
    input
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("sheet")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::tempdir;

    #[test]
    fn test_frame_path_numbering() {
        let path = frame_path(Path::new("out"), "walk", 7);
        assert_eq!(path, PathBuf::from("out/walk_007.png"));
    }

    #[test]
    fn test_output_stem() {
        assert_eq!(output_stem(Path::new("art/hero_sheet.png")), "hero_sheet");
        assert_eq!(output_stem(Path::new("")), "sheet");
    }

    #[test]
    fn test_save_png_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("frame.png");
        let image = RgbaImage::from_pixel(2, 3, Rgba([9, 8, 7, 255]));

        save_png(&image, &path).unwrap();
        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.dimensions(), (2, 3));
        assert_eq!(*loaded.get_pixel(1, 2), Rgba([9, 8, 7, 255]));
    }

    #[test]
    fn test_scale_image_identity_factors() {
        let image = RgbaImage::from_pixel(3, 2, Rgba([1, 1, 1, 255]));
        assert_eq!(scale_image(image.clone(), 0).dimensions(), (3, 2));
        assert_eq!(scale_image(image, 1).dimensions(), (3, 2));
    }

    #[test]
    fn test_scale_image_nearest() {
        let mut image = RgbaImage::from_pixel(2, 1, Rgba([255, 0, 0, 255]));
        image.put_pixel(1, 0, Rgba([0, 0, 255, 0]));

        let scaled = scale_image(image, 3);
        assert_eq!(scaled.dimensions(), (6, 3));
        assert_eq!(*scaled.get_pixel(2, 2), Rgba([255, 0, 0, 255]));
        assert_eq!(*scaled.get_pixel(3, 0), Rgba([0, 0, 255, 0]));
    }
}
