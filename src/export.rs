//! Export of the playback sequence to PNG frames, GIF and sprite sheet

use std::path::{Path, PathBuf};

use crate::gif::render_gif;
use crate::output::{frame_path, save_png, scale_image, ExportError};
use crate::render::compose_sequence;
use crate::slicer::Slicer;
use crate::spritesheet::render_spritesheet;

/// What to write and where
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Output directory
    pub out_dir: PathBuf,
    /// File stem shared by every output
    pub stem: String,
    /// Integer nearest-neighbor scale factor
    pub scale: u32,
    /// Write one PNG per frame
    pub frames: bool,
    /// Write `{stem}.gif`
    pub gif: bool,
    pub loop_gif: bool,
    pub fps: u32,
    /// Write `{stem}_sheet.png`
    pub sheet: bool,
    pub sheet_columns: Option<u32>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("build"),
            stem: "sheet".to_string(),
            scale: 1,
            frames: true,
            gif: false,
            loop_gif: true,
            fps: crate::preview::DEFAULT_FPS,
            sheet: false,
            sheet_columns: None,
        }
    }
}

/// Files written by an export
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportReport {
    pub frames: Vec<PathBuf>,
    pub gif: Option<PathBuf>,
    pub sheet: Option<PathBuf>,
}

impl ExportReport {
    pub fn files(&self) -> impl Iterator<Item = &Path> {
        self.frames
            .iter()
            .chain(self.gif.iter())
            .chain(self.sheet.iter())
            .map(PathBuf::as_path)
    }
}

/// Compose the session's playback sequence and write the requested outputs.
pub fn export(slicer: &Slicer, options: &ExportOptions) -> Result<ExportReport, ExportError> {
    let source = slicer.source().ok_or(ExportError::NotReady)?;
    let playback = slicer.playback();
    if playback.is_empty() {
        return Err(ExportError::Empty);
    }

    let composed: Vec<_> = compose_sequence(source, &playback)
        .into_iter()
        .map(|img| scale_image(img, options.scale))
        .collect();

    let mut report = ExportReport::default();

    if options.frames {
        for (position, image) in composed.iter().enumerate() {
            let path = frame_path(&options.out_dir, &options.stem, position);
            save_png(image, &path)?;
            report.frames.push(path);
        }
    }

    if options.gif {
        let path = options.out_dir.join(format!("{}.gif", options.stem));
        render_gif(&composed, options.fps, options.loop_gif, &path)?;
        report.gif = Some(path);
    }

    if options.sheet {
        let path = options.out_dir.join(format!("{}_sheet.png", options.stem));
        save_png(&render_spritesheet(&composed, options.sheet_columns), &path)?;
        report.sheet = Some(path);
    }

    tracing::info!(
        frames = composed.len(),
        dir = %options.out_dir.display(),
        "exported sequence"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use image::{Rgba, RgbaImage};
    use tempfile::tempdir;

    /// 4 columns of 2x2 cells, each a different shade of red
    fn strip() -> RgbaImage {
        RgbaImage::from_fn(8, 2, |x, _| Rgba([(x / 2) as u8 * 60, 0, 0, 255]))
    }

    #[test]
    fn test_export_not_ready() {
        let slicer = Slicer::new(1, 4);
        let err = export(&slicer, &ExportOptions::default()).unwrap_err();
        assert!(matches!(err, ExportError::NotReady));
    }

    #[test]
    fn test_export_all_excluded() {
        let mut slicer = Slicer::new(1, 4);
        slicer.set_source(strip());
        slicer.select(0..4);
        slicer.set_active(false);
        let err = export(&slicer, &ExportOptions::default()).unwrap_err();
        assert!(matches!(err, ExportError::Empty));
    }

    #[test]
    fn test_export_writes_frames_in_playback_order() {
        let dir = tempdir().unwrap();
        let mut slicer = Slicer::new(1, 4);
        slicer.set_source(strip());

        // Exclude column 1, then move column 3 ahead of column 2
        slicer.select([1]);
        slicer.set_active(false);
        slicer.pointer_down(Point::new(7.0, 1.0));
        slicer.pointer_up(Point::new(7.0, 1.0));
        slicer.move_in_sequence(crate::sequence::Direction::Earlier);

        let options = ExportOptions {
            out_dir: dir.path().to_path_buf(),
            stem: "strip".to_string(),
            scale: 2,
            gif: true,
            sheet: true,
            ..Default::default()
        };
        let report = export(&slicer, &options).unwrap();

        assert_eq!(report.frames.len(), 3);
        assert_eq!(report.files().count(), 5);

        let reds: Vec<u8> = report
            .frames
            .iter()
            .map(|p| {
                let img = image::open(p).unwrap().to_rgba8();
                assert_eq!(img.dimensions(), (4, 4));
                img.get_pixel(0, 0)[0]
            })
            .collect();
        assert_eq!(reds, vec![0, 180, 120]);

        let sheet = image::open(report.sheet.unwrap()).unwrap();
        assert_eq!((sheet.width(), sheet.height()), (12, 4));
        assert!(report.gif.unwrap().exists());
    }
}
