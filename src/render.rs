//! Frame composition - copies playback entries out of the source image
//!
//! Each entry's source rectangle is snapped to whole pixels, copied onto a
//! transparent cell and placed at the entry's destination offset. Pixels
//! pushed past the cell edge are dropped.

use image::{imageops, Rgba, RgbaImage};
use rayon::prelude::*;

use crate::sequence::PlaybackEntry;

/// Transparent color used for empty cell area
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Largest whole-pixel frame size among `entries`, at least 1x1.
pub fn cell_size(entries: &[PlaybackEntry]) -> (u32, u32) {
    entries.iter().fold((1, 1), |(w, h), entry| {
        let (_, _, ew, eh) = entry.source.to_pixels();
        (w.max(ew), h.max(eh))
    })
}

/// Compose one entry onto a transparent `cell` sized canvas.
pub fn compose_frame(source: &RgbaImage, entry: &PlaybackEntry, cell: (u32, u32)) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(cell.0.max(1), cell.1.max(1), TRANSPARENT);

    let (x, y, w, h) = entry.source.to_pixels();
    let x0 = x.clamp(0, i64::from(source.width())) as u32;
    let y0 = y.clamp(0, i64::from(source.height())) as u32;
    if w == 0 || h == 0 || x0 >= source.width() || y0 >= source.height() {
        return canvas;
    }

    // crop_imm clips the region to the image bounds
    let slice = imageops::crop_imm(source, x0, y0, w, h).to_image();
    imageops::replace(&mut canvas, &slice, i64::from(entry.offset_x), i64::from(entry.offset_y));
    canvas
}

/// Compose every entry, in order, onto cells of a common size.
pub fn compose_sequence(source: &RgbaImage, entries: &[PlaybackEntry]) -> Vec<RgbaImage> {
    let cell = cell_size(entries);
    entries
        .par_iter()
        .map(|entry| compose_frame(source, entry, cell))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    /// 4x2 image: left half red, right half blue
    fn two_tone() -> RgbaImage {
        RgbaImage::from_fn(4, 2, |x, _| if x < 2 { RED } else { BLUE })
    }

    fn entry(id: usize, x: f64, w: f64, dx: i32, dy: i32) -> PlaybackEntry {
        PlaybackEntry {
            id,
            source: Rect::new(x, 0.0, w, 2.0),
            offset_x: dx,
            offset_y: dy,
        }
    }

    #[test]
    fn test_compose_copies_source_rect() {
        let img = compose_frame(&two_tone(), &entry(1, 2.0, 2.0, 0, 0), (2, 2));
        assert_eq!(img.dimensions(), (2, 2));
        assert!(img.pixels().all(|p| *p == BLUE));
    }

    #[test]
    fn test_compose_applies_offset_and_clips() {
        let img = compose_frame(&two_tone(), &entry(0, 0.0, 2.0, 1, -1), (2, 2));
        // Shifted right by one and up by one: only (1, 0) keeps red
        assert_eq!(*img.get_pixel(0, 0), TRANSPARENT);
        assert_eq!(*img.get_pixel(1, 0), RED);
        assert_eq!(*img.get_pixel(1, 1), TRANSPARENT);
    }

    #[test]
    fn test_compose_offset_past_cell_is_blank() {
        let img = compose_frame(&two_tone(), &entry(0, 0.0, 2.0, 10, 0), (2, 2));
        assert!(img.pixels().all(|p| *p == TRANSPARENT));
    }

    #[test]
    fn test_cell_size_is_largest_frame() {
        let entries = [entry(0, 0.0, 1.0, 0, 0), entry(1, 1.0, 3.0, 0, 0)];
        assert_eq!(cell_size(&entries), (3, 2));
        assert_eq!(cell_size(&[]), (1, 1));
    }

    #[test]
    fn test_compose_sequence_keeps_order() {
        let entries = [entry(1, 2.0, 2.0, 0, 0), entry(0, 0.0, 2.0, 0, 0)];
        let frames = compose_sequence(&two_tone(), &entries);
        assert_eq!(frames.len(), 2);
        assert_eq!(*frames[0].get_pixel(0, 0), BLUE);
        assert_eq!(*frames[1].get_pixel(0, 0), RED);
    }
}
