//! Sprite sheet export - packs the composed sequence back into one image

use image::{imageops, Rgba, RgbaImage};

/// Transparent color used for padding
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Lay out `frames` left to right, top to bottom, `cols` per row (all in one
/// row when `None`). Every cell takes the size of the largest frame.
///
/// ```
/// use image::RgbaImage;
/// use gridslice::spritesheet::render_spritesheet;
///
/// let frames = vec![RgbaImage::new(2, 2); 3];
/// let sheet = render_spritesheet(&frames, Some(2));
/// assert_eq!(sheet.dimensions(), (4, 4));
/// ```
pub fn render_spritesheet(frames: &[RgbaImage], cols: Option<u32>) -> RgbaImage {
    if frames.is_empty() {
        return RgbaImage::from_pixel(1, 1, TRANSPARENT);
    }

    let cell_w = frames.iter().map(|f| f.width()).max().unwrap_or(1);
    let cell_h = frames.iter().map(|f| f.height()).max().unwrap_or(1);

    let count = frames.len() as u32;
    let columns = cols.unwrap_or(count).clamp(1, count);
    let rows = count.div_ceil(columns);

    let mut sheet = RgbaImage::from_pixel(columns * cell_w, rows * cell_h, TRANSPARENT);
    for (i, frame) in frames.iter().enumerate() {
        let i = i as u32;
        let x = (i % columns) * cell_w;
        let y = (i / columns) * cell_h;
        imageops::replace(&mut sheet, frame, i64::from(x), i64::from(y));
    }
    sheet
}
