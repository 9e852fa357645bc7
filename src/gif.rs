//! Animated GIF export

use crate::output::{ensure_parent, ExportError};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Per-frame delay in milliseconds for `fps`, rounded down to GIF's
/// centisecond resolution (at least 1cs).
pub fn frame_delay_ms(fps: u32) -> u32 {
    let ms = 1000 / fps.max(1);
    (ms / 10).max(1) * 10
}

/// Encode `frames` as an animated GIF at `fps` frames per second.
///
/// An empty frame list writes nothing.
pub fn render_gif(frames: &[RgbaImage], fps: u32, loop_anim: bool, path: &Path) -> Result<(), ExportError> {
    if frames.is_empty() {
        return Ok(());
    }

    ensure_parent(path)?;
    let writer = BufWriter::new(File::create(path)?);
    let mut encoder = GifEncoder::new(writer);

    let repeat = if loop_anim {
        Repeat::Infinite
    } else {
        Repeat::Finite(0)
    };
    encoder.set_repeat(repeat)?;

    let delay = Delay::from_numer_denom_ms(frame_delay_ms(fps), 1);
    for image in frames {
        encoder.encode_frame(Frame::from_parts(image.clone(), 0, 0, delay))?;
    }

    Ok(())
}
