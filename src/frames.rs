//! Frame derivation - turns dividers and image dimensions into grid cells
//!
//! Frames are produced in raster order (row-major). Their `id` is the raster
//! index and changes whenever the grid is rebuilt; `(row, col)` is the stable
//! key used to carry per-cell edits across rebuilds.

use serde::Serialize;
use std::collections::HashMap;

use crate::dividers::DividerModel;
use crate::geometry::Rect;

/// Which component of a frame's destination offset to change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetAxis {
    X,
    Y,
}

/// One grid cell of the source image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// Raster-scan index, reassigned on every rebuild
    pub id: usize,
    pub row: usize,
    pub col: usize,
    /// Source rectangle in image pixel space
    pub rect: Rect,
    /// Destination nudge applied when the frame is composed
    pub offset_x: i32,
    pub offset_y: i32,
    /// Inactive frames are left out of playback and export
    pub active: bool,
    /// Rank among active frames for playback and export
    pub sequence_order: usize,
}

impl Frame {
    fn fresh(id: usize, row: usize, col: usize, rect: Rect) -> Self {
        Self {
            id,
            row,
            col,
            rect,
            offset_x: 0,
            offset_y: 0,
            active: true,
            sequence_order: id,
        }
    }

    /// Add `delta` pixels to the offset along `axis`.
    pub fn nudge(&mut self, axis: OffsetAxis, delta: i32) {
        match axis {
            OffsetAxis::X => self.offset_x = self.offset_x.saturating_add(delta),
            OffsetAxis::Y => self.offset_y = self.offset_y.saturating_add(delta),
        }
    }
}

/// Per-cell attributes that survive a rebuild
#[derive(Debug, Clone, Copy)]
struct Carried {
    offset_x: i32,
    offset_y: i32,
    active: bool,
    sequence_order: usize,
}

/// Derive the raster-ordered frame list for an image of `width` x `height`
/// pixels, carrying `offset`, `active` and `sequence_order` forward from
/// `previous` for every `(row, col)` that existed before.
pub fn derive_frames(dividers: &DividerModel, width: u32, height: u32, previous: &[Frame]) -> Vec<Frame> {
    let xs = dividers.x_points();
    let ys = dividers.y_points();
    let w = f64::from(width);
    let h = f64::from(height);

    let carried: HashMap<(usize, usize), Carried> = previous
        .iter()
        .map(|f| {
            (
                (f.row, f.col),
                Carried {
                    offset_x: f.offset_x,
                    offset_y: f.offset_y,
                    active: f.active,
                    sequence_order: f.sequence_order,
                },
            )
        })
        .collect();

    let mut frames = Vec::with_capacity((xs.len() - 1) * (ys.len() - 1));
    for (row, y) in ys.windows(2).enumerate() {
        for (col, x) in xs.windows(2).enumerate() {
            let id = frames.len();
            let rect = Rect::new(x[0] * w, y[0] * h, (x[1] - x[0]) * w, (y[1] - y[0]) * h);
            let mut frame = Frame::fresh(id, row, col, rect);
            if let Some(c) = carried.get(&(row, col)) {
                frame.offset_x = c.offset_x;
                frame.offset_y = c.offset_y;
                frame.active = c.active;
                frame.sequence_order = c.sequence_order;
            }
            frames.push(frame);
        }
    }

    tracing::debug!(
        rows = ys.len() - 1,
        cols = xs.len() - 1,
        carried = carried.len(),
        "derived frames"
    );
    frames
}
