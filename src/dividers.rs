//! Grid dividers - movable normalized grid lines that partition the source image
//!
//! Each axis holds a strictly increasing list of positions in `(0, 1)`. Adjacent
//! positions, and the implicit `0`/`1` boundaries, never come closer than
//! [`MIN_GAP`].

use serde::Serialize;
use thiserror::Error;

use crate::geometry::Point;

/// Minimum separation between adjacent dividers (normalized units).
pub const MIN_GAP: f64 = 0.01;

/// Largest supported row or column count.
pub const MAX_CELLS: u32 = 20;

/// Pointer distance, in canvas pixels, within which a divider counts as hit.
pub const DEFAULT_HIT_TOLERANCE: f64 = 12.0;

/// Direction a divider runs in.
///
/// Vertical dividers split columns and move along x; horizontal dividers split
/// rows and move along y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Vertical,
    Horizontal,
}

/// A hover or drag target: no divider, or one divider on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "axis", content = "index", rename_all = "lowercase")]
pub enum DividerTarget {
    #[default]
    None,
    Vertical(usize),
    Horizontal(usize),
}

impl DividerTarget {
    pub fn new(axis: Axis, index: usize) -> Self {
        match axis {
            Axis::Vertical => Self::Vertical(index),
            Axis::Horizontal => Self::Horizontal(index),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Axis and index, or `None` for the empty target.
    pub fn parts(&self) -> Option<(Axis, usize)> {
        match *self {
            Self::None => None,
            Self::Vertical(i) => Some((Axis::Vertical, i)),
            Self::Horizontal(i) => Some((Axis::Horizontal, i)),
        }
    }
}

/// Error for explicit divider positions that break the spacing invariant
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DividerError {
    #[error("{axis:?} divider {index} at {position} is outside (0, 1)")]
    OutOfRange { axis: Axis, index: usize, position: f64 },
    #[error("{axis:?} divider {index} is closer than {} to its neighbor", MIN_GAP)]
    TooClose { axis: Axis, index: usize },
    #[error("{axis:?} axis has {count} dividers, at most {} allowed", MAX_CELLS - 1)]
    TooMany { axis: Axis, count: usize },
}

/// Clamp a requested row or column count into `1..=MAX_CELLS`.
pub fn clamp_cells(n: u32) -> u32 {
    n.clamp(1, MAX_CELLS)
}

fn evenly_spaced(cells: u32) -> Vec<f64> {
    (1..cells).map(|i| f64::from(i) / f64::from(cells)).collect()
}

/// The divider model: both axes plus the divider currently being dragged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DividerModel {
    vertical: Vec<f64>,
    horizontal: Vec<f64>,
    #[serde(skip)]
    drag: DividerTarget,
}

impl Default for DividerModel {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl DividerModel {
    /// Evenly spaced dividers for `rows` x `cols` cells (each clamped to `1..=20`).
    pub fn new(rows: u32, cols: u32) -> Self {
        let mut model = Self {
            vertical: Vec::new(),
            horizontal: Vec::new(),
            drag: DividerTarget::None,
        };
        model.resize(rows, cols);
        model
    }

    /// Install explicit positions, rejecting any that violate the spacing invariant.
    pub fn from_positions(vertical: Vec<f64>, horizontal: Vec<f64>) -> Result<Self, DividerError> {
        validate_axis(Axis::Vertical, &vertical)?;
        validate_axis(Axis::Horizontal, &horizontal)?;
        Ok(Self {
            vertical,
            horizontal,
            drag: DividerTarget::None,
        })
    }

    /// Rebuild both axes as evenly spaced dividers. Clears any drag in progress.
    pub fn resize(&mut self, rows: u32, cols: u32) {
        self.vertical = evenly_spaced(clamp_cells(cols));
        self.horizontal = evenly_spaced(clamp_cells(rows));
        self.drag = DividerTarget::None;
    }

    pub fn vertical(&self) -> &[f64] {
        &self.vertical
    }

    pub fn horizontal(&self) -> &[f64] {
        &self.horizontal
    }

    pub fn axis(&self, axis: Axis) -> &[f64] {
        match axis {
            Axis::Vertical => &self.vertical,
            Axis::Horizontal => &self.horizontal,
        }
    }

    pub fn rows(&self) -> usize {
        self.horizontal.len() + 1
    }

    pub fn cols(&self) -> usize {
        self.vertical.len() + 1
    }

    /// Column breakpoints including the implicit 0 and 1 boundaries.
    pub fn x_points(&self) -> Vec<f64> {
        with_bounds(&self.vertical)
    }

    /// Row breakpoints including the implicit 0 and 1 boundaries.
    pub fn y_points(&self) -> Vec<f64> {
        with_bounds(&self.horizontal)
    }

    pub fn drag_target(&self) -> DividerTarget {
        self.drag
    }

    /// Start dragging a divider. Returns `false` (and changes nothing) if no
    /// divider exists at the target.
    pub fn begin_drag(&mut self, target: DividerTarget) -> bool {
        let Some((axis, index)) = target.parts() else {
            return false;
        };
        if index >= self.axis(axis).len() {
            return false;
        }
        self.drag = target;
        true
    }

    /// Move a divider to `proposed`, clamped to stay at least [`MIN_GAP`] away
    /// from its neighbors (or the 0/1 boundary). Returns the position written,
    /// or `None` when no divider exists at the target.
    pub fn update_drag(&mut self, target: DividerTarget, proposed: f64) -> Option<f64> {
        let (axis, index) = target.parts()?;
        let positions = match axis {
            Axis::Vertical => &mut self.vertical,
            Axis::Horizontal => &mut self.horizontal,
        };
        if index >= positions.len() {
            return None;
        }

        let prev = if index == 0 { 0.0 } else { positions[index - 1] };
        let next = positions.get(index + 1).copied().unwrap_or(1.0);
        let lo = prev + MIN_GAP;
        let hi = next - MIN_GAP;

        // NaN input keeps the divider where it is
        let clamped = if proposed.is_nan() {
            positions[index]
        } else {
            proposed.max(lo).min(hi)
        };
        positions[index] = clamped;
        tracing::debug!(?axis, index, proposed, clamped, "divider moved");
        Some(clamped)
    }

    pub fn end_drag(&mut self) {
        self.drag = DividerTarget::None;
    }

    /// Find the divider under `point` for an image of `width` x `height`
    /// pixels. Vertical dividers are checked before horizontal ones, each in
    /// index order; the first within `tolerance` pixels wins.
    pub fn hit_test(&self, point: Point, width: f64, height: f64, tolerance: f64) -> DividerTarget {
        if let Some(i) = self
            .vertical
            .iter()
            .position(|&p| (p * width - point.x).abs() <= tolerance)
        {
            return DividerTarget::Vertical(i);
        }
        if let Some(i) = self
            .horizontal
            .iter()
            .position(|&p| (p * height - point.y).abs() <= tolerance)
        {
            return DividerTarget::Horizontal(i);
        }
        DividerTarget::None
    }
}

fn with_bounds(positions: &[f64]) -> Vec<f64> {
    let mut points = Vec::with_capacity(positions.len() + 2);
    points.push(0.0);
    points.extend_from_slice(positions);
    points.push(1.0);
    points
}

fn validate_axis(axis: Axis, positions: &[f64]) -> Result<(), DividerError> {
    if positions.len() > (MAX_CELLS - 1) as usize {
        return Err(DividerError::TooMany {
            axis,
            count: positions.len(),
        });
    }
    let mut prev = 0.0;
    for (index, &position) in positions.iter().enumerate() {
        if !(position > 0.0 && position < 1.0) {
            return Err(DividerError::OutOfRange { axis, index, position });
        }
        if position - prev < MIN_GAP {
            return Err(DividerError::TooClose { axis, index });
        }
        prev = position;
    }
    if 1.0 - prev < MIN_GAP {
        return Err(DividerError::TooClose {
            axis,
            index: positions.len().saturating_sub(1),
        });
    }
    Ok(())
}
