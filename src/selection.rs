//! Pointer interaction - divider hover/drag and click/marquee frame selection
//!
//! The engine is a small state machine driven by pointer down/move/up/leave
//! events in canvas pixel space. A press on a hovered divider drags it;
//! anywhere else it starts a marquee. Releasing a marquee that barely moved
//! counts as a click.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::dividers::{Axis, DividerModel, DividerTarget, DEFAULT_HIT_TOLERANCE};
use crate::frames::{Frame, OffsetAxis};
use crate::geometry::{Point, Rect};

/// Marquees shorter than this (in canvas pixels) are treated as clicks.
pub const DEFAULT_CLICK_THRESHOLD: f64 = 5.0;

/// What the pointer is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PointerMode {
    #[default]
    Idle,
    Dragging(DividerTarget),
    Selecting { start: Point, current: Point },
}

/// Observable result of a pointer event, so the owner knows what to refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEffect {
    /// Nothing changed
    Ignored,
    HoverChanged,
    DragStarted,
    /// A divider moved; frames must be re-derived
    DividerMoved,
    DragEnded,
    MarqueeChanged,
    SelectionChanged,
    /// An in-progress gesture was abandoned
    Cancelled,
}

/// Cursor affordance for the host to display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CursorHint {
    Default,
    /// Over or dragging a vertical divider
    ColumnResize,
    /// Over or dragging a horizontal divider
    RowResize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionEngine {
    selected: BTreeSet<usize>,
    hover: DividerTarget,
    mode: PointerMode,
    hit_tolerance: f64,
    click_threshold: f64,
}

impl Default for SelectionEngine {
    fn default() -> Self {
        Self::new(DEFAULT_HIT_TOLERANCE, DEFAULT_CLICK_THRESHOLD)
    }
}

impl SelectionEngine {
    pub fn new(hit_tolerance: f64, click_threshold: f64) -> Self {
        Self {
            selected: BTreeSet::new(),
            hover: DividerTarget::None,
            mode: PointerMode::Idle,
            hit_tolerance,
            click_threshold,
        }
    }

    pub fn selected(&self) -> &BTreeSet<usize> {
        &self.selected
    }

    pub fn is_selected(&self, id: usize) -> bool {
        self.selected.contains(&id)
    }

    /// Replace the selection outright.
    pub fn select(&mut self, ids: impl IntoIterator<Item = usize>) {
        self.selected = ids.into_iter().collect();
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    pub fn hover(&self) -> DividerTarget {
        self.hover
    }

    pub fn mode(&self) -> PointerMode {
        self.mode
    }

    /// The in-progress marquee, normalized, if one is being drawn.
    pub fn marquee(&self) -> Option<Rect> {
        match self.mode {
            PointerMode::Selecting { start, current } => Some(Rect::from_corners(start, current)),
            _ => None,
        }
    }

    /// Dragged divider if any, else the hovered one.
    pub fn cursor(&self) -> CursorHint {
        let target = match self.mode {
            PointerMode::Dragging(target) => target,
            _ => self.hover,
        };
        match target {
            DividerTarget::None => CursorHint::Default,
            DividerTarget::Vertical(_) => CursorHint::ColumnResize,
            DividerTarget::Horizontal(_) => CursorHint::RowResize,
        }
    }

    /// Drop hover and any gesture in progress, e.g. after the grid was
    /// replaced underneath the pointer.
    pub fn reset_pointer(&mut self) {
        self.hover = DividerTarget::None;
        self.mode = PointerMode::Idle;
    }

    pub fn pointer_down(&mut self, pos: Point, dividers: &mut DividerModel) -> PointerEffect {
        if !self.hover.is_none() && dividers.begin_drag(self.hover) {
            self.mode = PointerMode::Dragging(self.hover);
            return PointerEffect::DragStarted;
        }
        self.mode = PointerMode::Selecting { start: pos, current: pos };
        PointerEffect::MarqueeChanged
    }

    /// `width`/`height` are the image dimensions, used to normalize drags and
    /// to place dividers for hit-testing.
    pub fn pointer_move(&mut self, pos: Point, dividers: &mut DividerModel, width: f64, height: f64) -> PointerEffect {
        match self.mode {
            PointerMode::Dragging(target) => {
                let proposed = match target.parts() {
                    Some((Axis::Vertical, _)) if width > 0.0 => pos.x / width,
                    Some((Axis::Horizontal, _)) if height > 0.0 => pos.y / height,
                    _ => return PointerEffect::Ignored,
                };
                match dividers.update_drag(target, proposed) {
                    Some(_) => PointerEffect::DividerMoved,
                    None => PointerEffect::Ignored,
                }
            }
            PointerMode::Selecting { start, .. } => {
                self.mode = PointerMode::Selecting { start, current: pos };
                PointerEffect::MarqueeChanged
            }
            PointerMode::Idle => {
                let hover = dividers.hit_test(pos, width, height, self.hit_tolerance);
                if hover == self.hover {
                    PointerEffect::Ignored
                } else {
                    self.hover = hover;
                    PointerEffect::HoverChanged
                }
            }
        }
    }

    pub fn pointer_up(&mut self, pos: Point, dividers: &mut DividerModel, frames: &[Frame]) -> PointerEffect {
        match std::mem::take(&mut self.mode) {
            PointerMode::Dragging(_) => {
                dividers.end_drag();
                PointerEffect::DragEnded
            }
            PointerMode::Selecting { start, .. } => {
                self.selected = if start.distance(pos) < self.click_threshold {
                    pick_frame(frames, pos).into_iter().collect()
                } else {
                    marquee_select(frames, start, pos)
                };
                tracing::debug!(selected = ?self.selected, "selection updated");
                PointerEffect::SelectionChanged
            }
            PointerMode::Idle => PointerEffect::Ignored,
        }
    }

    /// The pointer left the canvas: drop hover, finish a drag, abandon a marquee.
    pub fn pointer_leave(&mut self, dividers: &mut DividerModel) -> PointerEffect {
        let had_hover = !self.hover.is_none();
        self.hover = DividerTarget::None;
        match std::mem::take(&mut self.mode) {
            PointerMode::Dragging(_) => {
                dividers.end_drag();
                PointerEffect::DragEnded
            }
            PointerMode::Selecting { .. } => PointerEffect::Cancelled,
            PointerMode::Idle if had_hover => PointerEffect::HoverChanged,
            PointerMode::Idle => PointerEffect::Ignored,
        }
    }

    /// Set `active` on every selected frame. Returns whether anything was selected.
    pub fn set_active(&self, frames: &mut [Frame], active: bool) -> bool {
        self.for_each_selected(frames, |f| f.active = active)
    }

    /// Add `delta` to the chosen offset of every selected frame.
    pub fn adjust_offset(&self, frames: &mut [Frame], axis: OffsetAxis, delta: i32) -> bool {
        self.for_each_selected(frames, |f| f.nudge(axis, delta))
    }

    fn for_each_selected(&self, frames: &mut [Frame], mut apply: impl FnMut(&mut Frame)) -> bool {
        if self.selected.is_empty() {
            return false;
        }
        for frame in frames.iter_mut().filter(|f| self.selected.contains(&f.id)) {
            apply(frame);
        }
        true
    }
}

/// First frame, in raster order, whose rectangle contains `point`.
pub fn pick_frame(frames: &[Frame], point: Point) -> Option<usize> {
    frames.iter().find(|f| f.rect.contains(point)).map(|f| f.id)
}

/// All frames overlapping the marquee spanned by corners `a` and `b`.
pub fn marquee_select(frames: &[Frame], a: Point, b: Point) -> BTreeSet<usize> {
    let marquee = Rect::from_corners(a, b);
    frames
        .iter()
        .filter(|f| f.rect.intersects(&marquee))
        .map(|f| f.id)
        .collect()
}
