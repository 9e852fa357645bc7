//! The slicing session - one mutable model behind every command
//!
//! [`Slicer`] owns the dividers, the derived frames, the pointer/selection
//! state, the preview scheduler and the source image. Hosts feed it pointer
//! events and control changes, then read projections (`overlay`,
//! `playback`, `cursor`) to draw. Projections never mutate; every command
//! that changes what is drawn raises the redraw flag, which the host drains
//! with [`Slicer::take_redraw`] at most once per refresh.

use image::RgbaImage;
use serde::Serialize;
use std::collections::BTreeSet;
use std::time::Duration;

use crate::config::GridsliceConfig;
use crate::dividers::{DividerError, DividerModel, DividerTarget};
use crate::frames::{derive_frames, Frame, OffsetAxis};
use crate::geometry::{Point, Rect};
use crate::preview::PreviewScheduler;
use crate::selection::{CursorHint, PointerEffect, SelectionEngine};
use crate::sequence::{self, Direction, PlaybackEntry};

/// Per-frame data for drawing the grid overlay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameOverlay {
    pub id: usize,
    pub row: usize,
    pub col: usize,
    pub rect: Rect,
    pub active: bool,
    pub selected: bool,
    /// 1-based position in playback order; `None` for inactive frames
    pub badge: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct Slicer {
    dividers: DividerModel,
    frames: Vec<Frame>,
    selection: SelectionEngine,
    preview: PreviewScheduler,
    source: Option<RgbaImage>,
    redraw: bool,
}

impl Default for Slicer {
    fn default() -> Self {
        Self::from_config(&GridsliceConfig::default()).unwrap_or_else(|_| Self::new(4, 4))
    }
}

impl Slicer {
    /// A session with evenly spaced `rows` x `cols` dividers and no image yet.
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            dividers: DividerModel::new(rows, cols),
            frames: Vec::new(),
            selection: SelectionEngine::default(),
            preview: PreviewScheduler::default(),
            source: None,
            redraw: true,
        }
    }

    /// A session set up from configuration.
    pub fn from_config(config: &GridsliceConfig) -> Result<Self, DividerError> {
        let mut preview = PreviewScheduler::new(config.preview.fps);
        preview.set_playing(config.preview.playing);
        Ok(Self {
            dividers: config.divider_model()?,
            frames: Vec::new(),
            selection: SelectionEngine::new(
                config.interaction.hit_tolerance,
                config.interaction.click_threshold,
            ),
            preview,
            source: None,
            redraw: true,
        })
    }

    // ------------------------------------------------------------------
    // Source image
    // ------------------------------------------------------------------

    /// Install a decoded source image and re-derive frames. The most recently
    /// installed image always wins.
    pub fn set_source(&mut self, image: RgbaImage) {
        tracing::debug!(width = image.width(), height = image.height(), "source image ready");
        self.source = Some(image);
        self.rebuild();
    }

    /// Record a failed load. The session stays (or becomes) not ready.
    pub fn source_failed(&mut self, error: &dyn std::error::Error) {
        tracing::warn!(%error, "source image failed to load");
        self.source = None;
        self.redraw = true;
    }

    pub fn is_ready(&self) -> bool {
        self.source.is_some()
    }

    pub fn source(&self) -> Option<&RgbaImage> {
        self.source.as_ref()
    }

    /// Image dimensions as floats, or `None` while not ready.
    fn size(&self) -> Option<(f64, f64)> {
        self.source
            .as_ref()
            .map(|img| (f64::from(img.width()), f64::from(img.height())))
    }

    // ------------------------------------------------------------------
    // Grid
    // ------------------------------------------------------------------

    /// Rebuild evenly spaced dividers for `rows` x `cols` (clamped to 1-20).
    pub fn resize(&mut self, rows: u32, cols: u32) {
        self.dividers.resize(rows, cols);
        self.selection.reset_pointer();
        self.rebuild();
    }

    /// Install explicit divider positions.
    pub fn set_dividers(&mut self, vertical: Vec<f64>, horizontal: Vec<f64>) -> Result<(), DividerError> {
        self.dividers = DividerModel::from_positions(vertical, horizontal)?;
        self.selection.reset_pointer();
        self.rebuild();
        Ok(())
    }

    pub fn begin_drag(&mut self, target: DividerTarget) -> bool {
        self.dividers.begin_drag(target)
    }

    /// Move a divider directly (normalized position), clamped to its neighbors.
    pub fn update_drag(&mut self, target: DividerTarget, position: f64) -> Option<f64> {
        let written = self.dividers.update_drag(target, position);
        if written.is_some() {
            self.rebuild();
        }
        written
    }

    pub fn end_drag(&mut self) {
        self.dividers.end_drag();
    }

    /// Re-derive frames from the current dividers and image. No-op while the
    /// image is not ready. Frame ids change, so the selection is cleared.
    fn rebuild(&mut self) {
        self.redraw = true;
        let Some(image) = &self.source else {
            return;
        };
        self.frames = derive_frames(&self.dividers, image.width(), image.height(), &self.frames);
        self.selection.clear_selection();
        self.sequence_changed();
    }

    fn sequence_changed(&mut self) {
        let len = sequence::playback_order(&self.frames).len();
        self.preview.sequence_changed(len);
    }

    // ------------------------------------------------------------------
    // Pointer input (canvas pixel space)
    // ------------------------------------------------------------------

    pub fn pointer_down(&mut self, pos: Point) -> PointerEffect {
        if !self.is_ready() {
            return PointerEffect::Ignored;
        }
        let effect = self.selection.pointer_down(pos, &mut self.dividers);
        self.after_pointer(effect)
    }

    pub fn pointer_move(&mut self, pos: Point) -> PointerEffect {
        let Some((w, h)) = self.size() else {
            return PointerEffect::Ignored;
        };
        let effect = self.selection.pointer_move(pos, &mut self.dividers, w, h);
        self.after_pointer(effect)
    }

    pub fn pointer_up(&mut self, pos: Point) -> PointerEffect {
        if !self.is_ready() {
            return PointerEffect::Ignored;
        }
        let effect = self.selection.pointer_up(pos, &mut self.dividers, &self.frames);
        self.after_pointer(effect)
    }

    pub fn pointer_leave(&mut self) -> PointerEffect {
        let effect = self.selection.pointer_leave(&mut self.dividers);
        self.after_pointer(effect)
    }

    fn after_pointer(&mut self, effect: PointerEffect) -> PointerEffect {
        match effect {
            PointerEffect::Ignored => {}
            PointerEffect::DividerMoved => self.rebuild(),
            _ => self.redraw = true,
        }
        effect
    }

    // ------------------------------------------------------------------
    // Selection and batch edits
    // ------------------------------------------------------------------

    /// Replace the selection; ids that match no frame are dropped.
    pub fn select(&mut self, ids: impl IntoIterator<Item = usize>) {
        let count = self.frames.len();
        self.selection.select(ids.into_iter().filter(|&id| id < count));
        self.redraw = true;
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear_selection();
        self.redraw = true;
    }

    pub fn selected(&self) -> &BTreeSet<usize> {
        self.selection.selected()
    }

    /// Include or exclude every selected frame.
    pub fn set_active(&mut self, active: bool) -> bool {
        let changed = self.selection.set_active(&mut self.frames, active);
        if changed {
            self.sequence_changed();
            self.redraw = true;
        }
        changed
    }

    /// Nudge every selected frame's destination offset.
    pub fn adjust_offset(&mut self, axis: OffsetAxis, delta: i32) -> bool {
        let changed = self.selection.adjust_offset(&mut self.frames, axis, delta);
        self.redraw |= changed;
        changed
    }

    /// Move the single selected frame one step in playback order.
    pub fn move_in_sequence(&mut self, direction: Direction) -> bool {
        let moved = sequence::move_in_sequence(&mut self.frames, self.selection.selected(), direction);
        if moved {
            self.sequence_changed();
            self.redraw = true;
        }
        moved
    }

    /// Play the listed frames first, in the order given.
    pub fn promote(&mut self, ids: &[usize]) -> bool {
        let moved = sequence::promote(&mut self.frames, ids);
        if moved {
            self.sequence_changed();
            self.redraw = true;
        }
        moved
    }

    // ------------------------------------------------------------------
    // Preview
    // ------------------------------------------------------------------

    pub fn is_playing(&self) -> bool {
        self.preview.is_playing()
    }

    pub fn toggle_playing(&mut self) -> bool {
        self.redraw = true;
        self.preview.toggle()
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.preview.set_playing(playing);
        self.redraw = true;
    }

    pub fn fps(&self) -> u32 {
        self.preview.fps()
    }

    pub fn set_fps(&mut self, fps: u32) {
        self.preview.set_fps(fps);
    }

    /// Time between preview ticks.
    pub fn preview_period(&self) -> Duration {
        self.preview.period()
    }

    /// One timer tick. Returns the new preview index if it advanced.
    pub fn tick_preview(&mut self) -> Option<usize> {
        let len = self.playback_len();
        let index = self.preview.tick(len);
        self.redraw |= index.is_some();
        index
    }

    /// Feed elapsed wall time to the preview. Returns how many ticks fired.
    pub fn advance_preview(&mut self, elapsed: Duration) -> u32 {
        let len = self.playback_len();
        let fired = self.preview.advance(elapsed, len);
        self.redraw |= fired > 0;
        fired
    }

    /// Current position in the playback sequence.
    pub fn preview_index(&self) -> Option<usize> {
        self.preview.current(self.playback_len())
    }

    /// The playback entry the preview is showing.
    pub fn preview_entry(&self) -> Option<PlaybackEntry> {
        let playback = self.playback();
        self.preview.current(playback.len()).map(|i| playback[i])
    }

    // ------------------------------------------------------------------
    // Projections
    // ------------------------------------------------------------------

    /// Whether anything changed since the last call. Clears the flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    pub fn dividers(&self) -> &DividerModel {
        &self.dividers
    }

    /// Raster-ordered frames.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn hover(&self) -> DividerTarget {
        self.selection.hover()
    }

    pub fn drag_target(&self) -> DividerTarget {
        self.dividers.drag_target()
    }

    pub fn marquee(&self) -> Option<Rect> {
        self.selection.marquee()
    }

    pub fn cursor(&self) -> CursorHint {
        self.selection.cursor()
    }

    /// Frames with selection membership and sequence badges, in raster order.
    /// Empty while the image is not ready.
    pub fn overlay(&self) -> Vec<FrameOverlay> {
        if !self.is_ready() {
            return Vec::new();
        }
        let badges = sequence::sequence_badges(&self.frames);
        self.frames
            .iter()
            .map(|f| FrameOverlay {
                id: f.id,
                row: f.row,
                col: f.col,
                rect: f.rect,
                active: f.active,
                selected: self.selection.is_selected(f.id),
                badge: badges.get(&f.id).copied(),
            })
            .collect()
    }

    /// Active frames in playback order. Empty while the image is not ready.
    pub fn playback(&self) -> Vec<PlaybackEntry> {
        if !self.is_ready() {
            return Vec::new();
        }
        sequence::playback_entries(&self.frames)
    }

    fn playback_len(&self) -> usize {
        if !self.is_ready() {
            return 0;
        }
        self.frames.iter().filter(|f| f.active).count()
    }
}
