//! WASM API module for browser/JS interop
//!
//! Wraps a [`Slicer`] session for a canvas host. Pointer positions are in
//! displayed-canvas pixels and are mapped to image pixels through the
//! viewport set with [`WasmSlicer::set_viewport`]. Projections are flat
//! numeric arrays so the host can draw without deserializing.

use wasm_bindgen::prelude::*;

use crate::frames::OffsetAxis;
use crate::geometry::{Point, Viewport};
use crate::render::{cell_size, compose_frame};
use crate::selection::CursorHint;
use crate::sequence::Direction;
use crate::slicer::Slicer;
use crate::source::{decode_image, from_rgba};

/// Values per frame in [`WasmSlicer::overlay`]
pub const OVERLAY_STRIDE: usize = 7;
/// Values per entry in [`WasmSlicer::playback`]
pub const PLAYBACK_STRIDE: usize = 7;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// A composed preview frame as RGBA pixels.
#[wasm_bindgen]
pub struct FrameImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl FrameImage {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA pixel data (4 bytes per pixel)
    #[wasm_bindgen(getter)]
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

#[wasm_bindgen]
pub struct WasmSlicer {
    inner: Slicer,
    display: (f64, f64),
}

impl Default for WasmSlicer {
    fn default() -> Self {
        Self::new(4, 4)
    }
}

fn cursor_css(hint: CursorHint) -> &'static str {
    match hint {
        CursorHint::Default => "default",
        CursorHint::ColumnResize => "col-resize",
        CursorHint::RowResize => "row-resize",
    }
}

impl WasmSlicer {
    fn to_canvas(&self, x: f64, y: f64) -> Point {
        let (cw, ch) = self
            .inner
            .source()
            .map(|img| (f64::from(img.width()), f64::from(img.height())))
            .unwrap_or((0.0, 0.0));
        Viewport::new(self.display.0, self.display.1, cw, ch).to_canvas(Point::new(x, y))
    }
}

fn flag(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

#[wasm_bindgen]
impl WasmSlicer {
    #[wasm_bindgen(constructor)]
    pub fn new(rows: u32, cols: u32) -> WasmSlicer {
        WasmSlicer {
            inner: Slicer::new(rows, cols),
            display: (0.0, 0.0),
        }
    }

    /// Install raw RGBA pixels as the source image.
    pub fn load_rgba(&mut self, width: u32, height: u32, pixels: Vec<u8>) -> Result<(), JsValue> {
        match from_rgba(width, height, pixels) {
            Ok(image) => {
                self.inner.set_source(image);
                Ok(())
            }
            Err(e) => {
                self.inner.source_failed(&e);
                Err(JsValue::from_str(&e.to_string()))
            }
        }
    }

    /// Decode an encoded image (PNG, GIF, ...) and install it.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        match decode_image(bytes) {
            Ok(image) => {
                self.inner.set_source(image);
                Ok(())
            }
            Err(e) => {
                self.inner.source_failed(&e);
                Err(JsValue::from_str(&e.to_string()))
            }
        }
    }

    #[wasm_bindgen(getter)]
    pub fn ready(&self) -> bool {
        self.inner.is_ready()
    }

    /// Size the canvas is displayed at, in CSS pixels. Zero maps 1:1.
    pub fn set_viewport(&mut self, display_width: f64, display_height: f64) {
        self.display = (display_width, display_height);
    }

    pub fn resize(&mut self, rows: u32, cols: u32) {
        self.inner.resize(rows, cols);
    }

    #[wasm_bindgen(getter)]
    pub fn rows(&self) -> usize {
        self.inner.dividers().rows()
    }

    #[wasm_bindgen(getter)]
    pub fn cols(&self) -> usize {
        self.inner.dividers().cols()
    }

    /// Normalized vertical divider positions.
    pub fn vertical(&self) -> Vec<f64> {
        self.inner.dividers().vertical().to_vec()
    }

    /// Normalized horizontal divider positions.
    pub fn horizontal(&self) -> Vec<f64> {
        self.inner.dividers().horizontal().to_vec()
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        let p = self.to_canvas(x, y);
        self.inner.pointer_down(p);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let p = self.to_canvas(x, y);
        self.inner.pointer_move(p);
    }

    pub fn pointer_up(&mut self, x: f64, y: f64) {
        let p = self.to_canvas(x, y);
        self.inner.pointer_up(p);
    }

    pub fn pointer_leave(&mut self) {
        self.inner.pointer_leave();
    }

    /// CSS cursor name for the current hover/drag state.
    pub fn cursor(&self) -> String {
        cursor_css(self.inner.cursor()).to_string()
    }

    pub fn select(&mut self, ids: Vec<u32>) {
        self.inner.select(ids.into_iter().map(|id| id as usize));
    }

    pub fn clear_selection(&mut self) {
        self.inner.clear_selection();
    }

    pub fn selected(&self) -> Vec<u32> {
        self.inner.selected().iter().map(|&id| id as u32).collect()
    }

    pub fn include_selected(&mut self) -> bool {
        self.inner.set_active(true)
    }

    pub fn exclude_selected(&mut self) -> bool {
        self.inner.set_active(false)
    }

    /// Nudge the selected frames' offsets.
    pub fn nudge(&mut self, dx: i32, dy: i32) -> bool {
        let x = dx != 0 && self.inner.adjust_offset(OffsetAxis::X, dx);
        let y = dy != 0 && self.inner.adjust_offset(OffsetAxis::Y, dy);
        x || y
    }

    /// Move the single selected frame by `step` (-1 or +1) in playback order.
    pub fn move_selected(&mut self, step: i32) -> bool {
        match Direction::from_step(step) {
            Some(direction) => self.inner.move_in_sequence(direction),
            None => false,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn playing(&self) -> bool {
        self.inner.is_playing()
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.inner.set_playing(playing);
    }

    pub fn toggle_playing(&mut self) -> bool {
        self.inner.toggle_playing()
    }

    #[wasm_bindgen(getter)]
    pub fn fps(&self) -> u32 {
        self.inner.fps()
    }

    pub fn set_fps(&mut self, fps: u32) {
        self.inner.set_fps(fps);
    }

    /// Milliseconds between preview ticks, for `setInterval`.
    pub fn period_ms(&self) -> f64 {
        self.inner.preview_period().as_secs_f64() * 1000.0
    }

    /// One timer tick. Returns the new preview index, or -1 if it held.
    pub fn tick(&mut self) -> i32 {
        self.inner.tick_preview().map_or(-1, |i| i as i32)
    }

    /// Feed elapsed milliseconds (e.g. from `requestAnimationFrame`).
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        if elapsed_ms.is_nan() || elapsed_ms <= 0.0 {
            return 0;
        }
        match std::time::Duration::try_from_secs_f64(elapsed_ms / 1000.0) {
            Ok(elapsed) => self.inner.advance_preview(elapsed),
            Err(_) => 0,
        }
    }

    /// Current preview index, or -1 when the sequence is empty.
    pub fn preview_index(&self) -> i32 {
        self.inner.preview_index().map_or(-1, |i| i as i32)
    }

    /// The frame the preview is showing, composed at the common cell size.
    pub fn preview_frame(&self) -> Option<FrameImage> {
        let source = self.inner.source()?;
        let entry = self.inner.preview_entry()?;
        let image = compose_frame(source, &entry, cell_size(&self.inner.playback()));
        Some(FrameImage {
            width: image.width(),
            height: image.height(),
            pixels: image.into_raw(),
        })
    }

    /// Whether anything changed since the last call.
    pub fn take_redraw(&mut self) -> bool {
        self.inner.take_redraw()
    }

    /// Raster-ordered frames, `OVERLAY_STRIDE` values each:
    /// `x, y, width, height, active, selected, badge` (badge 0 = none).
    pub fn overlay(&self) -> Vec<f64> {
        let overlay = self.inner.overlay();
        let mut out = Vec::with_capacity(overlay.len() * OVERLAY_STRIDE);
        for f in overlay {
            out.extend_from_slice(&[
                f.rect.x,
                f.rect.y,
                f.rect.width,
                f.rect.height,
                flag(f.active),
                flag(f.selected),
                f.badge.unwrap_or(0) as f64,
            ]);
        }
        out
    }

    /// Marquee rectangle `[x, y, width, height]`, empty when none.
    pub fn marquee(&self) -> Vec<f64> {
        self.inner
            .marquee()
            .map(|r| vec![r.x, r.y, r.width, r.height])
            .unwrap_or_default()
    }

    /// Playback entries, `PLAYBACK_STRIDE` values each:
    /// `id, source x, source y, source width, source height, offset x, offset y`.
    pub fn playback(&self) -> Vec<f64> {
        let playback = self.inner.playback();
        let mut out = Vec::with_capacity(playback.len() * PLAYBACK_STRIDE);
        for e in playback {
            out.extend_from_slice(&[
                e.id as f64,
                e.source.x,
                e.source.y,
                e.source.width,
                e.source.height,
                f64::from(e.offset_x),
                f64::from(e.offset_y),
            ]);
        }
        out
    }

    /// Overlay as JSON, for hosts that prefer objects.
    pub fn overlay_json(&self) -> String {
        serde_json::to_string(&self.inner.overlay()).unwrap_or_else(|_| "[]".to_string())
    }
}
