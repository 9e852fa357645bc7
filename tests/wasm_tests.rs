//! WASM tests using wasm_bindgen_test
//!
//! Run with: wasm-pack test --headless --chrome --features wasm
//! Or for node: see tests in src/wasm.rs (run with cargo test --features wasm)

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

// Configure tests to run in browser environment
wasm_bindgen_test_configure!(run_in_browser);

use gridslice::wasm::{WasmSlicer, OVERLAY_STRIDE, PLAYBACK_STRIDE};

/// Opaque RGBA buffer where each pixel's red channel is its x coordinate
fn gradient(width: u32, height: u32) -> Vec<u8> {
    (0..height)
        .flat_map(|_| (0..width).flat_map(|x| [x as u8, 0, 0, 255]))
        .collect()
}

fn loaded(rows: u32, cols: u32) -> WasmSlicer {
    let mut s = WasmSlicer::new(rows, cols);
    s.load_rgba(64, 32, gradient(64, 32)).unwrap();
    s
}

// ============================================================================
// Loading
// ============================================================================

#[wasm_bindgen_test]
fn test_load_rgba_makes_ready() {
    let s = loaded(2, 4);
    assert!(s.ready());
    assert_eq!(s.overlay().len(), 8 * OVERLAY_STRIDE);
    assert_eq!(s.playback().len(), 8 * PLAYBACK_STRIDE);
}

#[wasm_bindgen_test]
fn test_load_rgba_rejects_short_buffer() {
    let mut s = WasmSlicer::new(2, 2);
    assert!(s.load_rgba(4, 4, vec![0; 10]).is_err());
    assert!(!s.ready());
    assert!(s.overlay().is_empty());
}

#[wasm_bindgen_test]
fn test_load_bytes_rejects_garbage() {
    let mut s = WasmSlicer::new(2, 2);
    assert!(s.load_bytes(b"not an image").is_err());
    assert!(!s.ready());
}

// ============================================================================
// Pointer editing
// ============================================================================

#[wasm_bindgen_test]
fn test_drag_divider_changes_columns() {
    let mut s = loaded(1, 2);
    s.pointer_move(32.0, 10.0);
    assert_eq!(s.cursor(), "col-resize");
    s.pointer_down(32.0, 10.0);
    s.pointer_move(16.0, 10.0);
    s.pointer_up(16.0, 10.0);

    let vertical = s.vertical();
    assert!((vertical[0] - 0.25).abs() < 1e-9);
    assert_eq!(s.overlay()[2], 16.0);
}

#[wasm_bindgen_test]
fn test_marquee_then_exclude() {
    let mut s = loaded(1, 4);
    s.pointer_down(2.0, 2.0);
    s.pointer_move(30.0, 20.0);
    assert_eq!(s.marquee().len(), 4);
    s.pointer_up(30.0, 20.0);
    assert_eq!(s.selected(), vec![0, 1]);

    assert!(s.exclude_selected());
    assert_eq!(s.playback().len(), 2 * PLAYBACK_STRIDE);
    assert_eq!(s.playback()[0], 2.0);
}

// ============================================================================
// Preview
// ============================================================================

#[wasm_bindgen_test]
fn test_tick_wraps_and_preview_frame() {
    let mut s = loaded(1, 2);
    assert_eq!(s.tick(), 1);
    assert_eq!(s.tick(), 0);

    let frame = s.preview_frame().unwrap();
    assert_eq!((frame.width(), frame.height()), (32, 32));
    assert_eq!(frame.pixels()[0], 0);
}

#[wasm_bindgen_test]
fn test_paused_preview_holds() {
    let mut s = loaded(1, 2);
    s.set_playing(false);
    assert_eq!(s.tick(), -1);
    assert_eq!(s.preview_index(), 0);
}

#[wasm_bindgen_test]
fn test_take_redraw_coalesces() {
    let mut s = loaded(2, 2);
    assert!(s.take_redraw());
    assert!(!s.take_redraw());
    s.nudge(1, 0);
    assert!(!s.take_redraw(), "nothing selected, nothing changed");
    s.select(vec![0]);
    s.nudge(1, 0);
    assert!(s.take_redraw());
}
