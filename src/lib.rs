//! Gridslice - Library for slicing sprite sheets into animation frames
//!
//! This library provides functionality to:
//! - Split an image into frames with draggable row/column dividers
//! - Select, exclude, nudge and reorder frames with pointer-driven editing
//! - Preview the playback sequence at a fixed frame rate
//! - Export the sequence as PNG frames, an animated GIF or a packed sheet

pub mod cli;
pub mod config;
pub mod dividers;
pub mod export;
pub mod frames;
pub mod geometry;
pub mod gif;
pub mod output;
pub mod preview;
pub mod render;
pub mod selection;
pub mod sequence;
pub mod slicer;
pub mod source;
pub mod spritesheet;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use slicer::Slicer;

use tracing_subscriber::EnvFilter;

/// Install the global log subscriber. `RUST_LOG` wins over `verbose`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose { "gridslice=debug" } else { "gridslice=warn" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
