//! Info command implementation

use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use crate::config::CliOverrides;
use crate::slicer::Slicer;

use super::{open_session, resolve_config, GridArgs, EXIT_ERROR, EXIT_SUCCESS};

/// One frame as reported by `gslice info`
#[derive(Debug, Serialize)]
struct FrameInfo {
    id: usize,
    row: usize,
    col: usize,
    x: i64,
    y: i64,
    width: u32,
    height: u32,
}

#[derive(Debug, Serialize)]
struct SheetInfo {
    width: u32,
    height: u32,
    rows: usize,
    cols: usize,
    vertical: Vec<f64>,
    horizontal: Vec<f64>,
    frames: Vec<FrameInfo>,
}

fn sheet_info(slicer: &Slicer) -> SheetInfo {
    let (width, height) = slicer.source().map(|img| img.dimensions()).unwrap_or((0, 0));
    let dividers = slicer.dividers();
    SheetInfo {
        width,
        height,
        rows: dividers.rows(),
        cols: dividers.cols(),
        vertical: dividers.vertical().to_vec(),
        horizontal: dividers.horizontal().to_vec(),
        frames: slicer
            .frames()
            .iter()
            .map(|f| {
                let (x, y, width, height) = f.rect.to_pixels();
                FrameInfo {
                    id: f.id,
                    row: f.row,
                    col: f.col,
                    x,
                    y,
                    width,
                    height,
                }
            })
            .collect(),
    }
}

/// Execute the info command
pub fn run_info(input: &Path, grid: &GridArgs, json: bool) -> ExitCode {
    let overrides = CliOverrides {
        rows: grid.rows,
        cols: grid.cols,
        ..Default::default()
    };
    let config = match resolve_config(grid.config.as_deref(), &overrides) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let slicer = match open_session(input, &config) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let info = sheet_info(&slicer);
    if json {
        match serde_json::to_string_pretty(&info) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
        return ExitCode::from(EXIT_SUCCESS);
    }

    println!("{}: {}x{} px", input.display(), info.width, info.height);
    println!("Grid: {} rows x {} cols ({} frames)", info.rows, info.cols, info.frames.len());
    for f in &info.frames {
        println!(
            "  #{:<3} r{} c{}  {}x{} at ({}, {})",
            f.id, f.row, f.col, f.width, f.height, f.x, f.y
        );
    }
    ExitCode::from(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    #[test]
    fn test_sheet_info_reports_pixel_rects() {
        let mut slicer = Slicer::new(2, 3);
        slicer.set_source(RgbaImage::new(90, 40));
        let info = sheet_info(&slicer);

        assert_eq!((info.width, info.height), (90, 40));
        assert_eq!((info.rows, info.cols), (2, 3));
        assert_eq!(info.frames.len(), 6);
        let last = &info.frames[5];
        assert_eq!((last.row, last.col), (1, 2));
        assert_eq!((last.x, last.y, last.width, last.height), (60, 20, 30, 20));
    }
}
