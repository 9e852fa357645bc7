//! Export command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::config::CliOverrides;
use crate::export::{export, ExportOptions};
use crate::frames::OffsetAxis;
use crate::output::{output_stem, ExportError};
use crate::slicer::Slicer;

use super::{open_session, resolve_config, GridArgs, EXIT_ERROR, EXIT_SUCCESS};

/// Apply exclusions, ordering and offsets given on the command line.
///
/// Ids that match no frame are reported and skipped.
fn apply_edits(slicer: &mut Slicer, exclude: &[usize], order: &[usize], offsets: &[(usize, i32, i32)]) {
    let count = slicer.frames().len();
    let known = |id: usize| {
        if id >= count {
            eprintln!("Warning: no frame #{} (grid has {} frames)", id, count);
            false
        } else {
            true
        }
    };

    let excluded: Vec<usize> = exclude.iter().copied().filter(|&id| known(id)).collect();
    if !excluded.is_empty() {
        slicer.select(excluded);
        slicer.set_active(false);
    }

    let order: Vec<usize> = order.iter().copied().filter(|&id| known(id)).collect();
    slicer.promote(&order);

    for &(id, dx, dy) in offsets {
        if !known(id) {
            continue;
        }
        slicer.select([id]);
        slicer.adjust_offset(OffsetAxis::X, dx);
        slicer.adjust_offset(OffsetAxis::Y, dy);
    }
    slicer.clear_selection();
}

/// Execute the export command
#[allow(clippy::too_many_arguments)]
pub fn run_export(
    input: &Path,
    grid: &GridArgs,
    output: Option<&Path>,
    exclude: &[usize],
    order: &[usize],
    offsets: &[(usize, i32, i32)],
    fps: Option<u32>,
    gif: bool,
    sheet: bool,
    sheet_columns: Option<u32>,
    scale: Option<u32>,
    frames: bool,
) -> ExitCode {
    let overrides = CliOverrides {
        rows: grid.rows,
        cols: grid.cols,
        fps,
        out: output.map(Path::to_path_buf),
        scale,
        sheet_columns,
    };
    let config = match resolve_config(grid.config.as_deref(), &overrides) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let mut slicer = match open_session(input, &config) {
        Ok(s) => s,
        Err(code) => return code,
    };

    apply_edits(&mut slicer, exclude, order, offsets);

    let options = ExportOptions {
        out_dir: config.export.out.clone(),
        stem: output_stem(input),
        scale: config.export.scale,
        frames,
        gif,
        loop_gif: config.export.loop_gif,
        fps: slicer.fps(),
        sheet,
        sheet_columns: config.export.sheet_columns,
    };

    match export(&slicer, &options) {
        Ok(report) => {
            for path in report.files() {
                println!("Saved: {}", path.display());
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(ExportError::Empty) => {
            eprintln!("Error: every frame is excluded, nothing to export");
            ExitCode::from(EXIT_ERROR)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
