//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod export;
mod info;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::loader::{find_config, resolve_path};
use crate::config::{load_config, merge_cli_overrides, CliOverrides, GridsliceConfig};
use crate::slicer::Slicer;
use crate::source::load_image;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Gridslice - slice sprite sheets into ordered animation frames
#[derive(Parser)]
#[command(name = "gslice")]
#[command(about = "Gridslice - slice a sprite sheet into frames and export them as PNG, GIF or a packed sheet")]
#[command(version)]
pub struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Grid options shared by every command
#[derive(clap::Args, Debug, Clone, Default)]
pub struct GridArgs {
    /// Number of rows (1-20)
    #[arg(long)]
    pub rows: Option<u32>,

    /// Number of columns (1-20)
    #[arg(long)]
    pub cols: Option<u32>,

    /// Path to gridslice.toml (default: discovered from the working directory)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the frame grid for an image
    Info {
        /// Source sprite sheet
        input: PathBuf,

        #[command(flatten)]
        grid: GridArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Slice an image and export the frame sequence
    Export {
        /// Source sprite sheet
        input: PathBuf,

        #[command(flatten)]
        grid: GridArgs,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Exclude frames by raster id (comma separated, e.g. "3,7")
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<usize>,

        /// Play these raster ids first, in this order (comma separated)
        #[arg(long, value_delimiter = ',')]
        order: Vec<usize>,

        /// Nudge a frame: ID:DX:DY (repeatable)
        #[arg(long = "offset", value_parser = parse_offset)]
        offsets: Vec<(usize, i32, i32)>,

        /// Frames per second for the GIF
        #[arg(long)]
        fps: Option<u32>,

        /// Also write an animated GIF
        #[arg(long)]
        gif: bool,

        /// Also write a packed sprite sheet
        #[arg(long)]
        sheet: bool,

        /// Columns in the packed sprite sheet
        #[arg(long)]
        sheet_columns: Option<u32>,

        /// Scale output by integer factor (1-16)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=16))]
        scale: Option<u32>,

        /// Skip writing individual frame PNGs
        #[arg(long)]
        no_frames: bool,
    },
}

/// Parse an `ID:DX:DY` offset argument.
fn parse_offset(s: &str) -> Result<(usize, i32, i32), String> {
    let parts: Vec<&str> = s.split(':').collect();
    let [id, dx, dy] = parts.as_slice() else {
        return Err(format!("expected ID:DX:DY, got '{}'", s));
    };
    let id = id.trim().parse().map_err(|_| format!("invalid frame id '{}'", id))?;
    let dx = dx.trim().parse().map_err(|_| format!("invalid x offset '{}'", dx))?;
    let dy = dy.trim().parse().map_err(|_| format!("invalid y offset '{}'", dy))?;
    Ok((id, dx, dy))
}

/// Load configuration and apply command-line overrides.
///
/// The configured output directory is relative to the config file; the
/// `--output` flag is relative to the working directory.
pub(crate) fn resolve_config(path: Option<&Path>, overrides: &CliOverrides) -> Result<GridsliceConfig, ExitCode> {
    let config_path = path.map(Path::to_path_buf).or_else(find_config);
    let mut config = load_config(config_path.as_deref()).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_INVALID_ARGS)
    })?;
    if let Some(ref p) = config_path {
        config.export.out = resolve_path(p, &config.export.out);
    }
    merge_cli_overrides(&mut config, overrides);
    Ok(config)
}

/// Build a ready session for `input` from configuration.
pub(crate) fn open_session(input: &Path, config: &GridsliceConfig) -> Result<Slicer, ExitCode> {
    let mut slicer = Slicer::from_config(config).map_err(|e| {
        eprintln!("Error: invalid grid: {}", e);
        ExitCode::from(EXIT_INVALID_ARGS)
    })?;
    match load_image(input) {
        Ok(image) => slicer.set_source(image),
        Err(e) => {
            slicer.source_failed(&e);
            eprintln!("Error: {}: {}", input.display(), e);
            return Err(ExitCode::from(EXIT_ERROR));
        }
    }
    Ok(slicer)
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    crate::init_tracing(cli.verbose);

    match cli.command {
        Commands::Info { input, grid, json } => info::run_info(&input, &grid, json),
        Commands::Export {
            input,
            grid,
            output,
            exclude,
            order,
            offsets,
            fps,
            gif,
            sheet,
            sheet_columns,
            scale,
            no_frames,
        } => export::run_export(
            &input,
            &grid,
            output.as_deref(),
            &exclude,
            &order,
            &offsets,
            fps,
            gif,
            sheet,
            sheet_columns,
            scale,
            !no_frames,
        ),
    }
}
