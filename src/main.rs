//! Gridslice - Command-line tool for slicing sprite sheets into animation frames

use std::process::ExitCode;

use gridslice::cli;

fn main() -> ExitCode {
    cli::run()
}
