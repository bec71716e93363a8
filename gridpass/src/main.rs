//! Derive a memorable password from a path across a random character grid.

mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
    cli::run()
}
