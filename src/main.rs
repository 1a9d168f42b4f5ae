//! Descenso CLI
//!
//! Width sweep entry point for the descenso library.
//!
//! # Usage
//!
//! ```bash
//! # Run a sweep from config
//! descenso sweep experiment.yaml
//!
//! # Resume at the 13th width
//! descenso sweep experiment.yaml --start-index 12
//!
//! # Validate config
//! descenso validate experiment.yaml --detailed
//!
//! # Samples right at small widths, wrong in the middle, right again at large widths
//! descenso query ./results --select cp:2-22 --select wp:26-69 --select cp:70-900
//!
//! # Export a synthetic dataset
//! descenso generate --output data.json --num-samples 4000
//! ```

use clap::Parser;
use descenso::cli::{run_command, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
