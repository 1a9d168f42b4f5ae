//! CLI argument parsing
//!
//! This module provides the command-line interface for descenso.
//!
//! # Usage
//!
//! ```bash
//! descenso sweep experiment.yaml
//! descenso sweep experiment.yaml --start-index 12 --output-dir ./results
//! descenso validate experiment.yaml
//! descenso query ./results --select cp:2-22 --select wp:26-69 --select cp:70-900
//! descenso generate --output data.json --num-samples 4000
//! ```

mod core;
mod types;

pub use core::{
    apply_overrides, parse_args, Cli, Command, GenerateArgs, QueryArgs, SweepArgs, ValidateArgs,
};
pub use types::OutputFormat;
