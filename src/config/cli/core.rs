//! Core CLI types - Cli, Command, and argument structs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::types::OutputFormat;
use crate::artifact::Selection;
use crate::config::ExperimentSpec;

/// Descenso: double-descent width sweeps with per-sample attributions
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "descenso")]
#[command(version)]
#[command(
    about = "Train MLPs of increasing width, record the double-descent curve and file attribution plots"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run a width sweep from YAML configuration
    Sweep(SweepArgs),

    /// Validate a configuration file without training
    Validate(ValidateArgs),

    /// Query filed artifacts across widths
    Query(QueryArgs),

    /// Generate a synthetic dataset and export it as JSON
    Generate(GenerateArgs),
}

/// Arguments for the sweep command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct SweepArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Override output root
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Resume from this position in the width list
    #[arg(short, long)]
    pub start_index: Option<usize>,

    /// Override number of epochs
    #[arg(short, long)]
    pub epochs: Option<usize>,

    /// Override the sweep seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Skip attribution and artifact filing
    #[arg(long)]
    pub no_explain: bool,

    /// Dry run (validate config but don't train)
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Show detailed validation report
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for the query command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct QueryArgs {
    /// Artifact root holding CP, WP and ALL
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// Bucket and inclusive width range, e.g. `cp:2-22`; repeat to intersect
    #[arg(short, long = "select", value_name = "BUCKET:MIN-MAX", required = true)]
    pub selections: Vec<Selection>,

    /// List the matching files of one sample instead of sample positions
    #[arg(long)]
    pub sample: Option<usize>,

    /// Read the manifest instead of scanning file names
    #[arg(long)]
    pub manifest: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the generate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct GenerateArgs {
    /// Output JSON file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Total number of signals (split between train and test)
    #[arg(short, long)]
    pub num_samples: Option<usize>,

    /// Generator seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Optional YAML config whose `data.signals` section is used as the base
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Apply command-line overrides to an ExperimentSpec
pub fn apply_overrides(spec: &mut ExperimentSpec, args: &SweepArgs) {
    if let Some(output_dir) = &args.output_dir {
        spec.output.root = output_dir.clone();
    }
    if let Some(start_index) = args.start_index {
        spec.sweep.start_index = start_index;
    }
    if let Some(epochs) = args.epochs {
        spec.training.epochs = epochs;
    }
    if let Some(seed) = args.seed {
        spec.sweep.seed = seed;
    }
    if args.no_explain {
        spec.explain.enabled = false;
    }
}
