//! CLI command implementations

mod generate;
mod query;
mod sweep;
mod validate;

#[cfg(test)]
mod tests;

use crate::cli::{init_tracing, LogLevel};
use crate::config::cli::{Cli, Command};

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    // Configure output based on verbose/quiet flags
    let log_level = if cli.quiet {
        LogLevel::Quiet
    } else if cli.verbose {
        LogLevel::Verbose
    } else {
        LogLevel::Normal
    };
    init_tracing(log_level);

    match cli.command {
        Command::Sweep(args) => sweep::run_sweep(args, log_level),
        Command::Validate(args) => validate::run_validate(args, log_level),
        Command::Query(args) => query::run_query(args, log_level),
        Command::Generate(args) => generate::run_generate(args, log_level),
    }
}
