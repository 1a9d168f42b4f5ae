//! Sweep command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::cli::{apply_overrides, SweepArgs};
use crate::config::{load_config, validate_spec};
use crate::experiment::{Experiment, ExperimentReport};

/// Format the sweep curve as a table
pub fn format_report(report: &ExperimentReport) -> String {
    let mut lines = vec![format!(
        "{:>6}  {:>10}  {:>9}  {:>9}",
        "width", "params", "train %", "test %"
    )];
    for entry in &report.result.entries {
        lines.push(format!(
            "{:>6}  {:>10}  {:>9.2}  {:>9.2}",
            entry.width, entry.num_parameters, entry.train_error, entry.test_error
        ));
    }
    for failure in &report.result.failures {
        lines.push(format!(
            "  width {} failed during {}: {}",
            failure.width, failure.stage, failure.reason
        ));
    }
    lines.join("\n")
}

pub fn run_sweep(args: SweepArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Descenso: Sweeping from {}", args.config.display()),
    );

    let mut spec = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;
    apply_overrides(&mut spec, &args);
    validate_spec(&spec).map_err(|e| format!("Config error: {e}"))?;

    let scheduled = spec.sweep.scheduled().to_vec();
    if args.dry_run {
        log(
            level,
            LogLevel::Normal,
            "Dry run - config validated successfully",
        );
        log(
            level,
            LogLevel::Verbose,
            &format!("  Widths: {scheduled:?}"),
        );
        log(
            level,
            LogLevel::Verbose,
            &format!(
                "  Epochs: {} (lr={}, momentum={})",
                spec.training.epochs, spec.training.lr, spec.training.momentum
            ),
        );
        log(
            level,
            LogLevel::Verbose,
            &format!("  Output root: {}", spec.output.root.display()),
        );
        return Ok(());
    }

    log(
        level,
        LogLevel::Verbose,
        &format!("  Training {} widths", scheduled.len()),
    );
    let experiment = Experiment::from_spec(spec).map_err(|e| format!("Config error: {e}"))?;
    let report = experiment.run().map_err(|e| format!("Sweep error: {e}"))?;

    log(level, LogLevel::Normal, &format_report(&report));
    if let Some(peak) = report.result.peak_test_error() {
        log(
            level,
            LogLevel::Normal,
            &format!(
                "Peak test error {:.2}% at width {}",
                peak.test_error, peak.width
            ),
        );
    }
    log(
        level,
        LogLevel::Normal,
        &format!(
            "Sweep complete: {} artifacts under {}",
            report.artifacts_written,
            report.output_root.display()
        ),
    );
    Ok(())
}
