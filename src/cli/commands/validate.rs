//! Validate command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::cli::ValidateArgs;
use crate::config::{load_config, DataSource, ExperimentSpec};

/// Format data configuration as a string
pub fn format_data_info(spec: &ExperimentSpec) -> String {
    let mut lines = vec![match &spec.data.source {
        DataSource::Synthetic => format!(
            "  Synthetic signals: {} samples, train split {}",
            spec.data.signals.num_samples, spec.data.signals.train_split
        ),
        DataSource::Json { path } => format!("  JSON dataset: {}", path.display()),
    }];
    match &spec.data.label_noise {
        Some(noise) => lines.push(format!(
            "  Label noise: p={} (seed {})",
            noise.probability, noise.seed
        )),
        None => lines.push("  Label noise: none".to_string()),
    }
    lines.join("\n")
}

/// Format model and training configuration as a string
pub fn format_training_info(spec: &ExperimentSpec) -> String {
    [
        format!(
            "  Model: {} inputs, {} hidden layers of width w, {} classes",
            spec.model.input_dim, spec.model.hidden_layers, spec.model.output_dim
        ),
        format!(
            "  SGD: lr={} momentum={}",
            spec.training.lr, spec.training.momentum
        ),
        format!(
            "  Epochs: {} (batch size {})",
            spec.training.epochs, spec.training.batch_size
        ),
    ]
    .join("\n")
}

/// Format the width schedule as a string
pub fn format_sweep_info(spec: &ExperimentSpec) -> String {
    let scheduled = spec.sweep.scheduled();
    let mut lines = vec![format!(
        "  Widths: {} scheduled of {} (start index {})",
        scheduled.len(),
        spec.sweep.widths.len(),
        spec.sweep.start_index
    )];
    if let (Some(first), Some(last)) = (scheduled.first(), scheduled.last()) {
        lines.push(format!("  Range: {first}..={last}"));
    }
    lines.push(format!("  Seed: {}", spec.sweep.seed));
    lines.join("\n")
}

/// Format attribution and output configuration as a string
pub fn format_explain_info(spec: &ExperimentSpec) -> String {
    let mut lines = Vec::new();
    if spec.explain.enabled {
        lines.push(format!(
            "  Explain: batch {} of size {}",
            spec.explain.batch_index, spec.explain.batch_size
        ));
        match spec.explain.background_size {
            Some(size) => lines.push(format!("  Background: {size} training rows")),
            None => lines.push("  Background: full training split".to_string()),
        }
    } else {
        lines.push("  Explain: disabled".to_string());
    }
    lines.push(format!("  Output root: {}", spec.output.root.display()));
    lines.join("\n")
}

pub fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Validating config: {}", args.config.display()),
    );

    let spec = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;

    log(level, LogLevel::Normal, "Configuration is valid");

    if args.detailed {
        log(level, LogLevel::Normal, "");
        log(level, LogLevel::Normal, "Data:");
        log(level, LogLevel::Normal, &format_data_info(&spec));
        log(level, LogLevel::Normal, "Training:");
        log(level, LogLevel::Normal, &format_training_info(&spec));
        log(level, LogLevel::Normal, "Sweep:");
        log(level, LogLevel::Normal, &format_sweep_info(&spec));
        log(level, LogLevel::Normal, "Attribution:");
        log(level, LogLevel::Normal, &format_explain_info(&spec));
    }

    Ok(())
}
