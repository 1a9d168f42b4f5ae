//! Generate command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::cli::GenerateArgs;
use crate::config::load_config;
use crate::data::{save_json, DatasetProvider, SignalArgs, SyntheticSignals};

/// Generator arguments from the optional config with CLI overrides applied
pub fn signal_args(args: &GenerateArgs) -> Result<SignalArgs, String> {
    let mut signals = match &args.config {
        Some(path) => {
            load_config(path)
                .map_err(|e| format!("Config error: {e}"))?
                .data
                .signals
        }
        None => SignalArgs::default(),
    };
    if let Some(num_samples) = args.num_samples {
        signals.num_samples = num_samples;
    }
    if let Some(seed) = args.seed {
        signals.seed = seed;
    }
    Ok(signals)
}

pub fn run_generate(args: GenerateArgs, level: LogLevel) -> Result<(), String> {
    let signals = signal_args(&args)?;
    log(
        level,
        LogLevel::Verbose,
        &format!(
            "Generating {} signals of length {} (seed {})",
            signals.num_samples, signals.final_seq_length, signals.seed
        ),
    );

    let dataset = SyntheticSignals::new(signals)
        .provide()
        .map_err(|e| format!("Generation error: {e}"))?;
    save_json(&dataset, &args.output).map_err(|e| format!("Write error: {e}"))?;

    log(
        level,
        LogLevel::Normal,
        &format!(
            "Wrote {} train and {} test signals to {}",
            dataset.train().len(),
            dataset.test().len(),
            args.output.display()
        ),
    );
    Ok(())
}
