//! Configuration validation logic
//!
//! Validates experiment specifications for correctness before execution.

use super::error::ValidationError;
use crate::config::schema::{DataSource, ExperimentSpec};
use crate::config::Device;
use crate::data::NUM_CLASSES;

/// Largest class count the artifact file-name grammar can encode
const MAX_ENCODABLE_CLASSES: usize = 10;

/// Smallest edge of a rendered artifact, in pixels
const MIN_RENDER_EDGE: u32 = 16;

/// Validate an experiment specification
///
/// Checks:
/// - The width schedule is non-empty, positive and strictly ascending
/// - Numeric values are in valid ranges
/// - Model and dataset dimensions agree
/// - The requested device exists
pub fn validate_spec(spec: &ExperimentSpec) -> Result<(), ValidationError> {
    spec.sweep.validate()?;

    // Model family
    let model = &spec.model;
    for (name, value) in [
        ("input_dim", model.input_dim),
        ("output_dim", model.output_dim),
        ("hidden_layers", model.hidden_layers),
    ] {
        if value == 0 {
            return Err(ValidationError::InvalidDimension { name, value });
        }
    }

    // Training hyperparameters
    let training = &spec.training;
    if training.batch_size == 0 {
        return Err(ValidationError::InvalidBatchSize(training.batch_size));
    }
    if training.epochs == 0 {
        return Err(ValidationError::InvalidEpochs(training.epochs));
    }
    if !(training.lr > 0.0 && training.lr <= 1.0) {
        return Err(ValidationError::InvalidLearningRate(training.lr));
    }
    if !(0.0..1.0).contains(&training.momentum) {
        return Err(ValidationError::InvalidMomentum(training.momentum));
    }
    for (name, value) in [
        ("eval_every", training.eval_every),
        ("log_every", training.log_every),
    ] {
        if value == 0 {
            return Err(ValidationError::InvalidCadence { name, value });
        }
    }

    // Data source
    match &spec.data.source {
        DataSource::Synthetic => validate_signals(spec)?,
        DataSource::Json { path } => {
            if path.as_os_str().is_empty() {
                return Err(ValidationError::MissingDataPath);
            }
        }
    }
    if let Some(noise) = &spec.data.label_noise {
        if !(0.0..=1.0).contains(&noise.probability) {
            return Err(ValidationError::InvalidNoiseProbability(noise.probability));
        }
    }

    // Attribution and artifacts
    let explain = &spec.explain;
    if explain.enabled {
        if explain.batch_size == 0 {
            return Err(ValidationError::InvalidExplainBatch(explain.batch_size));
        }
        if let Some(0) = explain.background_size {
            return Err(ValidationError::InvalidBackgroundSize(0));
        }
        if model.output_dim > MAX_ENCODABLE_CLASSES {
            return Err(ValidationError::ClassCountNotEncodable(model.output_dim));
        }
        let render = &spec.output.render;
        if render.width < MIN_RENDER_EDGE || render.height < MIN_RENDER_EDGE {
            return Err(ValidationError::InvalidRenderSize {
                width: render.width,
                height: render.height,
            });
        }
    }

    if let Some(device) = &spec.device {
        Device::parse(device)?;
    }

    Ok(())
}

fn validate_signals(spec: &ExperimentSpec) -> Result<(), ValidationError> {
    let signals = &spec.data.signals;
    if signals.num_samples < 2 {
        return Err(ValidationError::InvalidSampleCount(signals.num_samples));
    }
    if !(signals.train_split > 0.0 && signals.train_split < 1.0) {
        return Err(ValidationError::InvalidTrainSplit(signals.train_split));
    }
    let n_train = (signals.num_samples as f64 * signals.train_split).round() as usize;
    if n_train == 0 || n_train >= signals.num_samples {
        return Err(ValidationError::InvalidTrainSplit(signals.train_split));
    }
    for (name, value) in [
        ("corr_noise_scale", signals.corr_noise_scale),
        ("iid_noise_scale", signals.iid_noise_scale),
        ("scale_coeff", signals.scale_coeff),
        ("shear_scale", signals.shear_scale),
    ] {
        if !(value.is_finite() && value >= 0.0) {
            return Err(ValidationError::InvalidNoiseScale { name, value });
        }
    }
    let (min, max) = signals.padding;
    if min > max {
        return Err(ValidationError::InvalidPadding { min, max });
    }
    if signals.final_seq_length < 2 {
        return Err(ValidationError::InvalidDimension {
            name: "final_seq_length",
            value: signals.final_seq_length,
        });
    }
    if spec.model.input_dim != signals.final_seq_length {
        return Err(ValidationError::DimensionMismatch {
            name: "input_dim",
            model: spec.model.input_dim,
            data: signals.final_seq_length,
        });
    }
    if spec.model.output_dim != NUM_CLASSES {
        return Err(ValidationError::DimensionMismatch {
            name: "output_dim",
            model: spec.model.output_dim,
            data: NUM_CLASSES,
        });
    }
    Ok(())
}
