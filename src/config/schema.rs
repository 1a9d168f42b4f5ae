//! YAML schema definitions for declarative experiment configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::artifact::RenderConfig;
use crate::data::{LabelNoise, SignalArgs};
use crate::explain::ExplainBatch;
use crate::model::ModelFactory;
use crate::sweep::SweepConfig;
use crate::train::TrainConfig;

/// Complete experiment specification
///
/// Every section has defaults matching the reference double-descent run, so
/// an empty YAML document is a valid (and long-running) experiment.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentSpec {
    /// Dataset source and corruption
    pub data: DataSpec,
    /// Model family
    pub model: ModelFactory,
    /// Fixed training hyperparameters
    pub training: TrainConfig,
    /// Width schedule
    pub sweep: SweepConfig,
    /// Attribution settings
    pub explain: ExplainSpec,
    /// Output locations
    pub output: OutputSpec,
    /// Compute device (`cpu`); falls back to `DESCENSO_DEVICE`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

/// Where the dataset comes from
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DataSource {
    /// Generate MNIST-1D style signals
    #[default]
    Synthetic,
    /// Load a dataset exported as JSON
    Json {
        /// Path to the JSON file
        path: PathBuf,
    },
}

/// Dataset configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSpec {
    /// Dataset source
    pub source: DataSource,
    /// Generator arguments (synthetic source only)
    pub signals: SignalArgs,
    /// Training label corruption; `None` keeps clean labels
    pub label_noise: Option<LabelNoise>,
}

impl Default for DataSpec {
    fn default() -> Self {
        Self {
            source: DataSource::Synthetic,
            signals: SignalArgs::default(),
            label_noise: Some(LabelNoise::default()),
        }
    }
}

/// Attribution configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplainSpec {
    /// Run attribution and artifact filing after each width
    pub enabled: bool,
    /// Test examples per explained batch
    pub batch_size: usize,
    /// Which batch of the test split to explain
    pub batch_index: usize,
    /// Background rows drawn from the training split; `None` uses all of them
    pub background_size: Option<usize>,
    /// Seed for background subsampling
    pub background_seed: u64,
}

impl Default for ExplainSpec {
    fn default() -> Self {
        Self {
            enabled: true,
            batch_size: 12,
            batch_index: 1,
            background_size: None,
            background_seed: 0,
        }
    }
}

impl ExplainSpec {
    /// Selected test batch
    pub fn batch(&self) -> ExplainBatch {
        ExplainBatch {
            batch_size: self.batch_size,
            batch_index: self.batch_index,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSpec {
    /// Root holding `CP`, `WP`, `ALL`, the manifest and the sweep results
    pub root: PathBuf,
    /// Write each width's training history to `runs/width_<w>.json`
    pub save_runs: bool,
    /// Artifact image settings
    pub render: RenderConfig,
}

impl Default for OutputSpec {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./results"),
            save_runs: true,
            render: RenderConfig::default(),
        }
    }
}
