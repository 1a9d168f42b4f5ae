//! Labeled 1-D signal datasets
//!
//! A [`DatasetProvider`] produces a [`Dataset`] with disjoint train and test
//! splits. Label corruption is applied afterwards by the caller through
//! [`LabelNoise`], never by a provider.

mod dataset;
mod json;
mod noise;
mod synthetic;

pub use dataset::{Dataset, Split};
pub use json::{save_json, DatasetFile, JsonDataset};
pub use noise::{Corruption, LabelCorruption, LabelNoise};
pub use synthetic::{SignalArgs, SyntheticSignals, NUM_CLASSES};

use crate::error::Result;

/// Source of a labeled dataset
pub trait DatasetProvider {
    /// Produce the dataset
    fn provide(&self) -> Result<Dataset>;

    /// Short provider name for logs
    fn name(&self) -> &str;
}
