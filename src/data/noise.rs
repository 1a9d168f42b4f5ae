//! Post-hoc label corruption of the training split
//!
//! Every training label is independently redrawn with probability
//! `probability`; the replacement is uniform over all classes and may equal
//! the original. Each draw is recorded so a noisy dataset can be rebuilt
//! exactly.

use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::dataset::Dataset;
use crate::error::Result;

/// Label corruption settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelNoise {
    /// Probability that a training label is redrawn
    pub probability: f64,
    /// Seed for the corruption draws
    pub seed: u64,
}

impl Default for LabelNoise {
    fn default() -> Self {
        Self {
            probability: 0.15,
            seed: 0,
        }
    }
}

/// One redrawn label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corruption {
    /// Position in the training split
    pub index: usize,
    /// Label before corruption
    pub original: usize,
    /// Label after corruption
    pub replacement: usize,
}

/// Record of a corruption pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelCorruption {
    /// Probability used
    pub probability: f64,
    /// Seed used
    pub seed: u64,
    /// Every redrawn label, in index order
    pub corrupted: Vec<Corruption>,
}

impl LabelCorruption {
    /// Number of labels whose value actually changed
    pub fn changed(&self) -> usize {
        self.corrupted
            .iter()
            .filter(|c| c.original != c.replacement)
            .count()
    }

    /// Write the record as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Re-apply a saved record to a clean dataset
    pub fn replay(&self, dataset: &mut Dataset) {
        let labels = dataset.train_mut().y_mut();
        for c in &self.corrupted {
            if let Some(label) = labels.get_mut(c.index) {
                *label = c.replacement;
            }
        }
    }
}

impl LabelNoise {
    /// Corrupt the training labels of `dataset` in place
    pub fn apply(&self, dataset: &mut Dataset) -> LabelCorruption {
        let num_classes = dataset.num_classes();
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut corrupted = Vec::new();

        for (index, label) in dataset.train_mut().y_mut().iter_mut().enumerate() {
            if rng.random::<f64>() < self.probability {
                let replacement = rng.random_range(0..num_classes);
                corrupted.push(Corruption {
                    index,
                    original: *label,
                    replacement,
                });
                *label = replacement;
            }
        }

        let record = LabelCorruption {
            probability: self.probability,
            seed: self.seed,
            corrupted,
        };
        info!(
            drawn = record.corrupted.len(),
            changed = record.changed(),
            probability = self.probability,
            "Corrupted training labels"
        );
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DatasetProvider, SignalArgs, SyntheticSignals};

    fn dataset() -> Dataset {
        SyntheticSignals::new(SignalArgs {
            num_samples: 400,
            ..Default::default()
        })
        .provide()
        .unwrap()
    }

    #[test]
    fn test_zero_probability_is_identity() {
        let mut ds = dataset();
        let before = ds.train().y().to_vec();
        let record = LabelNoise {
            probability: 0.0,
            seed: 3,
        }
        .apply(&mut ds);
        assert!(record.corrupted.is_empty());
        assert_eq!(ds.train().y(), before.as_slice());
    }

    #[test]
    fn test_only_train_labels_change() {
        let mut ds = dataset();
        let test_before = ds.test().y().to_vec();
        LabelNoise {
            probability: 1.0,
            seed: 3,
        }
        .apply(&mut ds);
        assert_eq!(ds.test().y(), test_before.as_slice());
    }

    #[test]
    fn test_record_matches_dataset() {
        let mut ds = dataset();
        let before = ds.train().y().to_vec();
        let record = LabelNoise {
            probability: 0.5,
            seed: 11,
        }
        .apply(&mut ds);
        assert!(!record.corrupted.is_empty());
        for c in &record.corrupted {
            assert_eq!(before[c.index], c.original);
            assert_eq!(ds.train().y()[c.index], c.replacement);
        }
    }

    #[test]
    fn test_replay_reproduces_noisy_labels() {
        let mut noisy = dataset();
        let record = LabelNoise::default().apply(&mut noisy);

        let mut clean = dataset();
        record.replay(&mut clean);
        assert_eq!(clean.train().y(), noisy.train().y());
    }

    #[test]
    fn test_save_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("noise.json");
        let mut ds = dataset();
        let record = LabelNoise::default().apply(&mut ds);
        record.save(&path).unwrap();
        let loaded: LabelCorruption =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded, record);
    }
}
