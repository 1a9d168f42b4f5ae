//! Training result types

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Full-split diagnostics recorded after an epoch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochRecord {
    /// Epoch index, starting at 0
    pub epoch: usize,
    /// Mean cross entropy over the whole training split
    pub train_loss: f32,
    /// Training error in percent
    pub train_error: f32,
    /// Mean cross entropy over the whole test split
    pub test_loss: f32,
    /// Test error in percent
    pub test_error: f32,
}

/// Result of training one model to its full epoch budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRun {
    /// Hidden width of the trained model
    pub width: usize,
    /// Trainable parameters of the trained model
    pub num_parameters: usize,
    /// Recorded diagnostics, in epoch order
    pub history: Vec<EpochRecord>,
    /// Predicted class of every training example after the last epoch
    pub train_predictions: Vec<usize>,
    /// Predicted class of every test example after the last epoch
    pub test_predictions: Vec<usize>,
    /// Wall-clock training time in seconds
    pub elapsed_secs: f64,
}

impl TrainingRun {
    /// Diagnostics of the last epoch
    pub fn final_record(&self) -> Option<&EpochRecord> {
        self.history.last()
    }

    /// Final training error in percent
    pub fn train_error(&self) -> f32 {
        self.final_record().map_or(0.0, |r| r.train_error)
    }

    /// Final test error in percent
    pub fn test_error(&self) -> f32 {
        self.final_record().map_or(0.0, |r| r.test_error)
    }

    /// Write the run as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run() -> TrainingRun {
        TrainingRun {
            width: 4,
            num_parameters: 100,
            history: vec![
                EpochRecord {
                    epoch: 0,
                    train_loss: 2.0,
                    train_error: 80.0,
                    test_loss: 2.1,
                    test_error: 85.0,
                },
                EpochRecord {
                    epoch: 1,
                    train_loss: 1.0,
                    train_error: 40.0,
                    test_loss: 1.5,
                    test_error: 55.5,
                },
            ],
            train_predictions: vec![0, 1],
            test_predictions: vec![1, 1],
            elapsed_secs: 0.5,
        }
    }

    #[test]
    fn test_final_errors() {
        let r = run();
        assert_eq!(r.train_error(), 40.0);
        assert_eq!(r.test_error(), 55.5);
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        let r = run();
        r.save(&path).unwrap();
        let loaded: TrainingRun =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded, r);
    }
}
