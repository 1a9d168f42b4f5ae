//! Training hyperparameters

use serde::{Deserialize, Serialize};

/// Fixed hyperparameters shared by every run of a sweep
///
/// Runs always use the full epoch budget; there is no early stopping, so
/// the hidden width is the only factor that varies between runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    /// Examples per mini-batch
    pub batch_size: usize,
    /// Number of passes over the training split
    pub epochs: usize,
    /// SGD learning rate
    pub lr: f32,
    /// SGD momentum coefficient
    pub momentum: f32,
    /// Evaluate both splits every N epochs (the last epoch is always evaluated)
    pub eval_every: usize,
    /// Emit a progress line every N epochs
    pub log_every: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            batch_size: 100,
            epochs: 1000,
            lr: 0.01,
            momentum: 0.9,
            eval_every: 1,
            log_every: 100,
        }
    }
}

impl TrainConfig {
    /// Whether full-split diagnostics are recorded after `epoch` (0-based)
    pub fn evaluates(&self, epoch: usize) -> bool {
        let last = epoch + 1 == self.epochs;
        last || (epoch + 1) % self.eval_every.max(1) == 0 || self.logs(epoch)
    }

    /// Whether a progress line is emitted after `epoch` (0-based)
    pub fn logs(&self, epoch: usize) -> bool {
        epoch % self.log_every.max(1) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_run() {
        let c = TrainConfig::default();
        assert_eq!(c.batch_size, 100);
        assert_eq!(c.epochs, 1000);
        assert_eq!(c.lr, 0.01);
        assert_eq!(c.momentum, 0.9);
    }

    #[test]
    fn test_cadence() {
        let c = TrainConfig {
            epochs: 10,
            eval_every: 4,
            log_every: 5,
            ..Default::default()
        };
        let evaluated: Vec<usize> = (0..10).filter(|&e| c.evaluates(e)).collect();
        assert_eq!(evaluated, vec![0, 3, 5, 7, 9]);
        assert!(c.logs(0) && c.logs(5) && !c.logs(9));
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let c: TrainConfig = serde_yaml::from_str("epochs: 5\n").unwrap();
        assert_eq!(c.epochs, 5);
        assert_eq!(c.batch_size, 100);
    }
}
