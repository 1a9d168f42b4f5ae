//! Core Trainer struct and basic methods

use crate::optim::{Optimizer, SGD};
use crate::train::{CrossEntropyLoss, TrainConfig};

/// Mini-batch trainer for one model
///
/// A trainer owns its optimizer state, so a fresh trainer is needed for every
/// model of a sweep.
///
/// # Example
///
/// ```no_run
/// use descenso::data::{DatasetProvider, SignalArgs, SyntheticSignals};
/// use descenso::model::ModelFactory;
/// use descenso::train::{TrainConfig, Trainer};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let data = SyntheticSignals::new(SignalArgs::default()).provide()?;
/// let mut rng = StdRng::seed_from_u64(0);
/// let mut model = ModelFactory::default().build(100, &mut rng)?;
///
/// let mut trainer = Trainer::sgd(TrainConfig::default());
/// let run = trainer.fit(&mut model, &data, &mut rng)?;
/// println!("test error {:.2}%", run.test_error());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Trainer {
    /// Optimizer
    pub(crate) optimizer: Box<dyn Optimizer>,

    /// Loss function
    pub(crate) loss_fn: CrossEntropyLoss,

    /// Training configuration
    pub(crate) config: TrainConfig,
}

impl Trainer {
    /// Create a new trainer
    pub fn new(optimizer: Box<dyn Optimizer>, config: TrainConfig) -> Self {
        Self {
            optimizer,
            loss_fn: CrossEntropyLoss,
            config,
        }
    }

    /// Trainer with momentum SGD configured from `config`
    pub fn sgd(config: TrainConfig) -> Self {
        Self::new(Box::new(SGD::new(config.lr, config.momentum)), config)
    }

    /// Get current learning rate
    pub fn lr(&self) -> f32 {
        self.optimizer.lr()
    }

    /// Training configuration
    pub fn config(&self) -> &TrainConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trainer_creation() {
        let trainer = Trainer::sgd(TrainConfig::default());
        assert_eq!(trainer.lr(), 0.01);
        assert_eq!(trainer.config().epochs, 1000);
    }
}
