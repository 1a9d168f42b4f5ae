//! Width-by-width training loop with failure isolation

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use super::config::SweepConfig;
use super::result::{FailureStage, SweepEntry, SweepFailure, SweepResult};
use crate::config::ValidationError;
use crate::data::Dataset;
use crate::error::Result;
use crate::model::{Mlp, ModelFactory};
use crate::train::{Trainer, TrainConfig, TrainingRun};

/// A trained width handed to the per-width hook
pub struct WidthOutcome<'a> {
    /// Position of the width in the configured list
    pub index: usize,
    /// Hidden width
    pub width: usize,
    /// Trained model
    pub model: &'a Mlp,
    /// Training history and predictions
    pub run: &'a TrainingRun,
}

/// Drives one fresh model and one fresh trainer per width
#[derive(Debug, Clone)]
pub struct SweepController {
    config: SweepConfig,
    factory: ModelFactory,
    training: TrainConfig,
}

impl SweepController {
    /// Create a controller; the width schedule is checked here, before any
    /// training starts
    pub fn new(
        config: SweepConfig,
        factory: ModelFactory,
        training: TrainConfig,
    ) -> std::result::Result<Self, ValidationError> {
        config.validate()?;
        factory.spec(config.widths[config.start_index])?;
        Ok(Self {
            config,
            factory,
            training,
        })
    }

    /// Width schedule
    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Train a single width with its derived seed
    pub fn train_width(&self, width: usize, dataset: &Dataset) -> Result<(Mlp, TrainingRun)> {
        let mut rng = StdRng::seed_from_u64(self.config.width_seed(width));
        let mut model = self.factory.build(width, &mut rng)?;
        let mut trainer = Trainer::sgd(self.training);
        let run = trainer.fit(&mut model, dataset, &mut rng)?;
        Ok((model, run))
    }

    /// Run the sweep without downstream stages
    pub fn run(&self, dataset: &Dataset) -> SweepResult {
        self.run_with(dataset, |_| Ok(()))
    }

    /// Run the sweep, calling `hook` after every successfully trained width
    ///
    /// A width whose training fails is skipped. A width whose hook fails keeps
    /// its entry. Both are recorded as failures and the sweep continues.
    pub fn run_with<F>(&self, dataset: &Dataset, mut hook: F) -> SweepResult
    where
        F: FnMut(&WidthOutcome<'_>) -> Result<()>,
    {
        let scheduled = self.config.scheduled();
        let mut result = SweepResult::default();

        for (offset, &width) in scheduled.iter().enumerate() {
            let index = self.config.start_index + offset;
            info!("Width {} ({}/{})", width, offset + 1, scheduled.len());

            let (model, run) = match self.train_width(width, dataset) {
                Ok(trained) => trained,
                Err(e) => {
                    warn!(width, error = %e, "Training failed, skipping width");
                    result.failures.push(SweepFailure {
                        width,
                        stage: FailureStage::Training,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            info!(
                width,
                train_error = run.train_error(),
                test_error = run.test_error(),
                elapsed_secs = run.elapsed_secs,
                "Width trained"
            );
            result.entries.push(SweepEntry {
                width,
                num_parameters: run.num_parameters,
                train_error: run.train_error(),
                test_error: run.test_error(),
            });

            let outcome = WidthOutcome {
                index,
                width,
                model: &model,
                run: &run,
            };
            if let Err(e) = hook(&outcome) {
                warn!(width, error = %e, "Per-width stage failed");
                result.failures.push(SweepFailure {
                    width,
                    stage: FailureStage::Hook,
                    reason: e.to_string(),
                });
            }
        }

        result
    }
}
