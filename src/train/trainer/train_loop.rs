//! Fixed-budget training loop

use std::time::Instant;

use rand::Rng;
use tracing::{debug, info};

use super::core::Trainer;
use super::result::{EpochRecord, TrainingRun};
use crate::data::Dataset;
use crate::error::{Error, Result};
use crate::model::Mlp;

impl Trainer {
    /// Train `model` on `dataset` for the full epoch budget
    ///
    /// Each epoch reshuffles the training split with `rng`. Both splits are
    /// evaluated in full on the configured cadence and after the last epoch.
    /// There is no early stopping.
    ///
    /// # Errors
    ///
    /// Returns a shape error when the model does not fit the dataset and
    /// [`Error::NonFiniteLoss`] when training diverges.
    pub fn fit<R: Rng + ?Sized>(
        &mut self,
        model: &mut Mlp,
        dataset: &Dataset,
        rng: &mut R,
    ) -> Result<TrainingRun> {
        if model.input_dim() != dataset.num_features() {
            return Err(Error::ShapeMismatch {
                context: "model input width",
                expected: dataset.num_features(),
                actual: model.input_dim(),
            });
        }
        if model.output_dim() != dataset.num_classes() {
            return Err(Error::ShapeMismatch {
                context: "model output width",
                expected: dataset.num_classes(),
                actual: model.output_dim(),
            });
        }

        let start = Instant::now();
        let width = hidden_width(model);
        let mut history = Vec::new();
        let mut train_predictions = Vec::new();
        let mut test_predictions = Vec::new();

        for epoch in 0..self.config.epochs {
            let batch_loss = self.train_epoch(model, dataset.train(), epoch, rng)?;

            if !self.config.evaluates(epoch) {
                continue;
            }

            let train = self.evaluate(model, dataset.train())?;
            let test = self.evaluate(model, dataset.test())?;
            let record = EpochRecord {
                epoch,
                train_loss: train.loss,
                train_error: train.error,
                test_loss: test.loss,
                test_error: test.error,
            };
            debug!(epoch, batch_loss, "Epoch complete");
            if self.config.logs(epoch) {
                info!(
                    "Epoch {:5}, train loss {:.6}, train error {:3.2},  test loss {:.6}, test error {:3.2}",
                    epoch, record.train_loss, record.train_error, record.test_loss, record.test_error
                );
            }
            history.push(record);
            train_predictions = train.predictions;
            test_predictions = test.predictions;
        }

        Ok(TrainingRun {
            width,
            num_parameters: model.num_parameters(),
            history,
            train_predictions,
            test_predictions,
            elapsed_secs: start.elapsed().as_secs_f64(),
        })
    }
}

/// Output width of the first layer, which is the sweep's hidden width
fn hidden_width(model: &Mlp) -> usize {
    match model.spec().layers().first() {
        Some(crate::model::LayerSpec::Linear { output, .. }) => *output,
        _ => 0,
    }
}
