//! Epoch-level training and full-split evaluation

use rand::Rng;

use super::core::Trainer;
use crate::data::Split;
use crate::error::{Error, Result};
use crate::model::{argmax_rows, Mlp};
use crate::train::{error_rate, BatchIterator};

/// Loss, error rate and predictions over an entire split
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Mean cross entropy
    pub loss: f32,
    /// Error in percent
    pub error: f32,
    /// Predicted class per example
    pub predictions: Vec<usize>,
}

impl Trainer {
    /// Train for one epoch over freshly shuffled batches
    ///
    /// Returns the average batch loss, or [`Error::NonFiniteLoss`] as soon as
    /// a batch loss is NaN or infinite.
    pub fn train_epoch<R: Rng + ?Sized>(
        &mut self,
        model: &mut Mlp,
        split: &Split,
        epoch: usize,
        rng: &mut R,
    ) -> Result<f32> {
        let batches = BatchIterator::shuffled(split.len(), self.config.batch_size, rng);
        let mut total_loss = 0.0;
        let mut num_batches = 0;

        for batch in batches {
            let loss = self.train_step(model, split, &batch);
            if !loss.is_finite() {
                return Err(Error::NonFiniteLoss { epoch });
            }
            total_loss += loss;
            num_batches += 1;
        }

        Ok(if num_batches > 0 {
            total_loss / num_batches as f32
        } else {
            0.0
        })
    }

    /// Evaluate the model on a whole split without updating parameters
    pub fn evaluate(&self, model: &Mlp, split: &Split) -> Result<Evaluation> {
        let logits = model.forward(split.x().view());
        let predictions = argmax_rows(&logits);
        Ok(Evaluation {
            loss: self.loss_fn.loss(&logits, split.y()),
            error: error_rate(&predictions, split.y())?,
            predictions,
        })
    }
}
