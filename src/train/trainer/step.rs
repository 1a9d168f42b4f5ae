//! Single training step

use super::core::Trainer;
use crate::data::Split;
use crate::model::Mlp;

impl Trainer {
    /// Forward, loss, backward and one optimizer step on the rows at `indices`
    ///
    /// Returns the mean batch loss.
    pub fn train_step(&mut self, model: &mut Mlp, split: &Split, indices: &[usize]) -> f32 {
        let x = split.rows(indices);
        let y = split.labels(indices);

        let trace = model.forward_trace(x.view());
        let logits = &trace[trace.len() - 1];
        let (loss, grad) = self.loss_fn.forward(logits, &y);

        let grads = model.backward(&trace, grad);
        let mut params = model.parameters(&grads);
        self.optimizer.step(&mut params);

        loss
    }
}
