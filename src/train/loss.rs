//! Cross Entropy Loss for classification

use ndarray::{Array1, Array2, ArrayView1, Axis};

/// Softmax cross entropy over integer class targets
///
/// L = mean_i -log(softmax(logits_i)[y_i])
///
/// # Example
///
/// ```
/// use descenso::train::CrossEntropyLoss;
/// use ndarray::arr2;
///
/// let logits = arr2(&[[2.0, 1.0, 0.5]]);
/// let (loss, grad) = CrossEntropyLoss.forward(&logits, &[0]);
/// assert!(loss > 0.0);
/// assert!(grad[[0, 0]] < 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossEntropyLoss;

impl CrossEntropyLoss {
    /// Compute softmax: exp(x_i) / sum(exp(x_j))
    pub(crate) fn softmax(x: ArrayView1<'_, f32>) -> Array1<f32> {
        let max = x.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b));
        let exp_x: Array1<f32> = x.mapv(|v| (v - max).exp());
        let sum: f32 = exp_x.sum();
        exp_x / sum
    }

    /// Negative log-softmax of `target`: logsumexp(x) - x[target]
    pub(crate) fn neg_log_softmax(x: ArrayView1<'_, f32>, target: usize) -> f32 {
        let max = x.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b));
        let sum: f32 = x.iter().map(|&v| (v - max).exp()).sum();
        max + sum.ln() - x[target]
    }

    /// Row-wise softmax of a batch of logits
    pub fn probabilities(logits: &Array2<f32>) -> Array2<f32> {
        let mut probs = logits.clone();
        for mut row in probs.axis_iter_mut(Axis(0)) {
            let p = Self::softmax(row.view());
            row.assign(&p);
        }
        probs
    }

    /// Mean loss over the batch, without gradient
    pub fn loss(&self, logits: &Array2<f32>, targets: &[usize]) -> f32 {
        self.forward(logits, targets).0
    }

    /// Mean loss and its gradient with respect to the logits
    ///
    /// d(CE)/d(logits) = (softmax - onehot) / batch
    pub fn forward(&self, logits: &Array2<f32>, targets: &[usize]) -> (f32, Array2<f32>) {
        let batch = logits.nrows().max(1) as f32;
        let mut grad = Self::probabilities(logits);

        let mut total = 0.0f32;
        for ((mut row, logits_row), &target) in grad
            .axis_iter_mut(Axis(0))
            .zip(logits.axis_iter(Axis(0)))
            .zip(targets)
        {
            total += Self::neg_log_softmax(logits_row, target);
            row[target] -= 1.0;
        }
        grad.mapv_inplace(|g| g / batch);

        (total / batch, grad)
    }

    /// Name of the loss function
    pub fn name(&self) -> &'static str {
        "CrossEntropy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{arr1, arr2};

    #[test]
    fn test_softmax() {
        let x = arr1(&[1.0, 2.0, 3.0]);
        let probs = CrossEntropyLoss::softmax(x.view());

        // Probabilities should sum to 1
        let sum: f32 = probs.sum();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-5);

        // All probabilities should be in [0, 1]
        for &p in &probs {
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn test_softmax_large_logits_stable() {
        let probs = CrossEntropyLoss::softmax(arr1(&[1000.0, 1000.0]).view());
        assert_relative_eq!(probs[0], 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_uniform_logits_loss_is_log_classes() {
        let logits = Array2::zeros((4, 10));
        let loss = CrossEntropyLoss.loss(&logits, &[0, 3, 5, 9]);
        assert_relative_eq!(loss, 10f32.ln(), epsilon = 1e-5);
    }

    #[test]
    fn test_saturated_logits_loss_is_not_capped() {
        let logits = arr2(&[[200.0, 0.0]]);
        let (loss, grad) = CrossEntropyLoss.forward(&logits, &[1]);
        assert_relative_eq!(loss, 200.0, epsilon = 1e-3);
        assert_relative_eq!(grad[[0, 1]], -1.0, epsilon = 1e-6);
        assert_relative_eq!(grad[[0, 0]], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_gradient_rows_sum_to_zero() {
        let logits = arr2(&[[2.0, 1.0, 0.5], [0.1, 0.2, 0.3]]);
        let (_, grad) = CrossEntropyLoss.forward(&logits, &[0, 2]);
        for row in grad.outer_iter() {
            assert_relative_eq!(row.sum(), 0.0, epsilon = 1e-6);
        }
        assert!(grad[[0, 0]] < 0.0);
        assert!(grad[[1, 2]] < 0.0);
    }

    #[test]
    fn test_gradient_matches_finite_difference() {
        let logits = arr2(&[[0.3, -0.2, 1.1]]);
        let (_, grad) = CrossEntropyLoss.forward(&logits, &[1]);
        let eps = 1e-3;
        let mut plus = logits.clone();
        plus[[0, 2]] += eps;
        let mut minus = logits.clone();
        minus[[0, 2]] -= eps;
        let numeric =
            (CrossEntropyLoss.loss(&plus, &[1]) - CrossEntropyLoss.loss(&minus, &[1])) / (2.0 * eps);
        assert_relative_eq!(grad[[0, 2]], numeric, epsilon = 1e-3);
    }
}
