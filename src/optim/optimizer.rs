//! Optimizer trait

use ndarray::{ArrayViewD, ArrayViewMutD};

/// A trainable tensor paired with its gradient
pub struct Parameter<'a> {
    /// Current value, updated in place
    pub value: ArrayViewMutD<'a, f32>,
    /// Gradient of the loss with respect to `value`
    pub grad: ArrayViewD<'a, f32>,
}

/// Trait for optimization algorithms
///
/// Parameters must be passed in the same order on every call; stateful
/// optimizers key their buffers by position.
pub trait Optimizer {
    /// Perform a single optimization step
    fn step(&mut self, params: &mut [Parameter<'_>]);

    /// Get learning rate
    fn lr(&self) -> f32;

    /// Set learning rate
    fn set_lr(&mut self, lr: f32);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, Zip};

    /// Minimal optimizer implementation for testing the trait contract
    struct TestOptimizer {
        learning_rate: f32,
    }

    impl Optimizer for TestOptimizer {
        fn step(&mut self, params: &mut [Parameter<'_>]) {
            for p in params.iter_mut() {
                Zip::from(&mut p.value)
                    .and(&p.grad)
                    .for_each(|v, &g| *v -= self.learning_rate * g);
            }
        }

        fn lr(&self) -> f32 {
            self.learning_rate
        }

        fn set_lr(&mut self, lr: f32) {
            self.learning_rate = lr;
        }
    }

    #[test]
    fn test_optimizer_step() {
        let mut opt = TestOptimizer { learning_rate: 0.1 };
        let mut value = arr1(&[1.0, 2.0, 3.0]);
        let grad = arr1(&[0.5, 1.0, 1.5]);

        opt.step(&mut [Parameter {
            value: value.view_mut().into_dyn(),
            grad: grad.view().into_dyn(),
        }]);

        for (v, expected) in value.iter().zip([0.95, 1.9, 2.85]) {
            assert!((v - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_optimizer_set_lr() {
        let mut opt = TestOptimizer { learning_rate: 0.1 };
        opt.set_lr(0.01);
        assert_eq!(opt.lr(), 0.01);
    }
}
