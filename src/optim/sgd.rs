//! Stochastic Gradient Descent optimizer

use ndarray::{ArrayD, Zip};

use super::{Optimizer, Parameter};

/// SGD optimizer with optional momentum
///
/// With momentum `μ > 0` the update is `v = μ v - η g; θ = θ + v`, which
/// matches the heavy-ball formulation `v = μ v + g; θ = θ - η v` for a fixed
/// learning rate.
pub struct SGD {
    lr: f32,
    momentum: f32,
    velocities: Vec<Option<ArrayD<f32>>>,
}

impl SGD {
    /// Create a new SGD optimizer
    pub fn new(lr: f32, momentum: f32) -> Self {
        Self {
            lr,
            momentum,
            velocities: Vec::new(),
        }
    }

    /// Momentum coefficient
    pub fn momentum(&self) -> f32 {
        self.momentum
    }

    /// Initialize velocities if needed
    fn ensure_velocities(&mut self, len: usize) {
        if self.velocities.len() != len {
            self.velocities = (0..len).map(|_| None).collect();
        }
    }
}

impl Optimizer for SGD {
    fn step(&mut self, params: &mut [Parameter<'_>]) {
        self.ensure_velocities(params.len());
        let (lr, momentum) = (self.lr, self.momentum);

        for (param, slot) in params.iter_mut().zip(self.velocities.iter_mut()) {
            if momentum > 0.0 {
                let velocity = slot.get_or_insert_with(|| ArrayD::zeros(param.grad.raw_dim()));

                // v = momentum * v - lr * grad
                Zip::from(&mut *velocity)
                    .and(&param.grad)
                    .for_each(|v, &g| *v = momentum * *v - lr * g);

                // param = param + v
                Zip::from(&mut param.value)
                    .and(&*velocity)
                    .for_each(|p, &v| *p += v);
            } else {
                // Simple SGD: param -= lr * grad
                Zip::from(&mut param.value)
                    .and(&param.grad)
                    .for_each(|p, &g| *p -= lr * g);
            }
        }
    }

    fn lr(&self) -> f32 {
        self.lr
    }

    fn set_lr(&mut self, lr: f32) {
        self.lr = lr;
    }
}
