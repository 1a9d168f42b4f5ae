//! Optimization algorithms

mod optimizer;
mod sgd;

pub use optimizer::{Optimizer, Parameter};
pub use sgd::SGD;
