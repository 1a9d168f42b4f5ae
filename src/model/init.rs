//! Weight initialization

use ndarray::Array2;
use rand::Rng;

/// He (Kaiming) uniform initialization for a layer followed by a ReLU
///
/// Draws from `U(-b, b)` with `b = sqrt(6 / fan_in)`, giving weight variance
/// `2 / fan_in`.
pub fn he_uniform<R: Rng + ?Sized>(fan_out: usize, fan_in: usize, rng: &mut R) -> Array2<f32> {
    let bound = (6.0 / fan_in.max(1) as f32).sqrt();
    Array2::from_shape_fn((fan_out, fan_in), |_| rng.random_range(-bound..bound))
}
