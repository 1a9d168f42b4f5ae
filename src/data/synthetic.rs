//! Synthetic 1-D digit signals
//!
//! Each example starts from one of ten 12-point digit templates, is padded,
//! stretched, scaled, circularly translated, corrupted with correlated and
//! independent Gaussian noise, sheared and finally resampled to a fixed
//! length. The generator is fully determined by [`SignalArgs::seed`].

use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::dataset::{Dataset, Split};
use super::DatasetProvider;
use crate::error::{Error, Result};

/// Raw digit outlines, one row per class
const TEMPLATES: [[f32; 12]; 10] = [
    [5.0, 6.0, 6.5, 6.75, 7.0, 7.0, 7.0, 7.0, 6.75, 6.5, 6.0, 5.0],
    [5.0, 3.0, 3.0, 3.4, 3.8, 4.2, 4.6, 5.0, 5.4, 5.8, 5.0, 5.0],
    [5.0, 6.0, 6.5, 6.5, 6.0, 5.25, 4.75, 4.0, 3.5, 3.5, 4.0, 5.0],
    [5.0, 6.0, 6.5, 6.5, 6.0, 5.0, 5.0, 6.0, 6.5, 6.5, 6.0, 5.0],
    [5.0, 4.4, 3.8, 3.2, 2.6, 2.6, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0],
    [5.0, 3.0, 3.0, 3.0, 3.0, 5.0, 6.0, 6.5, 6.5, 6.0, 4.5, 5.0],
    [5.0, 4.0, 3.5, 3.25, 3.0, 3.0, 3.0, 3.0, 3.25, 3.5, 4.0, 5.0],
    [5.0, 7.0, 7.0, 6.6, 6.2, 5.8, 5.4, 5.0, 4.6, 4.2, 5.0, 5.0],
    [5.0, 4.0, 3.5, 3.5, 4.0, 5.0, 5.0, 4.0, 3.5, 3.5, 4.0, 5.0],
    [5.0, 4.0, 3.5, 3.5, 4.0, 5.0, 5.0, 5.0, 5.0, 4.7, 4.3, 5.0],
];

/// Number of classes produced by the template generator
pub const NUM_CLASSES: usize = TEMPLATES.len();

/// Standard deviation of the smoothing kernel applied to correlated noise
const CORR_NOISE_SIGMA: f32 = 2.0;

/// Generator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalArgs {
    /// Total number of examples before the split
    pub num_samples: usize,
    /// Fraction of examples assigned to the training split
    pub train_split: f64,
    /// Scale of the smoothed (correlated) noise
    pub corr_noise_scale: f32,
    /// Scale of the independent per-sample noise
    pub iid_noise_scale: f32,
    /// Inclusive range of zero padding appended to the template
    pub padding: (usize, usize),
    /// Relative amplitude jitter
    pub scale_coeff: f32,
    /// Maximum circular shift, in samples of the padded signal
    pub max_translation: usize,
    /// Slope jitter of the linear shear
    pub shear_scale: f32,
    /// Length of every generated signal
    pub final_seq_length: usize,
    /// Seed for every random draw of the generator
    pub seed: u64,
}

impl Default for SignalArgs {
    fn default() -> Self {
        Self {
            num_samples: 8000,
            train_split: 0.5,
            corr_noise_scale: 0.25,
            iid_noise_scale: 2e-2,
            padding: (36, 60),
            scale_coeff: 0.4,
            max_translation: 48,
            shear_scale: 0.75,
            final_seq_length: 40,
            seed: 42,
        }
    }
}

/// Template-based signal generator
#[derive(Debug, Clone)]
pub struct SyntheticSignals {
    args: SignalArgs,
}

impl SyntheticSignals {
    /// Create a generator
    pub fn new(args: SignalArgs) -> Self {
        Self { args }
    }

    /// Generator configuration
    pub fn args(&self) -> &SignalArgs {
        &self.args
    }

    fn generate(&self) -> Result<Dataset> {
        let args = &self.args;
        let n_train = (args.num_samples as f64 * args.train_split).round() as usize;
        if n_train == 0 || n_train >= args.num_samples {
            return Err(Error::Data(format!(
                "train_split {} of {} samples leaves an empty split",
                args.train_split, args.num_samples
            )));
        }
        if args.final_seq_length < 2 {
            return Err(Error::Data(format!(
                "final_seq_length must be at least 2, got {}",
                args.final_seq_length
            )));
        }

        let mut rng = StdRng::seed_from_u64(args.seed);
        let templates = normalized_templates();

        let mut labels: Vec<usize> = (0..args.num_samples).map(|i| i % NUM_CLASSES).collect();
        labels.shuffle(&mut rng);

        let len = args.final_seq_length;
        let mut x = Array2::<f32>::zeros((args.num_samples, len));
        for (row, &label) in labels.iter().enumerate() {
            let signal = transform(&templates[label], args, &mut rng);
            x.row_mut(row).assign(&Array1::from(signal));
        }

        let train = Split::new(
            x.slice(ndarray::s![..n_train, ..]).to_owned(),
            labels[..n_train].to_vec(),
        )?;
        let test = Split::new(
            x.slice(ndarray::s![n_train.., ..]).to_owned(),
            labels[n_train..].to_vec(),
        )?;
        let t = Array1::linspace(-1.0, 1.0, len);

        info!(
            train = train.len(),
            test = test.len(),
            length = len,
            "Generated synthetic signals"
        );
        Dataset::new(train, test, t, NUM_CLASSES)
    }
}

impl DatasetProvider for SyntheticSignals {
    fn provide(&self) -> Result<Dataset> {
        self.generate()
    }

    fn name(&self) -> &str {
        "synthetic"
    }
}

/// Whiten each template and shift it so the signal starts at zero
fn normalized_templates() -> Vec<Vec<f32>> {
    TEMPLATES
        .iter()
        .map(|row| {
            let n = row.len() as f32;
            let mean = row.iter().sum::<f32>() / n;
            let var = row.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / n;
            let std = var.sqrt().max(1e-8);
            let whitened: Vec<f32> = row.iter().map(|v| (v - mean) / std).collect();
            let first = whitened[0];
            whitened.iter().map(|v| v - first).collect()
        })
        .collect()
}

fn transform(template: &[f32], args: &SignalArgs, rng: &mut StdRng) -> Vec<f32> {
    let (pad_lo, pad_hi) = args.padding;
    let pad = rng.random_range(pad_lo..=pad_hi.max(pad_lo));
    let mut x: Vec<f32> = template
        .iter()
        .copied()
        .chain(std::iter::repeat(0.0).take(pad))
        .collect();

    x = interpolate(&x, template.len() + pad_hi.max(pad_lo));

    let scale = 1.0 + args.scale_coeff * (rng.random::<f32>() - 0.5);
    x.iter_mut().for_each(|v| *v *= scale);

    let shift = (rng.random::<f32>() * args.max_translation as f32) as usize;
    let len = x.len();
    x.rotate_right(shift % len);

    let corr = smooth(
        &(0..len)
            .map(|_| sample_normal(rng) * args.corr_noise_scale)
            .collect::<Vec<_>>(),
        CORR_NOISE_SIGMA,
    );
    for (v, c) in x.iter_mut().zip(&corr) {
        *v += c + sample_normal(rng) * args.iid_noise_scale;
    }

    let coeff = args.shear_scale * (rng.random::<f32>() - 0.5);
    for (i, v) in x.iter_mut().enumerate() {
        *v += coeff * (i as f32 / (len - 1) as f32 - 0.5);
    }

    interpolate(&x, args.final_seq_length)
}

/// Linear resampling to `n` points keeping both endpoints
fn interpolate(x: &[f32], n: usize) -> Vec<f32> {
    if x.len() < 2 || n < 2 {
        return vec![x.first().copied().unwrap_or(0.0); n];
    }
    let last = (x.len() - 1) as f32;
    (0..n)
        .map(|i| {
            let pos = i as f32 * last / (n - 1) as f32;
            let lo = pos.floor() as usize;
            let hi = (lo + 1).min(x.len() - 1);
            let frac = pos - lo as f32;
            x[lo] * (1.0 - frac) + x[hi] * frac
        })
        .collect()
}

/// Gaussian smoothing with clamped borders
fn smooth(x: &[f32], sigma: f32) -> Vec<f32> {
    let radius = (4.0 * sigma).ceil() as isize;
    let kernel: Vec<f32> = (-radius..=radius)
        .map(|k| (-(k as f32).powi(2) / (2.0 * sigma * sigma)).exp())
        .collect();
    let norm: f32 = kernel.iter().sum();
    let last = x.len() as isize - 1;
    (0..x.len() as isize)
        .map(|i| {
            kernel
                .iter()
                .zip(-radius..=radius)
                .map(|(w, k)| w * x[(i + k).clamp(0, last) as usize])
                .sum::<f32>()
                / norm
        })
        .collect()
}

/// Box-Muller standard normal draw
fn sample_normal(rng: &mut StdRng) -> f32 {
    let u1: f64 = rng.random::<f64>().max(1e-10);
    let u2: f64 = rng.random::<f64>();
    ((-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn small_args() -> SignalArgs {
        SignalArgs {
            num_samples: 80,
            ..Default::default()
        }
    }

    #[test]
    fn test_generate_shapes() {
        let ds = SyntheticSignals::new(small_args()).provide().unwrap();
        assert_eq!(ds.train().len(), 40);
        assert_eq!(ds.test().len(), 40);
        assert_eq!(ds.num_features(), 40);
        assert_eq!(ds.t().len(), 40);
        assert_eq!(ds.num_classes(), 10);
    }

    #[test]
    fn test_generate_is_deterministic() {
        let a = SyntheticSignals::new(small_args()).provide().unwrap();
        let b = SyntheticSignals::new(small_args()).provide().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_seed_changes_signals() {
        let a = SyntheticSignals::new(small_args()).provide().unwrap();
        let b = SyntheticSignals::new(SignalArgs {
            seed: 7,
            ..small_args()
        })
        .provide()
        .unwrap();
        assert_ne!(a.train().x(), b.train().x());
    }

    #[test]
    fn test_balanced_labels() {
        let ds = SyntheticSignals::new(small_args()).provide().unwrap();
        let mut counts = [0usize; NUM_CLASSES];
        for &y in ds.train().y().iter().chain(ds.test().y()) {
            counts[y] += 1;
        }
        assert!(counts.iter().all(|&c| c == 8));
    }

    #[test]
    fn test_degenerate_split_rejected() {
        let err = SyntheticSignals::new(SignalArgs {
            num_samples: 10,
            train_split: 1.0,
            ..Default::default()
        })
        .provide()
        .unwrap_err();
        assert!(matches!(err, Error::Data(_)));
    }

    #[test]
    fn test_templates_start_at_zero() {
        for t in normalized_templates() {
            assert_abs_diff_eq!(t[0], 0.0);
        }
    }

    #[test]
    fn test_interpolate_keeps_endpoints() {
        let out = interpolate(&[0.0, 1.0, 4.0], 5);
        assert_eq!(out.len(), 5);
        assert_abs_diff_eq!(out[0], 0.0);
        assert_abs_diff_eq!(out[2], 1.0);
        assert_abs_diff_eq!(out[4], 4.0);
    }

    #[test]
    fn test_smooth_preserves_constant() {
        let out = smooth(&[2.0; 16], 2.0);
        for v in out {
            assert_abs_diff_eq!(v, 2.0, epsilon = 1e-5);
        }
    }
}
