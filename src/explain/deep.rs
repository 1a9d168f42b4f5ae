//! DeepLIFT rescale attributions averaged over a background set
//!
//! For an input `x` and one reference row `b`, multipliers are propagated
//! from the logits back to the input: a linear layer multiplies by its weight
//! matrix, a ReLU scales by `Δout / Δin` between `x` and `b` (the local
//! gradient when `Δin` vanishes). The contribution of feature `j` to class
//! `c` is `m[c, j] * (x[j] - b[j])`, and the contributions for one reference
//! sum to `f(x)[c] - f(b)[c]`. Averaging over all references gives scores
//! that sum to `f(x)[c] - E[f(b)][c]`.

use ndarray::{Array1, Array2, Array3, ArrayView1, ArrayView2, Axis, Zip};

use super::batch::ExplainBatch;
use super::record::AttributionRecord;
use crate::data::Split;
use crate::error::{Error, Result};
use crate::model::{Layer, Mlp};

/// Below this input difference a ReLU multiplier falls back to the gradient
const RESCALE_EPSILON: f32 = 1e-6;

/// Additive attribution against a fixed background
///
/// Borrows the model immutably; the background forward pass is computed once.
#[derive(Debug)]
pub struct DeepExplainer<'m> {
    model: &'m Mlp,
    background: Array2<f32>,
    background_trace: Vec<Array2<f32>>,
    expected_value: Array1<f32>,
}

impl<'m> DeepExplainer<'m> {
    /// Prepare an explainer for `model` with `background` rows as references
    pub fn new(model: &'m Mlp, background: Array2<f32>) -> Result<Self> {
        if background.nrows() == 0 {
            return Err(Error::Data("attribution background is empty".into()));
        }
        if background.ncols() != model.input_dim() {
            return Err(Error::ShapeMismatch {
                context: "background features",
                expected: model.input_dim(),
                actual: background.ncols(),
            });
        }

        let background_trace = model.forward_trace(background.view());
        let expected_value = background_trace
            .last()
            .and_then(|logits| logits.mean_axis(Axis(0)))
            .ok_or_else(|| Error::Data("model produced no output".into()))?;

        Ok(Self {
            model,
            background,
            background_trace,
            expected_value,
        })
    }

    /// Mean model output over the background, one value per class
    pub fn expected_value(&self) -> &Array1<f32> {
        &self.expected_value
    }

    /// Number of reference rows
    pub fn background_size(&self) -> usize {
        self.background.nrows()
    }

    /// Attribution scores for every row of `x`, shaped
    /// `(samples, features, classes)`
    pub fn shap_values(&self, x: ArrayView2<'_, f32>) -> Result<Array3<f32>> {
        if x.ncols() != self.model.input_dim() {
            return Err(Error::ShapeMismatch {
                context: "explained features",
                expected: self.model.input_dim(),
                actual: x.ncols(),
            });
        }

        let mut values = Array3::zeros((x.nrows(), x.ncols(), self.model.output_dim()));
        for (row, mut out) in x.outer_iter().zip(values.outer_iter_mut()) {
            out.assign(&self.attribute_row(row)?);
        }
        Ok(values)
    }

    /// Build one record per row of `x`
    ///
    /// `first_index` is the test position of the first row; `labels` and
    /// `predictions` must have one entry per row.
    pub fn attribute(
        &self,
        first_index: usize,
        x: ArrayView2<'_, f32>,
        labels: &[usize],
        predictions: &[usize],
    ) -> Result<Vec<AttributionRecord>> {
        for covered in [labels.len(), predictions.len()] {
            if covered != x.nrows() {
                return Err(Error::BatchMismatch {
                    samples: x.nrows(),
                    labels: covered,
                });
            }
        }

        let scores = self.shap_values(x)?;
        let logits = self.model.forward(x);
        let records = scores
            .outer_iter()
            .zip(logits.outer_iter())
            .enumerate()
            .map(|(i, (scores, logits))| AttributionRecord {
                sample_index: first_index + i,
                true_label: labels[i],
                predicted_label: predictions[i],
                logits: logits.to_owned(),
                expected_value: self.expected_value.clone(),
                scores: scores.to_owned(),
            })
            .collect();
        Ok(records)
    }

    /// Attribute the selected batch of `split`
    ///
    /// `predictions` holds the model's prediction for every example of the
    /// split, as recorded after training.
    pub fn explain_batch(
        &self,
        split: &Split,
        batch: &ExplainBatch,
        predictions: &[usize],
    ) -> Result<Vec<AttributionRecord>> {
        let positions = batch.positions(split.len())?;
        let predictions = predictions
            .get(positions.clone())
            .ok_or(Error::BatchMismatch {
                samples: positions.len(),
                labels: predictions.len().saturating_sub(positions.start),
            })?;
        let indices: Vec<usize> = positions.clone().collect();
        let x = split.rows(&indices);
        self.attribute(positions.start, x.view(), &split.y()[positions], predictions)
    }

    /// Scores of one input, `(features, classes)`
    fn attribute_row(&self, x: ArrayView1<'_, f32>) -> Result<Array2<f32>> {
        let refs = self.background.nrows();
        let classes = self.model.output_dim();
        let trace = self.model.forward_trace(x.insert_axis(Axis(0)));

        // multipliers[k, c, j]: d logit c / d unit j for reference k
        let mut multipliers =
            Array3::from_shape_fn((refs, classes, classes), |(_, c, j)| f32::from(u8::from(c == j)));

        for (i, layer) in self.model.layers().iter().enumerate().rev() {
            match layer {
                Layer::Linear(linear) => {
                    let (_, _, width) = multipliers.dim();
                    let flat = multipliers.into_shape_with_order((refs * classes, width))?;
                    let propagated = flat.dot(linear.weight());
                    let inputs = propagated.ncols();
                    multipliers = propagated.into_shape_with_order((refs, classes, inputs))?;
                }
                Layer::Relu => {
                    let ratios = rescale_ratios(trace[i].row(0), &self.background_trace[i]);
                    multipliers *= &ratios.insert_axis(Axis(1));
                }
            }
        }

        let delta = &x.insert_axis(Axis(0)) - &self.background;
        multipliers *= &delta.insert_axis(Axis(1));
        let mean = multipliers
            .mean_axis(Axis(0))
            .ok_or_else(|| Error::Data("attribution background is empty".into()))?;
        Ok(mean.reversed_axes())
    }
}

/// DeepLIFT rescale multipliers of a ReLU, `(references, units)`
fn rescale_ratios(input: ArrayView1<'_, f32>, references: &Array2<f32>) -> Array2<f32> {
    let relu = |v: f32| v.max(0.0);
    let mut ratios = Array2::zeros(references.raw_dim());
    Zip::from(&mut ratios)
        .and(references)
        .and_broadcast(&input)
        .for_each(|r, &z_ref, &z| {
            let dz = z - z_ref;
            *r = if dz.abs() > RESCALE_EPSILON {
                (relu(z) - relu(z_ref)) / dz
            } else if z > 0.0 {
                1.0
            } else {
                0.0
            };
        });
    ratios
}
