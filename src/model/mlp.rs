//! Feed-forward classifier built from a [`ModelSpec`]

use ndarray::{Array1, Array2, ArrayView2, Axis, Zip};
use rand::Rng;

use super::init::he_uniform;
use super::spec::{LayerSpec, ModelSpec};
use crate::optim::Parameter;

/// Affine layer holding `weight` as `(output, input)` and `bias` as `(output,)`
#[derive(Debug, Clone, PartialEq)]
pub struct Linear {
    weight: Array2<f32>,
    bias: Array1<f32>,
}

impl Linear {
    /// Create a layer from explicit parameters
    ///
    /// # Panics
    ///
    /// Panics if `bias.len() != weight.nrows()`.
    pub fn from_parts(weight: Array2<f32>, bias: Array1<f32>) -> Self {
        assert_eq!(weight.nrows(), bias.len(), "bias must match output rows");
        Self { weight, bias }
    }

    /// Weight matrix, `(output, input)`
    pub fn weight(&self) -> &Array2<f32> {
        &self.weight
    }

    /// Bias vector
    pub fn bias(&self) -> &Array1<f32> {
        &self.bias
    }

    /// Apply to a batch of row vectors
    pub fn forward(&self, x: ArrayView2<'_, f32>) -> Array2<f32> {
        x.dot(&self.weight.t()) + &self.bias
    }
}

/// Materialized layer
#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    /// Affine transform
    Linear(Linear),
    /// Rectified linear unit
    Relu,
}

impl Layer {
    fn forward(&self, x: ArrayView2<'_, f32>) -> Array2<f32> {
        match self {
            Layer::Linear(linear) => linear.forward(x),
            // NaN passes through so divergence stays visible
            Layer::Relu => x.mapv(|v| if v < 0.0 { 0.0 } else { v }),
        }
    }
}

/// Gradient of one linear layer
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGrad {
    /// d loss / d weight
    pub weight: Array2<f32>,
    /// d loss / d bias
    pub bias: Array1<f32>,
}

/// Gradients for every layer; `None` for parameter-free layers
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients {
    layers: Vec<Option<LinearGrad>>,
}

impl Gradients {
    /// Per-layer gradients in layer order
    pub fn layers(&self) -> &[Option<LinearGrad>] {
        &self.layers
    }
}

/// Multi-layer perceptron
///
/// Weights are owned by the instance; every [`Mlp::from_spec`] call draws a
/// fresh initialization.
#[derive(Debug, Clone, PartialEq)]
pub struct Mlp {
    spec: ModelSpec,
    layers: Vec<Layer>,
}

impl Mlp {
    /// Build and He-initialize a model; biases start at zero
    pub fn from_spec<R: Rng + ?Sized>(spec: ModelSpec, rng: &mut R) -> Self {
        let layers = spec
            .layers()
            .iter()
            .map(|layer| match *layer {
                LayerSpec::Linear { input, output } => Layer::Linear(Linear {
                    weight: he_uniform(output, input, rng),
                    bias: Array1::zeros(output),
                }),
                LayerSpec::Relu => Layer::Relu,
            })
            .collect();
        Self { spec, layers }
    }

    /// Layer specification this model was built from
    pub fn spec(&self) -> &ModelSpec {
        &self.spec
    }

    /// Materialized layers
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Replace the parameters of linear layer `index` (for fixtures and imports)
    pub fn set_linear(&mut self, index: usize, linear: Linear) -> bool {
        match self.layers.get_mut(index) {
            Some(Layer::Linear(slot)) if slot.weight.dim() == linear.weight.dim() => {
                *slot = linear;
                true
            }
            _ => false,
        }
    }

    /// Input features
    pub fn input_dim(&self) -> usize {
        self.spec.input_dim()
    }

    /// Output classes
    pub fn output_dim(&self) -> usize {
        self.spec.output_dim()
    }

    /// Total trainable parameters
    pub fn num_parameters(&self) -> usize {
        self.spec.num_parameters()
    }

    /// Raw class scores (logits) for a batch, `(batch, classes)`
    pub fn forward(&self, x: ArrayView2<'_, f32>) -> Array2<f32> {
        let mut out = x.to_owned();
        for layer in &self.layers {
            out = layer.forward(out.view());
        }
        out
    }

    /// Predicted class (first maximal logit) per row
    pub fn predict(&self, x: ArrayView2<'_, f32>) -> Vec<usize> {
        argmax_rows(&self.forward(x))
    }

    /// Forward pass keeping every intermediate activation
    ///
    /// `trace[0]` is the input and `trace[i + 1]` the output of layer `i`.
    pub fn forward_trace(&self, x: ArrayView2<'_, f32>) -> Vec<Array2<f32>> {
        let mut trace = Vec::with_capacity(self.layers.len() + 1);
        trace.push(x.to_owned());
        for layer in &self.layers {
            let next = layer.forward(trace[trace.len() - 1].view());
            trace.push(next);
        }
        trace
    }

    /// Backpropagate `grad_output` (d loss / d logits) through a recorded trace
    pub fn backward(&self, trace: &[Array2<f32>], grad_output: Array2<f32>) -> Gradients {
        let mut grads: Vec<Option<LinearGrad>> = vec![None; self.layers.len()];
        let mut grad = grad_output;

        for (i, layer) in self.layers.iter().enumerate().rev() {
            let input = &trace[i];
            match layer {
                Layer::Linear(linear) => {
                    grads[i] = Some(LinearGrad {
                        weight: grad.t().dot(input),
                        bias: grad.sum_axis(Axis(0)),
                    });
                    if i > 0 {
                        grad = grad.dot(&linear.weight);
                    }
                }
                Layer::Relu => {
                    Zip::from(&mut grad).and(input).for_each(|g, &z| {
                        if z <= 0.0 {
                            *g = 0.0;
                        }
                    });
                }
            }
        }

        Gradients { layers: grads }
    }

    /// Pair each trainable tensor with its gradient, in a stable order
    pub fn parameters<'a>(&'a mut self, grads: &'a Gradients) -> Vec<Parameter<'a>> {
        let mut params = Vec::new();
        for (layer, grad) in self.layers.iter_mut().zip(&grads.layers) {
            if let (Layer::Linear(linear), Some(grad)) = (layer, grad) {
                params.push(Parameter {
                    value: linear.weight.view_mut().into_dyn(),
                    grad: grad.weight.view().into_dyn(),
                });
                params.push(Parameter {
                    value: linear.bias.view_mut().into_dyn(),
                    grad: grad.bias.view().into_dyn(),
                });
            }
        }
        params
    }
}

/// Index of the first maximum in each row
pub fn argmax_rows(scores: &Array2<f32>) -> Vec<usize> {
    scores
        .outer_iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .fold((0, f32::NEG_INFINITY), |(best, max), (i, &v)| {
                    if v > max {
                        (i, v)
                    } else {
                        (best, max)
                    }
                })
                .0
        })
        .collect()
}
