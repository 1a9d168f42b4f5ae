//! Statically validated layer specifications

use serde::{Deserialize, Serialize};

use crate::config::ValidationError;

/// One entry of a layer stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LayerSpec {
    /// Affine transform `y = W x + b`
    Linear {
        /// Input features
        input: usize,
        /// Output features
        output: usize,
    },
    /// Rectified linear unit
    Relu,
}

impl LayerSpec {
    /// Number of trainable parameters
    pub fn num_parameters(&self) -> usize {
        match *self {
            LayerSpec::Linear { input, output } => (input + 1) * output,
            LayerSpec::Relu => 0,
        }
    }
}

/// Ordered, validated layer stack
///
/// A valid stack starts and ends with a `Linear`, chains every `Linear` input to
/// the previous `Linear` output, has no zero dimensions and never places two
/// `Relu` layers next to each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LayerSpec>", into = "Vec<LayerSpec>")]
pub struct ModelSpec {
    layers: Vec<LayerSpec>,
}

impl ModelSpec {
    /// Validate and wrap a layer list
    pub fn new(layers: Vec<LayerSpec>) -> Result<Self, ValidationError> {
        let invalid = |msg: String| Err(ValidationError::InvalidLayerSpec(msg));

        match (layers.first(), layers.last()) {
            (Some(LayerSpec::Linear { .. }), Some(LayerSpec::Linear { .. })) => {}
            (None, _) => return invalid("layer stack is empty".into()),
            _ => return invalid("layer stack must start and end with a linear layer".into()),
        }

        let mut previous_output: Option<usize> = None;
        let mut previous_relu = false;
        for (i, layer) in layers.iter().enumerate() {
            match *layer {
                LayerSpec::Linear { input, output } => {
                    if input == 0 || output == 0 {
                        return invalid(format!("layer {i} has a zero dimension"));
                    }
                    if let Some(prev) = previous_output {
                        if prev != input {
                            return invalid(format!(
                                "layer {i} expects {input} inputs but receives {prev}"
                            ));
                        }
                    }
                    previous_output = Some(output);
                    previous_relu = false;
                }
                LayerSpec::Relu => {
                    if previous_relu {
                        return invalid(format!("layer {i} repeats a relu"));
                    }
                    previous_relu = true;
                }
            }
        }

        Ok(Self { layers })
    }

    /// Layers in evaluation order
    pub fn layers(&self) -> &[LayerSpec] {
        &self.layers
    }

    /// Input features of the first layer
    pub fn input_dim(&self) -> usize {
        match self.layers.first() {
            Some(LayerSpec::Linear { input, .. }) => *input,
            _ => 0,
        }
    }

    /// Output features of the last layer
    pub fn output_dim(&self) -> usize {
        match self.layers.last() {
            Some(LayerSpec::Linear { output, .. }) => *output,
            _ => 0,
        }
    }

    /// Total trainable parameters
    pub fn num_parameters(&self) -> usize {
        self.layers.iter().map(LayerSpec::num_parameters).sum()
    }
}

impl TryFrom<Vec<LayerSpec>> for ModelSpec {
    type Error = ValidationError;

    fn try_from(layers: Vec<LayerSpec>) -> Result<Self, Self::Error> {
        Self::new(layers)
    }
}

impl From<ModelSpec> for Vec<LayerSpec> {
    fn from(spec: ModelSpec) -> Self {
        spec.layers
    }
}
