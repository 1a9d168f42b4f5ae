//! Width-parameterized model construction

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::mlp::Mlp;
use super::spec::{LayerSpec, ModelSpec};
use crate::config::ValidationError;

/// Builds fresh classifiers whose hidden layers all have the sweep width
///
/// For width `w` and `hidden_layers = h` the stack is
/// `Linear(input, w), Relu, [Linear(w, w), Relu] x (h - 1), Linear(w, output)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelFactory {
    /// Input features (signal length)
    pub input_dim: usize,
    /// Output classes
    pub output_dim: usize,
    /// Number of hidden layers
    pub hidden_layers: usize,
}

impl Default for ModelFactory {
    fn default() -> Self {
        Self {
            input_dim: 40,
            output_dim: 10,
            hidden_layers: 2,
        }
    }
}

impl ModelFactory {
    /// Layer specification for `width`
    pub fn spec(&self, width: usize) -> Result<ModelSpec, ValidationError> {
        if width == 0 {
            return Err(ValidationError::NonPositiveWidth(width));
        }
        if self.hidden_layers == 0 {
            return Err(ValidationError::InvalidDimension {
                name: "hidden_layers",
                value: 0,
            });
        }

        let mut layers = vec![
            LayerSpec::Linear {
                input: self.input_dim,
                output: width,
            },
            LayerSpec::Relu,
        ];
        for _ in 1..self.hidden_layers {
            layers.push(LayerSpec::Linear {
                input: width,
                output: width,
            });
            layers.push(LayerSpec::Relu);
        }
        layers.push(LayerSpec::Linear {
            input: width,
            output: self.output_dim,
        });

        ModelSpec::new(layers)
    }

    /// Build a freshly initialized model for `width`
    pub fn build<R: Rng + ?Sized>(&self, width: usize, rng: &mut R) -> Result<Mlp, ValidationError> {
        Ok(Mlp::from_spec(self.spec(width)?, rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_stack() {
        let spec = ModelFactory::default().spec(100).unwrap();
        assert_eq!(
            spec.layers(),
            &[
                LayerSpec::Linear {
                    input: 40,
                    output: 100
                },
                LayerSpec::Relu,
                LayerSpec::Linear {
                    input: 100,
                    output: 100
                },
                LayerSpec::Relu,
                LayerSpec::Linear {
                    input: 100,
                    output: 10
                },
            ]
        );
    }

    #[test]
    fn test_zero_width_rejected() {
        let err = ModelFactory::default().spec(0).unwrap_err();
        assert!(matches!(err, ValidationError::NonPositiveWidth(0)));
    }

    #[test]
    fn test_single_hidden_layer() {
        let factory = ModelFactory {
            hidden_layers: 1,
            ..Default::default()
        };
        assert_eq!(factory.spec(5).unwrap().layers().len(), 3);
    }

    #[test]
    fn test_build_is_fresh_per_call() {
        let factory = ModelFactory::default();
        let mut rng = StdRng::seed_from_u64(9);
        let a = factory.build(8, &mut rng).unwrap();
        let b = factory.build(8, &mut rng).unwrap();
        assert_ne!(a, b);
    }

    proptest! {
        #[test]
        fn prop_first_hidden_layer_linear_in_width(width in 1usize..512) {
            let spec = ModelFactory::default().spec(width).unwrap();
            prop_assert_eq!(spec.layers()[0].num_parameters(), 41 * width);
            prop_assert_eq!(spec.output_dim(), 10);
            prop_assert_eq!(spec.input_dim(), 40);
        }
    }
}
