//! Error types for descenso

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ValidationError;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the sweep-and-attribute pipeline
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration rejected before any training starts
    #[error("Invalid config: {0}")]
    InvalidConfig(#[from] ValidationError),

    /// Configuration could not be read or parsed
    #[error("Config error: {0}")]
    ConfigError(String),

    /// Array shapes or lengths disagree
    #[error("Shape mismatch in {context}: expected {expected}, got {actual}")]
    ShapeMismatch {
        /// Where the mismatch was detected
        context: &'static str,
        /// Expected length or dimension
        expected: usize,
        /// Observed length or dimension
        actual: usize,
    },

    /// Array could not be reshaped
    #[error("Array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// Dataset content violates an invariant
    #[error("Data error: {0}")]
    Data(String),

    /// Label or prediction count does not cover the explained batch
    #[error("Explained batch has {samples} samples but {labels} labels/predictions are available")]
    BatchMismatch {
        /// Number of samples in the explained batch
        samples: usize,
        /// Number of labels or predictions that cover it
        labels: usize,
    },

    /// Training diverged
    #[error("Non-finite training loss at epoch {epoch}")]
    NonFiniteLoss {
        /// Epoch in which the loss became NaN or infinite
        epoch: usize,
    },

    /// A label cannot be written into the single-digit file-name grammar
    #[error("Label {0} cannot be encoded in an artifact file name (must be 0-9)")]
    LabelNotEncodable(usize),

    /// A file in a bucket directory does not follow the artifact grammar
    #[error("Malformed artifact file name: {}", .0.display())]
    MalformedArtifactName(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML (de)serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}
