//! Validation error types
//!
//! Defines all validation error variants for experiment specifications.

/// Validation error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Width list cannot be empty")]
    EmptyWidths,

    #[error("Invalid hidden width: {0} (must be > 0)")]
    NonPositiveWidth(usize),

    #[error("Widths must be strictly ascending: {previous} is followed by {next}")]
    WidthsNotAscending { previous: usize, next: usize },

    #[error("Start index {start} is out of range for {len} widths")]
    StartIndexOutOfRange { start: usize, len: usize },

    #[error("Invalid layer specification: {0}")]
    InvalidLayerSpec(String),

    #[error("Invalid {name}: {value} (must be > 0)")]
    InvalidDimension { name: &'static str, value: usize },

    #[error("Model {name} is {model} but the dataset provides {data}")]
    DimensionMismatch {
        name: &'static str,
        model: usize,
        data: usize,
    },

    #[error("Invalid learning rate: {0} (must be > 0.0 and <= 1.0)")]
    InvalidLearningRate(f32),

    #[error("Invalid momentum: {0} (must be in [0.0, 1.0))")]
    InvalidMomentum(f32),

    #[error("Invalid batch size: {0} (must be > 0)")]
    InvalidBatchSize(usize),

    #[error("Invalid epochs: {0} (must be > 0)")]
    InvalidEpochs(usize),

    #[error("Invalid {name}: {value} (must be > 0)")]
    InvalidCadence { name: &'static str, value: usize },

    #[error("Invalid sample count: {0} (must be >= 2)")]
    InvalidSampleCount(usize),

    #[error("Invalid train split: {0} (must be in (0.0, 1.0))")]
    InvalidTrainSplit(f64),

    #[error("Invalid {name}: {value} (must be finite and >= 0.0)")]
    InvalidNoiseScale { name: &'static str, value: f32 },

    #[error("Invalid padding range: {min}..={max}")]
    InvalidPadding { min: usize, max: usize },

    #[error("Invalid label noise probability: {0} (must be in [0.0, 1.0])")]
    InvalidNoiseProbability(f64),

    #[error("Invalid explain batch size: {0} (must be > 0)")]
    InvalidExplainBatch(usize),

    #[error("Invalid background size: {0} (must be > 0)")]
    InvalidBackgroundSize(usize),

    #[error("Unsupported device: {0} (only cpu is available)")]
    UnsupportedDevice(String),

    #[error("{0} classes cannot be encoded in artifact file names (at most 10)")]
    ClassCountNotEncodable(usize),

    #[error("Invalid render size: {width}x{height} (both must be >= 16)")]
    InvalidRenderSize { width: u32, height: u32 },

    #[error("JSON data source requires a path")]
    MissingDataPath,
}
