//! Fixed-budget classifier training
//!
//! This module provides:
//! - Cross-entropy loss over integer class targets
//! - Error-rate metric in percent
//! - Shuffled mini-batch iteration
//! - Training configuration
//! - Trainer abstraction with per-epoch diagnostics
//!
//! # Example
//!
//! ```no_run
//! use descenso::train::{Trainer, TrainConfig};
//!
//! let config = TrainConfig {
//!     epochs: 100,
//!     ..Default::default()
//! };
//! let trainer = Trainer::sgd(config);
//! assert_eq!(trainer.lr(), 0.01);
//! ```

mod batch;
mod config;
mod loss;
mod metrics;
mod trainer;

pub use batch::BatchIterator;
pub use config::TrainConfig;
pub use loss::CrossEntropyLoss;
pub use metrics::error_rate;
pub use trainer::{EpochRecord, Evaluation, Trainer, TrainingRun};
