//! Descenso: double descent over network width
//!
//! Trains a family of two-hidden-layer ReLU MLPs of increasing width on
//! labeled 1-D signals, records train and test error per width, and after
//! each width attributes a batch of test predictions to input positions with
//! DeepSHAP. Attribution plots are filed into correct (`CP`), wrong (`WP`) and
//! `ALL` buckets so samples whose correctness changes with width can be found
//! afterwards.
//!
//! # Modules
//!
//! - [`data`]: synthetic signal generation, JSON datasets, label corruption
//! - [`model`]: MLP construction, forward and backward passes
//! - [`optim`]: momentum SGD
//! - [`train`]: mini-batch training with periodic evaluation
//! - [`sweep`]: width schedule and per-width result collection
//! - [`explain`]: DeepLIFT rescale attributions against a background set
//! - [`artifact`]: plot rendering, bucket filing and cross-width queries
//! - [`config`]: YAML experiment configuration and CLI arguments
//! - [`experiment`]: the end-to-end pipeline
//!
//! # Example
//!
//! ```no_run
//! use descenso::config::load_config;
//! use descenso::experiment::Experiment;
//!
//! let spec = load_config("experiment.yaml")?;
//! let report = Experiment::from_spec(spec)?.run()?;
//! if let Some(peak) = report.result.peak_test_error() {
//!     println!("peak test error {:.1}% at width {}", peak.test_error, peak.width);
//! }
//! # Ok::<(), descenso::Error>(())
//! ```

pub mod artifact;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod experiment;
pub mod explain;
pub mod model;
pub mod optim;
pub mod sweep;
pub mod train;

pub use error::{Error, Result};
