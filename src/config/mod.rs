//! Declarative experiment configuration
//!
//! An experiment is described by one YAML [`ExperimentSpec`], validated with
//! [`validate_spec`] before anything is generated or trained.

pub mod cli;
mod loader;
mod schema;
mod validate;

pub use loader::{load_config, parse_config, Device, DEVICE_ENV};
pub use schema::{DataSource, DataSpec, ExperimentSpec, ExplainSpec, OutputSpec};
pub use validate::{validate_spec, ValidationError};
