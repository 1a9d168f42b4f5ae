//! Configuration validation
//!
//! Validates experiment specifications for correctness before any training.

mod error;
mod validator;

#[cfg(test)]
mod proptests;

pub use error::ValidationError;
pub use validator::validate_spec;
