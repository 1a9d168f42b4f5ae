//! Loading experiment specifications from YAML

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::schema::ExperimentSpec;
use super::validate::{validate_spec, ValidationError};
use crate::error::{Error, Result};

/// Environment variable consulted when the spec names no device
pub const DEVICE_ENV: &str = "DESCENSO_DEVICE";

/// Compute device for training and attribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    /// Host CPU
    #[default]
    Cpu,
}

impl Device {
    /// Parse a device name (case-insensitive)
    pub fn parse(name: &str) -> std::result::Result<Self, ValidationError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "cpu" => Ok(Device::Cpu),
            _ => Err(ValidationError::UnsupportedDevice(name.to_string())),
        }
    }

    /// Pick the device from the spec, then the environment, then the default
    pub fn resolve(
        configured: Option<&str>,
        env: Option<&str>,
    ) -> std::result::Result<Self, ValidationError> {
        match configured.or(env) {
            Some(name) => Self::parse(name),
            None => Ok(Device::default()),
        }
    }

    /// Resolve against the current process environment
    pub fn from_spec(spec: &ExperimentSpec) -> std::result::Result<Self, ValidationError> {
        let env = std::env::var(DEVICE_ENV).ok();
        Self::resolve(spec.device.as_deref(), env.as_deref())
    }
}

/// Parse and validate an experiment spec from YAML text
pub fn parse_config(yaml: &str) -> Result<ExperimentSpec> {
    let spec: ExperimentSpec = serde_yaml::from_str(yaml)
        .map_err(|e| Error::ConfigError(format!("Failed to parse YAML config: {e}")))?;
    validate_spec(&spec)?;
    Ok(spec)
}

/// Load experiment spec from YAML file (without running anything)
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<ExperimentSpec> {
    let yaml_content = fs::read_to_string(config_path.as_ref()).map_err(|e| {
        Error::ConfigError(format!(
            "Failed to read config file {}: {}",
            config_path.as_ref().display(),
            e
        ))
    })?;
    parse_config(&yaml_content)
}
