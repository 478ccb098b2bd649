//! Configuration error types and validation traits.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for the expected schema.
    #[error("failed to parse configuration file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Error indicating that a configuration is invalid.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// A referenced file does not exist.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },
}

/// A trait for validating configuration parameters.
///
/// Implementors provide [`validate`](ConfigValidator::validate); the
/// provided helpers cover the checks shared by the view and report settings.
pub trait ConfigValidator {
    /// Validates the configuration.
    fn validate(&self) -> Result<(), ConfigError>;

    /// Validates that a float is finite and strictly positive.
    fn validate_positive_f32(&self, value: f32, field_name: &str) -> Result<(), ConfigError> {
        if !value.is_finite() || value <= 0.0 {
            Err(ConfigError::InvalidConfig {
                message: format!("{field_name} must be a positive number, got {value}"),
            })
        } else {
            Ok(())
        }
    }

    /// Validates that a float is finite and not negative.
    fn validate_non_negative_f32(&self, value: f32, field_name: &str) -> Result<(), ConfigError> {
        if !value.is_finite() || value < 0.0 {
            Err(ConfigError::InvalidConfig {
                message: format!("{field_name} must be non-negative, got {value}"),
            })
        } else {
            Ok(())
        }
    }

    /// Validates that an optional file path points at an existing file.
    fn validate_optional_file(&self, path: Option<&Path>) -> Result<(), ConfigError> {
        match path {
            Some(p) if !p.is_file() => Err(ConfigError::PathNotFound {
                path: p.to_path_buf(),
            }),
            _ => Ok(()),
        }
    }
}

/// Extension trait adding validate-then-return helpers.
pub trait ConfigValidatorExt: ConfigValidator + Sized {
    /// Validates the configuration and returns it on success.
    fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }
}

impl<T: ConfigValidator> ConfigValidatorExt for T {}
