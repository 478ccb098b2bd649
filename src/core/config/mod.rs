//! Configuration management for the report pipeline.
//!
//! This module provides the serde-backed settings types and the validation
//! traits they implement.

pub mod errors;
pub mod pipeline;

pub use errors::{ConfigError, ConfigValidator, ConfigValidatorExt};
pub use pipeline::{PipelineConfig, ReportLayout, ViewConfig};
