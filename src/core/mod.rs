//! The core module of the report pipeline.
//!
//! This module contains the fundamental pieces shared by every stage:
//! - Configuration management
//! - Error handling
//! - Validation helpers
//! - The detector trait at the model boundary
//!
//! It also provides re-exports of commonly used types for convenience.

pub mod config;
pub mod errors;
pub mod traits;
pub mod validation;

pub use config::{ConfigError, ConfigValidator, PipelineConfig, ReportLayout, ViewConfig};
pub use errors::{ArtifactKind, ReportError, ReportResult};
pub use traits::{Detector, DetectorError};

/// Initializes the tracing subscriber for logging.
///
/// This function sets up the tracing subscriber with environment filter and formatting layer.
/// It's typically called at the start of an application to enable logging.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}
