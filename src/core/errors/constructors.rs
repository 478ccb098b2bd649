//! Constructor helpers for [`ReportError`].
//!
//! ```rust
//! use dental_xray_report::core::errors::{ArtifactKind, ReportError};
//!
//! let error = ReportError::malformed("3 boxes but 2 class ids");
//! assert_eq!(
//!     error.to_string(),
//!     "malformed detection output: 3 boxes but 2 class ids"
//! );
//!
//! let write_error = ReportError::write_failed(
//!     ArtifactKind::ReportDocument,
//!     "/readonly/P-001_report.pdf",
//!     std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
//! );
//! assert!(write_error.user_message().contains("report document"));
//! ```

use super::types::{ArtifactKind, OpaqueError, ReportError};
use std::path::PathBuf;

impl ReportError {
    /// Creates an `InvalidInput` error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a `MalformedDetectionOutput` error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedDetectionOutput {
            message: message.into(),
        }
    }

    /// Wraps a detector-side failure.
    pub fn detection_failed(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::DetectionFailed(error.into())
    }

    /// Creates a `DetectionFailed` error from a plain message.
    pub fn detection_failed_msg(message: impl Into<String>) -> Self {
        Self::DetectionFailed(Box::new(OpaqueError(message.into())))
    }

    /// Creates a `ReportWriteError` for the given artifact and location.
    pub fn write_failed(
        artifact: ArtifactKind,
        path: impl Into<PathBuf>,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ReportWriteError {
            artifact,
            path: path.into(),
            source: Box::new(error),
        }
    }

    /// Creates an `ImageEncode` error.
    pub fn image_encode(context: impl Into<String>, source: image::ImageError) -> Self {
        Self::ImageEncode {
            context: context.into(),
            source,
        }
    }

    /// Returns the single line shown to the person operating the UI.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput { message } => format!("Invalid input: {message}"),
            Self::MissingPatientId => {
                "Patient ID is required to generate the report.".to_string()
            }
            Self::MalformedDetectionOutput { message } => {
                format!("The detector returned unusable output: {message}")
            }
            Self::DetectionFailed(source) => format!("Detection failed: {source}"),
            Self::ReportWriteError {
                artifact,
                path,
                source,
            } => format!(
                "Could not write the {artifact} to {}: {source}",
                path.display()
            ),
            Self::ImageLoad(source) => format!("Could not read the uploaded image: {source}"),
            Self::ImageEncode { context, source } => format!("{context}: {source}"),
            Self::Config(error) => format!("Configuration error: {error}"),
        }
    }

    /// True for errors raised before any detector call or filesystem write.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidInput { .. } | Self::MissingPatientId)
    }
}
