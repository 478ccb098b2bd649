//! Error type definitions for the report pipeline.

use crate::core::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// The artifact being written when a write failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// The flattened annotated raster (`{patient}_pred.png`).
    AnnotatedImage,
    /// The PDF report (`{patient}_report.pdf`).
    ReportDocument,
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactKind::AnnotatedImage => write!(f, "annotated image"),
            ArtifactKind::ReportDocument => write!(f, "report document"),
        }
    }
}

/// Errors surfaced by the detection-to-report pipeline.
///
/// The first five variants form the request-level taxonomy; the remaining
/// ones cover image decoding and configuration loading around it.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The request was rejected before any detection work took place.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// The report composer was handed an empty patient identifier.
    #[error("patient id is missing")]
    MissingPatientId,

    /// The detector returned output that violates its contract.
    #[error("malformed detection output: {message}")]
    MalformedDetectionOutput {
        /// What was wrong with the raw output.
        message: String,
    },

    /// The detector failed or returned nothing usable.
    #[error("detection failed")]
    DetectionFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// An artifact could not be written to its target location.
    #[error("failed to write {artifact} to {}", path.display())]
    ReportWriteError {
        /// Which artifact was being written.
        artifact: ArtifactKind,
        /// The target location.
        path: PathBuf,
        /// The underlying failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error occurred while loading an input image.
    #[error("image load")]
    ImageLoad(#[source] image::ImageError),

    /// Error occurred while encoding an image in memory.
    #[error("image encode: {context}")]
    ImageEncode {
        /// What was being encoded.
        context: String,
        /// The underlying error.
        #[source]
        source: image::ImageError,
    },

    /// Invalid pipeline configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A plain message error used when a failure has no richer source.
#[derive(Debug, Clone)]
pub struct OpaqueError(pub String);

impl std::fmt::Display for OpaqueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for OpaqueError {}
