//! Error types for the report pipeline.
//!
//! Every failure in a request is reported as a [`ReportError`]. The variants
//! map one-to-one onto the request-level failure classes (invalid input,
//! malformed detector output, detector failure, artifact write failure) plus
//! a few variants for image decoding and configuration loading.
//!
//! # Usage
//!
//! ```rust
//! use dental_xray_report::core::errors::ReportError;
//!
//! let error = ReportError::invalid_input("patient id is empty");
//! assert!(error.is_input_error());
//! println!("{}", error.user_message());
//! ```

pub mod constructors;
pub mod types;

pub use types::{ArtifactKind, OpaqueError, ReportError};

/// Convenient result alias for pipeline operations.
pub type ReportResult<T> = Result<T, ReportError>;
