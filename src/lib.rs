//! # Dental X-ray Report
//!
//! Post-processing and reporting for dental X-ray object detection. Given an
//! X-ray and a patient id, the pipeline runs a detector once, normalizes its
//! output, builds an annotated view with one color per class, summarizes the
//! findings and writes a single-page PDF report.
//!
//! ## Features
//!
//! - Pluggable detector behind the [`Detector`](core::Detector) trait
//! - Validation of raw detector output with descriptive errors
//! - Per-request class colors from a fixed ten-color palette
//! - Interactive figure export (Plotly JSON) and a flattened annotated raster
//! - PDF reports embedding the annotated image straight from memory
//!
//! ## Modules
//!
//! * [`core`] - Configuration, error handling, validation and the detector trait
//! * [`domain`] - Detection records and patient identifiers
//! * [`models`] - Detector implementations
//! * [`pipeline`] - The request orchestrator
//! * [`processors`] - Normalization, color assignment and aggregation
//! * [`report`] - PDF report layout and serialization
//! * [`utils`] - Image I/O, the annotated view and the figure export
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dental_xray_report::prelude::*;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let detector = PrecomputedDetector::from_json_file(Path::new("detections.json"))?;
//! let config = PipelineConfig::default().with_output_dir("reports");
//! let pipeline = ReportPipeline::new(Arc::new(detector), config)?;
//!
//! let image = load_image(Path::new("xray.png"))?;
//! let outcome = pipeline.process(&image, "P-001")?;
//! println!("Detected Issues: {}", outcome.summary);
//! println!("Report written to {}", outcome.report_path.display());
//! # Ok(())
//! # }
//! ```
//!
//! ### JSON Configuration
//!
//! ```rust
//! use dental_xray_report::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config: PipelineConfig = serde_json::from_str(r#"
//! {
//!   "output_dir": "/var/lib/xray/reports",
//!   "view": { "stroke_width": 3.0 },
//!   "report": { "title": "Panoramic X-ray Report" }
//! }
//! "#)?;
//! assert_eq!(config.report.font_size, 12.0);
//! # Ok(())
//! # }
//! ```

// Core modules
pub mod core;
pub mod domain;
pub mod models;

pub mod pipeline;
pub mod processors;
pub mod report;
pub mod utils;

/// Prelude module for convenient imports.
///
/// ```rust
/// use dental_xray_report::prelude::*;
/// ```
///
/// Included items cover the common path: building a pipeline, running a
/// request and reading its outcome. For the individual stages, import from
/// the respective modules (e.g., `dental_xray_report::processors`,
/// `dental_xray_report::report`).
pub mod prelude {
    // Pipeline
    pub use crate::pipeline::{ProcessOutcome, ReportPipeline};

    // Detector boundary
    pub use crate::core::{Detector, DetectorError};
    pub use crate::domain::RawDetections;
    pub use crate::models::PrecomputedDetector;

    // Configuration and errors
    pub use crate::core::{PipelineConfig, ReportError, ReportResult};

    // Image utility
    pub use crate::utils::load_image;
}
