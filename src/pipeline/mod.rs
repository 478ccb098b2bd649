//! The detection-to-report pipeline.
//!
//! This module ties the stages together: patient id and image validation,
//! one detector call, normalization, the annotated view and its raster, the
//! issue summary and the PDF report.

mod orchestrator;
mod result;
pub mod state;

pub use orchestrator::ReportPipeline;
pub use result::ProcessOutcome;
pub use state::RequestState;
