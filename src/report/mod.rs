//! PDF report composition.
//!
//! A [`Report`] holds the patient id, timestamp and issue summary. The
//! [`ReportComposer`] lays it out on a single A4 page together with the
//! flattened annotated image and writes the result as a PDF.
//!
//! # Modules
//!
//! * `document` - The report record and its page layout
//! * `composer` - Writes a laid-out report to disk
//! * `pdf` - PDF serialization
//! * `font_metrics` - Helvetica widths for centering text

pub mod composer;
pub mod document;
mod font_metrics;
mod pdf;

pub use composer::ReportComposer;
pub use document::{Align, ImagePlacement, Report, ReportDocument, TIMESTAMP_FORMAT, TextCell};
