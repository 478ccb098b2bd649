//! The value returned by a completed request.

use crate::core::errors::ReportResult;
use crate::domain::PatientId;
use crate::processors::IssueSummary;
use crate::utils::AnnotatedView;
use crate::utils::figure::Figure;
use chrono::NaiveDateTime;
use std::fmt;
use std::path::PathBuf;

/// Everything a completed request produced.
#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    pub patient_id: PatientId,
    /// The annotated view shown to the operator.
    pub view: AnnotatedView,
    pub summary: IssueSummary,
    /// `{output_dir}/{patient}_pred.png`
    pub annotated_image_path: PathBuf,
    /// `{output_dir}/{patient}_report.pdf`
    pub report_path: PathBuf,
    pub generated_at: NaiveDateTime,
}

impl ProcessOutcome {
    /// The interactive figure for the view.
    pub fn figure(&self) -> ReportResult<Figure> {
        Figure::from_view(&self.view)
    }

    /// Number of detections drawn on the view.
    pub fn detection_count(&self) -> usize {
        self.view.overlays().len()
    }
}

impl fmt::Display for ProcessOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Patient: {}", self.patient_id)?;
        writeln!(f, "Detected Issues: {}", self.summary)?;
        writeln!(f, "Annotated image: {}", self.annotated_image_path.display())?;
        write!(f, "Report: {}", self.report_path.display())
    }
}
