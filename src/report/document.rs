//! The report record and its fixed page layout.

use crate::core::ReportLayout;
use crate::core::errors::{ReportError, ReportResult};
use crate::processors::IssueSummary;
use chrono::NaiveDateTime;

/// Timestamp format printed on the report.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Everything printed on one report.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub patient_id: String,
    pub generated_at: NaiveDateTime,
    pub issue_summary: String,
}

impl Report {
    /// Creates a report, rejecting a blank patient id.
    pub fn new(
        patient_id: &str,
        generated_at: NaiveDateTime,
        summary: &IssueSummary,
    ) -> ReportResult<Self> {
        let patient_id = patient_id.trim();
        if patient_id.is_empty() {
            return Err(ReportError::MissingPatientId);
        }
        Ok(Self {
            patient_id: patient_id.to_string(),
            generated_at,
            issue_summary: summary.render(),
        })
    }

    pub fn patient_line(&self) -> String {
        format!("Patient ID: {}", self.patient_id)
    }

    pub fn date_line(&self) -> String {
        format!("Date: {}", self.generated_at.format(TIMESTAMP_FORMAT))
    }

    pub fn issues_line(&self) -> String {
        format!("Detected Issues: {}", self.issue_summary)
    }
}

/// Horizontal placement of a text cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// One line of text occupying a full-width cell.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCell {
    pub text: String,
    pub align: Align,
    /// Top edge in millimetres from the top of the page.
    pub top_mm: f32,
}

/// Where the annotated image goes, in millimetres from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlacement {
    pub x_mm: f32,
    pub y_mm: f32,
    pub width_mm: f32,
    pub height_mm: f32,
}

/// A laid-out single-page report, ready to be serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub cells: Vec<TextCell>,
    pub image: ImagePlacement,
    pub layout: ReportLayout,
}

impl ReportDocument {
    /// Lays out title, patient id, timestamp and issues line, followed by an
    /// image of `image_size` pixels scaled to the configured width.
    pub fn layout(report: &Report, image_size: (u32, u32), layout: &ReportLayout) -> Self {
        let lines = [
            (layout.title.clone(), Align::Center),
            (report.patient_line(), Align::Left),
            (report.date_line(), Align::Left),
            (report.issues_line(), Align::Left),
        ];

        let cells = lines
            .into_iter()
            .enumerate()
            .map(|(row, (text, align))| TextCell {
                text,
                align,
                top_mm: layout.top_margin_mm + row as f32 * layout.cell_height_mm,
            })
            .collect();

        let (width_px, height_px) = image_size;
        let aspect = if width_px == 0 {
            1.0
        } else {
            height_px as f32 / width_px as f32
        };

        Self {
            cells,
            image: ImagePlacement {
                x_mm: layout.image_x_mm,
                y_mm: layout.image_y_mm,
                width_mm: layout.image_width_mm,
                height_mm: layout.image_width_mm * aspect,
            },
            layout: layout.clone(),
        }
    }

    /// The text of every cell, top to bottom.
    pub fn lines(&self) -> Vec<&str> {
        self.cells.iter().map(|cell| cell.text.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(9, 5, 7)
            .unwrap()
    }

    #[test]
    fn test_report_requires_patient_id() {
        let summary = IssueSummary::default();
        assert!(matches!(
            Report::new("  ", timestamp(), &summary),
            Err(ReportError::MissingPatientId)
        ));
    }

    #[test]
    fn test_report_lines() {
        let summary = IssueSummary::from_labels(["Caries", "Filling"]);
        let report = Report::new(" P-001 ", timestamp(), &summary).unwrap();
        assert_eq!(report.patient_line(), "Patient ID: P-001");
        assert_eq!(report.date_line(), "Date: 2026-10-16 09:05:07");
        assert_eq!(report.issues_line(), "Detected Issues: 1 Caries, 1 Filling");
    }

    #[test]
    fn test_layout_order_and_geometry() {
        let report = Report::new("12345", timestamp(), &IssueSummary::default()).unwrap();
        let doc = ReportDocument::layout(&report, (400, 200), &ReportLayout::default());

        assert_eq!(
            doc.lines(),
            vec![
                "Dental X-ray Analysis Report",
                "Patient ID: 12345",
                "Date: 2026-10-16 09:05:07",
                "Detected Issues: None",
            ]
        );
        assert_eq!(doc.cells[0].align, Align::Center);
        assert_eq!(doc.cells[3].align, Align::Left);
        assert_eq!(doc.cells[0].top_mm, 10.0);
        assert_eq!(doc.cells[3].top_mm, 40.0);

        assert_eq!(doc.image.x_mm, 10.0);
        assert_eq!(doc.image.y_mm, 50.0);
        assert_eq!(doc.image.width_mm, 80.0);
        assert_eq!(doc.image.height_mm, 40.0);
    }
}
