use super::document::{Report, ReportDocument};
use super::pdf::render_pdf;
use crate::core::ReportLayout;
use crate::core::errors::{ArtifactKind, ReportError, ReportResult};
use image::RgbImage;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Writes single-page PDF reports with a fixed layout.
#[derive(Debug, Clone, Default)]
pub struct ReportComposer {
    layout: ReportLayout,
}

impl ReportComposer {
    pub fn new(layout: ReportLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &ReportLayout {
        &self.layout
    }

    /// Lays out `report` with `image` embedded and writes it to `path`,
    /// replacing any existing file.
    pub fn compose(
        &self,
        report: &Report,
        image: &RgbImage,
        path: &Path,
    ) -> ReportResult<PathBuf> {
        if image.width() == 0 || image.height() == 0 {
            return Err(ReportError::invalid_input(
                "cannot embed an empty image in the report",
            ));
        }

        let document = ReportDocument::layout(report, image.dimensions(), &self.layout);
        debug!("Report lines: {:?}", document.lines());

        let bytes = render_pdf(&document, image)
            .map_err(|e| ReportError::write_failed(ArtifactKind::ReportDocument, path, e))?;
        fs::write(path, &bytes)
            .map_err(|e| ReportError::write_failed(ArtifactKind::ReportDocument, path, e))?;

        info!(
            "Wrote report for patient {} to {} ({} bytes)",
            report.patient_id,
            path.display(),
            bytes.len()
        );
        Ok(path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processors::IssueSummary;
    use chrono::NaiveDate;
    use image::Rgb;
    use lopdf::Document;

    fn report(summary: &IssueSummary) -> Report {
        let generated_at = NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_opt(15, 9, 26)
            .unwrap();
        Report::new("12345", generated_at, summary).unwrap()
    }

    #[test]
    fn test_compose_writes_readable_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("12345_report.pdf");
        let image = RgbImage::from_pixel(64, 32, Rgb([0, 0, 255]));

        let composer = ReportComposer::default();
        let written = composer
            .compose(&report(&IssueSummary::default()), &image, &path)
            .unwrap();

        assert_eq!(written, path);
        let doc = Document::load(&path).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_compose_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("12345_report.pdf");
        fs::write(&path, b"stale").unwrap();

        let image = RgbImage::from_pixel(8, 8, Rgb([255, 255, 255]));
        ReportComposer::default()
            .compose(&report(&IssueSummary::from_labels(["Crown"])), &image, &path)
            .unwrap();

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_compose_reports_unwritable_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("12345_report.pdf");
        let image = RgbImage::from_pixel(8, 8, Rgb([255, 255, 255]));

        let err = ReportComposer::default()
            .compose(&report(&IssueSummary::default()), &image, &path)
            .unwrap_err();
        assert!(matches!(
            err,
            ReportError::ReportWriteError {
                artifact: ArtifactKind::ReportDocument,
                ..
            }
        ));
    }

    #[test]
    fn test_compose_rejects_empty_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.pdf");
        let err = ReportComposer::default()
            .compose(&report(&IssueSummary::default()), &RgbImage::new(0, 0), &path)
            .unwrap_err();
        assert!(err.is_input_error());
        assert!(!path.exists());
    }
}
