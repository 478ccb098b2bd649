//! The request orchestrator.
//!
//! [`ReportPipeline`] drives one request from the uploaded X-ray and patient
//! id through detection, normalization, view construction, aggregation and
//! report composition. Each stage short-circuits on its first failure and
//! leaves already written artifacts in place.

use super::result::ProcessOutcome;
use super::state::{RequestState, RequestTracker};
use crate::core::errors::{ArtifactKind, ReportError, ReportResult};
use crate::core::validation::validate_image_dimensions;
use crate::core::{ConfigValidator, Detector, PipelineConfig};
use crate::domain::{PatientId, RawDetections};
use crate::processors::{ColorRegistry, IssueSummary, normalize};
use crate::report::{Report, ReportComposer};
use crate::utils::{AnnotatedView, RasterStyle, load_label_font, render_flattened, save_png_artifact};

use ab_glyph::FontVec;
use chrono::{Local, NaiveDateTime};
use image::RgbImage;
use std::fs;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Turns an X-ray and a patient id into an annotated view and a PDF report.
///
/// The detector is shared read-only; all other request state (the color
/// registry, the view, the summary) is created per call, so one pipeline can
/// serve concurrent requests.
pub struct ReportPipeline {
    detector: Arc<dyn Detector>,
    config: PipelineConfig,
    composer: ReportComposer,
    font: Option<FontVec>,
}

impl ReportPipeline {
    /// Creates a pipeline after validating `config`.
    ///
    /// The label font is resolved once here; when none is found the raster
    /// carries outlines only.
    pub fn new(detector: Arc<dyn Detector>, config: PipelineConfig) -> ReportResult<Self> {
        config.validate()?;
        let font = load_label_font(&config.view);
        let composer = ReportComposer::new(config.report.clone());

        info!(
            "Report pipeline ready: detector={}, output_dir={}",
            detector.name(),
            config.resolved_output_dir().display()
        );

        Ok(Self {
            detector,
            config,
            composer,
            font,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Processes one request, stamping the report with the local time.
    pub fn process(&self, image: &RgbImage, patient_id: &str) -> ReportResult<ProcessOutcome> {
        self.process_at(image, patient_id, Local::now().naive_local())
    }

    /// Processes one request with a caller-supplied report timestamp.
    pub fn process_at(
        &self,
        image: &RgbImage,
        patient_id: &str,
        generated_at: NaiveDateTime,
    ) -> ReportResult<ProcessOutcome> {
        let start = Instant::now();
        let mut tracker = RequestTracker::new(patient_id.trim());

        tracker.advance(RequestState::Validating);
        let patient = PatientId::parse(patient_id).map_err(|e| tracker.fail(e))?;
        validate_image_dimensions(image.width(), image.height(), "X-ray")
            .map_err(|e| tracker.fail(e))?;

        tracker.advance(RequestState::Detecting);
        let raw = self
            .detector
            .detect(image)
            .map_err(|e| tracker.fail(ReportError::detection_failed(e)))?;
        debug!("{} returned {} boxes", self.detector.name(), raw.len());

        tracker.advance(RequestState::Composing);
        let outcome = self
            .compose(image, patient, raw, generated_at)
            .map_err(|e| tracker.fail(e))?;

        tracker.advance(RequestState::Done);
        info!(
            "Processed patient {} in {:.2?}: {}",
            outcome.patient_id,
            start.elapsed(),
            outcome.summary
        );
        Ok(outcome)
    }

    fn compose(
        &self,
        image: &RgbImage,
        patient: PatientId,
        raw: RawDetections,
        generated_at: NaiveDateTime,
    ) -> ReportResult<ProcessOutcome> {
        let detections = normalize(&raw)?;

        let mut colors = ColorRegistry::new();
        let view = AnnotatedView::build(
            Arc::new(image.clone()),
            &detections,
            &mut colors,
            &self.config.view,
        );
        let style = RasterStyle::new(&self.config.view, self.font.as_ref());
        let raster = render_flattened(&view, &style);

        let output_dir = self.config.resolved_output_dir();
        let annotated_image_path = patient.annotated_image_path(&output_dir);
        fs::create_dir_all(&output_dir).map_err(|e| {
            ReportError::write_failed(ArtifactKind::AnnotatedImage, &annotated_image_path, e)
        })?;
        save_png_artifact(&raster, &annotated_image_path, ArtifactKind::AnnotatedImage)?;

        let summary = IssueSummary::from_detections(&detections);
        let report = Report::new(patient.as_str(), generated_at, &summary)?;
        let report_path = self
            .composer
            .compose(&report, &raster, &patient.report_path(&output_dir))?;

        Ok(ProcessOutcome {
            patient_id: patient,
            view,
            summary,
            annotated_image_path,
            report_path,
            generated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DetectorError;
    use crate::processors::PALETTE;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingDetector {
        calls: AtomicUsize,
        output: Result<RawDetections, String>,
    }

    impl CountingDetector {
        fn returning(output: RawDetections) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                output: Ok(output),
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                output: Err(message.to_string()),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Detector for CountingDetector {
        fn detect(&self, _image: &RgbImage) -> Result<RawDetections, DetectorError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.output.clone().map_err(|message| message.into())
        }
    }

    fn labels() -> BTreeMap<u32, String> {
        BTreeMap::from([(0, "Caries".to_string()), (1, "Filling".to_string())])
    }

    fn two_findings() -> RawDetections {
        let mut raw = RawDetections::empty(labels());
        raw.push([10.0, 10.0, 50.0, 50.0], 0, 0.91);
        raw.push([60.0, 60.0, 90.0, 90.0], 1, 0.77);
        raw
    }

    fn xray() -> RgbImage {
        RgbImage::from_pixel(100, 100, image::Rgb([30, 30, 30]))
    }

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 5, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn pipeline(detector: Arc<CountingDetector>, dir: &std::path::Path) -> ReportPipeline {
        let config = PipelineConfig::default().with_output_dir(dir);
        ReportPipeline::new(detector, config).unwrap()
    }

    #[test]
    fn test_blank_patient_id_skips_detector() {
        let dir = tempfile::tempdir().unwrap();
        let detector = CountingDetector::returning(two_findings());
        let pipeline = pipeline(detector.clone(), dir.path());

        for id in ["", "   ", "\t\n"] {
            let err = pipeline.process_at(&xray(), id, timestamp()).unwrap_err();
            assert!(matches!(err, ReportError::InvalidInput { .. }));
        }
        assert_eq!(detector.calls(), 0);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_empty_image_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let detector = CountingDetector::returning(two_findings());
        let pipeline = pipeline(detector.clone(), dir.path());

        let err = pipeline
            .process_at(&RgbImage::new(0, 0), "P-001", timestamp())
            .unwrap_err();
        assert!(err.is_input_error());
        assert_eq!(detector.calls(), 0);
    }

    #[test]
    fn test_two_findings_produce_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let detector = CountingDetector::returning(two_findings());
        let pipeline = pipeline(detector.clone(), dir.path());

        let outcome = pipeline.process_at(&xray(), "P-001", timestamp()).unwrap();

        assert_eq!(detector.calls(), 1);
        assert_eq!(outcome.summary.render(), "1 Caries, 1 Filling");
        assert_eq!(outcome.detection_count(), 2);
        let overlays = outcome.view.overlays();
        assert_eq!(overlays[0].color, PALETTE[0]);
        assert_ne!(overlays[0].color, overlays[1].color);
        assert_eq!(outcome.annotated_image_path, dir.path().join("P-001_pred.png"));
        assert_eq!(outcome.report_path, dir.path().join("P-001_report.pdf"));
        assert!(outcome.annotated_image_path.exists());
        assert!(outcome.report_path.exists());
        assert_eq!(outcome.generated_at, timestamp());
    }

    #[test]
    fn test_no_findings_still_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let detector = CountingDetector::returning(RawDetections::empty(labels()));
        let pipeline = pipeline(detector, dir.path());

        let outcome = pipeline.process_at(&xray(), "12345", timestamp()).unwrap();
        assert_eq!(outcome.summary.render(), "None");
        assert!(outcome.view.overlays().is_empty());
        assert!(outcome.report_path.exists());
    }

    #[test]
    fn test_detector_failure_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let detector = CountingDetector::failing("model not loaded");
        let pipeline = pipeline(detector.clone(), dir.path());

        let err = pipeline.process_at(&xray(), "P-001", timestamp()).unwrap_err();
        assert!(matches!(err, ReportError::DetectionFailed(_)));
        assert!(err.user_message().contains("model not loaded"));
        assert_eq!(detector.calls(), 1);
        assert!(!dir.path().join("P-001_report.pdf").exists());
    }

    #[test]
    fn test_malformed_output_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut raw = two_findings();
        raw.confidences.pop();
        let pipeline = pipeline(CountingDetector::returning(raw), dir.path());

        let err = pipeline.process_at(&xray(), "P-001", timestamp()).unwrap_err();
        assert!(matches!(err, ReportError::MalformedDetectionOutput { .. }));
    }

    #[test]
    fn test_unwritable_output_dir_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();
        let pipeline = pipeline(CountingDetector::returning(two_findings()), &blocker);

        let err = pipeline.process_at(&xray(), "P-001", timestamp()).unwrap_err();
        assert!(matches!(
            err,
            ReportError::ReportWriteError {
                artifact: ArtifactKind::AnnotatedImage,
                ..
            }
        ));
    }

    #[test]
    fn test_ids_differing_only_in_spacing_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let detector = CountingDetector::returning(two_findings());
        let pipeline = pipeline(detector.clone(), dir.path());

        let err = pipeline.process_at(&xray(), "Jane Doe", timestamp()).unwrap_err();
        assert!(matches!(err, ReportError::InvalidInput { .. }));
        assert_eq!(detector.calls(), 0);

        let outcome = pipeline.process_at(&xray(), " Jane_Doe ", timestamp()).unwrap();
        assert_eq!(outcome.patient_id.as_str(), "Jane_Doe");
        assert_eq!(outcome.report_path, dir.path().join("Jane_Doe_report.pdf"));
    }

    #[test]
    fn test_annotated_image_survives_report_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("P-001_report.pdf")).unwrap();
        let pipeline = pipeline(CountingDetector::returning(two_findings()), dir.path());

        let err = pipeline.process_at(&xray(), "P-001", timestamp()).unwrap_err();
        assert!(matches!(
            err,
            ReportError::ReportWriteError {
                artifact: ArtifactKind::ReportDocument,
                ..
            }
        ));
        assert!(dir.path().join("P-001_pred.png").is_file());
    }
}
