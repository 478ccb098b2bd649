//! A detector that replays detections computed elsewhere.

use crate::core::errors::{ReportError, ReportResult};
use crate::core::{Detector, DetectorError};
use crate::domain::RawDetections;
use image::RgbImage;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Returns the same [`RawDetections`] for every image.
///
/// Useful for replaying a detector run offline, and for driving the
/// pipeline without a model.
#[derive(Debug, Clone)]
pub struct PrecomputedDetector {
    detections: RawDetections,
    source: Option<PathBuf>,
}

impl PrecomputedDetector {
    pub fn new(detections: RawDetections) -> Self {
        Self {
            detections,
            source: None,
        }
    }

    /// Loads detections from a JSON file in the [`RawDetections`] format.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidInput`] if the file cannot be read and
    /// [`ReportError::MalformedDetectionOutput`] if it does not parse.
    pub fn from_json_file(path: &Path) -> ReportResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ReportError::invalid_input(format!(
                "cannot read detections file {}: {e}",
                path.display()
            ))
        })?;
        let detections: RawDetections = serde_json::from_str(&text).map_err(|e| {
            ReportError::malformed(format!("{}: {e}", path.display()))
        })?;

        info!(
            "Loaded {} precomputed detections from {}",
            detections.len(),
            path.display()
        );
        Ok(Self {
            detections,
            source: Some(path.to_path_buf()),
        })
    }

    pub fn detections(&self) -> &RawDetections {
        &self.detections
    }
}

impl Detector for PrecomputedDetector {
    fn name(&self) -> &str {
        "precomputed"
    }

    fn detect(&self, image: &RgbImage) -> Result<RawDetections, DetectorError> {
        debug!(
            "Replaying {} detections for a {}x{} image (source: {:?})",
            self.detections.len(),
            image.width(),
            image.height(),
            self.source
        );
        Ok(self.detections.clone())
    }
}
