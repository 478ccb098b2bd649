//! The detector boundary.

use crate::domain::RawDetections;
use image::RgbImage;

/// Error type returned by detector implementations.
pub type DetectorError = Box<dyn std::error::Error + Send + Sync>;

/// An object detector consumed as a black box.
///
/// One call per request returns boxes in absolute pixel coordinates
/// `(x1, y1, x2, y2)`, the parallel class indices and confidences, and the
/// class-index-to-label lookup. Implementations are constructed once and
/// shared read-only across requests, hence the `Send + Sync` bound.
pub trait Detector: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str {
        "detector"
    }

    /// Runs detection over a single image.
    fn detect(&self, image: &RgbImage) -> Result<RawDetections, DetectorError>;
}
