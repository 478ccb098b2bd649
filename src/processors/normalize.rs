//! Detection result normalization.
//!
//! Converts the detector's parallel sequences into an ordered list of
//! [`Detection`] records. Source order is preserved; nothing is re-sorted or
//! filtered here.

use crate::core::errors::{ReportError, ReportResult};
use crate::core::validation::{validate_same_length, validate_unit_interval};
use crate::domain::{Detection, RawDetections};
use crate::processors::BoundingBox;
use tracing::debug;

/// Normalizes raw detector output.
///
/// # Errors
///
/// Returns [`ReportError::MalformedDetectionOutput`] when the sequences have
/// different lengths, a class index has no (or an empty) label, a confidence
/// is outside `[0, 1]`, or a box is not finite with `x1 <= x2`, `y1 <= y2`.
pub fn normalize(raw: &RawDetections) -> ReportResult<Vec<Detection>> {
    validate_same_length(&raw.boxes, &raw.class_ids, "boxes", "class_ids")?;
    validate_same_length(&raw.boxes, &raw.confidences, "boxes", "confidences")?;

    let detections = raw
        .boxes
        .iter()
        .zip(&raw.class_ids)
        .zip(&raw.confidences)
        .enumerate()
        .map(|(idx, ((coords, &class_id), &confidence))| {
            let label = raw
                .labels
                .get(&class_id)
                .ok_or_else(|| {
                    ReportError::malformed(format!(
                        "detection {idx}: class index {class_id} has no label"
                    ))
                })?;
            if label.trim().is_empty() {
                return Err(ReportError::malformed(format!(
                    "detection {idx}: class index {class_id} has an empty label"
                )));
            }

            validate_unit_interval(confidence, &format!("confidences[{idx}]"))?;

            let bbox = BoundingBox::from(*coords);
            if !bbox.is_well_formed() {
                return Err(ReportError::malformed(format!(
                    "detection {idx}: box {coords:?} is not a valid (x1, y1, x2, y2) rectangle"
                )));
            }

            Ok(Detection {
                bbox,
                class_id,
                label: label.clone(),
                confidence,
            })
        })
        .collect::<ReportResult<Vec<_>>>()?;

    debug!("Normalized {} detections", detections.len());
    Ok(detections)
}
