//! Detection records at both sides of the normalizer.

use crate::processors::BoundingBox;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw detector output: parallel sequences plus the label lookup.
///
/// This is the shape returned by [`Detector::detect`](crate::core::Detector::detect)
/// and the JSON format read by
/// [`PrecomputedDetector`](crate::models::PrecomputedDetector):
///
/// ```json
/// {
///   "boxes": [[10, 10, 50, 50]],
///   "class_ids": [0],
///   "confidences": [0.91],
///   "labels": { "0": "Caries", "1": "Filling" }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDetections {
    /// Boxes as `[x1, y1, x2, y2]` in absolute pixel coordinates.
    pub boxes: Vec<[f32; 4]>,
    pub class_ids: Vec<u32>,
    pub confidences: Vec<f32>,
    /// Class index to label.
    pub labels: BTreeMap<u32, String>,
}

impl RawDetections {
    /// Creates an empty result carrying only the label lookup.
    pub fn empty(labels: BTreeMap<u32, String>) -> Self {
        Self {
            labels,
            ..Self::default()
        }
    }

    /// Appends one detection to the parallel sequences.
    pub fn push(&mut self, bbox: [f32; 4], class_id: u32, confidence: f32) {
        self.boxes.push(bbox);
        self.class_ids.push(class_id);
        self.confidences.push(confidence);
    }

    /// Number of boxes reported.
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

/// One normalized detection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    pub bbox: BoundingBox,
    pub class_id: u32,
    /// Label resolved from `class_id`.
    pub label: String,
    /// Confidence in `[0, 1]`.
    pub confidence: f32,
}

impl Detection {
    /// Hover text shown in the interactive view, e.g. `"Caries (0.91)"`.
    pub fn hover_text(&self) -> String {
        format!("{} ({:.2})", self.label, self.confidence)
    }

    /// Tag drawn above the box on the flattened raster, e.g. `"Caries 0.91"`.
    pub fn raster_tag(&self) -> String {
        format!("{} {:.2}", self.label, self.confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caries() -> Detection {
        Detection {
            bbox: BoundingBox::from_xyxy(10.0, 10.0, 50.0, 50.0),
            class_id: 0,
            label: "Caries".to_string(),
            confidence: 0.91,
        }
    }

    #[test]
    fn test_hover_text_uses_two_decimals() {
        assert_eq!(caries().hover_text(), "Caries (0.91)");
        let mut det = caries();
        det.confidence = 0.5;
        assert_eq!(det.hover_text(), "Caries (0.50)");
    }

    #[test]
    fn test_raster_tag() {
        assert_eq!(caries().raster_tag(), "Caries 0.91");
    }

    #[test]
    fn test_raw_detections_push() {
        let mut raw = RawDetections::empty(BTreeMap::from([(0, "Caries".to_string())]));
        assert!(raw.is_empty());
        raw.push([1.0, 2.0, 3.0, 4.0], 0, 0.4);
        assert_eq!(raw.len(), 1);
        assert_eq!(raw.class_ids, vec![0]);
    }

    #[test]
    fn test_raw_detections_json_shape() {
        let raw: RawDetections = serde_json::from_str(
            r#"{
                "boxes": [[10, 10, 50, 50], [60, 60, 90, 90]],
                "class_ids": [0, 1],
                "confidences": [0.91, 0.77],
                "labels": { "0": "Caries", "1": "Filling" }
            }"#,
        )
        .unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw.labels.get(&1).map(String::as_str), Some("Filling"));
        assert_eq!(raw.boxes[1], [60.0, 60.0, 90.0, 90.0]);
    }
}
