//! Detection normalization.
//!
//! Converts the detector's parallel-array output into uniform [`Detection`]
//! records. Stateless; order of the output list is not significant (the
//! synthesizer re-establishes order by score).
//!
//! No confidence threshold is applied here. All raw detections pass through.

use anyhow::Result;

use crate::detect::result::{BoundingBox, Detection, LabelMap, RawDetections};

/// Malformed detector output. The pipeline treats the affected frame as
/// having zero detections instead of crashing.
#[derive(Clone, Debug, PartialEq)]
pub struct MalformedDetection {
    pub reason: String,
}

impl MalformedDetection {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for MalformedDetection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "malformed detector output: {}", self.reason)
    }
}
impl std::error::Error for MalformedDetection {}

/// Normalize one frame's raw detector output.
///
/// Returns an empty list when the detector found nothing. Fails with
/// [`MalformedDetection`] when the parallel arrays disagree in length or a
/// class index has no entry in the label map.
pub fn normalize(raw: &RawDetections, labels: &LabelMap) -> Result<Vec<Detection>> {
    let n = raw.boxes.len();
    if raw.confidences.len() != n || raw.class_indices.len() != n {
        return Err(MalformedDetection::new(format!(
            "array length mismatch: {} boxes, {} confidences, {} class indices",
            n,
            raw.confidences.len(),
            raw.class_indices.len()
        ))
        .into());
    }

    let mut detections = Vec::with_capacity(n);
    for i in 0..n {
        let [x_min, y_min, x_max, y_max] = raw.boxes[i];
        let class_index = raw.class_indices[i];
        let label = labels.label(class_index).ok_or_else(|| {
            MalformedDetection::new(format!("class index {} not in label map", class_index))
        })?;
        detections.push(Detection {
            label: label.to_string(),
            bbox: BoundingBox {
                x_min,
                y_min,
                x_max,
                y_max,
            },
            confidence: raw.confidences[i],
        });
    }
    Ok(detections)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> LabelMap {
        LabelMap::from_names(&["person", "car", "sidewalk"])
    }

    #[test]
    fn empty_output_normalizes_to_empty_list() {
        let raw = RawDetections::default();
        let detections = normalize(&raw, &labels()).unwrap();
        assert!(detections.is_empty());
    }

    #[test]
    fn records_carry_label_box_and_confidence() {
        let raw = RawDetections {
            boxes: vec![[10.0, 20.0, 110.0, 220.0], [0.0, 0.0, 50.0, 60.0]],
            confidences: vec![0.91, 0.4],
            class_indices: vec![0, 2],
        };
        let detections = normalize(&raw, &labels()).unwrap();
        assert_eq!(detections.len(), 2);
        assert_eq!(detections[0].label, "person");
        assert_eq!(detections[0].confidence, 0.91);
        assert_eq!(detections[0].bbox.x_max, 110.0);
        assert_eq!(detections[1].label, "sidewalk");
    }

    #[test]
    fn low_confidence_passes_through() {
        let raw = RawDetections {
            boxes: vec![[0.0, 0.0, 10.0, 10.0]],
            confidences: vec![0.01],
            class_indices: vec![1],
        };
        let detections = normalize(&raw, &labels()).unwrap();
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].confidence, 0.01);
    }

    #[test]
    fn length_mismatch_is_malformed() {
        let raw = RawDetections {
            boxes: vec![[0.0, 0.0, 10.0, 10.0]],
            confidences: vec![],
            class_indices: vec![0],
        };
        let err = normalize(&raw, &labels()).unwrap_err();
        assert!(err.downcast_ref::<MalformedDetection>().is_some());
    }

    #[test]
    fn unresolvable_class_index_is_malformed() {
        let raw = RawDetections {
            boxes: vec![[0.0, 0.0, 10.0, 10.0]],
            confidences: vec![0.8],
            class_indices: vec![99],
        };
        let err = normalize(&raw, &labels()).unwrap_err();
        assert!(err.downcast_ref::<MalformedDetection>().is_some());
    }
}
