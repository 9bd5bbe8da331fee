use anyhow::Result;

use crate::detect::backend::DetectorBackend;
use crate::detect::result::{LabelMap, RawDetections};

/// Class vocabulary of the scripted backend, matching the street model.
const STUB_LABELS: [&str; 17] = [
    "person",
    "car",
    "bus",
    "truck",
    "motorcycle",
    "tricycle",
    "bicycle",
    "blind_road",
    "ashcan",
    "fire_hydrant",
    "pole",
    "reflective_cone",
    "warning_column",
    "red_light",
    "stop sign",
    "green_light",
    "crosswalk",
];

const CLASS_PERSON: usize = 0;
const CLASS_RED_LIGHT: usize = 13;
const CLASS_GREEN_LIGHT: usize = 15;
const CLASS_CROSSWALK: usize = 16;

/// Scripted backend for demos and tests. Cycles through representative
/// street scenes: clear path, a pedestrian closing in, a red signal, and a
/// crosswalk under a green light. Ignores pixel content.
pub struct StubBackend {
    frame_count: u64,
}

impl StubBackend {
    pub fn new() -> Self {
        Self { frame_count: 0 }
    }
}

impl Default for StubBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DetectorBackend for StubBackend {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn labels(&self) -> LabelMap {
        LabelMap::from_names(&STUB_LABELS)
    }

    fn detect(&mut self, _pixels: &[u8], width: u32, height: u32) -> Result<RawDetections> {
        let w = width as f32;
        let h = height as f32;
        let scene = self.frame_count / 25 % 4;
        let step = (self.frame_count % 25) as f32 / 25.0;
        self.frame_count += 1;

        let raw = match scene {
            // Clear path, nothing in view.
            0 => RawDetections::default(),
            // Pedestrian walking toward the camera on the left.
            1 => RawDetections {
                boxes: vec![[
                    w * 0.1,
                    h * 0.2,
                    w * (0.2 + 0.1 * step),
                    h * (0.5 + 0.45 * step),
                ]],
                confidences: vec![0.88],
                class_indices: vec![CLASS_PERSON],
            },
            // Red signal straight ahead.
            2 => RawDetections {
                boxes: vec![[w * 0.45, h * 0.1, w * 0.55, h * 0.35]],
                confidences: vec![0.93],
                class_indices: vec![CLASS_RED_LIGHT],
            },
            // Crosswalk with a green light.
            _ => RawDetections {
                boxes: vec![
                    [w * 0.3, h * 0.55, w * 0.7, h * 0.75],
                    [w * 0.45, h * 0.1, w * 0.55, h * 0.3],
                ],
                confidences: vec![0.81, 0.9],
                class_indices: vec![CLASS_CROSSWALK, CLASS_GREEN_LIGHT],
            },
        };
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::normalize;

    #[test]
    fn stub_scenes_normalize_cleanly() {
        let mut backend = StubBackend::new();
        let labels = backend.labels();
        for _ in 0..120 {
            let raw = backend.detect(&[], 640, 480).unwrap();
            let detections = normalize(&raw, &labels).unwrap();
            assert_eq!(detections.len(), raw.len());
        }
    }

    #[test]
    fn stub_cycle_covers_a_red_signal() {
        let mut backend = StubBackend::new();
        let labels = backend.labels();
        let mut saw_red = false;
        for _ in 0..100 {
            let raw = backend.detect(&[], 640, 480).unwrap();
            let detections = normalize(&raw, &labels).unwrap();
            saw_red |= detections.iter().any(|d| d.label == "red_light");
        }
        assert!(saw_red);
    }
}
