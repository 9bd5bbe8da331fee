//! Detection records and the raw detector boundary types.

use std::collections::HashMap;

/// Axis-aligned box in pixel coordinates, `x_min <= x_max`, `y_min <= y_max`,
/// within the frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl BoundingBox {
    pub fn area(&self) -> f32 {
        (self.x_max - self.x_min) * (self.y_max - self.y_min)
    }

    pub fn center_x(&self) -> f32 {
        (self.x_min + self.x_max) / 2.0
    }
}

/// One object instance located in a single video frame.
///
/// Exists only for the duration of one frame's analysis; no identity across
/// frames.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    /// Class name resolved from the detector's vocabulary.
    pub label: String,
    pub bbox: BoundingBox,
    /// In `[0, 1]`. Carried through unfiltered; thresholds are the
    /// detector's concern.
    pub confidence: f32,
}

/// Native per-frame detector output: parallel arrays of boxes, confidences
/// and class indices. All three must be equal length.
#[derive(Clone, Debug, Default)]
pub struct RawDetections {
    /// `[x_min, y_min, x_max, y_max]` per detection.
    pub boxes: Vec<[f32; 4]>,
    pub confidences: Vec<f32>,
    pub class_indices: Vec<usize>,
}

impl RawDetections {
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }
}

/// Class index to label mapping supplied by the detector.
#[derive(Clone, Debug, Default)]
pub struct LabelMap {
    names: HashMap<usize, String>,
}

impl LabelMap {
    pub fn new(names: HashMap<usize, String>) -> Self {
        Self { names }
    }

    /// Build from a class vocabulary in index order.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        Self {
            names: names
                .iter()
                .enumerate()
                .map(|(index, name)| (index, name.as_ref().to_string()))
                .collect(),
        }
    }

    pub fn label(&self, class_index: usize) -> Option<&str> {
        self.names.get(&class_index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
