//! Hazard category configuration.
//!
//! Every detector label resolves to at most one [`HazardCategory`]. The table
//! is injectable so deployments can retune which classes count as critical
//! without a code change. Category sets MUST be disjoint; overlap is a
//! configuration error rejected at construction time, never resolved
//! implicitly during scoring.

use std::collections::HashMap;

use anyhow::{anyhow, Result};

/// Static classification of a detector label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HazardCategory {
    /// Immobile street furniture the user can walk into (weight 5).
    Critical,
    /// Moving traffic participants that require stopping when close (weight 3).
    Stop,
    /// Red lights and stop signs (weight 4).
    TrafficControl,
    /// Green lights.
    GoControl,
    /// Structural path elements (crosswalks, sidewalks, bridges).
    PathGuidance,
}

impl HazardCategory {
    /// Scoring weight applied to detections in this category.
    pub fn weight(self) -> f32 {
        match self {
            HazardCategory::Critical => 5.0,
            HazardCategory::Stop => 3.0,
            HazardCategory::TrafficControl => 4.0,
            HazardCategory::GoControl | HazardCategory::PathGuidance => 1.0,
        }
    }
}

/// Per-label descriptor computed once per detection.
///
/// Collapses the repeated set-membership tests into a single lookup so the
/// rule chain reads as guarded branches over these flags.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CategoryDescriptor {
    pub weight: f32,
    pub is_critical: bool,
    pub is_stop: bool,
    pub is_traffic_control: bool,
    pub is_go: bool,
    pub is_path: bool,
}

impl CategoryDescriptor {
    /// A stop is required for critical hazards, stop hazards, and any
    /// traffic-control detection.
    pub fn requires_stop(&self) -> bool {
        self.is_critical || self.is_stop || self.is_traffic_control
    }
}

/// Labels treated as unknown get weight 1 and no flags.
const UNKNOWN_DESCRIPTOR: CategoryDescriptor = CategoryDescriptor {
    weight: 1.0,
    is_critical: false,
    is_stop: false,
    is_traffic_control: false,
    is_go: false,
    is_path: false,
};

/// Injectable label-to-category table.
#[derive(Clone, Debug)]
pub struct CategoryTable {
    labels: HashMap<String, HazardCategory>,
}

impl CategoryTable {
    /// Build a table from the five category label sets.
    ///
    /// Fails if any label appears in more than one set.
    pub fn from_sets(
        critical: &[String],
        stop: &[String],
        traffic_control: &[String],
        go_control: &[String],
        path_guidance: &[String],
    ) -> Result<Self> {
        let mut labels = HashMap::new();
        let sets = [
            (HazardCategory::Critical, critical),
            (HazardCategory::Stop, stop),
            (HazardCategory::TrafficControl, traffic_control),
            (HazardCategory::GoControl, go_control),
            (HazardCategory::PathGuidance, path_guidance),
        ];
        for (category, set) in sets {
            for label in set {
                let label = label.trim();
                if label.is_empty() {
                    return Err(anyhow!("category table: empty label in {:?} set", category));
                }
                if let Some(existing) = labels.insert(label.to_string(), category) {
                    return Err(anyhow!(
                        "category table: label '{}' appears in both {:?} and {:?}",
                        label,
                        existing,
                        category
                    ));
                }
            }
        }
        Ok(Self { labels })
    }

    pub fn category(&self, label: &str) -> Option<HazardCategory> {
        self.labels.get(label).copied()
    }

    /// Resolve a label to its descriptor. Unknown labels are not an error;
    /// they score at weight 1 and fall through to the generic rules.
    pub fn descriptor(&self, label: &str) -> CategoryDescriptor {
        let Some(category) = self.category(label) else {
            return UNKNOWN_DESCRIPTOR;
        };
        CategoryDescriptor {
            weight: category.weight(),
            is_critical: category == HazardCategory::Critical,
            is_stop: category == HazardCategory::Stop,
            is_traffic_control: category == HazardCategory::TrafficControl,
            is_go: category == HazardCategory::GoControl,
            is_path: category == HazardCategory::PathGuidance,
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for CategoryTable {
    /// Label sets of the fine-tuned street navigation model.
    fn default() -> Self {
        let owned = |labels: &[&str]| -> Vec<String> {
            labels.iter().map(|label| label.to_string()).collect()
        };
        Self::from_sets(
            &owned(&[
                "blind_road",
                "ashcan",
                "fire_hydrant",
                "pole",
                "reflective_cone",
                "warning_column",
            ]),
            &owned(&[
                "person",
                "car",
                "bus",
                "truck",
                "motorcycle",
                "tricycle",
                "bicycle",
            ]),
            &owned(&["red_light", "stop sign"]),
            &owned(&["green_light"]),
            &owned(&[
                "crosswalk",
                "sign",
                "sidewalk",
                "square",
                "intersection",
                "bridge",
            ]),
        )
        .expect("default category sets are disjoint")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_weights() {
        let table = CategoryTable::default();
        assert_eq!(table.descriptor("pole").weight, 5.0);
        assert_eq!(table.descriptor("person").weight, 3.0);
        assert_eq!(table.descriptor("red_light").weight, 4.0);
        assert_eq!(table.descriptor("green_light").weight, 1.0);
        assert_eq!(table.descriptor("crosswalk").weight, 1.0);
        assert_eq!(table.descriptor("tree").weight, 1.0);
    }

    #[test]
    fn requires_stop_spans_three_categories() {
        let table = CategoryTable::default();
        assert!(table.descriptor("pole").requires_stop());
        assert!(table.descriptor("car").requires_stop());
        assert!(table.descriptor("stop sign").requires_stop());
        assert!(!table.descriptor("green_light").requires_stop());
        assert!(!table.descriptor("sidewalk").requires_stop());
        assert!(!table.descriptor("tree").requires_stop());
    }

    #[test]
    fn overlapping_sets_rejected() {
        let err = CategoryTable::from_sets(
            &["person".to_string()],
            &["person".to_string()],
            &[],
            &[],
            &[],
        )
        .unwrap_err();
        assert!(err.to_string().contains("person"));
    }

    #[test]
    fn unknown_label_gets_default_descriptor() {
        let table = CategoryTable::default();
        let desc = table.descriptor("unicycle");
        assert_eq!(desc.weight, 1.0);
        assert!(!desc.is_critical);
        assert!(!desc.requires_stop());
    }
}
