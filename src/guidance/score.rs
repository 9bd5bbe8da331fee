//! Per-detection scoring.
//!
//! Lower-in-frame and larger boxes score higher, a proxy for closeness to
//! the camera. Band thresholds and multipliers are fixed; the per-label
//! weight comes from the category table.

use crate::detect::Detection;
use crate::guidance::category::{CategoryDescriptor, CategoryTable};

/// Horizontal position of a detection relative to the camera.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Ahead,
    Right,
}

impl Direction {
    /// Resolve from the box center. Boundaries are exclusive: a center
    /// exactly at 35% or 65% of the frame width is "ahead".
    pub fn from_center_x(center_x: f32, frame_width: f32) -> Self {
        if center_x < frame_width * 0.35 {
            Direction::Left
        } else if center_x > frame_width * 0.65 {
            Direction::Right
        } else {
            Direction::Ahead
        }
    }

    /// Phrase used inside guidance sentences.
    pub fn phrase(self) -> &'static str {
        match self {
            Direction::Left => "to the left",
            Direction::Ahead => "ahead",
            Direction::Right => "to the right",
        }
    }

    /// Bare turn word for turn-approach guidance. None when ahead.
    pub fn turn_word(self) -> Option<&'static str> {
        match self {
            Direction::Left => Some("left"),
            Direction::Right => Some("right"),
            Direction::Ahead => None,
        }
    }
}

/// Discretized closeness-to-camera classification from the box bottom edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProximityBand {
    VeryClose,
    Nearby,
    Distant,
}

impl ProximityBand {
    /// Bands are exclusive and evaluated top-down; first match wins.
    pub fn from_y_max(y_max: f32, frame_height: f32) -> Self {
        if y_max > frame_height * 0.8 {
            ProximityBand::VeryClose
        } else if y_max > frame_height * 0.6 {
            ProximityBand::Nearby
        } else {
            ProximityBand::Distant
        }
    }

    pub fn multiplier(self) -> f32 {
        match self {
            ProximityBand::VeryClose => 4.0,
            ProximityBand::Nearby => 2.0,
            ProximityBand::Distant => 1.0,
        }
    }

    pub fn phrase(self) -> &'static str {
        match self {
            ProximityBand::VeryClose => "VERY CLOSE",
            ProximityBand::Nearby => "nearby",
            ProximityBand::Distant => "in the distance",
        }
    }
}

/// A detection annotated with everything the rule chain needs.
#[derive(Clone, Debug)]
pub struct ScoredDetection<'a> {
    pub label: &'a str,
    pub direction: Direction,
    pub band: ProximityBand,
    pub final_score: f32,
    pub descriptor: CategoryDescriptor,
    pub is_turn_cue: bool,
}

impl<'a> ScoredDetection<'a> {
    pub fn new(
        detection: &'a Detection,
        table: &CategoryTable,
        frame_width: f32,
        frame_height: f32,
    ) -> Self {
        let bbox = &detection.bbox;
        let box_area = (bbox.x_max - bbox.x_min) * (bbox.y_max - bbox.y_min);
        let proximity_score = bbox.y_max * box_area;

        let direction = Direction::from_center_x(bbox.center_x(), frame_width);
        let band = ProximityBand::from_y_max(bbox.y_max, frame_height);
        let descriptor = table.descriptor(&detection.label);

        let final_score = proximity_score * band.multiplier() * descriptor.weight;

        let is_turn_cue = matches!(detection.label.as_str(), "intersection" | "square")
            && direction != Direction::Ahead;

        Self {
            label: &detection.label,
            direction,
            band,
            final_score,
            descriptor,
            is_turn_cue,
        }
    }
}
