//! Feedback synthesis: one guidance string per frame.
//!
//! The synthesizer is a pure function of the frame's detections and
//! geometry. It holds no cross-frame state; repeated-message suppression
//! lives in [`crate::guidance::Announcer`], threaded by the caller.
//!
//! The message decision is a strict precedence chain of guarded returns.
//! Rule order is load-bearing: the bridge and crosswalk rules may fall
//! through to later rules, all others are terminal when their guard holds.

use anyhow::Result;

use crate::detect::Detection;
use crate::guidance::category::CategoryTable;
use crate::guidance::score::{ProximityBand, ScoredDetection};

/// Frame dimensions must be positive; the caller should skip scoring for
/// the offending frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InvalidFrameGeometry {
    pub width: i64,
    pub height: i64,
}

impl std::fmt::Display for InvalidFrameGeometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid frame geometry: {}x{} (both dimensions must be positive)",
            self.width, self.height
        )
    }
}
impl std::error::Error for InvalidFrameGeometry {}

/// Spoken when a frame has no detections at all.
pub const PATH_CLEAR: &str = "Path clear. Proceeding.";

/// Labels that confirm a walkable path is in view.
const PATH_MARKERS: [&str; 2] = ["sidewalk", "blind_road"];

/// Hazard-prioritization and feedback-synthesis engine.
///
/// Owns only the immutable category table; safe to share across callers.
#[derive(Clone, Debug, Default)]
pub struct FeedbackSynthesizer {
    table: CategoryTable,
}

impl FeedbackSynthesizer {
    pub fn new(table: CategoryTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &CategoryTable {
        &self.table
    }

    /// Choose the single guidance sentence for one frame.
    ///
    /// Deterministic for identical inputs; never mutates its arguments;
    /// always returns a non-empty string for positive frame dimensions.
    pub fn synthesize(
        &self,
        detections: &[Detection],
        frame_width: i64,
        frame_height: i64,
    ) -> Result<String> {
        if frame_width <= 0 || frame_height <= 0 {
            return Err(InvalidFrameGeometry {
                width: frame_width,
                height: frame_height,
            }
            .into());
        }
        if detections.is_empty() {
            return Ok(PATH_CLEAR.to_string());
        }

        let frame_width = frame_width as f32;
        let frame_height = frame_height as f32;

        let mut has_red_signal = false;
        let mut has_green_signal = false;
        let mut has_path_marker = false;

        let mut scored: Vec<ScoredDetection<'_>> = Vec::with_capacity(detections.len());
        for detection in detections {
            let entry = ScoredDetection::new(detection, &self.table, frame_width, frame_height);
            // Any traffic-control detection forces stop-context, not just a
            // literal red light. Intentional conflation.
            has_red_signal |= entry.descriptor.is_traffic_control;
            has_green_signal |= entry.descriptor.is_go;
            has_path_marker |= PATH_MARKERS.contains(&entry.label);
            scored.push(entry);
        }

        // Stable sort: ties keep detector order.
        scored.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));
        let top = &scored[0];

        Ok(Self::decide(
            top,
            has_red_signal,
            has_green_signal,
            has_path_marker,
        ))
    }

    fn decide(
        top: &ScoredDetection<'_>,
        has_red_signal: bool,
        has_green_signal: bool,
        has_path_marker: bool,
    ) -> String {
        // 1. Traffic control wins outright.
        if top.descriptor.is_traffic_control || top.label == "red_light" {
            return format!("STOP! Traffic signal is RED {}.", top.direction.phrase());
        }

        // 2. Critical hazard right in front of the user.
        if top.descriptor.is_critical && top.band == ProximityBand::VeryClose {
            return format!(
                "EXTREME WARNING! {} {}! STOP NOW!",
                top.label,
                top.direction.phrase()
            );
        }

        // 3. Anything stop-worthy that is close enough to matter.
        if top.descriptor.requires_stop()
            && matches!(top.band, ProximityBand::VeryClose | ProximityBand::Nearby)
        {
            return format!(
                "HAZARD ALERT: {} {} and {}.",
                top.label,
                top.direction.phrase(),
                top.band.phrase()
            );
        }

        // 4. Turn guidance, only while the path ahead is unobstructed.
        if top.is_turn_cue
            && top.band != ProximityBand::VeryClose
            && !has_red_signal
            && !top.descriptor.requires_stop()
        {
            if let Some(turn) = top.direction.turn_word() {
                return format!(
                    "Navigation: Approach the turn. An {} is {}. Prepare to turn {}.",
                    top.label,
                    top.direction.phrase(),
                    turn
                );
            }
        }

        // 5. Bridge guidance. Falls through when the bridge is distant.
        if top.label == "bridge" {
            match top.band {
                ProximityBand::VeryClose => {
                    return "Structural update: Entering bridge now. Maintain steady path."
                        .to_string();
                }
                ProximityBand::Nearby => {
                    return format!("Attention! Approaching bridge {}.", top.direction.phrase());
                }
                ProximityBand::Distant => {}
            }
        }

        // 6. Crosswalk guidance.
        if top.label == "crosswalk" {
            if has_green_signal {
                return format!(
                    "Navigation update: Clear to proceed. Crosswalk {}.",
                    top.direction.phrase()
                );
            }
            return "Crosswalk detected. Wait for signal or verbal confirmation.".to_string();
        }

        // 7. No sidewalk or blind road in view: warn regardless of top.
        if !has_path_marker {
            return "Guidance Note: Path (sidewalk/blind road) not detected. Proceed with caution."
                .to_string();
        }

        // 8. Generic green light.
        if has_green_signal {
            return "Proceed. Green light ahead.".to_string();
        }

        // 9. Contextual object worth mentioning.
        if top.band == ProximityBand::Nearby {
            return format!(
                "Path context: A {} is {}.",
                top.label,
                top.direction.phrase()
            );
        }

        // 10. Nothing actionable.
        "Path clear. Proceeding safely.".to_string()
    }
}
