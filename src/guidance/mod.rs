//! Hazard prioritization and feedback synthesis.
//!
//! - `category`: injectable label-to-category table and per-label descriptors
//! - `score`: per-detection direction, proximity band, and final score
//! - `synthesizer`: the rule chain choosing one guidance sentence per frame
//! - `announcer`: caller-held suppression of repeated audio

pub mod announcer;
pub mod category;
pub mod score;
pub mod synthesizer;

pub use announcer::Announcer;
pub use category::{CategoryDescriptor, CategoryTable, HazardCategory};
pub use score::{Direction, ProximityBand, ScoredDetection};
pub use synthesizer::{FeedbackSynthesizer, InvalidFrameGeometry, PATH_CLEAR};
