//! VisionMate
//!
//! Spoken navigational guidance for visually impaired pedestrians, driven
//! by per-frame object detections.
//!
//! # Architecture
//!
//! Each frame flows through a fixed chain:
//!
//! 1. **Ingest**: a local video source supplies frames sequentially.
//! 2. **Detect**: a detector backend produces raw parallel arrays which
//!    are normalized into labeled, bounded detections.
//! 3. **Guidance**: the synthesizer scores every detection and walks a
//!    strict precedence chain to pick exactly one message per frame.
//! 4. **Announce**: the announcer suppresses consecutive repeats so the
//!    same message is never spoken twice in a row.
//! 5. **Speak**: a speech sink voices whatever survives suppression.
//!
//! The synthesizer is pure: identical detections and frame geometry always
//! produce the identical message. All cross-frame state lives in the
//! caller-held [`guidance::Announcer`].
//!
//! # Module Structure
//!
//! - `guidance`: categories, scoring, the feedback synthesizer, announcer
//! - `detect`: detection types, normalization, detector backends
//! - `ingest`: local file frame sources
//! - `speech`: speech sink/source traits and voice command matching
//! - `auth`: credential store and the voice login state machine
//! - `pipeline`: the frame loop gluing the above together
//! - `config`: file plus environment configuration

pub mod auth;
pub mod config;
pub mod detect;
pub mod guidance;
pub mod ingest;
pub mod pipeline;
pub mod speech;

pub use auth::{AuthFlow, AuthReply, FlowEvent, LoginOutcome, RegisterOutcome, UserStore};
pub use config::VisionmateConfig;
pub use detect::{
    normalize, BoundingBox, Detection, DetectorBackend, LabelMap, MalformedDetection,
    RawDetections, StubBackend,
};
pub use guidance::{
    Announcer, CategoryTable, FeedbackSynthesizer, InvalidFrameGeometry, PATH_CLEAR,
};
pub use ingest::{FileConfig, FileSource, VideoFrame};
pub use pipeline::{run_video_analysis, AnalysisStats, PipelineOptions, RunControl};
pub use speech::{LogSink, RecordingSink, ScriptedSource, SpeechSink, SpeechSource, StdinSource};
