//! Frame ingestion.
//!
//! Frames come from local video files only; live camera ingestion is not a
//! goal. The source supplies frames sequentially and supports seeking so
//! the host loop can resume after a pause.

pub mod file;

pub use file::{FileConfig, FileSource, FileStats, VideoFrame};
