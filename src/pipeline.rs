//! Frame-processing loop.
//!
//! Per frame: acquire, detect, normalize, synthesize, suppress repeats,
//! speak. Malformed detector output degrades the frame to zero detections;
//! bad frame geometry skips the frame. Stop and pause flags are checked
//! between frames, never mid-frame.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use crate::detect::{normalize, DetectorBackend, MalformedDetection};
use crate::guidance::{Announcer, FeedbackSynthesizer, InvalidFrameGeometry};
use crate::ingest::FileSource;
use crate::speech::SpeechSink;

const PAUSE_POLL: Duration = Duration::from_millis(50);

/// Shared stop/pause switches for the loop. Clone freely; clones share
/// the underlying flags.
#[derive(Clone, Debug, Default)]
pub struct RunControl {
    stop: Arc<AtomicBool>,
    pause: Arc<AtomicBool>,
}

impl RunControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    pub fn set_paused(&self, paused: bool) {
        self.pause.store(paused, Ordering::SeqCst);
    }

    pub fn is_paused(&self) -> bool {
        self.pause.load(Ordering::SeqCst)
    }
}

#[derive(Clone, Debug, Default)]
pub struct AnalysisStats {
    pub frames_processed: u64,
    pub frames_degraded: u64,
    pub frames_skipped: u64,
    pub messages_spoken: u64,
    pub last_message: Option<String>,
}

pub struct PipelineOptions {
    pub speech_enabled: bool,
    /// Delay between frames; zero for as-fast-as-possible (tests).
    pub frame_delay: Duration,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            speech_enabled: true,
            frame_delay: Duration::from_millis(100),
        }
    }
}

/// Run the analysis loop over one video source until it is exhausted or
/// stop is requested.
pub fn run_video_analysis(
    source: &mut FileSource,
    backend: &mut dyn DetectorBackend,
    synthesizer: &FeedbackSynthesizer,
    sink: &mut dyn SpeechSink,
    control: &RunControl,
    options: &PipelineOptions,
) -> Result<AnalysisStats> {
    let labels = backend.labels();
    backend.warm_up()?;

    let mut announcer = Announcer::new();
    let mut stats = AnalysisStats::default();
    let total_frames = source.total_frames();

    loop {
        if control.is_stopped() {
            log::info!("analysis stopped at frame {}", stats.frames_processed);
            break;
        }
        if control.is_paused() {
            std::thread::sleep(PAUSE_POLL);
            continue;
        }

        let Some(frame) = source.next_frame()? else {
            log::info!("video ended after {} frames", stats.frames_processed);
            break;
        };

        let raw = backend.detect(&frame.pixels, frame.width, frame.height)?;
        let detections = match normalize(&raw, &labels) {
            Ok(detections) => detections,
            Err(e) if e.downcast_ref::<MalformedDetection>().is_some() => {
                // Detector hiccup: treat the frame as empty rather than
                // killing the run.
                log::warn!("frame {}: {}", frame.index, e);
                stats.frames_degraded += 1;
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        let message = match synthesizer.synthesize(
            &detections,
            frame.width as i64,
            frame.height as i64,
        ) {
            Ok(message) => message,
            Err(e) if e.downcast_ref::<InvalidFrameGeometry>().is_some() => {
                log::warn!("frame {}: {}", frame.index, e);
                stats.frames_skipped += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        stats.frames_processed += 1;
        if let Some(total) = total_frames {
            log::debug!("frame {}/{}: {}", frame.index + 1, total, message);
        }

        if announcer.observe(&message) {
            log::info!("guidance: {}", message);
            if options.speech_enabled {
                sink.say(&message)?;
            }
            stats.messages_spoken += 1;
            stats.last_message = Some(message);
        }

        if !options.frame_delay.is_zero() {
            std::thread::sleep(options.frame_delay);
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::StubBackend;
    use crate::ingest::{FileConfig, FileSource};
    use crate::speech::RecordingSink;

    fn source() -> FileSource {
        FileSource::new(FileConfig {
            path: "stub://walk".to_string(),
            target_fps: 10,
            width: 640,
            height: 480,
        })
        .unwrap()
    }

    fn options() -> PipelineOptions {
        PipelineOptions {
            speech_enabled: true,
            frame_delay: Duration::ZERO,
        }
    }

    #[test]
    fn processes_whole_stub_video() {
        let mut source = source();
        let mut backend = StubBackend::new();
        let synthesizer = FeedbackSynthesizer::default();
        let mut sink = RecordingSink::default();
        let control = RunControl::new();

        let stats = run_video_analysis(
            &mut source,
            &mut backend,
            &synthesizer,
            &mut sink,
            &control,
            &options(),
        )
        .unwrap();

        assert_eq!(stats.frames_processed, 100);
        assert_eq!(stats.frames_skipped, 0);
        // Repeats are suppressed: far fewer messages than frames.
        assert!(stats.messages_spoken < stats.frames_processed);
        assert_eq!(stats.messages_spoken, sink.spoken.len() as u64);
        assert!(sink.spoken.iter().any(|m| m.contains("STOP")));
    }

    #[test]
    fn stop_flag_halts_the_loop() {
        let mut source = source();
        let mut backend = StubBackend::new();
        let synthesizer = FeedbackSynthesizer::default();
        let mut sink = RecordingSink::default();
        let control = RunControl::new();
        control.request_stop();

        let stats = run_video_analysis(
            &mut source,
            &mut backend,
            &synthesizer,
            &mut sink,
            &control,
            &options(),
        )
        .unwrap();

        assert_eq!(stats.frames_processed, 0);
        assert!(sink.spoken.is_empty());
    }

    #[test]
    fn speech_disabled_still_counts_messages() {
        let mut source = source();
        let mut backend = StubBackend::new();
        let synthesizer = FeedbackSynthesizer::default();
        let mut sink = RecordingSink::default();
        let control = RunControl::new();
        let options = PipelineOptions {
            speech_enabled: false,
            frame_delay: Duration::ZERO,
        };

        let stats = run_video_analysis(
            &mut source,
            &mut backend,
            &synthesizer,
            &mut sink,
            &control,
            &options,
        )
        .unwrap();

        assert!(stats.messages_spoken > 0);
        assert!(sink.spoken.is_empty());
    }
}
