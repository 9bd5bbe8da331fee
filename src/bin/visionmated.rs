//! visionmated - VisionMate assistant daemon
//!
//! This daemon:
//! 1. Loads configuration (JSON file plus `VISIONMATE_*` env overrides)
//! 2. Opens the user credential store
//! 3. Runs the voice login/registration flow over the speech boundary
//! 4. On "analyze video", runs the detection-to-guidance pipeline over the
//!    configured video source
//! 5. Stops cleanly on Ctrl-C, between frames

use anyhow::Result;
use std::time::Duration;

use visionmate::{
    run_video_analysis, AuthFlow, FeedbackSynthesizer, FileSource, FlowEvent, LogSink,
    PipelineOptions, RunControl, SpeechSink, SpeechSource, StdinSource, StubBackend, UserStore,
    VisionmateConfig,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = VisionmateConfig::load()?;
    log::info!(
        "visionmated {} starting. db={} video={}",
        env!("CARGO_PKG_VERSION"),
        cfg.db_path,
        cfg.video.path
    );

    let mut store = UserStore::open(&cfg.db_path)?;

    let control = RunControl::new();
    {
        let control = control.clone();
        ctrlc::set_handler(move || {
            log::info!("interrupt received, stopping");
            control.request_stop();
        })?;
    }

    let mut sink = LogSink;
    let mut source = StdinSource;
    let mut flow = AuthFlow::new();

    sink.say(&flow.prompt())?;
    loop {
        if control.is_stopped() {
            break;
        }

        let heard = source.listen()?;
        if heard.is_none() && control.is_stopped() {
            break;
        }

        let reply = flow.handle(&mut store, heard.as_deref())?;
        sink.say(&reply.speech)?;

        match reply.event {
            FlowEvent::StartAnalysis => {
                if let Err(e) = analyze(&cfg, &mut sink, &control) {
                    log::error!("analysis failed: {}", e);
                    sink.say("Video analysis failed. Returning to the menu.")?;
                }
                if control.is_stopped() {
                    break;
                }
                sink.say(&flow.prompt())?;
            }
            FlowEvent::LoggedIn => sink.say(&flow.prompt())?,
            FlowEvent::LoggedOut => break,
            FlowEvent::None => {}
        }
    }

    log::info!("visionmated stopped");
    Ok(())
}

fn analyze(cfg: &VisionmateConfig, sink: &mut dyn SpeechSink, control: &RunControl) -> Result<()> {
    let mut source = FileSource::new(cfg.video.file_config())?;
    source.connect()?;

    let mut backend = StubBackend::new();
    let synthesizer = FeedbackSynthesizer::new(cfg.categories.table()?);
    let options = PipelineOptions {
        speech_enabled: cfg.speech.enabled,
        frame_delay: Duration::from_millis(1000 / cfg.video.target_fps.max(1) as u64),
    };

    let stats = run_video_analysis(
        &mut source,
        &mut backend,
        &synthesizer,
        sink,
        control,
        &options,
    )?;

    log::info!(
        "analysis done: {} frames, {} messages, {} degraded, {} skipped",
        stats.frames_processed,
        stats.messages_spoken,
        stats.frames_degraded,
        stats.frames_skipped
    );
    sink.say("Video analysis complete.")?;
    Ok(())
}
