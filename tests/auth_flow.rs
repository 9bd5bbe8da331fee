//! A full voice session driven through the public API: registration,
//! login, and a video analysis kicked off from the home stage.

use std::time::Duration;

use visionmate::{
    run_video_analysis, AuthFlow, FeedbackSynthesizer, FileConfig, FileSource, FlowEvent,
    PipelineOptions, RecordingSink, RunControl, ScriptedSource, SpeechSource, StubBackend,
    UserStore,
};

#[test]
fn scripted_session_registers_logs_in_and_analyzes() {
    let mut store = UserStore::open(":memory:").expect("open store");
    let mut flow = AuthFlow::new();
    let mut source = ScriptedSource::new([
        "register",
        "Jane Doe",
        "jane at example dot com",
        "jane 123",
        "hunter 22",
        "login",
        "jane123",
        "hunter22",
        "analyze video",
        "logout",
    ]);
    let mut sink = RecordingSink::default();
    let mut analyses = 0;

    loop {
        let heard = source.listen().expect("listen");
        let done = heard.is_none();
        let reply = flow.handle(&mut store, heard.as_deref()).expect("handle");
        sink.spoken.push(reply.speech.clone());

        match reply.event {
            FlowEvent::StartAnalysis => {
                analyses += 1;
                let stats = analyze(&mut sink);
                assert!(stats > 0);
            }
            FlowEvent::LoggedOut => break,
            _ => {}
        }
        assert!(!done, "script exhausted before logout");
    }

    assert_eq!(analyses, 1);
    assert!(sink
        .spoken
        .iter()
        .any(|line| line.contains("Registration successful")));
    assert!(sink
        .spoken
        .iter()
        .any(|line| line.contains("Login successful")));
    assert!(sink.spoken.iter().any(|line| line.contains("Logging out")));
}

fn analyze(sink: &mut RecordingSink) -> u64 {
    let mut source = FileSource::new(FileConfig {
        path: "stub://walk".to_string(),
        target_fps: 5,
        width: 640,
        height: 480,
    })
    .expect("stub source");
    let mut backend = StubBackend::new();
    let synthesizer = FeedbackSynthesizer::default();
    let control = RunControl::new();
    let options = PipelineOptions {
        speech_enabled: true,
        frame_delay: Duration::ZERO,
    };

    let stats = run_video_analysis(
        &mut source,
        &mut backend,
        &synthesizer,
        sink,
        &control,
        &options,
    )
    .expect("pipeline");
    stats.messages_spoken
}
