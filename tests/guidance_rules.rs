//! End-to-end guidance behavior through the public API: one frame in, one
//! sentence out, with repeat suppression layered on top.

use visionmate::{
    Announcer, BoundingBox, Detection, FeedbackSynthesizer, InvalidFrameGeometry, PATH_CLEAR,
};

const W: i64 = 640;
const H: i64 = 480;

fn det(label: &str, x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Detection {
    Detection {
        label: label.to_string(),
        bbox: BoundingBox {
            x_min,
            y_min,
            x_max,
            y_max,
        },
        confidence: 0.9,
    }
}

#[test]
fn empty_frame_is_path_clear() {
    let synth = FeedbackSynthesizer::default();
    assert_eq!(synth.synthesize(&[], W, H).unwrap(), PATH_CLEAR);
}

#[test]
fn zero_geometry_is_rejected() {
    let synth = FeedbackSynthesizer::default();
    let err = synth.synthesize(&[], 0, H).unwrap_err();
    let geom = err.downcast_ref::<InvalidFrameGeometry>().unwrap();
    assert_eq!(geom.width, 0);
    assert_eq!(geom.height, 480);
}

#[test]
fn critical_hazard_underfoot_is_extreme_warning() {
    let synth = FeedbackSynthesizer::default();
    let msg = synth
        .synthesize(&[det("pole", 250.0, 200.0, 350.0, 470.0)], W, H)
        .unwrap();
    assert_eq!(msg, "EXTREME WARNING! pole ahead! STOP NOW!");
}

#[test]
fn nearby_vehicle_is_hazard_alert() {
    let synth = FeedbackSynthesizer::default();
    let msg = synth
        .synthesize(&[det("person", 100.0, 100.0, 200.0, 350.0)], W, H)
        .unwrap();
    assert_eq!(msg, "HAZARD ALERT: person to the left and nearby.");
}

#[test]
fn crosswalk_with_green_signal_clears_to_proceed() {
    let synth = FeedbackSynthesizer::default();
    let detections = [
        det("crosswalk", 100.0, 200.0, 500.0, 380.0),
        det("green_light", 300.0, 50.0, 320.0, 80.0),
    ];
    let msg = synth.synthesize(&detections, W, H).unwrap();
    assert_eq!(msg, "Navigation update: Clear to proceed. Crosswalk ahead.");
}

#[test]
fn crosswalk_without_signal_says_wait() {
    let synth = FeedbackSynthesizer::default();
    let msg = synth
        .synthesize(&[det("crosswalk", 100.0, 200.0, 500.0, 380.0)], W, H)
        .unwrap();
    assert_eq!(msg, "Crosswalk detected. Wait for signal or verbal confirmation.");
}

#[test]
fn missing_path_marker_warns() {
    let synth = FeedbackSynthesizer::default();
    let msg = synth
        .synthesize(&[det("sign", 500.0, 50.0, 600.0, 100.0)], W, H)
        .unwrap();
    assert_eq!(
        msg,
        "Guidance Note: Path (sidewalk/blind road) not detected. Proceed with caution."
    );
}

#[test]
fn sidewalk_alone_is_quietly_safe() {
    let synth = FeedbackSynthesizer::default();
    let msg = synth
        .synthesize(&[det("sidewalk", 100.0, 300.0, 540.0, 470.0)], W, H)
        .unwrap();
    assert_eq!(msg, "Path clear. Proceeding safely.");
}

#[test]
fn synthesis_is_deterministic() {
    let synth = FeedbackSynthesizer::default();
    let detections = [
        det("person", 100.0, 100.0, 200.0, 350.0),
        det("sidewalk", 0.0, 300.0, 640.0, 470.0),
    ];
    let first = synth.synthesize(&detections, W, H).unwrap();
    for _ in 0..10 {
        assert_eq!(synth.synthesize(&detections, W, H).unwrap(), first);
    }
}

#[test]
fn announcer_suppresses_repeats_across_frames() {
    let synth = FeedbackSynthesizer::default();
    let mut announcer = Announcer::new();
    let mut spoken = Vec::new();

    let frames: [&[Detection]; 4] = [
        &[],
        &[],
        &[det("pole", 250.0, 200.0, 350.0, 470.0)],
        &[det("pole", 250.0, 200.0, 350.0, 470.0)],
    ];
    for detections in frames {
        let msg = synth.synthesize(detections, W, H).unwrap();
        if announcer.observe(&msg) {
            spoken.push(msg);
        }
    }

    assert_eq!(
        spoken,
        vec![PATH_CLEAR.to_string(), "EXTREME WARNING! pole ahead! STOP NOW!".to_string()]
    );

    // After a reset the next message is spoken again even if unchanged.
    announcer.reset();
    let msg = synth
        .synthesize(&[det("pole", 250.0, 200.0, 350.0, 470.0)], W, H)
        .unwrap();
    assert!(announcer.observe(&msg));
}
