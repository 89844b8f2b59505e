use super::*;
use crate::{
    foundation::core::{Point3, TimePoint},
    patch::device::Device,
    show::control::Target,
    effects::effect::RemoteState,
};

const SHOW: &str = r#"{
    "fps": 40,
    "layers": [
        { "name": "woven", "level": 0.0,
          "effect": { "kind": "ramp", "color": [1, 1, 1], "build_millis": 200, "duration_millis": 1000 } },
        { "name": "red", "level": 0.0, "effect": { "kind": "monochrome", "color": [1, 0, 0] } },
        { "name": "green", "level": 0.0, "effect": { "kind": "monochrome", "color": [0, 1, 0] } },
        { "name": "wash", "effect": { "kind": "pulse", "color": [0, 0, 1], "period_millis": 2000 } }
    ],
    "shuffler": { "woven": 0, "start": 1, "end": 2, "timings": [[0.3, 0.3], [0.5, 0.2]], "seed": 7 }
}"#;

fn patch() -> Patch {
    Patch::new(vec![
        Device::new(1, 0, Point3::new(0.0, 0.0, 0.0)),
        Device::new(2, 0, Point3::new(4.0, 0.0, 0.0)),
    ])
    .unwrap()
}

#[test]
fn parses_defaults() {
    let cfg = ShowConfig::from_json(
        r#"{ "layers": [ { "effect": { "kind": "monochrome", "color": [0.2, 0.4, 0.6] } } ] }"#,
    )
    .unwrap();
    assert_eq!(cfg.fps, 30);
    assert!(cfg.shuffler.is_none());
    assert_eq!(cfg.layers[0].level, 1.0);
    assert!(cfg.layers[0].name.is_empty());
}

#[test]
fn builds_a_running_show() {
    let cfg = ShowConfig::from_json(SHOW).unwrap();
    let mut show = cfg.build(patch()).unwrap();
    assert_eq!(show.fps(), 40);
    assert_eq!(show.mixer().len(), 4);
    assert_eq!(show.mixer().layer(0).unwrap().name(), "woven");
    let id = show.shuffler().unwrap();
    assert_eq!(
        show.state_of(Target::Animator(id)).map(|s| s.class()),
        Some(crate::effects::effect::StateClass::Shuffler)
    );

    let frame = show.tick(TimePoint::new(0, 0)).unwrap();
    assert_eq!(frame.len(), 2);
    assert_eq!(show.mixer().unit(0).unwrap().level(), 1.0);
}

#[test]
fn shuffler_seed_and_cue_length_are_applied() {
    let json = SHOW.replace(r#""seed": 7"#, r#""seed": 7, "texture_cue_millis": 9000"#);
    let show = ShowConfig::from_json(&json).unwrap().build(patch()).unwrap();
    let id = show.shuffler().unwrap();
    match show.state_of(Target::Animator(id)) {
        Some(RemoteState::Shuffler(state)) => assert_eq!(state.cue_duration_millis, 9000),
        other => panic!("unexpected state {other:?}"),
    }
}

#[test]
fn rejects_an_empty_stack() {
    let err = ShowConfig::from_json(r#"{ "layers": [] }"#).unwrap_err();
    assert!(matches!(err, LumaError::Config(_)));
}

#[test]
fn rejects_zero_fps() {
    let err = ShowConfig::from_json(
        r#"{ "fps": 0, "layers": [ { "effect": { "kind": "monochrome", "color": [0, 0, 0] } } ] }"#,
    )
    .unwrap_err();
    assert!(matches!(err, LumaError::Config(_)));
}

#[test]
fn rejects_unknown_effects_as_serde_errors() {
    let err = ShowConfig::from_json(
        r#"{ "layers": [ { "effect": { "kind": "strobe", "color": [0, 0, 0] } } ] }"#,
    )
    .unwrap_err();
    assert!(matches!(err, LumaError::Serde(_)));
}

#[test]
fn timing_count_must_match_the_range() {
    let json = SHOW.replace("[[0.3, 0.3], [0.5, 0.2]]", "[[0.3, 0.3]]");
    let err = ShowConfig::from_json(&json).unwrap().build(patch()).unwrap_err();
    assert!(err.to_string().contains("needs 2 timings"));
}

#[test]
fn out_of_range_timing_is_rejected() {
    let json = SHOW.replace("[0.5, 0.2]", "[1.5, 0.2]");
    let err = ShowConfig::from_json(&json).unwrap_err();
    assert!(matches!(err, LumaError::Config(_)));
}

#[test]
fn woven_layer_must_be_a_cue() {
    let json = SHOW.replace(r#""woven": 0, "start": 1, "end": 2"#, r#""woven": 3, "start": 1, "end": 2"#);
    let err = ShowConfig::from_json(&json).unwrap().build(patch()).unwrap_err();
    assert!(matches!(err, LumaError::Config(_)));
}
