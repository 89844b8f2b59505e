use super::*;

#[test]
fn remote_state_json_is_class_tagged() {
    let s = RemoteState::Color(Pixel::new(1.0, 0.0, 0.5));
    let v = serde_json::to_value(s).unwrap();
    assert_eq!(
        v,
        serde_json::json!({ "class": "color", "value": [1.0, 0.0, 0.5] })
    );
    let back: RemoteState = serde_json::from_value(v).unwrap();
    assert_eq!(back, s);
}

#[test]
fn shuffler_payload_parses_from_json() {
    let s: RemoteState = serde_json::from_value(serde_json::json!({
        "class": "shuffler",
        "value": { "enabled": false, "cue_duration_millis": 1000 }
    }))
    .unwrap();
    assert_eq!(s.class(), StateClass::Shuffler);
}

#[test]
fn wrong_class_is_a_state_error() {
    let err = wrong_class(StateClass::Ramp, &RemoteState::Color(Pixel::black()));
    assert!(matches!(err, LumaError::State(_)));
    assert!(err.to_string().contains("Ramp"));
}
