use super::*;

#[test]
fn defaults_match_production_values() {
    let cfg = RuntimeConfig::default();
    assert_eq!(cfg.desktop_breakpoint_px, 1024.0);
    assert_eq!(cfg.follower_mobile_breakpoint_px, 768.0);
    assert_eq!(cfg.smooth_s, 1.0);
    assert_eq!(cfg.resize_debounce_s, 0.15);
    assert_eq!(cfg.storage_key, LAST_OFFSET_KEY);
    assert_eq!(cfg.spring.gravity, 1800.0);
    assert_eq!(cfg.stages.enter_offset_px, 120.0);
}

#[test]
fn partial_json_keeps_the_other_defaults() {
    let cfg = RuntimeConfig::from_json(
        r#"{ "smooth_s": 0.5, "spring": { "stiffness": 300 }, "stages": { "exit": { "duration_s": 0.2, "ease": "Linear" } } }"#,
    )
    .unwrap();
    assert_eq!(cfg.smooth_s, 0.5);
    assert_eq!(cfg.spring.stiffness, 300.0);
    assert_eq!(cfg.spring.damping, 20.0);
    assert_eq!(cfg.stages.exit.duration_s, 0.2);
    assert_eq!(cfg.stages.enter.duration_s, 0.6);
    assert_eq!(cfg.desktop_breakpoint_px, 1024.0);
}

#[test]
fn invalid_values_fall_back() {
    let cfg = RuntimeConfig {
        smooth_s: -1.0,
        resize_debounce_s: f64::NAN,
        ..RuntimeConfig::default()
    }
    .sanitized();
    assert_eq!(cfg.smooth_s, 1.0);
    assert_eq!(cfg.resize_debounce_s, 0.15);

    let mut hot = RuntimeConfig::default();
    hot.spring.restitution = 3.0;
    assert_eq!(hot.sanitized().spring.restitution, 1.0);
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = RuntimeConfig::from_json("{ nope").unwrap_err();
    assert!(matches!(err, crate::foundation::error::ScrollStageError::Serde(_)));
}
