use super::*;
use serde_json::json;

#[test]
fn directives_deserialize_by_kind() {
    let tagged: TaggedElement = serde_json::from_value(json!({
        "element": 3,
        "directives": [
            { "kind": "pin", "duration": "900px", "pinSpacing": false },
            { "kind": "stages", "items": [10, 11, 12], "animateInRight": true, "companion": 20 },
            { "kind": "followers", "eyes": [{ "_key": "a", "x": 10, "y": 20 }], "enableClickToAdd": true }
        ]
    }))
    .unwrap();
    assert_eq!(tagged.element, ElementId(3));
    assert_eq!(tagged.directives.len(), 3);

    let Directive::Pin(pin) = &tagged.directives[0] else {
        panic!("expected pin");
    };
    let spec = pin.validate();
    assert_eq!(spec.duration, DurationSpec::Px(900.0));
    assert!(!spec.pin_spacing);
    assert_eq!(spec.start, StartSpec::parse(StartSpec::DEFAULT_PIN).unwrap());

    let Directive::Stages(stages) = &tagged.directives[1] else {
        panic!("expected stages");
    };
    let spec = stages.validate();
    assert_eq!(spec.drift, spec.items);
    assert!(spec.animate_in_right);
    assert_eq!(spec.companion, Some(ElementId(20)));
}

#[test]
fn pin_defaults_and_bad_fields_degrade() {
    let spec = PinDirective {
        enabled: true,
        start: Some("???".to_string()),
        duration: Some(json!({ "nope": 1 })),
        pin_spacing: None,
    }
    .validate();
    assert_eq!(spec.duration, DurationSpec::Px(0.0));
    assert!(spec.pin_spacing);
    assert_eq!(spec.start, StartSpec::parse(StartSpec::DEFAULT_PIN).unwrap());

    assert_eq!(
        PinDirective::default().validate().duration,
        DurationSpec::ViewportPercent(300.0)
    );
}

#[test]
fn mismatched_drift_layers_fall_back_to_items() {
    let spec = StageDirective {
        items: vec![ElementId(1), ElementId(2)],
        drift: Some(vec![ElementId(9)]),
        ..StageDirective::default()
    }
    .validate();
    assert_eq!(spec.drift, vec![ElementId(1), ElementId(2)]);
}

#[test]
fn follower_metrics_prefer_mobile_overrides() {
    let cfg = FollowerConfig {
        x: Some(10.0),
        y: None,
        size: Some(90.0),
        x_mobile: Some(40.0),
        size_mobile: Some(50.0),
        ..FollowerConfig::default()
    };
    let d = cfg.metrics(false);
    assert_eq!((d.x_percent, d.y_percent, d.size), (10.0, 50.0, 90.0));
    let m = cfg.metrics(true);
    assert_eq!((m.x_percent, m.y_percent, m.size), (40.0, 50.0, 50.0));
    assert_eq!(cfg.physics_key(false), "10-50-90-d");
    assert_eq!(cfg.physics_key(true), "40-50-50-m");
}

#[test]
fn spawn_bounds_are_ordered() {
    let spec = FollowerDirective {
        min_spawn_scale: Some(1.5),
        max_spawn_scale: Some(0.5),
        ..FollowerDirective::default()
    }
    .validate();
    assert_eq!((spec.spawn_min, spec.spawn_max), (0.5, 1.5));
    assert!(!spec.click_to_add);

    let spec = FollowerDirective::default().validate();
    assert_eq!((spec.spawn_min, spec.spawn_max), (0.6, 1.2));
}
