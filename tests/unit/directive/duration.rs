use super::*;
use serde_json::json;

#[test]
fn accepts_every_declared_shape() {
    assert_eq!(
        DurationSpec::from_value(&json!(2)).unwrap(),
        DurationSpec::ViewportMultiple(2.0)
    );
    assert_eq!(
        DurationSpec::from_value(&json!("150vh")).unwrap(),
        DurationSpec::ViewportPercent(150.0)
    );
    assert_eq!(
        DurationSpec::from_value(&json!("900px")).unwrap(),
        DurationSpec::Px(900.0)
    );
    assert_eq!(
        DurationSpec::from_value(&json!("50%")).unwrap(),
        DurationSpec::SelfPercent(50.0)
    );
    assert_eq!(
        DurationSpec::from_value(&json!("1.5")).unwrap(),
        DurationSpec::ViewportMultiple(1.5)
    );
}

#[test]
fn rejects_wrong_types() {
    assert!(DurationSpec::from_value(&json!(true)).is_err());
    assert!(DurationSpec::from_value(&json!("lots")).is_err());
}

#[test]
fn resolves_each_unit() {
    let vp = Viewport::new(1200.0, 800.0);
    assert_eq!(DurationSpec::ViewportMultiple(2.0).resolve(vp, 0.0), 1600.0);
    assert_eq!(DurationSpec::ViewportPercent(300.0).resolve(vp, 0.0), 2400.0);
    assert_eq!(DurationSpec::Px(900.0).resolve(vp, 0.0), 900.0);
    assert_eq!(DurationSpec::SelfPercent(50.0).resolve(vp, 640.0), 320.0);
}

#[test]
fn degenerate_durations_collapse_to_zero() {
    let vp = Viewport::new(1200.0, 800.0);
    assert_eq!(DurationSpec::Px(-40.0).resolve(vp, 0.0), 0.0);
    assert_eq!(DurationSpec::ViewportMultiple(f64::NAN).resolve(vp, 0.0), 0.0);
    assert_eq!(DurationSpec::ViewportMultiple(1.0).resolve(Viewport::new(0.0, 0.0), 0.0), 0.0);
}
