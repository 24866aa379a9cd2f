use super::*;

const EL: ElementId = ElementId(1);

fn linear(d: f64) -> TweenSpec {
    TweenSpec::new(d, Ease::Linear)
}

fn tag(token: u64) -> Option<CompletionTag> {
    Some(CompletionTag {
        owner: ElementId(99),
        token,
    })
}

#[test]
fn from_to_renders_start_immediately_and_completes_once() {
    let mut a = Animator::new();
    a.from_to(
        EL,
        &[(StyleProp::Opacity, 0.0), (StyleProp::X, 120.0)],
        &[(StyleProp::Opacity, 1.0), (StyleProp::X, 0.0)],
        linear(1.0),
        tag(1),
    );
    assert_eq!(a.value(EL, StyleProp::Opacity), 0.0);
    assert_eq!(a.value(EL, StyleProp::Visibility), 0.0);

    assert!(a.tick(0.5).is_empty());
    assert!((a.value(EL, StyleProp::X) - 60.0).abs() < 1e-9);
    assert_eq!(a.value(EL, StyleProp::Visibility), 1.0);

    let events = a.tick(1.0);
    assert_eq!(events.len(), 1);
    let TweenEvent::Completed { tag: t, .. } = events[0];
    assert_eq!(t, tag(1));
    assert_eq!(a.value(EL, StyleProp::X), 0.0);
    assert!(a.tick(2.0).is_empty());
    assert_eq!(a.running(), 0);
}

#[test]
fn to_starts_from_current_value() {
    let mut a = Animator::new();
    a.set(EL, &[(StyleProp::Scale, 0.9)]);
    a.set_clock(10.0);
    a.to(EL, &[(StyleProp::Scale, 1.1)], linear(2.0), None);
    a.tick(11.0);
    assert!((a.value(EL, StyleProp::Scale) - 1.0).abs() < 1e-9);
}

#[test]
fn conflicting_tween_is_cancelled_without_completion() {
    let mut a = Animator::new();
    let first = a.to(EL, &[(StyleProp::Opacity, 0.0)], linear(1.0), tag(1));
    a.tick(0.5);
    let second = a.to(EL, &[(StyleProp::Opacity, 1.0)], linear(1.0), tag(2));
    assert!(!a.is_running(first));
    assert!(a.is_running(second));

    let events = a.tick(1.6);
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], TweenEvent::Completed { tag: t, .. } if t == tag(2)));
}

#[test]
fn disjoint_properties_do_not_conflict() {
    let mut a = Animator::new();
    a.to(EL, &[(StyleProp::Scale, 2.0)], linear(1.0), None);
    a.to(EL, &[(StyleProp::Opacity, 0.0)], linear(1.0), None);
    assert_eq!(a.running(), 2);
    assert_eq!(a.cancel_element(EL), 2);
}

#[test]
fn delayed_tween_waits() {
    let mut a = Animator::new();
    a.from_to(
        EL,
        &[(StyleProp::Y, 30.0)],
        &[(StyleProp::Y, 0.0)],
        linear(1.0).delayed(0.5),
        None,
    );
    a.tick(0.4);
    assert_eq!(a.value(EL, StyleProp::Y), 30.0);
    a.tick(1.0);
    assert!((a.value(EL, StyleProp::Y) - 15.0).abs() < 1e-9);
}

#[test]
fn complete_now_snaps_matching_tweens() {
    let mut a = Animator::new();
    a.to(EL, &[(StyleProp::X, 100.0)], linear(1.0), tag(7));
    a.to(ElementId(2), &[(StyleProp::X, 50.0)], linear(1.0), tag(8));
    let events = a.complete_now(|t| t.token == 7);
    assert_eq!(events.len(), 1);
    assert_eq!(a.value(EL, StyleProp::X), 100.0);
    assert_eq!(a.running(), 1);
}

#[test]
fn zero_duration_finishes_on_next_tick() {
    let mut a = Animator::new();
    a.to(EL, &[(StyleProp::X, 5.0)], linear(0.0), tag(3));
    assert_eq!(a.tick(0.0).len(), 1);
    assert_eq!(a.value(EL, StyleProp::X), 5.0);
}

#[test]
fn clock_never_rewinds_and_writes_drain() {
    let mut a = Animator::new();
    a.set_clock(5.0);
    a.set_clock(1.0);
    assert_eq!(a.clock(), 5.0);
    a.set(EL, &[(StyleProp::ZIndex, 10.0)]);
    let writes = a.drain_writes();
    assert_eq!(writes.len(), 1);
    assert!(a.drain_writes().is_empty());
}
