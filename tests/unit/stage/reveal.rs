use super::*;
use crate::directive::model::StageDirective;
use crate::foundation::core::Rect;
use crate::host::memory::MemoryHost;

const SECTION: ElementId = ElementId(5);

fn mobile_host() -> MemoryHost {
    let mut host = MemoryHost::new(Viewport::new(400.0, 800.0), 4000.0);
    host.set_rect(ElementId(30), Rect::new(0.0, 600.0, 400.0, 900.0));
    host.set_rect(ElementId(10), Rect::new(0.0, 1000.0, 400.0, 1300.0));
    host.set_rect(ElementId(11), Rect::new(0.0, 1400.0, 400.0, 1700.0));
    host
}

fn spec(items: Vec<ElementId>) -> StageSpec {
    StageDirective {
        items,
        intro: Some(ElementId(30)),
        ..StageDirective::default()
    }
    .validate()
}

#[test]
fn items_reveal_once_as_they_cross_ninety_percent() {
    let host = mobile_host();
    let mut section = RevealSection::new(
        SECTION,
        &spec(vec![ElementId(10), ElementId(11)]),
        false,
        &RevealTimings::default(),
    );
    section.measure(&host, |_| 0.0);
    let mut a = Animator::new();
    section.install(&mut a);
    assert_eq!(a.value(ElementId(10), StyleProp::Opacity), 0.0);
    assert_eq!(a.value(ElementId(10), StyleProp::Y), 30.0);

    // Intro top 600 reaches 85% of 800 before any scrolling.
    assert_eq!(
        section.update(0.0, &mut a),
        vec![StageEvent::Revealed {
            section: SECTION,
            element: ElementId(30)
        }]
    );
    assert!(section.update(279.0, &mut a).is_empty());
    assert_eq!(section.update(280.0, &mut a).len(), 1);
    assert!(section.update(300.0, &mut a).is_empty());
    assert!(!section.is_complete());
    assert_eq!(section.update(680.0, &mut a).len(), 1);
    assert!(section.is_complete());
}

#[test]
fn mobile_sections_start_with_the_first_item_active() {
    let section = RevealSection::new(
        SECTION,
        &spec(vec![ElementId(10)]),
        false,
        &RevealTimings::default(),
    );
    let snap = section.snapshot();
    assert_eq!((snap.active_index, snap.image_stage), (0, 2));
}

#[test]
fn stagger_delays_later_items() {
    let host = mobile_host();
    let mut section = RevealSection::new(
        SECTION,
        &spec(vec![ElementId(10), ElementId(11)]),
        false,
        &RevealTimings::default(),
    );
    section.measure(&host, |_| 0.0);
    let mut a = Animator::new();
    section.install(&mut a);
    section.update(2000.0, &mut a);

    a.tick(0.5);
    assert_eq!(a.value(ElementId(10), StyleProp::Opacity), 1.0);
    assert!(a.value(ElementId(11), StyleProp::Opacity) < 1.0);
    a.tick(0.6);
    assert_eq!(a.value(ElementId(11), StyleProp::Opacity), 1.0);
    assert_eq!(a.value(ElementId(11), StyleProp::Y), 0.0);
}

#[test]
fn lone_intro_uses_the_desktop_threshold() {
    let mut host = MemoryHost::new(Viewport::new(1440.0, 800.0), 4000.0);
    host.set_rect(ElementId(30), Rect::new(0.0, 1000.0, 1440.0, 1400.0));
    let mut section = RevealSection::new(SECTION, &spec(Vec::new()), true, &RevealTimings::default());
    section.measure(&host, |_| 0.0);
    let mut a = Animator::new();

    assert!(section.update(399.0, &mut a).is_empty());
    assert_eq!(section.update(400.0, &mut a).len(), 1);
    assert_eq!(section.snapshot(), StageSnapshot::default());
}

#[test]
fn missing_targets_never_fire_and_spacing_shifts_thresholds() {
    let host = mobile_host();
    let mut section = RevealSection::new(
        SECTION,
        &spec(vec![ElementId(10), ElementId(99)]),
        false,
        &RevealTimings::default(),
    );
    section.measure(&host, |top| if top >= 1000.0 { 500.0 } else { 0.0 });
    let mut a = Animator::new();

    section.update(0.0, &mut a);
    assert!(section.update(779.0, &mut a).is_empty());
    assert_eq!(section.update(780.0, &mut a).len(), 1);
    assert!(section.update(10_000.0, &mut a).is_empty());
    assert!(!section.is_complete());
}
