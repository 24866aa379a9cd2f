use super::*;

#[test]
fn hide_then_show_replays_the_saved_offset() {
    let mut lc = LifecycleState::default();
    assert_eq!(lc.on_visibility_change(true, 1234.5), Some(Recovery::Freeze));
    assert!(lc.is_frozen());
    assert_eq!(lc.state(), Lifecycle::Frozen { saved_offset: 1234.5 });

    // Repeated hidden events keep the first offset.
    assert_eq!(lc.on_visibility_change(true, 99.0), None);

    assert_eq!(
        lc.on_visibility_change(false, 0.0),
        Some(Recovery::Resume { offset: 1234.5 })
    );
    assert!(!lc.is_frozen());
    assert_eq!(lc.on_visibility_change(false, 0.0), None);
}

#[test]
fn cached_restore_resets_even_when_frozen() {
    let mut lc = LifecycleState::default();
    assert_eq!(lc.on_page_show(false), None);
    lc.on_visibility_change(true, 500.0);
    assert_eq!(lc.on_page_show(true), Some(Recovery::ResetToTop));
    assert_eq!(lc.state(), Lifecycle::Running);
}
