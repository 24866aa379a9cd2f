use super::*;

#[test]
fn progress_is_clamped_and_linear() {
    let w = PinWindow::new(100.0, 900.0);
    assert_eq!(w.end, 1000.0);
    assert_eq!(w.progress(0.0), 0.0);
    assert_eq!(w.progress(100.0), 0.0);
    assert!((w.progress(550.0) - 0.5).abs() < 1e-12);
    assert_eq!(w.progress(1000.0), 1.0);
    assert_eq!(w.progress(5000.0), 1.0);
}

#[test]
fn zero_width_window_steps_at_start() {
    let w = PinWindow::new(300.0, 0.0);
    assert_eq!(w.duration(), 0.0);
    assert_eq!(w.progress(299.0), 0.0);
    assert_eq!(w.progress(300.0), 0.0);
    assert_eq!(w.progress(300.5), 1.0);

    let negative = PinWindow::new(300.0, -50.0);
    assert_eq!(negative.end, 300.0);
}

#[test]
fn pin_shift_tracks_offset_inside_window() {
    let w = PinWindow::new(100.0, 900.0);
    assert_eq!(w.pin_shift(50.0), 0.0);
    assert_eq!(w.pin_shift(400.0), 300.0);
    assert_eq!(w.pin_shift(2000.0), 900.0);
}

#[test]
fn only_pinned_regions_with_spacing_push_content() {
    let spec = crate::directive::model::PinDirective {
        enabled: true,
        ..Default::default()
    }
    .validate();
    let mut region = PinRegion {
        id: ElementId(1),
        spec,
        duration_px: 900.0,
        window: PinWindow::new(0.0, 900.0),
        mode: PinMode::Pinned,
        layout_top: 0.0,
        spacing_above: 0.0,
    };
    assert_eq!(region.spacing(), 900.0);

    region.mode = PinMode::Passthrough;
    assert_eq!(region.spacing(), 0.0);

    region.mode = PinMode::Pinned;
    region.spec.pin_spacing = false;
    assert_eq!(region.spacing(), 0.0);
}
