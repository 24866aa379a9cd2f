use super::*;
use crate::directive::model::{PinDirective, TaggedElement};
use crate::host::memory::MemoryHost;
use serde_json::json;

fn pin(start: &str, duration: &str) -> Directive {
    Directive::Pin(PinDirective {
        enabled: true,
        start: Some(start.to_string()),
        duration: Some(json!(duration)),
        pin_spacing: None,
    })
}

fn two_region_host(width: f64) -> MemoryHost {
    let mut host = MemoryHost::new(Viewport::new(width, 900.0), 8000.0);
    host.set_rect(ElementId(5), Rect::new(0.0, 1200.0, width, 1800.0));
    host.set_rect(ElementId(6), Rect::new(0.0, 3000.0, width, 3600.0));
    host.tagged = vec![
        TaggedElement {
            element: ElementId(5),
            directives: vec![pin("top top", "900px")],
        },
        TaggedElement {
            element: ElementId(6),
            directives: vec![pin("top top", "100vh")],
        },
    ];
    host
}

#[test]
fn scan_registers_in_dom_order_with_cumulative_spacing() {
    let mut host = two_region_host(1440.0);
    let mut registry = PinRegistry::new(1024.0);
    let report = registry.scan(&mut host);

    assert_eq!(report.pinned, 2);
    assert!(registry.is_desktop());
    let windows = registry.windows();
    assert_eq!(windows[0], (ElementId(5), PinWindow::new(1200.0, 900.0)));
    assert_eq!(windows[1], (ElementId(6), PinWindow::new(3900.0, 900.0)));
    assert_eq!(registry.total_spacing(), 1800.0);
    assert_eq!(host.pins.get(&ElementId(5)), Some(&900.0));
    assert_eq!(registry.spacing_before(1000.0), 0.0);
    assert_eq!(registry.spacing_before(2000.0), 900.0);
    assert_eq!(registry.spacing_before(4000.0), 1800.0);
}

#[test]
fn default_start_centres_below_the_nav() {
    let mut host = MemoryHost::new(Viewport::new(1440.0, 900.0), 8000.0);
    host.set_rect(ElementId(5), Rect::new(0.0, 1200.0, 1440.0, 1800.0));
    host.tagged = vec![TaggedElement {
        element: ElementId(5),
        directives: vec![Directive::Pin(PinDirective {
            enabled: true,
            ..Default::default()
        })],
    }];
    let mut registry = PinRegistry::new(1024.0);
    registry.scan(&mut host);

    let region = registry.region(ElementId(5)).unwrap();
    // 1200 + 300 - 80 - 450
    assert_eq!(region.window.start, 970.0);
    assert_eq!(region.duration_px, 2700.0);
}

#[test]
fn rescanning_is_idempotent() {
    let mut host = two_region_host(1440.0);
    let mut registry = PinRegistry::new(1024.0);
    registry.scan(&mut host);
    let first = registry.windows();
    registry.scan(&mut host);

    assert_eq!(registry.windows(), first);
    assert_eq!(registry.regions().len(), 2);
    assert_eq!(host.pins.len(), 2);
}

#[test]
fn failed_pin_becomes_passthrough_and_adds_no_spacing() {
    let mut host = two_region_host(1440.0);
    host.failing_pins.insert(ElementId(5));
    let mut registry = PinRegistry::new(1024.0);
    let report = registry.scan(&mut host);

    assert_eq!(report.passthrough, 1);
    assert_eq!(report.pinned, 1);
    assert_eq!(registry.region(ElementId(5)).unwrap().mode, PinMode::Passthrough);
    assert_eq!(registry.region(ElementId(6)).unwrap().window.start, 3000.0);
    assert_eq!(registry.sample(1500.0).len(), 1);
}

#[test]
fn missing_elements_and_disabled_directives_are_skipped() {
    let mut host = two_region_host(1440.0);
    host.rects.remove(&ElementId(6));
    host.tagged.push(TaggedElement {
        element: ElementId(7),
        directives: vec![Directive::Pin(PinDirective::default())],
    });
    host.set_rect(ElementId(7), Rect::new(0.0, 5000.0, 1440.0, 5400.0));

    let mut registry = PinRegistry::new(1024.0);
    let report = registry.scan(&mut host);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.pinned, 1);
    assert!(registry.region(ElementId(7)).is_none());
}

#[test]
fn below_breakpoint_regions_stay_unpinned() {
    let mut host = two_region_host(800.0);
    let mut registry = PinRegistry::new(1024.0);
    let report = registry.scan(&mut host);

    assert_eq!(report.unpinned, 2);
    assert!(!registry.is_desktop());
    assert!(host.pins.is_empty());
    assert_eq!(registry.total_spacing(), 0.0);
    assert!(registry.sample(1500.0).is_empty());
}

#[test]
fn sample_reports_progress_and_respects_enable() {
    let mut host = two_region_host(1440.0);
    let mut registry = PinRegistry::new(1024.0);
    registry.scan(&mut host);

    let samples = registry.sample(1650.0);
    assert_eq!(samples.len(), 2);
    assert_eq!(samples[0].region, ElementId(5));
    assert!((samples[0].progress - 0.5).abs() < 1e-12);
    assert_eq!(samples[0].pin_shift, 450.0);
    assert_eq!(samples[1].progress, 0.0);

    registry.set_enabled(false);
    assert!(registry.sample(1650.0).is_empty());
    registry.set_enabled(true);
    assert_eq!(registry.sample(1650.0).len(), 2);
}

#[test]
fn refresh_remeasures_and_resizes_spacers() {
    let mut host = two_region_host(1440.0);
    let mut registry = PinRegistry::new(1024.0);
    registry.scan(&mut host);
    let created = host.pins_created;

    host.viewport = Viewport::new(1440.0, 1000.0);
    registry.refresh(&mut host);

    let second = registry.region(ElementId(6)).unwrap();
    assert_eq!(second.duration_px, 1000.0);
    assert_eq!(second.window.start, 3900.0);
    assert_eq!(host.pins.get(&ElementId(6)), Some(&1000.0));
    // The fixed-pixel region kept its spacer.
    assert_eq!(host.pins_created, created + 1);
}

#[test]
fn release_all_drops_host_pins() {
    let mut host = two_region_host(1440.0);
    let mut registry = PinRegistry::new(1024.0);
    registry.scan(&mut host);
    registry.release_all(&mut host);
    assert!(host.pins.is_empty());
    assert!(registry.regions().is_empty());
}
