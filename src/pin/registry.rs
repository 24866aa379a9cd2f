use crate::directive::model::{Directive, PinSpec};
use crate::foundation::core::{ElementId, Rect, Vec2, Viewport};
use crate::host::Host;
use crate::pin::region::{PinMode, PinRegion, PinWindow};

/// Outcome of a [`PinRegistry::scan`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ScanReport {
    pub pinned: usize,
    pub passthrough: usize,
    pub unpinned: usize,
    /// Directives whose element was missing from the layout.
    pub skipped: usize,
}

/// Per-frame sample of one pinned region.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ProgressSample {
    pub region: ElementId,
    pub progress: f64,
    pub pin_shift: f64,
}

/// Owns every pin region and its host pin primitive.
#[derive(Debug)]
pub struct PinRegistry {
    breakpoint_px: f64,
    regions: Vec<PinRegion>,
    desktop: bool,
    enabled: bool,
}

impl PinRegistry {
    pub fn new(breakpoint_px: f64) -> Self {
        Self {
            breakpoint_px,
            regions: Vec::new(),
            desktop: false,
            enabled: true,
        }
    }

    pub fn regions(&self) -> &[PinRegion] {
        &self.regions
    }

    pub fn region(&self, id: ElementId) -> Option<&PinRegion> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn windows(&self) -> Vec<(ElementId, PinWindow)> {
        self.regions.iter().map(|r| (r.id, r.window)).collect()
    }

    /// Layout mode of the last scan.
    pub fn is_desktop(&self) -> bool {
        self.desktop
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Suspend or resume progress sampling without touching the regions.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn total_spacing(&self) -> f64 {
        self.regions.iter().map(PinRegion::spacing).sum()
    }

    /// Rebuild every region from the host's directives, in DOM order.
    ///
    /// Previous pins are released first, so repeated scans of an unchanged page yield the same
    /// windows and never stack pins. A region whose pin primitive fails is kept in passthrough
    /// mode and the scan carries on.
    #[tracing::instrument(skip_all, fields(breakpoint = self.breakpoint_px))]
    pub fn scan(&mut self, host: &mut dyn Host) -> ScanReport {
        self.release_all(host);

        let viewport = host.viewport();
        self.desktop = viewport.is_desktop(self.breakpoint_px);

        let mut report = ScanReport::default();
        let mut spacing_above = 0.0;
        for tagged in host.directives() {
            for directive in &tagged.directives {
                let Directive::Pin(pin) = directive else {
                    continue;
                };
                if !pin.enabled {
                    continue;
                }
                let Some(rect) = host.element_rect(tagged.element) else {
                    tracing::debug!(element = %tagged.element, "pin target missing, skipped");
                    report.skipped += 1;
                    continue;
                };

                let spec = pin.validate();
                let (duration_px, window) = measure(&spec, rect, spacing_above, viewport);
                let mode = if !self.desktop {
                    PinMode::Unpinned
                } else {
                    create_pin(host, tagged.element, &spec, duration_px)
                };
                match mode {
                    PinMode::Pinned => report.pinned += 1,
                    PinMode::Passthrough => report.passthrough += 1,
                    PinMode::Unpinned => report.unpinned += 1,
                }

                let region = PinRegion {
                    id: tagged.element,
                    spec,
                    duration_px,
                    window,
                    mode,
                    layout_top: rect.y0,
                    spacing_above,
                };
                spacing_above += region.spacing();
                self.regions.push(region);
            }
        }

        tracing::debug!(?report, desktop = self.desktop, "pin scan complete");
        report
    }

    /// Re-measure every region against the current layout, keeping the regions themselves.
    #[tracing::instrument(skip_all)]
    pub fn refresh(&mut self, host: &mut dyn Host) {
        let viewport = host.viewport();
        let mut spacing_above = 0.0;
        for region in &mut self.regions {
            region.spacing_above = spacing_above;
            match host.element_rect(region.id) {
                Some(rect) => {
                    let (duration_px, window) =
                        measure(&region.spec, rect, spacing_above, viewport);
                    let spacing_changed = (duration_px - region.duration_px).abs() > f64::EPSILON;
                    region.duration_px = duration_px;
                    region.layout_top = rect.y0;
                    region.window = window;
                    if region.is_pinned() && spacing_changed && region.spec.pin_spacing {
                        host.release_pin(region.id);
                        region.mode = create_pin(host, region.id, &region.spec, duration_px);
                    }
                }
                None => {
                    tracing::debug!(element = %region.id, "pin target vanished, keeping last window");
                }
            }
            spacing_above += region.spacing();
        }
    }

    /// Pin spacing inserted above an element whose unpinned layout top is `top`.
    pub fn spacing_before(&self, top: f64) -> f64 {
        self.regions
            .iter()
            .filter(|r| r.layout_top < top)
            .map(PinRegion::spacing)
            .sum()
    }

    /// Progress of every pinned region at `offset`. Empty while disabled.
    pub fn sample(&self, offset: f64) -> Vec<ProgressSample> {
        if !self.enabled {
            return Vec::new();
        }
        self.regions
            .iter()
            .filter(|r| r.is_pinned())
            .map(|r| ProgressSample {
                region: r.id,
                progress: r.window.progress(offset),
                pin_shift: r.window.pin_shift(offset),
            })
            .collect()
    }

    pub fn release_all(&mut self, host: &mut dyn Host) {
        for region in self.regions.drain(..) {
            if region.mode == PinMode::Pinned {
                host.release_pin(region.id);
            }
        }
    }
}

fn measure(spec: &PinSpec, rect: Rect, spacing_above: f64, viewport: Viewport) -> (f64, PinWindow) {
    let laid_out = rect + Vec2::new(0.0, spacing_above);
    let duration_px = spec.duration.resolve(viewport, rect.height());
    let start = spec.start.resolve(laid_out, viewport);
    (duration_px, PinWindow::new(start, duration_px))
}

fn create_pin(host: &mut dyn Host, element: ElementId, spec: &PinSpec, duration_px: f64) -> PinMode {
    let spacing = if spec.pin_spacing { duration_px } else { 0.0 };
    match host.create_pin(element, spacing) {
        Ok(()) => PinMode::Pinned,
        Err(err) => {
            tracing::warn!(%element, %err, "pin creation failed, region left in passthrough");
            PinMode::Passthrough
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pin/registry.rs"]
mod tests;
