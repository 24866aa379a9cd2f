use crate::directive::model::PinSpec;
use crate::foundation::core::ElementId;
use crate::foundation::math::{clamp01, inverse_lerp};

/// Active scroll range `[start, end]` of a pin, in smoothed-offset space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PinWindow {
    pub start: f64,
    pub end: f64,
}

impl PinWindow {
    pub fn new(start: f64, duration_px: f64) -> Self {
        Self {
            start,
            end: start + duration_px.max(0.0),
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Local progress in `[0, 1]`. A zero-width window is a step at `start`.
    pub fn progress(&self, offset: f64) -> f64 {
        clamp01(inverse_lerp(self.start, self.end, offset))
    }

    /// How far the pinned element must be pushed down to stay fixed at `offset`.
    pub fn pin_shift(&self, offset: f64) -> f64 {
        (offset - self.start).clamp(0.0, self.duration())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum PinMode {
    /// Pinned with a live window.
    Pinned,
    /// The pin primitive failed; the section scrolls normally.
    Passthrough,
    /// Below the desktop breakpoint; pinning is off and stages use reveal-on-scroll.
    Unpinned,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PinRegion {
    /// Trigger element; also the pinned element and the region's key.
    pub id: ElementId,
    pub spec: PinSpec,
    /// Resolved at (re)registration; never reused across a resize.
    pub duration_px: f64,
    pub window: PinWindow,
    pub mode: PinMode,
    /// Top of the trigger in the layout without any pin spacing.
    pub layout_top: f64,
    /// Pin spacing contributed by regions above this one.
    pub spacing_above: f64,
}

impl PinRegion {
    pub fn is_pinned(&self) -> bool {
        self.mode == PinMode::Pinned
    }

    /// Scroll distance this region adds below itself.
    pub fn spacing(&self) -> f64 {
        if self.is_pinned() && self.spec.pin_spacing {
            self.duration_px
        } else {
            0.0
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pin/region.rs"]
mod tests;
