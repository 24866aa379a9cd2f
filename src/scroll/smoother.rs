use crate::foundation::core::ElementId;
use crate::host::{Host, StyleProp};

/// Offsets closer than this to the raw input snap to it.
const SNAP_PX: f64 = 0.05;

/// Scroll position as seen by the smoothing layer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ScrollState {
    /// Latest input position.
    pub raw_offset: f64,
    /// Lagged position used for rendering and every pin window.
    pub smoothed_offset: f64,
    /// Pixels per second of the smoothed offset over the last tick.
    pub velocity: f64,
    pub is_touch_device: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum NativeReason {
    /// Touch devices keep native momentum scrolling.
    Touch,
    /// The host failed feature detection.
    Unsupported,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum SmoothingMode {
    /// Low-pass filtered offset applied as a content transform.
    Smoothed,
    /// Identity: offset follows the raw input, no transform is written.
    Native(NativeReason),
}

/// Single writer of the scroll offset.
///
/// The smoothed offset moves continuously toward the raw input, reaching 99% of any step in
/// `smooth_s` seconds. It only jumps on [`SmoothScroller::seek`] without animation.
#[derive(Clone, Debug)]
pub struct SmoothScroller {
    state: ScrollState,
    mode: SmoothingMode,
    smooth_s: f64,
    max_offset: f64,
    paused: bool,
    content: Option<ElementId>,
}

impl SmoothScroller {
    /// Detect the environment and pick a mode. Never fails: a failed probe means native scrolling.
    pub fn init(host: &dyn Host, smooth_s: f64) -> Self {
        let touch = host.is_touch_device();
        let mode = if touch {
            SmoothingMode::Native(NativeReason::Touch)
        } else {
            match host.probe_smoothing() {
                Ok(()) => SmoothingMode::Smoothed,
                Err(err) => {
                    tracing::warn!(%err, "smoothing unavailable, falling back to native scroll");
                    SmoothingMode::Native(NativeReason::Unsupported)
                }
            }
        };
        let content = host.content_element();
        let mode = if mode == SmoothingMode::Smoothed && content.is_none() {
            tracing::warn!("no content element to transform, falling back to native scroll");
            SmoothingMode::Native(NativeReason::Unsupported)
        } else {
            mode
        };
        tracing::debug!(?mode, "scroll smoothing initialized");
        Self::with_mode(mode, touch, smooth_s, content)
    }

    pub fn with_mode(
        mode: SmoothingMode,
        is_touch_device: bool,
        smooth_s: f64,
        content: Option<ElementId>,
    ) -> Self {
        Self {
            state: ScrollState {
                raw_offset: 0.0,
                smoothed_offset: 0.0,
                velocity: 0.0,
                is_touch_device,
            },
            mode,
            smooth_s: if smooth_s.is_finite() { smooth_s.max(0.0) } else { 0.0 },
            max_offset: f64::INFINITY,
            paused: false,
            content,
        }
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn mode(&self) -> SmoothingMode {
        self.mode
    }

    /// Current rendering offset.
    pub fn offset(&self) -> f64 {
        self.state.smoothed_offset
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_max_offset(&mut self, max_offset: f64) {
        self.max_offset = if max_offset.is_finite() {
            max_offset.max(0.0)
        } else {
            f64::INFINITY
        };
        self.state.raw_offset = self.clamp(self.state.raw_offset);
    }

    /// Relative input (wheel, keyboard).
    pub fn on_wheel(&mut self, delta: f64) {
        if delta.is_finite() {
            self.set_raw(self.state.raw_offset + delta);
        }
    }

    /// Absolute input from the native scroll position.
    pub fn on_native_scroll(&mut self, offset: f64) {
        if offset.is_finite() {
            self.set_raw(offset);
        }
    }

    /// Move to `offset`. Without animation both offsets jump and velocity resets; with
    /// animation only the target moves and smoothing glides there.
    pub fn seek(&mut self, offset: f64, animate: bool) {
        let offset = if offset.is_finite() { self.clamp(offset) } else { 0.0 };
        self.state.raw_offset = offset;
        if !animate || self.mode != SmoothingMode::Smoothed {
            self.state.smoothed_offset = offset;
            self.state.velocity = 0.0;
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
        self.state.velocity = 0.0;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Advance the filter by `dt_s`. Returns the offset to render.
    pub fn tick(&mut self, dt_s: f64) -> f64 {
        if self.paused {
            return self.state.smoothed_offset;
        }
        let dt = if dt_s.is_finite() { dt_s.max(0.0) } else { 0.0 };
        let prev = self.state.smoothed_offset;
        let target = self.state.raw_offset;

        let next = match self.mode {
            SmoothingMode::Native(_) => target,
            SmoothingMode::Smoothed if self.smooth_s <= 0.0 => target,
            SmoothingMode::Smoothed => {
                let alpha = 1.0 - (-dt * 100f64.ln() / self.smooth_s).exp();
                let v = prev + (target - prev) * alpha;
                if (target - v).abs() < SNAP_PX { target } else { v }
            }
        };

        self.state.velocity = if dt > 0.0 { (next - prev) / dt } else { 0.0 };
        self.state.smoothed_offset = next;
        next
    }

    /// Content transform to write this frame, if smoothing is active.
    pub fn content_transform(&self) -> Option<(ElementId, f64)> {
        match (self.mode, self.content) {
            (SmoothingMode::Smoothed, Some(content)) => Some((content, -self.state.smoothed_offset)),
            _ => None,
        }
    }

    /// Leave native scroll restorable: no residual transform, native position at the offset.
    pub fn release(&self, host: &mut dyn Host) {
        if let Some(content) = self.content {
            host.write_style(content, StyleProp::ContentY, 0.0);
        }
        host.scroll_native_to(self.state.smoothed_offset);
    }

    fn set_raw(&mut self, offset: f64) {
        self.state.raw_offset = self.clamp(offset);
    }

    fn clamp(&self, offset: f64) -> f64 {
        offset.clamp(0.0, self.max_offset)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/smoother.rs"]
mod tests;
