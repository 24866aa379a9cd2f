pub use kurbo::{Point, Rect, Size, Vec2};

/// Opaque handle for a host element (a DOM node in a browser binding).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ElementId(pub u32);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Layout viewport in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Viewport width.
    pub width: f64,
    /// Viewport height.
    pub height: f64,
}

impl Viewport {
    /// Build a viewport, clamping non-finite or negative dimensions to zero.
    pub fn new(width: f64, height: f64) -> Self {
        fn sane(v: f64) -> f64 {
            if v.is_finite() { v.max(0.0) } else { 0.0 }
        }
        Self {
            width: sane(width),
            height: sane(height),
        }
    }

    /// `true` when the width is at or above `breakpoint_px`.
    pub fn is_desktop(self, breakpoint_px: f64) -> bool {
        self.width >= breakpoint_px
    }

    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
