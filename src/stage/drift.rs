use crate::foundation::core::{Vec2, Viewport};
use crate::foundation::math::lerp;

const MULTIPLIERS: [f64; 3] = [1.0, 1.35, 1.75];

/// Drift speed of layer `index` relative to the base offset.
pub fn multiplier(index: usize) -> f64 {
    MULTIPLIERS
        .get(index)
        .copied()
        .unwrap_or(1.0 + index as f64 * 0.4)
}

/// Base drift in viewport percent. Zero-sized viewports do not drift.
pub fn base_percent(base_px: Vec2, viewport: Viewport) -> Vec2 {
    let pct = |px: f64, extent: f64| if extent > 0.0 { px / extent * 100.0 } else { 0.0 };
    Vec2::new(
        pct(base_px.x, viewport.width),
        pct(base_px.y, viewport.height),
    )
}

/// `(xPercent, yPercent)` of layer `index` at `progress`.
pub fn drift_offset(base_px: Vec2, viewport: Viewport, index: usize, progress: f64) -> Vec2 {
    let base = base_percent(base_px, viewport);
    let m = multiplier(index);
    Vec2::new(
        lerp(0.0, -base.x * m, progress),
        lerp(0.0, -base.y * m, progress),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/stage/drift.rs"]
mod tests;
