//! Discrete stages and continuous drift derived from a pinned region's progress.

pub(crate) mod controller;
pub(crate) mod drift;
pub(crate) mod reveal;

use crate::foundation::core::ElementId;
use crate::foundation::math::{EPSILON, clamp01};

/// Stage index for `progress` across `stages` equal intervals.
///
/// Intervals are `(k/N, (k+1)/N]`, so a region scrolled exactly `k/N` of the way through still
/// shows stage `k-1`. No progress, or no stages, is `-1`.
pub fn stage_for_progress(progress: f64, stages: usize) -> i32 {
    if stages == 0 || progress.is_nan() || progress <= 0.0 {
        return -1;
    }
    let n = stages as f64;
    let raw = (clamp01(progress) * n - EPSILON).ceil() - 1.0;
    raw.clamp(0.0, n - 1.0) as i32
}

/// Externally visible stage state of one section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct StageSnapshot {
    /// Last derived stage (`-1` above the pin).
    pub last_stage: i32,
    /// Highlighted item (`-1` for none).
    pub active_index: i32,
    /// Companion visual stage: `2 + active`, or 0 when reset.
    pub image_stage: i32,
}

impl Default for StageSnapshot {
    fn default() -> Self {
        Self {
            last_stage: -1,
            active_index: -1,
            image_stage: 0,
        }
    }
}

/// Something a section did this frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StageEvent {
    Enter { section: ElementId, index: usize },
    Exit { section: ElementId, index: usize },
    ActiveChanged { section: ElementId, active: i32 },
    IntroShown { section: ElementId },
    Revealed { section: ElementId, element: ElementId },
}

#[cfg(test)]
#[path = "../../tests/unit/stage/mod.rs"]
mod tests;
