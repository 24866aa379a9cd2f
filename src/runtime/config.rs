use crate::foundation::error::ScrollStageResult;
use crate::host::LAST_OFFSET_KEY;
use crate::physics::spring::SpringParams;
use crate::stage::controller::StageTimings;
use crate::stage::reveal::RevealTimings;

/// Every tunable of a [`ScrollRuntime`](crate::ScrollRuntime).
///
/// All fields default, so a JSON config only needs the values it changes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Pinning and stage choreography run at or above this width.
    pub desktop_breakpoint_px: f64,
    /// Followers switch to their mobile anchors below this width.
    pub follower_mobile_breakpoint_px: f64,
    /// Seconds for the smoothed offset to cover 99% of a jump.
    pub smooth_s: f64,
    /// Quiet period before a resize re-measures geometry.
    pub resize_debounce_s: f64,
    /// Persist the last offset across reloads.
    pub persist_offset: bool,
    pub storage_key: String,
    /// Seed for follower spawning.
    pub spawn_seed: u64,
    pub stages: StageTimings,
    pub reveal: RevealTimings,
    pub spring: SpringParams,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            desktop_breakpoint_px: 1024.0,
            follower_mobile_breakpoint_px: 768.0,
            smooth_s: 1.0,
            resize_debounce_s: 0.15,
            persist_offset: true,
            storage_key: LAST_OFFSET_KEY.to_string(),
            spawn_seed: 0x5EED,
            stages: StageTimings::default(),
            reveal: RevealTimings::default(),
            spring: SpringParams::default(),
        }
    }
}

impl RuntimeConfig {
    pub fn from_json(json: &str) -> ScrollStageResult<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        Ok(cfg.sanitized())
    }

    /// Replace non-finite or negative scalars with their defaults.
    pub fn sanitized(mut self) -> Self {
        let d = Self::default();
        let fix = |name: &str, v: &mut f64, default: f64| {
            if !v.is_finite() || *v < 0.0 {
                tracing::warn!(field = name, value = *v, default, "invalid config value, using default");
                *v = default;
            }
        };
        fix(
            "desktop_breakpoint_px",
            &mut self.desktop_breakpoint_px,
            d.desktop_breakpoint_px,
        );
        fix(
            "follower_mobile_breakpoint_px",
            &mut self.follower_mobile_breakpoint_px,
            d.follower_mobile_breakpoint_px,
        );
        fix("smooth_s", &mut self.smooth_s, d.smooth_s);
        fix(
            "resize_debounce_s",
            &mut self.resize_debounce_s,
            d.resize_debounce_s,
        );
        fix("spring.max_dt_s", &mut self.spring.max_dt_s, d.spring.max_dt_s);
        if self.spring.restitution > 1.0 {
            tracing::warn!(
                restitution = self.spring.restitution,
                "restitution above 1 gains energy, clamping"
            );
            self.spring.restitution = 1.0;
        }
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/config.rs"]
mod tests;
