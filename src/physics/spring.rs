use crate::foundation::core::Vec2;

/// Spring-damper constants shared by every follower.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpringParams {
    /// Idle droop, px/s².
    pub gravity: f64,
    pub stiffness: f64,
    pub damping: f64,
    /// Share of the normal velocity kept when bouncing off the rim.
    pub restitution: f64,
    /// Per-step velocity multiplier.
    pub global_damping: f64,
    /// Longest step taken, whatever the frame gap.
    pub max_dt_s: f64,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            gravity: 1800.0,
            stiffness: 600.0,
            damping: 20.0,
            restitution: 0.6,
            global_damping: 1.0,
            max_dt_s: 0.032,
        }
    }
}

/// Marker offset from the follower's anchor centre, kept inside a disc of `radius`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FollowerPhysics {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f64,
}

impl FollowerPhysics {
    /// Resting at the bottom of the disc.
    pub fn at_rest(radius: f64) -> Self {
        let radius = radius.max(0.0);
        Self {
            pos: Vec2::new(0.0, radius),
            vel: Vec2::ZERO,
            radius,
        }
    }

    /// Advance one semi-implicit Euler step.
    ///
    /// `pointer` is the pointer position relative to the anchor centre, or `None` when no pointer
    /// is over the container (gravity only).
    pub fn step(&mut self, pointer: Option<Vec2>, dt: f64, params: &SpringParams) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }

        match pointer {
            None => self.vel.y += params.gravity * dt,
            Some(delta) => {
                let len = delta.hypot();
                let dist = if len > 0.0 { len } else { 1.0 };
                let target = delta / dist * dist.min(self.radius);
                let accel = (target - self.pos) * params.stiffness - self.vel * params.damping;
                self.vel += accel * dt;
            }
        }

        self.pos += self.vel * dt;

        let len = self.pos.hypot();
        if len > self.radius {
            let n = self.pos / len;
            self.pos = n * self.radius;
            let dot = self.vel.dot(n);
            self.vel -= n * ((1.0 + params.restitution) * dot);
        }
        self.vel *= params.global_damping;

        if !self.pos.is_finite() || !self.vel.is_finite() {
            tracing::warn!("follower state diverged, resetting to rest");
            *self = Self::at_rest(self.radius);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/physics/spring.rs"]
mod tests;
