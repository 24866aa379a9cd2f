use std::collections::BTreeMap;

use crate::directive::model::{DEFAULT_FOLLOWER_SIZE, FollowerConfig, FollowerGroupSpec};
use crate::foundation::core::{ElementId, Point, Size, Vec2, Viewport};
use crate::physics::rng::Rng64;
use crate::physics::spring::{FollowerPhysics, SpringParams};

/// Marker radius as a share of the follower diameter.
pub const RADIUS_RATIO: f64 = 0.2;

/// Spring simulation for every follower of one container.
///
/// Physics state is created lazily per follower key and never dropped, so a layout switch that
/// keeps a follower's key keeps its motion. Each frame re-derives anchors and radii from the
/// current layout.
#[derive(Debug)]
pub struct PointerSpringEngine {
    container: ElementId,
    spec: FollowerGroupSpec,
    followers: Vec<FollowerConfig>,
    physics: BTreeMap<String, FollowerPhysics>,
    params: SpringParams,
    mobile: bool,
    pointer: Option<Point>,
    container_size: Option<Size>,
    last_frame_s: Option<f64>,
    rng: Rng64,
    spawned: u64,
}

impl PointerSpringEngine {
    pub fn new(
        container: ElementId,
        spec: FollowerGroupSpec,
        params: SpringParams,
        seed: u64,
    ) -> Self {
        let mut engine = Self {
            container,
            followers: spec.followers.clone(),
            spec,
            physics: BTreeMap::new(),
            params,
            mobile: false,
            pointer: None,
            container_size: None,
            last_frame_s: None,
            rng: Rng64::new(seed ^ u64::from(container.0)),
            spawned: 0,
        };
        engine.sync_physics();
        engine
    }

    pub fn container(&self) -> ElementId {
        self.container
    }

    pub fn followers(&self) -> &[FollowerConfig] {
        &self.followers
    }

    pub fn is_mobile(&self) -> bool {
        self.mobile
    }

    pub fn physics(&self, key: &str) -> Option<&FollowerPhysics> {
        self.physics.get(key)
    }

    /// Current marker offsets keyed by follower key, in follower order.
    pub fn offsets(&self) -> Vec<(String, Vec2)> {
        self.followers
            .iter()
            .filter_map(|f| {
                let key = f.physics_key(self.mobile);
                self.physics.get(&key).map(|p| (key, p.pos))
            })
            .collect()
    }

    /// Switch between the desktop and mobile anchors when the viewport crosses `breakpoint_px`.
    pub fn set_viewport(&mut self, viewport: Viewport, breakpoint_px: f64) {
        let mobile = viewport.width < breakpoint_px;
        if mobile != self.mobile {
            tracing::debug!(container = %self.container, mobile, "follower layout switched");
            self.mobile = mobile;
            self.sync_physics();
        }
    }

    /// Track the pointer in container-local coordinates. Positions outside the container clear it.
    pub fn on_pointer_move(&mut self, local: Point, size: Size) {
        self.container_size = Some(size);
        self.pointer = inside(local, size).then_some(local);
    }

    pub fn on_pointer_leave(&mut self) {
        self.pointer = None;
    }

    /// Spawn a follower under the pointer when click-to-add is on. Returns its key.
    pub fn on_pointer_down(&mut self, local: Point, size: Size) -> Option<String> {
        if !self.spec.click_to_add || !inside(local, size) || size.width <= 0.0 || size.height <= 0.0 {
            return None;
        }
        let scale = self.rng.uniform(self.spec.spawn_min, self.spec.spawn_max);
        self.spawned += 1;
        let key = format!("spawn-{}-{:x}", self.spawned, self.rng.tag());
        self.followers.push(FollowerConfig {
            key: Some(key.clone()),
            x: Some(local.x / size.width * 100.0),
            y: Some(local.y / size.height * 100.0),
            size: Some(DEFAULT_FOLLOWER_SIZE * scale),
            ..FollowerConfig::default()
        });
        self.sync_physics();
        tracing::debug!(container = %self.container, %key, scale, "spawned follower");
        Some(key)
    }

    /// Forget the frame clock so the next frame after a pause takes no step.
    pub fn pause(&mut self) {
        self.last_frame_s = None;
    }

    /// Step every follower to `now_s` and return the new offsets.
    pub fn frame(&mut self, now_s: f64) -> Vec<(String, Vec2)> {
        let dt = match self.last_frame_s {
            Some(last) => (now_s - last).clamp(0.0, self.params.max_dt_s),
            None => 0.0,
        };
        self.last_frame_s = Some(now_s);

        let pointer = self.pointer.zip(self.container_size);
        for follower in &self.followers {
            let m = follower.metrics(self.mobile);
            let key = follower.physics_key(self.mobile);
            let Some(phys) = self.physics.get_mut(&key) else {
                continue;
            };
            phys.radius = m.size * RADIUS_RATIO;
            let delta = pointer.map(|(p, size)| {
                let anchor = Point::new(
                    m.x_percent / 100.0 * size.width,
                    m.y_percent / 100.0 * size.height,
                );
                p - anchor
            });
            phys.step(delta, dt, &self.params);
        }
        self.offsets()
    }

    fn sync_physics(&mut self) {
        for follower in &self.followers {
            let m = follower.metrics(self.mobile);
            let radius = m.size * RADIUS_RATIO;
            self.physics
                .entry(follower.physics_key(self.mobile))
                .and_modify(|p| p.radius = radius)
                .or_insert_with(|| FollowerPhysics::at_rest(radius));
        }
    }
}

fn inside(local: Point, size: Size) -> bool {
    local.x >= 0.0 && local.y >= 0.0 && local.x <= size.width && local.y <= size.height
}

#[cfg(test)]
#[path = "../../tests/unit/physics/engine.rs"]
mod tests;
