use crate::animation::tween::{Animator, TweenEvent};
use crate::directive::model::Directive;
use crate::foundation::core::{ElementId, Point, Vec2};
use crate::host::{Host, OffsetStore, StyleProp};
use crate::physics::engine::PointerSpringEngine;
use crate::pin::region::PinWindow;
use crate::pin::registry::PinRegistry;
use crate::recovery::debounce::Debounce;
use crate::recovery::lifecycle::{LifecycleState, Recovery};
use crate::runtime::config::RuntimeConfig;
use crate::runtime::env::{RuntimeEnv, RuntimeLease};
use crate::runtime::scope::Scope;
use crate::scroll::smoother::{ScrollState, SmoothScroller};
use crate::stage::controller::StageController;
use crate::stage::reveal::RevealSection;
use crate::stage::{StageEvent, StageSnapshot};

/// What a runtime holds between construction and teardown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Resource {
    Smoothing,
    Pins,
    Sections,
    Followers,
    FrameLoop,
}

/// Scroll and pointer runtime for one page.
///
/// The embedder forwards input events and calls [`frame`](Self::frame) once per display frame.
/// Within a frame the order is fixed: pending resize work, smoothing, then per pinned region the
/// pin shift, drift and stage transition, then reveals, then the animation tick with completion
/// routing, the style flush, and finally the spring engines.
///
/// A runtime stops writing to the host once it is torn down or once a newer runtime claims the
/// same [`RuntimeEnv`].
pub struct ScrollRuntime<H: Host, S: OffsetStore> {
    lease: RuntimeLease,
    host: H,
    store: S,
    config: RuntimeConfig,
    smoother: SmoothScroller,
    registry: PinRegistry,
    animator: Animator,
    stages: Vec<StageController>,
    reveals: Vec<RevealSection>,
    springs: Vec<PointerSpringEngine>,
    lifecycle: LifecycleState,
    resize: Debounce,
    scope: Scope<Resource>,
    last_frame_s: Option<f64>,
    torn_down: bool,
}

impl<H: Host, S: OffsetStore> ScrollRuntime<H, S> {
    /// Initialize smoothing, scan the page and restore the persisted offset.
    #[tracing::instrument(skip_all)]
    pub fn new(env: &RuntimeEnv, mut host: H, store: S, config: RuntimeConfig) -> Self {
        let config = config.sanitized();
        env.ensure_initialized(&mut host);
        let lease = env.claim();

        let mut scope = Scope::new();
        let smoother = SmoothScroller::init(&host, config.smooth_s);
        scope.acquire(Resource::Smoothing);

        let mut runtime = Self {
            lease,
            host,
            store,
            registry: PinRegistry::new(config.desktop_breakpoint_px),
            resize: Debounce::new(config.resize_debounce_s),
            config,
            smoother,
            animator: Animator::new(),
            stages: Vec::new(),
            reveals: Vec::new(),
            springs: Vec::new(),
            lifecycle: LifecycleState::default(),
            scope,
            last_frame_s: None,
            torn_down: false,
        };

        runtime.registry.scan(&mut runtime.host);
        runtime.scope.acquire(Resource::Pins);
        runtime.build_sections();
        runtime.scope.acquire(Resource::Sections);
        runtime.build_followers();
        runtime.scope.acquire(Resource::Followers);
        runtime.update_scroll_bounds();
        runtime.flush_writes();
        runtime.scope.acquire(Resource::FrameLoop);

        if runtime.config.persist_offset {
            if let Some(saved) = runtime.store.load(&runtime.config.storage_key) {
                tracing::debug!(saved, "restoring persisted offset");
                runtime.smoother.seek(saved, false);
            }
        }
        runtime
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// `false` after teardown or once another runtime claimed the environment.
    pub fn is_live(&self) -> bool {
        !self.torn_down && self.lease.is_current()
    }

    pub fn is_frozen(&self) -> bool {
        self.lifecycle.is_frozen()
    }

    pub fn offset(&self) -> f64 {
        self.smoother.offset()
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.smoother.state()
    }

    pub fn windows(&self) -> Vec<(ElementId, PinWindow)> {
        self.registry.windows()
    }

    /// Stage state of the section on `element`, pinned or reveal-driven.
    pub fn stage(&self, element: ElementId) -> Option<StageSnapshot> {
        self.stages
            .iter()
            .find(|c| c.section() == element)
            .map(StageController::snapshot)
            .or_else(|| {
                self.reveals
                    .iter()
                    .find(|r| r.section() == element)
                    .map(RevealSection::snapshot)
            })
    }

    pub fn follower_offsets(&self, container: ElementId) -> Vec<(String, Vec2)> {
        self.springs
            .iter()
            .find(|e| e.container() == container)
            .map(PointerSpringEngine::offsets)
            .unwrap_or_default()
    }

    pub fn on_wheel(&mut self, delta: f64) {
        self.smoother.on_wheel(delta);
    }

    pub fn on_native_scroll(&mut self, offset: f64) {
        self.smoother.on_native_scroll(offset);
    }

    pub fn seek(&mut self, offset: f64, animate: bool) {
        self.smoother.seek(offset, animate);
    }

    pub fn on_pointer_move(&mut self, container: ElementId, local: Point) {
        let Some(size) = self.host.element_rect(container).map(|r| r.size()) else {
            return;
        };
        if let Some(engine) = self.springs.iter_mut().find(|e| e.container() == container) {
            engine.on_pointer_move(local, size);
        }
    }

    pub fn on_pointer_leave(&mut self, container: ElementId) {
        if let Some(engine) = self.springs.iter_mut().find(|e| e.container() == container) {
            engine.on_pointer_leave();
        }
    }

    /// Returns the key of a follower spawned by click-to-add.
    pub fn on_pointer_down(&mut self, container: ElementId, local: Point) -> Option<String> {
        let size = self.host.element_rect(container)?.size();
        self.springs
            .iter_mut()
            .find(|e| e.container() == container)?
            .on_pointer_down(local, size)
    }

    pub fn on_visibility_change(&mut self, hidden: bool) {
        if !self.is_live() {
            return;
        }
        let offset = self.smoother.offset();
        if let Some(recovery) = self.lifecycle.on_visibility_change(hidden, offset) {
            self.recover(recovery);
        }
    }

    pub fn on_page_show(&mut self, persisted: bool) {
        if !self.is_live() {
            return;
        }
        if let Some(recovery) = self.lifecycle.on_page_show(persisted) {
            self.recover(recovery);
        }
    }

    /// Viewport resize. Geometry is re-measured once resizing settles.
    pub fn on_resize(&mut self, now_s: f64) {
        self.resize.notify(now_s);
    }

    /// Size change of an observed element. Only pinned sections matter.
    pub fn on_content_resize(&mut self, element: ElementId, now_s: f64) {
        if self.registry.region(element).is_some() {
            self.resize.notify(now_s);
        } else {
            tracing::trace!(%element, "resize of unpinned element ignored");
        }
    }

    /// The surrounding route changed: rescan, rebuild every section and follower group, and
    /// start from the top.
    pub fn on_route_change(&mut self) {
        if !self.is_live() {
            return;
        }
        tracing::debug!("route changed, rebuilding");
        self.rebuild();
        self.build_followers();
        self.smoother.seek(0.0, false);
        self.flush_writes();
    }

    /// Advance one display frame. Returns what the sections did.
    pub fn frame(&mut self, now_s: f64) -> Vec<StageEvent> {
        if !self.is_live() {
            tracing::trace!("frame on a retired runtime ignored");
            return Vec::new();
        }
        if self.lifecycle.is_frozen() {
            return Vec::new();
        }

        let dt = match self.last_frame_s {
            Some(last) => (now_s - last).max(0.0),
            None => {
                // Layout settles after the first paint; measure again shortly after.
                self.resize.notify(now_s);
                0.0
            }
        };
        self.last_frame_s = Some(now_s);

        if self.resize.poll(now_s) {
            self.handle_resize();
        }

        let offset = self.smoother.tick(dt);
        if let Some((content, y)) = self.smoother.content_transform() {
            self.host.write_style(content, StyleProp::ContentY, y);
        }

        self.animator.set_clock(now_s);
        let viewport = self.host.viewport();
        let mut events = Vec::new();
        for sample in self.registry.sample(offset) {
            self.animator
                .set(sample.region, &[(StyleProp::PinShift, sample.pin_shift)]);
            let Some(controller) = self.stages.iter_mut().find(|c| c.section() == sample.region)
            else {
                continue;
            };
            controller.apply_drift(sample.progress, viewport, &mut self.animator);
            events.extend(controller.check_intro(offset, &mut self.animator));
            events.extend(controller.advance(sample.progress, &mut self.animator));
        }
        for reveal in &mut self.reveals {
            events.extend(reveal.update(offset, &mut self.animator));
        }

        for event in self.animator.tick(now_s) {
            let TweenEvent::Completed { tag: Some(tag), .. } = event else {
                continue;
            };
            if let Some(controller) = self.stages.iter_mut().find(|c| c.section() == tag.owner) {
                events.extend(controller.on_completed(tag, &mut self.animator));
            }
        }
        self.flush_writes();
        self.step_springs(now_s);
        events
    }

    /// Persist the current offset for the next page load.
    pub fn unload(&mut self) {
        if self.config.persist_offset && self.is_live() {
            let offset = self.smoother.offset();
            self.store.save(&self.config.storage_key, offset);
        }
    }

    /// Release everything in reverse acquisition order. Idempotent.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        let live = self.lease.is_current();
        let mut scope = std::mem::take(&mut self.scope);
        scope.release_all(|resource| self.release(resource, live));
        self.torn_down = true;
        tracing::debug!(live, "runtime torn down");
    }

    fn release(&mut self, resource: Resource, live: bool) {
        match resource {
            Resource::FrameLoop => {
                self.last_frame_s = None;
                self.resize.cancel();
            }
            Resource::Followers => self.springs.clear(),
            Resource::Sections => {
                self.animator.clear();
                self.stages.clear();
                self.reveals.clear();
            }
            Resource::Pins => {
                if live {
                    self.reset_pin_shifts();
                    self.flush_writes();
                    self.registry.release_all(&mut self.host);
                }
            }
            Resource::Smoothing => {
                if live {
                    self.smoother.release(&mut self.host);
                }
            }
        }
    }

    fn recover(&mut self, recovery: Recovery) {
        if !self.is_live() {
            return;
        }
        match recovery {
            Recovery::Freeze => {
                self.smoother.pause();
                self.registry.set_enabled(false);
                for engine in &mut self.springs {
                    engine.pause();
                }
            }
            Recovery::Resume { offset } => {
                self.registry.set_enabled(true);
                self.refresh_geometry();
                self.smoother.seek(offset, false);
                self.resume_loops();
            }
            Recovery::ResetToTop => {
                self.registry.set_enabled(true);
                self.refresh_geometry();
                self.smoother.seek(0.0, false);
                self.resume_loops();
            }
        }
    }

    fn resume_loops(&mut self) {
        self.smoother.resume();
        self.last_frame_s = None;
        for engine in &mut self.springs {
            engine.pause();
        }
    }

    fn handle_resize(&mut self) {
        let viewport = self.host.viewport();
        let desktop = viewport.is_desktop(self.config.desktop_breakpoint_px);
        if desktop != self.registry.is_desktop() {
            tracing::info!(width = viewport.width, desktop, "breakpoint crossed, rebuilding");
            self.rebuild();
        } else {
            self.refresh_geometry();
        }
    }

    /// Re-measure pin windows and triggers. Stage state is kept.
    fn refresh_geometry(&mut self) {
        self.registry.refresh(&mut self.host);
        for controller in &mut self.stages {
            let spacing_above = self
                .registry
                .region(controller.section())
                .map_or(0.0, |r| r.spacing_above);
            controller.measure(&self.host, spacing_above);
        }
        for reveal in &mut self.reveals {
            reveal.measure(&self.host, |top| self.registry.spacing_before(top));
        }
        self.update_scroll_bounds();
    }

    /// Rescan pins and rebuild stage sections. Follower engines survive.
    fn rebuild(&mut self) {
        self.reset_pin_shifts();
        self.animator.clear();
        self.registry.scan(&mut self.host);
        self.build_sections();
        self.update_scroll_bounds();
    }

    fn build_sections(&mut self) {
        self.stages.clear();
        self.reveals.clear();

        let desktop = self.registry.is_desktop();
        for tagged in self.host.directives() {
            for directive in &tagged.directives {
                match directive {
                    Directive::Pin(_) | Directive::Followers(_) => {}
                    Directive::Stages(raw) => {
                        let spec = raw.validate();
                        let region = self
                            .registry
                            .region(tagged.element)
                            .filter(|r| r.is_pinned());
                        match region {
                            Some(region) if !spec.items.is_empty() => {
                                let spacing_above = region.spacing_above;
                                let mut controller = StageController::new(
                                    tagged.element,
                                    spec,
                                    self.config.stages.clone(),
                                );
                                controller.measure(&self.host, spacing_above);
                                controller.install(&mut self.animator);
                                self.stages.push(controller);
                            }
                            _ => {
                                if desktop && !spec.items.is_empty() {
                                    tracing::debug!(
                                        section = %tagged.element,
                                        "stages without a live pin, revealing on scroll"
                                    );
                                }
                                let mut reveal = RevealSection::new(
                                    tagged.element,
                                    &spec,
                                    desktop,
                                    &self.config.reveal,
                                );
                                reveal.measure(&self.host, |top| self.registry.spacing_before(top));
                                reveal.install(&mut self.animator);
                                self.reveals.push(reveal);
                            }
                        }
                    }
                }
            }
        }
        tracing::debug!(
            stages = self.stages.len(),
            reveals = self.reveals.len(),
            "sections built"
        );
    }

    fn build_followers(&mut self) {
        self.springs.clear();
        let viewport = self.host.viewport();
        for tagged in self.host.directives() {
            for directive in &tagged.directives {
                let Directive::Followers(raw) = directive else {
                    continue;
                };
                let mut engine = PointerSpringEngine::new(
                    tagged.element,
                    raw.validate(),
                    self.config.spring,
                    self.config.spawn_seed,
                );
                engine.set_viewport(viewport, self.config.follower_mobile_breakpoint_px);
                self.springs.push(engine);
            }
        }
        tracing::debug!(followers = self.springs.len(), "follower groups built");
    }

    fn update_scroll_bounds(&mut self) {
        let viewport = self.host.viewport();
        let max = self.host.scroll_height() + self.registry.total_spacing() - viewport.height;
        self.smoother.set_max_offset(max);
    }

    fn reset_pin_shifts(&mut self) {
        for region in self.registry.regions().iter().filter(|r| r.is_pinned()) {
            self.animator.set(region.id, &[(StyleProp::PinShift, 0.0)]);
        }
    }

    fn flush_writes(&mut self) {
        for write in self.animator.drain_writes() {
            self.host.write_style(write.element, write.prop, write.value);
        }
    }

    fn step_springs(&mut self, now_s: f64) {
        let viewport = self.host.viewport();
        for engine in &mut self.springs {
            engine.set_viewport(viewport, self.config.follower_mobile_breakpoint_px);
            let container = engine.container();
            for (key, offset) in engine.frame(now_s) {
                self.host.write_follower(container, &key, offset);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/driver.rs"]
mod tests;
