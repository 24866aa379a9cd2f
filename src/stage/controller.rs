use crate::animation::ease::Ease;
use crate::animation::tween::{Animator, CompletionTag, TweenEvent, TweenSpec};
use crate::directive::model::StageSpec;
use crate::foundation::core::{ElementId, Vec2, Viewport};
use crate::host::{Host, StyleProp};
use crate::stage::drift::drift_offset;
use crate::stage::{StageEvent, StageSnapshot, stage_for_progress};

/// Timings and offsets of the pinned stage choreography.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StageTimings {
    pub enter: TweenSpec,
    pub exit: TweenSpec,
    /// Items enter from, and exit to, this far right of their rest position.
    pub enter_offset_px: f64,
    /// Rest offset per index in staircase mode.
    pub stair_step: Vec2,
    pub base_z_index: f64,
    /// Drift of a multiplier-1 layer across the whole window, in pixels.
    pub drift_base_px: Vec2,
    pub companion: TweenSpec,
    pub intro: TweenSpec,
    /// The intro element rises from this far below its rest position.
    pub intro_offset_px: f64,
}

impl Default for StageTimings {
    fn default() -> Self {
        Self {
            enter: TweenSpec::new(0.6, Ease::OutQuart),
            exit: TweenSpec::new(0.4, Ease::InOutQuart),
            enter_offset_px: 120.0,
            stair_step: Vec2::new(32.0, -24.0),
            base_z_index: 10.0,
            drift_base_px: Vec2::new(80.0, 80.0),
            companion: TweenSpec::new(0.8, Ease::OutQuart),
            intro: TweenSpec::new(0.8, Ease::OutQuart),
            intro_offset_px: 40.0,
        }
    }
}

/// Companion scale for a stage; anything below 0 is the resting scale.
pub fn companion_scale(stage: i32) -> f64 {
    match stage {
        0 => 1.0,
        1 => 1.08,
        s if s >= 2 => 1.16,
        _ => 0.9,
    }
}

/// Exits still running for one backward transition.
#[derive(Clone, Copy, Debug)]
struct ExitBatch {
    token: u64,
    remaining: usize,
    /// Stage the batch lands on; `-1` ends the pin session.
    target: i32,
}

/// Enter/exit choreography of one pinned section.
///
/// At most one exit batch is in flight. Any new transition first settles the pending batch
/// (snapping its exits to their end state and applying its deferred active change), so a
/// new enter never races an old exit on the same item.
#[derive(Debug)]
pub struct StageController {
    section: ElementId,
    spec: StageSpec,
    timings: StageTimings,
    last_stage: i32,
    active: i32,
    image_stage: i32,
    /// Item 0 has entered during this pin session.
    first_shown: bool,
    intro_threshold: Option<f64>,
    intro_fired: bool,
    pending: Option<ExitBatch>,
    generation: u64,
}

impl StageController {
    pub fn new(section: ElementId, spec: StageSpec, timings: StageTimings) -> Self {
        Self {
            section,
            spec,
            timings,
            last_stage: -1,
            active: -1,
            image_stage: 0,
            first_shown: false,
            intro_threshold: None,
            intro_fired: false,
            pending: None,
            generation: 0,
        }
    }

    pub fn section(&self) -> ElementId {
        self.section
    }

    pub fn stage_count(&self) -> usize {
        self.spec.items.len()
    }

    pub fn snapshot(&self) -> StageSnapshot {
        StageSnapshot {
            last_stage: self.last_stage,
            active_index: self.active,
            image_stage: self.image_stage,
        }
    }

    pub fn has_pending_exit(&self) -> bool {
        self.pending.is_some()
    }

    /// Scroll offset at which the intro element is revealed. `None` disables the approach
    /// trigger.
    pub fn set_intro_threshold(&mut self, offset: Option<f64>) {
        self.intro_threshold = if self.spec.intro.is_some() {
            offset
        } else {
            None
        };
    }

    /// Resolve the approach trigger against the current layout of the section.
    pub fn measure(&mut self, host: &dyn Host, spacing_above: f64) {
        let viewport = host.viewport();
        let threshold = host.element_rect(self.section).map(|rect| {
            self.spec
                .intro_start
                .resolve(rect + Vec2::new(0.0, spacing_above), viewport)
        });
        self.set_intro_threshold(threshold);
    }

    /// Put every element in its pre-entry state.
    pub fn install(&self, animator: &mut Animator) {
        for (i, &item) in self.spec.items.iter().enumerate() {
            let rest = self.rest(i);
            animator.set(
                item,
                &[
                    (StyleProp::Opacity, 0.0),
                    (StyleProp::X, rest.x + self.timings.enter_offset_px),
                    (StyleProp::Y, rest.y),
                    (StyleProp::ZIndex, self.timings.base_z_index + i as f64),
                ],
            );
        }
        for &layer in &self.spec.drift {
            animator.set(layer, &[(StyleProp::XPercent, 0.0), (StyleProp::YPercent, 0.0)]);
        }
        if let Some(companion) = self.spec.companion {
            animator.set(companion, &[(StyleProp::Scale, companion_scale(-1))]);
        }
        if let Some(intro) = self.spec.intro {
            animator.set(
                intro,
                &[
                    (StyleProp::Opacity, 0.0),
                    (StyleProp::Y, self.timings.intro_offset_px),
                ],
            );
        }
    }

    /// Continuous parallax for `progress`. Runs every frame.
    pub fn apply_drift(&self, progress: f64, viewport: Viewport, animator: &mut Animator) {
        for (i, &layer) in self.spec.drift.iter().enumerate() {
            let d = drift_offset(self.timings.drift_base_px, viewport, i, progress);
            animator.set(layer, &[(StyleProp::XPercent, d.x), (StyleProp::YPercent, d.y)]);
        }
    }

    /// Fire the one-shot approach trigger once `offset` reaches its threshold.
    pub fn check_intro(&mut self, offset: f64, animator: &mut Animator) -> Vec<StageEvent> {
        let mut events = Vec::new();
        let (Some(threshold), Some(intro)) = (self.intro_threshold, self.spec.intro) else {
            return events;
        };
        if self.intro_fired || offset < threshold {
            return events;
        }
        self.intro_fired = true;
        events.extend(self.settle(animator));

        animator.to(
            intro,
            &[(StyleProp::Opacity, 1.0), (StyleProp::Y, 0.0)],
            self.timings.intro,
            None,
        );
        events.push(StageEvent::IntroShown {
            section: self.section,
        });

        if !self.spec.items.is_empty() && !self.first_shown {
            self.enter(0, animator, &mut events);
            self.first_shown = true;
            self.set_active(0, &mut events);
        }
        events
    }

    /// Derive the stage for `progress` and play whatever transition it implies.
    ///
    /// A pending exit batch is settled first, so a forward move that interrupts a backward one
    /// reports the settled index and then the new one as two `ActiveChanged` events.
    pub fn advance(&mut self, progress: f64, animator: &mut Animator) -> Vec<StageEvent> {
        let next = stage_for_progress(progress, self.stage_count());
        let prev = self.last_stage;
        if next == prev {
            return Vec::new();
        }

        let mut events = self.settle(animator);
        self.last_stage = next;

        if next > prev {
            for i in (prev + 1).max(0)..=next {
                if i == 0 && self.first_shown {
                    continue;
                }
                if i == 0 {
                    self.first_shown = true;
                }
                self.enter(i as usize, animator, &mut events);
            }
            self.retarget_companion(next, animator);
            self.set_active(next, &mut events);
            return events;
        }

        // Backward. The active item keeps its highlight until every exit in the batch is done.
        let token = self.next_token();
        let mut remaining = 0;
        for i in ((next + 1)..=prev).rev() {
            self.exit(i as usize, token, animator, &mut events);
            remaining += 1;
        }
        self.pending = Some(ExitBatch {
            token,
            remaining,
            target: next,
        });
        events
    }

    /// Route a tween completion. Completions for other sections or stale batches are ignored.
    pub fn on_completed(&mut self, tag: CompletionTag, animator: &mut Animator) -> Vec<StageEvent> {
        let mut events = Vec::new();
        if tag.owner != self.section {
            return events;
        }
        let Some(batch) = self.pending.as_mut() else {
            return events;
        };
        if batch.token != tag.token {
            return events;
        }
        batch.remaining = batch.remaining.saturating_sub(1);
        if batch.remaining == 0 {
            let target = batch.target;
            self.pending = None;
            self.finish_batch(target, animator, &mut events);
        }
        events
    }

    /// Complete a pending exit batch immediately.
    pub fn settle(&mut self, animator: &mut Animator) -> Vec<StageEvent> {
        let Some(batch) = self.pending else {
            return Vec::new();
        };
        let section = self.section;
        let completions = animator.complete_now(|tag| tag.owner == section && tag.token == batch.token);
        let mut events = Vec::new();
        for event in completions {
            let TweenEvent::Completed { tag: Some(tag), .. } = event else {
                continue;
            };
            events.extend(self.on_completed(tag, animator));
        }
        // Exits whose items vanished never produced tweens; land the batch anyway.
        if let Some(batch) = self.pending.take() {
            self.finish_batch(batch.target, animator, &mut events);
        }
        events
    }

    fn finish_batch(&mut self, target: i32, animator: &mut Animator, events: &mut Vec<StageEvent>) {
        if target < 0 {
            self.first_shown = false;
        }
        self.retarget_companion(target, animator);
        self.set_active(target, events);
    }

    fn set_active(&mut self, stage: i32, events: &mut Vec<StageEvent>) {
        let (active, image_stage) = if stage < 0 || self.spec.items.is_empty() {
            (-1, 0)
        } else {
            let clamped = stage.clamp(0, self.stage_count() as i32 - 1);
            (clamped, 2 + clamped)
        };
        self.image_stage = image_stage;
        if active != self.active {
            self.active = active;
            events.push(StageEvent::ActiveChanged {
                section: self.section,
                active,
            });
        }
    }

    fn retarget_companion(&self, stage: i32, animator: &mut Animator) {
        if let Some(companion) = self.spec.companion {
            animator.to(
                companion,
                &[(StyleProp::Scale, companion_scale(stage))],
                self.timings.companion,
                None,
            );
        }
    }

    fn rest(&self, index: usize) -> Vec2 {
        if self.spec.animate_in_right {
            self.timings.stair_step * index as f64
        } else {
            Vec2::ZERO
        }
    }

    fn enter(&self, index: usize, animator: &mut Animator, events: &mut Vec<StageEvent>) {
        let Some(&item) = self.spec.items.get(index) else {
            return;
        };
        let rest = self.rest(index);
        animator.from_to(
            item,
            &[
                (StyleProp::Opacity, 0.0),
                (StyleProp::X, rest.x + self.timings.enter_offset_px),
                (StyleProp::Y, rest.y),
            ],
            &[
                (StyleProp::Opacity, 1.0),
                (StyleProp::X, rest.x),
                (StyleProp::Y, rest.y),
            ],
            self.timings.enter,
            None,
        );
        events.push(StageEvent::Enter {
            section: self.section,
            index,
        });
    }

    fn exit(&self, index: usize, token: u64, animator: &mut Animator, events: &mut Vec<StageEvent>) {
        let Some(&item) = self.spec.items.get(index) else {
            return;
        };
        let rest = self.rest(index);
        animator.to(
            item,
            &[
                (StyleProp::Opacity, 0.0),
                (StyleProp::X, rest.x + self.timings.enter_offset_px),
                (StyleProp::Y, rest.y),
            ],
            self.timings.exit,
            Some(CompletionTag {
                owner: self.section,
                token,
            }),
        );
        events.push(StageEvent::Exit {
            section: self.section,
            index,
        });
    }

    fn next_token(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/controller.rs"]
mod tests;
