use std::collections::HashMap;

use crate::animation::ease::Ease;
use crate::foundation::core::ElementId;
use crate::foundation::math::{clamp01, lerp};
use crate::host::{StyleProp, StyleWrite};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct TweenId(pub u64);

/// Timing of one tween.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TweenSpec {
    pub duration_s: f64,
    #[serde(default)]
    pub delay_s: f64,
    pub ease: Ease,
}

impl TweenSpec {
    pub fn new(duration_s: f64, ease: Ease) -> Self {
        Self {
            duration_s,
            delay_s: 0.0,
            ease,
        }
    }

    pub fn delayed(self, delay_s: f64) -> Self {
        Self { delay_s, ..self }
    }
}

/// Routes a completion back to whoever started the tween.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct CompletionTag {
    /// Owning controller (the pinned region's trigger element).
    pub owner: ElementId,
    /// Owner-defined token, e.g. an exit batch generation.
    pub token: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum TweenEvent {
    /// The tween reached its end values. Cancelled tweens never report this.
    Completed {
        id: TweenId,
        element: ElementId,
        tag: Option<CompletionTag>,
    },
}

#[derive(Clone, Debug)]
struct Track {
    prop: StyleProp,
    from: f64,
    to: f64,
}

#[derive(Clone, Debug)]
struct Tween {
    id: TweenId,
    element: ElementId,
    tracks: Vec<Track>,
    spec: TweenSpec,
    start_s: f64,
    tag: Option<CompletionTag>,
}

impl Tween {
    fn writes(&self, prop: StyleProp) -> bool {
        self.tracks.iter().any(|t| t.prop == prop)
    }

    fn progress(&self, now_s: f64) -> Option<f64> {
        let local = now_s - self.start_s - self.spec.delay_s;
        if local < 0.0 {
            return None;
        }
        if self.spec.duration_s <= 0.0 {
            return Some(1.0);
        }
        Some(clamp01(local / self.spec.duration_s))
    }
}

/// Frame-clocked tween engine.
///
/// Tweens start at the current clock (see [`Animator::set_clock`]). Starting a tween on an
/// element cancels every running tween that writes any of the same properties, so two animations
/// never fight over one style. Style writes are queued and handed out by
/// [`Animator::drain_writes`].
#[derive(Debug, Default)]
pub struct Animator {
    clock_s: f64,
    next_id: u64,
    tweens: Vec<Tween>,
    values: HashMap<(ElementId, StyleProp), f64>,
    pending: Vec<StyleWrite>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clock(&self) -> f64 {
        self.clock_s
    }

    /// Advance the start time for newly created tweens. Never moves backwards.
    pub fn set_clock(&mut self, now_s: f64) {
        if now_s.is_finite() && now_s > self.clock_s {
            self.clock_s = now_s;
        }
    }

    /// Last written value of `prop`, or its identity.
    pub fn value(&self, element: ElementId, prop: StyleProp) -> f64 {
        self.values
            .get(&(element, prop))
            .copied()
            .unwrap_or_else(|| prop.identity())
    }

    pub fn running(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_running(&self, id: TweenId) -> bool {
        self.tweens.iter().any(|t| t.id == id)
    }

    /// Write values immediately, cancelling tweens on the same properties.
    pub fn set(&mut self, element: ElementId, props: &[(StyleProp, f64)]) {
        self.cancel_conflicting(element, props.iter().map(|(p, _)| *p));
        for &(prop, value) in props {
            self.write(element, prop, value);
        }
    }

    /// Render `from` immediately, then animate to `to`. Properties missing from `from` start at
    /// their current value.
    pub fn from_to(
        &mut self,
        element: ElementId,
        from: &[(StyleProp, f64)],
        to: &[(StyleProp, f64)],
        spec: TweenSpec,
        tag: Option<CompletionTag>,
    ) -> TweenId {
        self.cancel_conflicting(element, to.iter().map(|(p, _)| *p));
        for &(prop, value) in from {
            self.write(element, prop, value);
        }
        self.spawn(element, to, spec, tag)
    }

    /// Animate from the current values to `to`.
    pub fn to(
        &mut self,
        element: ElementId,
        to: &[(StyleProp, f64)],
        spec: TweenSpec,
        tag: Option<CompletionTag>,
    ) -> TweenId {
        self.cancel_conflicting(element, to.iter().map(|(p, _)| *p));
        self.spawn(element, to, spec, tag)
    }

    /// Stop a tween where it is. It reports no completion.
    pub fn cancel(&mut self, id: TweenId) -> bool {
        let before = self.tweens.len();
        self.tweens.retain(|t| t.id != id);
        before != self.tweens.len()
    }

    pub fn cancel_element(&mut self, element: ElementId) -> usize {
        let before = self.tweens.len();
        self.tweens.retain(|t| t.element != element);
        before - self.tweens.len()
    }

    /// Jump every tween whose tag matches to its end values and report their completions.
    pub fn complete_now(&mut self, matches: impl Fn(&CompletionTag) -> bool) -> Vec<TweenEvent> {
        let (done, keep): (Vec<Tween>, Vec<Tween>) = std::mem::take(&mut self.tweens)
            .into_iter()
            .partition(|t| t.tag.as_ref().is_some_and(&matches));
        self.tweens = keep;

        let mut events = Vec::with_capacity(done.len());
        for tween in done {
            for track in &tween.tracks {
                self.write(tween.element, track.prop, track.to);
            }
            events.push(TweenEvent::Completed {
                id: tween.id,
                element: tween.element,
                tag: tween.tag,
            });
        }
        events
    }

    /// Drop every tween without completing it (teardown and rescans).
    pub fn clear(&mut self) {
        self.tweens.clear();
    }

    /// Advance to `now_s`, queue writes and report finished tweens in start order.
    pub fn tick(&mut self, now_s: f64) -> Vec<TweenEvent> {
        self.set_clock(now_s);
        let now = self.clock_s;

        let tweens = std::mem::take(&mut self.tweens);
        let mut keep = Vec::with_capacity(tweens.len());
        let mut events = Vec::new();
        for tween in tweens {
            let Some(t) = tween.progress(now) else {
                keep.push(tween);
                continue;
            };
            let e = tween.spec.ease.apply(t);
            for track in &tween.tracks {
                self.write(tween.element, track.prop, lerp(track.from, track.to, e));
            }
            if t >= 1.0 {
                events.push(TweenEvent::Completed {
                    id: tween.id,
                    element: tween.element,
                    tag: tween.tag,
                });
            } else {
                keep.push(tween);
            }
        }
        self.tweens = keep;
        events
    }

    pub fn drain_writes(&mut self) -> Vec<StyleWrite> {
        std::mem::take(&mut self.pending)
    }

    fn spawn(
        &mut self,
        element: ElementId,
        to: &[(StyleProp, f64)],
        spec: TweenSpec,
        tag: Option<CompletionTag>,
    ) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;
        let tracks = to
            .iter()
            .map(|&(prop, target)| Track {
                prop,
                from: self.value(element, prop),
                to: target,
            })
            .collect();
        self.tweens.push(Tween {
            id,
            element,
            tracks,
            spec,
            start_s: self.clock_s,
            tag,
        });
        id
    }

    fn cancel_conflicting(&mut self, element: ElementId, props: impl Iterator<Item = StyleProp>) {
        let props: Vec<StyleProp> = props.collect();
        let before = self.tweens.len();
        self.tweens
            .retain(|t| t.element != element || !props.iter().any(|&p| t.writes(p)));
        let cancelled = before - self.tweens.len();
        if cancelled > 0 {
            tracing::trace!(%element, cancelled, "cancelled conflicting tweens");
        }
    }

    fn write(&mut self, element: ElementId, prop: StyleProp, value: f64) {
        self.values.insert((element, prop), value);
        self.pending.push(StyleWrite {
            element,
            prop,
            value,
        });
        if prop == StyleProp::Opacity {
            let visible = if value <= 0.0 { 0.0 } else { 1.0 };
            self.values.insert((element, StyleProp::Visibility), visible);
            self.pending.push(StyleWrite {
                element,
                prop: StyleProp::Visibility,
                value: visible,
            });
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
