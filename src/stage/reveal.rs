use crate::animation::ease::Ease;
use crate::animation::tween::{Animator, TweenSpec};
use crate::directive::model::StageSpec;
use crate::directive::start::StartSpec;
use crate::foundation::core::{ElementId, Vec2, Viewport};
use crate::host::{Host, StyleProp};
use crate::stage::{StageEvent, StageSnapshot};

/// Timings of the unpinned, reveal-on-scroll path.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RevealTimings {
    pub item: TweenSpec,
    /// Extra delay per item index.
    pub item_stagger_s: f64,
    /// Revealed elements rise from this far below their rest position.
    pub rise_px: f64,
    pub item_start: String,
    pub intro: TweenSpec,
    pub intro_start: String,
    /// Intro of a section without items.
    pub lone_intro: TweenSpec,
    pub lone_intro_start_desktop: String,
    pub lone_intro_start_mobile: String,
}

impl Default for RevealTimings {
    fn default() -> Self {
        Self {
            item: TweenSpec::new(0.5, Ease::OutCubic),
            item_stagger_s: 0.05,
            rise_px: 30.0,
            item_start: "top 90%".to_string(),
            intro: TweenSpec::new(0.6, Ease::OutQuart),
            intro_start: "top 85%".to_string(),
            lone_intro: TweenSpec::new(0.8, Ease::OutQuart),
            lone_intro_start_desktop: "top 75%".to_string(),
            lone_intro_start_mobile: "top 85%".to_string(),
        }
    }
}

#[derive(Clone, Debug)]
struct Reveal {
    element: ElementId,
    start: StartSpec,
    spec: TweenSpec,
    threshold: Option<f64>,
    fired: bool,
}

/// A section whose elements each play a one-shot reveal when they scroll into view.
///
/// Used below the desktop breakpoint, for sections whose pin failed, and for sections that
/// only carry an intro element. There is no shared progress here.
#[derive(Debug)]
pub struct RevealSection {
    section: ElementId,
    rise_px: f64,
    reveals: Vec<Reveal>,
    snapshot: StageSnapshot,
}

impl RevealSection {
    pub fn new(section: ElementId, spec: &StageSpec, desktop: bool, timings: &RevealTimings) -> Self {
        let mut reveals = Vec::new();
        if let Some(intro) = spec.intro {
            let (start, tween) = match (spec.items.is_empty(), desktop) {
                (true, true) => (&timings.lone_intro_start_desktop, timings.lone_intro),
                (true, false) => (&timings.lone_intro_start_mobile, timings.lone_intro),
                (false, _) => (&timings.intro_start, timings.intro),
            };
            reveals.push(Reveal {
                element: intro,
                start: StartSpec::parse_or(Some(start.as_str()), "top 85%"),
                spec: tween,
                threshold: None,
                fired: false,
            });
        }
        let item_start = StartSpec::parse_or(Some(timings.item_start.as_str()), "top 90%");
        for (i, &item) in spec.items.iter().enumerate() {
            reveals.push(Reveal {
                element: item,
                start: item_start,
                spec: timings.item.delayed(timings.item_stagger_s * i as f64),
                threshold: None,
                fired: false,
            });
        }

        let snapshot = if spec.items.is_empty() {
            StageSnapshot::default()
        } else {
            StageSnapshot {
                last_stage: -1,
                active_index: 0,
                image_stage: 2,
            }
        };
        Self {
            section,
            rise_px: timings.rise_px,
            reveals,
            snapshot,
        }
    }

    pub fn section(&self) -> ElementId {
        self.section
    }

    pub fn snapshot(&self) -> StageSnapshot {
        self.snapshot
    }

    /// Resolve each trigger against the current layout. `spacing_before` maps a layout top to
    /// the pin spacing inserted above it. Fired reveals stay fired.
    pub fn measure(&mut self, host: &dyn Host, spacing_before: impl Fn(f64) -> f64) {
        let viewport: Viewport = host.viewport();
        for reveal in &mut self.reveals {
            reveal.threshold = host.element_rect(reveal.element).map(|rect| {
                let laid_out = rect + Vec2::new(0.0, spacing_before(rect.y0));
                reveal.start.resolve(laid_out, viewport)
            });
            if reveal.threshold.is_none() {
                tracing::debug!(element = %reveal.element, "reveal target missing, skipped");
            }
        }
    }

    /// Hide every element that has not been revealed yet.
    pub fn install(&self, animator: &mut Animator) {
        for reveal in self.reveals.iter().filter(|r| !r.fired) {
            animator.set(
                reveal.element,
                &[(StyleProp::Opacity, 0.0), (StyleProp::Y, self.rise_px)],
            );
        }
    }

    pub fn update(&mut self, offset: f64, animator: &mut Animator) -> Vec<StageEvent> {
        let mut events = Vec::new();
        for reveal in &mut self.reveals {
            let Some(threshold) = reveal.threshold else {
                continue;
            };
            if reveal.fired || offset < threshold {
                continue;
            }
            reveal.fired = true;
            animator.to(
                reveal.element,
                &[(StyleProp::Opacity, 1.0), (StyleProp::Y, 0.0)],
                reveal.spec,
                None,
            );
            events.push(StageEvent::Revealed {
                section: self.section,
                element: reveal.element,
            });
        }
        events
    }

    pub fn is_complete(&self) -> bool {
        self.reveals.iter().all(|r| r.fired)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/reveal.rs"]
mod tests;
