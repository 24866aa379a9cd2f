use crate::directive::duration::DurationSpec;
use crate::directive::start::StartSpec;
use crate::foundation::core::ElementId;

/// An element carrying one or more directives, as reported by the host in DOM order.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct TaggedElement {
    /// Element the directives are attached to.
    pub element: ElementId,
    /// Directives declared on the element.
    pub directives: Vec<Directive>,
}

/// Directive payload, tagged by kind.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Directive {
    /// Pin the element for a scroll distance.
    Pin(PinDirective),
    /// Treat child elements as sequential stages driven by the pin's progress.
    Stages(StageDirective),
    /// Pointer-following elements inside this container.
    Followers(FollowerDirective),
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Raw pin directive.
pub struct PinDirective {
    /// Opt-in flag.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Optional start-position override.
    #[serde(default)]
    pub start: Option<String>,
    /// Number (viewport multiples), `"<n>vh"`, `"<n>px"` or `"<n>%"`.
    #[serde(default)]
    pub duration: Option<serde_json::Value>,
    /// Whether following content is pushed down by the pin distance.
    #[serde(default)]
    pub pin_spacing: Option<bool>,
}

/// Validated pin directive.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PinSpec {
    pub start: StartSpec,
    pub duration: DurationSpec,
    pub pin_spacing: bool,
}

impl PinDirective {
    /// Validate and default. Bad fields are logged and replaced, never fatal.
    pub fn validate(&self) -> PinSpec {
        let duration = match &self.duration {
            None | Some(serde_json::Value::Null) => DurationSpec::default(),
            Some(v) => DurationSpec::from_value(v).unwrap_or_else(|err| {
                tracing::warn!(%err, "invalid pin duration, using zero-width window");
                DurationSpec::Px(0.0)
            }),
        };
        PinSpec {
            start: StartSpec::parse_or(self.start.as_deref(), StartSpec::DEFAULT_PIN),
            duration,
            pin_spacing: self.pin_spacing.unwrap_or(true),
        }
    }
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Raw stage directive.
pub struct StageDirective {
    /// Ordered stage items (enter/exit layer).
    #[serde(default)]
    pub items: Vec<ElementId>,
    /// Drift wrappers, one per item. Defaults to the items themselves.
    #[serde(default)]
    pub drift: Option<Vec<ElementId>>,
    /// Staircase layout: item `i` rests at `(32·i, −24·i)`.
    #[serde(default)]
    pub animate_in_right: Option<bool>,
    /// Element scaled with the stage (the companion visual).
    #[serde(default)]
    pub companion: Option<ElementId>,
    /// Element revealed by the approach trigger.
    #[serde(default)]
    pub intro: Option<ElementId>,
    /// Approach trigger position override.
    #[serde(default)]
    pub intro_start: Option<String>,
}

/// Validated stage directive.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StageSpec {
    pub items: Vec<ElementId>,
    pub drift: Vec<ElementId>,
    pub animate_in_right: bool,
    pub companion: Option<ElementId>,
    pub intro: Option<ElementId>,
    pub intro_start: StartSpec,
}

impl StageDirective {
    pub fn validate(&self) -> StageSpec {
        let drift = match &self.drift {
            Some(d) if d.len() == self.items.len() => d.clone(),
            Some(d) => {
                tracing::warn!(
                    items = self.items.len(),
                    drift = d.len(),
                    "drift layer count differs from item count, drifting items instead"
                );
                self.items.clone()
            }
            None => self.items.clone(),
        };
        StageSpec {
            items: self.items.clone(),
            drift,
            animate_in_right: self.animate_in_right.unwrap_or(false),
            companion: self.companion,
            intro: self.intro,
            intro_start: StartSpec::parse_or(self.intro_start.as_deref(), StartSpec::DEFAULT_INTRO),
        }
    }
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Raw follower directive.
pub struct FollowerDirective {
    /// Declared followers.
    #[serde(default)]
    pub eyes: Vec<FollowerConfig>,
    /// Spawn a follower on pointer-down.
    #[serde(default)]
    pub enable_click_to_add: Option<bool>,
    /// Lower spawn scale bound.
    #[serde(default)]
    pub min_spawn_scale: Option<f64>,
    /// Upper spawn scale bound.
    #[serde(default)]
    pub max_spawn_scale: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// One declared follower. Percentages are of the container; size is a diameter in pixels.
pub struct FollowerConfig {
    /// Stable key, when the content source provides one.
    #[serde(default, rename = "_key")]
    pub key: Option<String>,
    /// Desktop x anchor (percent).
    #[serde(default)]
    pub x: Option<f64>,
    /// Desktop y anchor (percent).
    #[serde(default)]
    pub y: Option<f64>,
    /// Desktop diameter.
    #[serde(default)]
    pub size: Option<f64>,
    /// Mobile x anchor override.
    #[serde(default)]
    pub x_mobile: Option<f64>,
    /// Mobile y anchor override.
    #[serde(default)]
    pub y_mobile: Option<f64>,
    /// Mobile diameter override.
    #[serde(default)]
    pub size_mobile: Option<f64>,
}

/// Anchor and size resolved for the current layout.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FollowerMetrics {
    pub x_percent: f64,
    pub y_percent: f64,
    pub size: f64,
}

pub const DEFAULT_FOLLOWER_SIZE: f64 = 72.0;

fn finite(v: Option<f64>) -> Option<f64> {
    v.filter(|v| v.is_finite())
}

impl FollowerConfig {
    pub fn metrics(&self, is_mobile: bool) -> FollowerMetrics {
        let x = finite(self.x).unwrap_or(50.0);
        let y = finite(self.y).unwrap_or(50.0);
        let size = finite(self.size).unwrap_or(DEFAULT_FOLLOWER_SIZE);
        if !is_mobile {
            return FollowerMetrics {
                x_percent: x,
                y_percent: y,
                size: size.max(0.0),
            };
        }
        FollowerMetrics {
            x_percent: finite(self.x_mobile).unwrap_or(x),
            y_percent: finite(self.y_mobile).unwrap_or(y),
            size: finite(self.size_mobile).unwrap_or(size).max(0.0),
        }
    }

    /// Physics key: the declared key, or one derived from the resolved layout.
    pub fn physics_key(&self, is_mobile: bool) -> String {
        if let Some(k) = &self.key {
            return k.clone();
        }
        let m = self.metrics(is_mobile);
        format!(
            "{}-{}-{}-{}",
            m.x_percent,
            m.y_percent,
            m.size,
            if is_mobile { "m" } else { "d" }
        )
    }
}

/// Validated follower group.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FollowerGroupSpec {
    pub followers: Vec<FollowerConfig>,
    pub click_to_add: bool,
    pub spawn_min: f64,
    pub spawn_max: f64,
}

impl FollowerDirective {
    pub fn validate(&self) -> FollowerGroupSpec {
        let raw_min = finite(self.min_spawn_scale).unwrap_or(0.6);
        let raw_max = finite(self.max_spawn_scale).unwrap_or(1.2);
        FollowerGroupSpec {
            followers: self.eyes.clone(),
            click_to_add: self.enable_click_to_add.unwrap_or(false),
            spawn_min: raw_min.min(raw_max),
            spawn_max: raw_min.max(raw_max),
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
#[path = "../../tests/unit/directive/model.rs"]
mod tests;
