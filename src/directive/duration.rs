use crate::foundation::core::Viewport;
use crate::foundation::error::{ScrollStageError, ScrollStageResult};

/// Declared length of a pin window, resolved lazily against the current layout.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum DurationSpec {
    /// Bare number: multiples of the viewport height.
    ViewportMultiple(f64),
    /// `"<n>vh"`.
    ViewportPercent(f64),
    /// `"<n>px"`.
    Px(f64),
    /// `"<n>%"` of the target's own height.
    SelfPercent(f64),
}

impl Default for DurationSpec {
    fn default() -> Self {
        Self::ViewportPercent(300.0)
    }
}

impl DurationSpec {
    pub fn from_value(value: &serde_json::Value) -> ScrollStageResult<Self> {
        match value {
            serde_json::Value::Number(n) => n
                .as_f64()
                .map(Self::ViewportMultiple)
                .ok_or_else(|| ScrollStageError::validation("duration number out of range")),
            serde_json::Value::String(s) => Self::parse(s),
            other => Err(ScrollStageError::validation(format!(
                "duration must be a number or string, got {other}"
            ))),
        }
    }

    pub fn parse(s: &str) -> ScrollStageResult<Self> {
        let t = s.trim().to_ascii_lowercase();
        let (num, ctor): (&str, fn(f64) -> Self) = if let Some(n) = t.strip_suffix("vh") {
            (n, Self::ViewportPercent)
        } else if let Some(n) = t.strip_suffix("px") {
            (n, Self::Px)
        } else if let Some(n) = t.strip_suffix('%') {
            (n, Self::SelfPercent)
        } else {
            (t.as_str(), Self::ViewportMultiple)
        };
        let v: f64 = num
            .trim()
            .parse()
            .map_err(|_| ScrollStageError::validation(format!("unparseable duration '{s}'")))?;
        Ok(ctor(v))
    }

    /// Resolve to pixels. Negative or non-finite results collapse to a zero-width window.
    pub fn resolve(self, viewport: Viewport, element_height: f64) -> f64 {
        let px = match self {
            Self::ViewportMultiple(m) => m * viewport.height,
            Self::ViewportPercent(p) => p / 100.0 * viewport.height,
            Self::Px(px) => px,
            Self::SelfPercent(p) => p / 100.0 * element_height,
        };
        if px.is_finite() && px > 0.0 {
            px
        } else {
            tracing::warn!(spec = ?self, resolved = px, "degenerate pin duration, using zero-width window");
            0.0
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/directive/duration.rs"]
mod tests;
