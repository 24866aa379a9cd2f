use crate::foundation::core::{Rect, Viewport};
use crate::foundation::error::{ScrollStageError, ScrollStageResult};

/// One side of a start specification: a fraction of the measured box or a pixel distance from its
/// top edge.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum Edge {
    /// Fraction of the box height (`top` = 0, `center` = 0.5, `bottom` = 1, `"80%"` = 0.8).
    Fraction(f64),
    /// Absolute pixels below the box top.
    Px(f64),
}

impl Edge {
    fn parse(token: &str) -> ScrollStageResult<Self> {
        let t = token.trim().to_ascii_lowercase();
        match t.as_str() {
            "top" => return Ok(Self::Fraction(0.0)),
            "center" | "middle" => return Ok(Self::Fraction(0.5)),
            "bottom" => return Ok(Self::Fraction(1.0)),
            _ => {}
        }
        if let Some(num) = t.strip_suffix('%') {
            return parse_finite(num).map(|v| Self::Fraction(v / 100.0));
        }
        let num = t.strip_suffix("px").unwrap_or(&t);
        parse_finite(num).map(Self::Px)
    }

    fn offset_in(self, extent: f64) -> f64 {
        match self {
            Self::Fraction(f) => extent * f,
            Self::Px(px) => px,
        }
    }
}

fn parse_finite(s: &str) -> ScrollStageResult<f64> {
    let v: f64 = s
        .trim()
        .parse()
        .map_err(|_| ScrollStageError::validation(format!("'{s}' is not a number")))?;
    if !v.is_finite() {
        return Err(ScrollStageError::validation(format!("'{s}' is not finite")));
    }
    Ok(v)
}

/// Where a scroll window starts: "when `element` edge meets `viewport` edge".
///
/// Written as `"<element-edge>[+=N|-=N] <viewport-edge>"`, e.g. `"top 80%"` or
/// `"center-=80 center"`. A missing viewport edge means the viewport top.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct StartSpec {
    pub element: Edge,
    pub element_adjust_px: f64,
    pub viewport: Edge,
}

impl StartSpec {
    /// Pin start used when a directive gives none: element centre, less the fixed nav height,
    /// meets the viewport centre.
    pub const DEFAULT_PIN: &'static str = "center-=80 center";
    /// Desktop approach trigger for stage intros.
    pub const DEFAULT_INTRO: &'static str = "top 80%";

    pub fn parse(s: &str) -> ScrollStageResult<Self> {
        let mut tokens = s.split_whitespace();
        let Some(first) = tokens.next() else {
            return Err(ScrollStageError::validation("start spec must be non-empty"));
        };
        let second = tokens.next();
        if tokens.next().is_some() {
            return Err(ScrollStageError::validation(format!(
                "start spec '{s}' has more than two parts"
            )));
        }

        let (edge, adjust) = match first.find("+=").or_else(|| first.find("-=")) {
            Some(at) => {
                let sign = if first[at..].starts_with('-') { -1.0 } else { 1.0 };
                let amount = first[at + 2..].trim_end_matches("px");
                (&first[..at], sign * parse_finite(amount)?)
            }
            None => (first, 0.0),
        };

        Ok(Self {
            element: Edge::parse(edge)?,
            element_adjust_px: adjust,
            viewport: match second {
                Some(tok) => Edge::parse(tok)?,
                None => Edge::Fraction(0.0),
            },
        })
    }

    /// Parse `s`, falling back to `fallback` (which must itself be valid) with a warning.
    pub fn parse_or(s: Option<&str>, fallback: &'static str) -> Self {
        let fallback_spec = || {
            Self::parse(fallback).unwrap_or(Self {
                element: Edge::Fraction(0.0),
                element_adjust_px: 0.0,
                viewport: Edge::Fraction(0.0),
            })
        };
        match s {
            None => fallback_spec(),
            Some(raw) => Self::parse(raw).unwrap_or_else(|err| {
                tracing::warn!(start = raw, %err, "unparseable start spec, using default");
                fallback_spec()
            }),
        }
    }

    /// Scroll offset at which the window opens, for an element laid out at `rect` (document space).
    pub fn resolve(&self, rect: Rect, viewport: Viewport) -> f64 {
        rect.y0 + self.element.offset_in(rect.height()) + self.element_adjust_px
            - self.viewport.offset_in(viewport.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/directive/start.rs"]
mod tests;
