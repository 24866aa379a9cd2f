use crate::foundation::error::{ScrollStageError, ScrollStageResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String")]
pub enum Ease {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InQuart,
    OutQuart,
    InOutQuart,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InQuart => t.powi(4),
            Self::OutQuart => 1.0 - (1.0 - t).powi(4),
            Self::InOutQuart => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(4) / 2.0)
                }
            }
        }
    }

    /// Parse an ease name. Accepts the variant names (`"OutQuart"`), `powerN.dir` names
    /// (`"power3.out"`) and the CSS keywords. Case and `.`/`-`/`_` separators are ignored.
    pub fn parse(name: &str) -> ScrollStageResult<Self> {
        let n: String = name
            .trim()
            .chars()
            .filter(|c| !matches!(c, '.' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        let ease = match n.as_str() {
            "linear" | "none" | "power0" => Self::Linear,
            "inquad" | "power1in" | "quadin" | "easein" => Self::InQuad,
            "outquad" | "power1out" | "quadout" | "easeout" => Self::OutQuad,
            "inoutquad" | "power1inout" | "quadinout" | "easeinout" => Self::InOutQuad,
            "incubic" | "power2in" | "cubicin" => Self::InCubic,
            "outcubic" | "power2out" | "cubicout" => Self::OutCubic,
            "inoutcubic" | "power2inout" | "cubicinout" => Self::InOutCubic,
            "inquart" | "power3in" | "quartin" => Self::InQuart,
            "outquart" | "power3out" | "quartout" => Self::OutQuart,
            "inoutquart" | "power3inout" | "quartinout" => Self::InOutQuart,
            _ => {
                return Err(ScrollStageError::animation(format!(
                    "unknown ease '{name}'"
                )));
            }
        };
        Ok(ease)
    }
}

impl TryFrom<String> for Ease {
    type Error = ScrollStageError;

    fn try_from(name: String) -> ScrollStageResult<Self> {
        Self::parse(&name)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
