/// Convenience result type used across scrollstage.
pub type ScrollStageResult<T> = Result<T, ScrollStageError>;

/// Error taxonomy for the scroll and physics runtime.
///
/// None of these reach the end user: page-facing entry points log them and degrade to a simpler
/// mode (no smoothing, no pinning, no animation) instead.
#[derive(thiserror::Error, Debug)]
pub enum ScrollStageError {
    /// Invalid declarative directive data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A host primitive (smoothing probe, pin spacer, storage) failed.
    #[error("host error: {0}")]
    Host(String),

    /// Errors while scheduling or sampling animations.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollStageError {
    /// Build a [`ScrollStageError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScrollStageError::Host`] value.
    pub fn host(msg: impl Into<String>) -> Self {
        Self::Host(msg.into())
    }

    /// Build a [`ScrollStageError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`ScrollStageError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for ScrollStageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
