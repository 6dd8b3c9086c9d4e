/// Convenience result type used across ripplefx.
pub type RippleResult<T> = Result<T, RippleError>;

/// Top-level error taxonomy used by the effect APIs.
#[derive(thiserror::Error, Debug)]
pub enum RippleError {
    /// Invalid user-provided configuration, pointer tracks or images.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while executing a pass over pixel buffers.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RippleError {
    /// Build a [`RippleError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RippleError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`RippleError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
