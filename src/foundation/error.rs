/// Convenience result type used across the synthesis pipeline.
pub type SynthResult<T> = Result<T, SynthError>;

/// Top-level error taxonomy used by pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum SynthError {
    /// Invalid configuration or user-provided parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// Blend operands that cannot be combined (size or buffer mismatch).
    #[error("blend error: {0}")]
    Blend(String),

    /// Errors raised while running an augmentation pass.
    #[error("augmentation error: {0}")]
    Augment(String),

    /// Wrapped lower-level error from decoding, encoding or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SynthError {
    /// Build a [`SynthError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SynthError::Blend`] value.
    pub fn blend(msg: impl Into<String>) -> Self {
        Self::Blend(msg.into())
    }

    /// Build a [`SynthError::Augment`] value.
    pub fn augment(msg: impl Into<String>) -> Self {
        Self::Augment(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
