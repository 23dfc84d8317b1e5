/// Convenience result type used across wordcap.
pub type CaptionResult<T> = Result<T, CaptionError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum CaptionError {
    /// Bad grouping size, empty palette, out-of-range animation parameters and similar.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Word timing data that would produce misaligned captions.
    #[error("malformed transcript: {0}")]
    MalformedTranscript(String),

    /// Failures of the external speech-to-text step.
    #[error("transcription error: {0}")]
    Transcription(String),

    /// Failures while probing or compositing the output video.
    #[error("composite error: {0}")]
    Composite(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CaptionError {
    /// Build a [`CaptionError::InvalidConfiguration`] value.
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Build a [`CaptionError::MalformedTranscript`] value.
    pub fn malformed_transcript(msg: impl Into<String>) -> Self {
        Self::MalformedTranscript(msg.into())
    }

    /// Build a [`CaptionError::Transcription`] value.
    pub fn transcription(msg: impl Into<String>) -> Self {
        Self::Transcription(msg.into())
    }

    /// Build a [`CaptionError::Composite`] value.
    pub fn composite(msg: impl Into<String>) -> Self {
        Self::Composite(msg.into())
    }

    /// Build a [`CaptionError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
