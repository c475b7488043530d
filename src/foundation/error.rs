/// Convenience result type used across rawavi.
pub type AviResult<T> = Result<T, AviError>;

/// Top-level error taxonomy used by the container APIs.
#[derive(thiserror::Error, Debug)]
pub enum AviError {
    /// Invalid caller-provided dimensions, rates or frame data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A stream handle that does not belong to the container it was used with.
    #[error("unknown stream: {0}")]
    UnknownStream(usize),

    /// The container cannot be laid out as a single RIFF file (size fields overflow).
    #[error("layout error: {0}")]
    Layout(String),

    /// Errors when serializing or deserializing boundary messages and manifests.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AviError {
    /// Build an [`AviError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`AviError::Layout`] value.
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Build an [`AviError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for AviError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
