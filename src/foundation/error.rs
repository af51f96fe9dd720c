/// Convenience result type used across stepviz.
pub type VizResult<T> = Result<T, VizError>;

/// Error taxonomy for the fallible edges of the crate (parsing, config, sinks).
///
/// Classification, frame building and playback never fail; degenerate input there resolves to a
/// visible rendering outcome instead.
#[derive(thiserror::Error, Debug)]
pub enum VizError {
    /// Structurally invalid response or config data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Errors while turning draw commands into an output document or raster.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VizError {
    /// Build a [`VizError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`VizError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`VizError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

impl From<serde_json::Error> for VizError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
