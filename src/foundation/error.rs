/// Convenience result type used across quotegenx.
pub type QuotegenxResult<T> = Result<T, QuotegenxError>;

/// Error taxonomy for configuration, rendering, fonts, and export.
///
/// Missing fonts and undecodable images are not errors; they are logged and rendering degrades.
#[derive(thiserror::Error, Debug)]
pub enum QuotegenxError {
    /// Invalid user-provided options or document data.
    #[error("validation error: {0}")]
    Validation(String),

    /// The frame cannot be rasterized (empty, or too large for the backend).
    #[error("render error: {0}")]
    Render(String),

    /// No usable font, or font data that could not be registered.
    #[error("font error: {0}")]
    Font(String),

    /// Encoding or delivering an exported image failed.
    #[error("export error: {0}")]
    Export(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl QuotegenxError {
    /// Build a [`QuotegenxError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`QuotegenxError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`QuotegenxError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`QuotegenxError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`QuotegenxError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
