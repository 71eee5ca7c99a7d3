/// Convenience result type used across canvasforge.
pub type RenderResult<T> = Result<T, RenderError>;

/// Top-level error taxonomy used by painter, exporter and preset APIs.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    /// Malformed user-provided parameters (unparsable color, non-finite size, ...).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A user-supplied image could not be decoded.
    #[error("image decode failed: {0}")]
    ImageDecodeFailed(String),

    /// Encoding or naming the exported image failed.
    #[error("export failed: {0}")]
    ExportFailed(String),

    /// Reading or writing a parameter preset failed.
    #[error("preset error: {0}")]
    Preset(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RenderError {
    /// Build a [`RenderError::InvalidParameter`] value.
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Build a [`RenderError::ImageDecodeFailed`] value.
    pub fn image_decode(msg: impl Into<String>) -> Self {
        Self::ImageDecodeFailed(msg.into())
    }

    /// Build a [`RenderError::ExportFailed`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::ExportFailed(msg.into())
    }

    /// Build a [`RenderError::Preset`] value.
    pub fn preset(msg: impl Into<String>) -> Self {
        Self::Preset(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
