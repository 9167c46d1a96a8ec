//! Error types for dnstap-yaml.

use thiserror::Error;

/// Errors that can occur outside of rendering itself.
///
/// Rendering never fails; these cover loading the renderer's configuration.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Configuration is malformed.
    #[error("config error: {0}")]
    Config(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure reported by a decode collaborator.
///
/// The display form is the detail written after `parse failed: ` in the
/// rendered comment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{detail}")]
pub struct DecodeError {
    detail: String,
}

impl DecodeError {
    /// Wrap a collaborator's error detail.
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    /// The collaborator's error detail.
    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }
}
