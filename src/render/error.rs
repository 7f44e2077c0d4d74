//! Render error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid node: {0}")]
    InvalidNode(String),

    #[error("Unknown page: {0}")]
    UnknownPage(String),
}

impl RenderError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidNode(reason.into())
    }
}
