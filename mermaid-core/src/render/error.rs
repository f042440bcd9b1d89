//! Render URL errors.

use thiserror::Error;

/// The only error that reaches callers of the core: the payload could not be encoded.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RenderError {
    #[error("encoding render payload: {0}")]
    Encoding(String),
}

impl From<serde_json::Error> for RenderError {
    fn from(e: serde_json::Error) -> Self {
        RenderError::Encoding(e.to_string())
    }
}
