//! Durable backend errors.

use thiserror::Error;

/// Errors from a durable backend.
///
/// Never returned by [`PreferenceStore`](super::PreferenceStore); the store logs them and
/// serves the call from the fallback tier instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BackendError {
    /// The backend could not be reached or is not configured.
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// A single get/set failed (I/O, bad status, driver error).
    #[error("backend operation failed: {0}")]
    Operation(String),
}

impl From<rusqlite::Error> for BackendError {
    fn from(e: rusqlite::Error) -> Self {
        BackendError::Operation(e.to_string())
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        BackendError::Operation(e.to_string())
    }
}
