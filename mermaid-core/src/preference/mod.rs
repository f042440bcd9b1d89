//! Per-user theme preferences with a durable tier and an in-memory fallback tier.
//!
//! - [`DurableConnector`] / [`DurableBackend`]: the external key-value service (connect, get, set).
//! - [`FallbackStore`]: process-lifetime map used when the durable tier is down or errors.
//! - [`PreferenceStore`]: routes each call to the right tier and absorbs backend errors.
//!
//! Backends: [`SqliteBackend`] (local file) and [`ReplitDbBackend`] (HTTP key-value service).

mod error;
mod fallback;
mod replit;
mod sqlite;
mod store;

pub use error::BackendError;
pub use fallback::FallbackStore;
pub use replit::{ReplitDbBackend, ReplitDbConnector, REPLIT_DB_URL_ENV, REPLIT_DB_URL_FILE};
pub use sqlite::{SqliteBackend, SqliteConnector};
pub use store::PreferenceStore;

use std::sync::Arc;

use async_trait::async_trait;

/// Theme reported to users that never set one.
pub const DEFAULT_THEME: &str = "default";

/// Durable key-value backend with flat string keys and values.
///
/// `get` returns `Ok(None)` when the key is absent; errors are reserved for failures
/// of the backend itself.
#[async_trait]
pub trait DurableBackend: Send + Sync {
    /// Reads the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, BackendError>;

    /// Writes `value` under `key`, overwriting any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), BackendError>;
}

/// Establishes a handle to a durable backend.
///
/// Called once by [`PreferenceStore::initialize`]; a failure here puts the store into
/// fallback-only mode for its whole lifetime.
#[async_trait]
pub trait DurableConnector: Send + Sync {
    async fn connect(&self) -> Result<Arc<dyn DurableBackend>, BackendError>;
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Scripted backends for store tests.

    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use tokio::sync::Mutex;

    use super::{BackendError, DurableBackend, DurableConnector};

    /// In-memory durable backend that can be told to fail reads or writes and counts calls.
    #[derive(Default)]
    pub struct ScriptedBackend {
        pub values: Mutex<HashMap<String, String>>,
        pub fail_get: AtomicBool,
        pub fail_set: AtomicBool,
        pub gets: AtomicUsize,
        pub sets: AtomicUsize,
    }

    impl ScriptedBackend {
        pub fn failing_writes() -> Self {
            let b = Self::default();
            b.fail_set.store(true, Ordering::SeqCst);
            b
        }

        pub fn failing_reads() -> Self {
            let b = Self::default();
            b.fail_get.store(true, Ordering::SeqCst);
            b
        }

        pub fn calls(&self) -> usize {
            self.gets.load(Ordering::SeqCst) + self.sets.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DurableBackend for ScriptedBackend {
        async fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
            self.gets.fetch_add(1, Ordering::SeqCst);
            if self.fail_get.load(Ordering::SeqCst) {
                return Err(BackendError::Operation("scripted read failure".into()));
            }
            Ok(self.values.lock().await.get(key).cloned())
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
            self.sets.fetch_add(1, Ordering::SeqCst);
            if self.fail_set.load(Ordering::SeqCst) {
                return Err(BackendError::Operation("scripted write failure".into()));
            }
            self.values
                .lock()
                .await
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    /// Connector that always fails, counting attempts.
    #[derive(Default)]
    pub struct RefusingConnector {
        pub attempts: AtomicUsize,
    }

    #[async_trait]
    impl DurableConnector for RefusingConnector {
        async fn connect(&self) -> Result<Arc<dyn DurableBackend>, BackendError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(BackendError::Unavailable("no durable store here".into()))
        }
    }

    /// Connector handing out a shared scripted backend.
    pub struct SharedConnector(pub Arc<ScriptedBackend>);

    #[async_trait]
    impl DurableConnector for SharedConnector {
        async fn connect(&self) -> Result<Arc<dyn DurableBackend>, BackendError> {
            Ok(self.0.clone())
        }
    }
}
