//! [`PreferenceStore`]: durable tier first, fallback on failure, errors never surface.

use std::sync::Arc;

use super::{DurableBackend, DurableConnector, FallbackStore, DEFAULT_THEME};
use crate::user_key::UserKey;

/// Which tier serves calls. Fixed at construction.
enum Tier {
    /// Durable backend is tried first on every call; failures fall back per call.
    DurableActive(Arc<dyn DurableBackend>),
    /// Durable backend failed to connect (or none configured); only the map is used.
    Fallback,
}

/// Theme preference store over a durable backend and an in-memory fallback map.
///
/// One instance is owned by the dispatcher and shared by reference (`Arc`) across
/// commands. Construct a fresh instance per test for isolation.
///
/// Values written to the fallback map while the durable backend errors are not migrated
/// back once it recovers, and are lost on restart.
pub struct PreferenceStore {
    tier: Tier,
    fallback: FallbackStore,
}

impl PreferenceStore {
    /// Connects the durable backend. Never fails: on connect error the store logs a
    /// warning and uses only the fallback map for the rest of its life.
    pub async fn initialize(connector: &dyn DurableConnector) -> Self {
        let tier = match connector.connect().await {
            Ok(backend) => {
                tracing::info!("durable preference store connected");
                Tier::DurableActive(backend)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "durable preference store not available, using in-memory storage"
                );
                Tier::Fallback
            }
        };
        Self {
            tier,
            fallback: FallbackStore::new(),
        }
    }

    /// Store with an already connected durable backend.
    pub fn with_backend(backend: Arc<dyn DurableBackend>) -> Self {
        Self {
            tier: Tier::DurableActive(backend),
            fallback: FallbackStore::new(),
        }
    }

    /// Fallback-only store; no durable calls are ever made.
    pub fn in_memory() -> Self {
        Self {
            tier: Tier::Fallback,
            fallback: FallbackStore::new(),
        }
    }

    pub fn is_durable_active(&self) -> bool {
        matches!(self.tier, Tier::DurableActive(_))
    }

    /// Writes `value` for `key`. Always succeeds from the caller's point of view.
    ///
    /// A durable write error is logged and the value goes to the fallback map for this
    /// call only; the next call tries the durable backend again.
    pub async fn set(&self, key: &UserKey, value: &str) {
        match &self.tier {
            Tier::DurableActive(backend) => {
                if let Err(e) = backend.set(key.as_str(), value).await {
                    tracing::error!(
                        key = %key,
                        error = %e,
                        "error writing to durable store, keeping value in memory"
                    );
                    self.fallback.set(key.as_str(), value).await;
                }
            }
            Tier::Fallback => self.fallback.set(key.as_str(), value).await,
        }
    }

    /// Reads the value for `key`; `None` when never set.
    ///
    /// When the durable backend answers, its answer is authoritative (an absent key is not
    /// looked up in the fallback map). Only a durable read error falls back.
    ///
    /// A value kept in memory after a failed write is therefore only visible while durable
    /// reads also fail; once the backend answers again it hides that value.
    pub async fn get(&self, key: &UserKey) -> Option<String> {
        match &self.tier {
            Tier::DurableActive(backend) => match backend.get(key.as_str()).await {
                Ok(value) => value,
                Err(e) => {
                    tracing::error!(
                        key = %key,
                        error = %e,
                        "error reading from durable store, using in-memory value"
                    );
                    self.fallback.get(key.as_str()).await
                }
            },
            Tier::Fallback => self.fallback.get(key.as_str()).await,
        }
    }

    /// Theme for `key`, or [`DEFAULT_THEME`] when none is stored.
    pub async fn get_theme(&self, key: &UserKey) -> String {
        self.get(key)
            .await
            .unwrap_or_else(|| DEFAULT_THEME.to_string())
    }

    /// Same as [`set`](Self::set); named for the command layer.
    pub async fn set_theme(&self, key: &UserKey, theme: &str) {
        self.set(key, theme).await
    }
}
