//! Mermaid bot process glue: store selection from settings and the console transport.
//!
//! The binary (`src/main.rs`) loads config, initializes logging, builds the
//! [`PreferenceStore`] with [`connect_store`] and feeds stdin messages to the
//! [`Dispatcher`](mermaid_core::Dispatcher) through [`console::run_console`].

pub mod console;

use mermaid_config::{BotSettings, StoreKind};
use mermaid_core::{PreferenceStore, ReplitDbConnector, SqliteConnector};

/// Builds the preference store for the configured backend.
///
/// Never fails: a backend that cannot be connected leaves the store in memory-only mode
/// (the store logs why).
pub async fn connect_store(settings: &BotSettings) -> PreferenceStore {
    match settings.store {
        StoreKind::Memory => {
            tracing::info!("no durable store configured, using in-memory storage");
            PreferenceStore::in_memory()
        }
        StoreKind::Sqlite => {
            PreferenceStore::initialize(&SqliteConnector::new(&settings.sqlite_path)).await
        }
        StoreKind::Replit => {
            let connector = match &settings.replit_db_url {
                Some(url) => ReplitDbConnector::new(url.clone()),
                None => ReplitDbConnector::from_env(),
            };
            PreferenceStore::initialize(&connector).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mermaid_core::UserKey;
    use std::path::PathBuf;

    fn settings(store: StoreKind, sqlite_path: PathBuf) -> BotSettings {
        BotSettings {
            store,
            sqlite_path,
            replit_db_url: None,
            log_file: None,
        }
    }

    #[tokio::test]
    async fn memory_store_is_not_durable() {
        let store = connect_store(&settings(StoreKind::Memory, PathBuf::from("unused.db"))).await;
        assert!(!store.is_durable_active());
    }

    #[tokio::test]
    async fn sqlite_store_is_durable() {
        let dir = tempfile::tempdir().unwrap();
        let store = connect_store(&settings(StoreKind::Sqlite, dir.path().join("prefs.db"))).await;
        assert!(store.is_durable_active());
        let user = UserKey::from_mention("<@3>", 3);
        store.set_theme(&user, "forest").await;
        assert_eq!(store.get_theme(&user).await, "forest");
    }

    #[tokio::test]
    async fn unreachable_replit_degrades_to_memory() {
        let mut s = settings(StoreKind::Replit, PathBuf::from("unused.db"));
        s.replit_db_url = Some("http://127.0.0.1:9/db".into());
        let store = connect_store(&s).await;
        assert!(!store.is_durable_active());
    }
}
