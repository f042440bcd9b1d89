//! In-memory fallback tier. Not persistent.

use std::collections::HashMap;

use tokio::sync::RwLock;

/// Process-lifetime map from user key to theme.
///
/// Empty at construction and lost on restart. Each `get`/`set` takes the lock once, so
/// concurrent commands on a multi-threaded runtime never observe a torn update.
#[derive(Debug, Default)]
pub struct FallbackStore {
    inner: RwLock<HashMap<String, String>>,
}

impl FallbackStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        self.inner.read().await.get(key).cloned()
    }

    pub async fn set(&self, key: &str, value: &str) {
        self.inner
            .write()
            .await
            .insert(key.to_string(), value.to_string());
    }

    /// Number of keys held.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn starts_empty() {
        let store = FallbackStore::new();
        assert!(store.is_empty().await);
        assert_eq!(store.get("anyone").await, None);
    }

    #[tokio::test]
    async fn set_overwrites() {
        let store = FallbackStore::new();
        store.set("u", "forest").await;
        store.set("u", "dark").await;
        assert_eq!(store.get("u").await.as_deref(), Some("dark"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_writers_keep_every_key() {
        let store = Arc::new(FallbackStore::new());
        let mut handles = Vec::new();
        for i in 0..64 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.set(&format!("user{}", i), "neutral").await;
            }));
        }
        for h in handles {
            h.await.unwrap();
        }
        assert_eq!(store.len().await, 64);
    }
}
