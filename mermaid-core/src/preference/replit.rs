//! HTTP key-value backend speaking the Replit DB protocol.
//!
//! - read: `GET <base>/<key>` → 200 with the stored value, 404 when absent
//! - write: `POST <base>` with form body `<key>=<value>`
//!
//! Values are stored JSON-encoded, the way the Replit client libraries write them, so a
//! theme saved as `dark` travels as `"dark"`. Bodies that are not a JSON string are read
//! back as-is.
//! - probe: `GET <base>?prefix=` (key listing) must succeed for `connect` to succeed
//!
//! The base URL comes from `REPLIT_DB_URL`, or from the `/tmp/replitdb` file that the
//! hosted environment rotates.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};

use super::{BackendError, DurableBackend, DurableConnector};

pub const REPLIT_DB_URL_ENV: &str = "REPLIT_DB_URL";
pub const REPLIT_DB_URL_FILE: &str = "/tmp/replitdb";

/// Durable backend over a Replit-DB-compatible HTTP service.
pub struct ReplitDbBackend {
    client: reqwest::Client,
    base: Url,
}

impl ReplitDbBackend {
    pub fn new(client: reqwest::Client, base: Url) -> Self {
        Self { client, base }
    }

    fn key_url(&self, key: &str) -> Result<Url, BackendError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| {
                BackendError::Operation(format!("base url cannot hold a key: {}", self.base))
            })?
            .pop_if_empty()
            .push(key);
        Ok(url)
    }
}

#[async_trait]
impl DurableBackend for ReplitDbBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        let url = self.key_url(key)?;
        let resp = self.client.get(url).send().await?;
        match resp.status() {
            StatusCode::NOT_FOUND => Ok(None),
            s if s.is_success() => Ok(Some(decode_value(resp.text().await?))),
            s => Err(BackendError::Operation(format!("get {}: status {}", key, s))),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        let encoded = serde_json::to_string(value)
            .map_err(|e| BackendError::Operation(format!("encode {}: {}", key, e)))?;
        let resp = self
            .client
            .post(self.base.clone())
            .form(&[(key, encoded.as_str())])
            .send()
            .await?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(BackendError::Operation(format!(
                "set {}: status {}",
                key,
                resp.status()
            )))
        }
    }
}

/// Unwraps a JSON string body; anything else is taken verbatim.
fn decode_value(body: String) -> String {
    match serde_json::from_str::<String>(&body) {
        Ok(value) => value,
        Err(_) => body,
    }
}

/// Connects a [`ReplitDbBackend`], probing the service once.
#[derive(Debug, Clone, Default)]
pub struct ReplitDbConnector {
    url: Option<String>,
}

impl ReplitDbConnector {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
        }
    }

    /// Uses `REPLIT_DB_URL`, else the contents of `/tmp/replitdb`. With neither, `connect`
    /// reports the backend as unavailable.
    pub fn from_env() -> Self {
        let url = std::env::var(REPLIT_DB_URL_ENV)
            .ok()
            .filter(|u| !u.trim().is_empty())
            .or_else(|| read_url_file(PathBuf::from(REPLIT_DB_URL_FILE)));
        Self { url }
    }
}

fn read_url_file(path: PathBuf) -> Option<String> {
    std::fs::read_to_string(path)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[async_trait]
impl DurableConnector for ReplitDbConnector {
    async fn connect(&self) -> Result<Arc<dyn DurableBackend>, BackendError> {
        let raw = self.url.as_deref().ok_or_else(|| {
            BackendError::Unavailable(format!("{} is not set", REPLIT_DB_URL_ENV))
        })?;
        let base = Url::parse(raw.trim())
            .map_err(|e| BackendError::Unavailable(format!("invalid db url: {}", e)))?;
        let client = reqwest::Client::new();

        let mut probe = base.clone();
        probe.query_pairs_mut().append_pair("prefix", "");
        let resp = client
            .get(probe)
            .send()
            .await
            .map_err(|e| BackendError::Unavailable(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(BackendError::Unavailable(format!(
                "probe returned status {}",
                resp.status()
            )));
        }
        tracing::debug!(host = ?base.host_str(), "replit db reachable");
        Ok(Arc::new(ReplitDbBackend::new(client, base)))
    }
}
