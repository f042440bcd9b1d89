//! Typed bot settings read from the (already merged) environment.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

pub const STORE_ENV: &str = "MERMAID_BOT_STORE";
pub const SQLITE_PATH_ENV: &str = "MERMAID_BOT_SQLITE_PATH";
pub const REPLIT_DB_URL_ENV: &str = "REPLIT_DB_URL";
pub const LOG_FILE_ENV: &str = "LOG_FILE";

const DEFAULT_SQLITE_PATH: &str = "mermaid-bot.db";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("MERMAID_BOT_STORE: unknown store {0:?} (expected memory, sqlite or replit)")]
    InvalidStore(String),
}

/// Which durable backend the preference store connects to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// No durable backend; in-memory only.
    Memory,
    Sqlite,
    Replit,
}

impl FromStr for StoreKind {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreKind::Memory),
            "sqlite" => Ok(StoreKind::Sqlite),
            "replit" => Ok(StoreKind::Replit),
            _ => Err(SettingsError::InvalidStore(s.to_string())),
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StoreKind::Memory => "memory",
            StoreKind::Sqlite => "sqlite",
            StoreKind::Replit => "replit",
        })
    }
}

/// Settings for the bot process.
///
/// | Variable | Meaning | Default |
/// |---|---|---|
/// | `MERMAID_BOT_STORE` | `memory`, `sqlite` or `replit` | `replit` if `REPLIT_DB_URL` is set, else `memory` |
/// | `MERMAID_BOT_SQLITE_PATH` | SQLite file for the `sqlite` store | `mermaid-bot.db` |
/// | `REPLIT_DB_URL` | Base URL of the Replit DB service | unset |
/// | `LOG_FILE` | Append logs here instead of stderr | unset |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotSettings {
    pub store: StoreKind,
    pub sqlite_path: PathBuf,
    pub replit_db_url: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl BotSettings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let replit_db_url = get(REPLIT_DB_URL_ENV);
        let store = match get(STORE_ENV) {
            Some(raw) => raw.parse()?,
            None if replit_db_url.is_some() => StoreKind::Replit,
            None => StoreKind::Memory,
        };
        Ok(Self {
            store,
            sqlite_path: get(SQLITE_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SQLITE_PATH)),
            replit_db_url,
            log_file: get(LOG_FILE_ENV).map(PathBuf::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> Result<BotSettings, SettingsError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        BotSettings::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults_to_memory() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.store, StoreKind::Memory);
        assert_eq!(s.sqlite_path, PathBuf::from("mermaid-bot.db"));
        assert_eq!(s.replit_db_url, None);
        assert_eq!(s.log_file, None);
    }

    #[test]
    fn replit_url_selects_replit() {
        let s = settings(&[("REPLIT_DB_URL", "https://kv.example/v0/t")]).unwrap();
        assert_eq!(s.store, StoreKind::Replit);
        assert_eq!(s.replit_db_url.as_deref(), Some("https://kv.example/v0/t"));
    }

    #[test]
    fn explicit_store_wins() {
        let s = settings(&[
            ("REPLIT_DB_URL", "https://kv.example/v0/t"),
            ("MERMAID_BOT_STORE", "SQLite"),
            ("MERMAID_BOT_SQLITE_PATH", "/data/prefs.db"),
        ])
        .unwrap();
        assert_eq!(s.store, StoreKind::Sqlite);
        assert_eq!(s.sqlite_path, PathBuf::from("/data/prefs.db"));
    }

    #[test]
    fn empty_values_are_unset() {
        let s = settings(&[("REPLIT_DB_URL", "  "), ("MERMAID_BOT_STORE", "")]).unwrap();
        assert_eq!(s.store, StoreKind::Memory);
    }

    #[test]
    fn unknown_store_is_error() {
        assert_eq!(
            settings(&[("MERMAID_BOT_STORE", "redis")]),
            Err(SettingsError::InvalidStore("redis".into()))
        );
    }

    #[test]
    fn store_kind_display_parses_back() {
        for kind in [StoreKind::Memory, StoreKind::Sqlite, StoreKind::Replit] {
            assert_eq!(kind.to_string().parse::<StoreKind>(), Ok(kind));
        }
    }
}
