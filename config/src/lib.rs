//! Configuration for the mermaid bot.
//!
//! [`load_and_apply`] merges `$XDG_CONFIG_HOME/<app>/config.toml` (`[env]` table) and a
//! project `.env` into the process environment with priority **existing env > .env > XDG**.
//! [`BotSettings`] then reads the typed settings from the environment.
//!
//! With the `tracing-init` feature, [`logging::init`] installs the tracing subscriber.

mod dotenv;
#[cfg(feature = "tracing-init")]
mod log_format;
#[cfg(feature = "tracing-init")]
pub mod logging;
mod settings;
mod xdg_toml;

pub use settings::{BotSettings, SettingsError, StoreKind};

use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Directory name under `$XDG_CONFIG_HOME`.
pub const APP_NAME: &str = "mermaid-bot";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("xdg config path: {0}")]
    XdgPath(String),
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("read .env: {0}")]
    DotenvRead(std::io::Error),
}

/// Sets every key found in `.env` or the XDG `[env]` table that is not already in the
/// process environment. `.env` wins over XDG.
///
/// * `app_name`: XDG directory name, normally [`APP_NAME`].
/// * `dotenv_dir`: directory holding `.env`; current directory when `None`.
pub fn load_and_apply(app_name: &str, dotenv_dir: Option<&Path>) -> Result<(), LoadError> {
    let from_xdg = xdg_toml::load_env_map(app_name)?;
    let from_dotenv = dotenv::load_env_map(dotenv_dir).map_err(LoadError::DotenvRead)?;

    let keys: HashSet<&String> = from_xdg.keys().chain(from_dotenv.keys()).collect();
    for key in keys {
        if std::env::var_os(key).is_some() {
            continue;
        }
        if let Some(value) = from_dotenv.get(key).or_else(|| from_xdg.get(key)) {
            std::env::set_var(key, value);
        }
    }
    Ok(())
}

/// Serializes tests that mutate process-wide environment variables.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
