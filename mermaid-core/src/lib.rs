//! # Mermaid core
//!
//! Core of the mermaid chat bot: per-user theme preferences and render URL building.
//!
//! ## Main modules
//!
//! - [`preference`]: [`PreferenceStore`] over a durable backend ([`DurableBackend`],
//!   [`DurableConnector`]) with an in-memory [`FallbackStore`]. Storage errors never reach
//!   the caller; they are logged and the call is served from the fallback tier.
//!   Backends: [`SqliteBackend`], [`ReplitDbBackend`].
//! - [`render`]: [`RenderRequestEncoder`] builds `https://mermaid.ink/img/<payload>` URLs.
//! - [`command`]: [`Command`] parsing for the `!mermaid-` prefix, [`PresenceStatus`],
//!   [`Embed`] and the transport-neutral [`Dispatcher`].
//! - [`user_key`]: [`UserKey`], the stable per-user lookup key.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use mermaid_core::{PreferenceStore, RenderRequestEncoder, UserKey};
//!
//! # async fn run() -> Result<(), mermaid_core::RenderError> {
//! let store = PreferenceStore::in_memory();
//! let user = UserKey::from_mention("<@42>", 42);
//! store.set_theme(&user, "forest").await;
//!
//! let theme = store.get(&user).await;
//! let url = RenderRequestEncoder::new().build("graph TD; A-->B", theme.as_deref())?;
//! assert!(url.starts_with("https://mermaid.ink/img/"));
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod preference;
pub mod render;
pub mod user_key;

pub use command::{
    BotLinks, Command, CommandError, Dispatcher, Embed, EmbedField, PresenceStatus, Reply,
    COMMAND_PREFIX,
};
pub use preference::{
    BackendError, DurableBackend, DurableConnector, FallbackStore, PreferenceStore,
    ReplitDbBackend, ReplitDbConnector, SqliteBackend, SqliteConnector, DEFAULT_THEME,
};
pub use render::{RenderError, RenderRequestEncoder, DARK_THEME_SUFFIX, MERMAID_INK_BASE};
pub use user_key::UserKey;
