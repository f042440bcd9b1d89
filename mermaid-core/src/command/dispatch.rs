//! [`Dispatcher`]: runs parsed commands against the preference store and render encoder.

use std::sync::Arc;

use serde::Serialize;
use tracing::Instrument;

use super::embed::{help_embed, invite_embed, support_embed, BotLinks, Embed};
use super::{Command, PresenceStatus};
use crate::preference::PreferenceStore;
use crate::render::RenderRequestEncoder;
use crate::user_key::UserKey;

/// Reply text when the render payload cannot be encoded.
const RENDER_FAILED: &str = "Could not process request";

/// What the transport should do in response to a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Reply {
    /// Reply to the message with plain text.
    Text(String),
    /// Send a card to the channel.
    Embed(Embed),
    /// Change the bot's presence; no message is sent.
    SetPresence(PresenceStatus),
}

/// Command dispatcher. Owns the preference store shared by all commands.
pub struct Dispatcher {
    store: Arc<PreferenceStore>,
    encoder: RenderRequestEncoder,
    links: BotLinks,
}

impl Dispatcher {
    pub fn new(store: Arc<PreferenceStore>) -> Self {
        Self {
            store,
            encoder: RenderRequestEncoder::new(),
            links: BotLinks::default(),
        }
    }

    pub fn with_links(mut self, links: BotLinks) -> Self {
        self.links = links;
        self
    }

    pub fn store(&self) -> &Arc<PreferenceStore> {
        &self.store
    }

    /// Card sent to a server's system channel when the bot joins it.
    pub fn greeting(&self) -> Reply {
        Reply::Embed(help_embed(&self.links))
    }

    /// Parses and runs one chat message from `user`.
    ///
    /// Returns `None` when the message is not a bot command.
    pub async fn handle_message(&self, user: &UserKey, message: &str) -> Option<Reply> {
        let span = tracing::info_span!("command", user = %user);
        async move {
            let reply = match Command::parse(message)? {
                Ok(command) => self.dispatch(user, command).await,
                Err(e) => {
                    tracing::debug!(error = %e, "rejected command arguments");
                    Reply::Text(e.user_message().to_string())
                }
            };
            Some(reply)
        }
        .instrument(span)
        .await
    }

    /// Runs a parsed command.
    pub async fn dispatch(&self, user: &UserKey, command: Command) -> Reply {
        match command {
            Command::Help => Reply::Embed(help_embed(&self.links)),
            Command::Invite => Reply::Embed(invite_embed(&self.links)),
            Command::Support => Reply::Embed(support_embed(&self.links)),
            Command::Render { source } => {
                let theme = self.store.get(user).await;
                match self.encoder.build(&source, theme.as_deref()) {
                    Ok(url) => Reply::Text(url),
                    Err(e) => {
                        tracing::error!(error = %e, "building render url failed");
                        Reply::Text(RENDER_FAILED.to_string())
                    }
                }
            }
            Command::SetTheme { theme } => {
                self.store.set_theme(user, &theme).await;
                tracing::info!(theme = %theme, "theme set");
                Reply::Text(format!("Theme successfully set to {}", theme))
            }
            Command::GetTheme => Reply::Text(self.store.get_theme(user).await),
            Command::SetStatus { status } => {
                tracing::info!(status = %status, "presence change requested");
                Reply::SetPresence(status)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::EMBED_COLOR;
    use crate::render::{DARK_THEME_SUFFIX, MERMAID_INK_BASE};

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(Arc::new(PreferenceStore::in_memory()))
    }

    fn alice() -> UserKey {
        UserKey::from_mention("<@1>", 1)
    }

    fn text(reply: Option<Reply>) -> String {
        match reply {
            Some(Reply::Text(t)) => t,
            other => panic!("expected text reply, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn non_commands_get_no_reply() {
        assert_eq!(dispatcher().handle_message(&alice(), "hi all").await, None);
    }

    #[tokio::test]
    async fn get_theme_defaults_then_follows_set() {
        let d = dispatcher();
        assert_eq!(text(d.handle_message(&alice(), "!mermaid-getTheme").await), "default");
        assert_eq!(
            text(d.handle_message(&alice(), "!mermaid-setTheme forest").await),
            "Theme successfully set to forest"
        );
        assert_eq!(text(d.handle_message(&alice(), "!mermaid-getTheme").await), "forest");
    }

    #[tokio::test]
    async fn themes_are_per_user() {
        let d = dispatcher();
        let bob = UserKey::from_mention("<@2>", 2);
        d.handle_message(&alice(), "!mermaid-setTheme dark").await;
        assert_eq!(text(d.handle_message(&bob, "!mermaid-getTheme").await), "default");
    }

    #[tokio::test]
    async fn render_uses_stored_theme() {
        let d = dispatcher();
        let plain = text(d.handle_message(&alice(), "!mermaid-r graph TD; A-->B").await);
        assert_eq!(plain, format!("{}Z3JhcGggVEQ7IEEtLT5C", MERMAID_INK_BASE));

        d.handle_message(&alice(), "!mermaid-setTheme dark").await;
        let dark = text(d.handle_message(&alice(), "!mermaid-render graph TD; A-->B").await);
        assert!(dark.starts_with(MERMAID_INK_BASE));
        assert!(dark.ends_with(DARK_THEME_SUFFIX));
    }

    #[tokio::test]
    async fn argument_errors_become_user_messages() {
        let d = dispatcher();
        assert_eq!(
            text(d.handle_message(&alice(), "!mermaid-setTheme").await),
            "A theme must be specified for this command to work"
        );
        assert_eq!(
            text(d.handle_message(&alice(), "!mermaid-setStatus away").await),
            "There was an error parsing the status"
        );
    }

    #[tokio::test]
    async fn set_status_yields_presence() {
        let reply = dispatcher()
            .handle_message(&alice(), "!mermaid-setStatus idle")
            .await;
        assert_eq!(reply, Some(Reply::SetPresence(PresenceStatus::Idle)));
    }

    #[tokio::test]
    async fn cards_use_bot_color() {
        let d = dispatcher();
        for msg in ["!mermaid-help", "!mermaid-invite", "!mermaid-support"] {
            match d.handle_message(&alice(), msg).await {
                Some(Reply::Embed(e)) => assert_eq!(e.color, EMBED_COLOR),
                other => panic!("{}: expected embed, got {:?}", msg, other),
            }
        }
        assert!(matches!(d.greeting(), Reply::Embed(_)));
    }

    #[test]
    fn reply_serializes_tagged() {
        let json = serde_json::to_value(Reply::SetPresence(PresenceStatus::DoNotDisturb)).unwrap();
        assert_eq!(json, serde_json::json!({"type": "set_presence", "value": "do_not_disturb"}));
    }
}
