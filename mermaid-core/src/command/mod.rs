//! Chat commands: parsing `!mermaid-<name> [args]` messages and dispatching them.
//!
//! [`Command::parse`] turns a message into a [`Command`]; [`Dispatcher`] runs it against
//! the [`PreferenceStore`](crate::PreferenceStore) and
//! [`RenderRequestEncoder`](crate::RenderRequestEncoder) and returns a transport-neutral
//! [`Reply`].

mod dispatch;
mod embed;
mod status;

pub use dispatch::{Dispatcher, Reply};
pub use embed::{BotLinks, Embed, EmbedField, EMBED_COLOR};
pub use status::PresenceStatus;

use thiserror::Error;

/// Every command message starts with this.
pub const COMMAND_PREFIX: &str = "!mermaid-";

/// Errors parsing a recognized command's arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("setTheme requires a theme")]
    MissingTheme,
    #[error("render requires diagram source")]
    MissingDiagram,
    #[error("invalid status: {0:?}")]
    InvalidStatus(String),
}

impl CommandError {
    /// Reply text shown to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            CommandError::MissingTheme => "A theme must be specified for this command to work",
            CommandError::MissingDiagram => {
                "A diagram must be specified for this command to work"
            }
            CommandError::InvalidStatus(_) => "There was an error parsing the status",
        }
    }
}

/// A recognized bot command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    /// `render` / `r`: the rest of the message is the diagram source.
    Render { source: String },
    Invite,
    Support,
    /// `setTheme <theme>`: first word only.
    SetTheme { theme: String },
    GetTheme,
    /// `setStatus [status]`: defaults to online.
    SetStatus { status: PresenceStatus },
}

impl Command {
    /// Parses a chat message.
    ///
    /// Returns `None` for messages without the prefix or with an unknown command name;
    /// `Some(Err(_))` when a known command has bad or missing arguments.
    pub fn parse(message: &str) -> Option<Result<Command, CommandError>> {
        let body = message.trim_start().strip_prefix(COMMAND_PREFIX)?;
        let (name, rest) = match body.find(char::is_whitespace) {
            Some(i) => (&body[..i], body[i..].trim()),
            None => (body, ""),
        };
        let first_word = rest.split_whitespace().next();

        let command = match name {
            "help" => Ok(Command::Help),
            "render" | "r" => {
                if rest.is_empty() {
                    Err(CommandError::MissingDiagram)
                } else {
                    Ok(Command::Render {
                        source: rest.to_string(),
                    })
                }
            }
            "invite" => Ok(Command::Invite),
            "support" => Ok(Command::Support),
            "setTheme" => first_word
                .map(|theme| Command::SetTheme {
                    theme: theme.to_string(),
                })
                .ok_or(CommandError::MissingTheme),
            "getTheme" => Ok(Command::GetTheme),
            "setStatus" => first_word
                .unwrap_or(PresenceStatus::Online.as_str())
                .parse()
                .map(|status| Command::SetStatus { status }),
            _ => return None,
        };
        Some(command)
    }
}
