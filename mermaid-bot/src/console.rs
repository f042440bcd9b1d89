//! Console transport: reads chat messages from an async line source, dispatches them as
//! one user, and writes replies.
//!
//! A line ending in `\` continues on the next line, so multi-line diagrams can be typed:
//!
//! ```text
//! > !mermaid-render \
//! graph TD \
//!   A --> B
//! ```

use std::io::Write;

use mermaid_core::{Dispatcher, Embed, PresenceStatus, Reply, UserKey};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("console io: {0}")]
    Io(#[from] std::io::Error),
    #[error("encode reply: {0}")]
    Json(#[from] serde_json::Error),
}

/// How replies are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text.
    Text,
    /// One JSON object per reply (`{"type": ..., "value": ...}`).
    Json,
}

pub fn is_quit_command(s: &str) -> bool {
    let lower = s.trim().to_lowercase();
    matches!(lower.as_str(), "quit" | "exit" | "/quit")
}

fn format_embed(embed: &Embed) -> String {
    let mut out = String::new();
    if let Some(author) = &embed.author {
        out.push_str(&format!("== {} ==\n", author));
    }
    out.push_str(&embed.description);
    for field in &embed.fields {
        out.push_str(&format!("\n\n[{}]\n{}", field.name, field.value.trim()));
    }
    if let Some(image) = &embed.image {
        out.push_str(&format!("\n\n(image: {})", image));
    }
    out
}

/// Renders one reply for the console.
pub fn format_reply(reply: &Reply, format: OutputFormat) -> Result<String, ConsoleError> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string(reply)?,
        OutputFormat::Text => match reply {
            Reply::Text(text) => text.clone(),
            Reply::Embed(embed) => format_embed(embed),
            Reply::SetPresence(status) => format!("(status is now {})", status),
        },
    })
}

/// Reads the next message, joining `\`-continued lines with newlines. `None` at EOF.
async fn next_message<R>(lines: &mut tokio::io::Lines<R>) -> Result<Option<String>, ConsoleError>
where
    R: AsyncBufRead + Unpin,
{
    let mut message = String::new();
    while let Some(line) = lines.next_line().await? {
        match line.strip_suffix('\\') {
            Some(head) => {
                message.push_str(head.trim_end());
                message.push('\n');
            }
            None => {
                message.push_str(&line);
                return Ok(Some(message));
            }
        }
    }
    Ok((!message.is_empty()).then_some(message))
}

/// Runs the console loop until EOF or a quit command. Returns the last presence set.
pub async fn run_console<R, W>(
    dispatcher: &Dispatcher,
    user: &UserKey,
    input: R,
    output: &mut W,
    format: OutputFormat,
) -> Result<PresenceStatus, ConsoleError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut presence = PresenceStatus::default();
    let mut lines = input.lines();

    while let Some(message) = next_message(&mut lines).await? {
        if message.trim().is_empty() {
            continue;
        }
        if is_quit_command(&message) {
            break;
        }
        let Some(reply) = dispatcher.handle_message(user, &message).await else {
            tracing::debug!("not a bot command, ignored");
            continue;
        };
        if let Reply::SetPresence(status) = reply {
            presence = status;
        }
        writeln!(output, "{}", format_reply(&reply, format)?)?;
        output.flush()?;
    }
    Ok(presence)
}
