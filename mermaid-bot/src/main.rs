//! Mermaid bot binary: dispatch `!mermaid-` commands typed on stdin as one chat user.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use mermaid_bot::console::{format_reply, run_console, OutputFormat};
use mermaid_config::{BotSettings, StoreKind};
use mermaid_core::{Dispatcher, UserKey};
use tokio::io::BufReader;

#[derive(Parser, Debug)]
#[command(name = "mermaid-bot")]
#[command(about = "Render mermaid diagrams to mermaid.ink URLs with per-user themes")]
struct Args {
    /// Preference store backend: memory, sqlite or replit (default: MERMAID_BOT_STORE)
    #[arg(long, value_name = "KIND")]
    store: Option<StoreKind>,

    /// SQLite file for the sqlite store (default: MERMAID_BOT_SQLITE_PATH or mermaid-bot.db)
    #[arg(long, value_name = "PATH")]
    sqlite_path: Option<PathBuf>,

    /// Replit DB base URL (default: REPLIT_DB_URL)
    #[arg(long, value_name = "URL")]
    replit_db_url: Option<String>,

    /// Numeric platform id of the user sending the messages
    #[arg(long, value_name = "ID", default_value_t = 1)]
    user_id: u64,

    /// Send one message and exit instead of reading stdin
    #[arg(short, long, value_name = "TEXT")]
    message: Option<String>,

    /// Print the server-join greeting before reading messages
    #[arg(long)]
    greet: bool,

    /// Print replies as JSON, one object per line
    #[arg(long)]
    json: bool,
}

fn apply_overrides(mut settings: BotSettings, args: &Args) -> BotSettings {
    if let Some(url) = &args.replit_db_url {
        settings.replit_db_url = Some(url.clone());
        settings.store = StoreKind::Replit;
    }
    if let Some(path) = &args.sqlite_path {
        settings.sqlite_path = path.clone();
    }
    if let Some(store) = args.store {
        settings.store = store;
    }
    settings
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    mermaid_config::load_and_apply(mermaid_config::APP_NAME, None)?;
    let args = Args::parse();
    let settings = apply_overrides(BotSettings::from_env()?, &args);
    mermaid_config::logging::init(settings.log_file.as_deref())?;
    tracing::info!(store = %settings.store, "starting mermaid-bot");

    let store = Arc::new(mermaid_bot::connect_store(&settings).await);
    let dispatcher = Dispatcher::new(store);
    let user = UserKey::from_mention(&format!("<@{}>", args.user_id), args.user_id);
    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    if args.greet {
        println!("{}", format_reply(&dispatcher.greeting(), format)?);
    }

    match &args.message {
        Some(message) => match dispatcher.handle_message(&user, message).await {
            Some(reply) => println!("{}", format_reply(&reply, format)?),
            None => eprintln!(
                "mermaid-bot: not a command (messages start with {})",
                mermaid_core::COMMAND_PREFIX
            ),
        },
        None => {
            let mut stdout = std::io::stdout();
            let presence = run_console(
                &dispatcher,
                &user,
                BufReader::new(tokio::io::stdin()),
                &mut stdout,
                format,
            )
            .await?;
            tracing::info!(presence = %presence, "console closed");
        }
    }
    Ok(())
}
