//! Rich reply cards (help, invite, support) in a transport-neutral shape.

use serde::Serialize;

/// Accent color of every card the bot sends.
pub const EMBED_COLOR: u32 = 4372867;

pub const DEFAULT_INVITE_URL: &str = "https://discord.com/api/oauth2/authorize?client_id=935684419837132910&permissions=274877910016&scope=bot";
pub const DEFAULT_SUPPORT_URL: &str = "https://github.com/Yash-Singh1/mermaidjs-discord/issues";
const PROJECT_URL: &str = "https://github.com/Yash-Singh1/mermaidjs-discord";
const MERMAID_DOCS_URL: &str = "https://mermaid-js.github.io/";
const EXAMPLE_IMAGE_URL: &str = "https://mermaid.ink/img/pako:eNpVkMtqw0AMRX9FaNVA_ANeFBI7zSbQQrLzeCE8SmZI54E8JgTb_95x00KileCcexEasQuascSLUDRwqpWHPJumMmL75KhvoSjepz0ncMHzfYLt2z5Ab0KM1l9WD3-7SFCNh0VjSMb66_xA1W_-0_MEdXOgmEJsn8npFibYNfbL5PpXYoRz6qM5U3mmoiOBiqTFNToWR1bns8cloDAZdqywzKsmuSpUfs7eEDUl3mmbgmDu-O55jTSkcLz7DsskA_9LtaX8AvdnzT9s-1qQ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// A card with description, color and optional author, fields and image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Embed {
    pub description: String,
    pub color: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Embed {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            color: EMBED_COLOR,
            author: None,
            fields: Vec::new(),
            image: None,
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_field(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        inline: bool,
    ) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }
}

/// Links shown by the invite and support commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotLinks {
    pub invite_url: String,
    pub support_url: String,
}

impl Default for BotLinks {
    fn default() -> Self {
        Self {
            invite_url: DEFAULT_INVITE_URL.to_string(),
            support_url: DEFAULT_SUPPORT_URL.to_string(),
        }
    }
}

pub(crate) fn help_embed(links: &BotLinks) -> Embed {
    let commands = "\
__!mermaid-help__: Displays the current message.
__!mermaid-r__ or __!mermaid-render__: Renders the diagram with the code following the command. Allows Mermaid.js diagram syntax.
__!mermaid-invite__: Gets the invite link of the bot.
__!mermaid-support__: Gets a link to a support issue tracker for the bot.
__!mermaid-setTheme__: Sets the theme to use for the diagrams rendered for the user.
__!mermaid-getTheme__: Gets the currently set theme for the user.
__!mermaid-setStatus__: Sets the current status of the bot. One of `dnd` or `do_not_disturb`, `online`, `idle`, `offline`, or `invisible`.";
    let example = "
```markdown
!mermaid-render
graph TD
  A[Christmas] -->|Get money| B(Go shopping)
  B --> C{Let me think}
  C -->|One| D[Laptop]
  C -->|Two| E[iPhone]
  C -->|Three| F[fa:fa-car Car]
```
";
    Embed::new("Help on using the Mermaid.js Discord Bot.")
        .with_author("Help")
        .with_field(
            "Helpful Links",
            format!(
                "[GitHub]({}) | [Issue Tracker]({}) | [Mermaid.js Documentation]({})",
                PROJECT_URL, links.support_url, MERMAID_DOCS_URL
            ),
            false,
        )
        .with_field("Commands", commands, false)
        .with_field("Example Diagram", example, true)
        .with_image(EXAMPLE_IMAGE_URL)
}

pub(crate) fn invite_embed(links: &BotLinks) -> Embed {
    Embed::new(format!("The invite link is {}", links.invite_url))
}

pub(crate) fn support_embed(links: &BotLinks) -> Embed {
    Embed::new(format!(
        "The link to the issue tracker is {}",
        links.support_url
    ))
}
