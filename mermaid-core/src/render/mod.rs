//! Render URL building for the mermaid.ink image service.
//!
//! The payload segment is standard padded base64 of either the raw diagram source (no
//! theme) or the compact JSON `{"mermaid":{"theme":T},"code":S}` (theme set). Theme
//! `dark` additionally gets `?bgColor=333`.

mod error;

pub use error::RenderError;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;

/// Base path of the external rendering service.
pub const MERMAID_INK_BASE: &str = "https://mermaid.ink/img/";

/// Query suffix appended for the `dark` theme.
pub const DARK_THEME_SUFFIX: &str = "?bgColor=333";

const DARK_THEME: &str = "dark";

/// Themed payload. Field order is the serialized order: `mermaid`, then `code`.
#[derive(Debug, Serialize)]
struct ThemedPayload<'a> {
    mermaid: MermaidOptions<'a>,
    code: &'a str,
}

#[derive(Debug, Serialize)]
struct MermaidOptions<'a> {
    theme: &'a str,
}

/// Builds render URLs. Does not validate diagram syntax; the service does.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderRequestEncoder;

impl RenderRequestEncoder {
    pub fn new() -> Self {
        Self
    }

    /// URL for `source` rendered with `theme`. An empty theme counts as no theme.
    pub fn build(&self, source: &str, theme: Option<&str>) -> Result<String, RenderError> {
        let theme = theme.filter(|t| !t.is_empty());
        let payload = match theme {
            None => STANDARD.encode(source.as_bytes()),
            Some(theme) => {
                let json = serde_json::to_vec(&ThemedPayload {
                    mermaid: MermaidOptions { theme },
                    code: source,
                })?;
                STANDARD.encode(json)
            }
        };
        let suffix = if theme == Some(DARK_THEME) {
            DARK_THEME_SUFFIX
        } else {
            ""
        };
        Ok(format!("{}{}{}", MERMAID_INK_BASE, payload, suffix))
    }
}
