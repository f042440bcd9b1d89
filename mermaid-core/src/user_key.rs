//! Stable per-user key for the preference store.

use std::fmt;

/// Identifies one platform user in the preference store.
///
/// Built from the platform mention text and the numeric user id joined by `#`,
/// e.g. `"<@42>#42"`. The key is opaque to the store; only equality matters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserKey(String);

impl UserKey {
    /// Builds the key from mention text and numeric id.
    pub fn from_mention(mention: &str, id: u64) -> Self {
        Self(format!("{}#{}", mention, id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UserKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
