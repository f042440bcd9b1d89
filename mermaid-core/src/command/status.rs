//! Bot presence status: closed set with a total token mapping.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::CommandError;

/// Presence the bot can show on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PresenceStatus {
    #[default]
    Online,
    Offline,
    Idle,
    DoNotDisturb,
    Invisible,
}

impl PresenceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresenceStatus::Online => "online",
            PresenceStatus::Offline => "offline",
            PresenceStatus::Idle => "idle",
            PresenceStatus::DoNotDisturb => "dnd",
            PresenceStatus::Invisible => "invisible",
        }
    }
}

impl fmt::Display for PresenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts `online`, `offline`, `idle`, `dnd` / `do_not_disturb`, `invisible`
/// (ASCII case-insensitive). Anything else is [`CommandError::InvalidStatus`].
impl FromStr for PresenceStatus {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "online" => Ok(PresenceStatus::Online),
            "offline" => Ok(PresenceStatus::Offline),
            "idle" => Ok(PresenceStatus::Idle),
            "dnd" | "do_not_disturb" => Ok(PresenceStatus::DoNotDisturb),
            "invisible" => Ok(PresenceStatus::Invisible),
            _ => Err(CommandError::InvalidStatus(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_token() {
        let cases = [
            ("online", PresenceStatus::Online),
            ("Online", PresenceStatus::Online),
            ("offline", PresenceStatus::Offline),
            ("idle", PresenceStatus::Idle),
            ("dnd", PresenceStatus::DoNotDisturb),
            ("do_not_disturb", PresenceStatus::DoNotDisturb),
            ("INVISIBLE", PresenceStatus::Invisible),
        ];
        for (token, expected) in cases {
            assert_eq!(token.parse::<PresenceStatus>().unwrap(), expected, "{}", token);
        }
    }

    #[test]
    fn unknown_token_is_invalid_status() {
        let err = "away".parse::<PresenceStatus>().unwrap_err();
        assert!(matches!(err, CommandError::InvalidStatus(ref s) if s == "away"));
        assert!("".parse::<PresenceStatus>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        let status = PresenceStatus::DoNotDisturb;
        assert_eq!(status.to_string().parse::<PresenceStatus>().unwrap(), status);
    }
}
