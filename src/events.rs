use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};
use uuid::Uuid;

use crate::reply::ReplyError;

/// Internal application events for coordinating between components
#[derive(Debug)]
pub enum AppEvent {
    /// A reply request finished, successfully or not
    ReplySettled {
        ticket: Uuid,
        outcome: Result<Option<String>, ReplyError>,
    },

    /// Animation tick for the typing indicator and notice expiry
    Tick,
}

/// TUI-specific events (keyboard, paste, resize)
#[derive(Debug, Clone)]
pub enum TuiEvent {
    /// Key press event
    Key(crossterm::event::KeyEvent),

    /// Paste event
    Paste(String),

    /// Terminal resize
    Resize(u16, u16),
}

/// Display languages
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Language {
    /// Russian, the default locale
    #[default]
    Ru,
    /// English
    En,
}

impl Language {
    /// Wire code sent to the reply service (`ru` / `en`).
    pub fn code(self) -> &'static str {
        self.into()
    }

    /// Short label shown on the language toggle.
    pub fn badge(self) -> &'static str {
        match self {
            Language::Ru => "RU",
            Language::En => "EN",
        }
    }

    pub fn toggled(self) -> Language {
        match self {
            Language::Ru => Language::En,
            Language::En => Language::Ru,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Role in conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationRole {
    User,
    Assistant,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn language_codes_match_wire_format() {
        assert_eq!(Language::Ru.code(), "ru");
        assert_eq!(Language::En.code(), "en");
        assert_eq!(serde_json::to_string(&Language::En).unwrap(), "\"en\"");
        assert_eq!(serde_json::from_str::<Language>("\"ru\"").unwrap(), Language::Ru);
    }

    #[test]
    fn language_parses_case_insensitively() {
        assert_eq!(Language::from_str("EN").unwrap(), Language::En);
        assert_eq!(Language::from_str("ru").unwrap(), Language::Ru);
        assert!(Language::from_str("de").is_err());
    }

    #[test]
    fn toggling_twice_returns_to_start() {
        assert_eq!(Language::Ru.toggled(), Language::En);
        assert_eq!(Language::Ru.toggled().toggled(), Language::Ru);
        assert_eq!(Language::default(), Language::Ru);
    }
}
