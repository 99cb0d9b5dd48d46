use std::str::FromStr;

use crate::events::Language;

use strum::EnumString;

/// Commands that can be invoked by starting a message with a leading slash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum SlashCommand {
    /// Switch the display language (toggles when no argument is given)
    Lang,
    /// Open the support contact form
    Support,
    /// Show help
    Help,
    /// Exit the application
    Bye,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub command: SlashCommand,
    pub argument: Option<String>,
}

impl ParsedCommand {
    pub fn argument(&self) -> Option<&str> {
        self.argument.as_deref()
    }

    /// Explicit language requested by `/lang <code>`, if any.
    pub fn language_target(&self) -> Option<Language> {
        if self.command != SlashCommand::Lang {
            return None;
        }

        match self.argument()?.trim().to_lowercase().as_str() {
            "ru" => Some(Language::Ru),
            "en" => Some(Language::En),
            _ => None,
        }
    }
}

/// Parse a slash command from user input
pub fn parse_slash_command(input: &str) -> Option<ParsedCommand> {
    let rest = input.trim_start().strip_prefix('/')?;

    let mut parts = rest.split_whitespace();
    let head = parts.next()?;
    let rest: Vec<&str> = parts.collect();

    let command = SlashCommand::from_str(head).ok().or_else(|| match head.to_lowercase().as_str() {
        "q" | "quit" | "exit" => Some(SlashCommand::Bye),
        _ => None,
    })?;

    let argument = if rest.is_empty() {
        None
    } else {
        Some(rest.join(" "))
    };

    Some(ParsedCommand { command, argument })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_not_a_command() {
        assert_eq!(parse_slash_command("hello /lang"), None);
        assert_eq!(parse_slash_command("/"), None);
        assert_eq!(parse_slash_command("/unknown"), None);
    }

    #[test]
    fn parses_command_with_argument() {
        let parsed = parse_slash_command("/lang en").unwrap();
        assert_eq!(parsed.command, SlashCommand::Lang);
        assert_eq!(parsed.argument(), Some("en"));
        assert_eq!(parsed.language_target(), Some(Language::En));
    }

    #[test]
    fn lang_without_argument_has_no_target() {
        let parsed = parse_slash_command("/lang").unwrap();
        assert_eq!(parsed.language_target(), None);
        assert_eq!(parse_slash_command("/lang de").unwrap().language_target(), None);
    }

    #[test]
    fn aliases_resolve() {
        assert_eq!(parse_slash_command("/q").unwrap().command, SlashCommand::Bye);
        assert_eq!(parse_slash_command("  /exit").unwrap().command, SlashCommand::Bye);
        assert_eq!(parse_slash_command("/QUIT").unwrap().command, SlashCommand::Bye);
    }

    #[test]
    fn short_slash_messages_are_sent_as_text() {
        assert_eq!(parse_slash_command("/s is my favourite letter"), None);
        assert_eq!(parse_slash_command("/h"), None);
        assert_eq!(parse_slash_command("/?"), None);
        assert_eq!(parse_slash_command("/language en"), None);
        assert_eq!(parse_slash_command("/lang russian").unwrap().language_target(), None);
    }
}
