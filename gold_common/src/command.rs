//! Inbound chat command parsing.
//!
//! A message is a command when its first whitespace-separated token starts
//! with `/`. Names match case-insensitively. Group chats address commands as
//! `/price@my_bot`; a command addressed to another bot is not ours to answer.

use std::str::FromStr;

use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

/// Names of the supported commands, as typed after the `/`.
#[derive(Debug, Clone, Copy, Display, EnumString, EnumIter, Eq, PartialEq)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CommandKind {
    /// `/start`
    Start,
    /// `/price`
    Price,
    /// `/subscribe`
    Subscribe,
    /// `/unsubscribe`
    Unsubscribe,
    /// `/setdollar <value>`
    SetDollar,
}

impl CommandKind {
    /// Menu description shown by the chat client.
    pub fn description(self) -> &'static str {
        match self {
            CommandKind::Start => "دەستپێکردن و لیستی فەرمانەکان",
            CommandKind::Price => "نرخی ئێستای زێر",
            CommandKind::Subscribe => "بەشداریکردن",
            CommandKind::Unsubscribe => "کۆتایی بە بەشداری",
            CommandKind::SetDollar => "گۆڕینی نرخی دۆلار",
        }
    }
}

/// A parsed command with its argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Greeting and command list.
    Start,
    /// Current gold price report.
    Price,
    /// Add the caller to the subscribers.
    Subscribe,
    /// Remove the caller from the subscribers.
    Unsubscribe,
    /// Replace the exchange rate; carries the raw first argument, if any.
    SetDollar(Option<String>),
}

impl Command {
    /// Which command this is, without its argument.
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Start => CommandKind::Start,
            Command::Price => CommandKind::Price,
            Command::Subscribe => CommandKind::Subscribe,
            Command::Unsubscribe => CommandKind::Unsubscribe,
            Command::SetDollar(_) => CommandKind::SetDollar,
        }
    }
}

/// Why a message did not parse into a [`Command`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    /// The message is free text.
    #[error("message is not a command")]
    NotACommand,
    /// The message starts with `/` but names no supported command.
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    /// The command mentions a bot other than this one.
    #[error("command addressed to `{0}`")]
    AddressedElsewhere(String),
}

/// Parse a chat message into a [`Command`], accepting any `@mention`.
pub fn parse_command(text: &str) -> Result<Command, CommandParseError> {
    parse_command_for(text, None)
}

/// Parse a chat message into a [`Command`] for the bot named `bot_name`.
///
/// A `/name@mention` whose mention is not `bot_name` (compared
/// case-insensitively) is rejected. Without a `bot_name` every mention is
/// accepted.
pub fn parse_command_for(text: &str, bot_name: Option<&str>) -> Result<Command, CommandParseError> {
    let mut parts = text.split_whitespace();
    let Some(raw_command) = parts.next() else {
        return Err(CommandParseError::NotACommand);
    };
    let Some(name) = raw_command.strip_prefix('/') else {
        return Err(CommandParseError::NotACommand);
    };
    let name = match (name.split_once('@'), bot_name) {
        (Some((_, mention)), Some(bot_name)) if !mention.eq_ignore_ascii_case(bot_name) => {
            return Err(CommandParseError::AddressedElsewhere(mention.to_string()));
        }
        (Some((head, _)), _) => head,
        (None, _) => name,
    };

    let kind = CommandKind::from_str(name)
        .map_err(|_| CommandParseError::UnknownCommand(raw_command.to_string()))?;

    Ok(match kind {
        CommandKind::Start => Command::Start,
        CommandKind::Price => Command::Price,
        CommandKind::Subscribe => Command::Subscribe,
        CommandKind::Unsubscribe => Command::Unsubscribe,
        CommandKind::SetDollar => Command::SetDollar(parts.next().map(str::to_string)),
    })
}

/// `(name, description)` pairs for registering the command menu.
pub fn bot_commands() -> Vec<(String, &'static str)> {
    CommandKind::iter()
        .map(|kind| (kind.to_string(), kind.description()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_all_commands() {
        assert_eq!(parse_command("/start").unwrap(), Command::Start);
        assert_eq!(parse_command("/price").unwrap(), Command::Price);
        assert_eq!(parse_command("/subscribe").unwrap(), Command::Subscribe);
        assert_eq!(parse_command("/unsubscribe").unwrap(), Command::Unsubscribe);
        assert_eq!(parse_command("/setdollar").unwrap(), Command::SetDollar(None));
    }

    #[test]
    fn setdollar_takes_first_argument() {
        assert_eq!(
            parse_command("/setdollar 1450 extra").unwrap(),
            Command::SetDollar(Some("1450".to_string()))
        );
        assert_eq!(
            parse_command("  /setdollar   abc ").unwrap(),
            Command::SetDollar(Some("abc".to_string()))
        );
    }

    #[test]
    fn bot_mention_is_stripped() {
        assert_eq!(parse_command("/price@gold_bot").unwrap(), Command::Price);
        assert_eq!(
            parse_command("/setdollar@gold_bot 1500").unwrap(),
            Command::SetDollar(Some("1500".to_string()))
        );
    }

    #[test]
    fn free_text_is_not_a_command() {
        assert_eq!(parse_command("gold price"), Err(CommandParseError::NotACommand));
        assert_eq!(parse_command(""), Err(CommandParseError::NotACommand));
        assert_eq!(parse_command("   "), Err(CommandParseError::NotACommand));
    }

    #[test]
    fn unknown_command_is_reported() {
        assert_eq!(
            parse_command("/help"),
            Err(CommandParseError::UnknownCommand("/help".to_string()))
        );
        assert!(matches!(
            parse_command("/"),
            Err(CommandParseError::UnknownCommand(_))
        ));
    }

    #[test]
    fn commands_ignore_case() {
        assert_eq!(parse_command("/PRICE").unwrap(), Command::Price);
        assert_eq!(parse_command("/Subscribe").unwrap(), Command::Subscribe);
        assert_eq!(
            parse_command("/SetDollar 1500").unwrap(),
            Command::SetDollar(Some("1500".to_string()))
        );
    }

    #[test]
    fn mention_of_another_bot_is_rejected() {
        assert_eq!(
            parse_command_for("/price@other_bot", Some("gold_bot")),
            Err(CommandParseError::AddressedElsewhere("other_bot".to_string()))
        );
        assert_eq!(
            parse_command_for("/price@Gold_Bot", Some("gold_bot")).unwrap(),
            Command::Price
        );
        assert_eq!(parse_command_for("/price", Some("gold_bot")).unwrap(), Command::Price);
        assert_eq!(parse_command_for("/price@other_bot", None).unwrap(), Command::Price);
    }

    #[test]
    fn menu_covers_every_command() {
        let names: Vec<String> = bot_commands().into_iter().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            vec!["start", "price", "subscribe", "unsubscribe", "setdollar"]
        );
    }

    #[test]
    fn kind_matches_parsed_command() {
        for (name, _) in bot_commands() {
            let command = parse_command(&format!("/{name}")).unwrap();
            assert_eq!(command.kind().to_string(), name);
        }
    }
}
