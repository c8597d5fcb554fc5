//! Chat command parsing
//!
//! A command is a message starting with the configured prefix. Its first
//! whitespace-delimited token (minus the prefix) names the command; during a
//! round that token is the guess itself.

use crate::error::{GameError, PARAM_USAGE, START_USAGE};
use crate::host::ChannelId;

pub const START_COMMAND: &str = "chaordle";
pub const SHOW_PARAMS_COMMAND: &str = "params";
pub const SET_PARAM_COMMAND: &str = "param";

/// A prefixed message split into its command token and the rest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// First token without the prefix
    pub token: String,
    /// Text after the first token, trimmed
    pub rest: String,
}

impl CommandLine {
    /// Split a message into a command line
    ///
    /// Returns `None` if the message does not start with `prefix` or has no
    /// command token.
    ///
    /// # Examples
    /// ```
    /// use chaordle::commands::CommandLine;
    ///
    /// let line = CommandLine::parse("!param win_message well done", "!").unwrap();
    /// assert_eq!(line.token, "param");
    /// assert_eq!(line.rest, "win_message well done");
    /// assert!(CommandLine::parse("hello", "!").is_none());
    /// ```
    #[must_use]
    pub fn parse(content: &str, prefix: &str) -> Option<Self> {
        let body = content.strip_prefix(prefix)?;
        let body = body.trim_start();
        let (token, rest) = body
            .split_once(char::is_whitespace)
            .unwrap_or((body, ""));

        if token.is_empty() {
            return None;
        }

        Some(Self {
            token: token.to_string(),
            rest: rest.trim().to_string(),
        })
    }

    /// The command token as a guess
    #[must_use]
    pub fn guess(&self) -> String {
        self.token.to_lowercase()
    }
}

/// Commands accepted while no round is running
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdleCommand {
    Start(ChannelId),
    ShowParams,
    SetParam { name: String, value: String },
}

impl IdleCommand {
    /// Interpret a command line outside a round
    ///
    /// # Errors
    ///
    /// Returns `GameError::InputSyntax` for malformed arguments and
    /// `GameError::UnknownCommand` for any other token.
    pub fn from_line(line: &CommandLine) -> Result<Self, GameError> {
        match line.token.as_str() {
            START_COMMAND => {
                let argument = line.rest.split_whitespace().next().unwrap_or_default();
                parse_channel(argument)
                    .map(Self::Start)
                    .ok_or(GameError::InputSyntax { usage: START_USAGE })
            }
            SHOW_PARAMS_COMMAND => Ok(Self::ShowParams),
            SET_PARAM_COMMAND => {
                let (name, value) = line
                    .rest
                    .split_once(char::is_whitespace)
                    .ok_or(GameError::InputSyntax { usage: PARAM_USAGE })?;
                Ok(Self::SetParam {
                    name: name.to_string(),
                    value: value.trim().to_string(),
                })
            }
            other => Err(GameError::UnknownCommand(other.to_string())),
        }
    }
}

/// Parse a channel id, bare (`123`) or as a mention (`<#123>`)
#[must_use]
pub fn parse_channel(argument: &str) -> Option<ChannelId> {
    let digits = argument
        .strip_prefix("<#")
        .and_then(|s| s.strip_suffix('>'))
        .unwrap_or(argument);
    digits.parse().ok().map(ChannelId)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(content: &str) -> CommandLine {
        CommandLine::parse(content, "!").unwrap()
    }

    #[test]
    fn parse_requires_prefix_and_token() {
        assert!(CommandLine::parse("chaordle 1", "!").is_none());
        assert!(CommandLine::parse("!", "!").is_none());
        assert!(CommandLine::parse("!   ", "!").is_none());
        assert_eq!(line("!Apple").token, "Apple");
        assert_eq!(line("!Apple").guess(), "apple");
    }

    #[test]
    fn parse_custom_prefix() {
        let parsed = CommandLine::parse("??params", "??").unwrap();
        assert_eq!(parsed.token, "params");
        assert_eq!(parsed.rest, "");
    }

    #[test]
    fn guess_is_first_token_only() {
        assert_eq!(line("!zeppelin and more words").guess(), "zeppelin");
    }

    #[test]
    fn start_command() {
        assert_eq!(
            IdleCommand::from_line(&line("!chaordle 1234")),
            Ok(IdleCommand::Start(ChannelId(1234)))
        );
        assert_eq!(
            IdleCommand::from_line(&line("!chaordle <#55> extra")),
            Ok(IdleCommand::Start(ChannelId(55)))
        );
    }

    #[test]
    fn start_command_bad_argument() {
        let syntax = Err(GameError::InputSyntax { usage: START_USAGE });
        assert_eq!(IdleCommand::from_line(&line("!chaordle")), syntax);
        assert_eq!(IdleCommand::from_line(&line("!chaordle general")), syntax);
        assert_eq!(IdleCommand::from_line(&line("!chaordle -4")), syntax);
    }

    #[test]
    fn param_commands() {
        assert_eq!(
            IdleCommand::from_line(&line("!params")),
            Ok(IdleCommand::ShowParams)
        );
        assert_eq!(
            IdleCommand::from_line(&line("!param win_message Well played all")),
            Ok(IdleCommand::SetParam {
                name: "win_message".to_string(),
                value: "Well played all".to_string(),
            })
        );
        assert_eq!(
            IdleCommand::from_line(&line("!param guess_count")),
            Err(GameError::InputSyntax { usage: PARAM_USAGE })
        );
    }

    #[test]
    fn unknown_command() {
        assert_eq!(
            IdleCommand::from_line(&line("!zeppelin")),
            Err(GameError::UnknownCommand("zeppelin".to_string()))
        );
    }
}
