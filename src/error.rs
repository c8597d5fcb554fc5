//! Errors surfaced to players
//!
//! None of these are fatal: the session reports them back to the channel the
//! command came from and carries on.

use crate::game::ParamError;
use crate::host::{ChannelId, HostError};
use crate::output::OversizedLine;
use std::time::Duration;
use thiserror::Error;

pub const START_USAGE: &str = "!chaordle [channel_id]";
pub const PARAM_USAGE: &str = "!param [param_name] [param_value]";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Invalid syntax : command must be of form ```{usage}```")]
    InputSyntax { usage: &'static str },

    #[error("Unknown command `{0}`.")]
    UnknownCommand(String),

    #[error(
        "Invalid channel id provided. Reminder : command must be of form ```{usage}```",
        usage = START_USAGE
    )]
    ChannelResolution { channel: ChannelId, source: HostError },

    #[error("No valid words found in the last {scanned} messages. The round was not started.")]
    SelectionExhausted { scanned: usize },

    #[error("Word search timed out after {0:?}. The round was not started.")]
    SelectionTimedOut(Duration),

    #[error(
        "Param assignment failed ({0}). Reminder : command must be of form ```{usage}```",
        usage = PARAM_USAGE
    )]
    ParameterAssignment(#[from] ParamError),

    #[error("Reply too long to send : {0}. The command was not applied.")]
    ReplyTooLong(#[from] OversizedLine),

    #[error("Chat service error: {0}")]
    Host(#[from] HostError),
}
