//! Per-community round state machine
//!
//! `Session` is synchronous and never touches the chat host. Each handler
//! mutates the session and returns the replies to send; the caller decides
//! whether the new state is kept (see [`crate::game::actor`]).
//!
//! ```text
//! Idle --start--> Searching --word found--> Active --win/loss--> Idle
//!                     \--no word-----------------------------> Idle
//! ```

use crate::commands::{CommandLine, IdleCommand};
use crate::error::GameError;
use crate::game::{Candidate, Parameters};
use crate::host::{ChannelId, CommunityId};
use crate::output::{render_board, render_provenance, render_reveal};
use std::fmt;
use tracing::{info, warn};

/// State tag without round data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Searching,
    Active,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Searching => "searching",
            Self::Active => "active",
        })
    }
}

/// A round being played
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveRound {
    puzzle_channel: ChannelId,
    secret: String,
    provenance: String,
    guesses: Vec<String>,
}

impl ActiveRound {
    #[must_use]
    pub fn puzzle_channel(&self) -> ChannelId {
        self.puzzle_channel
    }

    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }

    #[must_use]
    pub fn provenance(&self) -> &str {
        &self.provenance
    }

    /// Guesses so far, in submission order
    #[must_use]
    pub fn guesses(&self) -> &[String] {
        &self.guesses
    }
}

/// Round state; round data only exists while a round is under way
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Round {
    Idle,
    Searching {
        puzzle_channel: ChannelId,
        /// Where the start command came from
        reply_channel: ChannelId,
    },
    Active(ActiveRound),
}

/// Text to send to a channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub channel: ChannelId,
    pub text: String,
}

impl Reply {
    #[must_use]
    pub fn new(channel: ChannelId, text: impl Into<String>) -> Self {
        Self {
            channel,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn error(channel: ChannelId, error: &GameError) -> Self {
        Self::new(channel, error.to_string())
    }
}

/// What the caller must do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Send these replies
    Reply(Vec<Reply>),
    /// Resolve the channel, then call [`Session::begin_search`]
    StartRound {
        requested: ChannelId,
        reply_channel: ChannelId,
    },
    /// Nothing to do
    Ignore,
}

/// One community's game state
#[derive(Debug, Clone)]
pub struct Session {
    community: CommunityId,
    params: Parameters,
    round: Round,
}

impl Session {
    /// New idle session owning its own copy of `template`
    #[must_use]
    pub fn new(community: CommunityId, template: &Parameters) -> Self {
        Self {
            community,
            params: template.clone(),
            round: Round::Idle,
        }
    }

    #[must_use]
    pub fn community(&self) -> CommunityId {
        self.community
    }

    #[must_use]
    pub fn params(&self) -> &Parameters {
        &self.params
    }

    #[must_use]
    pub fn round(&self) -> &Round {
        &self.round
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        match self.round {
            Round::Idle => Phase::Idle,
            Round::Searching { .. } => Phase::Searching,
            Round::Active(_) => Phase::Active,
        }
    }

    /// Interpret a command that arrived in `channel`
    pub fn handle(&mut self, line: &CommandLine, channel: ChannelId) -> Action {
        match self.round {
            Round::Idle => match IdleCommand::from_line(line) {
                Ok(IdleCommand::Start(requested)) => Action::StartRound {
                    requested,
                    reply_channel: channel,
                },
                Ok(IdleCommand::ShowParams) => {
                    Action::Reply(vec![Reply::new(channel, self.params.list())])
                }
                Ok(IdleCommand::SetParam { name, value }) => {
                    Action::Reply(vec![self.set_param(channel, &name, &value)])
                }
                Err(err) => Action::Reply(vec![Reply::error(channel, &err)]),
            },
            Round::Searching { .. } => Action::Ignore,
            Round::Active(_) => Action::Reply(self.guess(channel, line.guess())),
        }
    }

    /// Assign a parameter; only meaningful while idle
    pub fn set_param(&mut self, channel: ChannelId, name: &str, value: &str) -> Reply {
        match self.params.set(name, value) {
            Ok(value) => {
                info!(community = %self.community, name, %value, "parameter updated");
                Reply::new(channel, "Param assignment succeeded.")
            }
            Err(err) => Reply::error(channel, &GameError::from(err)),
        }
    }

    /// Idle -> Searching
    ///
    /// Returns `false` (and changes nothing) unless the session is idle.
    pub fn begin_search(&mut self, puzzle_channel: ChannelId, reply_channel: ChannelId) -> bool {
        if self.round != Round::Idle {
            return false;
        }
        self.round = Round::Searching {
            puzzle_channel,
            reply_channel,
        };
        info!(community = %self.community, %puzzle_channel, "searching for a secret word");
        true
    }

    /// Searching -> Active, or back to Idle if no word was found
    ///
    /// Returns the replies to send. Outside `Searching` this does nothing.
    pub fn finish_search(&mut self, result: Result<Candidate, GameError>) -> Vec<Reply> {
        let Round::Searching {
            puzzle_channel,
            reply_channel,
        } = self.round
        else {
            return Vec::new();
        };

        match result {
            Ok(candidate) => {
                let round = ActiveRound {
                    puzzle_channel,
                    secret: candidate.word,
                    provenance: candidate.provenance,
                    guesses: Vec::new(),
                };
                let board = render_board(&round.secret, &round.guesses, self.params.guess_count);
                info!(community = %self.community, letters = round.secret.chars().count(), "round started");
                self.round = Round::Active(round);
                vec![Reply::new(reply_channel, board)]
            }
            Err(err) => {
                warn!(community = %self.community, error = %err, "round could not start");
                self.round = Round::Idle;
                vec![Reply::error(reply_channel, &err)]
            }
        }
    }

    /// Record a guess during a round
    ///
    /// Returns the replies to send: the board, plus the win or loss
    /// announcements when the round ends. Outside `Active` this does
    /// nothing.
    pub fn guess(&mut self, channel: ChannelId, guess: String) -> Vec<Reply> {
        let Round::Active(round) = &mut self.round else {
            return Vec::new();
        };

        let solved = guess == round.secret;
        round.guesses.push(guess);

        let mut replies = vec![Reply::new(
            channel,
            render_board(&round.secret, &round.guesses, self.params.guess_count),
        )];

        if solved {
            replies.push(Reply::new(channel, self.params.win_message.clone()));
        } else if round.guesses.len() >= self.params.guess_count {
            replies.push(Reply::new(channel, self.params.loss_message.clone()));
            replies.push(Reply::new(channel, render_reveal(&round.secret)));
        } else {
            return replies;
        }

        replies.push(Reply::new(channel, render_provenance(&round.provenance)));
        info!(
            community = %self.community,
            won = solved,
            guesses = round.guesses.len(),
            "round finished"
        );
        self.round = Round::Idle;
        replies
    }

    /// Drop any round in progress
    pub fn reset(&mut self) {
        self.round = Round::Idle;
    }
}
