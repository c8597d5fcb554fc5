//! Serialized per-session task
//!
//! Every session runs as its own task draining an ordered queue of events,
//! so commands for one community are applied one at a time in arrival order
//! while other communities progress independently. The slow history scan
//! runs in a separate task and re-enters the queue as `SearchFinished`.
//!
//! A command's new state is only kept once all of its replies were sent; a
//! failed send leaves the session as it was before the command.

use crate::commands::CommandLine;
use crate::error::GameError;
use crate::game::session::{Action, Phase, Reply, Session};
use crate::game::{Candidate, Parameters, WordSource};
use crate::host::{ChannelId, ChatHost, CommunityId};
use crate::output::{ChunkLimits, chunk};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("session for community {0} has shut down")]
pub struct SessionClosed(pub CommunityId);

#[derive(Debug)]
enum SessionEvent {
    Command {
        channel: ChannelId,
        line: CommandLine,
    },
    SearchFinished(Result<Candidate, GameError>),
    Phase(oneshot::Sender<Phase>),
    Parameters(oneshot::Sender<Parameters>),
}

/// Handle for queueing work on a session task
#[derive(Debug, Clone)]
pub struct SessionHandle {
    community: CommunityId,
    tx: mpsc::UnboundedSender<SessionEvent>,
}

impl SessionHandle {
    #[must_use]
    pub fn community(&self) -> CommunityId {
        self.community
    }

    /// Whether the session task has stopped
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    /// Queue a command that arrived in `channel`
    ///
    /// # Errors
    ///
    /// Returns `SessionClosed` if the session task has stopped.
    pub fn submit(&self, channel: ChannelId, line: CommandLine) -> Result<(), SessionClosed> {
        self.tx
            .send(SessionEvent::Command { channel, line })
            .map_err(|_| SessionClosed(self.community))
    }

    /// Current phase, answered after all previously queued events
    ///
    /// # Errors
    ///
    /// Returns `SessionClosed` if the session task has stopped.
    pub async fn phase(&self) -> Result<Phase, SessionClosed> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(SessionEvent::Phase(reply))
            .map_err(|_| SessionClosed(self.community))?;
        rx.await.map_err(|_| SessionClosed(self.community))
    }

    /// Current parameters, answered after all previously queued events
    ///
    /// # Errors
    ///
    /// Returns `SessionClosed` if the session task has stopped.
    pub async fn parameters(&self) -> Result<Parameters, SessionClosed> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(SessionEvent::Parameters(reply))
            .map_err(|_| SessionClosed(self.community))?;
        rx.await.map_err(|_| SessionClosed(self.community))
    }
}

pub struct SessionActor<H> {
    session: Session,
    host: Arc<H>,
    source: WordSource<H>,
    limits: ChunkLimits,
    rx: mpsc::UnboundedReceiver<SessionEvent>,
    /// For the search task to report back without keeping the queue open
    events: mpsc::WeakUnboundedSender<SessionEvent>,
}

impl<H: ChatHost> SessionActor<H> {
    /// Spawn the task for a session
    ///
    /// The task ends once every [`SessionHandle`] is dropped.
    pub fn spawn(
        session: Session,
        host: Arc<H>,
        source: WordSource<H>,
        limits: ChunkLimits,
    ) -> SessionHandle {
        let (tx, rx) = mpsc::unbounded_channel();
        let community = session.community();

        let actor = Self {
            session,
            host,
            source,
            limits,
            rx,
            events: tx.downgrade(),
        };
        tokio::spawn(actor.run());

        SessionHandle { community, tx }
    }

    async fn run(mut self) {
        while let Some(event) = self.rx.recv().await {
            match event {
                SessionEvent::Command { channel, line } => self.on_command(channel, &line).await,
                SessionEvent::SearchFinished(result) => self.on_search_finished(result).await,
                SessionEvent::Phase(reply) => {
                    let _ = reply.send(self.session.phase());
                }
                SessionEvent::Parameters(reply) => {
                    let _ = reply.send(self.session.params().clone());
                }
            }
        }
        debug!(community = %self.session.community(), "session stopped");
    }

    async fn on_command(&mut self, channel: ChannelId, line: &CommandLine) {
        let mut next = self.session.clone();

        match next.handle(line, channel) {
            Action::Ignore => {
                debug!(
                    community = %next.community(),
                    phase = %next.phase(),
                    token = %line.token,
                    "command ignored"
                );
            }
            Action::Reply(replies) => self.commit(next, &replies).await,
            Action::StartRound {
                requested,
                reply_channel,
            } => {
                match self.host.resolve_channel(next.community(), requested).await {
                    Ok(puzzle_channel) => {
                        next.begin_search(puzzle_channel, reply_channel);
                        let params = next.params().clone();
                        self.session = next;
                        self.spawn_search(puzzle_channel, params);
                    }
                    Err(source) => {
                        warn!(community = %next.community(), %requested, error = %source, "channel resolution failed");
                        let err = GameError::ChannelResolution {
                            channel: requested,
                            source,
                        };
                        // Nothing changes either way
                        let _ = self.deliver(&[Reply::error(reply_channel, &err)]).await;
                    }
                }
            }
        }
    }

    async fn on_search_finished(&mut self, result: Result<Candidate, GameError>) {
        let mut next = self.session.clone();
        let replies = next.finish_search(result);

        if self.deliver(&replies).await.is_err() && next.phase() == Phase::Active {
            // Nobody saw the board; back to where the start command found us
            next.reset();
        }
        self.session = next;
    }

    fn spawn_search(&self, channel: ChannelId, params: Parameters) {
        let source = self.source.clone();
        let events = self.events.clone();

        tokio::spawn(async move {
            let result = source.sample(channel, &params).await;
            if let Some(tx) = events.upgrade() {
                let _ = tx.send(SessionEvent::SearchFinished(result));
            }
        });
    }

    /// Keep `next` only if every reply went out
    async fn commit(&mut self, next: Session, replies: &[Reply]) {
        if self.deliver(replies).await.is_ok() {
            self.session = next;
        }
    }

    /// Send every reply, chunked to the transport limit
    ///
    /// Nothing is sent if one of the replies cannot be chunked; that reply's
    /// channel gets the error instead.
    async fn deliver(&self, replies: &[Reply]) -> Result<(), GameError> {
        let mut outgoing = Vec::new();
        for reply in replies {
            match chunk(&reply.text, self.limits) {
                Ok(parts) => outgoing.extend(parts.into_iter().map(|part| (reply.channel, part))),
                Err(oversized) => {
                    warn!(
                        community = %self.session.community(),
                        channel = %reply.channel,
                        error = %oversized,
                        "reply too long, command dropped"
                    );
                    let err = GameError::from(oversized);
                    if let Err(send_err) = self.host.send(reply.channel, &err.to_string()).await {
                        error!(channel = %reply.channel, error = %send_err, "error report failed");
                    }
                    return Err(err);
                }
            }
        }

        for (channel, part) in outgoing {
            if let Err(err) = self.host.send(channel, &part).await {
                error!(
                    community = %self.session.community(),
                    %channel,
                    error = %err,
                    "send failed, command dropped"
                );
                return Err(err.into());
            }
        }
        Ok(())
    }
}
