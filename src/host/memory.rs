//! In-memory chat host
//!
//! Backs the console runner and the test suite. Communities, channels and
//! their history can be seeded from a JSON [`Archive`]; everything the bot
//! sends is recorded, appended to channel history and streamed to
//! subscribers.

use super::{ChannelId, ChatHost, CommunityId, HistoryMessage, HostError, UserId};
use async_trait::async_trait;
use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;

/// Serialized seed data for a [`MemoryHost`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Archive {
    #[serde(default)]
    pub bot: UserId,
    #[serde(default)]
    pub communities: Vec<ArchiveCommunity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveCommunity {
    pub id: CommunityId,
    #[serde(default)]
    pub channels: Vec<ArchiveChannel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveChannel {
    pub id: ChannelId,
    /// Oldest first
    #[serde(default)]
    pub messages: Vec<ArchiveMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveMessage {
    pub author: UserId,
    pub content: String,
}

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("failed to read archive: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed archive: {0}")]
    Json(#[from] serde_json::Error),
}

impl Archive {
    /// Read an archive from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError` if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArchiveError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// A message the bot sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub channel: ChannelId,
    pub text: String,
}

#[derive(Debug)]
struct ChannelLog {
    community: CommunityId,
    /// Oldest first
    messages: Vec<HistoryMessage>,
}

#[derive(Debug, Default)]
struct State {
    communities: FxHashMap<CommunityId, Vec<ChannelId>>,
    channels: FxHashMap<ChannelId, ChannelLog>,
    next_message_id: u64,
    outbox: Vec<SentMessage>,
    subscribers: Vec<mpsc::UnboundedSender<SentMessage>>,
    failing_history: FxHashSet<ChannelId>,
    failing_sends: bool,
    history_delay: Option<Duration>,
}

impl State {
    fn append(&mut self, channel: ChannelId, author: UserId, content: &str) -> Option<String> {
        let id = self.next_message_id;
        let log = self.channels.get_mut(&channel)?;
        self.next_message_id += 1;

        let link = format!("chat://{}/{}/{}", log.community, channel, id);
        log.messages.push(HistoryMessage {
            author,
            content: content.to_string(),
            link: link.clone(),
        });
        Some(link)
    }
}

/// Chat host holding all communities in memory
#[derive(Debug)]
pub struct MemoryHost {
    bot: UserId,
    state: Mutex<State>,
}

impl MemoryHost {
    #[must_use]
    pub fn new(bot: UserId) -> Self {
        Self {
            bot,
            state: Mutex::new(State::default()),
        }
    }

    /// Build a host seeded from an archive
    #[must_use]
    pub fn from_archive(archive: &Archive) -> Self {
        let host = Self::new(archive.bot);
        for community in &archive.communities {
            host.add_community(community.id);
            for channel in &community.channels {
                host.add_channel(community.id, channel.id);
                for message in &channel.messages {
                    host.post(channel.id, message.author, &message.content);
                }
            }
        }
        host
    }

    pub fn add_community(&self, community: CommunityId) {
        self.state.lock().communities.entry(community).or_default();
    }

    /// Register a channel, creating its community if needed
    pub fn add_channel(&self, community: CommunityId, channel: ChannelId) {
        let mut state = self.state.lock();
        let channels = state.communities.entry(community).or_default();
        if !channels.contains(&channel) {
            channels.push(channel);
        }
        state.channels.entry(channel).or_insert_with(|| ChannelLog {
            community,
            messages: Vec::new(),
        });
    }

    /// Append a message to a channel's history, returning its link
    ///
    /// Returns `None` if the channel does not exist.
    pub fn post(&self, channel: ChannelId, author: UserId, content: &str) -> Option<String> {
        self.state.lock().append(channel, author, content)
    }

    /// Community a channel belongs to
    #[must_use]
    pub fn community_of(&self, channel: ChannelId) -> Option<CommunityId> {
        self.state.lock().channels.get(&channel).map(|log| log.community)
    }

    /// Everything sent so far, in order
    #[must_use]
    pub fn sent(&self) -> Vec<SentMessage> {
        self.state.lock().outbox.clone()
    }

    /// Texts sent to one channel, in order
    #[must_use]
    pub fn sent_to(&self, channel: ChannelId) -> Vec<String> {
        self.state
            .lock()
            .outbox
            .iter()
            .filter(|m| m.channel == channel)
            .map(|m| m.text.clone())
            .collect()
    }

    /// Stream of messages sent from now on
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<SentMessage> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.state.lock().subscribers.push(tx);
        rx
    }

    /// Make history retrieval for a channel fail
    pub fn fail_history(&self, channel: ChannelId) {
        self.state.lock().failing_history.insert(channel);
    }

    /// Make every send fail (or succeed again)
    pub fn fail_sends(&self, failing: bool) {
        self.state.lock().failing_sends = failing;
    }

    /// Delay every history retrieval
    pub fn set_history_delay(&self, delay: Option<Duration>) {
        self.state.lock().history_delay = delay;
    }
}

#[async_trait]
impl ChatHost for MemoryHost {
    fn bot_user(&self) -> UserId {
        self.bot
    }

    async fn communities(&self) -> Result<Vec<CommunityId>, HostError> {
        let mut ids: Vec<_> = self.state.lock().communities.keys().copied().collect();
        ids.sort_unstable();
        Ok(ids)
    }

    async fn channels(&self, community: CommunityId) -> Result<Vec<ChannelId>, HostError> {
        self.state
            .lock()
            .communities
            .get(&community)
            .cloned()
            .ok_or(HostError::UnknownCommunity(community))
    }

    async fn history(
        &self,
        channel: ChannelId,
        limit: usize,
    ) -> Result<Vec<HistoryMessage>, HostError> {
        let delay = self.state.lock().history_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let state = self.state.lock();
        if state.failing_history.contains(&channel) {
            return Err(HostError::Transport(format!(
                "history unavailable for channel {channel}"
            )));
        }
        let log = state
            .channels
            .get(&channel)
            .ok_or_else(|| HostError::Transport(format!("unknown channel {channel}")))?;

        Ok(log.messages.iter().rev().take(limit).cloned().collect())
    }

    async fn send(&self, channel: ChannelId, text: &str) -> Result<(), HostError> {
        let mut state = self.state.lock();
        if state.failing_sends {
            return Err(HostError::Transport("send rejected".to_string()));
        }

        let bot = self.bot;
        state.append(channel, bot, text);

        let message = SentMessage {
            channel,
            text: text.to_string(),
        };
        state.subscribers.retain(|tx| tx.send(message.clone()).is_ok());
        state.outbox.push(message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMMUNITY: CommunityId = CommunityId(1);
    const CHANNEL: ChannelId = ChannelId(10);

    fn host() -> MemoryHost {
        let host = MemoryHost::new(UserId(99));
        host.add_channel(COMMUNITY, CHANNEL);
        host
    }

    #[tokio::test]
    async fn history_is_newest_first_and_limited() {
        let host = host();
        for text in ["one", "two", "three"] {
            host.post(CHANNEL, UserId(1), text);
        }

        let history = host.history(CHANNEL, 2).await.unwrap();
        let contents: Vec<_> = history.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["three", "two"]);
    }

    #[tokio::test]
    async fn links_are_unique() {
        let host = host();
        let a = host.post(CHANNEL, UserId(1), "a").unwrap();
        let b = host.post(CHANNEL, UserId(1), "b").unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with("chat://1/10/"));
    }

    #[tokio::test]
    async fn resolve_channel_checks_community() {
        let host = host();
        host.add_channel(CommunityId(2), ChannelId(20));

        assert_eq!(host.resolve_channel(COMMUNITY, CHANNEL).await, Ok(CHANNEL));
        assert_eq!(
            host.resolve_channel(COMMUNITY, ChannelId(20)).await,
            Err(HostError::UnknownChannel {
                community: COMMUNITY,
                channel: ChannelId(20)
            })
        );
        assert_eq!(
            host.resolve_channel(CommunityId(3), CHANNEL).await,
            Err(HostError::UnknownCommunity(CommunityId(3)))
        );
    }

    #[tokio::test]
    async fn sends_are_recorded_and_streamed() {
        let host = host();
        let mut rx = host.subscribe();

        host.send(CHANNEL, "hello").await.unwrap();

        assert_eq!(host.sent_to(CHANNEL), vec!["hello"]);
        assert_eq!(rx.recv().await.unwrap().text, "hello");

        let history = host.history(CHANNEL, 1).await.unwrap();
        assert_eq!(history[0].author, UserId(99));
    }

    #[tokio::test]
    async fn injected_failures() {
        let host = host();
        host.fail_history(CHANNEL);
        host.fail_sends(true);

        assert!(matches!(
            host.history(CHANNEL, 10).await,
            Err(HostError::Transport(_))
        ));
        assert!(host.send(CHANNEL, "x").await.is_err());
        assert!(host.sent().is_empty());
    }

    #[test]
    fn archive_round_trip_seeds_host() {
        let json = r#"{
            "bot": 99,
            "communities": [
                { "id": 1, "channels": [
                    { "id": 10, "messages": [ { "author": 5, "content": "hello there" } ] }
                ] }
            ]
        }"#;
        let archive: Archive = serde_json::from_str(json).unwrap();
        let host = MemoryHost::from_archive(&archive);

        assert_eq!(host.bot_user(), UserId(99));
        assert_eq!(host.community_of(CHANNEL), Some(COMMUNITY));
    }
}
