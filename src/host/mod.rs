//! Chat transport interface
//!
//! Sessions never talk to a chat service directly. Everything they need
//! (channel lookup, history, sending) goes through a [`ChatHost`].

pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub use memory::{Archive, MemoryHost, SentMessage};

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(
    /// A community (server) the bot is a member of
    CommunityId
);
id_type!(
    /// A text channel within a community
    ChannelId
);
id_type!(
    /// A user, including the bot itself
    UserId
);

/// A message as seen in channel history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryMessage {
    pub author: UserId,
    pub content: String,
    /// Stable permalink to this message
    pub link: String,
}

/// A message delivered to the bot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub community: CommunityId,
    pub channel: ChannelId,
    pub author: UserId,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("unknown community {0}")]
    UnknownCommunity(CommunityId),
    #[error("channel {channel} not found in community {community}")]
    UnknownChannel {
        community: CommunityId,
        channel: ChannelId,
    },
    #[error("transport failure: {0}")]
    Transport(String),
}

/// The services a chat transport provides to the game
#[async_trait]
pub trait ChatHost: Send + Sync + 'static {
    /// The bot's own identity
    fn bot_user(&self) -> UserId;

    /// Communities the bot currently belongs to
    async fn communities(&self) -> Result<Vec<CommunityId>, HostError>;

    /// Channels of a community
    async fn channels(&self, community: CommunityId) -> Result<Vec<ChannelId>, HostError>;

    /// Resolve a channel identifier within a community
    ///
    /// The default looks the id up in [`ChatHost::channels`].
    async fn resolve_channel(
        &self,
        community: CommunityId,
        channel: ChannelId,
    ) -> Result<ChannelId, HostError> {
        if self.channels(community).await?.contains(&channel) {
            Ok(channel)
        } else {
            Err(HostError::UnknownChannel { community, channel })
        }
    }

    /// Up to `limit` most recent messages of a channel, newest first
    async fn history(
        &self,
        channel: ChannelId,
        limit: usize,
    ) -> Result<Vec<HistoryMessage>, HostError>;

    /// Send one message to a channel
    async fn send(&self, channel: ChannelId, text: &str) -> Result<(), HostError>;
}
