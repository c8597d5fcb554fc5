//! Routing inbound messages to per-community sessions

use crate::commands::CommandLine;
use crate::config::BotConfig;
use crate::game::{Session, SessionActor, SessionClosed, SessionHandle, WordSource};
use crate::host::{ChatHost, CommunityId, HostError, InboundMessage};
use crate::wordlists::Dictionary;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Owns one session task per community
pub struct SessionManager<H> {
    host: Arc<H>,
    source: WordSource<H>,
    config: BotConfig,
    sessions: FxHashMap<CommunityId, SessionHandle>,
}

impl<H: ChatHost> SessionManager<H> {
    /// Manager with no sessions yet; they are created on first contact
    #[must_use]
    pub fn new(host: Arc<H>, dictionary: Arc<Dictionary>, config: BotConfig) -> Self {
        let mut source = WordSource::new(Arc::clone(&host), dictionary, config.lookup_timeout);
        if let Some(seed) = config.seed {
            source = source.with_seed(seed);
        }
        Self {
            host,
            source,
            config,
            sessions: FxHashMap::default(),
        }
    }

    /// Manager with an idle session for every community the host knows
    ///
    /// # Errors
    ///
    /// Returns `HostError` if the host cannot list its communities.
    pub async fn start(
        host: Arc<H>,
        dictionary: Arc<Dictionary>,
        config: BotConfig,
    ) -> Result<Self, HostError> {
        let communities = host.communities().await?;
        let mut manager = Self::new(host, dictionary, config);
        for community in communities {
            manager.session(community);
        }
        info!(sessions = manager.len(), "sessions ready");
        Ok(manager)
    }

    /// The session for a community, created idle if missing
    ///
    /// A session whose task has ended is replaced by a fresh idle one.
    pub fn session(&mut self, community: CommunityId) -> &SessionHandle {
        let Self {
            host,
            source,
            config,
            sessions,
        } = self;

        if sessions.get(&community).is_some_and(SessionHandle::is_closed) {
            warn!(%community, "session task ended, starting a fresh session");
            sessions.remove(&community);
        }

        sessions.entry(community).or_insert_with(|| {
            debug!(%community, "creating session");
            SessionActor::spawn(
                Session::new(community, &config.template),
                Arc::clone(host),
                source.clone(),
                config.limits,
            )
        })
    }

    #[must_use]
    pub fn get(&self, community: CommunityId) -> Option<&SessionHandle> {
        self.sessions.get(&community)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    #[must_use]
    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    /// Queue a message on its community's session
    ///
    /// Returns `Ok(false)` for messages that are not commands or were
    /// written by the bot itself.
    ///
    /// # Errors
    ///
    /// Returns `SessionClosed` if the session task has stopped.
    pub fn dispatch(&mut self, message: &InboundMessage) -> Result<bool, SessionClosed> {
        if message.author == self.host.bot_user() {
            return Ok(false);
        }
        let Some(line) = CommandLine::parse(&message.content, &self.config.prefix) else {
            return Ok(false);
        };

        self.session(message.community).submit(message.channel, line)?;
        Ok(true)
    }
}
