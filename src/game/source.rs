//! Secret word sampling from channel history

use crate::core::{WordRules, normalize};
use crate::error::GameError;
use crate::game::Parameters;
use crate::host::{ChannelId, ChatHost, HistoryMessage, HostError, UserId};
use crate::wordlists::Dictionary;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// A valid secret and the message it was taken from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub word: String,
    /// Link to the originating message
    pub provenance: String,
}

/// Every valid (word, message) pair in `messages`, in history order
///
/// Messages written by `bot` are skipped. Each whitespace-separated token is
/// normalized before it is checked, so one message can contribute several
/// candidates and the same word can appear more than once.
#[must_use]
pub fn collect_candidates(
    messages: &[HistoryMessage],
    bot: UserId,
    rules: WordRules,
    dictionary: &Dictionary,
) -> Vec<Candidate> {
    messages
        .par_iter()
        .filter(|message| message.author != bot)
        .flat_map_iter(|message| {
            message
                .content
                .split_whitespace()
                .map(normalize)
                .filter(move |word| rules.accepts(word, dictionary))
                .map(move |word| Candidate {
                    word,
                    provenance: message.link.clone(),
                })
        })
        .collect()
}

/// Pick one candidate uniformly at random
#[must_use]
pub fn choose<R: Rng + ?Sized>(candidates: &[Candidate], rng: &mut R) -> Option<Candidate> {
    candidates.choose(rng).cloned()
}

/// Samples secrets from a chat host's channel history
///
/// Clones share one random generator.
pub struct WordSource<H> {
    host: Arc<H>,
    dictionary: Arc<Dictionary>,
    timeout: Option<Duration>,
    rng: Arc<Mutex<StdRng>>,
}

impl<H> Clone for WordSource<H> {
    fn clone(&self) -> Self {
        Self {
            host: Arc::clone(&self.host),
            dictionary: Arc::clone(&self.dictionary),
            timeout: self.timeout,
            rng: Arc::clone(&self.rng),
        }
    }
}

impl<H: ChatHost> WordSource<H> {
    /// Source picking with an OS-seeded generator
    #[must_use]
    pub fn new(host: Arc<H>, dictionary: Arc<Dictionary>, timeout: Option<Duration>) -> Self {
        Self {
            host,
            dictionary,
            timeout,
            rng: Arc::new(Mutex::new(StdRng::from_os_rng())),
        }
    }

    /// Replace the generator with one seeded from `seed`
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            rng: Arc::new(Mutex::new(StdRng::seed_from_u64(seed))),
            ..self
        }
    }

    /// Sample a secret from the `lookup_depth` latest messages of `channel`
    ///
    /// # Errors
    ///
    /// - `GameError::SelectionExhausted` if no token passes the rules
    /// - `GameError::SelectionTimedOut` if the configured timeout expires
    /// - `GameError::Host` if history cannot be retrieved
    pub async fn sample(
        &self,
        channel: ChannelId,
        params: &Parameters,
    ) -> Result<Candidate, GameError> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.search(channel, params))
                .await
                .map_err(|_| GameError::SelectionTimedOut(limit))?,
            None => self.search(channel, params).await,
        }
    }

    async fn search(&self, channel: ChannelId, params: &Parameters) -> Result<Candidate, GameError> {
        let history = self.host.history(channel, params.lookup_depth).await?;
        let scanned = history.len();

        let bot = self.host.bot_user();
        let rules = params.word_rules();
        let dictionary = Arc::clone(&self.dictionary);
        let candidates = tokio::task::spawn_blocking(move || {
            collect_candidates(&history, bot, rules, &dictionary)
        })
        .await
        .map_err(|e| HostError::Transport(format!("candidate scan failed: {e}")))?;

        debug!(%channel, scanned, candidates = candidates.len(), "scanned channel history");

        let picked = choose(&candidates, &mut *self.rng.lock());
        picked.ok_or(GameError::SelectionExhausted { scanned })
    }
}
