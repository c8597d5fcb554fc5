//! Runtime configuration shared by every session

use crate::game::Parameters;
use crate::output::ChunkLimits;
use std::time::Duration;

pub const DEFAULT_PREFIX: &str = "!";
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    /// Prefix marking a message as a command
    pub prefix: String,
    /// Word search timeout; `None` waits indefinitely
    pub lookup_timeout: Option<Duration>,
    pub limits: ChunkLimits,
    /// Parameters every new session starts from
    pub template: Parameters,
    /// Seed for secret word selection; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            lookup_timeout: Some(DEFAULT_LOOKUP_TIMEOUT),
            limits: ChunkLimits::default(),
            template: Parameters::default(),
            seed: None,
        }
    }
}

impl BotConfig {
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the word search timeout; zero disables it
    #[must_use]
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = (!timeout.is_zero()).then_some(timeout);
        self
    }

    #[must_use]
    pub fn with_template(mut self, template: Parameters) -> Self {
        self.template = template;
        self
    }

    /// Make secret word selection reproducible
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = BotConfig::default();
        assert_eq!(config.prefix, "!");
        assert_eq!(config.lookup_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.limits, ChunkLimits::CHAT);
        assert_eq!(config.template, Parameters::default());
        assert_eq!(config.seed, None);
        assert_eq!(BotConfig::default().with_seed(7).seed, Some(7));
    }

    #[test]
    fn zero_timeout_disables() {
        let config = BotConfig::default().with_lookup_timeout(Duration::ZERO);
        assert_eq!(config.lookup_timeout, None);

        let config = BotConfig::default().with_lookup_timeout(Duration::from_secs(2));
        assert_eq!(config.lookup_timeout, Some(Duration::from_secs(2)));
    }
}
