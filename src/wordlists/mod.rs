//! Common word lists
//!
//! The dictionary is built once at startup and shared read-only by every
//! session (wrap it in an `Arc`). It is only ever used to exclude common
//! words from becoming secrets.

pub mod loader;

use crate::core::normalize;
use rustc_hash::FxHashSet;
use std::io;
use std::path::Path;

/// The two common word corpora
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    english: FxHashSet<String>,
    french: FxHashSet<String>,
}

impl Dictionary {
    /// Build from in-memory lists
    ///
    /// English words are only trimmed and lowercased; French words are
    /// normalized like sampled tokens so accented entries still match.
    #[must_use]
    pub fn from_lists<E, F>(english: E, french: F) -> Self
    where
        E: IntoIterator,
        E::Item: AsRef<str>,
        F: IntoIterator,
        F::Item: AsRef<str>,
    {
        let english = english
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        let french = french
            .into_iter()
            .map(|w| normalize(w.as_ref().trim()))
            .filter(|w| !w.is_empty())
            .collect();

        Self { english, french }
    }

    /// Load both lists from newline-delimited files
    ///
    /// # Errors
    ///
    /// Returns an I/O error if either file cannot be read.
    pub fn load(english: impl AsRef<Path>, french: impl AsRef<Path>) -> io::Result<Self> {
        let english = loader::load_from_file(english)?;
        let french = loader::load_from_file(french)?;
        Ok(Self::from_lists(english, french))
    }

    /// Whether a normalized word appears in either list
    #[inline]
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.english.contains(word) || self.french.contains(word)
    }

    #[must_use]
    pub fn english_count(&self) -> usize {
        self.english.len()
    }

    #[must_use]
    pub fn french_count(&self) -> usize {
        self.french.len()
    }
}
