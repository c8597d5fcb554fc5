//! Secret word normalization and validity rules
//!
//! Tokens pulled from chat history are normalized (diacritics stripped,
//! lowercased) before they are checked against a [`WordRules`].

use crate::wordlists::Dictionary;
use std::fmt;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Reason a token cannot be used as a secret
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordError {
    TooShort { len: usize, min: usize },
    TooLong { len: usize, max: usize },
    NonAlphabetic,
    Common,
}

impl fmt::Display for WordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { len, min } => {
                write!(f, "Word must have at least {min} letters, got {len}")
            }
            Self::TooLong { len, max } => {
                write!(f, "Word must have at most {max} letters, got {len}")
            }
            Self::NonAlphabetic => write!(f, "Word must contain only letters"),
            Self::Common => write!(f, "Word appears in a common word list"),
        }
    }
}

impl std::error::Error for WordError {}

/// Normalize a raw chat token for comparison
///
/// Lowercases and strips diacritics by decomposing to NFD and dropping
/// combining marks.
///
/// # Examples
/// ```
/// use chaordle::core::normalize;
///
/// assert_eq!(normalize("Éléphant"), "elephant");
/// assert_eq!(normalize("GARÇON"), "garcon");
/// ```
#[must_use]
pub fn normalize(token: &str) -> String {
    token
        .to_lowercase()
        .nfd()
        .filter(|&c| !is_combining_mark(c))
        .collect()
}

/// Letter count of a word, in characters
#[inline]
#[must_use]
pub fn letter_count(word: &str) -> usize {
    word.chars().count()
}

/// Constraints a normalized token must satisfy to become a secret
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordRules {
    pub min_letters: usize,
    pub max_letters: usize,
    pub force_uncommon: bool,
}

impl WordRules {
    /// Check a normalized token against these rules
    ///
    /// # Errors
    /// Returns `WordError` if:
    /// - Letter count is outside `[min_letters, max_letters]`
    /// - Contains non-alphabetic characters
    /// - `force_uncommon` is set and the word is in either common list
    pub fn check(&self, word: &str, dictionary: &Dictionary) -> Result<(), WordError> {
        let len = letter_count(word);

        if len < self.min_letters {
            return Err(WordError::TooShort {
                len,
                min: self.min_letters,
            });
        }
        if len > self.max_letters {
            return Err(WordError::TooLong {
                len,
                max: self.max_letters,
            });
        }

        if !word.chars().all(char::is_alphabetic) {
            return Err(WordError::NonAlphabetic);
        }

        if self.force_uncommon && dictionary.contains(word) {
            return Err(WordError::Common);
        }

        Ok(())
    }

    /// Convenience wrapper around [`WordRules::check`]
    #[inline]
    #[must_use]
    pub fn accepts(&self, word: &str, dictionary: &Dictionary) -> bool {
        self.check(word, dictionary).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(min: usize, max: usize, force_uncommon: bool) -> WordRules {
        WordRules {
            min_letters: min,
            max_letters: max,
            force_uncommon,
        }
    }

    #[test]
    fn normalize_strips_accents_and_case() {
        assert_eq!(normalize("Déjà"), "deja");
        assert_eq!(normalize("NOËL"), "noel");
        assert_eq!(normalize("plain"), "plain");
    }

    #[test]
    fn normalize_keeps_punctuation() {
        assert_eq!(normalize("Hello!"), "hello!");
        assert_eq!(normalize("<@123>"), "<@123>");
    }

    #[test]
    fn letter_count_counts_characters() {
        assert_eq!(letter_count("abc"), 3);
        assert_eq!(letter_count("æther"), 5);
    }

    #[test]
    fn bounds_are_inclusive() {
        let dict = Dictionary::default();
        let r = rules(3, 5, false);

        assert!(r.accepts("abc", &dict));
        assert!(r.accepts("abcde", &dict));
        assert_eq!(
            r.check("ab", &dict),
            Err(WordError::TooShort { len: 2, min: 3 })
        );
        assert_eq!(
            r.check("abcdef", &dict),
            Err(WordError::TooLong { len: 6, max: 5 })
        );
    }

    #[test]
    fn rejects_non_alphabetic() {
        let dict = Dictionary::default();
        let r = rules(1, 20, false);

        assert_eq!(r.check("abc1", &dict), Err(WordError::NonAlphabetic));
        assert_eq!(r.check("it's", &dict), Err(WordError::NonAlphabetic));
        assert_eq!(r.check("hello!", &dict), Err(WordError::NonAlphabetic));
    }

    #[test]
    fn common_words_rejected_only_when_forced() {
        let dict = Dictionary::from_lists(["house"], ["maison"]);

        assert_eq!(rules(1, 20, true).check("house", &dict), Err(WordError::Common));
        assert_eq!(rules(1, 20, true).check("maison", &dict), Err(WordError::Common));
        assert!(rules(1, 20, true).accepts("zeppelin", &dict));
        assert!(rules(1, 20, false).accepts("house", &dict));
    }

    #[test]
    fn error_display() {
        assert_eq!(
            WordError::TooShort { len: 2, min: 8 }.to_string(),
            "Word must have at least 8 letters, got 2"
        );
        assert_eq!(WordError::Common.to_string(), "Word appears in a common word list");
    }
}
