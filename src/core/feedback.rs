//! Guess feedback calculation and representation
//!
//! Feedback is one [`Mark`] per guess position:
//! - `Exact` = letter in the correct position
//! - `Present` = letter elsewhere in the secret
//! - `Absent` = letter not in the secret (or all copies already used)
//! - `InvalidLength` = the guess and secret lengths differ
//!
//! Unlike classic Wordle, secrets here have arbitrary length and may contain
//! any alphabetic character, so feedback is stored per position rather than
//! packed into a fixed-width integer.

use std::fmt;

/// Status of a single guess position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    Exact,
    Present,
    Absent,
    InvalidLength,
}

impl Mark {
    /// Symbol used on the board for this mark
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Exact => "🟩",
            Self::Present => "🟨",
            Self::Absent => "⬜",
            Self::InvalidLength => "🟫",
        }
    }
}

/// Symbol for a guess slot that has not been used yet
pub const UNGUESSED_SYMBOL: &str = "⬛";

/// Feedback for one guess against the secret
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Feedback(Vec<Mark>);

impl Feedback {
    /// Calculate the feedback when `guess` is compared to `secret`
    ///
    /// Duplicate letters follow Wordle's rules: no letter is marked `Exact`
    /// or `Present` more times than it occurs in the secret.
    ///
    /// # Algorithm
    /// 1. Length check: a mismatch marks every guess position `InvalidLength`
    /// 2. First pass: mark exact matches and consume those secret positions
    /// 3. Second pass: for each remaining guess letter, consume the leftmost
    ///    unconsumed occurrence in the secret and mark it `Present`
    ///
    /// # Examples
    /// ```
    /// use chaordle::core::{Feedback, Mark};
    ///
    /// let feedback = Feedback::calculate("apple", "allee");
    /// assert_eq!(
    ///     feedback.marks(),
    ///     &[Mark::Exact, Mark::Present, Mark::Absent, Mark::Absent, Mark::Exact]
    /// );
    /// ```
    #[must_use]
    pub fn calculate(secret: &str, guess: &str) -> Self {
        let secret: Vec<char> = secret.chars().collect();
        let guess: Vec<char> = guess.chars().collect();

        if secret.len() != guess.len() {
            return Self(vec![Mark::InvalidLength; guess.len()]);
        }

        let mut marks = vec![Mark::Absent; guess.len()];
        // Secret letters still available for a `Present` match
        let mut remaining: Vec<Option<char>> = secret.iter().copied().map(Some).collect();

        // First pass: exact matches
        for (i, (&s, &g)) in secret.iter().zip(&guess).enumerate() {
            if s == g {
                marks[i] = Mark::Exact;
                remaining[i] = None;
            }
        }

        // Second pass: present-but-misplaced, leftmost occurrence first
        for (i, &g) in guess.iter().enumerate() {
            if marks[i] == Mark::Exact {
                continue;
            }
            if let Some(slot) = remaining.iter_mut().find(|slot| **slot == Some(g)) {
                *slot = None;
                marks[i] = Mark::Present;
            }
        }

        Self(marks)
    }

    /// Per-position marks, aligned to the guess
    #[inline]
    #[must_use]
    pub fn marks(&self) -> &[Mark] {
        &self.0
    }

    /// Render as board symbols, one per position
    ///
    /// # Examples
    /// ```
    /// use chaordle::core::Feedback;
    ///
    /// assert_eq!(Feedback::calculate("cat", "act").to_symbols(), "🟨🟨🟩");
    /// ```
    #[must_use]
    pub fn to_symbols(&self) -> String {
        self.0.iter().map(|m| m.symbol()).collect()
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_symbols())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Mark::{Absent, Exact, InvalidLength, Present};

    #[test]
    fn duplicate_letters_consume_leftmost() {
        let feedback = Feedback::calculate("apple", "allee");
        assert_eq!(feedback.marks(), &[Exact, Present, Absent, Absent, Exact]);
    }

    #[test]
    fn length_mismatch_follows_guess_length() {
        let feedback = Feedback::calculate("cat", "cats");
        assert_eq!(feedback.marks(), &[InvalidLength; 4]);

        let shorter = Feedback::calculate("cats", "ca");
        assert_eq!(shorter.marks(), &[InvalidLength; 2]);
    }

    #[test]
    fn empty_guess_against_word() {
        let feedback = Feedback::calculate("cat", "");
        assert!(feedback.marks().is_empty());
    }

    #[test]
    fn all_absent() {
        let feedback = Feedback::calculate("abcde", "fghij");
        assert_eq!(feedback.marks(), &[Absent; 5]);
    }

    #[test]
    fn solved_word() {
        for word in ["crane", "anticonstitutionnel", "zzzzz", "a"] {
            let feedback = Feedback::calculate(word, word);
            assert!(feedback.marks().iter().all(|&m| m == Exact), "{word}");
        }
    }

    #[test]
    fn exact_takes_priority_over_present() {
        // ROBOT vs FLOOR: first O is present, second O is exact
        let feedback = Feedback::calculate("floor", "robot");
        assert_eq!(feedback.marks(), &[Present, Present, Absent, Exact, Absent]);
    }

    #[test]
    fn repeated_guess_letter_limited_by_secret_count() {
        // SPEED vs ERASE: ERASE has two E's, so both E's in SPEED are present
        let feedback = Feedback::calculate("erase", "speed");
        assert_eq!(feedback.marks(), &[Present, Absent, Present, Present, Absent]);

        // Only one L in the secret
        let feedback = Feedback::calculate("hello", "lllll");
        assert_eq!(feedback.marks(), &[Absent, Absent, Exact, Exact, Absent]);
    }

    #[test]
    fn letter_count_never_exceeds_secret() {
        let pairs = [
            ("apple", "allee"),
            ("banana", "ananas"),
            ("mississippi", "ssssssiiiii"),
            ("abcabc", "cbacba"),
            ("aaaaab", "baaaaa"),
            ("étoile", "éééééé"),
        ];
        for (secret, guess) in pairs {
            let feedback = Feedback::calculate(secret, guess);
            for letter in guess.chars() {
                let marked = guess
                    .chars()
                    .zip(feedback.marks())
                    .filter(|&(c, &m)| c == letter && matches!(m, Exact | Present))
                    .count();
                let available = secret.chars().filter(|&c| c == letter).count();
                assert!(
                    marked <= available,
                    "{guess} vs {secret}: '{letter}' marked {marked} times, secret has {available}"
                );
            }
        }
    }

    #[test]
    fn non_ascii_letters_compare_per_character() {
        let feedback = Feedback::calculate("çava", "avça");
        assert_eq!(feedback.marks(), &[Present, Present, Present, Exact]);
    }

    #[test]
    fn symbols_render_one_per_mark() {
        let feedback = Feedback::calculate("apple", "allee");
        assert_eq!(feedback.to_symbols(), "🟩🟨⬜⬜🟩");
        assert_eq!(format!("{feedback}"), "🟩🟨⬜⬜🟩");
        assert_eq!(Feedback::calculate("cat", "cats").to_symbols(), "🟫🟫🟫🟫");
    }
}
