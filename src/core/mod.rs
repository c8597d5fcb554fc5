//! Core domain types for guessing rounds
//!
//! Pure, synchronous code: feedback calculation and secret word rules.

mod feedback;
mod word;

pub use feedback::{Feedback, Mark, UNGUESSED_SYMBOL};
pub use word::{WordError, WordRules, letter_count, normalize};
