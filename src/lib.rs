//! Chaordle
//!
//! Word-guessing rounds for chat communities. Each community runs its own
//! round; the secret word is sampled from that community's own message
//! history, and guesses get Wordle-style feedback.
//!
//! # Quick Start
//!
//! ```rust
//! use chaordle::core::{Feedback, Mark};
//!
//! let feedback = Feedback::calculate("apple", "allee");
//! assert_eq!(feedback.marks()[0], Mark::Exact);
//! println!("{feedback}");
//! ```

// Core domain types
pub mod core;

// Common word lists
pub mod wordlists;

// Chat command parsing
pub mod commands;

// Rounds, sessions and routing
pub mod game;

// Chat transport interface
pub mod host;

// Outbound message formatting
pub mod output;

pub mod config;
pub mod error;

pub use config::BotConfig;
pub use error::GameError;
