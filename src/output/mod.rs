//! Outbound message formatting
//!
//! Board rendering and transport-size chunking.

pub mod board;
pub mod chunker;

pub use board::{render_board, render_provenance, render_reveal};
pub use chunker::{ChunkLimits, OversizedLine, chunk};
