//! Splitting outbound text under the transport's message size limit

use thiserror::Error;

/// Message size limits, in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkLimits {
    /// Size no sent message may exceed
    pub hard: usize,
    /// Size a chunk is kept under while lines are accumulated
    pub safety: usize,
}

impl ChunkLimits {
    /// Limits of common chat transports (2000 character messages)
    pub const CHAT: Self = Self {
        hard: 2000,
        safety: 1800,
    };
}

impl Default for ChunkLimits {
    fn default() -> Self {
        Self::CHAT
    }
}

/// A single line that no chunk can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("a line of {size} characters exceeds the {limit} character message limit")]
pub struct OversizedLine {
    pub size: usize,
    pub limit: usize,
}

const SEPARATOR: char = '\n';

fn size(text: &str) -> usize {
    text.chars().count()
}

/// Split `text` into line-aligned chunks
///
/// Lines are accumulated greedily while the chunk stays under
/// `limits.safety`. Joining the chunks with `'\n'` reproduces `text` exactly
/// and no chunk is longer than `limits.hard`.
///
/// # Errors
///
/// Lines are never split, so a single line longer than `limits.hard` cannot
/// be sent and yields `OversizedLine`.
///
/// # Examples
/// ```
/// use chaordle::output::{ChunkLimits, chunk};
///
/// assert_eq!(
///     chunk("short\nmessage", ChunkLimits::CHAT),
///     Ok(vec!["short\nmessage".to_string()])
/// );
/// ```
pub fn chunk(text: &str, limits: ChunkLimits) -> Result<Vec<String>, OversizedLine> {
    if size(text) <= limits.hard {
        return Ok(vec![text.to_string()]);
    }

    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_size = 0;

    for line in text.split(SEPARATOR) {
        let line_size = size(line);
        if line_size > limits.hard {
            return Err(OversizedLine {
                size: line_size,
                limit: limits.hard,
            });
        }
        // +1 for the separator rejoining this line to the chunk
        let projected = current_size + 1 + line_size;

        if current.is_empty() {
            current.push(line);
            current_size = line_size;
        } else if projected < limits.safety {
            current.push(line);
            current_size = projected;
        } else {
            chunks.push(current.join("\n"));
            current = vec![line];
            current_size = line_size;
        }
    }

    // split() always yields at least one line, so `current` is non-empty
    chunks.push(current.join("\n"));
    Ok(chunks)
}
