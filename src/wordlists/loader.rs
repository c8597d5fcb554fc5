//! Word list loading utilities
//!
//! Lists are newline-delimited, one lowercase word per line.

use std::fs;
use std::io;
use std::path::Path;

/// Load the non-empty, trimmed lines of a word list file
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read or is not valid UTF-8.
///
/// # Examples
/// ```no_run
/// use chaordle::wordlists::loader::load_from_file;
///
/// let words = load_from_file("words/english.txt").unwrap();
/// println!("Loaded {} words", words.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(words_from_str(&content))
}

/// Split list content into trimmed, non-empty lines
#[must_use]
pub fn words_from_str(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
