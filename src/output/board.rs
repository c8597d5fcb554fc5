//! Board and round-end message rendering

use crate::core::{Feedback, UNGUESSED_SYMBOL, letter_count};

/// Render the guessing board for a round
///
/// One line per past guess (symbols then the uppercased guess), one
/// placeholder line per unused slot, then the secret's length.
#[must_use]
pub fn render_board(secret: &str, guesses: &[String], guess_count: usize) -> String {
    let secret_len = letter_count(secret);
    let mut lines = vec!["Guess history:".to_string()];

    for guess in guesses {
        let feedback = Feedback::calculate(secret, guess);
        lines.push(format!("{feedback} : `{}`", guess.to_uppercase()));
    }

    let unused = guess_count.saturating_sub(guesses.len());
    lines.extend((0..unused).map(|_| UNGUESSED_SYMBOL.repeat(secret_len)));

    lines.push(format!("Word length = {secret_len}."));
    lines.join("\n")
}

/// Announcement revealing the secret after a lost round
#[must_use]
pub fn render_reveal(secret: &str) -> String {
    format!("The real answer was : `{}`.", secret.to_uppercase())
}

/// Announcement linking back to the message the secret came from
#[must_use]
pub fn render_provenance(provenance: &str) -> String {
    format!("Original message link : {provenance}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_board_has_placeholders_only() {
        let board = render_board("apple", &[], 3);
        assert_eq!(
            board,
            "Guess history:\n⬛⬛⬛⬛⬛\n⬛⬛⬛⬛⬛\n⬛⬛⬛⬛⬛\nWord length = 5."
        );
    }

    #[test]
    fn guesses_rendered_in_order() {
        let guesses = vec!["allee".to_string(), "cats".to_string()];
        let board = render_board("apple", &guesses, 3);
        let lines: Vec<&str> = board.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "🟩🟨⬜⬜🟩 : `ALLEE`");
        assert_eq!(lines[2], "🟫🟫🟫🟫 : `CATS`");
        assert_eq!(lines[3], "⬛⬛⬛⬛⬛");
        assert_eq!(lines[4], "Word length = 5.");
    }

    #[test]
    fn full_board_has_no_placeholders() {
        let guesses = vec!["abc".to_string(), "abd".to_string()];
        let board = render_board("abe", &guesses, 2);
        assert!(!board.contains(UNGUESSED_SYMBOL));
    }

    #[test]
    fn more_guesses_than_slots_adds_no_placeholders() {
        let guesses = vec!["abc".to_string(); 3];
        let board = render_board("abe", &guesses, 1);
        assert_eq!(board.lines().count(), 5);
        assert!(!board.contains(UNGUESSED_SYMBOL));
    }

    #[test]
    fn placeholder_width_counts_characters() {
        let board = render_board("çava", &[], 1);
        assert!(board.contains("⬛⬛⬛⬛\n"));
        assert!(board.ends_with("Word length = 4."));
    }

    #[test]
    fn announcements() {
        assert_eq!(render_reveal("apple"), "The real answer was : `APPLE`.");
        assert_eq!(
            render_provenance("chat://1/2/3"),
            "Original message link : chat://1/2/3"
        );
    }
}
