//! Token filter: accepts or rejects raw provider fragments before any
//! spatial reasoning.

use super::extract;
use super::model::{COLUMN_LETTERS, Fragment};

/// Texts always kept regardless of confidence (center-cell content).
const FREE_SPACE_WORDS: [&str; 2] = ["FREE", "SPACE"];

/// Returns true if `fragment` should enter the analysis pipeline.
///
/// Free-space words pass unconditionally so a blurry center cell still
/// resolves. Single header letters are column headers, not cell content.
/// Everything else must clear the confidence threshold and yield at least
/// one candidate number.
pub fn accept(fragment: &Fragment, min_confidence: f32) -> bool {
    let text = fragment.text.trim();

    if FREE_SPACE_WORDS.iter().any(|w| text.eq_ignore_ascii_case(w)) {
        return true;
    }
    if is_header_letter(text) {
        return false;
    }
    if fragment.confidence < min_confidence {
        return false;
    }
    if !text.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }
    !extract::candidate_numbers(text).is_empty()
}

/// True for a single B/I/N/G/O character (case-insensitive).
///
/// These never become cell content, but the grid locator still uses their
/// positions as column anchors.
pub fn is_header_letter(text: &str) -> bool {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => COLUMN_LETTERS.contains(&c.to_ascii_uppercase()),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::model::Point;

    fn frag(text: &str, confidence: f32) -> Fragment {
        Fragment::new(
            text,
            confidence,
            vec![
                Point { x: 0.0, y: 0.0 },
                Point { x: 10.0, y: 0.0 },
                Point { x: 10.0, y: 10.0 },
                Point { x: 0.0, y: 10.0 },
            ],
        )
    }

    #[test]
    fn test_free_space_accepted_regardless_of_confidence() {
        assert!(accept(&frag("FREE", 0.05), 0.3));
        assert!(accept(&frag("free", 0.05), 0.3));
        assert!(accept(&frag("Space", 0.05), 0.3));
        assert!(accept(&frag(" FREE ", 0.05), 0.3));
    }

    #[test]
    fn test_header_letters_rejected() {
        for letter in ["B", "I", "N", "G", "O", "b", "o"] {
            assert!(!accept(&frag(letter, 0.99), 0.3), "header {letter} slipped through");
        }
        assert!(is_header_letter("B"));
        assert!(is_header_letter("o"));
        assert!(!is_header_letter("BI"));
        assert!(!is_header_letter(""));
        assert!(!is_header_letter("X"));
    }

    #[test]
    fn test_low_confidence_rejected() {
        assert!(!accept(&frag("42", 0.2), 0.3));
        assert!(accept(&frag("42", 0.3), 0.3));
    }

    #[test]
    fn test_requires_a_digit() {
        // No digit at all, even though corrections could produce one
        assert!(!accept(&frag("SO", 0.9), 0.3));
        assert!(accept(&frag("4S", 0.9), 0.3));
    }

    #[test]
    fn test_requires_a_candidate_number() {
        // Contains digits but no value lands in [1, 75]
        assert!(!accept(&frag("0", 0.9), 0.3));
        assert!(accept(&frag("75", 0.9), 0.3));
    }
}
