//! Naive whitespace and punctuation tokenization
//!
//! Used before the language is known, so it makes no language-specific
//! decisions. Scripts written without spaces come out as one long token,
//! which the scoring engine tolerates through its char-only early-out.

use regex::Regex;
use std::sync::OnceLock;

/// Punctuation kept when it sits between two non-space characters.
const INTERIOR_EXEMPT: &[char] = &['\'', '.', '/', '?', '&', '=', ':'];

static MARKUP: OnceLock<Regex> = OnceLock::new();

fn markup_regex() -> &'static Regex {
    MARKUP.get_or_init(|| Regex::new("<.*?>").expect("markup pattern is valid"))
}

/// Split text into coarse word tokens.
///
/// Markup is removed first, then most punctuation, then the remainder is
/// split on whitespace.
///
/// ```
/// use rankid_core::tokenizer::tokenize;
///
/// assert_eq!(tokenize("U.S.A. means United States"), vec!["U.S.A", "means", "United", "States"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    strip_most_punctuation(&remove_markup(text))
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Remove everything enclosed by angle brackets (non-greedy, single line).
pub fn remove_markup(text: &str) -> String {
    markup_regex().replace_all(text, "").into_owned()
}

/// Replace ASCII punctuation with spaces, keeping `' . / ? & = :` inside words.
///
/// A character is interior when it is neither first nor last and both its
/// neighbours are non-whitespace. The left neighbour is read after any
/// replacement already made in this pass, so `"x!.y"` loses both marks.
pub fn strip_most_punctuation(text: &str) -> String {
    let mut chars: Vec<char> = text.chars().collect();
    let len = chars.len();

    for i in 0..len {
        let ch = chars[i];
        if !ch.is_ascii_punctuation() {
            continue;
        }
        let interior = i > 0
            && i + 1 < len
            && !chars[i - 1].is_whitespace()
            && !chars[i + 1].is_whitespace();
        if interior && INTERIOR_EXEMPT.contains(&ch) {
            continue;
        }
        chars[i] = ' ';
    }

    chars.into_iter().collect()
}
