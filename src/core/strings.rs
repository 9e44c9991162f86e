//! Character-level string helpers.
//!
//! Lengths and positions are counted in Unicode scalar values (`char`), so
//! multi-byte scripts behave the same as ASCII.

use crate::utils::error::{Result, UtilError};
use regex::{Captures, Regex};
use std::sync::LazyLock;

const ELLIPSIS: &str = "...";

static WORD_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w").expect("word-start pattern is valid"));

/// Reverses the characters of `text`.
pub fn reverse(text: &str) -> String {
    text.chars().rev().collect()
}

/// Uppercases the first character of every word.
///
/// A word starts wherever `\b\w` matches. Every other character, including
/// the rest of each word, is left as it is.
pub fn capitalize(text: &str) -> String {
    WORD_START
        .replace_all(text, |caps: &Captures| caps[0].to_uppercase())
        .into_owned()
}

/// Counts case-sensitive occurrences of the single character in `needle`.
pub fn count(text: &str, needle: &str) -> Result<usize> {
    let mut chars = needle.chars();
    let target = match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => {
            return Err(UtilError::invalid_argument(
                "Second argument must be a single character",
            ))
        }
    };

    Ok(text.chars().filter(|&c| c == target).count())
}

/// Shortens `text` to at most `max_length` characters, ending in `"..."`.
///
/// When `max_length` leaves no room for content the result is just the
/// ellipsis.
pub fn truncate(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }

    if max_length <= ELLIPSIS.len() {
        return ELLIPSIS.to_string();
    }

    let mut truncated: String = text.chars().take(max_length - ELLIPSIS.len()).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}
