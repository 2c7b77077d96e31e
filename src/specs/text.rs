// src/specs/text.rs
//! Text classifiers for the description heuristic and the timestamp fallback.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::consts::MIN_DESCRIPTION_CHARS;
use crate::core::sanitize::{looks_truncated, normalize_ws};

static TIME_IN_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b\d{1,2}:\d{2}\s?[ap]m\b").expect("static regex"));

static TIMESTAMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\d{1,2}:\d{2}(\s?[ap]m)?$").expect("static regex"));

static HANDLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@[\w.]+$").expect("static regex"));

static RELATIVE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\d+\s*(s|secs?|seconds?|m|mins?|minutes?|h|hrs?|hours?|d|days?|w|wks?|weeks?|mo|months?|y|yrs?|years?)(\s+ago)?$",
    )
    .expect("static regex")
});

/// First `H:MM AM/PM` in free text.
pub fn find_time(text: &str) -> Option<String> {
    TIME_IN_TEXT.find(text).map(|m| m.as_str().to_string())
}

pub fn is_timestamp(s: &str) -> bool {
    TIMESTAMP.is_match(s.trim())
}

pub fn is_handle(s: &str) -> bool {
    HANDLE.is_match(s.trim())
}

/// `"3 min"`, `"2h"`, `"5 days ago"`.
pub fn is_relative_time(s: &str) -> bool {
    RELATIVE_TIME.is_match(s.trim())
}

/// Could this be caption text rather than card chrome?
fn is_description_like(s: &str) -> bool {
    s.chars().count() >= MIN_DESCRIPTION_CHARS
        && !is_timestamp(s)
        && !is_handle(s)
        && !is_relative_time(s)
        && !looks_truncated(s)
}

/// Longest description-like candidate (whitespace-normalized). First wins on ties.
pub fn longest_description<I, S>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut best: Option<(usize, String)> = None;
    for raw in candidates {
        let text = normalize_ws(raw.as_ref());
        if !is_description_like(&text) {
            continue;
        }
        let len = text.chars().count();
        if best.as_ref().is_none_or(|(l, _)| len > *l) {
            best = Some((len, text));
        }
    }
    best.map(|(_, t)| t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_time_in_text() {
        assert_eq!(find_time("Instagram 10:30 AM Launch day").as_deref(), Some("10:30 AM"));
        assert_eq!(find_time("at 9:05pm sharp").as_deref(), Some("9:05pm"));
        assert_eq!(find_time("no time here 10:30"), None);
    }

    #[test]
    fn classifies_chrome_strings() {
        assert!(is_timestamp("10:30 AM"));
        assert!(is_handle("@brand.official"));
        assert!(is_relative_time("3 min"));
        assert!(is_relative_time("5 days ago"));
        assert!(!is_relative_time("3 minute read about things"));
    }

    #[test]
    fn longest_skips_chrome_and_short_text() {
        let cands = [
            "@someone_with_a_long_handle",
            "Short text",
            "Our spring collection drops on Friday!",
            "Behind the scenes at the studio...",
            "12 minutes ago",
        ];
        assert_eq!(
            longest_description(cands).as_deref(),
            Some("Our spring collection drops on Friday!")
        );
    }

    #[test]
    fn longest_first_wins_on_tie() {
        let cands = ["aaaaaaaaaaaaaaaaaaaaaaaaa", "bbbbbbbbbbbbbbbbbbbbbbbbb"];
        assert_eq!(longest_description(cands).unwrap(), "aaaaaaaaaaaaaaaaaaaaaaaaa");
    }
}
