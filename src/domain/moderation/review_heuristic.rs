//! Non-blocking heuristic that marks content for later human review.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Content longer than this many characters is flagged.
pub const MAX_UNFLAGGED_LENGTH: usize = 5000;

/// Repetition is only judged past this many tokens.
pub const REPETITION_MIN_TOKENS: usize = 20;

/// Unique-token ratio below which content counts as repetitive.
pub const MIN_UNIQUE_TOKEN_RATIO: f64 = 0.30;

/// More URLs than this are flagged.
pub const MAX_UNFLAGGED_URLS: usize = 3;

static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:https?://|www\.)\S+").expect("url pattern is valid")
});

/// Why content was flagged for review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewReason {
    TooLong,
    Repetitive,
    LinkHeavy,
}

impl ReviewReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewReason::TooLong => "too_long",
            ReviewReason::Repetitive => "repetitive",
            ReviewReason::LinkHeavy => "link_heavy",
        }
    }
}

/// Returns the first reason `text` warrants review, if any.
pub fn review_reason(text: &str) -> Option<ReviewReason> {
    if text.chars().count() > MAX_UNFLAGGED_LENGTH {
        return Some(ReviewReason::TooLong);
    }

    let tokens: Vec<String> = text.split_whitespace().map(str::to_lowercase).collect();
    if tokens.len() > REPETITION_MIN_TOKENS {
        let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
        let ratio = unique.len() as f64 / tokens.len() as f64;
        if ratio < MIN_UNIQUE_TOKEN_RATIO {
            return Some(ReviewReason::Repetitive);
        }
    }

    if URL.find_iter(text).count() > MAX_UNFLAGGED_URLS {
        return Some(ReviewReason::LinkHeavy);
    }

    None
}

/// True when `text` should be queued for human review.
pub fn should_flag_for_moderation(text: &str) -> bool {
    review_reason(text).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinary_message_is_not_flagged() {
        assert!(!should_flag_for_moderation(
            "Hi, I can come by Tuesday morning to look at the sink."
        ));
    }

    #[test]
    fn very_long_message_is_flagged() {
        let text = "a".repeat(MAX_UNFLAGGED_LENGTH + 1);
        assert_eq!(review_reason(&text), Some(ReviewReason::TooLong));
    }

    #[test]
    fn exactly_max_length_is_not_flagged_for_length() {
        let text = "a".repeat(MAX_UNFLAGGED_LENGTH);
        assert_ne!(review_reason(&text), Some(ReviewReason::TooLong));
    }

    #[test]
    fn repetitive_message_is_flagged() {
        let text = "buy now ".repeat(15);
        assert_eq!(review_reason(&text), Some(ReviewReason::Repetitive));
    }

    #[test]
    fn short_repetition_is_tolerated() {
        let text = "yes ".repeat(REPETITION_MIN_TOKENS);
        assert_eq!(review_reason(&text), None);
    }

    #[test]
    fn more_than_three_urls_is_flagged() {
        let text = "see http://a.test https://b.test www.c.test http://d.test";
        assert_eq!(review_reason(text), Some(ReviewReason::LinkHeavy));
    }

    #[test]
    fn three_urls_is_fine() {
        let text = "see http://a.test https://b.test www.c.test";
        assert_eq!(review_reason(text), None);
    }
}
