//! Content filter for conversation messages.
//!
//! Screening happens in two stages:
//! 1. a denylist of literal phrases that rejects the message outright;
//! 2. sensitive-data patterns (card numbers, SSNs, e-mail addresses) whose
//!    matches are replaced with [`REDACTION_MARKER`].

use once_cell::sync::Lazy;
use regex::Regex;

/// Replacement text for redacted sensitive data.
pub const REDACTION_MARKER: &str = "[REDACTED]";

/// Reason reported when a denylisted phrase is found.
pub const PROHIBITED_CONTENT_REASON: &str = "Message contains prohibited content";

/// Reason reported when sensitive data was redacted.
pub const REDACTED_REASON: &str = "sensitive information redacted";

/// Phrases that are never allowed through, matched case-insensitively.
const DEFAULT_DENYLIST: &[&str] = &[
    "pay outside the app",
    "pay me directly",
    "wire transfer only",
    "send nudes",
    "kill yourself",
];

static SENSITIVE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // SSN shaped: 123-45-6789
        r"\b\d{3}-\d{2}-\d{4}\b",
        // Card-like runs of 13-19 digits, optionally grouped by spaces or dashes
        r"\b(?:\d[ -]?){12,18}\d\b",
        // E-mail addresses
        r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("sensitive data pattern is valid"))
    .collect()
});

/// Outcome of running text through the [`ContentFilter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterVerdict {
    /// Nothing matched; content is unchanged.
    Clean { content: String },
    /// Sensitive data was replaced; the redacted content may be stored.
    Redacted { content: String, reason: String },
    /// A denylisted phrase was found; the content must not be stored.
    Rejected { reason: String },
}

impl FilterVerdict {
    /// True unless the content was rejected.
    pub fn is_clean(&self) -> bool {
        !matches!(self, FilterVerdict::Rejected { .. })
    }

    /// Content to persist, if any.
    pub fn content(&self) -> Option<&str> {
        match self {
            FilterVerdict::Clean { content } | FilterVerdict::Redacted { content, .. } => {
                Some(content)
            }
            FilterVerdict::Rejected { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            FilterVerdict::Clean { .. } => None,
            FilterVerdict::Redacted { reason, .. } | FilterVerdict::Rejected { reason } => {
                Some(reason)
            }
        }
    }
}

/// Denylist and sensitive-data screening for outgoing messages.
#[derive(Debug, Clone)]
pub struct ContentFilter {
    denylist: Vec<String>,
}

impl Default for ContentFilter {
    fn default() -> Self {
        Self::new(DEFAULT_DENYLIST.iter().copied())
    }
}

impl ContentFilter {
    /// Creates a filter with a custom denylist.
    pub fn new<I, S>(denylist: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            denylist: denylist
                .into_iter()
                .map(|phrase| phrase.as_ref().to_lowercase())
                .filter(|phrase| !phrase.is_empty())
                .collect(),
        }
    }

    /// Screens `text`.
    pub fn filter(&self, text: &str) -> FilterVerdict {
        let lowered = text.to_lowercase();
        if self.denylist.iter().any(|phrase| lowered.contains(phrase)) {
            return FilterVerdict::Rejected {
                reason: PROHIBITED_CONTENT_REASON.to_string(),
            };
        }

        let mut content = text.to_string();
        let mut redacted = false;
        for pattern in SENSITIVE_PATTERNS.iter() {
            if pattern.is_match(&content) {
                content = pattern.replace_all(&content, REDACTION_MARKER).into_owned();
                redacted = true;
            }
        }

        if redacted {
            FilterVerdict::Redacted {
                content,
                reason: REDACTED_REASON.to_string(),
            }
        } else {
            FilterVerdict::Clean { content }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_email_addresses() {
        let verdict = ContentFilter::default().filter("call me at john@example.com");
        assert!(verdict.is_clean());
        assert_eq!(verdict.content(), Some("call me at [REDACTED]"));
        assert_eq!(verdict.reason(), Some(REDACTED_REASON));
    }

    #[test]
    fn redacts_card_numbers_with_and_without_separators() {
        let filter = ContentFilter::default();
        assert_eq!(
            filter.filter("card 4111111111111111 ok").content(),
            Some("card [REDACTED] ok")
        );
        assert_eq!(
            filter.filter("card 4111 1111 1111 1111 ok").content(),
            Some("card [REDACTED] ok")
        );
    }

    #[test]
    fn redacts_ssn_shaped_sequences() {
        let verdict = ContentFilter::default().filter("my ssn is 123-45-6789");
        assert_eq!(verdict.content(), Some("my ssn is [REDACTED]"));
    }

    #[test]
    fn short_numbers_are_left_alone() {
        let verdict = ContentFilter::default().filter("unit 42, arriving at 10:30, quote 250");
        assert_eq!(
            verdict,
            FilterVerdict::Clean {
                content: "unit 42, arriving at 10:30, quote 250".to_string()
            }
        );
    }

    #[test]
    fn denylisted_phrase_rejects_regardless_of_case() {
        let verdict = ContentFilter::default().filter("Let's PAY OUTSIDE THE APP, cheaper");
        assert!(!verdict.is_clean());
        assert_eq!(verdict.content(), None);
        assert_eq!(verdict.reason(), Some(PROHIBITED_CONTENT_REASON));
    }

    #[test]
    fn denylist_wins_over_redaction() {
        let verdict = ContentFilter::default().filter("pay me directly: me@example.com");
        assert!(matches!(verdict, FilterVerdict::Rejected { .. }));
    }

    #[test]
    fn custom_denylist_replaces_defaults() {
        let filter = ContentFilter::new(["forbidden"]);
        assert!(filter.filter("pay me directly").is_clean());
        assert!(!filter.filter("This is Forbidden").is_clean());
    }
}
