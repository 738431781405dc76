//! Rating-comment screening.
//!
//! Unlike the message filter this never rewrites text; it only decides
//! whether a comment is published straight away or held for moderation.

use serde::{Deserialize, Serialize};

const PROFANITY: &[&str] = &["damn", "crap", "shit", "fuck", "bastard", "asshole"];

const SPAM_TERMS: &[&str] = &[
    "click here",
    "buy now",
    "free money",
    "limited offer",
    "visit my website",
    "earn cash",
];

/// Ratios are only judged on comments with at least this many letters.
const MIN_LETTERS_FOR_CAPS_CHECK: usize = 10;
const MAX_UPPERCASE_RATIO: f64 = 0.7;

const MIN_CHARS_FOR_PUNCTUATION_CHECK: usize = 10;
const MAX_PUNCTUATION_RATIO: f64 = 0.3;

/// Reasons a comment was flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentFlag {
    Profanity,
    Spam,
    ExcessiveCapitals,
    ExcessivePunctuation,
}

/// Moderation status assigned to a rating comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationStatus {
    Approved,
    Flagged,
}

/// Result of screening a comment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentAssessment {
    pub flags: Vec<CommentFlag>,
}

impl CommentAssessment {
    pub fn is_flagged(&self) -> bool {
        !self.flags.is_empty()
    }

    pub fn moderation_status(&self) -> ModerationStatus {
        if self.is_flagged() {
            ModerationStatus::Flagged
        } else {
            ModerationStatus::Approved
        }
    }
}

/// Screens a rating comment for profanity, spam and shouting.
pub fn assess_comment(comment: &str) -> CommentAssessment {
    let mut flags = Vec::new();
    let lowered = comment.to_lowercase();

    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    if words.iter().any(|w| PROFANITY.contains(w)) {
        flags.push(CommentFlag::Profanity);
    }

    if SPAM_TERMS.iter().any(|term| lowered.contains(term)) {
        flags.push(CommentFlag::Spam);
    }

    let letters: Vec<char> = comment.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.len() >= MIN_LETTERS_FOR_CAPS_CHECK {
        let upper = letters.iter().filter(|c| c.is_uppercase()).count();
        if upper as f64 / letters.len() as f64 > MAX_UPPERCASE_RATIO {
            flags.push(CommentFlag::ExcessiveCapitals);
        }
    }

    let visible: Vec<char> = comment.chars().filter(|c| !c.is_whitespace()).collect();
    if visible.len() >= MIN_CHARS_FOR_PUNCTUATION_CHECK {
        let punctuation = visible.iter().filter(|c| c.is_ascii_punctuation()).count();
        if punctuation as f64 / visible.len() as f64 > MAX_PUNCTUATION_RATIO {
            flags.push(CommentFlag::ExcessivePunctuation);
        }
    }

    CommentAssessment { flags }
}
