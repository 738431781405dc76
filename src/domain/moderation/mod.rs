//! Content moderation for free text.
//!
//! - `sanitizer` - HTML/script stripping
//! - `message_filter` - denylist rejection and sensitive-data redaction
//! - `review_heuristic` - non-blocking "needs human review" signal
//! - `comment_filter` - flag-only screening for rating comments

mod comment_filter;
mod message_filter;
mod review_heuristic;
mod sanitizer;

pub use comment_filter::{assess_comment, CommentAssessment, CommentFlag, ModerationStatus};
pub use message_filter::{
    ContentFilter, FilterVerdict, PROHIBITED_CONTENT_REASON, REDACTED_REASON, REDACTION_MARKER,
};
pub use review_heuristic::{review_reason, should_flag_for_moderation, ReviewReason};
pub use sanitizer::sanitize;

/// Message moderation pipeline applied before a message is stored.
#[derive(Debug, Clone, Default)]
pub struct ContentModerationFilter {
    filter: ContentFilter,
}

impl ContentModerationFilter {
    pub fn new(filter: ContentFilter) -> Self {
        Self { filter }
    }

    /// Strips markup.
    pub fn sanitize(&self, text: &str) -> String {
        sanitize(text)
    }

    /// Applies the denylist and sensitive-data redaction.
    pub fn filter(&self, text: &str) -> FilterVerdict {
        self.filter.filter(text)
    }

    /// Heuristic review signal; never blocks.
    pub fn should_flag_for_moderation(&self, text: &str) -> bool {
        should_flag_for_moderation(text)
    }

    /// Strips markup from a rating comment, then screens what is left.
    /// Comments are never redacted, only flagged.
    pub fn assess_rating_comment(&self, comment: &str) -> ScreenedComment {
        let comment = sanitize(comment);
        let assessment = assess_comment(&comment);
        ScreenedComment {
            comment,
            assessment,
        }
    }
}

/// A rating comment ready to store, with its screening result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenedComment {
    pub comment: String,
    pub assessment: CommentAssessment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_comments_are_sanitized_before_screening() {
        let screened = ContentModerationFilter::default()
            .assess_rating_comment("<p>Great <b>tiling</b> job</p><script>steal()</script>");

        assert_eq!(screened.comment, "Great tiling job");
        assert_eq!(screened.assessment.moderation_status(), ModerationStatus::Approved);
    }

    #[test]
    fn markup_does_not_hide_spam_terms() {
        let screened = ContentModerationFilter::default()
            .assess_rating_comment("<a href=\"x\">click</a> here for a discount");

        assert_eq!(screened.comment, "click here for a discount");
        assert_eq!(screened.assessment.flags, vec![CommentFlag::Spam]);
    }
}
