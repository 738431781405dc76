//! HTML stripping for user-supplied text.

use once_cell::sync::Lazy;
use regex::Regex;

/// `<script ...> ... </script>` including everything in between.
static SCRIPT_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("script block pattern is valid")
});

/// Any remaining tag, opening or closing.
static HTML_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("html tag pattern is valid"));

/// Strips markup from `text`.
///
/// Script blocks are removed together with their body; every other tag is
/// removed while its inner text is kept. Surrounding whitespace is trimmed,
/// so markup-only input sanitizes to an empty string.
pub fn sanitize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let without_scripts = SCRIPT_BLOCK.replace_all(text, "");
    let without_tags = HTML_TAG.replace_all(&without_scripts, "");
    without_tags.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_script_bodies() {
        assert_eq!(sanitize("<b>hi</b><script>evil()</script>there"), "hithere");
    }

    #[test]
    fn script_removal_is_case_insensitive_and_multiline() {
        let input = "before<SCRIPT type=\"text/javascript\">\nalert(1);\n</Script>after";
        assert_eq!(sanitize(input), "beforeafter");
    }

    #[test]
    fn keeps_plain_text_untouched() {
        assert_eq!(sanitize("Can you come at 3pm?"), "Can you come at 3pm?");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn markup_only_input_sanitizes_to_empty() {
        assert_eq!(sanitize("<p> </p><script>x()</script>"), "");
    }

    #[test]
    fn strips_attributes_and_self_closing_tags() {
        assert_eq!(
            sanitize("<a href=\"http://x.test\" onclick=\"steal()\">link</a><br/>ok"),
            "linkok"
        );
    }
}
