//! Free-text cleanup for externally sourced content.
//!
//! Exercise descriptions arrive from a third-party API with markup fragments,
//! HTML entities, and mojibake (UTF-8 punctuation that was double-encoded and
//! read back as Latin-1). Both repair tables are fixed and applied in order;
//! the order is load-bearing, since later substring replacements can be
//! shadowed by earlier ones.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::defaults::{NORMALIZED_MAX_LEN, NORMALIZED_MIN_LEN};

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag regex"));

/// Known mojibake artifacts and their repairs.
const MOJIBAKE: &[(&str, &str)] = &[
    ("â€™", "'"),
    ("â€œ", "\""),
    ("â€", "\""),
    ("â€“", "–"),
    ("â€”", "—"),
    ("â€¦", "..."),
    ("Â ", " "),
    ("Ã©", "é"),
    ("Ã¨", "è"),
    ("Ã ", "à"),
    ("Ã´", "ô"),
];

/// HTML named/numeric entities decoded to their literal characters.
const ENTITIES: &[(&str, &str)] = &[
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&apos;", "'"),
    ("&#x27;", "'"),
    ("&rsquo;", "'"),
    ("&lsquo;", "'"),
    ("&rdquo;", "\""),
    ("&ldquo;", "\""),
    ("&ndash;", "–"),
    ("&mdash;", "—"),
    ("&hellip;", "..."),
    ("&nbsp;", " "),
];

/// Remove markup-tag sequences and surrounding whitespace.
pub fn strip_tags(raw: &str) -> String {
    TAG_RE.replace_all(raw, "").trim().to_string()
}

/// Clean a free-text field from an external source. Pure and total: malformed
/// or empty input yields an empty string, never an error.
///
/// Results shorter than [`NORMALIZED_MIN_LEN`] chars are treated as unusable;
/// results longer than [`NORMALIZED_MAX_LEN`] chars are truncated with an
/// ellipsis marker.
pub fn normalize(raw: &str) -> String {
    let mut text = strip_tags(raw);
    for (artifact, repaired) in MOJIBAKE {
        text = text.replace(artifact, repaired);
    }
    for (entity, literal) in ENTITIES {
        text = text.replace(entity, literal);
    }

    let len = text.chars().count();
    if len < NORMALIZED_MIN_LEN {
        return String::new();
    }
    if len > NORMALIZED_MAX_LEN {
        let mut truncated: String = text.chars().take(NORMALIZED_MAX_LEN).collect();
        truncated.push_str("...");
        return truncated;
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_tags_and_decodes_entities() {
        assert_eq!(normalize("<b>Great&nbsp;move</b>"), "Great move");
    }

    #[test]
    fn test_strips_nested_markup() {
        assert_eq!(
            normalize("<p>Keep your <em>core</em> braced</p>"),
            "Keep your core braced"
        );
    }

    #[test]
    fn test_short_text_is_unusable() {
        assert_eq!(normalize("hi"), "");
    }

    #[test]
    fn test_empty_input_yields_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_markup_only_input_yields_empty() {
        assert_eq!(normalize("<div><br/></div>"), "");
    }

    #[test]
    fn test_long_text_truncated_with_ellipsis() {
        let input = "x".repeat(150);
        let output = normalize(&input);
        assert_eq!(output.chars().count(), 103);
        assert!(output.ends_with("..."));
    }

    #[test]
    fn test_exactly_hundred_chars_untouched() {
        let input = "y".repeat(100);
        assert_eq!(normalize(&input), input);
    }

    #[test]
    fn test_mojibake_apostrophe_repaired() {
        assert_eq!(normalize("donâ€™t lock out"), "don't lock out");
    }

    #[test]
    fn test_mojibake_accents_repaired() {
        assert_eq!(normalize("pliÃ© squat hold"), "plié squat hold");
    }

    #[test]
    fn test_entity_table_applied_after_mojibake() {
        assert_eq!(normalize("lift &amp; lower slowly"), "lift & lower slowly");
        assert_eq!(normalize("rest&hellip; then go"), "rest... then go");
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        assert_eq!(normalize("  steady pace  "), "steady pace");
    }

    #[test]
    fn test_length_check_after_decoding() {
        // Five chars only once the entity collapses to one.
        assert_eq!(normalize("a&amp;bcd"), "a&bcd");
    }

    #[test]
    fn test_strip_tags_keeps_short_text() {
        // Unlike normalize, strip_tags applies no length policy.
        assert_eq!(strip_tags("<b>hi</b>"), "hi");
    }
}
