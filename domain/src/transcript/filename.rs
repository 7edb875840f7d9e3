//! File names for persisted transcripts.

use chrono::NaiveDate;

/// Maximum slug length, in characters
pub const MAX_SLUG_CHARS: usize = 240;

/// Slug used when the topic has no usable characters
pub const FALLBACK_SLUG: &str = "debate";

/// Convert a topic into a short, filename-safe slug.
///
/// Lowercases and trims the topic, drops punctuation, and collapses runs of
/// whitespace and hyphens into a single `_`. Letters outside ASCII are kept.
pub fn topic_slug(topic: &str) -> String {
    let lowered = topic.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut in_separator = false;

    for c in lowered.trim().chars() {
        if c.is_whitespace() || c == '-' {
            if !in_separator {
                slug.push('_');
                in_separator = true;
            }
        } else if c.is_alphanumeric() || c == '_' {
            slug.push(c);
            in_separator = false;
        }
    }

    let slug: String = slug.chars().take(MAX_SLUG_CHARS).collect();
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// `YYYY-MM-DD_<slug>.md`
pub fn transcript_file_name(topic: &str, date: NaiveDate) -> String {
    format!("{}_{}.md", date.format("%Y-%m-%d"), topic_slug(topic))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_basic() {
        assert_eq!(topic_slug("What is justice?"), "what_is_justice");
        assert_eq!(topic_slug("  State vs Anarchy  "), "state_vs_anarchy");
        assert_eq!(topic_slug("What is justice? Why?"), "what_is_justice_why");
    }

    #[test]
    fn test_slug_strips_punctuation() {
        assert_eq!(topic_slug("Hello, World!"), "hello_world");
        assert_eq!(topic_slug("Café & Co."), "café_co");
        assert_eq!(topic_slug("a-b c"), "a_b_c");
        assert_eq!(topic_slug("a -- b"), "a_b");
    }

    #[test]
    fn test_slug_fallback() {
        assert_eq!(topic_slug(""), "debate");
        assert_eq!(topic_slug("???"), "debate");
    }

    #[test]
    fn test_slug_length_cap() {
        let slug = topic_slug(&"a".repeat(300));
        assert_eq!(slug.chars().count(), MAX_SLUG_CHARS);
        assert_eq!(slug, "a".repeat(240));
    }

    #[test]
    fn test_file_name_format() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let name = transcript_file_name("What is justice? Why?", date);
        assert_eq!(name, "2026-03-14_what_is_justice_why.md");
        assert!(!name.contains(' '));
        assert!(!name.contains('?'));
        assert!(!name.contains(':'));
    }
}
