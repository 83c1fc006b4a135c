// src/utils/text.rs

//! Text normalization utilities.

/// Maximum title length in characters, ellipsis included.
pub const MAX_TITLE_LEN: usize = 100;

const ELLIPSIS: &str = "...";

/// Collapse internal whitespace runs to single spaces and trim the ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cap a title at [`MAX_TITLE_LEN`] characters.
///
/// Longer titles keep their first 97 characters and gain a three-character
/// ellipsis marker. Counting is by `char`, so multi-byte text is never cut
/// mid-character.
pub fn truncate_title(title: &str) -> String {
    if title.chars().count() <= MAX_TITLE_LEN {
        return title.to_string();
    }
    let kept: String = title.chars().take(MAX_TITLE_LEN - ELLIPSIS.len()).collect();
    format!("{}{}", kept, ELLIPSIS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  Потрібна  допомога \n"), "Потрібна допомога");
        assert_eq!(normalize_whitespace("plain"), "plain");
    }

    #[test]
    fn test_short_title_unchanged() {
        let title = "a".repeat(100);
        assert_eq!(truncate_title(&title), title);
    }

    #[test]
    fn test_long_title_truncated_to_exactly_100() {
        let title = "a".repeat(101);
        let truncated = truncate_title(&title);
        assert_eq!(truncated.chars().count(), 100);
        assert!(truncated.ends_with("..."));
        assert!(title.starts_with(truncated.trim_end_matches("...")));
    }

    #[test]
    fn test_truncation_counts_chars_not_bytes() {
        let title = "ї".repeat(150);
        let truncated = truncate_title(&title);
        assert_eq!(truncated.chars().count(), 100);
        assert_eq!(
            truncated.trim_end_matches("..."),
            "ї".repeat(97)
        );
    }
}
