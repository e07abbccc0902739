//! Sanitization of user-authored metadata strings.
//!
//! Titles and descriptions come straight from the hand-edited config file
//! and end up inside HTML meta tags, so they are trimmed, whitespace
//! collapsed, and HTML-escaped before emission. Descriptions are
//! additionally truncated to search-snippet length.

/// Maximum escaped description length before truncation kicks in.
const DESCRIPTION_MAX_CHARS: usize = 160;
/// Characters kept when truncating (plus a trailing `"..."`).
const DESCRIPTION_TRUNCATED_CHARS: usize = 157;

/// Sanitize a page title: trim, collapse internal whitespace runs to
/// single spaces, and HTML-escape `& < > " '`.
///
/// Empty input stays empty; this function never fails.
pub fn sanitize_title(input: &str) -> String {
    escape_html(&collapse_whitespace(input))
}

/// Sanitize a page description like [`sanitize_title`], then hard-truncate
/// to 157 characters plus `"..."` when the escaped result exceeds 160
/// characters.
pub fn sanitize_description(input: &str) -> String {
    let escaped = escape_html(&collapse_whitespace(input));

    if escaped.chars().count() <= DESCRIPTION_MAX_CHARS {
        return escaped;
    }

    let mut truncated: String = escaped.chars().take(DESCRIPTION_TRUNCATED_CHARS).collect();
    truncated.push_str("...");
    truncated
}

/// Trim and collapse internal whitespace runs to single spaces.
fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Escape the five HTML-reserved characters.
fn escape_html(s: &str) -> String {
    // Fast path: nothing to escape
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return s.to_string();
    }

    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_title_plain() {
        assert_eq!(sanitize_title("Acme Media"), "Acme Media");
    }

    #[test]
    fn test_sanitize_title_trims_and_collapses() {
        assert_eq!(sanitize_title("  Acme   Media \n team "), "Acme Media team");
    }

    #[test]
    fn test_sanitize_title_escapes() {
        assert_eq!(
            sanitize_title(r#"Tom & Jerry's <best> "show""#),
            "Tom &amp; Jerry&#39;s &lt;best&gt; &quot;show&quot;"
        );
    }

    #[test]
    fn test_sanitize_title_empty() {
        assert_eq!(sanitize_title(""), "");
        assert_eq!(sanitize_title("   "), "");
    }

    #[test]
    fn test_sanitize_description_short_unchanged() {
        // <= 160 chars after escaping: only whitespace collapse/escaping
        let input = "A  short description.";
        assert_eq!(sanitize_description(input), "A short description.");
    }

    #[test]
    fn test_sanitize_description_exactly_160() {
        let input = "a".repeat(160);
        let out = sanitize_description(&input);
        assert_eq!(out.chars().count(), 160);
        assert!(!out.ends_with("..."));
    }

    #[test]
    fn test_sanitize_description_truncates_to_157_plus_ellipsis() {
        let input = "a".repeat(200);
        let out = sanitize_description(&input);
        assert_eq!(out.chars().count(), 160);
        assert!(out.ends_with("..."));
        assert_eq!(out.trim_end_matches('.').chars().count(), 157);
    }

    #[test]
    fn test_sanitize_description_truncation_counts_escaped_length() {
        // 159 chars raw, but the ampersand escapes to 5 chars -> 163 escaped
        let input = format!("{}&", "a".repeat(158));
        let escaped_len = sanitize_description(&input).chars().count();
        assert_eq!(escaped_len, 160); // 157 + "..."
    }

    #[test]
    fn test_sanitize_description_empty() {
        assert_eq!(sanitize_description(""), "");
    }
}
