//! UTF-8-safe string helpers shared by the formatting and page modules

use regex::Regex;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("TAG_RE: hardcoded regex is valid"));

/// Safely truncate a string to a maximum number of CHARACTERS (not bytes).
///
/// This function respects UTF-8 character boundaries and will never panic,
/// even with multi-byte characters like rupee signs or emoji.
///
/// # Examples
/// ```
/// # use gic_site::utils::string_utils::safe_truncate_chars;
/// assert_eq!(safe_truncate_chars("Hello, World!", 5), "Hello");
/// assert_eq!(safe_truncate_chars("₹₹₹", 2), "₹₹");
/// assert_eq!(safe_truncate_chars("Hi", 100), "Hi");
/// ```
#[inline]
pub fn safe_truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        None => s,
        Some((byte_idx, _)) => &s[..byte_idx],
    }
}

/// Remove every `<...>` tag, leaving only text
///
/// Entities are left encoded; callers display the result as text inside
/// markup that is escaped again anyway.
pub fn strip_tags(html: &str) -> String {
    TAG_RE.replace_all(html, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_nested_tags() {
        assert_eq!(strip_tags("<p>Hello <b>there</b></p>"), "Hello there");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(safe_truncate_chars("ünïcödé", 3), "ünï");
    }
}
