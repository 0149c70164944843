//! HTML helpers for the `<head>` fragment.
//!
//! - `escape_attr()` - attribute value escaping
//! - `is_void_element()` - elements rendered without a closing tag

use std::borrow::Cow;

/// Characters that require escaping inside a quoted attribute value.
const ESCAPE_CHARS: [char; 5] = ['<', '>', '&', '"', '\''];

#[inline]
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        _ => None,
    }
}

/// Escape an HTML attribute value.
///
/// Uses `Cow` to avoid allocation when no escaping is needed.
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    if !s.contains(ESCAPE_CHARS) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match escape_char(c) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Check if an HTML tag is a void element (no closing tag).
#[inline]
pub fn is_void_element(tag: &str) -> bool {
    matches!(
        tag.to_ascii_lowercase().as_str(),
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "source"
            | "track"
            | "wbr"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_attr_borrowed_when_clean() {
        assert!(matches!(escape_attr("https://example.com/a.js"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_attr_special_chars() {
        assert_eq!(escape_attr("a\"b&c"), "a&quot;b&amp;c");
        assert_eq!(escape_attr("it's <x>"), "it&#39;s &lt;x&gt;");
    }

    #[test]
    fn test_void_elements() {
        assert!(is_void_element("meta"));
        assert!(is_void_element("LINK"));
        assert!(!is_void_element("script"));
        assert!(!is_void_element("style"));
    }
}
