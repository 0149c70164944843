//! Heading text to URL fragment slugs.
//!
//! The pipeline is fixed: trim, lowercase, collapse whitespace runs into a
//! single `-`, then (for [`SlugStyle::Uri`]) percent-encode every byte
//! outside the `encodeURIComponent` unreserved set:
//!
//! ```text
//! A-Z a-z 0-9 - _ . ! ~ * ' ( )
//! ```
//!
//! Encoding is byte-wise over UTF-8 with uppercase hex, so `"日本"` becomes
//! `"%E6%97%A5%E6%9C%AC"`.
//!
//! Slugs are not idempotent: slugifying an already encoded slug encodes its
//! `%` signs again (`"a%2Fb"` -> `"a%252fb"`).

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};

/// Bytes left alone by `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Slug style for heading anchors.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SlugStyle {
    /// Percent-encoded with the `encodeURIComponent` alphabet (default).
    #[default]
    Uri,
    /// Lowercased and hyphenated, Unicode kept as-is.
    Plain,
}

impl SlugStyle {
    /// Slugify `text` in this style.
    pub fn apply(self, text: &str) -> String {
        match self {
            Self::Uri => slugify(text),
            Self::Plain => slugify_plain(text),
        }
    }

    /// Equivalent JavaScript arrow function, for the exported site config.
    pub const fn js_function(self) -> &'static str {
        match self {
            Self::Uri => {
                "(s) => encodeURIComponent(String(s).trim().toLowerCase().replace(/\\s+/g, '-'))"
            }
            Self::Plain => "(s) => String(s).trim().toLowerCase().replace(/\\s+/g, '-')",
        }
    }
}

/// Slugify heading text into a percent-encoded URL fragment.
///
/// # Examples
/// ```ignore
/// slugify("  Hello World  ") -> "hello-world"
/// slugify("A/B Test")        -> "a%2Fb-test"
/// slugify("")                -> ""
/// ```
pub fn slugify(text: &str) -> String {
    utf8_percent_encode(&slugify_plain(text), URI_COMPONENT).to_string()
}

/// Slugify without percent-encoding.
pub fn slugify_plain(text: &str) -> String {
    hyphenate(&text.trim_matches(is_js_whitespace).to_lowercase())
}

/// ECMAScript `WhiteSpace` and `LineTerminator`, the set behind `trim()` and `\s`.
///
/// Differs from [`char::is_whitespace`]: U+FEFF is included, U+0085 is not.
const fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Replace each run of whitespace with a single `-`.
fn hyphenate(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if is_js_whitespace(c) {
            if !in_space {
                out.push('-');
                in_space = true;
            }
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_and_lowercase() {
        assert_eq!(slugify("  Hello World  "), "hello-world");
    }

    #[test]
    fn test_reserved_chars_encoded() {
        assert_eq!(slugify("A/B Test"), "a%2Fb-test");
        assert_eq!(slugify("a?b&c=d"), "a%3Fb%26c%3Dd");
        assert_eq!(slugify("#hash"), "%23hash");
    }

    #[test]
    fn test_unreserved_chars_kept() {
        assert_eq!(slugify("it's (fine)!"), "it's-(fine)!");
        assert_eq!(slugify("a_b.c~d*e"), "a_b.c~d*e");
    }

    #[test]
    fn test_empty_and_blank() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("   \t\n "), "");
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(slugify("a \t\n b"), "a-b");
        // Ideographic space counts as whitespace
        assert_eq!(slugify_plain("認証\u{3000}設定"), "認証-設定");
    }

    #[test]
    fn test_byte_order_mark_is_whitespace() {
        assert_eq!(slugify("a\u{FEFF}b"), "a-b");
        assert_eq!(slugify("\u{FEFF}Title"), "title");
    }

    #[test]
    fn test_next_line_is_not_whitespace() {
        assert_eq!(slugify("a\u{85}b"), "a%C2%85b");
        assert_eq!(slugify("\u{85}a"), "%C2%85a");
    }

    #[test]
    fn test_non_ascii_utf8_bytes() {
        assert_eq!(slugify("日本"), "%E6%97%A5%E6%9C%AC");
        assert_eq!(
            slugify("Vuex Store の永続化"),
            "vuex-store-%E3%81%AE%E6%B0%B8%E7%B6%9A%E5%8C%96"
        );
    }

    #[test]
    fn test_deterministic() {
        let text = "Promise と async await";
        assert_eq!(slugify(text), slugify(text));
    }

    #[test]
    fn test_not_idempotent() {
        let once = slugify("A/B");
        assert_eq!(once, "a%2Fb");
        assert_eq!(slugify(&once), "a%252fb");
    }

    #[test]
    fn test_style_apply() {
        assert_eq!(SlugStyle::Uri.apply("Nuxt.js 入門"), slugify("Nuxt.js 入門"));
        assert_eq!(SlugStyle::Plain.apply("Nuxt.js 入門"), "nuxt.js-入門");
        assert_eq!(SlugStyle::default(), SlugStyle::Uri);
    }

    #[test]
    fn test_js_function_shape() {
        assert!(SlugStyle::Uri.js_function().contains("encodeURIComponent"));
        assert!(!SlugStyle::Plain.js_function().contains("encodeURIComponent"));
    }
}
