//! `head` entries: extra elements injected into every page's `<head>`.
//!
//! # Example
//!
//! ```toml
//! head = [
//!     ["script", { src = "https://static.codepen.io/assets/embed/ei.js" }],
//!     ["meta", { name = "theme-color", content = "#3eaf7c" }],
//! ]
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write;
use std::sync::LazyLock;

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::utils::html::{escape_attr, is_void_element};

const HEAD: FieldPath = FieldPath::new("head");

/// Tag and attribute names accepted in `head`.
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9-]*$").expect("valid regex"));

/// A single `(tag, attributes)` pair.
///
/// Serialized as a 2-element array, the shape the site engine expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadTag(pub String, #[serde(default)] pub BTreeMap<String, String>);

impl HeadTag {
    #[cfg(test)]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into(), BTreeMap::new())
    }

    #[cfg(test)]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.1.insert(name.into(), value.into());
        self
    }

    #[inline]
    pub fn tag(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn attrs(&self) -> &BTreeMap<String, String> {
        &self.1
    }

    /// Render as an HTML element. Attributes are emitted in key order.
    pub fn to_html(&self) -> String {
        let mut html = format!("<{}", self.tag());
        for (name, value) in self.attrs() {
            let _ = write!(html, " {}=\"{}\"", name, escape_attr(value));
        }
        html.push('>');
        if !is_void_element(self.tag()) {
            let _ = write!(html, "</{}>", self.tag());
        }
        html
    }
}

/// Render all entries, one element per line.
pub fn render_head(tags: &[HeadTag]) -> String {
    tags.iter()
        .map(HeadTag::to_html)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Validate tag and attribute names.
pub fn validate_head(tags: &[HeadTag], diag: &mut ConfigDiagnostics) {
    for (i, tag) in tags.iter().enumerate() {
        let field = HEAD.index(i);
        if !NAME_RE.is_match(tag.tag()) {
            diag.error(field.clone(), format!("invalid tag name '{}'", tag.tag()));
        }
        for name in tag.attrs().keys() {
            if !NAME_RE.is_match(name) {
                diag.error(field.clone(), format!("invalid attribute name '{name}'"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_parse_tuple_entries() {
        let config = test_parse_config(
            r##"head = [
    ["script", { src = "https://static.codepen.io/assets/embed/ei.js" }],
    ["meta", { name = "theme-color", content = "#3eaf7c" }],
    ["noscript"],
]"##,
        );
        assert_eq!(config.head.len(), 3);
        assert_eq!(config.head[0].tag(), "script");
        assert_eq!(
            config.head[0].attrs().get("src").map(String::as_str),
            Some("https://static.codepen.io/assets/embed/ei.js")
        );
        assert!(config.head[2].attrs().is_empty());
    }

    #[test]
    fn test_to_html_script_closed() {
        let tag = HeadTag::new("script").with_attr("src", "https://static.codepen.io/assets/embed/ei.js");
        assert_eq!(
            tag.to_html(),
            "<script src=\"https://static.codepen.io/assets/embed/ei.js\"></script>"
        );
    }

    #[test]
    fn test_to_html_void_and_escaped() {
        let tag = HeadTag::new("meta")
            .with_attr("name", "description")
            .with_attr("content", "\"quoted\" & <b>");
        assert_eq!(
            tag.to_html(),
            "<meta content=\"&quot;quoted&quot; &amp; &lt;b&gt;\" name=\"description\">"
        );
    }

    #[test]
    fn test_render_head_joins_lines() {
        let tags = vec![
            HeadTag::new("link").with_attr("rel", "icon").with_attr("href", "/favicon.png"),
            HeadTag::new("script").with_attr("src", "/a.js"),
        ];
        let html = render_head(&tags);
        assert_eq!(html.lines().count(), 2);
        assert!(html.starts_with("<link href=\"/favicon.png\" rel=\"icon\">"));
    }

    #[test]
    fn test_validate_names() {
        let tags = vec![
            HeadTag::new("script").with_attr("data-id", "x"),
            HeadTag::new("<bad>"),
            HeadTag::new("meta").with_attr("on click", "x"),
        ];
        let mut diag = ConfigDiagnostics::new();
        validate_head(&tags, &mut diag);
        assert_eq!(diag.len(), 2);
        assert_eq!(diag.errors()[0].field.as_str(), "head[1]");
        assert_eq!(diag.errors()[1].field.as_str(), "head[2]");
    }
}
