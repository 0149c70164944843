//! `[[theme.nav]]` top navigation entries.
//!
//! # Example
//!
//! ```toml
//! [[theme.nav]]
//! text = "Lec Café"
//! link = "https://leccafe.connpass.com/"
//!
//! [[theme.nav]]
//! text = "Chapters"
//! items = [
//!     { text = "Nuxt.js", link = "/1.Nuxt.js でのアプリケーション構築/" },
//! ]
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::utils::link::LinkKind;

const NAV: FieldPath = FieldPath::new("theme.nav");

/// A navigation link, or a dropdown when `items` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<NavItem>,
}

impl NavItem {
    #[cfg(test)]
    pub fn link(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: Some(link.into()),
            items: Vec::new(),
        }
    }

    /// Internal links of this entry and its dropdown, depth-first.
    pub fn internal_links(&self) -> Vec<&str> {
        let mut links = Vec::new();
        if let Some(link) = self.link.as_deref()
            && matches!(LinkKind::parse(link), LinkKind::SiteRoot(_))
        {
            links.push(link);
        }
        for item in &self.items {
            links.extend(item.internal_links());
        }
        links
    }
}

pub fn validate_nav(nav: &[NavItem], diag: &mut ConfigDiagnostics) {
    for (i, item) in nav.iter().enumerate() {
        validate_item(item, NAV.index(i), diag);
    }
}

fn validate_item(item: &NavItem, field: FieldPath, diag: &mut ConfigDiagnostics) {
    if item.text.trim().is_empty() {
        diag.error(field.child("text"), "must not be empty");
    }

    match (&item.link, item.items.is_empty()) {
        (None, true) => diag.error_with_hint(
            field.clone(),
            "entry has neither `link` nor `items`",
            "add `link = \"/path/\"` or a dropdown `items = [...]`",
        ),
        (Some(_), false) => diag.error(field.clone(), "`link` and `items` are exclusive"),
        _ => {}
    }

    if let Some(link) = &item.link {
        match LinkKind::parse(link) {
            LinkKind::External(_) | LinkKind::SiteRoot(_) => {}
            _ => diag.error_with_hint(
                field.child("link"),
                format!("'{link}' is neither a URL nor a book path"),
                "book paths start with '/'",
            ),
        }
    }

    for (i, child) in item.items.iter().enumerate() {
        validate_item(child, field.child("items").index(i), diag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_parse_links_and_dropdown() {
        let config = test_parse_config(
            r#"[[theme.nav]]
text = "Lec Café"
link = "https://leccafe.connpass.com/"

[[theme.nav]]
text = "Chapters"
items = [
    { text = "Nuxt.js", link = "/1.Nuxt.js でのアプリケーション構築/" },
    { text = "Auth", link = "/5.認証/" },
]
"#,
        );
        let nav = &config.theme.nav;
        assert_eq!(nav.len(), 2);
        assert_eq!(nav[0].link.as_deref(), Some("https://leccafe.connpass.com/"));
        assert_eq!(nav[1].items.len(), 2);
        assert!(nav[0].internal_links().is_empty());
        assert_eq!(
            nav[1].internal_links(),
            ["/1.Nuxt.js でのアプリケーション構築/", "/5.認証/"]
        );
    }

    #[test]
    fn test_validate_ok() {
        let nav = vec![NavItem::link("Lec Café", "https://leccafe.connpass.com/")];
        let mut diag = ConfigDiagnostics::new();
        validate_nav(&nav, &mut diag);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_validate_errors() {
        let nav = vec![
            NavItem {
                text: " ".into(),
                ..Default::default()
            },
            NavItem {
                text: "Both".into(),
                link: Some("/a/".into()),
                items: vec![NavItem::link("Child", "guide")],
            },
        ];
        let mut diag = ConfigDiagnostics::new();
        validate_nav(&nav, &mut diag);
        let fields: Vec<_> = diag.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            [
                "theme.nav[0].text",
                "theme.nav[0]",
                "theme.nav[1]",
                "theme.nav[1].items[0].link"
            ]
        );
    }
}
