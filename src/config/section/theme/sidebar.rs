//! `theme.sidebar` navigation tree.
//!
//! Entries are, in reading order:
//!
//! ```toml
//! [theme]
//! sidebar = [
//!     "/1.Nuxt.js でのアプリケーション構築/",          # page, title from the page
//!     ["/実践演習/", "Exercises"],                     # page with explicit title
//!     { title = "補足資料", children = [              # group
//!         "/9.1.Promise と async await/",
//!     ] },
//! ]
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::utils::link::LinkKind;

const SIDEBAR: FieldPath = FieldPath::new("theme.sidebar");

/// One sidebar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SidebarEntry {
    /// Page path; the title is taken from the page.
    Page(String),
    /// Page path with an explicit title.
    Titled(String, String),
    /// Titled group of entries.
    Group(SidebarGroup),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarGroup {
    pub title: String,
    /// Optional landing page of the group itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default)]
    pub children: Vec<SidebarEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsable: Option<bool>,
}

impl SidebarEntry {
    #[cfg(test)]
    pub fn page(path: impl Into<String>) -> Self {
        Self::Page(path.into())
    }

    #[cfg(test)]
    pub fn group(title: impl Into<String>, children: Vec<SidebarEntry>) -> Self {
        Self::Group(SidebarGroup {
            title: title.into(),
            children,
            ..Default::default()
        })
    }

    /// Page path this entry links to, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Page(path) | Self::Titled(path, _) => Some(path),
            Self::Group(group) => group.path.as_deref(),
        }
    }
}

/// Page paths in reading order (depth-first, group path before children).
pub fn reading_order(entries: &[SidebarEntry]) -> Vec<&str> {
    let mut paths = Vec::new();
    collect_paths(entries, &mut paths);
    paths
}

fn collect_paths<'a>(entries: &'a [SidebarEntry], out: &mut Vec<&'a str>) {
    for entry in entries {
        if let Some(path) = entry.path() {
            out.push(path);
        }
        if let SidebarEntry::Group(group) = entry {
            collect_paths(&group.children, out);
        }
    }
}

pub fn validate_sidebar(entries: &[SidebarEntry], diag: &mut ConfigDiagnostics) {
    let mut seen = FxHashMap::default();
    validate_entries(entries, &SIDEBAR, &mut seen, diag);
}

fn validate_entries(
    entries: &[SidebarEntry],
    parent: &FieldPath,
    seen: &mut FxHashMap<String, FieldPath>,
    diag: &mut ConfigDiagnostics,
) {
    for (i, entry) in entries.iter().enumerate() {
        let field = parent.index(i);

        if let Some(path) = entry.path() {
            validate_path(path, &field, seen, diag);
        }

        if let SidebarEntry::Titled(_, title) = entry
            && title.trim().is_empty()
        {
            diag.error(field.clone(), "explicit title must not be empty");
        }

        if let SidebarEntry::Group(group) = entry {
            if group.title.trim().is_empty() {
                diag.error(field.child("title"), "must not be empty");
            }
            if group.children.is_empty() && group.path.is_none() {
                diag.error_with_hint(
                    field.child("children"),
                    "group has no pages",
                    "add child paths or remove the group",
                );
            }
            validate_entries(&group.children, &field.child("children"), seen, diag);
        }
    }
}

fn validate_path(
    path: &str,
    field: &FieldPath,
    seen: &mut FxHashMap<String, FieldPath>,
    diag: &mut ConfigDiagnostics,
) {
    match LinkKind::parse(path) {
        LinkKind::External(_) => return,
        LinkKind::SiteRoot(_) => {}
        _ => {
            diag.error_with_hint(
                field.clone(),
                format!("'{path}' is not a book path"),
                format!("use \"/{}\"", path.trim_start_matches("./")),
            );
            return;
        }
    }

    if let Some(first) = seen.get(path) {
        diag.error(
            field.clone(),
            format!("'{path}' already listed at {}", first.as_str()),
        );
    } else {
        seen.insert(path.to_string(), field.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_parse_all_shapes() {
        let config = test_parse_config(
            r#"[theme]
sidebar = [
    "/1.Nuxt.js でのアプリケーション構築/",
    ["/実践演習/", "Exercises"],
    { title = "補足資料", collapsable = false, children = [
        "/9.1.Promise と async await/",
        "/9.2.axios モジュールの使いかた/",
    ] },
]
"#,
        );
        let sidebar = &config.theme.sidebar;
        assert_eq!(sidebar.len(), 3);
        assert_eq!(
            sidebar[0],
            SidebarEntry::page("/1.Nuxt.js でのアプリケーション構築/")
        );
        assert_eq!(
            sidebar[1],
            SidebarEntry::Titled("/実践演習/".into(), "Exercises".into())
        );
        let SidebarEntry::Group(group) = &sidebar[2] else {
            panic!("expected group, got {:?}", sidebar[2]);
        };
        assert_eq!(group.title, "補足資料");
        assert_eq!(group.collapsable, Some(false));
        assert_eq!(group.children.len(), 2);
    }

    #[test]
    fn test_reading_order_depth_first() {
        let entries = vec![
            SidebarEntry::page("/a/"),
            SidebarEntry::Group(SidebarGroup {
                title: "G".into(),
                path: Some("/g/".into()),
                children: vec![
                    SidebarEntry::page("/g/1"),
                    SidebarEntry::group("Inner", vec![SidebarEntry::page("/g/inner")]),
                ],
                collapsable: None,
            }),
            SidebarEntry::page("/z/"),
        ];
        assert_eq!(
            reading_order(&entries),
            ["/a/", "/g/", "/g/1", "/g/inner", "/z/"]
        );
    }

    #[test]
    fn test_validate_ok() {
        let entries = vec![
            SidebarEntry::page("/"),
            SidebarEntry::page("https://github.com/lec-cafe/book_laravel_api"),
            SidebarEntry::group("補足資料", vec![SidebarEntry::page("/9.3.Vuex のモジュール化/")]),
        ];
        let mut diag = ConfigDiagnostics::new();
        validate_sidebar(&entries, &mut diag);
        assert!(diag.is_empty(), "{diag}");
    }

    #[test]
    fn test_validate_errors() {
        let entries = vec![
            SidebarEntry::page("guide/"),
            SidebarEntry::page("/a/"),
            SidebarEntry::group("", vec![]),
            SidebarEntry::group("Dup", vec![SidebarEntry::page("/a/")]),
            SidebarEntry::Titled("/b/".into(), "".into()),
        ];
        let mut diag = ConfigDiagnostics::new();
        validate_sidebar(&entries, &mut diag);
        let fields: Vec<_> = diag.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            [
                "theme.sidebar[0]",
                "theme.sidebar[2].title",
                "theme.sidebar[2].children",
                "theme.sidebar[3].children[0]",
                "theme.sidebar[4]",
            ]
        );
        assert!(diag.errors()[3].message.contains("theme.sidebar[1]"));
    }
}
