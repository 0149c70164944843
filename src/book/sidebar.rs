//! Sidebar resolved against the content tree.
//!
//! Each page entry is matched to its markdown file and titled:
//! explicit title, else front matter `title:`, else the first `#` heading,
//! else the link itself. Missing pages stay in the tree with an error so a
//! single bad entry never hides the rest of the book.

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::content::{ResolveError, resolve_page};
use super::edit::RepoLinks;
use super::headings::scan_page;
use crate::config::section::theme::reading_order;
use crate::config::{BookConfig, SidebarEntry};
use crate::utils::link::is_external_link;

/// A page entry of the resolved sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPage {
    pub link: String,
    pub title: String,
    /// File relative to `docs_dir`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResolvedPage {
    pub fn is_resolved(&self) -> bool {
        self.error.is_none()
    }

    pub fn is_external(&self) -> bool {
        is_external_link(&self.link)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SidebarItem {
    Page(ResolvedPage),
    Group {
        title: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        page: Option<ResolvedPage>,
        children: Vec<SidebarItem>,
    },
}

/// The whole sidebar, resolved.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SidebarTree {
    pub items: Vec<SidebarItem>,
    /// Page links in reading order.
    pub order: Vec<String>,
}

impl SidebarTree {
    /// Resolve every sidebar entry of `config` against its `docs_dir`.
    pub fn resolve(config: &BookConfig) -> Self {
        let docs_dir = config.docs_dir();
        let repo = RepoLinks::from_theme(&config.theme);
        let order: Vec<String> = reading_order(&config.theme.sidebar)
            .into_iter()
            .map(str::to_string)
            .collect();

        // Pages are independent reads; resolve them in parallel.
        let pages: FxHashMap<String, ResolvedPage> = order
            .par_iter()
            .map(|link| {
                let page = resolve_entry(link, &docs_dir, config, repo.as_ref());
                (link.clone(), page)
            })
            .collect();

        let items = build_items(&config.theme.sidebar, &pages);
        Self { items, order }
    }

    /// All page entries in reading order.
    pub fn pages(&self) -> Vec<&ResolvedPage> {
        let mut pages = Vec::new();
        collect_pages(&self.items, &mut pages);
        pages
    }

    /// Entries that could not be matched to a file.
    pub fn unresolved(&self) -> Vec<&ResolvedPage> {
        self.pages()
            .into_iter()
            .filter(|page| !page.is_resolved())
            .collect()
    }

    /// Previous and next internal page around `link` in reading order.
    pub fn neighbors(&self, link: &str) -> (Option<&ResolvedPage>, Option<&ResolvedPage>) {
        let pages: Vec<_> = self
            .pages()
            .into_iter()
            .filter(|page| !page.is_external())
            .collect();
        let Some(pos) = pages.iter().position(|page| page.link == link) else {
            return (None, None);
        };
        let prev = pos.checked_sub(1).map(|i| pages[i]);
        let next = pages.get(pos + 1).copied();
        (prev, next)
    }
}

fn resolve_entry(
    link: &str,
    docs_dir: &Path,
    config: &BookConfig,
    repo: Option<&RepoLinks>,
) -> ResolvedPage {
    let lang = config
        .locales
        .resolve(link)
        .map(|(_, locale)| locale.lang.clone());

    match resolve_page(docs_dir, link) {
        Ok(file) => {
            let title = fs::read_to_string(docs_dir.join(&file))
                .ok()
                .and_then(|content| scan_page(&content).title().map(str::to_string))
                .unwrap_or_else(|| link.to_string());
            let edit_url = repo.and_then(|repo| repo.edit_url(&file));
            ResolvedPage {
                link: link.to_string(),
                title,
                file: Some(file),
                lang,
                edit_url,
                error: None,
            }
        }
        Err(ResolveError::External) => ResolvedPage {
            link: link.to_string(),
            title: link.to_string(),
            file: None,
            lang: None,
            edit_url: None,
            error: None,
        },
        Err(err) => ResolvedPage {
            link: link.to_string(),
            title: link.to_string(),
            file: None,
            lang,
            edit_url: None,
            error: Some(err.to_string()),
        },
    }
}

fn build_items(
    entries: &[SidebarEntry],
    pages: &FxHashMap<String, ResolvedPage>,
) -> Vec<SidebarItem> {
    entries
        .iter()
        .map(|entry| match entry {
            SidebarEntry::Page(link) => SidebarItem::Page(lookup(pages, link, None)),
            SidebarEntry::Titled(link, title) => {
                SidebarItem::Page(lookup(pages, link, Some(title)))
            }
            SidebarEntry::Group(group) => SidebarItem::Group {
                title: group.title.clone(),
                page: group.path.as_deref().map(|link| lookup(pages, link, None)),
                children: build_items(&group.children, pages),
            },
        })
        .collect()
}

fn lookup(
    pages: &FxHashMap<String, ResolvedPage>,
    link: &str,
    title: Option<&String>,
) -> ResolvedPage {
    let mut page = pages.get(link).cloned().unwrap_or_else(|| ResolvedPage {
        link: link.to_string(),
        title: link.to_string(),
        file: None,
        lang: None,
        edit_url: None,
        error: Some("not in reading order".to_string()),
    });
    if let Some(title) = title {
        page.title = title.clone();
    }
    page
}

fn collect_pages<'a>(items: &'a [SidebarItem], out: &mut Vec<&'a ResolvedPage>) {
    for item in items {
        match item {
            SidebarItem::Page(page) => out.push(page),
            SidebarItem::Group { page, children, .. } => {
                if let Some(page) = page {
                    out.push(page);
                }
                collect_pages(children, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use tempfile::TempDir;

    fn book() -> (TempDir, BookConfig) {
        let temp = TempDir::new().unwrap();
        let docs = temp.path().join("books");
        for (dir, content) in [
            ("1.Nuxt.js でのアプリケーション構築", "# Nuxt.js でのアプリケーション構築\n"),
            ("5.認証", "---\ntitle: 認証\n---\n# Auth\n"),
            ("9.1.Promise と async await", "no heading here\n"),
        ] {
            fs::create_dir_all(docs.join(dir)).unwrap();
            fs::write(docs.join(dir).join("README.md"), content).unwrap();
        }

        let mut config = test_parse_config(
            r#"[locales."/"]
lang = "ja"

[theme]
repo = "lec-cafe/book_laravel_api"
docs_dir = "books"
edit_links = true
sidebar = [
    "/1.Nuxt.js でのアプリケーション構築/",
    ["/5.認証/", "Authentication"],
    "/6.SSRの設定/",
    "https://leccafe.connpass.com/",
    { title = "補足資料", children = ["/9.1.Promise と async await/"] },
]
"#,
        );
        config.set_root(temp.path());
        (temp, config)
    }

    #[test]
    fn test_resolve_titles() {
        let (_temp, config) = book();
        let tree = SidebarTree::resolve(&config);
        let pages = tree.pages();
        assert_eq!(pages.len(), 5);

        assert_eq!(pages[0].title, "Nuxt.js でのアプリケーション構築");
        assert_eq!(pages[0].lang.as_deref(), Some("ja"));
        assert_eq!(pages[1].title, "Authentication");
        // No heading: falls back to the link
        assert_eq!(pages[4].title, "/9.1.Promise と async await/");
        assert_eq!(
            pages[4].file.as_deref(),
            Some(Path::new("9.1.Promise と async await/README.md"))
        );
    }

    #[test]
    fn test_unresolved_and_external() {
        let (_temp, config) = book();
        let tree = SidebarTree::resolve(&config);

        let unresolved = tree.unresolved();
        assert_eq!(unresolved.len(), 1);
        assert_eq!(unresolved[0].link, "/6.SSRの設定/");
        assert!(unresolved[0].error.as_deref().unwrap().contains("6.SSRの設定/README.md"));

        let external = &tree.pages()[3];
        assert!(external.is_external());
        assert!(external.is_resolved());
        assert!(external.file.is_none());
    }

    #[test]
    fn test_group_structure_and_order() {
        let (_temp, config) = book();
        let tree = SidebarTree::resolve(&config);
        assert_eq!(tree.order.len(), 5);
        assert_eq!(tree.order[4], "/9.1.Promise と async await/");

        let SidebarItem::Group { title, page, children } = &tree.items[4] else {
            panic!("expected group");
        };
        assert_eq!(title, "補足資料");
        assert!(page.is_none());
        assert_eq!(children.len(), 1);
    }

    #[test]
    fn test_neighbors_skip_external() {
        let (_temp, config) = book();
        let tree = SidebarTree::resolve(&config);

        let (prev, next) = tree.neighbors("/1.Nuxt.js でのアプリケーション構築/");
        assert!(prev.is_none());
        assert_eq!(next.unwrap().link, "/5.認証/");

        let (prev, next) = tree.neighbors("/6.SSRの設定/");
        assert_eq!(prev.unwrap().link, "/5.認証/");
        assert_eq!(next.unwrap().link, "/9.1.Promise と async await/");

        assert_eq!(tree.neighbors("/nope/"), (None, None));
    }

    #[test]
    fn test_edit_urls() {
        let (_temp, config) = book();
        let tree = SidebarTree::resolve(&config);
        let pages = tree.pages();
        assert!(
            pages[1]
                .edit_url
                .as_deref()
                .unwrap()
                .starts_with("https://github.com/lec-cafe/book_laravel_api/edit/master/books/5.")
        );
        assert!(pages[2].edit_url.is_none());
    }
}
