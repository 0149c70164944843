//! Book directory structure creation.
//!
//! Creates `docs_dir` with one page per sidebar entry.

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::book::content::page_candidates;
use crate::config::{BookConfig, SidebarEntry, section::theme::reading_order};

/// Create the content skeleton for `config` at the given root.
///
/// Each internal sidebar path gets its first candidate file (usually
/// `<dir>/README.md`) with a heading, unless a file already exists there.
/// Returns the number of pages written.
pub fn create_structure(root: &Path, config: &BookConfig) -> Result<usize> {
    let docs_dir = root.join(&config.theme.docs_dir);
    fs::create_dir_all(&docs_dir)
        .with_context(|| format!("Failed to create directory '{}'", docs_dir.display()))?;

    let titles = explicit_titles(&config.theme.sidebar);
    let mut written = 0;

    for link in reading_order(&config.theme.sidebar) {
        // External and malformed entries are reported by `validate`
        let Some(rel) = page_candidates(link).ok().and_then(|c| c.into_iter().next()) else {
            continue;
        };
        let path = docs_dir.join(&rel);
        if path.exists() {
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory '{}'", parent.display()))?;
        }

        let title = titles
            .iter()
            .find(|(path, _)| *path == link)
            .map_or_else(|| default_title(link), |(_, title)| title.to_string());
        fs::write(&path, format!("# {title}\n"))
            .with_context(|| format!("Failed to write '{}'", path.display()))?;
        written += 1;
    }

    Ok(written)
}

fn explicit_titles(entries: &[SidebarEntry]) -> Vec<(&str, &str)> {
    let mut titles = Vec::new();
    for entry in entries {
        match entry {
            SidebarEntry::Titled(path, title) => titles.push((path.as_str(), title.as_str())),
            SidebarEntry::Group(group) => titles.extend(explicit_titles(&group.children)),
            SidebarEntry::Page(_) => {}
        }
    }
    titles
}

/// Heading for a page without an explicit title: its last path segment.
///
/// `/1.Nuxt.js でのアプリケーション構築/` -> `1.Nuxt.js でのアプリケーション構築`
fn default_title(link: &str) -> String {
    let trimmed = link.trim_matches('/');
    let last = trimmed.rsplit('/').next().unwrap_or(trimmed);
    let last = last.strip_suffix(".html").unwrap_or(last);
    if last.is_empty() {
        "Introduction".to_string()
    } else {
        last.to_string()
    }
}
