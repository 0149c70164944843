//! Anchors command: list a page's anchored headings and their slugs.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use owo_colors::OwoColorize;

use crate::book::content::{ResolveError, resolve_page};
use crate::book::headings::{duplicate_slugs, scan_page};
use crate::book::sidebar::SidebarTree;
use crate::config::BookConfig;
use crate::{debug, log};
use crate::utils::path::normalize_path;

/// Print the anchored headings of `page`, a book path or a markdown file.
pub fn print_anchors(config: &BookConfig, page: &str) -> Result<()> {
    let file = locate(config, page)?;
    let content = fs::read_to_string(&file)
        .with_context(|| format!("Failed to read '{}'", file.display()))?;

    let scan = scan_page(&content);
    let headings = scan.anchored(&config.markdown.anchor);

    if let Some(title) = scan.title() {
        println!("{}", title.bold());
    }
    for heading in &headings {
        let indent = "  ".repeat(usize::from(heading.level.saturating_sub(1)));
        println!(
            "{indent}{} {}",
            heading.text,
            format!("#{}", heading.slug).dimmed()
        );
    }

    for (slug, count) in duplicate_slugs(&headings) {
        log!("warning"; "#{} is used by {} headings", slug, count);
    }

    print_neighbors(config, &file);
    Ok(())
}

/// Previous and next pages in reading order, when the page is in the sidebar.
fn print_neighbors(config: &BookConfig, file: &Path) {
    let tree = SidebarTree::resolve(config);
    let docs_dir = config.docs_dir();
    let target = normalize_path(file);
    let Some(page) = tree.pages().into_iter().find(|page| {
        page.file
            .as_ref()
            .is_some_and(|rel| normalize_path(&docs_dir.join(rel)) == target)
    }) else {
        debug!("anchors"; "{} is not in the sidebar", file.display());
        return;
    };

    let (prev, next) = tree.neighbors(&page.link);
    if let Some(prev) = prev {
        println!("{} {}", "prev:".dimmed(), prev.title);
    }
    if let Some(next) = next {
        println!("{} {}", "next:".dimmed(), next.title);
    }
}

/// Markdown file for `page`.
///
/// Existing files win (as given, then under `docs_dir`); anything else is
/// resolved as a book path like a sidebar entry.
fn locate(config: &BookConfig, page: &str) -> Result<PathBuf> {
    let docs_dir = config.docs_dir();
    for candidate in [PathBuf::from(page), docs_dir.join(page.trim_start_matches('/'))] {
        if candidate.is_file() {
            return Ok(normalize_path(&candidate));
        }
    }

    match resolve_page(&docs_dir, page) {
        Ok(rel) => Ok(docs_dir.join(rel)),
        Err(ResolveError::External) => bail!("'{page}' is an external link"),
        Err(err) => bail!(err),
    }
}
