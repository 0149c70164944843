//! Book validation command.
//!
//! Checks, in order:
//! 1. config diagnostics (every field error at once)
//! 2. every sidebar and nav path resolves to a markdown file
//! 3. anchored headings with colliding slugs (warning)
//! 4. orphan pages: markdown files no sidebar/nav entry reaches (warning)

mod report;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use parking_lot::RwLock;
use rayon::prelude::*;
use rustc_hash::FxHashSet;

use crate::book::content::{ResolveError, markdown_files, page_link, resolve_page};
use crate::book::headings::{duplicate_slugs, scan_page};
use crate::book::sidebar::SidebarTree;
use crate::cli::ValidateArgs;
use crate::config::BookConfig;
use crate::log;
use crate::utils::{path::to_slash, plural_count};

use report::ValidationReport;

/// Validate the book config against its content tree
pub fn validate_book(config: &BookConfig, args: &ValidateArgs) -> Result<()> {
    let check_orphans = args.orphans.unwrap_or(true);
    log!("validate"; "checking {}", config.root_relative(&config.config_path).display());

    let report = check_book(config, check_orphans);

    let links = report.link_error_count();
    if links > 0 {
        log!("validate"; "found {}", plural_count(links, "broken link"));
    } else if report.config_error_count() == 0 {
        log!("validate"; "all sidebar and nav links resolve");
    }

    report.print();
    eprintln!();
    log!("validate"; "{}", report);

    print_summary(&report, args.warn_only)
}

/// Run every check and collect the findings.
fn check_book(config: &BookConfig, check_orphans: bool) -> ValidationReport {
    let mut report = ValidationReport::default();

    let diag = config.diagnostics();
    for error in diag.errors() {
        report.add_config(
            error.field.as_str().to_string(),
            error.message.clone(),
            error.hint.clone(),
        );
    }
    for warning in diag.warnings() {
        report.add_warning(
            warning.field.as_str().to_string(),
            warning.message.clone(),
            String::new(),
        );
    }

    let docs_dir = config.docs_dir();
    if !docs_dir.is_dir() {
        report.add_link(
            "theme.docs_dir".to_string(),
            to_slash(&config.theme.docs_dir),
            "directory not found".to_string(),
        );
        return report;
    }

    let tree = SidebarTree::resolve(config);
    for page in tree.unresolved() {
        report.add_link(
            "theme.sidebar".to_string(),
            page.link.clone(),
            page.error.clone().unwrap_or_default(),
        );
    }

    let report = Arc::new(RwLock::new(report));
    let mut reached: FxHashSet<PathBuf> = tree
        .pages()
        .into_iter()
        .filter_map(|page| page.file.clone())
        .collect();
    reached.extend(check_nav(config, &docs_dir, &report));

    check_anchors(config, &docs_dir, &reached, &report);

    if check_orphans {
        check_orphan_pages(&docs_dir, &config.theme.docs_dir, &reached, &report);
    }

    Arc::try_unwrap(report)
        .map(|lock| lock.into_inner())
        .unwrap_or_else(|shared| std::mem::take(&mut *shared.write()))
}

/// Resolve nav links in parallel, returning the files they reach.
fn check_nav(
    config: &BookConfig,
    docs_dir: &Path,
    report: &Arc<RwLock<ValidationReport>>,
) -> Vec<PathBuf> {
    let links: Vec<&str> = config
        .theme
        .nav
        .iter()
        .flat_map(|item| item.internal_links())
        .collect();

    links
        .par_iter()
        .filter_map(|link| match resolve_page(docs_dir, link) {
            Ok(file) => Some(file),
            Err(ResolveError::External) => None,
            Err(err) => {
                report
                    .write()
                    .add_link("theme.nav".to_string(), link.to_string(), err.to_string());
                None
            }
        })
        .collect()
}

/// Warn about anchored headings sharing a slug.
fn check_anchors(
    config: &BookConfig,
    docs_dir: &Path,
    pages: &FxHashSet<PathBuf>,
    report: &Arc<RwLock<ValidationReport>>,
) {
    let anchor = &config.markdown.anchor;
    let docs_prefix = &config.theme.docs_dir;

    pages.par_iter().for_each(|rel| {
        let Ok(content) = std::fs::read_to_string(docs_dir.join(rel)) else {
            return;
        };
        let headings = scan_page(&content).anchored(anchor);
        let duplicates = duplicate_slugs(&headings);
        if duplicates.is_empty() {
            return;
        }

        let source = to_slash(&docs_prefix.join(rel));
        let mut report = report.write();
        for (slug, count) in duplicates {
            report.add_warning(
                source.clone(),
                format!("#{slug}"),
                format!("used by {} headings", count),
            );
        }
    });
}

/// Warn about markdown files nothing links to.
///
/// The root `README.md` is the book's home page and never an orphan.
fn check_orphan_pages(
    docs_dir: &Path,
    docs_prefix: &Path,
    reached: &FxHashSet<PathBuf>,
    report: &Arc<RwLock<ValidationReport>>,
) {
    let orphans: Vec<PathBuf> = markdown_files(docs_dir)
        .into_iter()
        .filter(|rel| rel != Path::new("README.md") && rel != Path::new("index.md"))
        .filter(|rel| !reached.contains(rel))
        .collect();

    if orphans.is_empty() {
        return;
    }

    let mut report = report.write();
    for rel in orphans {
        report.add_warning(
            "orphans".to_string(),
            to_slash(&docs_prefix.join(&rel)),
            format!("not in sidebar or nav (add \"{}\")", page_link(&rel)),
        );
    }
}

fn print_summary(report: &ValidationReport, warn_only: bool) -> Result<()> {
    let config_errors = report.config_error_count();
    let link_errors = report.link_error_count();
    if config_errors == 0 && link_errors == 0 {
        return Ok(());
    }

    let mut parts = Vec::new();
    if config_errors > 0 {
        parts.push(plural_count(config_errors, "config error"));
    }
    if link_errors > 0 {
        parts.push(plural_count(link_errors, "broken link"));
    }

    if warn_only {
        log!("warning"; "found {}", parts.join(", "));
        return Ok(());
    }
    anyhow::bail!("found {}", parts.join(", "))
}
