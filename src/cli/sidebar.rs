//! Sidebar command: print the resolved sidebar tree.

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::book::edit::RepoLinks;
use crate::book::sidebar::{ResolvedPage, SidebarItem, SidebarTree};
use crate::config::BookConfig;
use crate::log;
use crate::utils::{path::to_slash, plural_count};

/// One printed row of the tree.
#[derive(Debug, PartialEq, Eq)]
struct Row<'a> {
    depth: usize,
    title: &'a str,
    /// Link and file, absent for groups without a landing page.
    page: Option<&'a ResolvedPage>,
}

/// Print the tree (or JSON with `json`) to stdout.
pub fn print_sidebar(config: &BookConfig, json: bool) -> Result<()> {
    let tree = SidebarTree::resolve(config);

    if json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
        return Ok(());
    }

    if let Some(repo) = RepoLinks::from_theme(&config.theme) {
        println!("{} {}", repo.label.bold(), repo.url.dimmed());
    }

    let mut rows = Vec::new();
    collect_rows(&tree.items, 0, &mut rows);
    for row in &rows {
        print_row(row);
    }

    let unresolved = tree.unresolved().len();
    log!(
        "sidebar";
        "{} in reading order, {} unresolved",
        plural_count(tree.order.len(), "page"),
        unresolved
    );
    Ok(())
}

fn collect_rows<'a>(items: &'a [SidebarItem], depth: usize, out: &mut Vec<Row<'a>>) {
    for item in items {
        match item {
            SidebarItem::Page(page) => out.push(Row {
                depth,
                title: &page.title,
                page: Some(page),
            }),
            SidebarItem::Group {
                title,
                page,
                children,
            } => {
                out.push(Row {
                    depth,
                    title,
                    page: page.as_ref(),
                });
                collect_rows(children, depth + 1, out);
            }
        }
    }
}

fn print_row(row: &Row<'_>) {
    let indent = "  ".repeat(row.depth);
    let Some(page) = row.page else {
        println!("{indent}{}", row.title.bold());
        return;
    };

    let location = match &page.file {
        Some(file) => to_slash(file),
        None if page.is_external() => "external".to_string(),
        None => String::new(),
    };
    match &page.error {
        Some(error) => println!(
            "{indent}{} {} {}",
            "✗".red(),
            row.title.red(),
            error.dimmed()
        ),
        None => println!(
            "{indent}{} {} {}",
            "•".dimmed(),
            row.title,
            format!("{} ({location})", page.link).dimmed()
        ),
    }
}
