//! Book paths to markdown files under `docs_dir`.
//!
//! | Link               | Candidates (in order)                          |
//! |--------------------|------------------------------------------------|
//! | `/`                | `README.md`, `index.md`                        |
//! | `/dir/`            | `dir/README.md`, `dir/index.md`                |
//! | `/page`            | `page.md`, `page/README.md`, `page/index.md`   |
//! | `/page.html`       | `page.md`                                      |
//! | `/page.md`         | `page.md`                                      |
//!
//! Links are percent-decoded and stripped of `?query` and `#fragment` first.

use jwalk::WalkDir;
use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::utils::link::LinkKind;
use crate::utils::path::to_slash;

/// Directory names that mark a folder as a page.
const INDEX_FILES: [&str; 2] = ["README.md", "index.md"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("external link")]
    External,

    #[error("'{0}' is not a book path")]
    NotBookPath(String),

    #[error("no page for '{link}' (tried {})", display_candidates(.tried))]
    NotFound { link: String, tried: Vec<PathBuf> },
}

fn display_candidates(tried: &[PathBuf]) -> String {
    tried.iter().map(|p| to_slash(p)).collect::<Vec<_>>().join(", ")
}

/// Candidate files (relative to `docs_dir`) for a book link.
pub fn page_candidates(link: &str) -> Result<Vec<PathBuf>, ResolveError> {
    let path = match LinkKind::parse(link) {
        LinkKind::External(_) => return Err(ResolveError::External),
        LinkKind::SiteRoot(path) => path,
        _ => return Err(ResolveError::NotBookPath(link.to_string())),
    };

    let path = path.split(['#', '?']).next().unwrap_or(path);
    let decoded = percent_decode_str(path).decode_utf8_lossy();
    let rel = decoded.trim_start_matches('/');

    if rel.split('/').any(|segment| segment == "..") {
        return Err(ResolveError::NotBookPath(link.to_string()));
    }

    let candidates = if rel.is_empty() || rel.ends_with('/') {
        INDEX_FILES.iter().map(|f| Path::new(rel).join(f)).collect()
    } else if let Some(stem) = rel.strip_suffix(".html").or_else(|| rel.strip_suffix(".md")) {
        vec![PathBuf::from(format!("{stem}.md"))]
    } else {
        let mut candidates = vec![PathBuf::from(format!("{rel}.md"))];
        candidates.extend(INDEX_FILES.iter().map(|f| Path::new(rel).join(f)));
        candidates
    };
    Ok(candidates)
}

/// Resolve a book link to an existing file, relative to `docs_dir`.
pub fn resolve_page(docs_dir: &Path, link: &str) -> Result<PathBuf, ResolveError> {
    let tried = page_candidates(link)?;
    tried
        .iter()
        .find(|rel| docs_dir.join(rel).is_file())
        .cloned()
        .ok_or_else(|| ResolveError::NotFound {
            link: link.to_string(),
            tried,
        })
}

/// Book link of a markdown file (inverse of [`resolve_page`]).
///
/// `5.認証/README.md` -> `/5.認証/`, `guide/setup.md` -> `/guide/setup.html`
pub fn page_link(rel: &Path) -> String {
    let slash = to_slash(rel);
    for index in INDEX_FILES {
        if slash == index {
            return "/".to_string();
        }
        if let Some(dir) = slash.strip_suffix(&format!("/{index}")) {
            return format!("/{dir}/");
        }
    }
    let stem = slash.strip_suffix(".md").unwrap_or(&slash);
    format!("/{stem}.html")
}

/// All markdown files under `docs_dir`, relative and sorted.
///
/// Hidden directories (`.vuepress`, `.git`) and `node_modules` are skipped.
pub fn markdown_files(docs_dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(docs_dir)
        .skip_hidden(true)
        .process_read_dir(|_, _, _, children| {
            children.retain(|entry| {
                entry
                    .as_ref()
                    .map(|e| e.file_name() != "node_modules")
                    .unwrap_or(true)
            });
        })
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "md"))
        .filter_map(|path| path.strip_prefix(docs_dir).ok().map(Path::to_path_buf))
        .collect();
    files.sort();
    files
}
