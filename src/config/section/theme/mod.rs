//! `[theme]` configuration: navigation, sidebar and source repository links.
//!
//! # Example
//!
//! ```toml
//! [theme]
//! repo = "lec-cafe/book_laravel_api"
//! repo_label = "Github"
//! docs_dir = "books"
//! edit_links = true
//! edit_link_text = "Suggest a fix on GitHub"
//! sidebar = ["/1.Nuxt.js でのアプリケーション構築/"]
//! ```

mod nav;
mod sidebar;

pub use nav::{NavItem, validate_nav};
pub use sidebar::{SidebarEntry, reading_order, validate_sidebar};

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::LazyLock;

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::utils::path::is_contained_relative;

const REPO: FieldPath = FieldPath::new("theme.repo");
const DOCS_DIR: FieldPath = FieldPath::new("theme.docs_dir");
const DOCS_BRANCH: FieldPath = FieldPath::new("theme.docs_branch");
const EDIT_LINKS: FieldPath = FieldPath::new("theme.edit_links");

/// GitHub `owner/name` shorthand.
static REPO_SHORTHAND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+$").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Top navigation entries.
    pub nav: Vec<NavItem>,
    /// Sidebar tree; defines the reading order.
    pub sidebar: Vec<SidebarEntry>,
    /// Source repository: `owner/name` on GitHub or a full URL.
    pub repo: Option<String>,
    /// Label of the repository link (inferred from the host when unset).
    pub repo_label: Option<String>,
    /// Content directory, relative to the book root.
    pub docs_dir: PathBuf,
    /// Branch used in edit links.
    pub docs_branch: String,
    /// Show "edit this page" links.
    pub edit_links: bool,
    /// Text of the edit link.
    pub edit_link_text: Option<String>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            nav: Vec::new(),
            sidebar: Vec::new(),
            repo: None,
            repo_label: None,
            docs_dir: PathBuf::from("docs"),
            docs_branch: "master".to_string(),
            edit_links: false,
            edit_link_text: None,
        }
    }
}

impl ThemeConfig {
    /// Whether `repo` is the GitHub `owner/name` shorthand.
    pub fn is_repo_shorthand(repo: &str) -> bool {
        REPO_SHORTHAND_RE.is_match(repo)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        validate_nav(&self.nav, diag);
        validate_sidebar(&self.sidebar, diag);

        if self.sidebar.is_empty() {
            diag.warn(FieldPath::new("theme.sidebar"), "empty, pages have no reading order");
        }

        if let Some(repo) = &self.repo
            && !Self::is_repo_shorthand(repo)
            && url::Url::parse(repo).is_err()
        {
            diag.error_with_hint(
                REPO,
                format!("'{repo}' is neither `owner/name` nor a URL"),
                "e.g. \"lec-cafe/book_laravel_api\" or \"https://gitlab.com/owner/name\"",
            );
        }

        if !is_contained_relative(&self.docs_dir) {
            diag.error(
                DOCS_DIR,
                format!(
                    "'{}' must be a relative path inside the book root",
                    self.docs_dir.display()
                ),
            );
        }

        if self.docs_branch.trim().is_empty() {
            diag.error(DOCS_BRANCH, "must not be empty");
        }

        if self.edit_links && self.repo.is_none() {
            diag.error_with_hint(
                EDIT_LINKS,
                "edit links need a repository",
                "set `theme.repo` or disable `edit_links`",
            );
        }
    }
}
