//! Book configuration management for `book.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── head       # head = [[tag, {attrs}], ...]
//! │   ├── locale     # [locales."/prefix/"]
//! │   ├── markdown   # [markdown], [markdown.anchor]
//! │   └── theme      # [theme], nav, sidebar
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   ├── field      # FieldPath
//! │   └── handle     # Global config handle
//! └── mod.rs         # BookConfig (this file)
//! ```
//!
//! # Example
//!
//! ```toml
//! title = "Laravel REST API 開発 入門"
//! description = "..."
//! head = [["script", { src = "https://static.codepen.io/assets/embed/ei.js" }]]
//!
//! [locales."/"]
//! lang = "ja"
//!
//! [markdown]
//! linkify = true
//! plugins = ["markdown-it-playground"]
//!
//! [theme]
//! docs_dir = "books"
//! sidebar = ["/1.Nuxt.js でのアプリケーション構築/"]
//! ```

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{AnchorConfig, HeadTag, Locales, MarkdownConfig, SidebarEntry, ThemeConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath, cfg, init_config};

use crate::{
    cli::{Cli, Commands},
    debug, log,
};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

const TITLE: FieldPath = FieldPath::new("title");

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing book.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BookConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Book root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Book title, display only
    pub title: String,

    /// Book summary, display only
    pub description: String,

    /// Extra elements for every page's `<head>`
    pub head: Vec<HeadTag>,

    /// Locales keyed by path prefix
    pub locales: Locales,

    /// Markdown rendering settings
    pub markdown: MarkdownConfig,

    /// Navigation, sidebar and repository settings
    pub theme: ThemeConfig,
}

impl BookConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file, except for `init`
    /// which targets the directory being created.
    pub fn load(cli: &Cli) -> Result<Self> {
        let (config_path, exists) = Self::resolve_config_path(cli)?;

        if cli.is_init() {
            let mut config = Self::default();
            config.config_path = config_path;
            config.finalize();
            return Ok(config);
        }

        if !exists {
            bail!(ConfigError::Validation(format!(
                "config file '{}' not found, run `shiori init` to create a new book",
                cli.config.display()
            )));
        }

        let mut config = Self::from_path(&config_path)?;
        config.config_path = config_path;
        config.finalize();
        debug!("config"; "loaded {}", config.config_path.display());

        // `validate` reports diagnostics itself, alongside content checks
        if !cli.is_validate() {
            config.validate()?;
        }
        Ok(config)
    }

    /// Resolve config file path based on command.
    fn resolve_config_path(cli: &Cli) -> Result<(PathBuf, bool)> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        match &cli.command {
            Commands::Init { name, .. } => {
                let dir = name.as_ref().map_or_else(|| cwd.clone(), |name| cwd.join(name));
                let path = dir.join(&cli.config);
                let exists = path.exists();
                Ok((path, exists))
            }
            _ => match find_config_file(&cli.config) {
                Some(path) => Ok((path, true)),
                None => Ok((cwd.join(&cli.config), false)),
            },
        }
    }

    /// Derive the book root from the config file location.
    fn finalize(&mut self) {
        let root = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        self.set_root(&root);
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.root = path.to_path_buf();
    }

    /// Join a path with the root directory.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// Get path relative to the book root
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    /// Absolute content directory (`theme.docs_dir` under the root).
    pub fn docs_dir(&self) -> PathBuf {
        self.root_join(&self.theme.docs_dir)
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Collect every structural problem of the record.
    ///
    /// Content existence (sidebar pages on disk) is checked by `validate`.
    pub fn diagnostics(&self) -> ConfigDiagnostics {
        let mut diag = ConfigDiagnostics::new();

        if self.title.trim().is_empty() {
            diag.error_with_hint(
                TITLE,
                "must not be empty",
                "set `title = \"...\"` at the top of book.toml",
            );
        }

        section::head::validate_head(&self.head, &mut diag);
        self.locales.validate(&mut diag);
        self.markdown.validate(&mut diag);
        self.theme.validate(&mut diag);

        diag
    }

    /// Validate configuration, returning all collected errors at once.
    pub fn validate(&self) -> Result<()> {
        let diag = self.diagnostics();
        diag.print_warnings();
        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config with a minimal `title`.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> BookConfig {
    let config = format!("title = \"Test\"\n{extra}");
    let (parsed, ignored) = BookConfig::parse_with_ignored(&config).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_invalid_toml() {
        assert!(BookConfig::from_str("[theme\ndocs_dir = \"books\"").is_err());
    }

    #[test]
    fn test_book_config_default() {
        let config = BookConfig::default();
        assert_eq!(config.config_path, PathBuf::new());
        assert_eq!(config.get_root(), Path::new(""));
        assert_eq!(config.title, "");
        assert!(config.head.is_empty());
        assert!(config.locales.is_empty());
        assert_eq!(config.theme.docs_dir, PathBuf::from("docs"));
    }

    #[test]
    fn test_root_helpers() {
        let mut config = test_parse_config("[theme]\ndocs_dir = \"books\"");
        config.set_root(Path::new("/book"));
        assert_eq!(config.docs_dir(), PathBuf::from("/book/books"));
        assert_eq!(
            config.root_relative("/book/books/README.md"),
            PathBuf::from("books/README.md")
        );
        assert_eq!(config.root_relative("/elsewhere"), PathBuf::from("/elsewhere"));
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "title = \"Test\"\nthemeConfig = {}\n[theme]\nsidbar = []";
        let (config, ignored) = BookConfig::parse_with_ignored(content).unwrap();
        assert_eq!(config.title, "Test");
        assert!(ignored.iter().any(|f| f == "themeConfig"));
        assert!(ignored.iter().any(|f| f == "theme.sidbar"));
    }

    #[test]
    fn test_no_unknown_fields() {
        let (_, ignored) = BookConfig::parse_with_ignored("title = \"Test\"").unwrap();
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_diagnostics_empty_title() {
        let config = BookConfig::default();
        let diag = config.diagnostics();
        assert_eq!(diag.len(), 1);
        assert_eq!(diag.errors()[0].field.as_str(), "title");
    }

    #[test]
    fn test_diagnostics_collects_all_sections() {
        let config = test_parse_config(
            r#"head = [["<script>", {}]]

[locales.ja]
lang = "ja"

[markdown.anchor]
level = [9]

[theme]
edit_links = true
sidebar = ["relative/"]
"#,
        );
        let diag = config.diagnostics();
        let fields: Vec<_> = diag.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            [
                "head[0]",
                "locales.\"ja\"",
                "locales",
                "markdown.anchor.level[0]",
                "theme.sidebar[0]",
                "theme.edit_links",
            ]
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_template_is_valid() {
        let config = BookConfig::from_str(&crate::cli::init::generate_config_template()).unwrap();
        let diag = config.diagnostics();
        assert!(diag.is_empty(), "{diag}");
        assert_eq!(config.theme.sidebar.len(), 8);
    }
}
