//! `[markdown]` configuration: heading anchors, renderer plugins, linkify.
//!
//! # Example
//!
//! ```toml
//! [markdown]
//! linkify = true
//! plugins = ["markdown-it-playground"]
//!
//! [markdown.anchor]
//! level = [1, 2, 3]
//! slugify = "uri"
//! permalink = true
//! permalink_before = true
//! permalink_symbol = "#"
//! ```
//!
//! `plugins` replaces a registration callback: every name is handed to the
//! renderer in order, and the exported engine config registers each one.

use regex::Regex;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::utils::slug::SlugStyle;

const LEVEL: FieldPath = FieldPath::new("markdown.anchor.level");
const PERMALINK_SYMBOL: FieldPath = FieldPath::new("markdown.anchor.permalink_symbol");
const PLUGINS: FieldPath = FieldPath::new("markdown.plugins");

/// npm package names, optionally scoped (`@scope/name`).
static PACKAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(@[a-z0-9~-][a-z0-9._~-]*/)?[a-z0-9~-][a-z0-9._~-]*$").expect("valid regex")
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Heading anchor settings.
    pub anchor: AnchorConfig,
    /// Renderer plugins, registered in order.
    pub plugins: Vec<String>,
    /// Auto-link bare URLs.
    pub linkify: bool,
}

/// Heading anchor settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorConfig {
    /// Heading depths (1-6) that receive anchors.
    pub level: Vec<u8>,
    /// How heading text becomes a fragment id.
    pub slugify: SlugStyle,
    /// Show a permalink icon next to anchored headings.
    pub permalink: bool,
    /// Place the icon before the heading text.
    pub permalink_before: bool,
    /// Icon glyph.
    pub permalink_symbol: String,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            level: vec![1, 2, 3],
            slugify: SlugStyle::Uri,
            permalink: true,
            permalink_before: true,
            permalink_symbol: "#".to_string(),
        }
    }
}

impl AnchorConfig {
    /// Whether headings of depth `level` get an anchor.
    #[inline]
    pub fn anchors(&self, level: u8) -> bool {
        self.level.contains(&level)
    }

    /// Slug of a heading in the configured style.
    #[inline]
    pub fn slug(&self, text: &str) -> String {
        self.slugify.apply(text)
    }
}

impl MarkdownConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        self.validate_anchor(diag);
        self.validate_plugins(diag);
    }

    fn validate_anchor(&self, diag: &mut ConfigDiagnostics) {
        let anchor = &self.anchor;
        if anchor.level.is_empty() {
            diag.warn(LEVEL, "empty, no heading gets an anchor");
        }

        let mut seen = FxHashSet::default();
        for (i, &level) in anchor.level.iter().enumerate() {
            if !(1..=6).contains(&level) {
                diag.error(LEVEL.index(i), format!("heading level {level} is not in 1..=6"));
            } else if !seen.insert(level) {
                diag.error(LEVEL.index(i), format!("heading level {level} listed twice"));
            }
        }

        if anchor.permalink && anchor.permalink_symbol.is_empty() {
            diag.error_with_hint(
                PERMALINK_SYMBOL,
                "must not be empty while `permalink` is enabled",
                "set a glyph such as \"#\" or disable `permalink`",
            );
        }
    }

    fn validate_plugins(&self, diag: &mut ConfigDiagnostics) {
        let mut seen = FxHashSet::default();
        for (i, plugin) in self.plugins.iter().enumerate() {
            if !PACKAGE_RE.is_match(plugin) {
                diag.error(PLUGINS.index(i), format!("'{plugin}' is not a valid package name"));
            } else if !seen.insert(plugin.as_str()) {
                diag.error(PLUGINS.index(i), format!("'{plugin}' registered twice"));
            }
        }
    }
}
