//! `[locales]` path-prefixed language scopes.
//!
//! # Example
//!
//! ```toml
//! [locales."/"]
//! lang = "ja"
//!
//! [locales."/en/"]
//! lang = "en-US"
//! title = "Laravel REST API Primer"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::{ConfigDiagnostics, FieldPath};

const LOCALES: FieldPath = FieldPath::new("locales");

/// Settings of one locale scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Language code written to `<html lang>`.
    pub lang: String,
    /// Title override for pages under this prefix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Description override for pages under this prefix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Locales keyed by URL path prefix (`/`, `/en/`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locales(pub BTreeMap<String, LocaleConfig>);

impl Locales {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Locale whose prefix is the longest match for `path`.
    ///
    /// `path` is a page path such as `/en/guide/`; prefixes are compared
    /// on whole segments by construction since every key ends with `/`.
    pub fn resolve(&self, path: &str) -> Option<(&str, &LocaleConfig)> {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        self.0
            .iter()
            .filter(|(prefix, _)| {
                path.starts_with(prefix.as_str()) || path == prefix.trim_end_matches('/')
            })
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(prefix, locale)| (prefix.as_str(), locale))
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for (prefix, locale) in &self.0 {
            let field = LOCALES.key(prefix);
            if !prefix.starts_with('/') || !prefix.ends_with('/') {
                diag.error_with_hint(
                    field.clone(),
                    format!("locale prefix '{prefix}' must start and end with '/'"),
                    format!("use \"/{}/\"", prefix.trim_matches('/')),
                );
            }
            if locale.lang.trim().is_empty() {
                diag.error(field.child("lang"), "must not be empty");
            }
        }

        if !self.is_empty() && !self.0.contains_key("/") {
            diag.error_with_hint(
                LOCALES,
                "no root locale",
                "add a `[locales.\"/\"]` section for pages outside every other prefix",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    fn locales() -> Locales {
        test_parse_config(
            r#"[locales."/"]
lang = "ja"

[locales."/en/"]
lang = "en-US"
title = "Primer"
"#,
        )
        .locales
    }

    #[test]
    fn test_parse() {
        let locales = locales();
        assert_eq!(locales.0.len(), 2);
        assert_eq!(locales.0["/"].lang, "ja");
        assert_eq!(locales.0["/en/"].title.as_deref(), Some("Primer"));
        assert!(locales.0["/"].title.is_none());
    }

    #[test]
    fn test_resolve_longest_prefix() {
        let locales = locales();
        assert_eq!(locales.resolve("/en/guide/").map(|(p, _)| p), Some("/en/"));
        assert_eq!(locales.resolve("/en").map(|(p, _)| p), Some("/en/"));
        assert_eq!(locales.resolve("/5.認証/").map(|(_, l)| l.lang.as_str()), Some("ja"));
        assert_eq!(locales.resolve("/english/").map(|(p, _)| p), Some("/"));
        assert_eq!(locales.resolve("guide/").map(|(p, _)| p), Some("/"));
    }

    #[test]
    fn test_resolve_without_root() {
        let mut locales = Locales::default();
        locales.0.insert(
            "/en/".into(),
            LocaleConfig {
                lang: "en".into(),
                ..Default::default()
            },
        );
        assert!(locales.resolve("/ja/").is_none());
    }

    #[test]
    fn test_validate() {
        let mut locales = Locales::default();
        locales.0.insert("en".into(), LocaleConfig::default());
        let mut diag = ConfigDiagnostics::new();
        locales.validate(&mut diag);

        let fields: Vec<_> = diag.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["locales.\"en\"", "locales.\"en\".lang", "locales"]);
    }

    #[test]
    fn test_validate_ok() {
        let mut diag = ConfigDiagnostics::new();
        locales().validate(&mut diag);
        assert!(diag.is_empty());
    }
}
