//! Errors raised while loading `book.toml`.
//!
//! Loading fails fast on I/O and TOML syntax errors ([`ConfigError`]).
//! Semantic problems are collected instead: every section pushes into one
//! [`ConfigDiagnostics`] so a broken book reports all of its mistakes in a
//! single run, grouped by the top-level table they belong to.

use super::FieldPath;
use owo_colors::OwoColorize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Why `book.toml` could not be turned into a [`BookConfig`](crate::config::BookConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("book.toml is not valid TOML")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Validation(String),

    /// Wraps the diagnostics without `#[source]`, so `anyhow` prints them once.
    #[error("{0}")]
    Diagnostics(ConfigDiagnostics),
}

/// One problem at one field, e.g. `theme.sidebar[2].children[0]`.
#[derive(Debug, Clone)]
pub struct ConfigDiagnostic {
    pub field: FieldPath,
    pub message: String,
    /// Suggested `book.toml` edit.
    pub hint: Option<String>,
}

impl ConfigDiagnostic {
    pub fn new(field: FieldPath, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Top-level table of the field: `theme` for `theme.sidebar[2]`.
    pub fn section(&self) -> &str {
        let path = self.field.as_str();
        let end = path.find(['.', '[']).unwrap_or(path.len());
        &path[..end]
    }
}

impl fmt::Display for ConfigDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            "→".red(),
            self.field.as_str().cyan(),
            self.message
        )?;
        if let Some(hint) = &self.hint {
            write!(f, "\n    {} {}", "hint:".yellow(), hint)?;
        }
        Ok(())
    }
}

/// Errors and warnings collected across every `book.toml` section.
#[derive(Debug, Default)]
pub struct ConfigDiagnostics {
    errors: Vec<ConfigDiagnostic>,
    /// Printed on load, never fatal.
    warnings: Vec<ConfigDiagnostic>,
}

impl ConfigDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, field: FieldPath, message: impl Into<String>) {
        self.errors.push(ConfigDiagnostic::new(field, message));
    }

    pub fn error_with_hint(
        &mut self,
        field: FieldPath,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.errors
            .push(ConfigDiagnostic::new(field, message).with_hint(hint));
    }

    pub fn warn(&mut self, field: FieldPath, message: impl Into<String>) {
        self.warnings.push(ConfigDiagnostic::new(field, message));
    }

    pub fn print_warnings(&self) {
        if self.warnings.is_empty() {
            return;
        }
        crate::log!("warning"; "book.toml:");
        for warning in &self.warnings {
            eprintln!("- {}: {}", warning.field.as_str(), warning.message);
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ConfigDiagnostic] {
        &self.errors
    }

    pub fn warnings(&self) -> &[ConfigDiagnostic] {
        &self.warnings
    }

    /// `Err(self)` when any error was collected.
    pub fn into_result(self) -> Result<(), Self> {
        if !self.has_errors() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Errors keyed by top-level table, in table name order.
    fn by_section(&self) -> BTreeMap<&str, Vec<&ConfigDiagnostic>> {
        let mut sections: BTreeMap<&str, Vec<&ConfigDiagnostic>> = BTreeMap::new();
        for err in &self.errors {
            sections.entry(err.section()).or_default().push(err);
        }
        sections
    }
}

impl fmt::Display for ConfigDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.errors.len();
        write!(
            f,
            "{} {}",
            "book.toml has".red().bold(),
            crate::utils::plural_count(total, "error").red().bold()
        )?;
        for (section, errors) in self.by_section() {
            write!(f, "\n\n{}{}{}", "[".dimmed(), section.cyan(), "]".dimmed())?;
            for err in errors {
                write!(f, "\n{err}")?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ConfigDiagnostics {}
