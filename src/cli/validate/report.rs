//! Validation report types and formatting.

use std::collections::BTreeMap;
use std::fmt;

use owo_colors::OwoColorize;

use crate::utils::plural_s;

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The link/path/field that failed.
    pub target: String,
    /// Error reason/message.
    pub reason: String,
}

/// Unified validation report, grouped by source (config field or page file)
#[derive(Debug, Default)]
pub struct ValidationReport {
    /// Config errors, grouped by field.
    pub config: BTreeMap<String, Vec<ValidationError>>,
    /// Unresolvable sidebar/nav links, grouped by config field.
    pub links: BTreeMap<String, Vec<ValidationError>>,
    /// Non-fatal findings (orphans, duplicate anchors, config warnings).
    pub warnings: BTreeMap<String, Vec<ValidationError>>,
}

fn push(
    map: &mut BTreeMap<String, Vec<ValidationError>>,
    source: String,
    target: String,
    reason: String,
) {
    map.entry(source)
        .or_default()
        .push(ValidationError { target, reason });
}

fn count(map: &BTreeMap<String, Vec<ValidationError>>) -> usize {
    map.values().map(Vec::len).sum()
}

impl ValidationReport {
    /// Add a config error.
    pub fn add_config(&mut self, field: String, message: String, hint: Option<String>) {
        let reason = hint.map(|h| format!("(hint: {h})")).unwrap_or_default();
        push(&mut self.config, field, message, reason);
    }

    /// Add a broken link.
    pub fn add_link(&mut self, source: String, link: String, reason: String) {
        push(&mut self.links, source, link, reason);
    }

    /// Add a warning.
    pub fn add_warning(&mut self, source: String, target: String, reason: String) {
        push(&mut self.warnings, source, target, reason);
    }

    pub fn config_error_count(&self) -> usize {
        count(&self.config)
    }

    pub fn link_error_count(&self) -> usize {
        count(&self.links)
    }

    pub fn warning_count(&self) -> usize {
        count(&self.warnings)
    }

    pub fn error_count(&self) -> usize {
        self.config_error_count() + self.link_error_count()
    }

    /// Print the full report to stderr (config -> links -> warnings).
    pub fn print(&self) {
        print_section("config", "error", &self.config, false);
        print_section("links", "error", &self.links, false);
        print_section("warnings", "warning", &self.warnings, true);
    }
}

/// Print section with format (target + reason for non-empty reason).
fn print_section(
    name: &str,
    noun: &str,
    entries: &BTreeMap<String, Vec<ValidationError>>,
    soft: bool,
) {
    if entries.is_empty() {
        return;
    }
    eprintln!();

    let source_count = entries.len();
    let entry_count = count(entries);

    // Section header
    let summary = format!(
        "({source_count} source{}, {entry_count} {noun}{})",
        plural_s(source_count),
        plural_s(entry_count)
    );
    if soft {
        eprintln!("{} {}", name.yellow().bold(), summary.dimmed());
    } else {
        eprintln!("{} {}", name.red().bold(), summary.dimmed());
    }

    for (source, items) in entries {
        eprintln!("{}{}{}", "[".dimmed(), source.cyan(), "]".dimmed());
        for e in items {
            let arrow = if soft {
                "→".yellow().to_string()
            } else {
                "→".red().to_string()
            };
            if e.reason.is_empty() {
                eprintln!("{arrow} {}", e.target);
            } else {
                eprintln!("{arrow} {} {}", e.target, e.reason.dimmed());
            }
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.error_count();
        let warnings = self.warning_count();

        if total == 0 {
            write!(f, "{}", "all checks passed".green())?;
        } else {
            write!(
                f,
                "{} {} {}",
                "found".dimmed(),
                total.to_string().red().bold(),
                format!("error{}", plural_s(total)).dimmed()
            )?;
        }
        if warnings > 0 {
            write!(
                f,
                "{} {} {}",
                ",".dimmed(),
                warnings.to_string().yellow().bold(),
                format!("warning{}", plural_s(warnings)).dimmed()
            )?;
        }
        Ok(())
    }
}
