//! Engine config export.
//!
//! `book.toml` is written for humans; the site engine wants a single object
//! with camelCase keys under `themeConfig`. [`engine_config`] builds that
//! object and [`render`] writes it as JSON or as a CommonJS module that also
//! carries the functions JSON cannot express (slugify, plugin registration).
//!
//! Plugins are registered exactly once per format. JSON lists them under
//! `markdown.plugins`, which the engine loads by name. The JS module drops
//! that key and registers them in its `markdown.config` callback instead.

use std::fmt::Write;

use anyhow::Result;
use serde_json::{Map, Value, json};

use crate::cli::ExportFormat;
use crate::config::{BookConfig, MarkdownConfig, ThemeConfig};
use crate::utils::path::to_slash;

/// Engine-shaped config object, keys in engine order.
pub fn engine_config(config: &BookConfig) -> Result<Value> {
    build(config, true)
}

fn build(config: &BookConfig, plugin_list: bool) -> Result<Value> {
    let mut root = Map::new();
    root.insert("title".into(), json!(config.title));
    if !config.description.is_empty() {
        root.insert("description".into(), json!(config.description));
    }
    root.insert("head".into(), serde_json::to_value(&config.head)?);
    if !config.locales.is_empty() {
        root.insert("locales".into(), serde_json::to_value(&config.locales)?);
    }
    root.insert("markdown".into(), markdown_value(&config.markdown, plugin_list));
    root.insert("themeConfig".into(), theme_value(&config.theme)?);
    Ok(Value::Object(root))
}

fn markdown_value(markdown: &MarkdownConfig, plugin_list: bool) -> Value {
    let anchor = &markdown.anchor;
    let mut value = json!({
        "anchor": {
            "level": anchor.level,
            "permalink": anchor.permalink,
            "permalinkBefore": anchor.permalink_before,
            "permalinkSymbol": anchor.permalink_symbol,
        },
        "linkify": markdown.linkify,
    });
    if plugin_list && let Value::Object(map) = &mut value {
        map.insert("plugins".into(), json!(markdown.plugins));
    }
    value
}

fn theme_value(theme: &ThemeConfig) -> Result<Value> {
    let mut map = Map::new();
    map.insert("nav".into(), serde_json::to_value(&theme.nav)?);
    map.insert("sidebar".into(), serde_json::to_value(&theme.sidebar)?);
    if let Some(repo) = &theme.repo {
        map.insert("repo".into(), json!(repo));
    }
    if let Some(label) = &theme.repo_label {
        map.insert("repoLabel".into(), json!(label));
    }
    map.insert("docsDir".into(), json!(to_slash(&theme.docs_dir)));
    map.insert("docsBranch".into(), json!(theme.docs_branch));
    map.insert("editLinks".into(), json!(theme.edit_links));
    if let Some(text) = &theme.edit_link_text {
        map.insert("editLinkText".into(), json!(text));
    }
    Ok(Value::Object(map))
}

/// Render the engine config in `format`.
pub fn render(config: &BookConfig, format: ExportFormat) -> Result<String> {
    Ok(match format {
        ExportFormat::Json => {
            let value = engine_config(config)?;
            format!("{}\n", serde_json::to_string_pretty(&value)?)
        }
        ExportFormat::Js => {
            let value = build(config, false)?;
            js_module(&serde_json::to_string_pretty(&value)?, &config.markdown)?
        }
    })
}

fn js_module(json: &str, markdown: &MarkdownConfig) -> Result<String> {
    let mut out = String::with_capacity(json.len() + 256);
    out.push_str("// Generated by shiori from book.toml, do not edit.\n");
    out.push_str("const config = ");
    out.push_str(json);
    out.push_str(";\n\n");
    out.push_str("config.markdown.anchor.slugify = ");
    out.push_str(markdown.anchor.slugify.js_function());
    out.push_str(";\n");

    if !markdown.plugins.is_empty() {
        out.push_str("config.markdown.config = (md) => {\n");
        for plugin in &markdown.plugins {
            let name = serde_json::to_string(plugin)?;
            writeln!(out, "  md.use(require({name}));")?;
        }
        out.push_str("};\n");
    }

    out.push_str("\nmodule.exports = config;\n");
    Ok(out)
}
