//! Configuration file generation.
//!
//! Creates book.toml and ignore files for new books.

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::utils::path::to_slash;

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore", ".ignore"];

const TEMPLATE_BODY: &str = r##"title = "Laravel REST API 開発 入門"
description = "HTML/CSS を使った Web 制作技術について、現場で使えるテクニックを紹介します。"

# Extra elements for every page's <head>: [tag, { attr = "value" }]
head = [
    ["script", { src = "https://static.codepen.io/assets/embed/ei.js" }],
]

# Locales keyed by path prefix; "/" is required when any locale is set
[locales."/"]
lang = "ja"

[markdown]
# Auto-link bare URLs
linkify = true
# Renderer plugins, registered in order
plugins = ["markdown-it-playground"]

[markdown.anchor]
# Heading depths that receive anchors
level = [1, 2, 3]
# "uri" (percent-encoded) or "plain"
slugify = "uri"
permalink = true
permalink_before = true
permalink_symbol = "#"

[theme]
repo = "lec-cafe/book_laravel_api"
repo_label = "Github"
# Content directory, relative to this file
docs_dir = "books"
docs_branch = "master"
edit_links = true
edit_link_text = "ページに不明点や誤字等があれば、Github にて修正を提案してください！"

# Reading order: "/path/", ["/path/", "Title"] or { title, children }
sidebar = [
    "/1.Nuxt.js でのアプリケーション構築/",
    "/2.Axios による REST API の発行/",
    "/3.Vuexによるデータの管理/",
    "/4.Vuex Store の永続化/",
    "/5.認証/",
    "/6.SSRの設定/",
    "/実践演習/",
    { title = "補足資料", children = [
        "/9.1.Promise と async await/",
        "/9.2.axios モジュールの使いかた/",
        "/9.3.Vuex のモジュール化/",
    ] },
]

[[theme.nav]]
text = "Lec Café"
link = "https://leccafe.connpass.com/"
"##;

/// Generate book.toml content with comments
pub fn generate_config_template() -> String {
    let mut out = format!(
        "# shiori book configuration (v{})\n\n",
        env!("CARGO_PKG_VERSION")
    );
    out.push_str(TEMPLATE_BODY);
    out
}

/// Write the default config to `path`
pub fn write_config(path: &Path) -> Result<()> {
    fs::write(path, generate_config_template())
        .with_context(|| format!("Failed to write config file '{}'", path.display()))
}

/// Write .gitignore and .ignore files with standard patterns
///
/// Patterns include:
/// - `node_modules/` of the site engine
/// - Engine build output under `<docs_dir>/.vuepress/dist/`
/// - OS-specific files (`.DS_Store`)
pub fn write_ignore_files(root: &Path, docs_dir: &Path) -> Result<()> {
    let patterns = [
        "node_modules/".to_string(),
        format!("/{}/.vuepress/dist/", to_slash(docs_dir)),
        ".DS_Store".to_string(),
    ];

    let content = patterns.join("\n");

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        // Never overwrite the user's ignore files
        if !path.exists() {
            fs::write(&path, &content)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("book.toml");
        write_config(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# shiori book configuration"));
        assert!(content.contains("[markdown.anchor]"));
        assert!(content.contains("[[theme.nav]]"));
    }

    #[test]
    fn test_template_survives_hash_symbol() {
        let config = crate::config::BookConfig::from_str(TEMPLATE_BODY).unwrap();
        assert_eq!(config.markdown.anchor.permalink_symbol, "#");
        assert_eq!(config.theme.repo.as_deref(), Some("lec-cafe/book_laravel_api"));
        assert_eq!(config.theme.nav[0].text, "Lec Café");
        assert!(TEMPLATE_BODY.ends_with("link = \"https://leccafe.connpass.com/\"\n"));
    }

    #[test]
    fn test_write_ignore_files() {
        let temp = TempDir::new().unwrap();
        write_ignore_files(temp.path(), Path::new("books")).unwrap();

        let content = fs::read_to_string(temp.path().join(".gitignore")).unwrap();
        assert!(content.contains("node_modules/"));
        assert!(content.contains("/books/.vuepress/dist/"));
    }

    #[test]
    fn test_ignore_files_not_overwritten() {
        let temp = TempDir::new().unwrap();
        let gitignore = temp.path().join(".gitignore");
        fs::write(&gitignore, "custom content").unwrap();

        write_ignore_files(temp.path(), Path::new("books")).unwrap();

        let content = fs::read_to_string(&gitignore).unwrap();
        assert_eq!(content, "custom content");
    }
}
