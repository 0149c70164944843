//! Book initialization module.
//!
//! Creates a new book with the default configuration and a page skeleton.
//!
//! # Module Structure
//!
//! - [`validate`]: Pre-initialization validation
//! - [`structure`]: Content skeleton creation
//! - [`config`]: Configuration file generation

mod config;
mod structure;
mod validate;

use crate::{
    config::BookConfig,
    log,
    utils::plural_count,
};
use anyhow::Result;

pub use config::generate_config_template;
pub use validate::InitMode;

/// Create a new book with default structure
///
/// # Steps
/// 1. Validate target directory
/// 2. Write `book.toml`
/// 3. Create `docs_dir` with one page per sidebar entry
/// 4. Write ignore files
///
/// If `dry_run` is true, only prints the config template to stdout
pub fn new_book(book_config: &BookConfig, has_name: bool, dry_run: bool) -> Result<()> {
    if dry_run {
        print!("{}", generate_config_template());
        return Ok(());
    }

    let root = book_config.get_root();
    let mode = if has_name {
        InitMode::NewDir
    } else {
        InitMode::CurrentDir
    };

    if let Err(e) = validate::validate_target(root, &book_config.config_path, mode) {
        log!("error"; "{}", e);
        std::process::exit(1);
    }

    // The template is what gets written, so the skeleton follows it
    let template = BookConfig::from_str(&generate_config_template())?;

    std::fs::create_dir_all(root)?;
    config::write_config(&book_config.config_path)?;
    let pages = structure::create_structure(root, &template)?;
    config::write_ignore_files(root, &template.theme.docs_dir)?;

    log!(
        "init";
        "created {} in {}",
        plural_count(pages, "page"),
        book_config.root_relative(root.join(&template.theme.docs_dir)).display()
    );
    log!("init"; "book initialized, edit book.toml to make it yours");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_new_book_in_new_dir() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("book");
        let mut config = BookConfig {
            config_path: root.join("book.toml"),
            ..Default::default()
        };
        config.set_root(&root);

        new_book(&config, true, false).unwrap();

        let written = BookConfig::from_str(&fs::read_to_string(root.join("book.toml")).unwrap())
            .unwrap();
        assert_eq!(written.title, "Laravel REST API 開発 入門");
        assert!(root.join("books/5.認証/README.md").is_file());
        assert!(root.join("books/9.3.Vuex のモジュール化/README.md").is_file());
        assert!(root.join(".gitignore").is_file());
        assert_eq!(crate::book::content::markdown_files(&root.join("books")).len(), 10);
        assert!(root.join(".ignore").is_file());
    }
}
