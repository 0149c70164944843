//! Pre-initialization validation.
//!
//! Validates target directory state before book creation.

use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Initialization mode determines validation rules.
#[derive(Debug, Clone, Copy)]
pub enum InitMode {
    /// `shiori init` - initialize in current directory (must not hold a book)
    CurrentDir,
    /// `shiori init <name>` - create new subdirectory (must not exist)
    NewDir,
}

/// Validate target directory for initialization.
///
/// # Rules
/// - `CurrentDir`: no config file yet, and no entries besides dotfiles
/// - `NewDir`: directory must not exist
pub fn validate_target(root: &Path, config_file: &Path, mode: InitMode) -> Result<()> {
    match mode {
        InitMode::CurrentDir => {
            if config_file.exists() {
                bail!(
                    "'{}' already exists.\n\
                     This directory already holds a book.",
                    config_file.display()
                );
            }
            if !is_empty(root)? {
                bail!(
                    "Current directory is not empty.\n\
                     Use `shiori init <name>` to create in a new subdirectory."
                );
            }
        }
        InitMode::NewDir => {
            if root.exists() {
                bail!(
                    "Directory '{}' already exists.\n\
                     Choose a different name or remove the existing directory.",
                    root.display()
                );
            }
        }
    }
    Ok(())
}

/// Check if directory is empty (ignoring dotfiles such as `.git`) or doesn't exist.
fn is_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    let is_empty = fs::read_dir(path)
        .with_context(|| format!("Failed to read directory '{}'", path.display()))?
        .filter_map(Result::ok)
        .all(|entry| entry.file_name().to_string_lossy().starts_with('.'));
    Ok(is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_dir_current_mode() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();
        let config = temp.path().join("book.toml");
        assert!(validate_target(temp.path(), &config, InitMode::CurrentDir).is_ok());
    }

    #[test]
    fn test_non_empty_dir_current_mode() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("file.txt"), "content").unwrap();
        let config = temp.path().join("book.toml");
        assert!(validate_target(temp.path(), &config, InitMode::CurrentDir).is_err());
    }

    #[test]
    fn test_existing_config_current_mode() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("book.toml");
        fs::write(&config, "title = \"x\"").unwrap();
        let err = validate_target(temp.path(), &config, InitMode::CurrentDir).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_existing_dir_new_mode() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("book.toml");
        assert!(validate_target(temp.path(), &config, InitMode::NewDir).is_err());
    }

    #[test]
    fn test_non_existing_dir_new_mode() {
        let temp = TempDir::new().unwrap();
        let new_path = temp.path().join("new_book");
        let config = new_path.join("book.toml");
        assert!(validate_target(&new_path, &config, InitMode::NewDir).is_ok());
    }
}
