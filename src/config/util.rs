//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from current directory
///
/// Starts from cwd and walks up parent directories until finding `config_name`.
///
/// # Example
/// ```text
/// /home/user/book/books/5.認証/  ← cwd
/// /home/user/book/book.toml      ← found!
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_from(&cwd, config_name)
}

/// Search upward from `start` for `config_name`.
fn find_config_from(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    start
        .ancestors()
        .map(|dir| dir.join(config_name))
        .find(|candidate| candidate.exists())
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_in_ancestor() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("books/5.認証");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp.path().join("book.toml"), "title = \"x\"").unwrap();

        let found = find_config_from(&nested, Path::new("book.toml")).unwrap();
        assert_eq!(found, temp.path().join("book.toml"));
    }

    #[test]
    fn test_absolute_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.toml");
        assert!(find_config_from(temp.path(), &path).is_none());

        fs::write(&path, "").unwrap();
        assert_eq!(find_config_from(Path::new("/"), &path), Some(path));
    }

    #[test]
    fn test_not_found() {
        let temp = TempDir::new().unwrap();
        assert!(find_config_from(temp.path(), Path::new("no-such-book-config.toml")).is_none());
    }
}
