//! Config field paths for diagnostics.

use owo_colors::OwoColorize;
use std::borrow::Cow;
use std::fmt;

/// Dotted path of a config field, e.g. `theme.sidebar[7].children[0]`.
///
/// Static paths are `const`; indexed paths into arrays are built with
/// [`FieldPath::index`] and [`FieldPath::child`].
///
/// # Example
///
/// ```ignore
/// const SIDEBAR: FieldPath = FieldPath::new("theme.sidebar");
/// diag.error(SIDEBAR.index(3), "empty group");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath(Cow<'static, str>);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(Cow::Borrowed(path))
    }

    /// Path of the `i`-th element of this array field.
    pub fn index(&self, i: usize) -> Self {
        Self(Cow::Owned(format!("{}[{i}]", self.0)))
    }

    /// Path of a named child field.
    pub fn child(&self, name: &str) -> Self {
        Self(Cow::Owned(format!("{}.{name}", self.0)))
    }

    /// Path of a map entry, quoting the key like TOML does.
    pub fn key(&self, key: &str) -> Self {
        Self(Cow::Owned(format!("{}.\"{key}\"", self.0)))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_args!("`{}`", self.0).bright_blue())
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_paths() {
        const SIDEBAR: FieldPath = FieldPath::new("theme.sidebar");
        assert_eq!(SIDEBAR.as_str(), "theme.sidebar");
        assert_eq!(
            SIDEBAR.index(7).child("children").index(0).as_str(),
            "theme.sidebar[7].children[0]"
        );
        assert_eq!(
            FieldPath::new("locales").key("/en/").child("lang").as_str(),
            "locales.\"/en/\".lang"
        );
    }
}
