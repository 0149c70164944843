//! Source repository links: repo URL, label, "edit this page" URLs.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::path::Path;

use crate::config::ThemeConfig;
use crate::utils::path::to_slash;

/// Path segment bytes kept as-is in edit URLs.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Repository host, which decides the edit URL shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoHost {
    GitHub,
    GitLab,
    Bitbucket,
    Other,
}

impl RepoHost {
    fn from_url(repo_url: &str) -> Self {
        let host = url::Url::parse(repo_url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
            .unwrap_or_default();
        if host.ends_with("github.com") {
            Self::GitHub
        } else if host.contains("gitlab") {
            Self::GitLab
        } else if host.ends_with("bitbucket.org") {
            Self::Bitbucket
        } else {
            Self::Other
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::GitHub => "GitHub",
            Self::GitLab => "GitLab",
            Self::Bitbucket => "Bitbucket",
            Self::Other => "Source",
        }
    }
}

/// Resolved repository links of a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLinks {
    pub url: String,
    pub label: String,
    pub host: RepoHost,
    edit: Option<EditTarget>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct EditTarget {
    branch: String,
    docs_dir: String,
}

impl RepoLinks {
    /// Links for the configured `theme.repo`, if any.
    pub fn from_theme(theme: &ThemeConfig) -> Option<Self> {
        let repo = theme.repo.as_deref()?;
        let url = if ThemeConfig::is_repo_shorthand(repo) {
            format!("https://github.com/{repo}")
        } else {
            repo.trim_end_matches('/').to_string()
        };
        let host = RepoHost::from_url(&url);
        let label = theme
            .repo_label
            .clone()
            .unwrap_or_else(|| host.label().to_string());
        let edit = theme.edit_links.then(|| EditTarget {
            branch: theme.docs_branch.clone(),
            docs_dir: to_slash(&theme.docs_dir),
        });

        Some(Self {
            url,
            label,
            host,
            edit,
        })
    }

    /// Edit URL of a page file (relative to `docs_dir`).
    ///
    /// `None` when edit links are disabled.
    pub fn edit_url(&self, file: &Path) -> Option<String> {
        let edit = self.edit.as_ref()?;
        let path = [edit.docs_dir.as_str(), to_slash(file).as_str()]
            .iter()
            .flat_map(|part| part.split('/'))
            .filter(|segment| !segment.is_empty())
            .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
            .collect::<Vec<_>>()
            .join("/");
        let branch = utf8_percent_encode(&edit.branch, SEGMENT).to_string();

        Some(match self.host {
            RepoHost::GitLab => format!("{}/-/edit/{branch}/{path}", self.url),
            RepoHost::Bitbucket => format!("{}/src/{branch}/{path}?mode=edit&at={branch}", self.url),
            RepoHost::GitHub | RepoHost::Other => format!("{}/edit/{branch}/{path}", self.url),
        })
    }
}
