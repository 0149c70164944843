//! Link classification for sidebar and nav targets.

/// Syntactic classification of a configured link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind<'a> {
    /// Link with a URL scheme (https://, mailto:, tel:).
    External(&'a str),
    /// Pure fragment (#section). Value is the anchor without `#`.
    Fragment(&'a str),
    /// Book-root path (/guide/, /5.認証/).
    SiteRoot(&'a str),
    /// Anything else (guide/, ./page).
    Relative(&'a str),
}

impl<'a> LinkKind<'a> {
    /// Parse a link string into its syntactic kind.
    #[inline]
    pub fn parse(link: &'a str) -> Self {
        if is_external_link(link) {
            Self::External(link)
        } else if let Some(anchor) = link.strip_prefix('#') {
            Self::Fragment(anchor)
        } else if link.starts_with('/') {
            Self::SiteRoot(link)
        } else {
            Self::Relative(link)
        }
    }
}

/// A link is external when it parses as an absolute URL.
#[inline]
pub fn is_external_link(link: &str) -> bool {
    !link.starts_with('/') && url::Url::parse(link).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_external() {
        assert_eq!(
            LinkKind::parse("https://leccafe.connpass.com/"),
            LinkKind::External("https://leccafe.connpass.com/")
        );
        assert_eq!(
            LinkKind::parse("mailto:user@example.com"),
            LinkKind::External("mailto:user@example.com")
        );
    }

    #[test]
    fn test_parse_internal() {
        assert_eq!(LinkKind::parse("#setup"), LinkKind::Fragment("setup"));
        assert_eq!(LinkKind::parse("/5.認証/"), LinkKind::SiteRoot("/5.認証/"));
        assert_eq!(LinkKind::parse("guide/"), LinkKind::Relative("guide/"));
        assert_eq!(LinkKind::parse(""), LinkKind::Relative(""));
    }
}
