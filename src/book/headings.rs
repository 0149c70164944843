//! Headings and titles of markdown pages (no HTML rendering).

use pulldown_cmark::{Event, HeadingLevel, MetadataBlockKind, Options, Parser, Tag, TagEnd};
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::config::AnchorConfig;

/// A heading and its anchor slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub level: u8,
    pub text: String,
    pub slug: String,
}

/// Scan result of one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageScan {
    /// `title:` from YAML front matter.
    pub front_title: Option<String>,
    /// All headings as `(level, plain text)`, in document order.
    pub headings: Vec<(u8, String)>,
}

impl PageScan {
    /// Front matter title, else the first level-1 heading.
    pub fn title(&self) -> Option<&str> {
        self.front_title.as_deref().or_else(|| {
            self.headings
                .iter()
                .find(|(level, _)| *level == 1)
                .map(|(_, text)| text.as_str())
        })
    }

    /// Headings at the configured anchor levels, with their slugs.
    pub fn anchored(&self, anchor: &AnchorConfig) -> Vec<Heading> {
        self.headings
            .iter()
            .filter(|(level, _)| anchor.anchors(*level))
            .map(|(level, text)| Heading {
                level: *level,
                text: text.clone(),
                slug: anchor.slug(text),
            })
            .collect()
    }
}

/// Slugs used by more than one heading, with their count.
///
/// The site engine disambiguates these; listing them lets authors see
/// which anchors will not be stable.
pub fn duplicate_slugs(headings: &[Heading]) -> Vec<(&str, usize)> {
    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
    let mut order = Vec::new();
    for heading in headings {
        let count = counts.entry(heading.slug.as_str()).or_insert(0);
        if *count == 0 {
            order.push(heading.slug.as_str());
        }
        *count += 1;
    }
    order
        .into_iter()
        .filter_map(|slug| {
            let count = counts[slug];
            (count > 1).then_some((slug, count))
        })
        .collect()
}

/// Scan markdown source for front matter title and headings.
pub fn scan_page(content: &str) -> PageScan {
    let options = Options::ENABLE_YAML_STYLE_METADATA_BLOCKS
        | Options::ENABLE_HEADING_ATTRIBUTES
        | Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(content, options);

    let mut scan = PageScan::default();
    let mut current_heading: Option<(u8, String)> = None;
    let mut in_front_matter = false;

    for event in parser {
        match event {
            Event::Start(Tag::MetadataBlock(MetadataBlockKind::YamlStyle)) => {
                in_front_matter = true;
            }
            Event::End(TagEnd::MetadataBlock(_)) => in_front_matter = false,
            Event::Text(text) if in_front_matter => {
                if scan.front_title.is_none() {
                    scan.front_title = front_matter_title(&text);
                }
            }
            Event::Start(Tag::Heading { level, .. }) => {
                current_heading = Some((level_num(level), String::new()));
            }
            Event::Text(text) | Event::Code(text) if current_heading.is_some() => {
                if let Some((_, ref mut content)) = current_heading {
                    content.push_str(&text);
                }
            }
            Event::SoftBreak if current_heading.is_some() => {
                if let Some((_, ref mut content)) = current_heading {
                    content.push(' ');
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(heading) = current_heading.take() {
                    scan.headings.push(heading);
                }
            }
            _ => {}
        }
    }

    scan
}

fn level_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Read `title: ...` from simple YAML front matter.
fn front_matter_title(block: &str) -> Option<String> {
    block.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        if key.trim() != "title" {
            return None;
        }
        let value = value.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
            .unwrap_or(value);
        (!value.is_empty()).then(|| value.to_string())
    })
}
