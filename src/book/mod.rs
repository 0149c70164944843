//! The book on disk: markdown pages under `theme.docs_dir`.
//!
//! Everything here reads content only to derive metadata (titles,
//! heading slugs, edit links). Rendering is left to the site engine.

pub mod content;
pub mod edit;
pub mod headings;
pub mod sidebar;
