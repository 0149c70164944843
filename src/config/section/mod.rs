//! Configuration section definitions.
//!
//! Each module corresponds to a part of `book.toml`:
//!
//! | Module     | TOML key       | Purpose                                |
//! |------------|----------------|----------------------------------------|
//! | `head`     | `head`         | Extra `<head>` elements                |
//! | `locale`   | `[locales]`    | Path-prefixed language scopes          |
//! | `markdown` | `[markdown]`   | Anchors, renderer plugins, linkify     |
//! | `theme`    | `[theme]`      | Nav, sidebar, repository links         |

pub mod head;
pub mod locale;
pub mod markdown;
pub mod theme;

pub use head::HeadTag;
pub use locale::Locales;
pub use markdown::{AnchorConfig, MarkdownConfig};
pub use theme::{SidebarEntry, ThemeConfig};
