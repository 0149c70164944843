//! Shared helpers.
//!
//! - [`slug`]: heading text -> URL fragment
//! - [`html`]: attribute escaping, void elements
//! - [`link`]: external / fragment / root link classification
//! - [`path`]: path normalization and containment checks
//! - [`plural`]: count formatting

pub mod html;
pub mod link;
pub mod path;
pub mod plural;
pub mod slug;

pub use plural::{plural_count, plural_s};
