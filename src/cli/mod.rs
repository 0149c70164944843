//! Command-line interface module.

pub mod anchors;
mod args;
pub mod export;
pub mod head;
pub mod init;
pub mod sidebar;
pub mod slug;
pub mod validate;

pub use args::{Cli, Commands, ExportFormat, SlugArgs, ValidateArgs};
