//! Head command: print the `<head>` fragment.

use anyhow::Result;

use crate::config::{cfg, section::head::render_head};

/// Print the rendered `head` entries, one element per line.
pub fn print_head() -> Result<()> {
    let config = cfg();
    let html = render_head(&config.head);
    if !html.is_empty() {
        println!("{html}");
    }
    Ok(())
}
