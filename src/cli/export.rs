//! Export command: write the engine config.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::ExportFormat;
use crate::config::cfg;
use crate::export::render;
use crate::log;

/// Render the engine config and write it to `output` or stdout.
pub fn export_config(format: ExportFormat, output: Option<&Path>) -> Result<()> {
    let config = cfg();
    let rendered = render(&config, format)?;

    // Output to file or stdout
    if let Some(path) = output {
        let mut file = fs::File::create(path)
            .with_context(|| format!("Failed to create '{}'", path.display()))?;
        file.write_all(rendered.as_bytes())?;
        log!("export"; "wrote {}", path.display());
    } else {
        print!("{rendered}");
    }

    Ok(())
}
