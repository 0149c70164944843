//! Shiori - typed configuration for documentation books.

mod book;
mod cli;
mod config;
mod export;
mod logger;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{BookConfig, init_config};

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    // `slug` is a pure function of its arguments and needs no book
    if let Commands::Slug { args } = &cli.command {
        return cli::slug::print_slugs(args);
    }

    let config = init_config(BookConfig::load(cli)?);

    match &cli.command {
        Commands::Init { name, dry } => cli::init::new_book(&config, name.is_some(), *dry),
        Commands::Validate { args } => cli::validate::validate_book(&config, args),
        Commands::Sidebar { json } => cli::sidebar::print_sidebar(&config, *json),
        Commands::Anchors { page } => cli::anchors::print_anchors(&config, page),
        Commands::Head => cli::head::print_head(),
        Commands::Export { format, output } => {
            cli::export::export_config(*format, output.as_deref())
        }
        // Handled before the config is loaded
        Commands::Slug { .. } => Ok(()),
    }
}
