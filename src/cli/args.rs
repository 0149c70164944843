//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shiori documentation book CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: book.toml)
    #[arg(short = 'C', long, global = true, default_value = "book.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a new book from the default template
    #[command(visible_alias = "i")]
    Init {
        /// Book directory name/path (relative to current directory)
        #[arg(value_hint = clap::ValueHint::DirPath)]
        name: Option<PathBuf>,

        /// Print the config template instead of writing files
        #[arg(short, long)]
        dry: bool,
    },

    /// Validate the config against the content tree
    #[command(visible_alias = "v")]
    Validate {
        #[command(flatten)]
        args: ValidateArgs,
    },

    /// Print the URL fragment slug of each heading text
    Slug {
        #[command(flatten)]
        args: SlugArgs,
    },

    /// Print the resolved sidebar tree and reading order
    #[command(visible_alias = "s")]
    Sidebar {
        /// Output JSON instead of a tree
        #[arg(short, long)]
        json: bool,
    },

    /// List the anchored headings of a page and their slugs
    #[command(visible_alias = "a")]
    Anchors {
        /// Page path as written in the sidebar (e.g. `/guide/`) or a markdown file
        page: String,
    },

    /// Print the `<head>` fragment built from the `head` entries
    Head,

    /// Export the config for the site engine
    #[command(visible_alias = "e")]
    Export {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Js)]
        format: ExportFormat,

        /// Write output to file instead of stdout
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,
    },
}

/// Validate command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Report orphan pages (markdown files not reachable from the sidebar)
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub orphans: Option<bool>,

    /// Treat validation failures as warnings instead of errors
    #[arg(long, short = 'w')]
    pub warn_only: bool,
}

/// Slug command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct SlugArgs {
    /// Heading texts to slugify
    #[arg(required = true)]
    pub texts: Vec<String>,

    /// Skip percent-encoding
    #[arg(short, long)]
    pub plain: bool,
}

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Plain JSON object (functions omitted)
    Json,
    /// CommonJS module with `slugify` and plugin registration attached
    Js,
}

#[allow(unused)]
impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }
    pub const fn is_validate(&self) -> bool {
        matches!(self.command, Commands::Validate { .. })
    }
}
