//! Command-line argument definitions for the Prism CLI.
//!
//! Global options select the configuration file, extra view sources and the
//! log level; the [`Command`] picks between composing a view and listing the
//! catalog.

use clap::{Parser, Subcommand};

use prism::export::Format;

/// Command-line arguments for the Prism diagram composer
#[derive(Parser, Debug)]
#[command(name = "prism", author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Additional annotated view source to add to the catalog (repeatable)
    #[arg(long = "view-file", global = true)]
    pub view_files: Vec<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compose a view for a selection of categories
    Compose(ComposeArgs),

    /// List views, presets or categories
    #[command(subcommand)]
    List(ListCommand),
}

#[derive(clap::Args, Debug, Default)]
pub struct ComposeArgs {
    /// View name; defaults to the configured view or the first catalog view
    pub view: Option<String>,

    /// Preset whose categories are enabled
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Categories to enable, comma separated
    #[arg(short, long, value_delimiter = ',')]
    pub categories: Vec<String>,

    /// Output format (mermaid, markdown, html)
    #[arg(short, long, default_value = "mermaid")]
    pub format: Format,

    /// Output file; standard output when omitted
    #[arg(short, long)]
    pub output: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ListCommand {
    /// Names of every view in the catalog
    Views,

    /// Preset names and descriptions
    Presets,

    /// Categories used by a view
    Categories {
        /// View name; defaults to the configured view or the first catalog view
        view: Option<String>,
    },
}
