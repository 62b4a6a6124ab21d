//! Prism CLI library
//!
//! This module contains the core CLI logic for the Prism diagram composer.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command, ComposeArgs, ListCommand};

use std::{
    fs,
    io::{self, Write},
};

use log::info;

use prism::{PrismError, ViewComposer};

/// Run the Prism CLI application, writing listings and un-redirected
/// compositions to standard output.
///
/// # Errors
///
/// Returns `PrismError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parse errors in `--view-file` sources
/// - Unknown views or presets
/// - Export errors
pub fn run(args: &Args) -> Result<(), PrismError> {
    let stdout = io::stdout();
    run_with_writer(args, &mut stdout.lock())
}

/// Run the Prism CLI application against `writer` instead of standard output.
///
/// # Errors
///
/// Same as [`run`].
pub fn run_with_writer<W: Write>(args: &Args, writer: &mut W) -> Result<(), PrismError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let mut composer = ViewComposer::builtin(app_config)?;

    for path in &args.view_files {
        info!(path = path.as_str(); "Loading view file");
        let source = fs::read_to_string(path)?;
        composer.load_view(&source)?;
    }

    match &args.command {
        Command::Compose(compose) => compose_view(&composer, compose, writer),
        Command::List(list) => list_catalog(&composer, list, writer),
    }
}

fn compose_view<W: Write>(
    composer: &ViewComposer,
    args: &ComposeArgs,
    writer: &mut W,
) -> Result<(), PrismError> {
    let selection = composer.selection(
        args.view.as_deref(),
        args.preset.as_deref(),
        args.categories.as_slice(),
    )?;
    let code = composer.compose(&selection)?;
    let output = composer.export(&code, args.format, selection.view())?;

    match &args.output {
        Some(path) => {
            fs::write(path, output)?;
            info!(output_file = path, format:% = args.format; "Diagram exported successfully");
        }
        None => writer.write_all(output.as_bytes())?,
    }

    Ok(())
}

fn list_catalog<W: Write>(
    composer: &ViewComposer,
    list: &ListCommand,
    writer: &mut W,
) -> Result<(), PrismError> {
    let catalog = composer.catalog();
    match list {
        ListCommand::Views => {
            for view in catalog.views() {
                writeln!(writer, "{} ({})", view.name(), view.direction())?;
            }
        }
        ListCommand::Presets => {
            for preset in catalog.presets() {
                writeln!(writer, "{:<12} {}", preset.name(), preset.description())?;
            }
        }
        ListCommand::Categories { view } => {
            let view = match view.as_deref().or(composer.config().defaults().view()) {
                Some(name) => catalog.view(name)?,
                None => catalog.first_view(),
            };
            for category in view.categories() {
                writeln!(writer, "{category}")?;
            }
        }
    }
    Ok(())
}
