//! Error types for Prism operations.

use std::io;

use thiserror::Error;

use prism_core::error::CatalogError;
use prism_parser::error::ParseError;

/// The main error type for Prism operations.
///
/// # Diagnostic Variants
///
/// `Parse` keeps the source text next to the diagnostics so callers can
/// render labelled snippets.
#[derive(Debug, Error)]
pub enum PrismError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for PrismError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl PrismError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
