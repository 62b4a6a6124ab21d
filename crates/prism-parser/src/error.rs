//! Diagnostics for catalog sources.
//!
//! Every problem found while reading a catalog source is a [`Diagnostic`]
//! with a severity, an [`ErrorCode`], one or more labelled byte spans and an
//! optional help line. Parsing reports all problems it can find in one pass,
//! wrapped in a [`ParseError`].
//!
//! # Example
//!
//! ```
//! # use prism_parser::error::{Diagnostic, ErrorCode};
//! # use prism_parser::Span;
//!
//! let diag = Diagnostic::error("fragment id `PLAN` is declared more than once")
//!     .with_code(ErrorCode::E202)
//!     .with_label(Span::new(120..124), "duplicate declaration")
//!     .with_secondary_label(Span::new(40..44), "first declared here")
//!     .with_help("rename one of the fragments");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
