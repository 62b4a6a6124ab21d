//! # Prism Parser
//!
//! Reads catalog sources into [`View`]s. A catalog source is an ordinary
//! Mermaid flowchart annotated with directives in `%%` comments, so every
//! source stays renderable by Mermaid on its own:
//!
//! ```text
//! %% @view Agent Graph
//! %% @placeholder Enable 'Agents' to view the Agent Graph
//! flowchart TB
//! %% @category agents
//! PLAN[Plan]
//! %% @category validators
//! VALIDATE{Validate}
//! PLAN --> VALIDATE
//! ```
//!
//! Each fragment takes the category of the nearest `@category` above it.
//!
//! ## Usage
//!
//! ```
//! # use prism_parser::{parse, error::ParseError};
//! fn main() -> Result<(), ParseError> {
//!     let source = "%% @view Demo\nflowchart LR\n%% @category core\nA[Start]\nB[End]\nA --> B\n";
//!
//!     let view = parse(source)?;
//!     assert_eq!(view.name(), "Demo");
//!     assert_eq!(view.fragments().len(), 3);
//!     Ok(())
//! }
//! ```

mod elaborate;
pub mod error;
mod parser;
mod parser_types;
mod span;

pub use span::{Span, Spanned};

use log::debug;

use prism_core::view::View;

use error::ParseError;

/// Parse a catalog source into a validated view.
///
/// Parsing runs in two phases:
///
/// 1. **Parse** - split the source into line statements, recovering from
///    syntax errors so every broken line is reported.
/// 2. **Elaborate** - resolve categories, subgraph nesting and edge
///    endpoints, and build the [`View`].
///
/// # Errors
///
/// Returns a [`ParseError`] holding every diagnostic of the first phase that
/// failed.
pub fn parse(source: &str) -> Result<View, ParseError> {
    let statements = parser::parse_statements(source)?;
    debug!(statements = statements.len(); "Parsed catalog source");

    elaborate::Builder::new().build(&statements)
}
