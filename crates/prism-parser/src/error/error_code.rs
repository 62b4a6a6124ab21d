//! Error codes for catalog source diagnostics.
//!
//! Codes are grouped by phase:
//! - `E0xx` - Syntax errors within a single line
//! - `E1xx` - Document structure errors
//! - `E2xx` - View validation errors

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Syntax Errors (E0xx)
    // =========================================================================
    /// Unterminated label.
    ///
    /// A quoted label or a `|...|` edge label was opened but never closed on
    /// the same line.
    E001,

    /// Unrecognized statement.
    ///
    /// The line is not a directive, header, subgraph boundary, node
    /// declaration or edge chain.
    E002,

    /// Unclosed node shape.
    ///
    /// A node shape such as `[`, `((` or `{` has no matching closing
    /// delimiter on the same line.
    E003,

    /// Invalid flow direction.
    ///
    /// Valid directions are `LR`, `RL`, `TB`, `TD` and `BT`.
    E004,

    /// Unknown directive.
    ///
    /// Supported directives are `@view`, `@category` and `@placeholder`.
    E005,

    /// Missing directive value.
    E006,

    // =========================================================================
    // Structure Errors (E1xx)
    // =========================================================================
    /// Missing `flowchart` header.
    E100,

    /// More than one `flowchart` header.
    E101,

    /// A fragment appears before the `flowchart` header.
    E102,

    /// `end` without an open subgraph.
    E103,

    /// A subgraph is never closed.
    E104,

    /// Missing `@view` directive.
    E105,

    /// More than one `@view` directive.
    E106,

    // =========================================================================
    // Validation Errors (E2xx)
    // =========================================================================
    /// An edge references a node that is never declared.
    E200,

    /// An edge endpoint names a subgraph instead of a node.
    E201,

    /// A fragment id is declared more than once.
    E202,

    /// A fragment appears before any `@category` directive.
    E203,

    /// A subgraph encloses no node.
    E204,

    /// Any other view construction failure.
    E205,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E004 => "E004",
            ErrorCode::E005 => "E005",
            ErrorCode::E006 => "E006",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E104 => "E104",
            ErrorCode::E105 => "E105",
            ErrorCode::E106 => "E106",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
            ErrorCode::E205 => "E205",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "unterminated label",
            ErrorCode::E002 => "unrecognized statement",
            ErrorCode::E003 => "unclosed node shape",
            ErrorCode::E004 => "invalid direction",
            ErrorCode::E005 => "unknown directive",
            ErrorCode::E006 => "missing directive value",
            ErrorCode::E100 => "missing flowchart header",
            ErrorCode::E101 => "duplicate flowchart header",
            ErrorCode::E102 => "statement before header",
            ErrorCode::E103 => "end without subgraph",
            ErrorCode::E104 => "unclosed subgraph",
            ErrorCode::E105 => "missing view name",
            ErrorCode::E106 => "duplicate view name",
            ErrorCode::E200 => "undefined node",
            ErrorCode::E201 => "endpoint is a subgraph",
            ErrorCode::E202 => "duplicate id",
            ErrorCode::E203 => "fragment without category",
            ErrorCode::E204 => "empty subgraph",
            ErrorCode::E205 => "invalid view",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
