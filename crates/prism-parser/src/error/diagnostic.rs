//! A single error or warning about a catalog source.

use thiserror::Error;

use crate::{
    error::{ErrorCode, Label, Severity},
    span::Span,
};

/// A diagnostic message with source location information.
///
/// # Example
///
/// ```text
/// error[E200]: edge references undefined node `RETRIEVE`
///   --> agent_graph.mmd:14:9
///    |
/// 14 | PLAN --> RETRIEVE
///    |          ^^^^^^^^ not declared in this view
///    |
///    = help: declare `RETRIEVE` as a node or fix the spelling
/// ```
#[derive(Debug, Clone, Error)]
#[error("{severity}{}: {message}", code_tag(.code))]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use prism_parser::error::{Diagnostic, ErrorCode};
    /// # use prism_parser::Span;
    ///
    /// let diag = Diagnostic::error("invalid flow direction `XY`")
    ///     .with_code(ErrorCode::E004)
    ///     .with_label(Span::new(10..12), "invalid direction")
    ///     .with_help("use one of `LR`, `RL`, `TB`, `TD`, `BT`");
    /// assert!(diag.severity().is_error());
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Returns the span of the first primary label, if any.
    pub fn primary_span(&self) -> Option<Span> {
        self.labels
            .iter()
            .find(|label| label.is_primary())
            .map(Label::span)
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }
}

// "[E001]" or nothing, so a diagnostic reads "error[E001]: message".
fn code_tag(code: &Option<ErrorCode>) -> String {
    code.map(|code| format!("[{code}]")).unwrap_or_default()
}
