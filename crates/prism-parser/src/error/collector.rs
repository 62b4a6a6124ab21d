//! Accumulates diagnostics across a parsing phase.

use log::warn;

use crate::error::{Diagnostic, ParseError};

/// Collects diagnostics so a phase can report every problem at once instead
/// of stopping at the first one.
///
/// Warnings are logged as they are emitted; they only reach the caller when
/// the phase also produced an error.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        } else {
            warn!(
                code:? = diagnostic.code(),
                span:? = diagnostic.primary_span();
                "{}", diagnostic.message()
            );
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Finish collection.
    ///
    /// Returns `Err(ParseError)` with all diagnostics when any error was
    /// emitted, `Ok(())` otherwise.
    pub fn finish(self) -> Result<(), ParseError> {
        if self.has_errors {
            Err(ParseError::new(self.diagnostics))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorCode, span::Span};

    #[test]
    fn test_collector_empty_is_ok() {
        assert!(DiagnosticCollector::new().finish().is_ok());
    }

    #[test]
    fn test_collector_warnings_only_is_ok() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::warning("warning 1"));
        collector.emit(Diagnostic::warning("warning 2"));

        assert!(!collector.has_errors());
        assert!(collector.finish().is_ok());
    }

    #[test]
    fn test_collector_keeps_all_diagnostics_on_error() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(
            Diagnostic::error("test error")
                .with_code(ErrorCode::E002)
                .with_label(Span::new(10..20), "here"),
        );
        collector.emit(Diagnostic::warning("test warning"));

        let err = collector.finish().unwrap_err();
        assert_eq!(err.diagnostics().len(), 2);
        assert_eq!(err.diagnostics()[0].message(), "test error");
    }
}
