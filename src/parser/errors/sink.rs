//! The diagnostics boundary and its default collector.

use rowan::TextRange;

use super::codes::DiagnosticCode;
use super::error::{Diagnostic, Severity};

/// Receiver of positioned warnings and errors.
///
/// The compiler reports every anomaly here and keeps going; whether a report
/// is shown, logged, or stored is up to the implementor.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);

    /// Report a warning at `range`.
    fn warning(&mut self, code: DiagnosticCode, range: TextRange, message: String) {
        self.report(Diagnostic::new(message, range, code).with_severity(Severity::Warning));
    }

    /// Report an error at `range`.
    fn error(&mut self, code: DiagnosticCode, range: TextRange, message: String) {
        self.report(Diagnostic::new(message, range, code).with_severity(Severity::Error));
    }
}

/// Collects diagnostics during compilation and logs each one as it arrives.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get diagnostics with a specific code.
    pub fn with_code(&self, code: DiagnosticCode) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| d.code == code).collect()
    }

    /// Get the number of errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    /// Get the number of warnings.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.is_error())
    }

    /// Consume the collector, yielding the diagnostics in report order.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl DiagnosticSink for DiagnosticCollector {
    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Warning => tracing::warn!(
                code = %diagnostic.code,
                range = ?diagnostic.range,
                "{}",
                diagnostic.message
            ),
            Severity::Error => tracing::error!(
                code = %diagnostic.code,
                range = ?diagnostic.range,
                "{}",
                diagnostic.message
            ),
        }
        self.diagnostics.push(diagnostic);
    }
}
