//! Diagnostic types
//!
//! A diagnostic carries:
//! - A categorized code
//! - A severity level
//! - The source range of the offending node
//! - An optional hint for fixing the grammar

use std::fmt;

use rowan::TextRange;

use super::codes::DiagnosticCode;

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    /// The grammar cannot be used as written
    #[default]
    Error,
    /// Compilation degraded a construct to a documented fallback
    Warning,
}

impl Severity {
    /// Check if this is an error
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

/// A diagnostic positioned on a grammar syntax node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Human-readable message
    pub message: String,
    /// Source location
    pub range: TextRange,
    /// Categorized code
    pub code: DiagnosticCode,
    /// Severity, defaults to the code's severity
    pub severity: Severity,
    /// Optional suggestion for fixing the grammar
    pub hint: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic with the code's default severity
    pub fn new(message: impl Into<String>, range: TextRange, code: DiagnosticCode) -> Self {
        Self {
            message: message.into(),
            range,
            code,
            severity: code.severity(),
            hint: None,
        }
    }

    /// Create a diagnostic using the code's default message
    pub fn from_code(code: DiagnosticCode, range: TextRange) -> Self {
        Self::new(code.default_message(), range, code)
    }

    /// Add a hint to this diagnostic
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Set the severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Check if this diagnostic is an error
    pub fn is_error(&self) -> bool {
        self.severity.is_error()
    }

    /// Format the diagnostic for display
    pub fn format(&self) -> String {
        let mut result = format!("{}[{}]: {}", self.severity.as_str(), self.code, self.message);
        if let Some(hint) = &self.hint {
            result.push_str(&format!("\n  hint: {}", hint));
        }
        result
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}
