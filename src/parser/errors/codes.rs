//! Diagnostic code definitions for grammar loading
//!
//! Codes follow a naming convention: {severity}{category}{number}
//! - W01xx: Recoverable semantic warnings (compilation continues)
//! - E02xx: Errors in the grammar syntax tree

use std::fmt;

use super::error::Severity;

/// Diagnostic codes reported while compiling a grammar
///
/// Each code represents one documented anomaly, enabling filtering and
/// tests that assert on what was reported rather than on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    // =========================================================================
    // W01xx: Recoverable semantic warnings
    // =========================================================================
    /// A rule name is defined more than once; the first definition is kept
    W0101,
    /// Unordered choice is compiled as ordered choice
    W0102,
    /// A semantic action has no effect in a pure recognizer
    W0103,
    /// A transparent action was given no argument
    W0104,

    // =========================================================================
    // E02xx: Syntax tree errors
    // =========================================================================
    /// The meta-grammar parser reported a syntax error
    E0201,
    /// A node the compiler does not understand
    E0202,
}

impl DiagnosticCode {
    /// Get the string representation of the code (e.g., "W0101")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::W0101 => "W0101",
            Self::W0102 => "W0102",
            Self::W0103 => "W0103",
            Self::W0104 => "W0104",
            Self::E0201 => "E0201",
            Self::E0202 => "E0202",
        }
    }

    /// Get a short description of the code category
    pub fn category_description(&self) -> &'static str {
        match self {
            Self::W0101 | Self::W0102 | Self::W0103 | Self::W0104 => "semantic warning",
            Self::E0201 | Self::E0202 => "syntax error",
        }
    }

    /// Get the default message for this code
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::W0101 => "redefined name",
            Self::W0102 => "unordered choice is not supported",
            Self::W0103 => "action has no effect in a pure grammar",
            Self::W0104 => "action expects an argument",
            Self::E0201 => "syntax error in grammar",
            Self::E0202 => "unexpected syntax node",
        }
    }

    /// Severity a diagnostic with this code is reported with
    pub fn severity(&self) -> Severity {
        match self {
            Self::W0101 | Self::W0102 | Self::W0103 | Self::W0104 => Severity::Warning,
            Self::E0201 | Self::E0202 => Severity::Error,
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
