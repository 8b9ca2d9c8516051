//! Grammar diagnostics
//!
//! This module provides the diagnostics boundary used while compiling a
//! grammar:
//! - Categorized codes for filtering and documentation
//! - Severity levels and hints
//! - The [`DiagnosticSink`] trait and a collecting implementation

mod codes;
mod error;
mod sink;

pub use codes::DiagnosticCode;
pub use error::{Diagnostic, Severity};
pub use sink::{DiagnosticCollector, DiagnosticSink};
