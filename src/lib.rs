//! # pegtree-loader
//!
//! Grammar loader and expression compiler for TPEG, the grammar notation of
//! the pegtree parser generator.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project   → Search path, encoding, mtime-keyed grammar cache
//!   ↓
//! compile   → Escape decoding, character classes, expression compiler, registry
//!   ↓
//! peg       → ParsingExpression, Grammar, deferred NameRef
//!   ↓
//! parser    → Rowan CST boundary, typed AST, diagnostics
//!   ↓
//! base      → Primitives (TextRange, domain constants)
//! ```
//!
//! The TPEG meta-grammar parser is not part of this crate. It plugs in through
//! [`parser::GrammarParser`] and hands over a `SOURCE`-rooted syntax tree,
//! which [`parser::SourceBuilder`] can also produce directly.

// ============================================================================
// MODULES (dependency order: base → parser → peg → compile → project)
// ============================================================================

/// Foundation types: TextRange, domain constants
pub mod base;

/// Parser boundary: syntax kinds, CST/AST, diagnostics
pub mod parser;

/// Compiled grammar model
pub mod peg;

/// Syntax tree to expression tree compilation
pub mod compile;

/// Grammar loading and caching
pub mod project;

pub use base::{TextRange, TextSize};
pub use parser::{Diagnostic, DiagnosticCode, GrammarParser, Parse, Severity};
pub use peg::{Grammar, GrammarId, NameRef, ParsingExpression};
pub use project::{GrammarCache, GrammarLoader, LoadError, LoadOptions};
