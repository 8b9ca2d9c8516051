//! Rowan-based syntax tree boundary for TPEG grammars
//!
//! The meta-grammar parser itself lives outside this crate. This module fixes
//! the tree it must hand over:
//! - **rowan** for the CST (Concrete Syntax Tree), rooted at `SOURCE`
//! - typed AST wrappers the compiler reads rules, examples and expressions from
//!
//! ## Architecture
//!
//! ```text
//! Grammar source text
//!     ↓
//! GrammarParser (external) → Parse { GreenNode, SyntaxError* }
//!     ↓
//! SyntaxNode (rowan) → CST with parent pointers
//!     ↓
//! AST layer → SourceFile / Rule / Example / Expr
//!     ↓
//! compile → ParsingExpression per rule
//! ```

pub mod ast;
pub mod builder;
pub mod errors;
mod parse;
mod syntax_kind;

pub use ast::*;
pub use builder::{ExprBuilder, SourceBuilder};
pub use errors::{Diagnostic, DiagnosticCode, DiagnosticCollector, DiagnosticSink, Severity};
pub use parse::{GrammarParser, Parse, SyntaxError};
pub use syntax_kind::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken, TpegLanguage};

/// Re-export rowan types for convenience
pub use rowan::{GreenNode, TextRange, TextSize};
