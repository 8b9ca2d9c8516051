//! Grammar compilation
//!
//! Turns the syntax tree of a TPEG source into a [`crate::peg::Grammar`]:
//! - [`escape`] decodes escape sequences in literal and class tokens
//! - [`class`] builds character classes
//! - [`visitor`] compiles one expression node, honoring pure-recognizer mode
//! - [`registry`] collects rule bodies and assembles the grammar

pub mod class;
pub mod escape;
pub mod registry;
pub mod visitor;

pub use class::build_class;
pub use escape::{decode_all, decode_one};
pub use registry::GrammarRegistry;
pub use visitor::ExprCompiler;
