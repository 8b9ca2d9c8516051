//! The compiled grammar model: parsing expressions and rule tables.

mod expr;
mod grammar;

pub use expr::{NameRef, ParsingExpression};
pub use grammar::{Grammar, GrammarId};
