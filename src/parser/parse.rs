//! The parse result handed over by the external TPEG parser.

use rowan::{GreenNode, TextRange};

use super::ast::{AstNode, SourceFile};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Create a parse result from a finished green tree
    pub fn new(green: GreenNode, errors: Vec<SyntaxError>) -> Self {
        Self { green, errors }
    }

    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Get the typed root, if the tree is rooted at a `SOURCE` node
    pub fn source_file(&self) -> Option<SourceFile> {
        SourceFile::cast(self.syntax())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// The meta-grammar parser boundary.
///
/// Implementors turn grammar source text into a `SOURCE`-rooted CST. `urn`
/// identifies the source (a file path or a logical name for inline text).
/// Syntax errors are reported through [`Parse::errors`], never by panicking.
pub trait GrammarParser {
    fn parse(&self, text: &str, urn: &str) -> Parse;
}

impl<F> GrammarParser for F
where
    F: Fn(&str, &str) -> Parse,
{
    fn parse(&self, text: &str, urn: &str) -> Parse {
        self(text, urn)
    }
}
