//! Syntax kinds for the Rowan-based grammar CST
//!
//! This enum defines every node and token kind the external TPEG parser may
//! put in a syntax tree. Expression nodes carry one kind per grammar
//! construct; the compiler dispatches on them.

/// All syntax kinds (tokens and nodes) of a TPEG grammar tree
///
/// Tokens are leaf nodes (identifiers, literal text, punctuation).
/// Nodes are composite (rules, examples, expressions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    COMMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,              // Rule, tag or function name
    QUOTED_NAME,        // "if" (quotes included in the token text)
    TEXT,               // raw literal or class content between delimiters

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    QUOTE,              // '
    DOC_DELIM,          // '''
    L_BRACKET,          // [
    R_BRACKET,          // ]
    L_PAREN,            // (
    R_PAREN,            // )
    L_BRACE,            // {
    R_BRACE,            // }
    EQ,                 // =
    LEFT_ARROW,         // <-
    SLASH,              // /
    PIPE,               // |
    STAR,               // *
    PLUS,               // +
    QUESTION,           // ?
    AMP,                // &
    BANG,               // !
    DOT,                // .
    HASH,               // #
    COLON,              // :
    CARET,              // ^
    AT,                 // @
    COMMA,              // ,
    SEMICOLON,          // ;

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    EXAMPLE_KW,

    // =========================================================================
    // STATEMENT NODES
    // =========================================================================
    SOURCE,             // Root of a grammar source
    RULE,               // A = e
    EXAMPLE,            // example A, B '''doc'''
    DOC,                // '''doc'''
    TAG,                // #Tag
    LABEL,              // label:
    ERROR,              // Unparseable region reported by the parser

    // =========================================================================
    // EXPRESSION NODES
    // =========================================================================
    EMPTY,              // ()
    ANY,                // .
    CHAR,               // 'abc'
    CLASS,              // [a-z]
    NAME,               // A
    QUOTED,             // "if"
    MANY,               // e*
    ONE_MANY,           // e+
    OPTION,             // e?
    AND,                // &e
    NOT,                // !e
    SEQ,                // e1 e2
    ORE,                // e1 / e2
    ALT,                // e1 | e2
    NODE,               // { e #Tag }
    EDGE,               // label: e
    FOLD,               // ^label: { e #Tag }
    FUNC,               // @func(e, ...)

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::COMMENT)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::QUOTE as u16) && (self as u16) <= (Self::SEMICOLON as u16)
    }

    /// Check if this is an expression node kind
    pub fn is_expression(self) -> bool {
        (self as u16) >= (Self::EMPTY as u16) && (self as u16) <= (Self::FUNC as u16)
    }

    /// Check if this token kind can name a rule
    pub fn is_rule_name(self) -> bool {
        matches!(self, Self::IDENT | Self::QUOTED_NAME)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TpegLanguage {}

impl rowan::Language for TpegLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<TpegLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<TpegLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<TpegLanguage>;
