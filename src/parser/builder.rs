//! Programmatic construction of grammar syntax trees.
//!
//! External TPEG parsers can use [`SourceBuilder`] to emit a CST with the
//! exact shape the typed AST layer expects. The builder also writes
//! whitespace and punctuation tokens, so the tree text reads as TPEG source and
//! every node carries a meaningful text range.
//!
//! ```ignore
//! let mut source = SourceBuilder::new();
//! source.rule("A", |e| {
//!     e.seq(|e| {
//!         e.char("x").option(|e| {
//!             e.name("A");
//!         });
//!     });
//! });
//! let parse = source.finish();
//! assert_eq!(parse.syntax().to_string(), "A = 'x' A?\n");
//! ```

use rowan::{GreenNodeBuilder, TextRange, TextSize};

use super::parse::{Parse, SyntaxError};
use super::syntax_kind::SyntaxKind;

/// Green builder that tracks the text offset of the next token.
struct Emitter {
    builder: GreenNodeBuilder<'static>,
    offset: TextSize,
}

impl Emitter {
    fn start(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn finish(&mut self) {
        self.builder.finish_node();
    }

    fn token(&mut self, kind: SyntaxKind, text: &str) {
        self.builder.token(kind.into(), text);
        self.offset += TextSize::of(text);
    }

    fn space(&mut self) {
        self.token(SyntaxKind::WHITESPACE, " ");
    }

    fn newline(&mut self) {
        self.token(SyntaxKind::WHITESPACE, "\n");
    }

    fn name(&mut self, name: &str) {
        let kind = if name.starts_with('"') {
            SyntaxKind::QUOTED_NAME
        } else {
            SyntaxKind::IDENT
        };
        self.token(kind, name);
    }
}

/// Builds a `SOURCE`-rooted grammar tree statement by statement.
pub struct SourceBuilder {
    emitter: Emitter,
    errors: Vec<SyntaxError>,
}

impl SourceBuilder {
    pub fn new() -> Self {
        let mut emitter = Emitter {
            builder: GreenNodeBuilder::new(),
            offset: TextSize::new(0),
        };
        emitter.start(SyntaxKind::SOURCE);
        Self {
            emitter,
            errors: Vec::new(),
        }
    }

    /// Add `name = body`. Names starting with `"` become quoted names.
    pub fn rule(&mut self, name: &str, body: impl FnOnce(&mut ExprBuilder<'_>)) -> &mut Self {
        let e = &mut self.emitter;
        e.start(SyntaxKind::RULE);
        e.name(name);
        e.space();
        e.token(SyntaxKind::EQ, "=");
        e.space();
        body(&mut ExprBuilder::new(e, Separator::Space));
        e.finish();
        e.newline();
        self
    }

    /// Add `example A, B '''doc'''`.
    pub fn example(&mut self, names: &[&str], doc: &str) -> &mut Self {
        let e = &mut self.emitter;
        e.start(SyntaxKind::EXAMPLE);
        e.token(SyntaxKind::EXAMPLE_KW, "example");
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                e.token(SyntaxKind::COMMA, ",");
            }
            e.space();
            e.name(name);
        }
        e.space();
        e.start(SyntaxKind::DOC);
        e.token(SyntaxKind::DOC_DELIM, "'''");
        if !doc.is_empty() {
            e.token(SyntaxKind::TEXT, doc);
        }
        e.token(SyntaxKind::DOC_DELIM, "'''");
        e.finish();
        e.finish();
        e.newline();
        self
    }

    /// Add a line comment.
    pub fn comment(&mut self, text: &str) -> &mut Self {
        self.emitter.token(SyntaxKind::COMMENT, &format!("// {text}"));
        self.emitter.newline();
        self
    }

    /// Add an unparseable region and record a syntax error covering it.
    pub fn error(&mut self, text: &str, message: &str) -> &mut Self {
        let range = TextRange::at(self.emitter.offset, TextSize::of(text));
        self.emitter.start(SyntaxKind::ERROR);
        self.emitter.token(SyntaxKind::TEXT, text);
        self.emitter.finish();
        self.emitter.newline();
        self.errors.push(SyntaxError::new(message, range));
        self
    }

    /// Close the root node and hand out the parse result.
    pub fn finish(self) -> Parse {
        let Self {
            mut emitter,
            errors,
        } = self;
        emitter.finish();
        Parse::new(emitter.builder.finish(), errors)
    }
}

impl Default for SourceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// How sibling expressions are separated in the emitted text.
#[derive(Debug, Clone, Copy)]
enum Separator {
    Space,
    Slash,
    Pipe,
    Comma,
}

/// Emits expression nodes into the enclosing rule or expression.
///
/// Every method emits exactly one expression node; closures passed to
/// composite constructs emit that construct's operands.
pub struct ExprBuilder<'a> {
    emitter: &'a mut Emitter,
    separator: Separator,
    emitted: usize,
}

impl<'a> ExprBuilder<'a> {
    fn new(emitter: &'a mut Emitter, separator: Separator) -> Self {
        Self {
            emitter,
            separator,
            emitted: 0,
        }
    }

    fn open(&mut self, kind: SyntaxKind) {
        if self.emitted > 0 {
            match self.separator {
                Separator::Space => self.emitter.space(),
                Separator::Slash => {
                    self.emitter.space();
                    self.emitter.token(SyntaxKind::SLASH, "/");
                    self.emitter.space();
                }
                Separator::Pipe => {
                    self.emitter.space();
                    self.emitter.token(SyntaxKind::PIPE, "|");
                    self.emitter.space();
                }
                Separator::Comma => {
                    self.emitter.token(SyntaxKind::COMMA, ",");
                    self.emitter.space();
                }
            }
        }
        self.emitted += 1;
        self.emitter.start(kind);
    }

    fn close(&mut self) -> &mut Self {
        self.emitter.finish();
        self
    }

    fn nested(&mut self, separator: Separator, f: impl FnOnce(&mut ExprBuilder<'_>)) {
        f(&mut ExprBuilder::new(self.emitter, separator));
    }

    fn leaf(&mut self, kind: SyntaxKind, tokens: &[(SyntaxKind, &str)]) -> &mut Self {
        self.open(kind);
        for (token, text) in tokens {
            self.emitter.token(*token, text);
        }
        self.close()
    }

    fn postfix(
        &mut self,
        kind: SyntaxKind,
        op: (SyntaxKind, &str),
        f: impl FnOnce(&mut ExprBuilder<'_>),
    ) -> &mut Self {
        self.open(kind);
        self.nested(Separator::Space, f);
        self.emitter.token(op.0, op.1);
        self.close()
    }

    fn prefix(
        &mut self,
        kind: SyntaxKind,
        op: (SyntaxKind, &str),
        f: impl FnOnce(&mut ExprBuilder<'_>),
    ) -> &mut Self {
        self.open(kind);
        self.emitter.token(op.0, op.1);
        self.nested(Separator::Space, f);
        self.close()
    }

    /// `()`
    pub fn empty(&mut self) -> &mut Self {
        self.leaf(
            SyntaxKind::EMPTY,
            &[(SyntaxKind::L_PAREN, "("), (SyntaxKind::R_PAREN, ")")],
        )
    }

    /// An `ERROR` node in operand position, as a recovering parser leaves
    /// behind. No syntax error is recorded.
    pub fn error(&mut self, text: &str) -> &mut Self {
        self.leaf(SyntaxKind::ERROR, &[(SyntaxKind::TEXT, text)])
    }

    /// `.`
    pub fn any(&mut self) -> &mut Self {
        self.leaf(SyntaxKind::ANY, &[(SyntaxKind::DOT, ".")])
    }

    /// `'text'`, with `text` kept undecoded.
    pub fn char(&mut self, text: &str) -> &mut Self {
        self.open(SyntaxKind::CHAR);
        self.emitter.token(SyntaxKind::QUOTE, "'");
        if !text.is_empty() {
            self.emitter.token(SyntaxKind::TEXT, text);
        }
        self.emitter.token(SyntaxKind::QUOTE, "'");
        self.close()
    }

    /// `[text]`, with `text` kept undecoded.
    pub fn class(&mut self, text: &str) -> &mut Self {
        self.open(SyntaxKind::CLASS);
        self.emitter.token(SyntaxKind::L_BRACKET, "[");
        if !text.is_empty() {
            self.emitter.token(SyntaxKind::TEXT, text);
        }
        self.emitter.token(SyntaxKind::R_BRACKET, "]");
        self.close()
    }

    /// A plain rule reference.
    pub fn name(&mut self, name: &str) -> &mut Self {
        self.leaf(SyntaxKind::NAME, &[(SyntaxKind::IDENT, name)])
    }

    /// A quoted rule reference; `name` is given without quotes.
    pub fn quoted(&mut self, name: &str) -> &mut Self {
        let quoted = format!("\"{name}\"");
        self.leaf(SyntaxKind::QUOTED, &[(SyntaxKind::QUOTED_NAME, quoted.as_str())])
    }

    /// `e*`
    pub fn many(&mut self, f: impl FnOnce(&mut ExprBuilder<'_>)) -> &mut Self {
        self.postfix(SyntaxKind::MANY, (SyntaxKind::STAR, "*"), f)
    }

    /// `e+`
    pub fn one_many(&mut self, f: impl FnOnce(&mut ExprBuilder<'_>)) -> &mut Self {
        self.postfix(SyntaxKind::ONE_MANY, (SyntaxKind::PLUS, "+"), f)
    }

    /// `e?`
    pub fn option(&mut self, f: impl FnOnce(&mut ExprBuilder<'_>)) -> &mut Self {
        self.postfix(SyntaxKind::OPTION, (SyntaxKind::QUESTION, "?"), f)
    }

    /// `&e`
    pub fn and(&mut self, f: impl FnOnce(&mut ExprBuilder<'_>)) -> &mut Self {
        self.prefix(SyntaxKind::AND, (SyntaxKind::AMP, "&"), f)
    }

    /// `!e`
    pub fn not(&mut self, f: impl FnOnce(&mut ExprBuilder<'_>)) -> &mut Self {
        self.prefix(SyntaxKind::NOT, (SyntaxKind::BANG, "!"), f)
    }

    /// `e1 e2 ...`
    pub fn seq(&mut self, f: impl FnOnce(&mut ExprBuilder<'_>)) -> &mut Self {
        self.open(SyntaxKind::SEQ);
        self.nested(Separator::Space, f);
        self.close()
    }

    /// `e1 / e2 / ...`
    pub fn ore(&mut self, f: impl FnOnce(&mut ExprBuilder<'_>)) -> &mut Self {
        self.open(SyntaxKind::ORE);
        self.nested(Separator::Slash, f);
        self.close()
    }

    /// `e1 | e2 | ...`
    pub fn alt(&mut self, f: impl FnOnce(&mut ExprBuilder<'_>)) -> &mut Self {
        self.open(SyntaxKind::ALT);
        self.nested(Separator::Pipe, f);
        self.close()
    }

    /// `{ e #tag }`
    pub fn node(&mut self, tag: Option<&str>, f: impl FnOnce(&mut ExprBuilder<'_>)) -> &mut Self {
        self.open(SyntaxKind::NODE);
        self.braced(tag, f);
        self.close()
    }

    /// `label: e`
    pub fn edge(&mut self, label: &str, f: impl FnOnce(&mut ExprBuilder<'_>)) -> &mut Self {
        self.open(SyntaxKind::EDGE);
        self.label(label);
        self.nested(Separator::Space, f);
        self.close()
    }

    /// `^label: { e #tag }`
    pub fn fold(
        &mut self,
        label: Option<&str>,
        tag: Option<&str>,
        f: impl FnOnce(&mut ExprBuilder<'_>),
    ) -> &mut Self {
        self.open(SyntaxKind::FOLD);
        self.emitter.token(SyntaxKind::CARET, "^");
        if let Some(label) = label {
            self.label(label);
        }
        self.braced(tag, f);
        self.close()
    }

    /// `@name(arg, ...)`
    pub fn func(&mut self, name: &str, f: impl FnOnce(&mut ExprBuilder<'_>)) -> &mut Self {
        self.open(SyntaxKind::FUNC);
        self.emitter.token(SyntaxKind::AT, "@");
        self.emitter.token(SyntaxKind::IDENT, name);
        self.emitter.token(SyntaxKind::L_PAREN, "(");
        self.nested(Separator::Comma, f);
        self.emitter.token(SyntaxKind::R_PAREN, ")");
        self.close()
    }

    fn label(&mut self, label: &str) {
        self.emitter.start(SyntaxKind::LABEL);
        self.emitter.token(SyntaxKind::IDENT, label);
        self.emitter.token(SyntaxKind::COLON, ":");
        self.emitter.finish();
        self.emitter.space();
    }

    fn braced(&mut self, tag: Option<&str>, f: impl FnOnce(&mut ExprBuilder<'_>)) {
        self.emitter.token(SyntaxKind::L_BRACE, "{");
        self.emitter.space();
        self.nested(Separator::Space, f);
        if let Some(tag) = tag {
            self.emitter.space();
            self.emitter.start(SyntaxKind::TAG);
            self.emitter.token(SyntaxKind::HASH, "#");
            self.emitter.token(SyntaxKind::IDENT, tag);
            self.emitter.finish();
        }
        self.emitter.space();
        self.emitter.token(SyntaxKind::R_BRACE, "}");
    }
}
