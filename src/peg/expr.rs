//! Parsing-expression combinator tree.

use std::fmt;

use smol_str::SmolStr;
use text_size::TextRange;

use super::grammar::GrammarId;

/// A deferred rule reference.
///
/// Holds the referenced name and the grammar it belongs to, never the
/// referenced expression itself. [`crate::peg::Grammar::resolve`] looks the
/// name up when the reference is used, so mutually recursive rules need no
/// cyclic structure.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameRef {
    grammar: GrammarId,
    name: SmolStr,
    range: TextRange,
}

impl NameRef {
    pub fn new(grammar: GrammarId, name: impl Into<SmolStr>, range: TextRange) -> Self {
        Self {
            grammar,
            name: name.into(),
            range,
        }
    }

    /// Grammar this reference is resolved against.
    pub fn grammar(&self) -> GrammarId {
        self.grammar
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source range of the reference in the grammar text.
    pub fn range(&self) -> TextRange {
        self.range
    }
}

/// A compiled parsing expression.
///
/// The variant set is closed: the compiler produces exactly these, and every
/// consumer (execution engine, code generator) handles them exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParsingExpression {
    /// Always succeeds without consuming input
    Empty,
    /// Any single character
    Any,
    /// Never matches
    Fail,
    /// A literal string
    Char(SmolStr),
    /// Match if the next character is in `chars` or within any `(low, high)`
    /// pair of `ranges` (stored flat: low, high, low, high, ...)
    Range { chars: SmolStr, ranges: SmolStr },
    /// Reference to another rule
    Ref(NameRef),
    /// Sequence of two or more expressions
    Seq(Vec<ParsingExpression>),
    /// Ordered choice between two or more expressions
    Ore(Vec<ParsingExpression>),
    /// Zero or more
    Many(Box<ParsingExpression>),
    /// One or more
    OneMany(Box<ParsingExpression>),
    /// Zero or one
    Option(Box<ParsingExpression>),
    /// Positive lookahead
    And(Box<ParsingExpression>),
    /// Negative lookahead
    Not(Box<ParsingExpression>),
    /// Build a tree node tagged `tag` around the match
    Node {
        inner: Box<ParsingExpression>,
        tag: SmolStr,
        shift: i32,
    },
    /// Attach the subtree built by `inner` under edge `label`
    Edge {
        label: SmolStr,
        inner: Box<ParsingExpression>,
    },
    /// Fold the left-hand tree into a new node under edge `label`
    Fold {
        label: SmolStr,
        inner: Box<ParsingExpression>,
        tag: SmolStr,
        shift: i32,
    },
    /// Semantic action `func` over `params`; `inner` is what it recognizes
    Action {
        inner: Box<ParsingExpression>,
        func: SmolStr,
        params: Vec<ParsingExpression>,
        range: TextRange,
    },
}

impl ParsingExpression {
    /// Build a flattened sequence.
    ///
    /// Nested sequences are spliced in; zero operands give `Empty` and a
    /// single operand is returned as is.
    pub fn seq(operands: impl IntoIterator<Item = ParsingExpression>) -> Self {
        let mut flat = Vec::new();
        for operand in operands {
            match operand {
                Self::Seq(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => Self::Empty,
            1 => flat.remove(0),
            _ => Self::Seq(flat),
        }
    }

    /// Build a flattened ordered choice.
    ///
    /// Nested choices are spliced in; zero operands give `Fail` and a single
    /// operand is returned as is.
    pub fn ore(operands: impl IntoIterator<Item = ParsingExpression>) -> Self {
        let mut flat = Vec::new();
        for operand in operands {
            match operand {
                Self::Ore(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => Self::Fail,
            1 => flat.remove(0),
            _ => Self::Ore(flat),
        }
    }

    pub fn char(text: impl Into<SmolStr>) -> Self {
        Self::Char(text.into())
    }

    pub fn many(inner: Self) -> Self {
        Self::Many(Box::new(inner))
    }

    pub fn one_many(inner: Self) -> Self {
        Self::OneMany(Box::new(inner))
    }

    pub fn option(inner: Self) -> Self {
        Self::Option(Box::new(inner))
    }

    pub fn and(inner: Self) -> Self {
        Self::And(Box::new(inner))
    }

    pub fn not(inner: Self) -> Self {
        Self::Not(Box::new(inner))
    }

    /// The reference held by a `Ref` expression.
    pub fn as_name_ref(&self) -> Option<&NameRef> {
        match self {
            Self::Ref(r) => Some(r),
            _ => None,
        }
    }

    /// Direct sub-expressions, in order.
    ///
    /// For `Action` this is `params`; `inner` is the first parameter (or
    /// `Empty`) and is not listed twice.
    pub fn children(&self) -> Vec<&ParsingExpression> {
        match self {
            Self::Empty | Self::Any | Self::Fail | Self::Char(_) | Self::Range { .. } | Self::Ref(_) => {
                Vec::new()
            }
            Self::Seq(es) | Self::Ore(es) => es.iter().collect(),
            Self::Many(e) | Self::OneMany(e) | Self::Option(e) | Self::And(e) | Self::Not(e) => {
                vec![&**e]
            }
            Self::Node { inner, .. } | Self::Edge { inner, .. } | Self::Fold { inner, .. } => {
                vec![&**inner]
            }
            Self::Action { params, .. } => params.iter().collect(),
        }
    }

    /// Every rule reference in this expression, depth first.
    pub fn references(&self) -> Vec<&NameRef> {
        let mut refs = Vec::new();
        self.collect_references(&mut refs);
        refs
    }

    fn collect_references<'a>(&'a self, refs: &mut Vec<&'a NameRef>) {
        if let Self::Ref(r) = self {
            refs.push(r);
        }
        for child in self.children() {
            child.collect_references(refs);
        }
    }

    /// The pure recognizer for this expression.
    ///
    /// Drops tagging, edges, folds and actions, keeping only what decides
    /// whether input matches. This is exactly what pure-recognizer
    /// compilation produces for the same syntax tree.
    pub fn recognizer(&self) -> Self {
        match self {
            Self::Node { inner, .. }
            | Self::Edge { inner, .. }
            | Self::Fold { inner, .. }
            | Self::Action { inner, .. } => inner.recognizer(),
            Self::Seq(es) => Self::seq(es.iter().map(Self::recognizer)),
            Self::Ore(es) => Self::ore(es.iter().map(Self::recognizer)),
            Self::Many(e) => Self::many(e.recognizer()),
            Self::OneMany(e) => Self::one_many(e.recognizer()),
            Self::Option(e) => Self::option(e.recognizer()),
            Self::And(e) => Self::and(e.recognizer()),
            Self::Not(e) => Self::not(e.recognizer()),
            leaf => leaf.clone(),
        }
    }

    /// Binding strength when printed: choice < sequence < prefix < postfix < primary.
    fn precedence(&self) -> u8 {
        match self {
            Self::Ore(_) => 0,
            Self::Seq(_) => 1,
            Self::And(_) | Self::Not(_) | Self::Edge { .. } => 2,
            Self::Many(_) | Self::OneMany(_) | Self::Option(_) => 3,
            _ => 4,
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>, min: u8) -> fmt::Result {
        if self.precedence() < min {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }

    fn fmt_joined(
        f: &mut fmt::Formatter<'_>,
        es: &[ParsingExpression],
        sep: &str,
        min: u8,
    ) -> fmt::Result {
        for (i, e) in es.iter().enumerate() {
            if i > 0 {
                f.write_str(sep)?;
            }
            e.fmt_operand(f, min)?;
        }
        Ok(())
    }
}

/// Write `text` with the escapes the TPEG decoder understands.
fn write_escaped(f: &mut fmt::Formatter<'_>, text: &str, special: &[char]) -> fmt::Result {
    for c in text.chars() {
        match c {
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            '\\' => f.write_str("\\\\")?,
            c if special.contains(&c) => write!(f, "\\{}", c)?,
            c if (c as u32) < 0x20 => write!(f, "\\x{:02x}", c as u32)?,
            c => write!(f, "{}", c)?,
        }
    }
    Ok(())
}

/// Renders the expression in TPEG notation.
impl fmt::Display for ParsingExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("''"),
            Self::Any => f.write_str("."),
            Self::Fail => f.write_str("!''"),
            Self::Char(text) => {
                f.write_str("'")?;
                write_escaped(f, text, &['\''])?;
                f.write_str("'")
            }
            Self::Range { chars, ranges } => {
                f.write_str("[")?;
                write_escaped(f, chars, &[']', '-'])?;
                let bounds: Vec<char> = ranges.chars().collect();
                for pair in bounds.chunks(2) {
                    if let [low, high] = pair {
                        write_escaped(f, &low.to_string(), &[']', '-'])?;
                        f.write_str("-")?;
                        write_escaped(f, &high.to_string(), &[']', '-'])?;
                    }
                }
                f.write_str("]")
            }
            Self::Ref(r) => f.write_str(r.name()),
            Self::Seq(es) => Self::fmt_joined(f, es, " ", 2),
            Self::Ore(es) => Self::fmt_joined(f, es, " / ", 1),
            Self::Many(e) => {
                e.fmt_operand(f, 4)?;
                f.write_str("*")
            }
            Self::OneMany(e) => {
                e.fmt_operand(f, 4)?;
                f.write_str("+")
            }
            Self::Option(e) => {
                e.fmt_operand(f, 4)?;
                f.write_str("?")
            }
            Self::And(e) => {
                f.write_str("&")?;
                e.fmt_operand(f, 2)
            }
            Self::Not(e) => {
                f.write_str("!")?;
                e.fmt_operand(f, 2)
            }
            Self::Node { inner, tag, .. } => {
                write!(f, "{{ {}", inner)?;
                if !tag.is_empty() {
                    write!(f, " #{}", tag)?;
                }
                f.write_str(" }")
            }
            Self::Edge { label, inner } => {
                write!(f, "{}: ", label)?;
                inner.fmt_operand(f, 2)
            }
            Self::Fold {
                label, inner, tag, ..
            } => {
                f.write_str("^")?;
                if !label.is_empty() {
                    write!(f, "{}: ", label)?;
                }
                write!(f, "{{ {}", inner)?;
                if !tag.is_empty() {
                    write!(f, " #{}", tag)?;
                }
                f.write_str(" }")
            }
            Self::Action { func, params, .. } => {
                write!(f, "@{}(", func)?;
                Self::fmt_joined(f, params, ", ", 0)?;
                f.write_str(")")
            }
        }
    }
}
