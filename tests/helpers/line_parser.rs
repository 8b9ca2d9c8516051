//! A line-oriented stand-in for the TPEG meta-grammar parser.
//!
//! Understands one statement per line:
//! - `Name = body` or `Name <- body`, where `body` is `/`-separated
//!   alternatives of `'text'`, `[class]`, `.`, `()` and rule names, each
//!   optionally followed by `?`, `*` or `+`
//! - `example A,B doc text`
//! - `// comment`
//!
//! Any other line becomes an `ERROR` node with a syntax error.

use pegtree::parser::{ExprBuilder, Parse, SourceBuilder};

#[derive(Debug, Clone)]
enum Leaf {
    Char(String),
    Class(String),
    Any,
    Empty,
    Name(String),
}

type Term = (Leaf, Option<char>);

pub fn parse_lines(text: &str, _urn: &str) -> Parse {
    let mut source = SourceBuilder::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(comment) = line.strip_prefix("//") {
            source.comment(comment.trim());
            continue;
        }
        if let Some(rest) = line.strip_prefix("example ") {
            let (names, doc) = rest.split_once(' ').unwrap_or((rest, ""));
            let names: Vec<&str> = names.split(',').collect();
            source.example(&names, doc);
            continue;
        }

        let rule = line
            .split_once("<-")
            .or_else(|| line.split_once('='))
            .filter(|(name, _)| is_name(name.trim()));
        match rule.and_then(|(name, body)| Some((name.trim(), tokenize(body.trim())?))) {
            Some((name, alternatives)) => {
                source.rule(name, |e| emit(e, &alternatives));
            }
            None => {
                source.error(line, "expected a rule");
            }
        }
    }
    source.finish()
}

fn is_name(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_alphanumeric() || c == '_')
}

fn tokenize(body: &str) -> Option<Vec<Vec<Term>>> {
    let mut alternatives = vec![Vec::new()];
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        let leaf = match c {
            c if c.is_whitespace() => continue,
            '/' => {
                alternatives.push(Vec::new());
                continue;
            }
            '\'' => Leaf::Char(delimited(&mut chars, '\'')?),
            '[' => Leaf::Class(delimited(&mut chars, ']')?),
            '.' => Leaf::Any,
            '(' if chars.next_if_eq(&')').is_some() => Leaf::Empty,
            c if c.is_alphanumeric() || c == '_' => {
                let mut name = c.to_string();
                while let Some(c) = chars.next_if(|c| c.is_alphanumeric() || *c == '_') {
                    name.push(c);
                }
                Leaf::Name(name)
            }
            _ => return None,
        };
        let postfix = chars.next_if(|c| matches!(c, '?' | '*' | '+'));
        alternatives.last_mut()?.push((leaf, postfix));
    }
    Some(alternatives)
}

/// Raw text up to the closing delimiter, escapes left undecoded.
fn delimited(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, close: char) -> Option<String> {
    let mut raw = String::new();
    while let Some(c) = chars.next() {
        if c == close {
            return Some(raw);
        }
        raw.push(c);
        if c == '\\' {
            raw.push(chars.next()?);
        }
    }
    None
}

fn emit(e: &mut ExprBuilder<'_>, alternatives: &[Vec<Term>]) {
    if let [single] = alternatives {
        emit_seq(e, single);
    } else {
        e.ore(|e| {
            for alternative in alternatives {
                emit_seq(e, alternative);
            }
        });
    }
}

fn emit_seq(e: &mut ExprBuilder<'_>, terms: &[Term]) {
    match terms {
        [] => {
            e.empty();
        }
        [single] => emit_term(e, single),
        _ => {
            e.seq(|e| {
                for term in terms {
                    emit_term(e, term);
                }
            });
        }
    }
}

fn emit_term(e: &mut ExprBuilder<'_>, (leaf, postfix): &Term) {
    match postfix {
        Some('?') => {
            e.option(|e| emit_leaf(e, leaf));
        }
        Some('*') => {
            e.many(|e| emit_leaf(e, leaf));
        }
        Some('+') => {
            e.one_many(|e| emit_leaf(e, leaf));
        }
        _ => emit_leaf(e, leaf),
    }
}

fn emit_leaf(e: &mut ExprBuilder<'_>, leaf: &Leaf) {
    match leaf {
        Leaf::Char(raw) => e.char(raw),
        Leaf::Class(raw) => e.class(raw),
        Leaf::Any => e.any(),
        Leaf::Empty => e.empty(),
        Leaf::Name(name) => e.name(name),
    };
}
