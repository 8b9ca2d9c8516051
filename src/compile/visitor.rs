//! Syntax-tree to expression-tree compilation.

use smol_str::SmolStr;

use super::class::build_class;
use super::escape::decode_all;
use crate::base::constants::is_transparent_function;
use crate::parser::{
    AstNode, Diagnostic, DiagnosticCode, DiagnosticSink, Expr, SyntaxKind, SyntaxNode,
};
use crate::peg::{GrammarId, NameRef, ParsingExpression};

/// Compiles rule bodies of one grammar into [`ParsingExpression`] trees.
///
/// In pure mode tree construction and semantic actions are stripped so the
/// result only recognizes input. Anomalies go to the sink and compilation
/// carries on with a documented fallback.
pub struct ExprCompiler<'a> {
    grammar: GrammarId,
    pure_peg: bool,
    sink: &'a mut dyn DiagnosticSink,
}

impl<'a> ExprCompiler<'a> {
    pub fn new(grammar: GrammarId, pure_peg: bool, sink: &'a mut dyn DiagnosticSink) -> Self {
        Self {
            grammar,
            pure_peg,
            sink,
        }
    }

    pub fn is_pure(&self) -> bool {
        self.pure_peg
    }

    /// Compile one expression node.
    pub fn compile(&mut self, expr: &Expr) -> ParsingExpression {
        match expr.kind() {
            SyntaxKind::EMPTY => ParsingExpression::Empty,
            SyntaxKind::ANY => ParsingExpression::Any,
            SyntaxKind::CHAR => ParsingExpression::char(decode_all(&expr.token_text())),
            SyntaxKind::CLASS => build_class(&expr.token_text()),
            SyntaxKind::NAME | SyntaxKind::QUOTED => self.compile_name(expr),
            SyntaxKind::MANY => ParsingExpression::many(self.compile_operand(expr)),
            SyntaxKind::ONE_MANY => ParsingExpression::one_many(self.compile_operand(expr)),
            SyntaxKind::OPTION => ParsingExpression::option(self.compile_operand(expr)),
            SyntaxKind::AND => ParsingExpression::and(self.compile_operand(expr)),
            SyntaxKind::NOT => ParsingExpression::not(self.compile_operand(expr)),
            SyntaxKind::SEQ => ParsingExpression::seq(self.compile_operands(expr)),
            SyntaxKind::ORE => ParsingExpression::ore(self.compile_operands(expr)),
            SyntaxKind::ALT => {
                self.sink.report(
                    Diagnostic::from_code(DiagnosticCode::W0102, expr.range())
                        .with_hint("use '/' for ordered choice"),
                );
                ParsingExpression::ore(self.compile_operands(expr))
            }
            SyntaxKind::NODE => self.compile_node(expr),
            SyntaxKind::EDGE => self.compile_edge(expr),
            SyntaxKind::FOLD => self.compile_fold(expr),
            SyntaxKind::FUNC => self.compile_func(expr),
            _ => self.unexpected(expr.syntax()),
        }
    }

    /// A node with no expression meaning, such as an `ERROR` node left by
    /// the parser. Reports E0202 and compiles to `Fail`.
    fn unexpected(&mut self, node: &SyntaxNode) -> ParsingExpression {
        self.sink.error(
            DiagnosticCode::E0202,
            node.text_range(),
            format!("unexpected syntax node {:?}", node.kind()),
        );
        ParsingExpression::Fail
    }

    fn compile_child(&mut self, node: SyntaxNode) -> ParsingExpression {
        match Expr::cast(node.clone()) {
            Some(expr) => self.compile(&expr),
            None => self.unexpected(&node),
        }
    }

    fn compile_name(&self, expr: &Expr) -> ParsingExpression {
        ParsingExpression::Ref(NameRef::new(
            self.grammar,
            expr.token_text(),
            expr.range(),
        ))
    }

    /// The single operand of a unary or tree node; `Empty` when missing.
    fn compile_operand(&mut self, expr: &Expr) -> ParsingExpression {
        match operand_nodes(expr).next() {
            Some(node) => self.compile_child(node),
            None => ParsingExpression::Empty,
        }
    }

    fn compile_operands(&mut self, expr: &Expr) -> Vec<ParsingExpression> {
        operand_nodes(expr)
            .map(|node| self.compile_child(node))
            .collect()
    }

    fn compile_node(&mut self, expr: &Expr) -> ParsingExpression {
        let inner = self.compile_operand(expr);
        if self.pure_peg {
            return inner;
        }
        ParsingExpression::Node {
            inner: Box::new(inner),
            tag: tag_of(expr),
            shift: 0,
        }
    }

    fn compile_edge(&mut self, expr: &Expr) -> ParsingExpression {
        let inner = self.compile_operand(expr);
        if self.pure_peg {
            return inner;
        }
        ParsingExpression::Edge {
            label: label_of(expr),
            inner: Box::new(inner),
        }
    }

    fn compile_fold(&mut self, expr: &Expr) -> ParsingExpression {
        let inner = self.compile_operand(expr);
        if self.pure_peg {
            return inner;
        }
        ParsingExpression::Fold {
            label: label_of(expr),
            inner: Box::new(inner),
            tag: tag_of(expr),
            shift: 0,
        }
    }

    fn compile_func(&mut self, expr: &Expr) -> ParsingExpression {
        let func: SmolStr = expr
            .func_name()
            .map(|t| SmolStr::new(t.text()))
            .unwrap_or_default();
        let params = self.compile_operands(expr);

        if is_transparent_function(&func) {
            let first = match params.first() {
                Some(first) => first.clone(),
                None => {
                    self.sink.warning(
                        DiagnosticCode::W0104,
                        expr.range(),
                        format!("@{} expects an argument", func),
                    );
                    ParsingExpression::Empty
                }
            };
            if self.pure_peg {
                return first;
            }
            return ParsingExpression::Action {
                inner: Box::new(first),
                func,
                params,
                range: expr.range(),
            };
        }

        if self.pure_peg {
            self.sink.warning(
                DiagnosticCode::W0103,
                expr.range(),
                format!("@{} has no effect in a pure grammar", func),
            );
            return ParsingExpression::Empty;
        }
        ParsingExpression::Action {
            inner: Box::new(ParsingExpression::Empty),
            func,
            params,
            range: expr.range(),
        }
    }
}

/// Child nodes in operand position. Tags and labels decorate the parent and
/// are not operands; anything else that is not an expression is an error.
fn operand_nodes(expr: &Expr) -> impl Iterator<Item = SyntaxNode> {
    expr.syntax()
        .children()
        .filter(|n| !matches!(n.kind(), SyntaxKind::TAG | SyntaxKind::LABEL))
}

fn tag_of(expr: &Expr) -> SmolStr {
    expr.tag().map(|t| SmolStr::new(t.name())).unwrap_or_default()
}

fn label_of(expr: &Expr) -> SmolStr {
    expr.label()
        .map(|l| SmolStr::new(l.name()))
        .unwrap_or_default()
}
