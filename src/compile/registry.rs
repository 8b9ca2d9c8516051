//! Per-load rule table and grammar assembly.

use indexmap::IndexMap;
use indexmap::map::Entry;
use rowan::TextRange;
use smol_str::SmolStr;

use super::visitor::ExprCompiler;
use crate::parser::{
    AstNode, DiagnosticCode, DiagnosticCollector, DiagnosticSink, Example, Expr, Rule,
    SourceFile, Statement,
};
use crate::peg::Grammar;

/// Collects rule bodies from a syntax tree and compiles them into a
/// [`Grammar`].
///
/// Registration only stores the unvisited body, so a rule may reference names
/// defined later in the file. Compilation happens in [`GrammarRegistry::finalize`].
pub struct GrammarRegistry {
    grammar: Grammar,
    names: IndexMap<SmolStr, Expr>,
    pure_peg: bool,
    diagnostics: DiagnosticCollector,
}

impl GrammarRegistry {
    pub fn new(grammar: Grammar, pure_peg: bool) -> Self {
        Self {
            grammar,
            names: IndexMap::new(),
            pure_peg,
            diagnostics: DiagnosticCollector::new(),
        }
    }

    /// Register every rule and example of `file`, in source order.
    pub fn load(&mut self, file: &SourceFile) {
        for statement in file.statements() {
            match statement {
                Statement::Rule(rule) => self.load_rule(&rule),
                Statement::Example(example) => self.load_example(&example),
            }
        }
    }

    fn load_rule(&mut self, rule: &Rule) {
        match (rule.name_token(), rule.body()) {
            (Some(name), Some(body)) => {
                self.register(name.text(), name.text_range(), body);
            }
            _ => self.diagnostics.error(
                DiagnosticCode::E0202,
                rule.range(),
                "rule without a name or body".to_string(),
            ),
        }
    }

    fn load_example(&mut self, example: &Example) {
        let doc = example.doc().map(|d| d.text()).unwrap_or_default();
        for name in example.names() {
            self.record_example(&name, doc.clone());
        }
    }

    /// Store the body of rule `name`.
    ///
    /// The first definition wins: a redefinition is reported as a warning at
    /// `range` and discarded. Returns whether the body was stored.
    pub fn register(&mut self, name: &str, range: TextRange, body: Expr) -> bool {
        match self.names.entry(SmolStr::new(name)) {
            Entry::Occupied(_) => {
                self.diagnostics.warning(
                    DiagnosticCode::W0101,
                    range,
                    format!("redefined name {}", name),
                );
                false
            }
            Entry::Vacant(entry) => {
                entry.insert(body);
                true
            }
        }
    }

    /// Append an example for rule `name`.
    pub fn record_example(&mut self, name: &str, doc: String) {
        self.grammar.push_example(SmolStr::new(name), doc);
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    pub fn diagnostics(&self) -> &DiagnosticCollector {
        &self.diagnostics
    }

    /// Compile every registered body and hand out the finished grammar.
    pub fn finalize(self) -> Grammar {
        let Self {
            mut grammar,
            names,
            pure_peg,
            mut diagnostics,
        } = self;

        let mut compiler = ExprCompiler::new(grammar.id(), pure_peg, &mut diagnostics);
        for (name, body) in names {
            let expr = compiler.compile(&body);
            tracing::trace!(grammar = grammar.urn(), rule = %name, "compiled {}", expr);
            grammar.insert(name, expr);
        }

        tracing::debug!(
            grammar = grammar.urn(),
            rules = grammar.len(),
            warnings = diagnostics.warning_count(),
            "grammar compiled"
        );
        grammar.set_diagnostics(diagnostics.into_diagnostics());
        grammar
    }
}
