//! Compiled grammar: rule table, examples and load diagnostics.

use std::sync::atomic::{AtomicU32, Ordering};

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::expr::{NameRef, ParsingExpression};
use crate::parser::errors::Diagnostic;

/// Identity of a [`Grammar`], carried by every [`NameRef`] it contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GrammarId(u32);

impl GrammarId {
    /// Allocate a process-unique id.
    pub fn fresh() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Build an id from a raw value (for tests and external tables).
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn index(self) -> u32 {
        self.0
    }
}

/// A compiled grammar.
///
/// Rules keep their definition order. The grammar is filled in once by the
/// loader and read-only afterwards; it is shared as `Arc<Grammar>`.
#[derive(Debug, Clone)]
pub struct Grammar {
    id: GrammarId,
    urn: SmolStr,
    rules: IndexMap<SmolStr, ParsingExpression>,
    examples: Vec<(SmolStr, String)>,
    error: bool,
    diagnostics: Vec<Diagnostic>,
}

impl Grammar {
    /// Create an empty grammar for the source identified by `urn`.
    pub fn new(urn: impl Into<SmolStr>) -> Self {
        Self {
            id: GrammarId::fresh(),
            urn: urn.into(),
            rules: IndexMap::new(),
            examples: Vec::new(),
            error: false,
            diagnostics: Vec::new(),
        }
    }

    pub fn id(&self) -> GrammarId {
        self.id
    }

    /// Logical source identifier (file path or inline URN).
    pub fn urn(&self) -> &str {
        &self.urn
    }

    /// Compiled expression of rule `name`.
    pub fn get(&self, name: &str) -> Option<&ParsingExpression> {
        self.rules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Rules in definition order.
    pub fn rules(&self) -> impl Iterator<Item = (&str, &ParsingExpression)> {
        self.rules.iter().map(|(name, e)| (name.as_str(), e))
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(SmolStr::as_str)
    }

    /// The first defined rule, the conventional entry point.
    pub fn start_rule(&self) -> Option<&str> {
        self.rules.keys().next().map(SmolStr::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// `(rule name, documentation)` pairs from example directives, in order.
    pub fn examples(&self) -> &[(SmolStr, String)] {
        &self.examples
    }

    /// Examples recorded for rule `name`.
    pub fn examples_for<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.examples
            .iter()
            .filter(move |(n, _)| n == name)
            .map(|(_, doc)| doc.as_str())
    }

    /// Whether the grammar source had syntax errors. An errored grammar has
    /// no rules and must not be used for recognition.
    pub fn has_error(&self) -> bool {
        self.error
    }

    /// Warnings and errors reported while loading this grammar.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Resolve a deferred reference.
    ///
    /// Returns `None` when the reference belongs to another grammar or names
    /// a rule that was never defined.
    pub fn resolve(&self, name_ref: &NameRef) -> Option<&ParsingExpression> {
        if name_ref.grammar() != self.id {
            return None;
        }
        self.rules.get(name_ref.name())
    }

    /// References anywhere in the grammar that name an undefined rule.
    pub fn unresolved_references(&self) -> Vec<&NameRef> {
        self.rules
            .values()
            .flat_map(ParsingExpression::references)
            .filter(|r| self.resolve(r).is_none())
            .collect()
    }

    pub(crate) fn insert(&mut self, name: SmolStr, expr: ParsingExpression) {
        self.rules.insert(name, expr);
    }

    pub(crate) fn push_example(&mut self, name: SmolStr, doc: String) {
        self.examples.push((name, doc));
    }

    /// Mark the grammar unusable, dropping anything compiled so far.
    pub(crate) fn mark_error(&mut self) {
        self.error = true;
        self.rules.clear();
    }

    pub(crate) fn set_diagnostics(&mut self, diagnostics: Vec<Diagnostic>) {
        self.diagnostics = diagnostics;
    }
}
