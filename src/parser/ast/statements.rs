use super::*;

// SourceFile
// ============================================================================

ast_node!(SourceFile, SOURCE);

impl SourceFile {
    children_method!(statements, Statement);
}

/// A top-level statement of a grammar source
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Statement {
    Rule(Rule),
    Example(Example),
}

impl AstNode for Statement {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(kind, SyntaxKind::RULE | SyntaxKind::EXAMPLE)
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::RULE => Some(Self::Rule(Rule(node))),
            SyntaxKind::EXAMPLE => Some(Self::Example(Example(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Rule(n) => &n.0,
            Self::Example(n) => &n.0,
        }
    }
}

// Rule
// ============================================================================

ast_node!(Rule, RULE);

impl Rule {
    /// The token naming this rule (`A` or `"if"`).
    pub fn name_token(&self) -> Option<SyntaxToken> {
        find_token(&self.0, &[SyntaxKind::IDENT, SyntaxKind::QUOTED_NAME])
    }

    /// The rule name as written, quotes included for quoted names.
    pub fn name(&self) -> Option<String> {
        self.name_token().map(|t| t.text().to_string())
    }

    first_child_method!(body, Expr);
}

// Example
// ============================================================================

ast_node!(Example, EXAMPLE);

impl Example {
    /// Tokens naming the rules this example applies to, in source order.
    pub fn name_tokens(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| t.kind().is_rule_name())
    }

    /// The rule names this example applies to, in source order.
    pub fn names(&self) -> Vec<String> {
        self.name_tokens().map(|t| t.text().to_string()).collect()
    }

    first_child_method!(doc, Doc);
}

// Doc
// ============================================================================

ast_node!(Doc, DOC);

impl Doc {
    /// Documentation text between the delimiters.
    pub fn text(&self) -> String {
        token_text(&self.0, &[SyntaxKind::TEXT])
    }
}
