use super::*;

// Expr
// ============================================================================

/// Any expression node of a rule body.
///
/// The concrete construct is given by [`Expr::kind`]; operands are the child
/// expression nodes in source order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Expr(pub(crate) SyntaxNode);

impl AstNode for Expr {
    fn can_cast(kind: SyntaxKind) -> bool {
        kind.is_expression()
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        if Self::can_cast(node.kind()) {
            Some(Self(node))
        } else {
            None
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        &self.0
    }
}

impl Expr {
    /// The construct this node stands for (`CHAR`, `SEQ`, `FUNC`, ...).
    pub fn kind(&self) -> SyntaxKind {
        self.0.kind()
    }

    children_method!(operands, Expr);
    first_child_method!(operand, Expr);

    /// Raw token text of a leaf expression.
    ///
    /// For `CHAR` and `CLASS` this is the undecoded content between the
    /// delimiters, for `NAME` and `QUOTED` the referenced name, and for `FUNC`
    /// the function name. Missing text yields an empty string.
    pub fn token_text(&self) -> String {
        token_text(
            &self.0,
            &[SyntaxKind::TEXT, SyntaxKind::IDENT, SyntaxKind::QUOTED_NAME],
        )
    }

    /// Function name of a `FUNC` node.
    pub fn func_name(&self) -> Option<SyntaxToken> {
        find_token(&self.0, &[SyntaxKind::IDENT])
    }

    first_child_method!(tag, Tag);
    first_child_method!(label, Label);
}

// Tag / Label
// ============================================================================

ast_node!(Tag, TAG);

impl Tag {
    /// Tag name without the leading `#`.
    pub fn name(&self) -> String {
        token_text(&self.0, &[SyntaxKind::IDENT])
    }
}

ast_node!(Label, LABEL);

impl Label {
    /// Label name without the trailing `:`.
    pub fn name(&self) -> String {
        token_text(&self.0, &[SyntaxKind::IDENT])
    }
}
