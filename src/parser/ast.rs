//! Syntax tree for binding scripts

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// AST node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// A view or method name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(pub String);

impl Identifier {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A parsed script
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    pub statements: Vec<Spanned<Statement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `view name` or `view name in parent`
    View(ViewDecl),
    /// `view.anchor = expr`
    Bind(BindDecl),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewDecl {
    pub name: Spanned<Identifier>,
    pub parent: Option<Spanned<Identifier>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BindDecl {
    pub target: AnchorRef,
    pub value: Spanned<Expr>,
}

/// `view.anchor`; the anchor name is checked during evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorRef {
    pub view: Spanned<Identifier>,
    pub anchor: Spanned<Identifier>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Myself,
    Anchor(AnchorRef),
    Binary {
        op: BinaryOp,
        lhs: Box<Spanned<Expr>>,
        rhs: Box<Spanned<Expr>>,
    },
    /// `receiver.method(argument)`
    Call {
        receiver: Box<Spanned<Expr>>,
        method: Spanned<Identifier>,
        argument: Option<Spanned<Argument>>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Number(f64),
    View(Identifier),
}
