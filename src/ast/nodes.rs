use super::arena::{ClassId, MemberId};
use super::Span;
use std::fmt;

// Modifiers and Annotations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Abstract,
    Static,
    Final,
    Synchronized,
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kw = match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Abstract => "abstract",
            Modifier::Static => "static",
            Modifier::Final => "final",
            Modifier::Synchronized => "synchronized",
        };
        write!(f, "{}", kw)
    }
}

/// Requested visibility for a synthesized accessor. `None` means
/// "do not generate".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    Public,
    Protected,
    Package,
    Private,
    None,
}

impl AccessLevel {
    /// The visibility modifier for this level; package access has none.
    pub fn modifier(self) -> Option<Modifier> {
        match self {
            AccessLevel::Public => Some(Modifier::Public),
            AccessLevel::Protected => Some(Modifier::Protected),
            AccessLevel::Private => Some(Modifier::Private),
            AccessLevel::Package | AccessLevel::None => None,
        }
    }

    /// Parses the enum-constant spelling used in annotation arguments.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "PUBLIC" => Some(AccessLevel::Public),
            "PROTECTED" => Some(AccessLevel::Protected),
            "PACKAGE" => Some(AccessLevel::Package),
            "PRIVATE" => Some(AccessLevel::Private),
            "NONE" => Some(AccessLevel::None),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Annotation {
    pub name: String,
    pub arguments: Vec<AnnotationArg>,
    pub span: Span,
}

impl Annotation {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self { name: name.into(), arguments: Vec::new(), span }
    }
}

#[derive(Debug, Clone)]
pub enum AnnotationArg {
    Value(Expr),
    Named(String, Expr),
}

pub(crate) fn has_annotation(annotations: &[Annotation], name: &str) -> bool {
    annotations.iter().any(|a| a.name == name)
}

// Type References
#[derive(Debug, Clone)]
pub struct TypeRef {
    pub name: String,
    pub array_dims: usize,
    pub span: Span,
}

impl TypeRef {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self { name: name.into(), array_dims: 0, span }
    }

    /// Primitive `boolean` only; the `Boolean` wrapper does not get
    /// is-style accessor names.
    pub fn is_boolean(&self) -> bool {
        self.name == "boolean" && self.array_dims == 0
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for _ in 0..self.array_dims {
            write!(f, "[]")?;
        }
        Ok(())
    }
}

// Class Declarations and Members
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Annotation,
}

#[derive(Debug, Clone)]
pub struct ClassNode {
    pub kind: TypeKind,
    pub name: String,
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<Annotation>,
    /// Ordered member list; the nodes themselves live in the arena.
    pub members: Vec<MemberId>,
    pub span: Span,
}

impl ClassNode {
    pub fn new(kind: TypeKind, name: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            name: name.into(),
            modifiers: Vec::new(),
            annotations: Vec::new(),
            members: Vec::new(),
            span,
        }
    }

    pub fn has_annotation(&self, name: &str) -> bool {
        has_annotation(&self.annotations, name)
    }
}

impl fmt::Display for ClassNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kw = match self.kind {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
            TypeKind::Annotation => "@interface",
        };
        write!(f, "{} {}", kw, self.name)
    }
}

#[derive(Debug, Clone)]
pub struct FieldNode {
    pub name: String,
    pub type_ref: TypeRef,
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<Annotation>,
    /// Owning class; a back-reference only, the arena owns the node.
    pub owner: ClassId,
    pub span: Span,
}

impl FieldNode {
    pub fn new(owner: ClassId, name: impl Into<String>, type_ref: TypeRef, span: Span) -> Self {
        Self {
            name: name.into(),
            type_ref,
            modifiers: Vec::new(),
            annotations: Vec::new(),
            owner,
            span,
        }
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.contains(&Modifier::Static)
    }

    pub fn has_annotation(&self, name: &str) -> bool {
        has_annotation(&self.annotations, name)
    }
}

#[derive(Debug, Clone)]
pub struct MethodNode {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeRef>,
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<Annotation>,
    pub body: Option<Block>,
    /// Owning class; a back-reference only, the arena owns the node.
    pub owner: ClassId,
    /// Marks methods created by the expansion engine, distinguishing them
    /// from user-authored ones for idempotent re-application.
    pub generated: bool,
    pub span: Span,
}

impl MethodNode {
    pub fn new(owner: ClassId, name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_type: None,
            modifiers: Vec::new(),
            annotations: Vec::new(),
            body: None,
            owner,
            generated: false,
            span,
        }
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers.contains(&Modifier::Abstract)
    }

    pub fn has_annotation(&self, name: &str) -> bool {
        has_annotation(&self.annotations, name)
    }

    /// The leading `this(...)`/`super(...)` statement, if the body starts
    /// with one.
    pub fn leading_ctor_call(&self) -> Option<&Stmt> {
        let first = self.body.as_ref()?.statements.first()?;
        first.is_ctor_call().then_some(first)
    }
}

#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: String,
    pub type_ref: TypeRef,
    pub span: Span,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_ref: TypeRef, span: Span) -> Self {
        Self { name: name.into(), type_ref, span }
    }
}

// Statements
#[derive(Debug, Clone)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub span: Span,
}

impl Block {
    pub fn new(statements: Vec<Stmt>, span: Span) -> Self {
        Self { statements, span }
    }
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Expression(ExprStmt),
    LocalVar(LocalVarStmt),
    Return(ReturnStmt),
    Throw(ThrowStmt),
    Try(TryStmt),
    Block(Block),
    CtorCall(CtorCallStmt),
    Empty,
}

impl Stmt {
    /// Expression statement, spanned like its expression.
    pub fn expression(expr: Expr) -> Self {
        let span = expr.span();
        Stmt::Expression(ExprStmt { expr, span })
    }

    pub fn is_ctor_call(&self) -> bool {
        matches!(self, Stmt::CtorCall(_))
    }
}

#[derive(Debug, Clone)]
pub struct ExprStmt {
    pub expr: Expr,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct LocalVarStmt {
    pub modifiers: Vec<Modifier>,
    pub type_ref: TypeRef,
    pub name: String,
    pub initializer: Expr,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ThrowStmt {
    pub expr: Expr,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct TryStmt {
    pub try_block: Block,
    pub catch_clauses: Vec<CatchClause>,
    pub finally_block: Option<Block>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct CatchClause {
    pub parameter: Parameter,
    pub block: Block,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CtorKind {
    This,
    Super,
}

/// Delegated constructor invocation: `this(...)` or `super(...)`.
#[derive(Debug, Clone)]
pub struct CtorCallStmt {
    pub kind: CtorKind,
    pub arguments: Vec<Expr>,
    pub span: Span,
}

// Expressions
#[derive(Debug, Clone)]
pub enum Expr {
    Literal(LiteralExpr),
    Identifier(IdentifierExpr),
    FieldAccess(FieldAccessExpr),
    MethodCall(MethodCallExpr),
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Literal(e) => e.span,
            Expr::Identifier(e) => e.span,
            Expr::FieldAccess(e) => e.span,
            Expr::MethodCall(e) => e.span,
        }
    }

    pub fn ident(name: impl Into<String>, span: Span) -> Self {
        Expr::Identifier(IdentifierExpr { name: name.into(), span })
    }

    pub fn string(value: impl Into<String>, span: Span) -> Self {
        Expr::Literal(LiteralExpr { value: Literal::String(value.into()), span })
    }

    pub fn field_access(target: Option<Expr>, name: impl Into<String>, span: Span) -> Self {
        Expr::FieldAccess(FieldAccessExpr {
            target: target.map(Box::new),
            name: name.into(),
            span,
        })
    }

    pub fn call(
        target: Option<Expr>,
        name: impl Into<String>,
        arguments: Vec<Expr>,
        span: Span,
    ) -> Self {
        Expr::MethodCall(MethodCallExpr {
            target: target.map(Box::new),
            name: name.into(),
            arguments,
            span,
        })
    }

    /// The string payload when this is a string literal.
    pub fn as_str_literal(&self) -> Option<&str> {
        match self {
            Expr::Literal(LiteralExpr { value: Literal::String(s), .. }) => Some(s.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LiteralExpr {
    pub value: Literal,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i64),
    Boolean(bool),
    String(String),
    Null,
}

#[derive(Debug, Clone)]
pub struct IdentifierExpr {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct FieldAccessExpr {
    pub target: Option<Box<Expr>>,
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct MethodCallExpr {
    pub target: Option<Box<Expr>>,
    pub name: String,
    pub arguments: Vec<Expr>,
    pub span: Span,
}
