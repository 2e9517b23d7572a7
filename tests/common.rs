// Common test utilities
#![allow(dead_code)]

use tolbok::ast::*;

pub fn span() -> Span {
    Span::from_to(1, 1, 1, 1)
}

pub fn type_ref(name: &str) -> TypeRef {
    TypeRef::new(name, span())
}

pub fn class(arena: &mut Arena, name: &str) -> ClassId {
    arena.add_class(ClassNode::new(TypeKind::Class, name, span()))
}

pub fn field(arena: &mut Arena, owner: ClassId, name: &str, ty: &str) -> FieldId {
    arena.add_field(FieldNode::new(owner, name, type_ref(ty), span()))
}

pub fn annotation(name: &str) -> Annotation {
    Annotation::new(name, span())
}

/// `@Getter(AccessLevel.<level>)`
pub fn getter_with_level(level: &str) -> Annotation {
    let mut ann = annotation("Getter");
    ann.arguments.push(AnnotationArg::Value(Expr::field_access(
        Some(Expr::ident("AccessLevel", span())),
        level,
        span(),
    )));
    ann
}

/// `@ThreadNamed("<format>")`
pub fn thread_named(format: &str) -> Annotation {
    let mut ann = annotation("ThreadNamed");
    ann.arguments
        .push(AnnotationArg::Value(Expr::string(format, span())));
    ann
}

/// A user-authored `int <name>() { return 0; }`.
pub fn user_method(arena: &mut Arena, owner: ClassId, name: &str) -> MethodId {
    let mut method = MethodNode::new(owner, name, span());
    method.return_type = Some(type_ref("int"));
    method.body = Some(Block::new(
        vec![Stmt::Return(ReturnStmt {
            value: Some(Expr::Literal(LiteralExpr {
                value: Literal::Integer(0),
                span: span(),
            })),
            span: span(),
        })],
        span(),
    ));
    arena.add_method(method)
}

/// A user-authored `int <name>(int <param>) { return 0; }`.
pub fn user_method_with_param(
    arena: &mut Arena,
    owner: ClassId,
    name: &str,
    param: &str,
) -> MethodId {
    let mut method = MethodNode::new(owner, name, span());
    method.return_type = Some(type_ref("int"));
    method.parameters.push(Parameter {
        name: param.to_string(),
        type_ref: type_ref("int"),
        span: span(),
    });
    method.body = Some(Block::new(
        vec![Stmt::Return(ReturnStmt {
            value: Some(Expr::Literal(LiteralExpr {
                value: Literal::Integer(0),
                span: span(),
            })),
            span: span(),
        })],
        span(),
    ));
    arena.add_method(method)
}

/// A statement invoking a no-argument method, e.g. `work();`.
pub fn call_stmt(name: &str) -> Stmt {
    Stmt::expression(Expr::call(None, name, Vec::new(), span()))
}

pub fn super_call() -> Stmt {
    Stmt::CtorCall(CtorCallStmt {
        kind: CtorKind::Super,
        arguments: Vec::new(),
        span: span(),
    })
}

pub fn print(arena: &Arena) -> String {
    let mut printer = AstPrinter::new();
    printer.print(arena)
}

pub fn method_names(arena: &Arena, class: ClassId) -> Vec<String> {
    arena
        .method_ids(class)
        .into_iter()
        .map(|id| arena.method(id).name.clone())
        .collect()
}
