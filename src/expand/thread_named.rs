//! Thread-name scoping.
//!
//! Rewrites an annotated method so that its body runs under a computed
//! thread display name, restoring the previous name on every exit path:
//!
//! ```text
//! final Thread $currentThread = Thread.currentThread();
//! final String $oldThreadName = $currentThread.getName();
//! $currentThread.setName(<computed name>);
//! try {
//!     <original statements>
//! } finally {
//!     $currentThread.setName($oldThreadName);
//! }
//! ```
//!
//! A leading `this(...)`/`super(...)` call stays in front of the wrapping,
//! outside the protected region. Nested wrapped calls on one thread are
//! safe: each level saves and restores in strict LIFO order.

use crate::ast::{
    Arena, Block, Expr, LocalVarStmt, MethodId, Modifier, Span, Stmt, TryStmt, TypeRef,
};
use crate::config::{Config, FlagUsage};
use crate::diag::Diagnostics;

const CURRENT_THREAD_VAR: &str = "$currentThread";
const OLD_THREAD_NAME_VAR: &str = "$oldThreadName";

/// Where the trigger annotation sat. Anything other than a method is a
/// usage error.
#[derive(Debug, Clone, Copy)]
pub enum ThreadNamedTarget {
    Method(MethodId),
    Other(Span),
}

pub struct ThreadContextWrapper;

impl ThreadContextWrapper {
    pub fn handle(
        arena: &mut Arena,
        target: ThreadNamedTarget,
        name_format: &Expr,
        config: &Config,
        diags: &mut Diagnostics,
    ) {
        let span = match target {
            ThreadNamedTarget::Method(id) => arena.method(id).span,
            ThreadNamedTarget::Other(span) => span,
        };
        match config.thread_named_flag_usage {
            FlagUsage::Error => {
                diags.add_error(span, "Use of @ThreadNamed is flagged according to configuration.");
                return;
            }
            FlagUsage::Warning => {
                diags.add_warning(
                    span,
                    "Use of @ThreadNamed is flagged according to configuration.",
                );
            }
            FlagUsage::Off => {}
        }

        if name_format.as_str_literal() == Some("") {
            diags.add_error(name_format.span(), "threadName cannot be the empty string.");
            return;
        }

        let method_id = match target {
            ThreadNamedTarget::Method(id) => id,
            ThreadNamedTarget::Other(span) => {
                diags.add_error(span, "@ThreadNamed is legal only on methods and constructors.");
                return;
            }
        };

        let method = arena.method(method_id);
        if method.is_abstract() {
            diags.add_error(method.span, "@ThreadNamed can only be used on concrete methods.");
            return;
        }

        let statements = match &method.body {
            Some(body) if !body.statements.is_empty() => &body.statements,
            _ => {
                diags.add_warning(
                    method.span,
                    "This method or constructor is empty; @ThreadNamed has been ignored.",
                );
                return;
            }
        };

        // A delegated constructor call must run first and unprotected.
        let (ctor_call, contents) = match statements.first() {
            Some(first) if first.is_ctor_call() => (Some(first.clone()), statements[1..].to_vec()),
            _ => (None, statements.clone()),
        };
        if contents.is_empty() {
            diags.add_warning(
                method.span,
                "Calls to sibling / super constructors are always excluded from @ThreadNamed; \
                 @ThreadNamed has been ignored because there is no other code in this constructor.",
            );
            return;
        }

        let plan = ThreadNamePlan::build(arena, method_id, contents, name_format.clone());
        let body = plan.into_body(ctor_call);
        log::debug!("wrapped {}() in thread-name scoping", arena.method(method_id).name);
        arena.replace_method_body(method_id, body);
    }
}

/// The reconstructed pieces of a wrapped method body.
struct ThreadNamePlan {
    save_current: Stmt,
    save_old_name: Stmt,
    set_name: Stmt,
    guarded: Stmt,
    span: Span,
}

impl ThreadNamePlan {
    fn build(arena: &Arena, method_id: MethodId, contents: Vec<Stmt>, format: Expr) -> Self {
        let method = arena.method(method_id);
        let span = method.span;

        let save_current = Stmt::LocalVar(LocalVarStmt {
            modifiers: vec![Modifier::Final],
            type_ref: TypeRef::new("Thread", span),
            name: CURRENT_THREAD_VAR.to_string(),
            initializer: Expr::call(
                Some(Expr::ident("Thread", span)),
                "currentThread",
                Vec::new(),
                span,
            ),
            span,
        });

        let save_old_name = Stmt::LocalVar(LocalVarStmt {
            modifiers: vec![Modifier::Final],
            type_ref: TypeRef::new("String", span),
            name: OLD_THREAD_NAME_VAR.to_string(),
            initializer: Expr::call(
                Some(Expr::ident(CURRENT_THREAD_VAR, span)),
                "getName",
                Vec::new(),
                span,
            ),
            span,
        });

        // Verbatim format for parameterless methods; otherwise the
        // parameters are substituted positionally, in declaration order.
        let name = if method.parameters.is_empty() {
            format
        } else {
            let mut arguments = vec![format];
            arguments.extend(
                method
                    .parameters
                    .iter()
                    .map(|p| Expr::ident(p.name.clone(), p.span)),
            );
            Expr::call(Some(Expr::ident("String", span)), "format", arguments, span)
        };

        let set_name = set_thread_name(name, span);
        let restore = set_thread_name(Expr::ident(OLD_THREAD_NAME_VAR, span), span);

        let guarded = Stmt::Try(TryStmt {
            try_block: Block::new(contents, span),
            catch_clauses: Vec::new(),
            finally_block: Some(Block::new(vec![restore], span)),
            span,
        });

        Self { save_current, save_old_name, set_name, guarded, span }
    }

    fn into_body(self, ctor_call: Option<Stmt>) -> Block {
        let span = self.span;
        let wrapped = Stmt::Block(Block::new(
            vec![self.save_current, self.save_old_name, self.set_name, self.guarded],
            span,
        ));
        let mut statements = Vec::new();
        statements.extend(ctor_call);
        statements.push(wrapped);
        Block::new(statements, span)
    }
}

fn set_thread_name(name: Expr, span: Span) -> Stmt {
    Stmt::expression(Expr::call(
        Some(Expr::ident(CURRENT_THREAD_VAR, span)),
        "setName",
        vec![name],
        span,
    ))
}
