mod common;

use common::*;
use tolbok::ast::{Arena, Block, Expr, MethodNode, Modifier, Parameter, Stmt};
use tolbok::config::Config;
use tolbok::diag::Diagnostics;
use tolbok::expand::{ThreadContextWrapper, ThreadNamedTarget};

fn method_with_body(arena: &mut Arena, class: tolbok::ast::ClassId, name: &str, body: Vec<Stmt>) -> tolbok::ast::MethodId {
    let mut method = MethodNode::new(class, name, span());
    method.body = Some(Block::new(body, span()));
    arena.add_method(method)
}

fn wrap(arena: &mut Arena, target: ThreadNamedTarget, format: &str) -> Diagnostics {
    let mut diags = Diagnostics::new();
    let format = Expr::string(format, span());
    ThreadContextWrapper::handle(arena, target, &format, &Config::new(), &mut diags);
    diags
}

#[test]
fn wraps_body_in_save_set_restore() {
    let mut arena = Arena::new();
    let c = class(&mut arena, "Worker");
    let run = method_with_body(&mut arena, c, "run", vec![call_stmt("work")]);

    let diags = wrap(&mut arena, ThreadNamedTarget::Method(run), "worker");
    assert!(diags.is_empty());

    let out = print(&arena);
    assert!(out.contains("final Thread $currentThread = Thread.currentThread();"), "{out}");
    assert!(out.contains("final String $oldThreadName = $currentThread.getName();"), "{out}");
    assert!(out.contains("$currentThread.setName(\"worker\");"), "{out}");
    assert!(out.contains("} finally {"), "{out}");
    assert!(out.contains("$currentThread.setName($oldThreadName);"), "{out}");

    // Original statement moved inside the protected region.
    let try_pos = out.find("try {").expect("try block");
    let work_pos = out.find("work();").expect("original statement");
    let finally_pos = out.find("} finally {").unwrap();
    assert!(try_pos < work_pos && work_pos < finally_pos, "{out}");
}

#[test]
fn parameters_are_substituted_positionally() {
    let mut arena = Arena::new();
    let c = class(&mut arena, "Worker");
    let mut method = MethodNode::new(c, "f", span());
    method.parameters.push(Parameter::new("x", type_ref("int"), span()));
    method.body = Some(Block::new(vec![call_stmt("work")], span()));
    let f = arena.add_method(method);

    let diags = wrap(&mut arena, ThreadNamedTarget::Method(f), "f-%d");
    assert!(diags.is_empty());
    assert!(print(&arena).contains("$currentThread.setName(String.format(\"f-%d\", x));"));
}

#[test]
fn parameterless_format_is_used_verbatim() {
    let mut arena = Arena::new();
    let c = class(&mut arena, "Worker");
    let run = method_with_body(&mut arena, c, "run", vec![call_stmt("work")]);

    wrap(&mut arena, ThreadNamedTarget::Method(run), "fixed-name");
    let out = print(&arena);
    assert!(out.contains("$currentThread.setName(\"fixed-name\");"), "{out}");
    assert!(!out.contains("String.format"), "{out}");
}

#[test]
fn empty_method_warns_and_stays_unmodified() {
    let mut arena = Arena::new();
    let c = class(&mut arena, "Worker");
    let run = method_with_body(&mut arena, c, "run", Vec::new());
    let revision = arena.revision();

    let diags = wrap(&mut arena, ThreadNamedTarget::Method(run), "worker");
    assert_eq!(diags.warnings().count(), 1);
    let message = &diags.iter().next().unwrap().message;
    assert!(message.contains("empty; @ThreadNamed has been ignored"), "{message}");
    assert_eq!(arena.revision(), revision);
}

#[test]
fn absent_body_warns_and_stays_unmodified() {
    let mut arena = Arena::new();
    let c = class(&mut arena, "Worker");
    let run = arena.add_method(MethodNode::new(c, "run", span()));

    let diags = wrap(&mut arena, ThreadNamedTarget::Method(run), "worker");
    assert_eq!(diags.warnings().count(), 1);
    assert!(arena.method(run).body.is_none());
}

#[test]
fn ctor_call_only_warns_with_distinct_message() {
    let mut arena = Arena::new();
    let c = class(&mut arena, "Worker");
    let ctor = method_with_body(&mut arena, c, "Worker", vec![super_call()]);
    let revision = arena.revision();

    let diags = wrap(&mut arena, ThreadNamedTarget::Method(ctor), "worker");
    assert_eq!(diags.len(), 1);
    let message = &diags.iter().next().unwrap().message;
    assert!(message.contains("no other code in this constructor"), "{message}");
    assert_eq!(arena.revision(), revision);
    assert_eq!(arena.method(ctor).body.as_ref().unwrap().statements.len(), 1);
}

#[test]
fn ctor_call_stays_outside_the_protected_region() {
    let mut arena = Arena::new();
    let c = class(&mut arena, "Worker");
    let ctor = method_with_body(&mut arena, c, "Worker", vec![super_call(), call_stmt("init")]);

    let diags = wrap(&mut arena, ThreadNamedTarget::Method(ctor), "worker");
    assert!(diags.is_empty());

    let body = arena.method(ctor).body.as_ref().unwrap();
    assert_eq!(body.statements.len(), 2);
    assert!(arena.method(ctor).leading_ctor_call().is_some());

    let out = print(&arena);
    let super_pos = out.find("super();").unwrap();
    let save_pos = out.find("final Thread $currentThread").unwrap();
    let try_pos = out.find("try {").unwrap();
    assert!(super_pos < save_pos && save_pos < try_pos, "{out}");
}

#[test]
fn abstract_method_is_a_usage_error() {
    let mut arena = Arena::new();
    let c = class(&mut arena, "Worker");
    let mut method = MethodNode::new(c, "run", span());
    method.modifiers.push(Modifier::Abstract);
    let run = arena.add_method(method);

    let diags = wrap(&mut arena, ThreadNamedTarget::Method(run), "worker");
    assert!(diags.has_errors());
    let message = &diags.iter().next().unwrap().message;
    assert!(message.contains("concrete methods"), "{message}");
}

#[test]
fn empty_format_string_is_a_usage_error() {
    let mut arena = Arena::new();
    let c = class(&mut arena, "Worker");
    let run = method_with_body(&mut arena, c, "run", vec![call_stmt("work")]);
    let revision = arena.revision();

    let diags = wrap(&mut arena, ThreadNamedTarget::Method(run), "");
    assert!(diags.has_errors());
    let message = &diags.iter().next().unwrap().message;
    assert!(message.contains("cannot be the empty string"), "{message}");
    assert_eq!(arena.revision(), revision);
}

#[test]
fn non_method_target_is_a_usage_error() {
    let mut arena = Arena::new();
    class(&mut arena, "Worker");

    let diags = wrap(&mut arena, ThreadNamedTarget::Other(span()), "worker");
    assert!(diags.has_errors());
    let message = &diags.iter().next().unwrap().message;
    assert!(message.contains("legal only on methods and constructors"), "{message}");
}
