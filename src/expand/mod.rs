//! Annotation expansion pipeline.
//!
//! A single synchronous pass over the tree: trigger-annotation occurrences
//! are collected up front (as stable ids, so handler mutations cannot skew
//! the walk), each trigger annotation is stripped from its node, and the
//! matching handler runs. Handlers never see nor leave the triggers;
//! `@Getter` and `@ThreadNamed` are metadata only and must not persist
//! past expansion.

pub mod getter;
pub mod naming;
pub mod thread_named;

pub use getter::{GetterSynthesizer, GetterTarget, DELEGATE_ANNOTATION};
pub use naming::{BeanNaming, NamingStrategy};
pub use thread_named::{ThreadContextWrapper, ThreadNamedTarget};

use crate::ast::{AccessLevel, Annotation, AnnotationArg, Arena, ClassId, Expr, FieldId, MethodId};
use crate::config::Config;
use crate::diag::Diagnostics;

pub const GETTER_ANNOTATION: &str = "Getter";
pub const THREAD_NAMED_ANNOTATION: &str = "ThreadNamed";

/// One trigger-annotation occurrence found during collection.
enum Occurrence {
    GetterOnClass(ClassId),
    GetterOnField(FieldId),
    GetterOnMethod(MethodId),
    ThreadNamedOnMethod(MethodId),
    ThreadNamedOnClass(ClassId),
    ThreadNamedOnField(FieldId),
}

/// Drives one expansion pass with a resolved configuration.
pub struct Expander {
    config: Config,
}

impl Expander {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn expand(&self, arena: &mut Arena) -> Diagnostics {
        let mut diags = Diagnostics::new();
        log::debug!("expand start: revision={}", arena.revision());
        let getter = GetterSynthesizer::from_config(&self.config);

        for occurrence in collect_occurrences(arena) {
            match occurrence {
                Occurrence::GetterOnClass(class) => {
                    let Some(ann) = strip_class_trigger(arena, class, GETTER_ANNOTATION) else {
                        continue;
                    };
                    let level = access_level_arg(&ann);
                    getter.handle(
                        arena,
                        GetterTarget::Class(class),
                        level,
                        &self.config,
                        &mut diags,
                    );
                }
                Occurrence::GetterOnField(field) => {
                    let Some(ann) = strip_field_trigger(arena, field, GETTER_ANNOTATION) else {
                        continue;
                    };
                    let level = access_level_arg(&ann);
                    getter.handle(
                        arena,
                        GetterTarget::Field(field),
                        level,
                        &self.config,
                        &mut diags,
                    );
                }
                Occurrence::GetterOnMethod(method) => {
                    let Some(ann) = strip_method_trigger(arena, method, GETTER_ANNOTATION) else {
                        continue;
                    };
                    let level = access_level_arg(&ann);
                    getter.handle(
                        arena,
                        GetterTarget::Other(ann.span),
                        level,
                        &self.config,
                        &mut diags,
                    );
                }
                Occurrence::ThreadNamedOnMethod(method) => {
                    let Some(ann) = strip_method_trigger(arena, method, THREAD_NAMED_ANNOTATION)
                    else {
                        continue;
                    };
                    let format = thread_name_arg(&ann);
                    ThreadContextWrapper::handle(
                        arena,
                        ThreadNamedTarget::Method(method),
                        &format,
                        &self.config,
                        &mut diags,
                    );
                }
                Occurrence::ThreadNamedOnClass(class) => {
                    let Some(ann) = strip_class_trigger(arena, class, THREAD_NAMED_ANNOTATION)
                    else {
                        continue;
                    };
                    let format = thread_name_arg(&ann);
                    ThreadContextWrapper::handle(
                        arena,
                        ThreadNamedTarget::Other(ann.span),
                        &format,
                        &self.config,
                        &mut diags,
                    );
                }
                Occurrence::ThreadNamedOnField(field) => {
                    let Some(ann) = strip_field_trigger(arena, field, THREAD_NAMED_ANNOTATION)
                    else {
                        continue;
                    };
                    let format = thread_name_arg(&ann);
                    ThreadContextWrapper::handle(
                        arena,
                        ThreadNamedTarget::Other(ann.span),
                        &format,
                        &self.config,
                        &mut diags,
                    );
                }
            }
        }

        log::debug!(
            "expand end: revision={} diagnostics={}",
            arena.revision(),
            diags.len()
        );
        diags
    }
}

/// Runs one expansion pass over the arena.
pub fn expand(arena: &mut Arena, config: &Config) -> Diagnostics {
    Expander::new(config.clone()).expand(arena)
}

fn collect_occurrences(arena: &Arena) -> Vec<Occurrence> {
    let mut occurrences = Vec::new();
    for class in arena.class_ids() {
        let decl = arena.class(class);
        if decl.has_annotation(GETTER_ANNOTATION) {
            occurrences.push(Occurrence::GetterOnClass(class));
        }
        if decl.has_annotation(THREAD_NAMED_ANNOTATION) {
            occurrences.push(Occurrence::ThreadNamedOnClass(class));
        }
        for field in arena.field_ids(class) {
            if arena.field(field).has_annotation(GETTER_ANNOTATION) {
                occurrences.push(Occurrence::GetterOnField(field));
            }
            if arena.field(field).has_annotation(THREAD_NAMED_ANNOTATION) {
                occurrences.push(Occurrence::ThreadNamedOnField(field));
            }
        }
        for method in arena.method_ids(class) {
            if arena.method(method).has_annotation(GETTER_ANNOTATION) {
                occurrences.push(Occurrence::GetterOnMethod(method));
            }
            if arena.method(method).has_annotation(THREAD_NAMED_ANNOTATION) {
                occurrences.push(Occurrence::ThreadNamedOnMethod(method));
            }
        }
    }
    occurrences
}

fn strip_class_trigger(arena: &mut Arena, class: ClassId, name: &str) -> Option<Annotation> {
    arena.drain_class_annotations(class, name).into_iter().next()
}

fn strip_field_trigger(arena: &mut Arena, field: FieldId, name: &str) -> Option<Annotation> {
    arena.drain_field_annotations(field, name).into_iter().next()
}

fn strip_method_trigger(arena: &mut Arena, method: MethodId, name: &str) -> Option<Annotation> {
    arena.drain_method_annotations(method, name).into_iter().next()
}

/// `@Getter(AccessLevel.PROTECTED)` or `@Getter(value = AccessLevel.PROTECTED)`;
/// absent or unrecognized arguments default to public.
fn access_level_arg(ann: &Annotation) -> AccessLevel {
    for arg in &ann.arguments {
        let expr = match arg {
            AnnotationArg::Value(e) => e,
            AnnotationArg::Named(name, e) if name == "value" => e,
            AnnotationArg::Named(..) => continue,
        };
        if let Some(level) = access_level_of(expr) {
            return level;
        }
    }
    AccessLevel::Public
}

fn access_level_of(expr: &Expr) -> Option<AccessLevel> {
    match expr {
        Expr::Identifier(id) => AccessLevel::from_name(&id.name),
        Expr::FieldAccess(fa) => {
            let qualified = matches!(
                fa.target.as_deref(),
                Some(Expr::Identifier(t)) if t.name == "AccessLevel"
            );
            qualified.then(|| AccessLevel::from_name(&fa.name)).flatten()
        }
        _ => None,
    }
}

/// The `value` expression of `@ThreadNamed`; a missing argument behaves
/// like the empty string and is rejected downstream.
fn thread_name_arg(ann: &Annotation) -> Expr {
    for arg in &ann.arguments {
        match arg {
            AnnotationArg::Value(e) => return e.clone(),
            AnnotationArg::Named(name, e) if name == "value" => return e.clone(),
            AnnotationArg::Named(..) => {}
        }
    }
    Expr::string("", ann.span)
}
