//! Getter synthesis.
//!
//! One synthesis algorithm serves both trigger scopes: `@Getter` directly
//! on a field, and `@Getter` on a class applying to every qualifying field.
//! Generated methods carry the `generated` marker so that a second pass
//! over the same tree is a silent no-op.

use crate::ast::{
    AccessLevel, Annotation, Arena, Block, ClassId, Expr, FieldId, FieldNode, MethodNode,
    Modifier, ReturnStmt, Span, Stmt, TypeKind, TypeRef,
};
use crate::config::{Config, FlagUsage};
use crate::diag::Diagnostics;
use once_cell::sync::Lazy;
use std::collections::HashSet;

use super::naming::{BeanNaming, NamingStrategy};
use super::GETTER_ANNOTATION;

/// Annotations copied from the field onto the generated accessor.
static COPYABLE_ANNOTATIONS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["Deprecated", "NonNull", "Nullable"].into_iter().collect());

/// Marker whose capability set is forwarded through the accessor; it is
/// relocated from the field to the generated method.
pub const DELEGATE_ANNOTATION: &str = "Delegate";

/// Where the trigger annotation sat. `Other` covers placements the
/// synthesizer rejects, such as a method.
#[derive(Debug, Clone, Copy)]
pub enum GetterTarget {
    Field(FieldId),
    Class(ClassId),
    Other(Span),
}

pub struct GetterSynthesizer<N = BeanNaming> {
    naming: N,
}

impl GetterSynthesizer<BeanNaming> {
    pub fn from_config(config: &Config) -> Self {
        Self {
            naming: BeanNaming::with_prefixes(config.accessor_prefixes.clone()),
        }
    }
}

impl<N: NamingStrategy> GetterSynthesizer<N> {
    pub fn with_naming(naming: N) -> Self {
        Self { naming }
    }

    /// Single entry point for both trigger scopes. The configured flag
    /// severity is resolved before anything else; at error level it aborts
    /// this construct entirely.
    pub fn handle(
        &self,
        arena: &mut Arena,
        target: GetterTarget,
        level: AccessLevel,
        config: &Config,
        diags: &mut Diagnostics,
    ) {
        let span = match target {
            GetterTarget::Field(id) => arena.field(id).span,
            GetterTarget::Class(id) => arena.class(id).span,
            GetterTarget::Other(span) => span,
        };
        match config.getter_flag_usage {
            FlagUsage::Error => {
                diags.add_error(span, "Use of @Getter is flagged according to configuration.");
                return;
            }
            FlagUsage::Warning => {
                diags.add_warning(span, "Use of @Getter is flagged according to configuration.");
            }
            FlagUsage::Off => {}
        }

        if level == AccessLevel::None {
            return;
        }

        match target {
            GetterTarget::Field(id) => self.apply_to_field(arena, id, level, diags, true),
            GetterTarget::Class(id) => self.apply_to_class(arena, id, level, diags),
            GetterTarget::Other(span) => {
                diags.add_error(span, "@Getter is only supported on a class, an enum, or a field.");
            }
        }
    }

    /// Applies the accessor filter to every direct field child of `class`.
    pub fn apply_to_class(
        &self,
        arena: &mut Arena,
        class: ClassId,
        level: AccessLevel,
        diags: &mut Diagnostics,
    ) {
        let decl = arena.class(class);
        match decl.kind {
            TypeKind::Class | TypeKind::Enum => {}
            TypeKind::Interface | TypeKind::Annotation => {
                diags.add_error(
                    decl.span,
                    "@Getter is only supported on a class, an enum, or a field.",
                );
                return;
            }
        }
        for field_id in arena.field_ids(class) {
            if !field_qualifies(arena.field(field_id)) {
                continue;
            }
            self.apply_to_field(arena, field_id, level, diags, false);
        }
    }

    /// Synthesizes one accessor, or no-ops with a diagnostic.
    pub fn apply_to_field(
        &self,
        arena: &mut Arena,
        field_id: FieldId,
        level: AccessLevel,
        diags: &mut Diagnostics,
        warn_if_exists: bool,
    ) {
        let field = arena.field(field_id);
        let span = field.span;
        let owner = field.owner;

        let Some(method_name) = self.naming.getter_name(field) else {
            diags.add_warning(
                span,
                "Not generating getter for this field: It does not fit your accessors prefix list.",
            );
            return;
        };

        for alt in self.naming.alternate_names(field) {
            let Some(existing) = arena.find_method_with_arity(owner, &alt, 0) else {
                continue;
            };
            if arena.is_generated(existing) {
                // Output of an earlier pass; treat as success.
                return;
            }
            if warn_if_exists {
                let alt_note = if alt != method_name {
                    format!(" ({})", alt)
                } else {
                    String::new()
                };
                diags.add_warning(
                    span,
                    format!(
                        "Not generating {}(): A method with that name already exists{}",
                        method_name, alt_note
                    ),
                );
            }
            return;
        }

        let plan = GetterPlan::build(arena.field(field_id), method_name, level);
        // Delegate semantics belong to the accessor, not the stored value;
        // relocation happens only once synthesis is certain to proceed.
        let delegates = arena.drain_field_annotations(field_id, DELEGATE_ANNOTATION);
        let method = plan.into_method(owner, delegates);
        log::debug!("synthesized accessor {}() in {}", method.name, arena.class(owner).name);
        arena.insert_method_after_field(owner, field_id, method);
    }
}

/// Class-level qualification filter: `$`-prefixed and static fields are
/// skipped, as are fields that carry their own `@Getter` (their direct
/// application handles them, avoiding duplication).
fn field_qualifies(field: &FieldNode) -> bool {
    if field.name.starts_with('$') {
        return false;
    }
    if field.is_static() {
        return false;
    }
    if field.has_annotation(GETTER_ANNOTATION) {
        return false;
    }
    true
}

/// Everything needed to materialize one accessor method.
struct GetterPlan {
    name: String,
    return_type: TypeRef,
    modifiers: Vec<Modifier>,
    annotations: Vec<Annotation>,
    body: Block,
    span: Span,
}

impl GetterPlan {
    fn build(field: &FieldNode, name: String, level: AccessLevel) -> Self {
        let span = field.span;
        let mut modifiers = Vec::new();
        if let Some(visibility) = level.modifier() {
            modifiers.push(visibility);
        }
        if field.is_static() {
            modifiers.push(Modifier::Static);
        }
        let annotations = field
            .annotations
            .iter()
            .filter(|a| COPYABLE_ANNOTATIONS.contains(a.name.as_str()))
            .cloned()
            .collect();
        let receiver = Expr::ident("this", span);
        let value = Expr::field_access(Some(receiver), field.name.clone(), span);
        let body = Block::new(
            vec![Stmt::Return(ReturnStmt { value: Some(value), span })],
            span,
        );
        Self {
            name,
            return_type: field.type_ref.clone(),
            modifiers,
            annotations,
            body,
            span,
        }
    }

    fn into_method(self, owner: ClassId, delegates: Vec<Annotation>) -> MethodNode {
        let mut annotations = self.annotations;
        annotations.extend(delegates);
        MethodNode {
            name: self.name,
            parameters: Vec::new(),
            return_type: Some(self.return_type),
            modifiers: self.modifiers,
            annotations,
            body: Some(self.body),
            owner,
            generated: true,
            span: self.span,
        }
    }
}
