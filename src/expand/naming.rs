//! Accessor naming.
//!
//! Naming is pluggable: the synthesizer asks a [`NamingStrategy`] for the
//! primary accessor name and for the full set of names that already count
//! as "an accessor exists" for a field. [`BeanNaming`] implements the
//! JavaBean convention with an optional configured prefix list.

use crate::ast::FieldNode;

pub trait NamingStrategy {
    /// Primary accessor name for the field, or `None` when no valid name
    /// can be derived (the field is then skipped with a warning).
    fn getter_name(&self, field: &FieldNode) -> Option<String>;

    /// Every name whose presence as a method blocks generation for this
    /// field. Always contains the primary name.
    fn alternate_names(&self, field: &FieldNode) -> Vec<String>;
}

/// JavaBean naming: `getX` for most fields, `isX` for primitive booleans,
/// with a configured prefix list stripped from the raw field name first.
///
/// Prefix stripping wins over boolean handling: the base name that the
/// is-/get- decision sees is the already-stripped remainder. A non-empty
/// prefix list that matches nothing yields no name at all.
#[derive(Debug, Clone, Default)]
pub struct BeanNaming {
    prefixes: Vec<String>,
}

impl BeanNaming {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefixes(prefixes: Vec<String>) -> Self {
        Self { prefixes }
    }

    /// Field name with the first matching prefix removed. A prefix ending
    /// in a letter or digit must be followed by an uppercase character so
    /// that prefix `f` matches `fValue` but not `found`.
    fn base_name<'n>(&self, name: &'n str) -> Option<&'n str> {
        if self.prefixes.is_empty() {
            return Some(name);
        }
        for prefix in &self.prefixes {
            let Some(rest) = name.strip_prefix(prefix.as_str()) else {
                continue;
            };
            if rest.is_empty() {
                continue;
            }
            let boundary_needed = prefix
                .chars()
                .last()
                .is_some_and(|c| c.is_ascii_alphanumeric());
            if boundary_needed && !rest.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
                continue;
            }
            return Some(rest);
        }
        None
    }
}

impl NamingStrategy for BeanNaming {
    fn getter_name(&self, field: &FieldNode) -> Option<String> {
        let base = self.base_name(&field.name)?;
        if field.type_ref.is_boolean() {
            if has_is_prefix(base) {
                return Some(base.to_string());
            }
            Some(format!("is{}", title_case(base)))
        } else {
            Some(format!("get{}", title_case(base)))
        }
    }

    fn alternate_names(&self, field: &FieldNode) -> Vec<String> {
        let Some(base) = self.base_name(&field.name) else {
            return Vec::new();
        };
        if field.type_ref.is_boolean() {
            // A boolean named isActive keeps its own name; its get-style
            // twin drops the leading "is".
            if has_is_prefix(base) {
                vec![base.to_string(), format!("get{}", &base[2..])]
            } else {
                vec![
                    format!("is{}", title_case(base)),
                    format!("get{}", title_case(base)),
                ]
            }
        } else {
            vec![format!("get{}", title_case(base))]
        }
    }
}

/// True for names like `isActive`: an `is` prefix followed by an uppercase
/// character.
fn has_is_prefix(name: &str) -> bool {
    name.len() > 2
        && name.starts_with("is")
        && name.chars().nth(2).is_some_and(|c| c.is_ascii_uppercase())
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Arena, ClassNode, FieldNode, Span, TypeKind, TypeRef};

    fn field(name: &str, ty: &str) -> FieldNode {
        let span = Span::from_to(1, 1, 1, 1);
        let mut arena = Arena::new();
        let class = arena.add_class(ClassNode::new(TypeKind::Class, "C", span));
        FieldNode::new(class, name, TypeRef::new(ty, span), span)
    }

    #[test]
    fn plain_field_gets_get_name() {
        let naming = BeanNaming::new();
        assert_eq!(naming.getter_name(&field("width", "int")), Some("getWidth".into()));
    }

    #[test]
    fn boolean_field_gets_is_name_with_get_alternate() {
        let naming = BeanNaming::new();
        let f = field("active", "boolean");
        assert_eq!(naming.getter_name(&f), Some("isActive".into()));
        assert_eq!(naming.alternate_names(&f), vec!["isActive", "getActive"]);
    }

    #[test]
    fn boolean_field_already_is_named_keeps_its_name() {
        let naming = BeanNaming::new();
        let f = field("isOpen", "boolean");
        assert_eq!(naming.getter_name(&f), Some("isOpen".into()));
        assert_eq!(naming.alternate_names(&f), vec!["isOpen", "getOpen"]);
    }

    #[test]
    fn boxed_boolean_is_not_is_named() {
        let naming = BeanNaming::new();
        assert_eq!(naming.getter_name(&field("active", "Boolean")), Some("getActive".into()));
    }

    #[test]
    fn prefix_is_stripped_before_naming() {
        let naming = BeanNaming::with_prefixes(vec!["m_".into(), "f".into()]);
        assert_eq!(naming.getter_name(&field("m_width", "int")), Some("getWidth".into()));
        assert_eq!(naming.getter_name(&field("fValue", "int")), Some("getValue".into()));
    }

    #[test]
    fn letter_prefix_requires_uppercase_boundary() {
        let naming = BeanNaming::with_prefixes(vec!["f".into()]);
        assert_eq!(naming.getter_name(&field("found", "int")), None);
    }

    #[test]
    fn unmatched_prefix_list_yields_no_name() {
        let naming = BeanNaming::with_prefixes(vec!["m_".into()]);
        assert_eq!(naming.getter_name(&field("width", "int")), None);
        assert!(naming.alternate_names(&field("width", "int")).is_empty());
    }
}
