use super::nodes::*;

/// Stable handle to a [`ClassNode`] in an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassId(pub(crate) u32);

/// Stable handle to a [`FieldNode`] in an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId(pub(crate) u32);

/// Stable handle to a [`MethodNode`] in an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodId(pub(crate) u32);

/// Ordered class membership entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberId {
    Field(FieldId),
    Method(MethodId),
}

/// Arena owning every class, field, and method node of a compilation unit.
///
/// Ids stay valid across mutation: nodes are never removed or reordered
/// within their backing vector, only member *lists* are edited. Every
/// mutation primitive bumps [`Arena::revision`], which stands in for the
/// host compiler's rebuild-after-edit notification and lets callers prove
/// that a no-op really touched nothing.
#[derive(Debug, Clone, Default)]
pub struct Arena {
    classes: Vec<ClassNode>,
    fields: Vec<FieldNode>,
    methods: Vec<MethodNode>,
    revision: u64,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutation counter; unchanged revision means an untouched tree.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // Construction

    pub fn add_class(&mut self, class: ClassNode) -> ClassId {
        let id = ClassId(self.classes.len() as u32);
        self.classes.push(class);
        self.revision += 1;
        id
    }

    /// Appends a field to its owning class's member list.
    pub fn add_field(&mut self, field: FieldNode) -> FieldId {
        let id = FieldId(self.fields.len() as u32);
        let owner = field.owner;
        self.fields.push(field);
        self.classes[owner.0 as usize].members.push(MemberId::Field(id));
        self.revision += 1;
        id
    }

    /// Appends a method to its owning class's member list.
    pub fn add_method(&mut self, method: MethodNode) -> MethodId {
        let id = MethodId(self.methods.len() as u32);
        let owner = method.owner;
        self.methods.push(method);
        self.classes[owner.0 as usize].members.push(MemberId::Method(id));
        self.revision += 1;
        id
    }

    // Node access

    pub fn class(&self, id: ClassId) -> &ClassNode {
        &self.classes[id.0 as usize]
    }

    pub fn field(&self, id: FieldId) -> &FieldNode {
        &self.fields[id.0 as usize]
    }

    pub fn method(&self, id: MethodId) -> &MethodNode {
        &self.methods[id.0 as usize]
    }

    pub fn class_ids(&self) -> impl Iterator<Item = ClassId> {
        (0..self.classes.len() as u32).map(ClassId)
    }

    /// Direct field children of a class, in member order.
    pub fn field_ids(&self, class: ClassId) -> Vec<FieldId> {
        self.classes[class.0 as usize]
            .members
            .iter()
            .filter_map(|m| match m {
                MemberId::Field(id) => Some(*id),
                MemberId::Method(_) => None,
            })
            .collect()
    }

    /// Direct method children of a class, in member order.
    pub fn method_ids(&self, class: ClassId) -> Vec<MethodId> {
        self.classes[class.0 as usize]
            .members
            .iter()
            .filter_map(|m| match m {
                MemberId::Method(id) => Some(*id),
                MemberId::Field(_) => None,
            })
            .collect()
    }

    // Queries

    /// First method of the class with exactly the given name.
    pub fn find_method(&self, class: ClassId, name: &str) -> Option<MethodId> {
        self.classes[class.0 as usize].members.iter().find_map(|m| match m {
            MemberId::Method(id) if self.methods[id.0 as usize].name == name => Some(*id),
            _ => None,
        })
    }

    /// First method matching the name case-insensitively with exactly
    /// `arity` parameters. Accessor conflict detection queries with arity
    /// zero: a same-named method taking arguments does not clash with a
    /// no-argument accessor, but a differently-cased one does.
    pub fn find_method_with_arity(
        &self,
        class: ClassId,
        name: &str,
        arity: usize,
    ) -> Option<MethodId> {
        self.classes[class.0 as usize].members.iter().find_map(|m| match m {
            MemberId::Method(id) => {
                let method = &self.methods[id.0 as usize];
                (method.parameters.len() == arity && method.name.eq_ignore_ascii_case(name))
                    .then_some(*id)
            }
            MemberId::Field(_) => None,
        })
    }

    pub fn is_generated(&self, id: MethodId) -> bool {
        self.methods[id.0 as usize].generated
    }

    // Mutation primitives

    /// Inserts a method into `class` directly after `anchor` in member
    /// order, or at the end if the anchor is not a member of the class.
    pub fn insert_method_after_field(
        &mut self,
        class: ClassId,
        anchor: FieldId,
        method: MethodNode,
    ) -> MethodId {
        let id = MethodId(self.methods.len() as u32);
        self.methods.push(method);
        let members = &mut self.classes[class.0 as usize].members;
        let pos = members
            .iter()
            .position(|m| matches!(m, MemberId::Field(f) if *f == anchor))
            .map(|p| p + 1)
            .unwrap_or(members.len());
        members.insert(pos, MemberId::Method(id));
        self.revision += 1;
        id
    }

    pub fn replace_method_body(&mut self, id: MethodId, body: Block) {
        self.methods[id.0 as usize].body = Some(body);
        self.revision += 1;
    }

    /// Removes every annotation named `name` from the field and returns
    /// them in declaration order.
    pub fn drain_field_annotations(&mut self, id: FieldId, name: &str) -> Vec<Annotation> {
        let removed = drain_annotations(&mut self.fields[id.0 as usize].annotations, name);
        if !removed.is_empty() {
            self.revision += 1;
        }
        removed
    }

    /// Removes every annotation named `name` from the method and returns
    /// them in declaration order.
    pub fn drain_method_annotations(&mut self, id: MethodId, name: &str) -> Vec<Annotation> {
        let removed = drain_annotations(&mut self.methods[id.0 as usize].annotations, name);
        if !removed.is_empty() {
            self.revision += 1;
        }
        removed
    }

    /// Removes every annotation named `name` from the class and returns
    /// them in declaration order.
    pub fn drain_class_annotations(&mut self, id: ClassId, name: &str) -> Vec<Annotation> {
        let removed = drain_annotations(&mut self.classes[id.0 as usize].annotations, name);
        if !removed.is_empty() {
            self.revision += 1;
        }
        removed
    }
}

fn drain_annotations(annotations: &mut Vec<Annotation>, name: &str) -> Vec<Annotation> {
    let mut removed = Vec::new();
    annotations.retain(|a| {
        if a.name == name {
            removed.push(a.clone());
            false
        } else {
            true
        }
    });
    removed
}
