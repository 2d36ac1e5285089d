//! Field and code unit handles.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::access::JavaAccess;
use super::annotation::{self, CanBeAnnotated, JavaAnnotation};
use super::class::JavaClass;
use super::entity::{Entity, EntityKind, HasModifiers, HasName, HasOwner, Subject};
use super::graph::{AccessId, ClassGraph, ClassId, FieldNode, MethodNode};
use super::modifier::Modifier;
use super::{CONSTRUCTOR_NAME, STATIC_INITIALIZER_NAME};

/// Kind of a code unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeUnitKind {
    /// A method.
    Method,
    /// A constructor (`<init>`).
    Constructor,
    /// A static initializer (`<clinit>`).
    StaticInitializer,
}

impl CodeUnitKind {
    fn of(name: &str) -> Self {
        match name {
            CONSTRUCTOR_NAME => Self::Constructor,
            STATIC_INITIALIZER_NAME => Self::StaticInitializer,
            _ => Self::Method,
        }
    }
}

/// A method, constructor or static initializer.
#[derive(Clone)]
pub struct JavaMethod {
    graph: ClassGraph,
    owner: ClassId,
    index: usize,
}

impl JavaMethod {
    pub(crate) fn new(graph: ClassGraph, owner: ClassId, index: usize) -> Self {
        Self {
            graph,
            owner,
            index,
        }
    }

    fn node(&self) -> &MethodNode {
        &self.graph.data.node(self.owner).methods[self.index]
    }

    /// Method name; `<init>` for constructors.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.node().name
    }

    /// Code unit kind.
    #[must_use]
    pub fn kind(&self) -> CodeUnitKind {
        CodeUnitKind::of(self.name())
    }

    /// Returns `true` for constructors.
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.kind() == CodeUnitKind::Constructor
    }

    /// Declaring class.
    #[must_use]
    pub fn owner(&self) -> JavaClass {
        self.graph.class(self.owner)
    }

    /// Erased parameter types.
    #[must_use]
    pub fn parameter_types(&self) -> Vec<JavaClass> {
        self.node()
            .parameters
            .iter()
            .map(|id| self.graph.class(*id))
            .collect()
    }

    /// Binary names of the erased parameter types.
    #[must_use]
    pub fn parameter_type_names(&self) -> Vec<&str> {
        self.node()
            .parameters
            .iter()
            .map(|id| self.graph.data.node(*id).name.as_str())
            .collect()
    }

    /// Erased return type; `void` for constructors.
    #[must_use]
    pub fn return_type(&self) -> JavaClass {
        self.graph.class(self.node().return_type)
    }

    /// Declared modifiers.
    #[must_use]
    pub fn modifiers(&self) -> &[Modifier] {
        &self.node().modifiers
    }

    /// Returns `true` if the modifier is declared.
    #[must_use]
    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.node().modifiers.contains(&modifier)
    }

    /// `p.A.run(java.lang.String, int)`
    #[must_use]
    pub fn full_name(&self) -> String {
        format!(
            "{}.{}({})",
            self.owner().name(),
            self.name(),
            self.parameter_type_names().join(", ")
        )
    }

    /// Accesses made from the body, in bytecode order.
    #[must_use]
    pub fn accesses(&self) -> Vec<JavaAccess> {
        (0..self.node().accesses.len())
            .map(|a| {
                JavaAccess::new(
                    self.graph.clone(),
                    AccessId {
                        class: self.owner,
                        method: self.index,
                        access: a,
                    },
                )
            })
            .collect()
    }

    pub(crate) fn parameter_ids(&self) -> &[ClassId] {
        &self.node().parameters
    }
}

impl CanBeAnnotated for JavaMethod {
    fn annotations(&self) -> Vec<JavaAnnotation> {
        annotation::wrap(&self.graph, &self.node().annotations)
    }
}

impl HasName for JavaMethod {
    fn name(&self) -> &str {
        &self.node().name
    }
}

impl HasModifiers for JavaMethod {
    fn modifiers(&self) -> &[Modifier] {
        &self.node().modifiers
    }
}

impl HasOwner for JavaMethod {
    fn owner(&self) -> JavaClass {
        self.graph.class(self.owner)
    }
}

impl Entity for JavaMethod {
    fn subject(&self) -> Subject {
        let kind = match self.kind() {
            CodeUnitKind::Method => EntityKind::Method,
            CodeUnitKind::Constructor => EntityKind::Constructor,
            CodeUnitKind::StaticInitializer => EntityKind::StaticInitializer,
        };
        Subject::new(kind, self.full_name())
    }

    fn description(&self) -> String {
        let label = match self.kind() {
            CodeUnitKind::Method => "Method",
            CodeUnitKind::Constructor => "Constructor",
            CodeUnitKind::StaticInitializer => "Static Initializer",
        };
        format!("{label} <{}>", self.full_name())
    }
}

impl PartialEq for JavaMethod {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner
            && self.index == other.index
            && Arc::ptr_eq(&self.graph.data, &other.graph.data)
    }
}

impl Eq for JavaMethod {}

impl Hash for JavaMethod {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.owner.hash(state);
        self.index.hash(state);
    }
}

impl fmt::Debug for JavaMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JavaMethod({})", self.full_name())
    }
}

/// A declared field.
#[derive(Clone)]
pub struct JavaField {
    graph: ClassGraph,
    owner: ClassId,
    index: usize,
}

impl JavaField {
    pub(crate) fn new(graph: ClassGraph, owner: ClassId, index: usize) -> Self {
        Self {
            graph,
            owner,
            index,
        }
    }

    fn node(&self) -> &FieldNode {
        &self.graph.data.node(self.owner).fields[self.index]
    }

    /// Field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.node().name
    }

    /// Declaring class.
    #[must_use]
    pub fn owner(&self) -> JavaClass {
        self.graph.class(self.owner)
    }

    /// Erased field type.
    #[must_use]
    pub fn raw_type(&self) -> JavaClass {
        self.graph.class(self.node().raw_type)
    }

    /// Declared modifiers.
    #[must_use]
    pub fn modifiers(&self) -> &[Modifier] {
        &self.node().modifiers
    }

    /// Returns `true` if the modifier is declared.
    #[must_use]
    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.node().modifiers.contains(&modifier)
    }

    /// `p.A.field`
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.owner().name(), self.name())
    }
}

impl CanBeAnnotated for JavaField {
    fn annotations(&self) -> Vec<JavaAnnotation> {
        annotation::wrap(&self.graph, &self.node().annotations)
    }
}

impl HasName for JavaField {
    fn name(&self) -> &str {
        &self.node().name
    }
}

impl HasModifiers for JavaField {
    fn modifiers(&self) -> &[Modifier] {
        &self.node().modifiers
    }
}

impl HasOwner for JavaField {
    fn owner(&self) -> JavaClass {
        self.graph.class(self.owner)
    }
}

impl Entity for JavaField {
    fn subject(&self) -> Subject {
        Subject::new(EntityKind::Field, self.full_name())
    }

    fn description(&self) -> String {
        format!("Field <{}>", self.full_name())
    }
}

impl PartialEq for JavaField {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner
            && self.index == other.index
            && Arc::ptr_eq(&self.graph.data, &other.graph.data)
    }
}

impl Eq for JavaField {}

impl Hash for JavaField {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.owner.hash(state);
        self.index.hash(state);
    }
}

impl fmt::Debug for JavaField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JavaField({})", self.full_name())
    }
}
