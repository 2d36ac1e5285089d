//! Class handles.

use std::fmt;
use std::hash::{Hash, Hasher};

use super::access::JavaAccess;
use super::annotation::{self, CanBeAnnotated, JavaAnnotation};
use super::dependency::{self, Dependency};
use super::entity::{Entity, EntityKind, HasModifiers, HasName, Subject};
use super::graph::{AccessId, ClassGraph, ClassId, ClassNode, NodeOrigin};
use super::member::{CodeUnitKind, JavaField, JavaMethod};
use super::modifier::{ClassKind, Modifier};
use super::package::JavaPackage;
use crate::hierarchy;

/// A class in the graph, declared or referenced.
#[derive(Clone)]
pub struct JavaClass {
    graph: ClassGraph,
    id: ClassId,
}

impl JavaClass {
    pub(crate) fn new(graph: ClassGraph, id: ClassId) -> Self {
        Self { graph, id }
    }

    fn node(&self) -> &ClassNode {
        self.graph.data.node(self.id)
    }

    pub(crate) fn id(&self) -> ClassId {
        self.id
    }

    /// The graph this class belongs to.
    #[must_use]
    pub fn graph(&self) -> &ClassGraph {
        &self.graph
    }

    /// Binary name, e.g. `p.Outer$Inner`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.node().name
    }

    /// Simple name, e.g. `Inner`.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        &self.node().simple_name
    }

    /// Package name; empty for primitives and the default package.
    #[must_use]
    pub fn package_name(&self) -> &str {
        &self.node().package
    }

    /// The package handle.
    #[must_use]
    pub fn package(&self) -> JavaPackage {
        self.graph.package(self.package_name())
    }

    /// Declaration kind. Stubs report [`ClassKind::Class`].
    #[must_use]
    pub fn kind(&self) -> ClassKind {
        self.node().kind
    }

    /// Returns `true` for interfaces.
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.node().kind == ClassKind::Interface
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

    /// Returns `true` if the class is declared in the model.
    #[must_use]
    pub fn is_declared(&self) -> bool {
        self.node().origin == NodeOrigin::Declared
    }

    /// Returns `true` for primitive types.
    #[must_use]
    pub fn is_primitive(&self) -> bool {
        self.node().origin == NodeOrigin::Primitive
    }

    /// Returns `true` for array types.
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self.node().origin, NodeOrigin::Array { .. })
    }

    /// Component type of an array.
    #[must_use]
    pub fn component_type(&self) -> Option<Self> {
        match self.node().origin {
            NodeOrigin::Array { component } => Some(self.graph.class(component)),
            _ => None,
        }
    }

    /// Innermost component of an array, or the class itself.
    #[must_use]
    pub fn base_component_type(&self) -> Self {
        let mut current = self.clone();
        while let Some(component) = current.component_type() {
            current = component;
        }
        current
    }

    /// Returns `true` unless the class is nested (`Outer$Inner`).
    #[must_use]
    pub fn is_top_level(&self) -> bool {
        let name = self.name();
        let after_package = name.rfind('.').map_or(name, |i| &name[i + 1..]);
        !after_package.contains('$')
    }

    /// Source file name, e.g. `A.java`.
    #[must_use]
    pub fn source_file(&self) -> &str {
        &self.node().source_file
    }

    /// Direct superclass.
    #[must_use]
    pub fn superclass(&self) -> Option<Self> {
        self.node().superclass.map(|id| self.graph.class(id))
    }

    /// Directly implemented or extended interfaces.
    #[must_use]
    pub fn interfaces(&self) -> Vec<Self> {
        self.node()
            .interfaces
            .iter()
            .map(|id| self.graph.class(*id))
            .collect()
    }

    /// The class, its superclasses and all interfaces, each once.
    #[must_use]
    pub fn class_hierarchy(&self) -> Vec<Self> {
        hierarchy::class_hierarchy(self)
    }

    /// Returns `true` if the class is `type_name` or has it as an ancestor.
    #[must_use]
    pub fn is_assignable_to(&self, type_name: &str) -> bool {
        self.class_hierarchy().iter().any(|c| c.name() == type_name)
    }

    /// Declared fields.
    #[must_use]
    pub fn fields(&self) -> Vec<JavaField> {
        (0..self.node().fields.len())
            .map(|i| JavaField::new(self.graph.clone(), self.id, i))
            .collect()
    }

    /// Declared field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<JavaField> {
        self.node()
            .fields
            .iter()
            .position(|f| f.name == name)
            .map(|i| JavaField::new(self.graph.clone(), self.id, i))
    }

    /// Declared methods, constructors and static initializers.
    #[must_use]
    pub fn code_units(&self) -> Vec<JavaMethod> {
        (0..self.node().methods.len())
            .map(|i| JavaMethod::new(self.graph.clone(), self.id, i))
            .collect()
    }

    /// Declared methods, excluding constructors and static initializers.
    #[must_use]
    pub fn methods(&self) -> Vec<JavaMethod> {
        self.code_units_of(CodeUnitKind::Method)
    }

    /// Declared constructors.
    #[must_use]
    pub fn constructors(&self) -> Vec<JavaMethod> {
        self.code_units_of(CodeUnitKind::Constructor)
    }

    fn code_units_of(&self, kind: CodeUnitKind) -> Vec<JavaMethod> {
        self.code_units()
            .into_iter()
            .filter(|m| m.kind() == kind)
            .collect()
    }

    /// Accesses made from this class's code units.
    #[must_use]
    pub fn accesses_from_self(&self) -> Vec<JavaAccess> {
        let mut out = Vec::new();
        for (m, method) in self.node().methods.iter().enumerate() {
            for a in 0..method.accesses.len() {
                out.push(JavaAccess::new(
                    self.graph.clone(),
                    AccessId {
                        class: self.id,
                        method: m,
                        access: a,
                    },
                ));
            }
        }
        out
    }

    /// Accesses anywhere in the graph whose target owner is this class.
    #[must_use]
    pub fn accesses_to_self(&self) -> Vec<JavaAccess> {
        self.graph.data.accesses_to[self.id.0]
            .iter()
            .map(|id| JavaAccess::new(self.graph.clone(), *id))
            .collect()
    }

    /// Direct dependencies originating from this class.
    #[must_use]
    pub fn direct_dependencies_from_self(&self) -> Vec<Dependency> {
        dependency::from_class(self)
    }

    /// Direct dependencies from declared classes onto this class.
    #[must_use]
    pub fn direct_dependencies_to_self(&self) -> Vec<Dependency> {
        self.graph
            .classes()
            .iter()
            .flat_map(JavaClass::direct_dependencies_from_self)
            .filter(|d| d.target_class() == *self)
            .collect()
    }
}

impl CanBeAnnotated for JavaClass {
    fn annotations(&self) -> Vec<JavaAnnotation> {
        annotation::wrap(&self.graph, &self.node().annotations)
    }
}

impl HasName for JavaClass {
    fn name(&self) -> &str {
        &self.node().name
    }
}

impl HasModifiers for JavaClass {
    fn modifiers(&self) -> &[Modifier] {
        &self.node().modifiers
    }
}

impl Entity for JavaClass {
    fn subject(&self) -> Subject {
        Subject::new(EntityKind::Class, self.name())
    }

    fn description(&self) -> String {
        format!("Class <{}>", self.name())
    }
}

impl PartialEq for JavaClass {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && std::sync::Arc::ptr_eq(&self.graph.data, &other.graph.data)
    }
}

impl Eq for JavaClass {}

impl Hash for JavaClass {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for JavaClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JavaClass({})", self.name())
    }
}

impl fmt::Display for JavaClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{AccessDto, ClassDto, ClassGraph, MethodDto, ModelDocument};
    use crate::model::{CanBeAnnotated, Entity};

    fn graph() -> ClassGraph {
        ClassGraph::from_document(
            ModelDocument::new()
                .with_class(
                    ClassDto::new("p.Impl")
                        .extending("p.Base")
                        .implementing("p.Api")
                        .with_method(MethodDto::constructor())
                        .with_method(
                            MethodDto::new("run").with_access(AccessDto::call("q.Other", "go")),
                        ),
                )
                .with_class(ClassDto::new("p.Base").extending("java.lang.Object"))
                .with_class(
                    ClassDto::new("p.Api")
                        .with_kind(crate::model::ClassKind::Interface)
                        .implementing("java.io.Serializable"),
                )
                .with_class(ClassDto::new("p.Outer$Inner")),
        )
        .unwrap()
    }

    #[test]
    fn assignability_walks_superclasses_and_interfaces() {
        let g = graph();
        let impl_class = g.get("p.Impl").unwrap();
        assert!(impl_class.is_assignable_to("p.Impl"));
        assert!(impl_class.is_assignable_to("p.Base"));
        assert!(impl_class.is_assignable_to("java.lang.Object"));
        assert!(impl_class.is_assignable_to("java.io.Serializable"));
        assert!(!impl_class.is_assignable_to("q.Other"));
    }

    #[test]
    fn constructors_are_separate_from_methods() {
        let g = graph();
        let impl_class = g.get("p.Impl").unwrap();
        assert_eq!(impl_class.methods().len(), 1);
        assert_eq!(impl_class.constructors().len(), 1);
        assert_eq!(impl_class.code_units().len(), 2);
    }

    #[test]
    fn accesses_are_indexed_both_ways() {
        let g = graph();
        let other = g.get("q.Other").unwrap();
        assert!(!other.is_declared());
        let incoming = other.accesses_to_self();
        assert_eq!(incoming.len(), 1);
        assert_eq!(incoming[0].origin_owner().name(), "p.Impl");
    }

    #[test]
    fn top_level_and_description() {
        let g = graph();
        assert!(!g.get("p.Outer$Inner").unwrap().is_top_level());
        assert_eq!(g.get("p.Outer$Inner").unwrap().simple_name(), "Inner");
        assert_eq!(g.get("p.Impl").unwrap().description(), "Class <p.Impl>");
        assert!(!g.get("p.Impl").unwrap().is_annotated_with("x.Y"));
    }
}
