//! Access edges: field accesses, calls and references made from code units.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::annotation::{CanBeAnnotated, JavaAnnotation};
use super::class::JavaClass;
use super::entity::{Entity, EntityKind, HasName, Subject};
use super::graph::{AccessId, AccessNode, ClassGraph};
use super::member::{JavaField, JavaMethod};
use super::modifier::AccessKind;

/// An access made from a code unit.
#[derive(Clone)]
pub struct JavaAccess {
    graph: ClassGraph,
    id: AccessId,
}

impl JavaAccess {
    pub(crate) fn new(graph: ClassGraph, id: AccessId) -> Self {
        Self { graph, id }
    }

    fn node(&self) -> &AccessNode {
        self.graph.data.access(self.id)
    }

    /// Access kind.
    #[must_use]
    pub fn kind(&self) -> AccessKind {
        self.node().kind
    }

    /// Code unit containing the access.
    #[must_use]
    pub fn origin(&self) -> JavaMethod {
        JavaMethod::new(self.graph.clone(), self.id.class, self.id.method)
    }

    /// Class containing the access.
    #[must_use]
    pub fn origin_owner(&self) -> JavaClass {
        self.graph.class(self.id.class)
    }

    /// The accessed member.
    #[must_use]
    pub fn target(&self) -> AccessTarget {
        AccessTarget {
            graph: self.graph.clone(),
            id: self.id,
        }
    }

    /// Owner of the accessed member.
    #[must_use]
    pub fn target_owner(&self) -> JavaClass {
        self.graph.class(self.node().owner)
    }

    /// Source line, `0` when unknown.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.node().line
    }

    /// `(A.java:12)`
    #[must_use]
    pub fn source_location(&self) -> String {
        format!("({}:{})", self.origin_owner().source_file(), self.line())
    }
}

impl Entity for JavaAccess {
    fn subject(&self) -> Subject {
        Subject::new(
            EntityKind::Access,
            format!("{} -> {}", self.origin().full_name(), self.target().full_name()),
        )
    }

    fn description(&self) -> String {
        format!(
            "{} {} <{}> in {}",
            self.origin().description(),
            self.kind().verb(),
            self.target().full_name(),
            self.source_location()
        )
    }
}

impl PartialEq for JavaAccess {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && Arc::ptr_eq(&self.graph.data, &other.graph.data)
    }
}

impl Eq for JavaAccess {}

impl Hash for JavaAccess {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for JavaAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JavaAccess({})", self.description())
    }
}

/// The member an access points at.
///
/// Targets are resolved lazily against the owner's hierarchy. Annotations of
/// a target are those of the resolved member; unresolved targets carry none.
#[derive(Clone)]
pub struct AccessTarget {
    graph: ClassGraph,
    id: AccessId,
}

impl AccessTarget {
    fn node(&self) -> &AccessNode {
        self.graph.data.access(self.id)
    }

    /// Class declaring or inheriting the member.
    #[must_use]
    pub fn owner(&self) -> JavaClass {
        self.graph.class(self.node().owner)
    }

    /// Member name; `<init>` for constructors.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.node().name
    }

    /// Kind of the access that reached this target.
    #[must_use]
    pub fn kind(&self) -> AccessKind {
        self.node().kind
    }

    /// Erased parameter types of a method or constructor target.
    #[must_use]
    pub fn parameter_types(&self) -> Vec<JavaClass> {
        self.node()
            .parameters
            .iter()
            .map(|id| self.graph.class(*id))
            .collect()
    }

    /// Binary names of the parameter types.
    #[must_use]
    pub fn parameter_type_names(&self) -> Vec<&str> {
        self.node()
            .parameters
            .iter()
            .map(|id| self.graph.data.node(*id).name.as_str())
            .collect()
    }

    /// Field type or return type, when known.
    #[must_use]
    pub fn raw_type(&self) -> Option<JavaClass> {
        if let Some(id) = self.node().target_type {
            return Some(self.graph.class(id));
        }
        if self.kind().is_field_access() {
            self.resolve_field().map(|f| f.raw_type())
        } else {
            self.resolve_method().map(|m| m.return_type())
        }
    }

    /// `q.B.go(int)` for code units, `q.B.count` for fields.
    #[must_use]
    pub fn full_name(&self) -> String {
        if self.kind().is_field_access() {
            format!("{}.{}", self.owner().name(), self.name())
        } else {
            format!(
                "{}.{}({})",
                self.owner().name(),
                self.name(),
                self.parameter_type_names().join(", ")
            )
        }
    }

    /// The declared code unit this target resolves to, searching the owner's hierarchy.
    #[must_use]
    pub fn resolve_method(&self) -> Option<JavaMethod> {
        if self.kind().is_field_access() {
            return None;
        }
        let node = self.node();
        let owners = if self.kind().is_constructor() {
            vec![self.owner()]
        } else {
            self.owner().class_hierarchy()
        };
        owners.into_iter().find_map(|class| {
            class
                .code_units()
                .into_iter()
                .find(|m| m.name() == node.name && m.parameter_ids() == node.parameters.as_slice())
        })
    }

    /// The declared field this target resolves to, searching the owner's hierarchy.
    #[must_use]
    pub fn resolve_field(&self) -> Option<JavaField> {
        if !self.kind().is_field_access() {
            return None;
        }
        self.owner()
            .class_hierarchy()
            .into_iter()
            .find_map(|class| class.field(self.name()))
    }
}

impl HasName for AccessTarget {
    fn name(&self) -> &str {
        &self.node().name
    }
}

impl CanBeAnnotated for AccessTarget {
    fn annotations(&self) -> Vec<JavaAnnotation> {
        if self.kind().is_field_access() {
            self.resolve_field()
                .map(|f| f.annotations())
                .unwrap_or_default()
        } else {
            self.resolve_method()
                .map(|m| m.annotations())
                .unwrap_or_default()
        }
    }
}

impl fmt::Debug for AccessTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessTarget({})", self.full_name())
    }
}

impl fmt::Display for AccessTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}
