//! Package handles.

use std::fmt;

use super::annotation::{self, CanBeAnnotated, JavaAnnotation};
use super::class::JavaClass;
use super::entity::{Entity, EntityKind, Subject};
use super::graph::ClassGraph;

/// A package. Packages exist implicitly; only annotated ones appear in the document.
#[derive(Clone)]
pub struct JavaPackage {
    graph: ClassGraph,
    name: String,
}

impl JavaPackage {
    pub(crate) fn new(graph: ClassGraph, name: &str) -> Self {
        Self {
            graph,
            name: name.to_string(),
        }
    }

    /// Fully qualified name; empty for the default package.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Enclosing package, `None` for a top-level or default package.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.name
            .rfind('.')
            .map(|i| Self::new(self.graph.clone(), &self.name[..i]))
    }

    /// Declared classes residing directly in this package.
    #[must_use]
    pub fn classes(&self) -> Vec<JavaClass> {
        self.graph
            .classes()
            .into_iter()
            .filter(|c| c.package_name() == self.name)
            .collect()
    }
}

impl CanBeAnnotated for JavaPackage {
    fn annotations(&self) -> Vec<JavaAnnotation> {
        self.graph
            .data
            .packages
            .get(&self.name)
            .map(|nodes| annotation::wrap(&self.graph, nodes))
            .unwrap_or_default()
    }
}

impl Entity for JavaPackage {
    fn subject(&self) -> Subject {
        Subject::new(EntityKind::Package, self.name.clone())
    }

    fn description(&self) -> String {
        format!("Package <{}>", self.name)
    }
}

impl PartialEq for JavaPackage {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for JavaPackage {}

impl fmt::Debug for JavaPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JavaPackage({})", self.name)
    }
}
