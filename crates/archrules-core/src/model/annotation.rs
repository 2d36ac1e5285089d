//! Annotations and annotation attribute values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::class::JavaClass;
use super::graph::{ClassGraph, ClassId};

/// An explicit annotation attribute value.
///
/// Values are kept as the provider wrote them. Lookups never coerce between
/// variants, so a string `"true"` is not a boolean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnnotationValue {
    /// `true` / `false`
    Bool(bool),
    /// Integral value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// String, class literal or enum constant name.
    String(String),
    /// Array value.
    Array(Vec<AnnotationValue>),
    /// Nested annotation parameters.
    Nested(BTreeMap<String, AnnotationValue>),
}

impl AnnotationValue {
    /// Returns the boolean if this is a `Bool`.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the string if this is a `String`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for AnnotationValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for AnnotationValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for AnnotationValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for AnnotationValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for AnnotationValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl fmt::Display for AnnotationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => write!(f, "\"{s}\""),
            Self::Array(items) => {
                f.write_str("{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("}")
            }
            Self::Nested(values) => {
                f.write_str("(")?;
                for (i, (k, v)) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}={v}")?;
                }
                f.write_str(")")
            }
        }
    }
}

#[derive(Debug)]
pub(crate) struct AnnotationNode {
    pub(crate) raw_type: ClassId,
    pub(crate) values: BTreeMap<String, AnnotationValue>,
}

/// An annotation on a class, member or package.
#[derive(Clone)]
pub struct JavaAnnotation {
    graph: ClassGraph,
    node: Arc<AnnotationNode>,
}

impl JavaAnnotation {
    pub(crate) fn new(graph: ClassGraph, node: Arc<AnnotationNode>) -> Self {
        Self { graph, node }
    }

    /// The annotation type.
    #[must_use]
    pub fn raw_type(&self) -> JavaClass {
        self.graph.class(self.node.raw_type)
    }

    /// Binary name of the annotation type.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.graph.data.node(self.node.raw_type).name
    }

    /// An explicit attribute value, `None` when the attribute was not written.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&AnnotationValue> {
        self.node.values.get(name)
    }

    /// All explicit attribute values.
    #[must_use]
    pub fn values(&self) -> &BTreeMap<String, AnnotationValue> {
        &self.node.values
    }

    /// Returns `true` if the annotation type is `type_name`.
    #[must_use]
    pub fn is_of_type(&self, type_name: &str) -> bool {
        self.type_name() == type_name
    }
}

impl fmt::Debug for JavaAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JavaAnnotation")
            .field("type", &self.type_name())
            .field("values", &self.node.values)
            .finish()
    }
}

impl fmt::Display for JavaAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.raw_type().simple_name())?;
        if !self.node.values.is_empty() {
            f.write_str("(")?;
            for (i, (k, v)) in self.node.values.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{k}={v}")?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

/// Entities that carry annotations.
pub trait CanBeAnnotated {
    /// Annotations declared directly on the entity.
    fn annotations(&self) -> Vec<JavaAnnotation>;

    /// Returns `true` if an annotation of the given type is present.
    fn is_annotated_with(&self, type_name: &str) -> bool {
        self.annotations().iter().any(|a| a.is_of_type(type_name))
    }

    /// Returns `true` if any annotation satisfies the test.
    fn is_annotated_where(&self, test: &dyn Fn(&JavaAnnotation) -> bool) -> bool {
        self.annotations().iter().any(test)
    }

    /// The annotation of the given type, if present.
    fn annotation(&self, type_name: &str) -> Option<JavaAnnotation> {
        self.annotations()
            .into_iter()
            .find(|a| a.is_of_type(type_name))
    }

    /// Returns `true` if the entity is annotated with `type_name`, or with an
    /// annotation whose type is itself (transitively) annotated with it.
    fn is_meta_annotated_with(&self, type_name: &str) -> bool {
        let mut visited = Vec::new();
        self.annotations()
            .iter()
            .any(|a| meta_annotated(a, type_name, &mut visited))
    }
}

fn meta_annotated(annotation: &JavaAnnotation, type_name: &str, visited: &mut Vec<ClassId>) -> bool {
    if annotation.is_of_type(type_name) {
        return true;
    }
    let raw = annotation.node.raw_type;
    if visited.contains(&raw) {
        return false;
    }
    visited.push(raw);
    annotation
        .raw_type()
        .annotations()
        .iter()
        .any(|a| meta_annotated(a, type_name, visited))
}

pub(crate) fn wrap(graph: &ClassGraph, nodes: &[Arc<AnnotationNode>]) -> Vec<JavaAnnotation> {
    nodes
        .iter()
        .map(|n| JavaAnnotation::new(graph.clone(), Arc::clone(n)))
        .collect()
}
