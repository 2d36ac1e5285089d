//! The immutable class graph and its node storage.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use super::annotation::{AnnotationNode, AnnotationValue};
use super::class::JavaClass;
use super::dto::ModelDocument;
use super::loader::{self, ModelError};
use super::modifier::{AccessKind, ClassKind, Modifier};
use super::package::JavaPackage;

// ──────────────────────────────────────────────
// Node storage
// ──────────────────────────────────────────────

/// Index of a class node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct ClassId(pub(crate) usize);

/// Position of an access edge: owning class, code unit, access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct AccessId {
    pub(crate) class: ClassId,
    pub(crate) method: usize,
    pub(crate) access: usize,
}

/// How a class node came into the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeOrigin {
    /// Declared in the model document.
    Declared,
    /// Referenced but not declared; carries a name only.
    Stub,
    /// A primitive type such as `int`.
    Primitive,
    /// An array type. Dependencies point at the component.
    Array { component: ClassId },
}

#[derive(Debug)]
pub(crate) struct ClassNode {
    pub(crate) name: String,
    pub(crate) simple_name: String,
    pub(crate) package: String,
    pub(crate) kind: ClassKind,
    pub(crate) modifiers: Vec<Modifier>,
    pub(crate) superclass: Option<ClassId>,
    pub(crate) interfaces: Vec<ClassId>,
    pub(crate) annotations: Vec<Arc<AnnotationNode>>,
    pub(crate) source_file: String,
    pub(crate) fields: Vec<FieldNode>,
    pub(crate) methods: Vec<MethodNode>,
    pub(crate) origin: NodeOrigin,
}

impl ClassNode {
    pub(crate) fn stub(name: &str, origin: NodeOrigin) -> Self {
        Self {
            name: name.to_string(),
            simple_name: simple_name_of(name).to_string(),
            package: package_of(name).to_string(),
            kind: ClassKind::Class,
            modifiers: Vec::new(),
            superclass: None,
            interfaces: Vec::new(),
            annotations: Vec::new(),
            source_file: default_source_file(name),
            fields: Vec::new(),
            methods: Vec::new(),
            origin,
        }
    }
}

#[derive(Debug)]
pub(crate) struct FieldNode {
    pub(crate) name: String,
    pub(crate) raw_type: ClassId,
    pub(crate) modifiers: Vec<Modifier>,
    pub(crate) annotations: Vec<Arc<AnnotationNode>>,
}

#[derive(Debug)]
pub(crate) struct MethodNode {
    pub(crate) name: String,
    pub(crate) parameters: Vec<ClassId>,
    pub(crate) return_type: ClassId,
    pub(crate) modifiers: Vec<Modifier>,
    pub(crate) annotations: Vec<Arc<AnnotationNode>>,
    pub(crate) accesses: Vec<AccessNode>,
}

#[derive(Debug)]
pub(crate) struct AccessNode {
    pub(crate) kind: AccessKind,
    pub(crate) owner: ClassId,
    pub(crate) name: String,
    pub(crate) parameters: Vec<ClassId>,
    pub(crate) target_type: Option<ClassId>,
    pub(crate) line: u32,
}

#[derive(Debug)]
pub(crate) struct GraphData {
    pub(crate) classes: Vec<ClassNode>,
    pub(crate) index: HashMap<String, ClassId>,
    pub(crate) packages: HashMap<String, Vec<Arc<AnnotationNode>>>,
    pub(crate) ecosystem: Ecosystem,
    /// Per class, accesses whose target owner is that class.
    pub(crate) accesses_to: Vec<Vec<AccessId>>,
    pub(crate) declared: usize,
}

impl GraphData {
    pub(crate) fn node(&self, id: ClassId) -> &ClassNode {
        &self.classes[id.0]
    }

    pub(crate) fn access(&self, id: AccessId) -> &AccessNode {
        &self.classes[id.class.0].methods[id.method].accesses[id.access]
    }
}

// ──────────────────────────────────────────────
// Public graph
// ──────────────────────────────────────────────

/// Immutable structural model of one analyzed codebase.
///
/// Cloning is cheap; every entity handle keeps the graph alive.
#[derive(Clone)]
pub struct ClassGraph {
    pub(crate) data: Arc<GraphData>,
}

impl ClassGraph {
    /// Builds a graph from a model document.
    ///
    /// # Errors
    ///
    /// Returns an error when a class name is empty or declared twice.
    pub fn from_document(document: ModelDocument) -> Result<Self, ModelError> {
        loader::build(document)
    }

    /// Parses a JSON model document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the document is invalid.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        Self::from_document(loader::parse(json, "<inline>")?)
    }

    /// Loads a model file, or all `*.json` files below a directory.
    ///
    /// # Errors
    ///
    /// Returns an error if files cannot be read, parsed or merged.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        Self::from_document(loader::read(path)?)
    }

    /// Classes declared in the model, in document order. Stubs are excluded.
    #[must_use]
    pub fn classes(&self) -> Vec<JavaClass> {
        (0..self.data.declared)
            .map(|i| JavaClass::new(self.clone(), ClassId(i)))
            .collect()
    }

    /// Looks up a class (declared or referenced) by its binary name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<JavaClass> {
        self.data
            .index
            .get(name)
            .map(|id| JavaClass::new(self.clone(), *id))
    }

    /// Returns `true` if the class is declared in the model.
    #[must_use]
    pub fn declares(&self, name: &str) -> bool {
        self.data
            .index
            .get(name)
            .is_some_and(|id| self.data.node(*id).origin == NodeOrigin::Declared)
    }

    /// Number of declared classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.declared
    }

    /// Returns `true` if no class is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.declared == 0
    }

    /// Package handle by name.
    #[must_use]
    pub fn package(&self, name: &str) -> JavaPackage {
        JavaPackage::new(self.clone(), name)
    }

    /// Library versions supplied by the model provider.
    #[must_use]
    pub fn ecosystem(&self) -> &Ecosystem {
        &self.data.ecosystem
    }

    pub(crate) fn class(&self, id: ClassId) -> JavaClass {
        JavaClass::new(self.clone(), id)
    }
}

impl std::fmt::Debug for ClassGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassGraph")
            .field("declared", &self.data.declared)
            .field("nodes", &self.data.classes.len())
            .finish_non_exhaustive()
    }
}

/// Versions of libraries present on the analyzed classpath.
///
/// Rules that depend on a newer library surface consult this table instead
/// of probing for classes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ecosystem {
    versions: BTreeMap<String, String>,
}

impl Ecosystem {
    /// Creates a table from library → version pairs.
    #[must_use]
    pub fn new(versions: BTreeMap<String, String>) -> Self {
        Self { versions }
    }

    /// Raw version string of a library.
    #[must_use]
    pub fn version(&self, library: &str) -> Option<&str> {
        self.versions.get(library).map(String::as_str)
    }

    /// Leading numeric component of a library version (`"2.0.2"` → `2`).
    #[must_use]
    pub fn major_version(&self, library: &str) -> Option<u64> {
        let version = self.version(library)?;
        let digits: String = version
            .trim_start_matches(['v', 'V'])
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        digits.parse().ok()
    }

    /// Returns `true` if the library is present with at least the given major version.
    #[must_use]
    pub fn has_at_least(&self, library: &str, major: u64) -> bool {
        self.major_version(library).is_some_and(|v| v >= major)
    }

    /// Iterates library → version pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.versions.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

// ──────────────────────────────────────────────
// Name helpers
// ──────────────────────────────────────────────

pub(crate) const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "char", "short", "int", "long", "float", "double", "void",
];

/// Strips array dimensions: `java.lang.String[][]` → `java.lang.String`.
pub(crate) fn component_name(name: &str) -> &str {
    let mut base = name;
    while let Some(stripped) = base.strip_suffix("[]") {
        base = stripped;
    }
    base
}

/// Package of a binary name; empty for primitives and the default package.
pub(crate) fn package_of(name: &str) -> &str {
    let base = component_name(name);
    base.rfind('.').map_or("", |i| &base[..i])
}

/// Simple name of a binary name: `a.b.Outer$Inner` → `Inner`.
pub(crate) fn simple_name_of(name: &str) -> &str {
    let after_package = name.rfind('.').map_or(name, |i| &name[i + 1..]);
    after_package
        .rfind('$')
        .map_or(after_package, |i| &after_package[i + 1..])
}

/// `a.b.Outer$Inner` → `Outer.java`.
pub(crate) fn default_source_file(name: &str) -> String {
    let after_package = name.rfind('.').map_or(name, |i| &name[i + 1..]);
    let outer = after_package.split('$').next().unwrap_or(after_package);
    format!("{outer}.java")
}

pub(crate) fn annotation_node(
    raw_type: ClassId,
    values: BTreeMap<String, AnnotationValue>,
) -> Arc<AnnotationNode> {
    Arc::new(AnnotationNode { raw_type, values })
}
