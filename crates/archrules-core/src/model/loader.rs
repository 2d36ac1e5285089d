//! DTO → class graph conversion with validation.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use super::annotation::AnnotationNode;
use super::dto::{AccessDto, AnnotationDto, ClassDto, FieldDto, MethodDto, ModelDocument};
use super::graph::{
    annotation_node, component_name, default_source_file, package_of, simple_name_of, AccessId,
    AccessNode, ClassGraph, ClassId, ClassNode, Ecosystem, FieldNode, GraphData, MethodNode,
    NodeOrigin, PRIMITIVES,
};
use super::modifier::Modifier;

/// Errors while reading or validating a model document.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// IO error reading a model file.
    #[error("Failed to read model file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The document is not valid model JSON.
    #[error("Failed to parse model {origin}: {source}")]
    Parse {
        /// File path, or `<inline>`.
        origin: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// Directory traversal failed.
    #[error("Failed to scan model directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// A directory contained no model files.
    #[error("No *.json model files found under {path}")]
    NoModelFiles {
        /// Directory that was scanned.
        path: PathBuf,
    },

    /// A required name is empty.
    #[error("{context}: name must not be empty")]
    EmptyName {
        /// Where the error occurred (e.g. `classes[3].fields[0].name`).
        context: String,
    },

    /// The same class is declared more than once.
    #[error("class `{name}` is declared more than once")]
    DuplicateClass {
        /// The duplicated binary name.
        name: String,
    },
}

/// Parses one JSON document.
pub(crate) fn parse(json: &str, origin: &str) -> Result<ModelDocument, ModelError> {
    serde_json::from_str(json).map_err(|e| ModelError::Parse {
        origin: origin.to_string(),
        source: e,
    })
}

/// Reads a model file, or merges every `*.json` file below a directory in path order.
pub(crate) fn read(path: &Path) -> Result<ModelDocument, ModelError> {
    if !path.is_dir() {
        return read_file(path);
    }

    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(path).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == "json")
        {
            files.push(entry.into_path());
        }
    }

    if files.is_empty() {
        return Err(ModelError::NoModelFiles {
            path: path.to_path_buf(),
        });
    }

    let mut document = ModelDocument::new();
    for file in &files {
        debug!("Reading model file: {}", file.display());
        document.merge(read_file(file)?);
    }
    info!("Merged {} model file(s) from {}", files.len(), path.display());
    Ok(document)
}

fn read_file(path: &Path) -> Result<ModelDocument, ModelError> {
    let content = std::fs::read_to_string(path).map_err(|e| ModelError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse(&content, &path.display().to_string())
}

/// Assigns node ids to type names, creating stub nodes on first reference.
struct Interner {
    index: HashMap<String, ClassId>,
    names: Vec<String>,
}

impl Interner {
    fn intern(&mut self, name: &str) -> ClassId {
        if let Some(id) = self.index.get(name) {
            return *id;
        }
        let component = component_name(name);
        if component != name {
            self.intern(component);
        }
        let id = ClassId(self.names.len());
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), id);
        id
    }

    fn origin_of(&self, name: &str) -> NodeOrigin {
        let component = component_name(name);
        if component != name {
            if let Some(id) = self.index.get(component) {
                return NodeOrigin::Array { component: *id };
            }
        }
        if PRIMITIVES.contains(&name) {
            NodeOrigin::Primitive
        } else {
            NodeOrigin::Stub
        }
    }
}

/// Validates a document and builds the immutable graph.
pub(crate) fn build(document: ModelDocument) -> Result<ClassGraph, ModelError> {
    validate(&document)?;

    let mut interner = Interner {
        index: HashMap::new(),
        names: Vec::new(),
    };
    for class in &document.classes {
        interner.intern(&class.name);
    }
    let declared = document.classes.len();

    let mut classes: Vec<ClassNode> = document
        .classes
        .into_iter()
        .map(|dto| convert_class(dto, &mut interner))
        .collect();

    let packages = document
        .packages
        .into_iter()
        .map(|p| {
            let annotations = convert_annotations(p.annotations, &mut interner);
            (p.name, annotations)
        })
        .fold(HashMap::new(), |mut acc: HashMap<String, Vec<_>>, (name, anns)| {
            acc.entry(name).or_default().extend(anns);
            acc
        });

    for name in &interner.names[declared..] {
        classes.push(ClassNode::stub(name, interner.origin_of(name)));
    }

    let accesses_to = index_accesses(&classes);
    let stubs = classes.len() - declared;
    info!(
        "Loaded class graph: {} declared class(es), {} referenced stub(s)",
        declared, stubs
    );

    Ok(ClassGraph {
        data: Arc::new(GraphData {
            classes,
            index: interner.index,
            packages,
            ecosystem: Ecosystem::new(document.ecosystem),
            accesses_to,
            declared,
        }),
    })
}

fn validate(document: &ModelDocument) -> Result<(), ModelError> {
    let mut seen = HashSet::new();
    for (i, class) in document.classes.iter().enumerate() {
        let ctx = format!("classes[{i}]");
        require_name(&class.name, || format!("{ctx}.name"))?;
        if !seen.insert(class.name.as_str()) {
            return Err(ModelError::DuplicateClass {
                name: class.name.clone(),
            });
        }
        for (j, field) in class.fields.iter().enumerate() {
            require_name(&field.name, || format!("{ctx}.fields[{j}].name"))?;
            require_name(&field.type_name, || format!("{ctx}.fields[{j}].type"))?;
        }
        for (j, method) in class.methods.iter().enumerate() {
            require_name(&method.name, || format!("{ctx}.methods[{j}].name"))?;
            for (k, access) in method.accesses.iter().enumerate() {
                require_name(&access.owner, || {
                    format!("{ctx}.methods[{j}].accesses[{k}].owner")
                })?;
            }
        }
    }
    for (i, package) in document.packages.iter().enumerate() {
        require_name(&package.name, || format!("packages[{i}].name"))?;
    }
    Ok(())
}

fn require_name(name: &str, context: impl FnOnce() -> String) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::EmptyName { context: context() });
    }
    Ok(())
}

fn convert_class(dto: ClassDto, interner: &mut Interner) -> ClassNode {
    let superclass = dto.superclass.as_deref().map(|s| interner.intern(s));
    let interfaces = dto.interfaces.iter().map(|i| interner.intern(i)).collect();
    let annotations = convert_annotations(dto.annotations, interner);
    let fields = dto
        .fields
        .into_iter()
        .map(|f| convert_field(f, interner))
        .collect();
    let methods = dto
        .methods
        .into_iter()
        .map(|m| convert_method(m, interner))
        .collect();

    ClassNode {
        simple_name: simple_name_of(&dto.name).to_string(),
        package: package_of(&dto.name).to_string(),
        source_file: dto
            .source_file
            .unwrap_or_else(|| default_source_file(&dto.name)),
        name: dto.name,
        kind: dto.kind,
        modifiers: normalize(dto.modifiers),
        superclass,
        interfaces,
        annotations,
        fields,
        methods,
        origin: NodeOrigin::Declared,
    }
}

fn convert_field(dto: FieldDto, interner: &mut Interner) -> FieldNode {
    FieldNode {
        raw_type: interner.intern(&dto.type_name),
        annotations: convert_annotations(dto.annotations, interner),
        modifiers: normalize(dto.modifiers),
        name: dto.name,
    }
}

fn convert_method(dto: MethodDto, interner: &mut Interner) -> MethodNode {
    MethodNode {
        parameters: dto.parameters.iter().map(|p| interner.intern(p)).collect(),
        return_type: interner.intern(&dto.return_type),
        annotations: convert_annotations(dto.annotations, interner),
        accesses: dto
            .accesses
            .into_iter()
            .map(|a| convert_access(a, interner))
            .collect(),
        modifiers: normalize(dto.modifiers),
        name: dto.name,
    }
}

fn convert_access(dto: AccessDto, interner: &mut Interner) -> AccessNode {
    AccessNode {
        kind: dto.kind,
        owner: interner.intern(&dto.owner),
        parameters: dto.parameters.iter().map(|p| interner.intern(p)).collect(),
        target_type: dto.type_name.as_deref().map(|t| interner.intern(t)),
        name: dto.name,
        line: dto.line,
    }
}

fn convert_annotations(
    dtos: Vec<AnnotationDto>,
    interner: &mut Interner,
) -> Vec<Arc<AnnotationNode>> {
    dtos.into_iter()
        .map(|a| annotation_node(interner.intern(&a.type_name), a.values))
        .collect()
}

fn normalize(mut modifiers: Vec<Modifier>) -> Vec<Modifier> {
    modifiers.sort();
    modifiers.dedup();
    modifiers
}

fn index_accesses(classes: &[ClassNode]) -> Vec<Vec<AccessId>> {
    let mut index: Vec<Vec<AccessId>> = vec![Vec::new(); classes.len()];
    for (c, class) in classes.iter().enumerate() {
        for (m, method) in class.methods.iter().enumerate() {
            for (a, access) in method.accesses.iter().enumerate() {
                index[access.owner.0].push(AccessId {
                    class: ClassId(c),
                    method: m,
                    access: a,
                });
            }
        }
    }
    index
}
