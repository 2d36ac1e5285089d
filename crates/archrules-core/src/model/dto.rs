//! JSON deserialization types (DTO layer).
//!
//! These types mirror the document written by the structural-model provider.
//! They are converted to the immutable [`ClassGraph`](super::ClassGraph) by the
//! loader. The `with_*` builders exist so that tests and embedding tools can
//! assemble documents in code.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::annotation::AnnotationValue;
use super::modifier::{AccessKind, ClassKind, Modifier};

/// Raw model document produced by the structural-model provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelDocument {
    /// Library name → version of the analyzed classpath (e.g. `testcontainers = 2.0.2`).
    #[serde(default)]
    pub ecosystem: BTreeMap<String, String>,

    /// Packages carrying annotations (`package-info`).
    #[serde(default)]
    pub packages: Vec<PackageDto>,

    /// Imported classes.
    #[serde(default)]
    pub classes: Vec<ClassDto>,
}

impl ModelDocument {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a class declaration.
    #[must_use]
    pub fn with_class(mut self, class: ClassDto) -> Self {
        self.classes.push(class);
        self
    }

    /// Adds an annotated package.
    #[must_use]
    pub fn with_package(mut self, package: PackageDto) -> Self {
        self.packages.push(package);
        self
    }

    /// Records the version of a library on the analyzed classpath.
    #[must_use]
    pub fn with_library(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.ecosystem.insert(name.into(), version.into());
        self
    }

    /// Merges another document into this one.
    pub fn merge(&mut self, other: Self) {
        self.ecosystem.extend(other.ecosystem);
        self.packages.extend(other.packages);
        self.classes.extend(other.classes);
    }
}

/// Package annotations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageDto {
    /// Fully qualified package name.
    pub name: String,
    /// Annotations declared in `package-info`.
    #[serde(default)]
    pub annotations: Vec<AnnotationDto>,
}

impl PackageDto {
    /// Creates a package entry.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotations: Vec::new(),
        }
    }

    /// Adds an annotation.
    #[must_use]
    pub fn with_annotation(mut self, annotation: AnnotationDto) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// A class, interface, enum, annotation type or record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassDto {
    /// Binary name, e.g. `com.acme.Outer$Inner`.
    pub name: String,
    /// Declaration kind.
    #[serde(default)]
    pub kind: ClassKind,
    /// Declared modifiers.
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    /// Direct superclass, absent for interfaces and `java.lang.Object`.
    #[serde(default)]
    pub superclass: Option<String>,
    /// Directly implemented (or extended, for interfaces) interfaces.
    #[serde(default)]
    pub interfaces: Vec<String>,
    /// Class-level annotations.
    #[serde(default)]
    pub annotations: Vec<AnnotationDto>,
    /// Source file name, e.g. `Outer.java`.
    #[serde(default)]
    pub source_file: Option<String>,
    /// Declared fields.
    #[serde(default)]
    pub fields: Vec<FieldDto>,
    /// Declared methods, constructors (`<init>`) and static initializers (`<clinit>`).
    #[serde(default)]
    pub methods: Vec<MethodDto>,
}

impl ClassDto {
    /// Creates a public class with no members.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ClassKind::Class,
            modifiers: vec![Modifier::Public],
            superclass: None,
            interfaces: Vec::new(),
            annotations: Vec::new(),
            source_file: None,
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Sets the declaration kind.
    #[must_use]
    pub fn with_kind(mut self, kind: ClassKind) -> Self {
        self.kind = kind;
        self
    }

    /// Replaces the modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers = modifiers.into_iter().collect();
        self
    }

    /// Sets the superclass.
    #[must_use]
    pub fn extending(mut self, superclass: impl Into<String>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    /// Adds an implemented interface.
    #[must_use]
    pub fn implementing(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    /// Adds an annotation.
    #[must_use]
    pub fn with_annotation(mut self, annotation: AnnotationDto) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Adds a field.
    #[must_use]
    pub fn with_field(mut self, field: FieldDto) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds a method or constructor.
    #[must_use]
    pub fn with_method(mut self, method: MethodDto) -> Self {
        self.methods.push(method);
        self
    }
}

/// A declared field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDto {
    /// Field name.
    pub name: String,
    /// Erased field type.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Declared modifiers.
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    /// Field annotations.
    #[serde(default)]
    pub annotations: Vec<AnnotationDto>,
}

impl FieldDto {
    /// Creates a private field.
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            modifiers: vec![Modifier::Private],
            annotations: Vec::new(),
        }
    }

    /// Replaces the modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers = modifiers.into_iter().collect();
        self
    }

    /// Adds an annotation.
    #[must_use]
    pub fn with_annotation(mut self, annotation: AnnotationDto) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// A declared method, constructor or static initializer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodDto {
    /// Method name; `<init>` for constructors, `<clinit>` for static initializers.
    pub name: String,
    /// Erased parameter types.
    #[serde(default)]
    pub parameters: Vec<String>,
    /// Erased return type.
    #[serde(default = "default_return_type")]
    pub return_type: String,
    /// Declared modifiers.
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    /// Method annotations.
    #[serde(default)]
    pub annotations: Vec<AnnotationDto>,
    /// Accesses made from the method body, in bytecode order.
    #[serde(default)]
    pub accesses: Vec<AccessDto>,
}

fn default_return_type() -> String {
    "void".to_string()
}

impl MethodDto {
    /// Creates a public no-arg method returning `void`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_type: default_return_type(),
            modifiers: vec![Modifier::Public],
            annotations: Vec::new(),
            accesses: Vec::new(),
        }
    }

    /// Creates a public constructor.
    #[must_use]
    pub fn constructor() -> Self {
        Self::new(super::CONSTRUCTOR_NAME)
    }

    /// Sets the parameter types.
    #[must_use]
    pub fn with_parameters<I, S>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameters = parameters.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the return type.
    #[must_use]
    pub fn returning(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = return_type.into();
        self
    }

    /// Replaces the modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers = modifiers.into_iter().collect();
        self
    }

    /// Adds an annotation.
    #[must_use]
    pub fn with_annotation(mut self, annotation: AnnotationDto) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Adds an access made from the body.
    #[must_use]
    pub fn with_access(mut self, access: AccessDto) -> Self {
        self.accesses.push(access);
        self
    }
}

/// A field access, method call or constructor call made from a method body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessDto {
    /// Access kind.
    pub kind: AccessKind,
    /// Class declaring (or inheriting) the accessed member.
    pub owner: String,
    /// Name of the accessed member; `<init>` for constructors.
    pub name: String,
    /// Erased parameter types of the accessed method or constructor.
    #[serde(default)]
    pub parameters: Vec<String>,
    /// Field type or return type of the target, when known.
    #[serde(rename = "type", default)]
    pub type_name: Option<String>,
    /// Source line of the access.
    #[serde(default)]
    pub line: u32,
}

impl AccessDto {
    /// Creates an access of the given kind.
    #[must_use]
    pub fn new(kind: AccessKind, owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind,
            owner: owner.into(),
            name: name.into(),
            parameters: Vec::new(),
            type_name: None,
            line: 0,
        }
    }

    /// A method call.
    #[must_use]
    pub fn call(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(AccessKind::MethodCall, owner, name)
    }

    /// A constructor call.
    #[must_use]
    pub fn construct(owner: impl Into<String>) -> Self {
        Self::new(AccessKind::ConstructorCall, owner, super::CONSTRUCTOR_NAME)
    }

    /// A field read.
    #[must_use]
    pub fn get_field(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(AccessKind::FieldGet, owner, name)
    }

    /// Sets the parameter types of the target.
    #[must_use]
    pub fn with_parameters<I, S>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameters = parameters.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the field type or return type of the target.
    #[must_use]
    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Sets the source line.
    #[must_use]
    pub fn at_line(mut self, line: u32) -> Self {
        self.line = line;
        self
    }
}

/// An annotation instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationDto {
    /// Annotation type name.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Explicit attribute values.
    #[serde(default)]
    pub values: BTreeMap<String, AnnotationValue>,
}

impl AnnotationDto {
    /// Creates an annotation without attributes.
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            values: BTreeMap::new(),
        }
    }

    /// Sets an attribute value.
    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<AnnotationValue>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }
}
