//! Structural model of an analyzed codebase.
//!
//! The model is produced by an external provider as JSON and loaded in
//! three stages, mirroring a DTO → loader → domain split:
//!
//! ```text
//! JSON → ModelDocument (dto) → validate + intern (loader) → ClassGraph
//! ```
//!
//! After loading, the graph is immutable. Entity handles ([`JavaClass`],
//! [`JavaMethod`], [`JavaField`], [`JavaAccess`], [`Dependency`], ...)
//! share it through an `Arc`, so they can be moved freely into predicate
//! closures and across threads.

mod access;
mod annotation;
mod class;
mod dependency;
mod dto;
mod entity;
mod graph;
mod loader;
mod member;
mod modifier;
mod package;

pub use access::{AccessTarget, JavaAccess};
pub use annotation::{AnnotationValue, CanBeAnnotated, JavaAnnotation};
pub use class::JavaClass;
pub use dependency::Dependency;
pub use dto::{AccessDto, AnnotationDto, ClassDto, FieldDto, MethodDto, ModelDocument, PackageDto};
pub use entity::{Entity, EntityKind, HasModifiers, HasName, HasOwner, Subject};
pub use graph::{ClassGraph, Ecosystem};
pub use loader::ModelError;
pub use member::{CodeUnitKind, JavaField, JavaMethod};
pub use modifier::{AccessKind, ClassKind, Modifier};
pub use package::JavaPackage;

/// Name of constructor code units.
pub const CONSTRUCTOR_NAME: &str = "<init>";

/// Name of static initializer code units.
pub const STATIC_INITIALIZER_NAME: &str = "<clinit>";
