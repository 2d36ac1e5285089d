//! Entity identity shared by violation events and reports.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of entity a violation is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A class.
    Class,
    /// A method.
    Method,
    /// A constructor.
    Constructor,
    /// A static initializer.
    StaticInitializer,
    /// A field.
    Field,
    /// An annotation.
    Annotation,
    /// A dependency between classes.
    Dependency,
    /// A field access, call or reference.
    Access,
    /// A package.
    Package,
    /// The rule itself (e.g. it checked nothing).
    Rule,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Class => "class",
            Self::Method => "method",
            Self::Constructor => "constructor",
            Self::StaticInitializer => "static initializer",
            Self::Field => "field",
            Self::Annotation => "annotation",
            Self::Dependency => "dependency",
            Self::Access => "access",
            Self::Package => "package",
            Self::Rule => "rule",
        };
        f.write_str(name)
    }
}

/// Identity of the entity an event is about.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Subject {
    /// Entity kind.
    pub kind: EntityKind,
    /// Full name, e.g. `p.A`, `p.A.run(java.lang.String)` or `p.A.field`.
    pub name: String,
}

impl Subject {
    /// Creates a subject.
    #[must_use]
    pub fn new(kind: EntityKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.name)
    }
}

/// A model entity that can be the subject of a violation.
pub trait Entity {
    /// Identity used in events and reports.
    fn subject(&self) -> Subject;

    /// Human-readable description, e.g. `Class <p.A>`.
    fn description(&self) -> String;
}

/// Entities with a name.
pub trait HasName {
    /// The name; binary name for classes, member name for members.
    fn name(&self) -> &str;
}

/// Entities with declared modifiers.
pub trait HasModifiers {
    /// Declared modifiers.
    fn modifiers(&self) -> &[super::Modifier];

    /// Returns `true` if the modifier is declared.
    fn has_modifier(&self, modifier: super::Modifier) -> bool {
        self.modifiers().contains(&modifier)
    }
}

/// Members declared by a class.
pub trait HasOwner {
    /// Declaring class.
    fn owner(&self) -> super::JavaClass;
}
