//! Modifiers and kind enums shared by model entities.

use serde::{Deserialize, Serialize};
use std::fmt;

/// JVM access and property modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    /// `public`
    Public,
    /// `protected`
    Protected,
    /// `private`
    Private,
    /// `static`
    Static,
    /// `final`
    Final,
    /// `abstract`
    Abstract,
    /// `synchronized`
    Synchronized,
    /// `native`
    Native,
    /// `transient`
    Transient,
    /// `volatile`
    Volatile,
    /// Compiler generated.
    Synthetic,
    /// Compiler generated bridge method.
    Bridge,
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Public => "PUBLIC",
            Self::Protected => "PROTECTED",
            Self::Private => "PRIVATE",
            Self::Static => "STATIC",
            Self::Final => "FINAL",
            Self::Abstract => "ABSTRACT",
            Self::Synchronized => "SYNCHRONIZED",
            Self::Native => "NATIVE",
            Self::Transient => "TRANSIENT",
            Self::Volatile => "VOLATILE",
            Self::Synthetic => "SYNTHETIC",
            Self::Bridge => "BRIDGE",
        };
        f.write_str(name)
    }
}

/// Kind of a class declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    /// A regular class.
    #[default]
    Class,
    /// An interface.
    Interface,
    /// An enum.
    Enum,
    /// An annotation type.
    Annotation,
    /// A record.
    Record,
}

/// Kind of an access edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessKind {
    /// `owner.method(..)`
    MethodCall,
    /// `new Owner(..)`
    ConstructorCall,
    /// Field read.
    FieldGet,
    /// Field write.
    FieldSet,
    /// `Owner::method`
    MethodReference,
    /// `Owner::new`
    ConstructorReference,
}

impl AccessKind {
    /// Returns `true` for field reads and writes.
    #[must_use]
    pub fn is_field_access(self) -> bool {
        matches!(self, Self::FieldGet | Self::FieldSet)
    }

    /// Returns `true` for constructor calls and references.
    #[must_use]
    pub fn is_constructor(self) -> bool {
        matches!(self, Self::ConstructorCall | Self::ConstructorReference)
    }

    /// Verb used in access descriptions.
    #[must_use]
    pub fn verb(self) -> &'static str {
        match self {
            Self::MethodCall => "calls method",
            Self::ConstructorCall => "calls constructor",
            Self::FieldGet => "gets field",
            Self::FieldSet => "sets field",
            Self::MethodReference => "references method",
            Self::ConstructorReference => "references constructor",
        }
    }
}
