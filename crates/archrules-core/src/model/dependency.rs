//! Class-to-class dependencies derived from declarations and accesses.

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::annotation::CanBeAnnotated;
use super::class::JavaClass;
use super::entity::{Entity, EntityKind, Subject};

/// A direct dependency of one class on another.
///
/// Two dependencies are equal when origin, target and description are equal.
#[derive(Clone)]
pub struct Dependency {
    origin: JavaClass,
    target: JavaClass,
    description: String,
}

impl Dependency {
    /// Class the dependency originates from.
    #[must_use]
    pub fn origin_class(&self) -> JavaClass {
        self.origin.clone()
    }

    /// Class depended upon. Arrays are reported as their component type.
    #[must_use]
    pub fn target_class(&self) -> JavaClass {
        self.target.clone()
    }
}

impl Entity for Dependency {
    fn subject(&self) -> Subject {
        Subject::new(
            EntityKind::Dependency,
            format!("{} -> {}", self.origin.name(), self.target.name()),
        )
    }

    fn description(&self) -> String {
        self.description.clone()
    }
}

impl PartialEq for Dependency {
    fn eq(&self, other: &Self) -> bool {
        self.origin == other.origin
            && self.target == other.target
            && self.description == other.description
    }
}

impl Eq for Dependency {}

impl Hash for Dependency {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.origin.hash(state);
        self.target.hash(state);
        self.description.hash(state);
    }
}

impl fmt::Debug for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dependency({})", self.description)
    }
}

struct Collector<'a> {
    origin: &'a JavaClass,
    location: String,
    seen: HashSet<Dependency>,
    out: Vec<Dependency>,
}

impl Collector<'_> {
    fn push(&mut self, target: &JavaClass, description: String) {
        let target = target.base_component_type();
        if target.is_primitive() || target == *self.origin {
            return;
        }
        let dependency = Dependency {
            origin: self.origin.clone(),
            target,
            description,
        };
        if self.seen.insert(dependency.clone()) {
            self.out.push(dependency);
        }
    }

    fn annotations(&mut self, subject: &str, annotated: &impl CanBeAnnotated) {
        for annotation in annotated.annotations() {
            let raw = annotation.raw_type();
            let description = format!(
                "{subject} is annotated with <{}> in {}",
                raw.name(),
                self.location
            );
            self.push(&raw, description);
        }
    }
}

/// Dependencies from `class`, in declaration order, each once.
pub(crate) fn from_class(class: &JavaClass) -> Vec<Dependency> {
    let mut c = Collector {
        origin: class,
        location: format!("({}:0)", class.source_file()),
        seen: HashSet::new(),
        out: Vec::new(),
    };
    let subject = class.description();

    if let Some(superclass) = class.superclass() {
        let description = format!(
            "{subject} extends class <{}> in {}",
            superclass.name(),
            c.location
        );
        c.push(&superclass, description);
    }
    let verb = if class.is_interface() { "extends" } else { "implements" };
    for interface in class.interfaces() {
        let description = format!(
            "{subject} {verb} interface <{}> in {}",
            interface.name(),
            c.location
        );
        c.push(&interface, description);
    }
    c.annotations(&subject, class);

    for field in class.fields() {
        let field_subject = field.description();
        let raw = field.raw_type();
        let description = format!(
            "{field_subject} has type <{}> in {}",
            raw.name(),
            c.location
        );
        c.push(&raw, description);
        c.annotations(&field_subject, &field);
    }

    for method in class.code_units() {
        let method_subject = method.description();
        for parameter in method.parameter_types() {
            let description = format!(
                "{method_subject} has parameter of type <{}> in {}",
                parameter.name(),
                c.location
            );
            c.push(&parameter, description);
        }
        if !method.is_constructor() {
            let raw = method.return_type();
            let description = format!(
                "{method_subject} has return type <{}> in {}",
                raw.name(),
                c.location
            );
            c.push(&raw, description);
        }
        c.annotations(&method_subject, &method);
    }

    for access in class.accesses_from_self() {
        c.push(&access.target_owner(), access.description());
    }

    c.out
}
