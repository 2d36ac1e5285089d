//! Bounded usage reachability from entry-point classes.
//!
//! A target class is *reachable* when an entry-point class accesses it
//! directly, or accesses a class that accesses it (two hops). The bound is
//! intentional: deeper call chains are not followed.
//!
//! Class-literal references (`Target.class`) are only seen when the model
//! records them as accesses of a field named `class`. A target referenced
//! solely through an unrecorded class literal is not detected.

use crate::hierarchy;
use crate::model::{JavaAccess, JavaClass};
use crate::predicate::DescribedPredicate;

/// Name of the synthetic field class literals are recorded against.
pub const CLASS_LITERAL_FIELD: &str = "class";

/// Reachability from classes matching an entry-point predicate.
#[derive(Debug, Clone)]
pub struct ReachabilityAnalysis {
    entry_point: DescribedPredicate<JavaClass>,
}

impl ReachabilityAnalysis {
    /// Creates an analysis for the given entry-point capability.
    #[must_use]
    pub fn new(entry_point: DescribedPredicate<JavaClass>) -> Self {
        Self { entry_point }
    }

    /// Entry points implementing an interface, e.g. `org.gradle.api.Plugin`.
    #[must_use]
    pub fn assignable_to(type_name: &'static str) -> Self {
        Self::new(DescribedPredicate::new(type_name, move |c: &JavaClass| {
            c.is_assignable_to(type_name)
        }))
    }

    fn is_entry_point(&self, class: &JavaClass) -> bool {
        self.entry_point.test(class)
    }

    /// Returns `true` if an entry point reaches `target` within two hops,
    /// or through a recorded class-literal access.
    #[must_use]
    pub fn is_reachable(&self, target: &JavaClass) -> bool {
        let direct_or_one_hop = target.accesses_to_self().iter().any(|access| {
            let origin = access.origin_owner();
            self.is_entry_point(&origin)
                || origin
                    .accesses_to_self()
                    .iter()
                    .any(|outer| self.is_entry_point(&outer.origin_owner()))
        });
        if direct_or_one_hop {
            return true;
        }

        hierarchy::class_hierarchy(target)
            .iter()
            .flat_map(JavaClass::accesses_to_self)
            .filter(is_class_literal_access)
            .any(|access| self.is_entry_point(&access.origin_owner()))
    }

    /// Predicate form, described as `referenced from <entry point>`.
    #[must_use]
    pub fn predicate(&self) -> DescribedPredicate<JavaClass> {
        let analysis = self.clone();
        DescribedPredicate::new(
            format!("referenced from {}", self.entry_point.description()),
            move |c: &JavaClass| analysis.is_reachable(c),
        )
    }
}

fn is_class_literal_access(access: &JavaAccess) -> bool {
    access.kind().is_field_access() && access.target().name() == CLASS_LITERAL_FIELD
}

/// Shorthand for [`ReachabilityAnalysis::predicate`].
#[must_use]
pub fn referenced_from(entry_point: DescribedPredicate<JavaClass>) -> DescribedPredicate<JavaClass> {
    ReachabilityAnalysis::new(entry_point).predicate()
}
