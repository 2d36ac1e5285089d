//! Any-match condition over attributes of a class.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use super::{ArchCondition, ViolationEvent};
use crate::model::{Dependency, Entity, JavaClass};
use crate::predicate::DescribedPredicate;

type RelevantFn<A> = dyn Fn(&JavaClass) -> Vec<A> + Send + Sync;

/// Satisfied by a class when any of its relevant attributes matches.
///
/// Attributes are deduplicated in first-seen order, and those matching the
/// accumulated ignore predicate are dropped before matching. A class without
/// relevant attributes produces no event.
///
/// ```
/// use archrules_core::condition::conditions::have_any_dependencies_that;
/// use archrules_core::predicates::dependency::{reside_in_same_package, target_class};
/// use archrules_core::deprecation::deprecated;
///
/// let condition = have_any_dependencies_that(target_class(deprecated()))
///     .ignore_dependency(reside_in_same_package());
/// assert_eq!(condition.description(), "have any dependencies that target class deprecated");
/// ```
pub struct AnyMatchCondition<A> {
    description: String,
    matcher: DescribedPredicate<A>,
    relevant: Arc<RelevantFn<A>>,
    ignore: DescribedPredicate<A>,
}

/// Any-match condition over direct dependencies.
pub type AnyDependencyCondition = AnyMatchCondition<Dependency>;

impl<A> Clone for AnyMatchCondition<A> {
    fn clone(&self) -> Self {
        Self {
            description: self.description.clone(),
            matcher: self.matcher.clone(),
            relevant: Arc::clone(&self.relevant),
            ignore: self.ignore.clone(),
        }
    }
}

impl<A> AnyMatchCondition<A>
where
    A: Entity + Clone + Eq + Hash + Send + Sync + 'static,
{
    /// Creates a condition that ignores nothing.
    pub fn new<F>(
        description: impl Into<String>,
        matcher: DescribedPredicate<A>,
        relevant: F,
    ) -> Self
    where
        F: Fn(&JavaClass) -> Vec<A> + Send + Sync + 'static,
    {
        Self {
            description: description.into(),
            matcher,
            relevant: Arc::new(relevant),
            ignore: DescribedPredicate::always_false("ignore nothing"),
        }
    }

    /// A new condition that additionally ignores attributes matching `predicate`.
    #[must_use]
    pub fn ignore_dependency(&self, predicate: DescribedPredicate<A>) -> Self {
        Self {
            ignore: self.ignore.clone().or(predicate),
            ..self.clone()
        }
    }

    /// A new condition with a different description.
    #[must_use]
    pub fn described_as(&self, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..self.clone()
        }
    }

    /// The description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Attributes of `class` left after deduplication and ignoring.
    pub fn relevant_attributes(&self, class: &JavaClass) -> Vec<A> {
        let mut seen = HashSet::new();
        (self.relevant)(class)
            .into_iter()
            .filter(|a| !self.ignore.test(a))
            .filter(|a| seen.insert(a.clone()))
            .collect()
    }

    /// Events for one class.
    pub fn check(&self, class: &JavaClass) -> Vec<ViolationEvent> {
        let events: Vec<ViolationEvent> = self
            .relevant_attributes(class)
            .iter()
            .map(|a| ViolationEvent::new(a.subject(), self.matcher.test(a), a.description()))
            .collect();
        if events.is_empty() {
            return Vec::new();
        }
        let fallback = format!("{} does not {}", class.description(), self.description);
        vec![ViolationEvent::any_of(class.subject(), events, fallback)]
    }
}

impl<A> From<AnyMatchCondition<A>> for ArchCondition<JavaClass>
where
    A: Entity + Clone + Eq + Hash + Send + Sync + 'static,
{
    fn from(condition: AnyMatchCondition<A>) -> Self {
        let description = condition.description.clone();
        ArchCondition::new(description, move |class: &JavaClass| condition.check(class))
    }
}

impl<A: 'static> fmt::Debug for AnyMatchCondition<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyMatchCondition")
            .field("description", &self.description)
            .field("ignore", &self.ignore.description())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::conditions::have_any_dependencies_that;
    use crate::condition::never;
    use crate::model::{ClassDto, ClassGraph, FieldDto, MethodDto, ModelDocument};
    use crate::predicates::class::{reside_in_a_package, simple_name};
    use crate::predicates::dependency::target_class;

    fn graph() -> ClassGraph {
        ClassGraph::from_document(
            ModelDocument::new().with_class(
                ClassDto::new("app.A")
                    .with_field(FieldDto::new("b", "lib.B"))
                    .with_field(FieldDto::new("c", "lib.C"))
                    .with_field(FieldDto::new("d", "lib.internal.D"))
                    .with_method(MethodDto::new("make").returning("lib.B")),
            ),
        )
        .unwrap()
    }

    fn violation_count(condition: &AnyDependencyCondition) -> usize {
        let a = graph().get("app.A").unwrap();
        never(ArchCondition::from(condition.clone()))
            .check(&a)
            .iter()
            .filter(|e| e.is_violation())
            .map(|e| e.messages().len())
            .sum()
    }

    fn to_lib() -> AnyDependencyCondition {
        have_any_dependencies_that(target_class(reside_in_a_package("lib..")))
    }

    #[test]
    fn reports_each_matching_dependency() {
        assert_eq!(violation_count(&to_lib()), 4);
        let messages: Vec<String> = never(ArchCondition::from(to_lib()))
            .check(&graph().get("app.A").unwrap())
            .into_iter()
            .flat_map(|e| e.messages().to_vec())
            .collect();
        assert_eq!(messages[0], "Field <app.A.b> has type <lib.B> in (A.java:0)");
    }

    #[test]
    fn ignoring_never_adds_violations() {
        let base = to_lib();
        let ignored = base.ignore_dependency(target_class(simple_name("B")));
        assert_eq!(violation_count(&base), 4);
        assert_eq!(violation_count(&ignored), 2);
        assert!(violation_count(&ignored.ignore_dependency(target_class(simple_name("Z")))) <= 2);
    }

    #[test]
    fn ignores_compose_in_any_order() {
        let b = || target_class(simple_name("B"));
        let d = || target_class(reside_in_a_package("..internal.."));
        let one = to_lib().ignore_dependency(b()).ignore_dependency(d());
        let two = to_lib().ignore_dependency(d()).ignore_dependency(b());
        let a = graph().get("app.A").unwrap();
        assert_eq!(one.relevant_attributes(&a), two.relevant_attributes(&a));
        assert_eq!(violation_count(&one), 1);
    }

    #[test]
    fn ignore_and_rename_leave_the_base_condition_untouched() {
        let base = to_lib();
        let renamed = base.described_as("use the library");
        let _ = base.ignore_dependency(target_class(simple_name("B")));
        assert_eq!(renamed.description(), "use the library");
        assert_eq!(
            base.description(),
            "have any dependencies that target class reside in a package 'lib..'"
        );
        assert_eq!(violation_count(&base), 4);
    }

    #[test]
    fn debug_names_the_condition() {
        let debug = format!("{:?}", to_lib().described_as("use the library"));
        assert!(debug.starts_with("AnyMatchCondition"));
        assert!(debug.contains("use the library"));
    }

    #[test]
    fn class_without_attributes_produces_no_event() {
        let graph =
            ClassGraph::from_document(ModelDocument::new().with_class(ClassDto::new("app.Empty")))
                .unwrap();
        let empty = graph.get("app.Empty").unwrap();
        assert!(to_lib().check(&empty).is_empty());
        assert!(never(ArchCondition::from(to_lib())).check(&empty).is_empty());
    }
}
