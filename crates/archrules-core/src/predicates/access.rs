//! Predicates over accesses and access targets.

use crate::model::{AccessTarget, JavaAccess, JavaClass};
use crate::predicate::DescribedPredicate;

/// Origin owner and target owner share a package; described as `in the same package`.
#[must_use]
pub fn target_has_owner_in_same_package() -> DescribedPredicate<JavaAccess> {
    DescribedPredicate::new("in the same package", |a: &JavaAccess| {
        a.origin_owner().package_name() == a.target_owner().package_name()
    })
}

/// The target owner satisfies `predicate`.
#[must_use]
pub fn target_owner(predicate: DescribedPredicate<JavaClass>) -> DescribedPredicate<JavaAccess> {
    let description = format!("target owner {}", predicate.description());
    DescribedPredicate::new(description, move |a: &JavaAccess| {
        predicate.test(&a.target_owner())
    })
}

/// The target satisfies `predicate`.
#[must_use]
pub fn target(predicate: DescribedPredicate<AccessTarget>) -> DescribedPredicate<JavaAccess> {
    let description = format!("target {}", predicate.description());
    DescribedPredicate::new(description, move |a: &JavaAccess| predicate.test(&a.target()))
}

/// The origin owner satisfies `predicate`.
#[must_use]
pub fn origin_owner(predicate: DescribedPredicate<JavaClass>) -> DescribedPredicate<JavaAccess> {
    let description = format!("origin owner {}", predicate.description());
    DescribedPredicate::new(description, move |a: &JavaAccess| {
        predicate.test(&a.origin_owner())
    })
}

/// Method calls and references only.
#[must_use]
pub fn method_calls() -> DescribedPredicate<JavaAccess> {
    DescribedPredicate::new("method calls", |a: &JavaAccess| {
        !a.kind().is_field_access() && !a.kind().is_constructor()
    })
}

/// Constructor calls and references only.
#[must_use]
pub fn constructor_calls() -> DescribedPredicate<JavaAccess> {
    DescribedPredicate::new("constructor calls", |a: &JavaAccess| a.kind().is_constructor())
}

/// Field reads and writes only.
#[must_use]
pub fn field_accesses() -> DescribedPredicate<JavaAccess> {
    DescribedPredicate::new("field accesses", |a: &JavaAccess| a.kind().is_field_access())
}

/// Calls to a method named `method` on an owner assignable to any of `owners`.
#[must_use]
pub fn calls_method_on_any(method: &str, owners: &[&str]) -> DescribedPredicate<JavaAccess> {
    let method_name = method.to_string();
    let owner_names: Vec<String> = owners.iter().map(|o| (*o).to_string()).collect();
    let description = format!("calls {method} on any of {}", owners.join(", "));
    DescribedPredicate::new(description, move |a: &JavaAccess| {
        !a.kind().is_field_access()
            && a.target().name() == method_name
            && owner_names
                .iter()
                .any(|o| a.target_owner().is_assignable_to(o))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AccessDto, ClassDto, ClassGraph, MethodDto, ModelDocument};
    use crate::predicates::class::assignable_to;
    use crate::predicates::name;

    fn accesses() -> Vec<JavaAccess> {
        let graph = ClassGraph::from_document(
            ModelDocument::new()
                .with_class(
                    ClassDto::new("p1.A").with_method(
                        MethodDto::new("run")
                            .with_access(AccessDto::call("p1.B", "go"))
                            .with_access(AccessDto::call("p2.Tasks", "getByName"))
                            .with_access(AccessDto::construct("p2.Thing"))
                            .with_access(AccessDto::get_field("p2.Thing", "x")),
                    ),
                )
                .with_class(ClassDto::new("p2.Tasks").implementing("org.gradle.api.tasks.TaskContainer")),
        )
        .unwrap();
        graph.get("p1.A").unwrap().accesses_from_self()
    }

    #[test]
    fn same_package_access() {
        let all = accesses();
        let p = target_has_owner_in_same_package();
        assert!(p.test(&all[0]));
        assert!(!p.test(&all[1]));
        assert_eq!(p.description(), "in the same package");
    }

    #[test]
    fn target_predicates() {
        let all = accesses();
        let by_name = target(name::<AccessTarget>("getByName"));
        assert!(by_name.test(&all[1]));
        assert!(!by_name.test(&all[0]));
        assert_eq!(by_name.description(), "target name 'getByName'");
        assert!(target_owner(assignable_to("org.gradle.api.tasks.TaskContainer")).test(&all[1]));
        let on_container =
            calls_method_on_any("getByName", &["org.gradle.api.tasks.TaskContainer"]);
        assert!(on_container.test(&all[1]));
        assert!(!on_container.test(&all[0]));
    }

    #[test]
    fn access_kinds() {
        let all = accesses();
        assert!(method_calls().test(&all[0]));
        assert!(constructor_calls().test(&all[2]));
        assert!(field_accesses().test(&all[3]));
        assert!(!method_calls().test(&all[3]));
    }
}
