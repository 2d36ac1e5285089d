//! Predicates over dependencies.

use crate::model::{Dependency, JavaClass};
use crate::predicate::DescribedPredicate;

/// Origin and target classes share a package.
#[must_use]
pub fn reside_in_same_package() -> DescribedPredicate<Dependency> {
    DescribedPredicate::new("reside in same package", |d: &Dependency| {
        d.origin_class().package_name() == d.target_class().package_name()
    })
}

/// The target class satisfies `predicate`.
#[must_use]
pub fn target_class(predicate: DescribedPredicate<JavaClass>) -> DescribedPredicate<Dependency> {
    let description = format!("target class {}", predicate.description());
    DescribedPredicate::new(description, move |d: &Dependency| {
        predicate.test(&d.target_class())
    })
}

/// The origin class satisfies `predicate`.
#[must_use]
pub fn origin_class(predicate: DescribedPredicate<JavaClass>) -> DescribedPredicate<Dependency> {
    let description = format!("origin class {}", predicate.description());
    DescribedPredicate::new(description, move |d: &Dependency| {
        predicate.test(&d.origin_class())
    })
}
