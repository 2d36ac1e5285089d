//! Predicates over classes.

use crate::model::{CanBeAnnotated, ClassKind, JavaClass, JavaPackage};
use crate::predicate::DescribedPredicate;
use crate::utils::packages::{package_matches, package_matches_any};

use super::simple;

/// Package matches an ArchUnit-style pattern, e.g. `org.gradle..`.
#[must_use]
pub fn reside_in_a_package(pattern: &str) -> DescribedPredicate<JavaClass> {
    let pattern = pattern.to_string();
    DescribedPredicate::new(format!("reside in a package '{pattern}'"), move |c: &JavaClass| {
        package_matches(c.package_name(), &pattern)
    })
}

/// Package matches any of the patterns.
#[must_use]
pub fn reside_in_any_package<I, S>(patterns: I) -> DescribedPredicate<JavaClass>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
    let quoted: Vec<String> = patterns.iter().map(|p| format!("'{p}'")).collect();
    DescribedPredicate::new(
        format!("reside in any package [{}]", quoted.join(", ")),
        move |c: &JavaClass| package_matches_any(c.package_name(), &patterns),
    )
}

/// Package is exactly `package`.
#[must_use]
pub fn reside_in_package(package: &str) -> DescribedPredicate<JavaClass> {
    let package = package.to_string();
    DescribedPredicate::new(format!("reside in package {package}"), move |c: &JavaClass| {
        c.package_name() == package
    })
}

/// Evaluates `predicate` on the class's package.
#[must_use]
pub fn reside_in_a_package_that(
    predicate: DescribedPredicate<JavaPackage>,
) -> DescribedPredicate<JavaClass> {
    let description = format!("reside in a package that {}", predicate.description());
    predicate
        .on_result_of(JavaClass::package)
        .described_as(description)
}

/// The class's package carries the annotation.
#[must_use]
pub fn reside_in_package_annotated_with(type_name: &str) -> DescribedPredicate<JavaClass> {
    let type_name = type_name.to_string();
    let annotated = DescribedPredicate::new(
        format!("is annotated with @{}", simple(&type_name)),
        move |p: &JavaPackage| p.is_annotated_with(&type_name),
    );
    reside_in_a_package_that(annotated)
}

/// Simple name equals `name`.
#[must_use]
pub fn simple_name(name: &str) -> DescribedPredicate<JavaClass> {
    let name = name.to_string();
    DescribedPredicate::new(format!("simple name '{name}'"), move |c: &JavaClass| {
        c.simple_name() == name
    })
}

/// Simple name ends with `suffix`.
#[must_use]
pub fn simple_name_ending_with(suffix: &str) -> DescribedPredicate<JavaClass> {
    let suffix = suffix.to_string();
    DescribedPredicate::new(
        format!("simple name ending with '{suffix}'"),
        move |c: &JavaClass| c.simple_name().ends_with(&suffix),
    )
}

/// Binary name equals `name`.
#[must_use]
pub fn fully_qualified_name(name: &str) -> DescribedPredicate<JavaClass> {
    let name = name.to_string();
    DescribedPredicate::new(format!("name '{name}'"), move |c: &JavaClass| c.name() == name)
}

/// The class is `type_name` or has it as an ancestor.
#[must_use]
pub fn assignable_to(type_name: &str) -> DescribedPredicate<JavaClass> {
    let type_name = type_name.to_string();
    DescribedPredicate::new(format!("assignable to {type_name}"), move |c: &JavaClass| {
        c.is_assignable_to(&type_name)
    })
}

/// The class or one of its ancestors satisfies `predicate`.
#[must_use]
pub fn assignable_to_class_that(
    predicate: DescribedPredicate<JavaClass>,
) -> DescribedPredicate<JavaClass> {
    let description = format!("assignable to {}", predicate.description());
    DescribedPredicate::new(description, move |c: &JavaClass| {
        c.class_hierarchy().iter().any(|a| predicate.test(a))
    })
}

/// Interfaces; described as `interfaces`.
#[must_use]
pub fn interfaces() -> DescribedPredicate<JavaClass> {
    DescribedPredicate::new("interfaces", |c: &JavaClass| c.kind() == ClassKind::Interface)
}

/// Classes not nested in another class.
#[must_use]
pub fn top_level() -> DescribedPredicate<JavaClass> {
    DescribedPredicate::new("top level", JavaClass::is_top_level)
}

/// Classes declared in the model (not referenced stubs).
#[must_use]
pub fn declared() -> DescribedPredicate<JavaClass> {
    DescribedPredicate::new("declared", JavaClass::is_declared)
}
