//! JSpecify nullability rules.
//!
//! # Rationale
//!
//! `@NullMarked` makes non-null the default for a class, so the remaining
//! `@Nullable` annotations carry real information. Legacy nullability
//! annotations from other vendors mix semantics and confuse tooling once a
//! class is null marked.
//!
//! # Detected Patterns
//!
//! - Public top-level production classes with public members and no
//!   `@NullMarked` annotation (Kotlin classes are exempt)
//! - Null-marked classes still depending on JetBrains, Spring, javax or
//!   Jakarta nullability annotations
//! - `Optional` fields and `Optional` method parameters
//!
//! # Good Patterns
//!
//! ```text
//! @NullMarked
//! public class Users {
//!     public @Nullable User find(String id) { ... }
//! }
//! ```

use archrules_core::condition::conditions::{
    be_annotated_with, depend_on_classes_that, have_raw_parameter_types, have_raw_type,
};
use archrules_core::hierarchy::{
    contain_any_code_units_that, contain_any_fields_that, contain_any_methods_that,
};
use archrules_core::model::{JavaClass, Modifier};
use archrules_core::predicate::{are_not, have, not};
use archrules_core::predicates::class::{fully_qualified_name, top_level};
use archrules_core::predicates::{annotated_with, modifier};
use archrules_core::rule::{self, Priority, Rule, RuleError};
use archrules_core::{DescribedPredicate, RuleMap, RuleSet};

/// `org.jspecify.annotations.NullMarked`
pub const NULL_MARKED: &str = "org.jspecify.annotations.NullMarked";

const JUNIT_TEST: &str = "org.junit.jupiter.api.Test";
const KOTLIN_METADATA: &str = "kotlin.Metadata";
const LEGACY_REASON: &str = "Only JSpecify annotations should be used on @NullMarked classes";

/// Legacy annotation pairs, keyed by rule name.
const LEGACY_ANNOTATIONS: [(&str, &str, &str); 4] = [
    (
        "upgrade legacy jetbrains annotations",
        "org.jetbrains.annotations.Nullable",
        "org.jetbrains.annotations.NotNull",
    ),
    (
        "upgrade legacy spring annotations",
        "org.springframework.lang.Nullable",
        "org.springframework.lang.NonNull",
    ),
    (
        "upgrade legacy javax annotations",
        "javax.annotation.Nullable",
        "javax.annotation.Nonnull",
    ),
    (
        "upgrade legacy jakarta annotations",
        "jakarta.annotation.Nullable",
        "jakarta.annotation.Nonnull",
    ),
];

/// Nullability rule set.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullabilityRules;

/// Classes with no method annotated as a JUnit test.
fn have_no_tests() -> DescribedPredicate<JavaClass> {
    not(contain_any_methods_that(annotated_with(JUNIT_TEST))).described_as("have no tests")
}

fn contain_any_public_members() -> DescribedPredicate<JavaClass> {
    contain_any_code_units_that(modifier(Modifier::Public))
        .or(contain_any_fields_that(modifier(Modifier::Public)))
        .described_as("contain any members that modifier PUBLIC")
}

/// Public API classes should be `@NullMarked`.
///
/// # Errors
///
/// Returns an error if the rule definition is invalid.
pub fn public_classes_null_marked() -> Result<Rule, RuleError> {
    rule::priority(Priority::Medium)
        .classes()
        .that(top_level())
        .that(modifier(Modifier::Public).described_as("are public"))
        .that(contain_any_public_members())
        .that(have_no_tests())
        .that(are_not(annotated_with(KOTLIN_METADATA)))
        .should(be_annotated_with::<JavaClass>(NULL_MARKED))
        .allow_empty_should(true)
        .because("public classes should be null marked")
        .build()
}

/// Null-marked classes must not depend on either legacy annotation.
///
/// # Errors
///
/// Returns an error if the rule definition is invalid.
pub fn upgrade_legacy(nullable: &str, non_null: &str) -> Result<Rule, RuleError> {
    rule::priority(Priority::Medium)
        .no_classes()
        .that(annotated_with(NULL_MARKED))
        .should(depend_on_classes_that(have(fully_qualified_name(nullable))))
        .or_should(depend_on_classes_that(have(fully_qualified_name(non_null))))
        .allow_empty_should(true)
        .because(LEGACY_REASON)
        .build()
}

/// No field has type `java.util.Optional`.
///
/// # Errors
///
/// Returns an error if the rule definition is invalid.
pub fn no_optional_fields() -> Result<Rule, RuleError> {
    rule::priority(Priority::Medium)
        .no_fields()
        .should(have_raw_type("java.util.Optional"))
        .allow_empty_should(true)
        .because("Class fields should not be Optional, use Nullable instead")
        .build()
}

/// No method takes exactly one `java.util.Optional` parameter.
///
/// # Errors
///
/// Returns an error if the rule definition is invalid.
pub fn no_optional_parameters() -> Result<Rule, RuleError> {
    rule::priority(Priority::Low)
        .no_methods()
        .should(have_raw_parameter_types(["java.util.Optional"]))
        .allow_empty_should(true)
        .because("Method parameters should not be Optional")
        .build()
}

impl RuleSet for NullabilityRules {
    fn name(&self) -> &'static str {
        "nullability"
    }

    fn description(&self) -> &'static str {
        "JSpecify null-marking and Optional usage"
    }

    fn rules(&self) -> Result<RuleMap, RuleError> {
        let mut rules = RuleMap::from([
            (
                "public classes should be @NullMarked".to_string(),
                public_classes_null_marked()?,
            ),
            ("no Optional class fields".to_string(), no_optional_fields()?),
            (
                "no Optional method parameters".to_string(),
                no_optional_parameters()?,
            ),
        ]);
        for (name, nullable, non_null) in LEGACY_ANNOTATIONS {
            rules.insert(name.to_string(), upgrade_legacy(nullable, non_null)?);
        }
        Ok(rules)
    }
}
