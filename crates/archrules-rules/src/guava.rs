//! Rules discouraging Guava types that have standard-library replacements.
//!
//! # Detected Patterns
//!
//! - `guava optional`: dependencies on `com.google.common.base.Optional`
//! - `guava collections`: dependencies on anything in
//!   `com.google.common.collect..`
//!
//! # Good Patterns
//!
//! `java.util.Optional`, `java.util.List.of(..)`, Kotlin collections.

use archrules_core::condition::conditions::depend_on_classes_that;
use archrules_core::predicate::have;
use archrules_core::predicates::class::{fully_qualified_name, reside_in_a_package};
use archrules_core::rule::{self, Priority, Rule, RuleError};
use archrules_core::{RuleMap, RuleSet};

/// Rule name for Guava `Optional`.
pub const OPTIONAL: &str = "guava optional";

/// Rule name for Guava collections.
pub const COLLECTIONS: &str = "guava collections";

/// Guava rule set.
#[derive(Debug, Clone, Copy, Default)]
pub struct GuavaRules;

/// No class uses Guava's `Optional`.
///
/// # Errors
///
/// Returns an error if the rule definition is invalid.
pub fn optional_rule() -> Result<Rule, RuleError> {
    rule::priority(Priority::Medium)
        .no_classes()
        .should(depend_on_classes_that(have(fully_qualified_name(
            "com.google.common.base.Optional",
        ))))
        .because("Java Optional is preferred over Guava Optional")
        .build()
}

/// No class uses Guava collections.
///
/// # Errors
///
/// Returns an error if the rule definition is invalid.
pub fn collections_rule() -> Result<Rule, RuleError> {
    rule::priority(Priority::Medium)
        .no_classes()
        .should(depend_on_classes_that(reside_in_a_package(
            "com.google.common.collect..",
        )))
        .because(
            "Guava collections should not be used for compatibility reasons. \
             Prefer Java or Kotlin standard library collections instead.",
        )
        .build()
}

impl RuleSet for GuavaRules {
    fn name(&self) -> &'static str {
        "guava"
    }

    fn description(&self) -> &'static str {
        "Guava types with standard-library replacements"
    }

    fn rules(&self) -> Result<RuleMap, RuleError> {
        Ok(RuleMap::from([
            (OPTIONAL.to_string(), optional_rule()?),
            (COLLECTIONS.to_string(), collections_rule()?),
        ]))
    }
}
