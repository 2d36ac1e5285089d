//! Rule against the `javax` namespace, superseded by Jakarta.
//!
//! # Detected Patterns
//!
//! Any dependency on a class in `javax..`.

use archrules_core::condition::conditions::depend_on_classes_that;
use archrules_core::predicates::class::reside_in_a_package;
use archrules_core::rule::{self, Priority, Rule, RuleError};
use archrules_core::{RuleMap, RuleSet};

/// Rule name.
pub const NAME: &str = "javaxRule";

/// Javax rule set.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaxRules;

/// No class depends on `javax..`.
///
/// # Errors
///
/// Returns an error if the rule definition is invalid.
pub fn javax_rule() -> Result<Rule, RuleError> {
    rule::priority(Priority::Medium)
        .no_classes()
        .should(depend_on_classes_that(reside_in_a_package("javax..")))
        .allow_empty_should(true)
        .described_as("No code should use Javax library")
        .because("usage of Javax is deprecated. Please migrate to Jakarta.")
        .build()
}

impl RuleSet for JavaxRules {
    fn name(&self) -> &'static str {
        "javax"
    }

    fn description(&self) -> &'static str {
        "Javax usage that should migrate to Jakarta"
    }

    fn rules(&self) -> Result<RuleMap, RuleError> {
        Ok(RuleMap::from([(NAME.to_string(), javax_rule()?)]))
    }
}
