//! Rule against the Joda-Time library, superseded by `java.time`.
//!
//! # Detected Patterns
//!
//! Any dependency on a class in `org.joda.time..`.

use archrules_core::condition::conditions::depend_on_classes_that;
use archrules_core::predicates::class::reside_in_a_package;
use archrules_core::rule::{self, Priority, Rule, RuleError};
use archrules_core::{RuleMap, RuleSet};

/// Rule name.
pub const NAME: &str = "jodaRule";

/// Joda rule set.
#[derive(Debug, Clone, Copy, Default)]
pub struct JodaRules;

/// No class depends on `org.joda.time..`.
///
/// # Errors
///
/// Returns an error if the rule definition is invalid.
pub fn joda_rule() -> Result<Rule, RuleError> {
    rule::priority(Priority::Medium)
        .no_classes()
        .should(depend_on_classes_that(reside_in_a_package("org.joda.time..")))
        .allow_empty_should(true)
        .described_as("No code should use Joda time library")
        .because("usage of Joda is deprecated. Please migrate to java.time.")
        .build()
}

impl RuleSet for JodaRules {
    fn name(&self) -> &'static str {
        "joda"
    }

    fn description(&self) -> &'static str {
        "Joda-Time usage that should migrate to java.time"
    }

    fn rules(&self) -> Result<RuleMap, RuleError> {
        Ok(RuleMap::from([(NAME.to_string(), joda_rule()?)]))
    }
}
