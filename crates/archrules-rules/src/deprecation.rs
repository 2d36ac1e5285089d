//! Rules against references to deprecated APIs.
//!
//! # Rationale
//!
//! Code that depends on deprecated classes or members blocks upgrades: the
//! next major version of a library is free to remove them.
//!
//! # Detected Patterns
//!
//! - Dependencies on classes annotated `@java.lang.Deprecated`,
//!   `@kotlin.Deprecated` or `@kotlin.DeprecatedSinceKotlin`
//! - Accesses whose target owner or target member carries one of those
//! - `deprecatedForRemoval`: the same, restricted to
//!   `@Deprecated(forRemoval = true)`
//!
//! The broad `deprecated` rule is noisy and therefore `LOW`; the removal rule
//! is `MEDIUM`.

use archrules_core::condition::conditions::{access_target_where, depend_on_classes_that};
use archrules_core::deprecation;
use archrules_core::model::{AccessTarget, JavaClass};
use archrules_core::predicates::access::{target, target_owner};
use archrules_core::rule::{self, Priority, Rule, RuleError};
use archrules_core::{DescribedPredicate, RuleMap, RuleSet};

/// Rule name for deprecated API usage.
pub const DEPRECATED: &str = "deprecated";

/// Rule name for usage of APIs scheduled for removal.
pub const DEPRECATED_FOR_REMOVAL: &str = "deprecatedForRemoval";

/// Deprecation rule set.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeprecationRules;

impl DeprecationRules {
    /// Creates the rule set.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn no_references(
    priority: Priority,
    classes: DescribedPredicate<JavaClass>,
    targets: DescribedPredicate<AccessTarget>,
) -> rule::RuleBuilder<JavaClass> {
    rule::priority(priority)
        .no_classes()
        .should(depend_on_classes_that(classes.clone()))
        .or_should(access_target_where(target_owner(classes)))
        .or_should(access_target_where(target(targets)))
        .allow_empty_should(true)
}

/// No class depends on or accesses anything deprecated.
///
/// # Errors
///
/// Returns an error if the rule definition is invalid.
pub fn deprecated_rule() -> Result<Rule, RuleError> {
    no_references(
        Priority::Low,
        deprecation::deprecated(),
        deprecation::deprecated(),
    )
    .described_as("No code should reference deprecated APIs (Java or Kotlin)")
    .because(
        "usage of deprecated APIs introduces risk that future upgrades and migrations will be blocked",
    )
    .build()
}

/// No class depends on or accesses anything deprecated for removal.
///
/// # Errors
///
/// Returns an error if the rule definition is invalid.
pub fn deprecated_for_removal_rule() -> Result<Rule, RuleError> {
    no_references(
        Priority::Medium,
        deprecation::deprecated_for_removal(),
        deprecation::deprecated_for_removal(),
    )
    .described_as("No code should reference APIs marked with @Deprecated(forRemoval=true)")
    .because("these APIs are scheduled for removal and usage will block future upgrades")
    .build()
}

impl RuleSet for DeprecationRules {
    fn name(&self) -> &'static str {
        "deprecation"
    }

    fn description(&self) -> &'static str {
        "References to deprecated Java and Kotlin APIs"
    }

    fn rules(&self) -> Result<RuleMap, RuleError> {
        Ok(RuleMap::from([
            (DEPRECATED.to_string(), deprecated_rule()?),
            (DEPRECATED_FOR_REMOVAL.to_string(), deprecated_for_removal_rule()?),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archrules_core::model::{
        AccessDto, AnnotationDto, ClassDto, ClassGraph, FieldDto, MethodDto, ModelDocument,
    };

    fn deprecated_annotation() -> AnnotationDto {
        AnnotationDto::new("java.lang.Deprecated")
    }

    fn graph() -> ClassGraph {
        ClassGraph::from_document(
            ModelDocument::new()
                .with_class(
                    ClassDto::new("app.Service")
                        .with_field(FieldDto::new("legacy", "lib.Legacy"))
                        .with_method(
                            MethodDto::new("run")
                                .with_access(AccessDto::call("lib.Api", "old").at_line(7)),
                        ),
                )
                .with_class(ClassDto::new("app.Clean").with_method(
                    MethodDto::new("run").with_access(AccessDto::call("lib.Api", "current")),
                ))
                .with_class(
                    ClassDto::new("app.Doomed").with_method(
                        MethodDto::new("run")
                            .with_access(AccessDto::call("lib.Api", "removed").at_line(3)),
                    ),
                )
                .with_class(ClassDto::new("lib.Legacy").with_annotation(deprecated_annotation()))
                .with_class(
                    ClassDto::new("lib.Api")
                        .with_method(MethodDto::new("old").with_annotation(
                            AnnotationDto::new("kotlin.Deprecated").with_value("message", "use current"),
                        ))
                        .with_method(MethodDto::new("current"))
                        .with_method(MethodDto::new("removed").with_annotation(
                            deprecated_annotation().with_value("forRemoval", true),
                        )),
                ),
        )
        .unwrap()
    }

    fn violating_classes(rule: &Rule) -> Vec<String> {
        rule.evaluate(&graph())
            .violations
            .iter()
            .map(|v| v.subject().name.clone())
            .collect()
    }

    #[test]
    fn deprecated_flags_classes_fields_and_members() {
        let rule = deprecated_rule().unwrap();
        assert_eq!(violating_classes(&rule), ["app.Service", "app.Doomed"]);

        let result = rule.evaluate(&graph());
        let service = result
            .violations
            .iter()
            .find(|v| v.subject().name == "app.Service")
            .unwrap();
        assert!(service
            .messages()
            .contains(&"Field <app.Service.legacy> has type <lib.Legacy> in (Service.java:0)".to_string()));
        assert!(service
            .messages()
            .contains(&"Method <app.Service.run()> calls method <lib.Api.old()> in (Service.java:7)".to_string()));
    }

    #[test]
    fn removal_rule_only_flags_for_removal() {
        let rule = deprecated_for_removal_rule().unwrap();
        assert_eq!(violating_classes(&rule), ["app.Doomed"]);
        assert_eq!(rule.priority(), Priority::Medium);
    }

    #[test]
    fn rule_texts() {
        let rules = DeprecationRules::new().rules().unwrap();
        insta::assert_snapshot!(rules[DEPRECATED].description(), @"No code should reference deprecated APIs (Java or Kotlin), because usage of deprecated APIs introduces risk that future upgrades and migrations will be blocked");
        assert!(rules[DEPRECATED].allows_empty());
    }
}
