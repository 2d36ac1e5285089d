//! Rules: a selection of entities bound to a condition, with a priority and rationale.
//!
//! Rules are built fluently:
//!
//! ```
//! use archrules_core::condition::conditions::depend_on_classes_that;
//! use archrules_core::predicates::class::reside_in_a_package;
//! use archrules_core::rule::{self, Priority};
//!
//! let rule = rule::priority(Priority::Medium)
//!     .no_classes()
//!     .should(depend_on_classes_that(reside_in_a_package("org.joda.time..")))
//!     .allow_empty_should(true)
//!     .because("usage of Joda is deprecated. Please migrate to java.time.")
//!     .build()?;
//! assert_eq!(
//!     rule.description(),
//!     "no classes should depend on classes that reside in a package 'org.joda.time..', \
//!      because usage of Joda is deprecated. Please migrate to java.time."
//! );
//! # Ok::<(), archrules_core::rule::RuleError>(())
//! ```

mod definition;

pub use definition::{
    classes, constructors, fields, methods, no_classes, no_constructors, no_fields, no_methods,
    priority, GivenBuilder, PriorityBuilder, RuleBuilder,
};

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::condition::ViolationEvent;
use crate::model::{ClassGraph, EntityKind, Subject};

/// Rule priority, ordered `Low < Medium < High`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Noisy or advisory rules.
    #[serde(alias = "LOW")]
    Low,
    /// The default.
    #[default]
    #[serde(alias = "MEDIUM")]
    Medium,
    /// Security and correctness problems.
    #[serde(alias = "HIGH")]
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// Errors raised while defining or registering rules.
#[derive(Debug, Error, Diagnostic)]
pub enum RuleError {
    /// The selection can never match and empty matches are not allowed.
    #[error("Rule '{rule}' can never select any {plural}")]
    #[diagnostic(
        code(archrules::rule::empty_selection),
        help("use allow_empty_should(true) if the rule may legitimately check nothing")
    )]
    EmptySelection {
        /// Rule description.
        rule: String,
        /// What the rule selects, e.g. `classes`.
        plural: &'static str,
    },

    /// Two rules share a name.
    #[error("Duplicate rule name '{name}' in rule sets '{first}' and '{second}'")]
    #[diagnostic(
        code(archrules::rule::duplicate_name),
        help("rule names must be unique across all registered rule sets")
    )]
    DuplicateName {
        /// The shared name.
        name: String,
        /// Set that registered the name first.
        first: String,
        /// Set that registered it again.
        second: String,
    },
}

/// What a rule body produced for one graph.
pub(crate) struct BodyOutcome {
    pub(crate) checked: usize,
    pub(crate) events: Vec<ViolationEvent>,
}

/// Type-erased selection and condition of a rule.
pub(crate) trait RuleBody: Send + Sync {
    fn plural(&self) -> &'static str;

    fn check(&self, graph: &ClassGraph) -> BodyOutcome;
}

/// A built rule.
#[derive(Clone)]
pub struct Rule {
    description: String,
    priority: Priority,
    allow_empty: bool,
    body: Arc<dyn RuleBody>,
}

impl Rule {
    /// Full rule text, including the `because` clause.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Priority.
    #[must_use]
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Whether checking nothing is acceptable.
    #[must_use]
    pub fn allows_empty(&self) -> bool {
        self.allow_empty
    }

    /// The same rule at another priority.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Evaluates the rule against `graph`.
    ///
    /// Violations keep the order of the selected entities. When nothing was
    /// selected and empty matches are not allowed, the result holds a single
    /// violation naming the rule.
    #[must_use]
    pub fn evaluate(&self, graph: &ClassGraph) -> EvaluationResult {
        let outcome = self.body.check(graph);
        let violations = if outcome.checked == 0 && !self.allow_empty {
            vec![ViolationEvent::violated(
                Subject::new(EntityKind::Rule, self.description.clone()),
                format!(
                    "Rule '{}' failed to check any {}",
                    self.description,
                    self.body.plural()
                ),
            )]
        } else {
            outcome
                .events
                .into_iter()
                .filter(ViolationEvent::is_violation)
                .collect()
        };
        EvaluationResult {
            description: self.description.clone(),
            priority: self.priority,
            violations,
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("description", &self.description)
            .field("priority", &self.priority)
            .field("allow_empty", &self.allow_empty)
            .finish_non_exhaustive()
    }
}

/// Result of evaluating one rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    /// Rule text.
    pub description: String,
    /// Rule priority.
    pub priority: Priority,
    /// Violated events, in evaluation order.
    pub violations: Vec<ViolationEvent>,
}

impl EvaluationResult {
    /// Returns `true` if any violation was reported.
    #[must_use]
    pub fn has_violation(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Rule priority.
    #[must_use]
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Every violation message, in order.
    #[must_use]
    pub fn messages(&self) -> Vec<&str> {
        self.violations
            .iter()
            .flat_map(ViolationEvent::messages)
            .map(String::as_str)
            .collect()
    }

    /// Multi-line report, empty when nothing was violated.
    #[must_use]
    pub fn failure_report(&self) -> String {
        use std::fmt::Write;

        if !self.has_violation() {
            return String::new();
        }
        let messages = self.messages();
        let mut report = String::new();
        let _ = writeln!(
            report,
            "Architecture Violation [Priority: {}] - Rule '{}' was violated ({} times):",
            self.priority,
            self.description,
            messages.len()
        );
        for message in messages {
            let _ = writeln!(report, "{message}");
        }
        report
    }
}
