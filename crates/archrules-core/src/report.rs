//! Evaluation reports.

use serde::Serialize;

use crate::rule::{EvaluationResult, Priority};

/// Outcome of one registered rule.
#[derive(Debug, Clone, Serialize)]
pub struct RuleOutcome {
    /// Set that registered the rule.
    pub rule_set: &'static str,
    /// Rule name.
    pub name: String,
    /// Evaluation result.
    #[serde(flatten)]
    pub result: EvaluationResult,
}

impl RuleOutcome {
    /// Returns `true` if the rule reported violations.
    #[must_use]
    pub fn has_violation(&self) -> bool {
        self.result.has_violation()
    }
}

/// Result of evaluating all selected rules.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    /// One outcome per evaluated rule, sorted by rule name.
    pub outcomes: Vec<RuleOutcome>,
    /// Number of declared classes in the graph.
    pub classes_checked: usize,
}

impl Report {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if any rule at or above `priority` reported violations.
    #[must_use]
    pub fn has_violations_at(&self, priority: Priority) -> bool {
        self.failing(priority).next().is_some()
    }

    /// Violated rules at or above `priority`.
    pub fn failing(&self, priority: Priority) -> impl Iterator<Item = &RuleOutcome> {
        self.outcomes
            .iter()
            .filter(move |o| o.has_violation() && o.result.priority >= priority)
    }

    /// Total number of violations.
    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.outcomes.iter().map(|o| o.result.violations.len()).sum()
    }

    /// Counts violations by priority as `(high, medium, low)`.
    #[must_use]
    pub fn count_by_priority(&self) -> (usize, usize, usize) {
        let count = |p: Priority| {
            self.outcomes
                .iter()
                .filter(|o| o.result.priority == p)
                .map(|o| o.result.violations.len())
                .sum::<usize>()
        };
        (
            count(Priority::High),
            count(Priority::Medium),
            count(Priority::Low),
        )
    }

    /// Formats the violated rules at or above `fail_on` as a failure report.
    #[must_use]
    pub fn format_failure_report(&self, fail_on: Priority) -> String {
        use std::fmt::Write;

        let failing: Vec<&RuleOutcome> = self.failing(fail_on).collect();
        let mut report = String::new();
        let _ = writeln!(
            report,
            "\n=== archrules: {} rule(s) violated ===\n",
            failing.len()
        );
        for outcome in &failing {
            let _ = writeln!(report, "{} ({})", outcome.name, outcome.rule_set);
            let _ = writeln!(report, "{}", outcome.result.failure_report());
        }

        let (high, medium, low) = self.count_by_priority();
        let _ = writeln!(
            report,
            "Total: {high} high, {medium} medium, {low} low violation(s) in {} class(es)",
            self.classes_checked
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::ViolationEvent;
    use crate::model::{EntityKind, Subject};

    fn outcome(name: &str, priority: Priority, messages: &[&str]) -> RuleOutcome {
        RuleOutcome {
            rule_set: "test",
            name: name.to_string(),
            result: EvaluationResult {
                description: format!("{name} rule"),
                priority,
                violations: messages
                    .iter()
                    .map(|m| ViolationEvent::violated(Subject::new(EntityKind::Class, "p.A"), *m))
                    .collect(),
            },
        }
    }

    fn report() -> Report {
        Report {
            outcomes: vec![
                outcome("clean", Priority::High, &[]),
                outcome("noisy", Priority::Low, &["Class <p.A> is noisy"]),
                outcome("risky", Priority::Medium, &["Class <p.A> is risky"]),
            ],
            classes_checked: 3,
        }
    }

    #[test]
    fn thresholds_follow_priority_order() {
        let r = report();
        assert!(r.has_violations_at(Priority::Low));
        assert!(r.has_violations_at(Priority::Medium));
        assert!(!r.has_violations_at(Priority::High));
        assert_eq!(r.count_by_priority(), (0, 1, 1));
        assert_eq!(r.violation_count(), 2);
    }

    #[test]
    fn failure_report_filters_by_threshold() {
        let text = report().format_failure_report(Priority::Medium);
        assert!(text.contains("1 rule(s) violated"));
        assert!(text.contains("risky (test)"));
        assert!(text.contains("Class <p.A> is risky"));
        assert!(!text.contains("noisy (test)"));
        assert!(text.contains("Total: 0 high, 1 medium, 1 low violation(s) in 3 class(es)"));
    }

    #[test]
    fn serializes_flattened_outcomes() {
        let json = serde_json::to_value(report()).unwrap();
        let risky = &json["outcomes"][2];
        assert_eq!(risky["name"], "risky");
        assert_eq!(risky["priority"], "medium");
        assert_eq!(risky["violations"][0]["messages"][0], "Class <p.A> is risky");
    }
}
