//! Evaluation of registered rules against a class graph.

use rayon::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{Config, ConfigError};
use crate::model::{ClassGraph, ModelError};
use crate::registry::{RegisteredRule, RuleRegistry, RuleSet, RuleSetBox};
use crate::report::{Report, RuleOutcome};
use crate::rule::{Rule, RuleError};

/// Errors that can occur during evaluation.
#[derive(Debug, Error)]
pub enum EvaluatorError {
    /// A rule failed to build or two rules share a name.
    #[error(transparent)]
    Rule(#[from] RuleError),

    /// The model could not be loaded.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The worker pool could not be created.
    #[error("Failed to build evaluation thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Builder for configuring an [`Evaluator`].
#[derive(Default)]
pub struct EvaluatorBuilder {
    rule_sets: Vec<RuleSetBox>,
    config: Option<Config>,
    only: Vec<String>,
}

impl EvaluatorBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule set.
    #[must_use]
    pub fn rule_set<S: RuleSet + 'static>(mut self, set: S) -> Self {
        self.rule_sets.push(Box::new(set));
        self
    }

    /// Adds boxed rule sets.
    #[must_use]
    pub fn rule_sets(mut self, sets: impl IntoIterator<Item = RuleSetBox>) -> Self {
        self.rule_sets.extend(sets);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Restricts evaluation to the named rules.
    #[must_use]
    pub fn only<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only.extend(names.into_iter().map(Into::into));
        self
    }

    /// Builds every rule and the evaluator.
    ///
    /// # Errors
    ///
    /// Returns an error if a rule fails to build or a rule name is duplicated.
    pub fn build(self) -> Result<Evaluator, EvaluatorError> {
        let registry = RuleRegistry::from_sets(&self.rule_sets)?;
        debug!(
            "Registered {} rule(s) from {} rule set(s)",
            registry.len(),
            self.rule_sets.len()
        );
        Ok(Evaluator {
            registry,
            config: self.config.unwrap_or_default(),
            only: self.only,
        })
    }
}

/// Evaluates registered rules.
///
/// Use [`Evaluator::builder()`] to construct an instance.
pub struct Evaluator {
    registry: RuleRegistry,
    config: Config,
    only: Vec<String>,
}

impl Evaluator {
    /// Creates a new builder for configuring an evaluator.
    #[must_use]
    pub fn builder() -> EvaluatorBuilder {
        EvaluatorBuilder::new()
    }

    /// All registered rules.
    #[must_use]
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// The configuration in effect.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Loads the model at `path` and evaluates it.
    ///
    /// # Errors
    ///
    /// Returns an error if the model cannot be loaded or the worker pool fails.
    pub fn evaluate_path(&self, path: &Path) -> Result<Report, EvaluatorError> {
        let graph = ClassGraph::load(path)?;
        self.evaluate(&graph)
    }

    /// Evaluates the selected, enabled rules against `graph`.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker pool cannot be created.
    pub fn evaluate(&self, graph: &ClassGraph) -> Result<Report, EvaluatorError> {
        self.warn_unknown_names();
        let selected = self.selected_rules();
        info!(
            "Evaluating {} rule(s) against {} class(es)",
            selected.len(),
            graph.len()
        );

        let evaluate_one = |(registered, rule): &(&RegisteredRule, Rule)| {
            debug!("Evaluating rule: {}", registered.name);
            let result = rule.evaluate(graph);
            debug!(
                "Rule {} reported {} violation(s)",
                registered.name,
                result.violations.len()
            );
            RuleOutcome {
                rule_set: registered.rule_set,
                name: registered.name.clone(),
                result,
            }
        };

        let outcomes: Vec<RuleOutcome> = if self.config.evaluation.parallel {
            let mut pool = rayon::ThreadPoolBuilder::new();
            if let Some(threads) = self.config.evaluation.threads {
                pool = pool.num_threads(threads);
            }
            pool.build()?
                .install(|| selected.par_iter().map(evaluate_one).collect())
        } else {
            selected.iter().map(evaluate_one).collect()
        };

        let report = Report {
            outcomes,
            classes_checked: graph.len(),
        };
        info!(
            "Evaluation complete: {} violation(s) across {} rule(s)",
            report.violation_count(),
            report.outcomes.len()
        );
        Ok(report)
    }

    fn selected_rules(&self) -> Vec<(&RegisteredRule, Rule)> {
        self.registry
            .rules()
            .iter()
            .filter(|r| self.only.is_empty() || self.only.contains(&r.name))
            .filter(|r| {
                let enabled = self.config.is_rule_enabled(&r.name);
                if !enabled {
                    debug!("Skipping disabled rule: {}", r.name);
                }
                enabled
            })
            .map(|r| {
                let rule = match self.config.rule_priority(&r.name) {
                    Some(priority) => r.rule.clone().with_priority(priority),
                    None => r.rule.clone(),
                };
                (r, rule)
            })
            .collect()
    }

    fn warn_unknown_names(&self) {
        for name in self.config.rules.keys() {
            if self.registry.get(name).is_none() {
                warn!("Unknown rule in configuration: {}", name);
            }
        }
        for name in &self.only {
            if self.registry.get(name).is_none() {
                warn!("Unknown rule requested: {}", name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::conditions::depend_on_classes_that;
    use crate::config::RuleConfig;
    use crate::model::{ClassDto, FieldDto, ModelDocument};
    use crate::predicates::class::reside_in_a_package;
    use crate::registry::RuleMap;
    use crate::rule::{self, Priority};

    struct Layers;

    impl RuleSet for Layers {
        fn name(&self) -> &'static str {
            "layers"
        }

        fn rules(&self) -> Result<RuleMap, RuleError> {
            let to = |package: &str, priority: Priority| {
                rule::priority(priority)
                    .no_classes()
                    .that(reside_in_a_package("app.domain.."))
                    .should(depend_on_classes_that(reside_in_a_package(package)))
                    .build()
            };
            Ok(RuleMap::from([
                ("domain to web".to_string(), to("app.web..", Priority::High)?),
                ("domain to db".to_string(), to("app.db..", Priority::Low)?),
            ]))
        }
    }

    fn graph() -> ClassGraph {
        ClassGraph::from_document(
            ModelDocument::new().with_class(
                ClassDto::new("app.domain.Order")
                    .with_field(FieldDto::new("view", "app.web.OrderView"))
                    .with_field(FieldDto::new("row", "app.db.OrderRow")),
            ),
        )
        .unwrap()
    }

    fn evaluate(config: Config, only: &[&str]) -> Report {
        Evaluator::builder()
            .rule_set(Layers)
            .config(config)
            .only(only.iter().copied())
            .build()
            .unwrap()
            .evaluate(&graph())
            .unwrap()
    }

    #[test]
    fn evaluates_all_rules_sorted_by_name() {
        let report = evaluate(Config::default(), &[]);
        let names: Vec<&str> = report.outcomes.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["domain to db", "domain to web"]);
        assert!(report.outcomes.iter().all(RuleOutcome::has_violation));
        assert!(report.has_violations_at(Priority::High));
        assert_eq!(report.classes_checked, 1);
    }

    #[test]
    fn sequential_and_parallel_agree() {
        let mut sequential = Config::default();
        sequential.evaluation.parallel = false;
        let mut parallel = Config::default();
        parallel.evaluation.threads = Some(2);
        let a = evaluate(sequential, &[]);
        let b = evaluate(parallel, &[]);
        let messages = |r: &Report| -> Vec<String> {
            r.outcomes
                .iter()
                .flat_map(|o| o.result.messages().into_iter().map(str::to_string))
                .collect()
        };
        assert_eq!(messages(&a), messages(&b));
    }

    #[test]
    fn config_disables_and_overrides_priorities() {
        let mut config = Config::default();
        config.rules.insert(
            "domain to web".to_string(),
            RuleConfig {
                enabled: Some(false),
                priority: None,
            },
        );
        config.rules.insert(
            "domain to db".to_string(),
            RuleConfig {
                enabled: None,
                priority: Some(Priority::High),
            },
        );
        config.rules.insert("not a rule".to_string(), RuleConfig::default());
        let report = evaluate(config, &[]);
        assert_eq!(report.outcomes.len(), 1);
        assert_eq!(report.outcomes[0].name, "domain to db");
        assert_eq!(report.outcomes[0].result.priority, Priority::High);
    }

    #[test]
    fn only_filters_rules() {
        let report = evaluate(Config::default(), &["domain to web"]);
        assert_eq!(report.outcomes.len(), 1);
        assert_eq!(report.outcomes[0].name, "domain to web");
    }

    #[test]
    fn duplicate_rule_names_fail_to_build() {
        let err = Evaluator::builder()
            .rule_set(Layers)
            .rule_set(Layers)
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, EvaluatorError::Rule(RuleError::DuplicateName { .. })));
    }

    #[test]
    fn evaluate_path_reports_missing_model() {
        let dir = tempfile::tempdir().unwrap();
        let evaluator = Evaluator::builder().rule_set(Layers).build().unwrap();
        let err = evaluator
            .evaluate_path(&dir.path().join("absent.json"))
            .unwrap_err();
        assert!(matches!(err, EvaluatorError::Model(_)));
    }
}
