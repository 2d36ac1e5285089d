//! Rule sets and the registry that merges them.

use std::collections::BTreeMap;

use crate::rule::{Rule, RuleError};

/// Rules of one set, keyed by their unique name.
pub type RuleMap = BTreeMap<String, Rule>;

/// A named group of rules.
///
/// # Example
///
/// ```
/// use archrules_core::condition::conditions::depend_on_classes_that;
/// use archrules_core::predicates::class::reside_in_a_package;
/// use archrules_core::registry::{RuleMap, RuleSet};
/// use archrules_core::rule::{self, Priority, RuleError};
///
/// struct NoLegacy;
///
/// impl RuleSet for NoLegacy {
///     fn name(&self) -> &'static str { "legacy" }
///
///     fn rules(&self) -> Result<RuleMap, RuleError> {
///         let rule = rule::priority(Priority::Low)
///             .no_classes()
///             .should(depend_on_classes_that(reside_in_a_package("com.acme.legacy..")))
///             .allow_empty_should(true)
///             .build()?;
///         Ok(RuleMap::from([("no legacy".to_string(), rule)]))
///     }
/// }
/// ```
pub trait RuleSet: Send + Sync {
    /// Set name, e.g. `deprecation`.
    fn name(&self) -> &'static str;

    /// What the set enforces.
    fn description(&self) -> &'static str {
        ""
    }

    /// Builds the rules of this set.
    ///
    /// # Errors
    ///
    /// Returns an error if a rule definition is invalid.
    fn rules(&self) -> Result<RuleMap, RuleError>;
}

/// Boxed rule set.
pub type RuleSetBox = Box<dyn RuleSet>;

/// A rule together with its name and the set that registered it.
#[derive(Debug, Clone)]
pub struct RegisteredRule {
    /// Registering set.
    pub rule_set: &'static str,
    /// Unique rule name.
    pub name: String,
    /// The rule.
    pub rule: Rule,
}

/// All rules of several sets, sorted by name.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: Vec<RegisteredRule>,
}

impl RuleRegistry {
    /// Merges the rules of `sets`.
    ///
    /// # Errors
    ///
    /// Returns an error if a rule fails to build or a name is registered twice.
    pub fn from_sets(sets: &[RuleSetBox]) -> Result<Self, RuleError> {
        let mut merged: BTreeMap<String, RegisteredRule> = BTreeMap::new();
        for set in sets {
            for (name, rule) in set.rules()? {
                if let Some(existing) = merged.get(&name) {
                    return Err(RuleError::DuplicateName {
                        name,
                        first: existing.rule_set.to_string(),
                        second: set.name().to_string(),
                    });
                }
                merged.insert(
                    name.clone(),
                    RegisteredRule {
                        rule_set: set.name(),
                        name,
                        rule,
                    },
                );
            }
        }
        Ok(Self {
            rules: merged.into_values().collect(),
        })
    }

    /// Registered rules, sorted by name.
    #[must_use]
    pub fn rules(&self) -> &[RegisteredRule] {
        &self.rules
    }

    /// Looks up a rule by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RegisteredRule> {
        self.rules
            .binary_search_by(|r| r.name.as_str().cmp(name))
            .ok()
            .map(|i| &self.rules[i])
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no rule is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::ArchCondition;
    use crate::model::JavaClass;
    use crate::rule::{self, Priority};

    struct Fixed {
        name: &'static str,
        rules: &'static [&'static str],
    }

    impl RuleSet for Fixed {
        fn name(&self) -> &'static str {
            self.name
        }

        fn rules(&self) -> Result<RuleMap, RuleError> {
            let mut map = RuleMap::new();
            for name in self.rules {
                let rule = rule::priority(Priority::Low)
                    .classes()
                    .should(ArchCondition::<JavaClass>::new(*name, |_| Vec::new()))
                    .build()?;
                map.insert((*name).to_string(), rule);
            }
            Ok(map)
        }
    }

    #[test]
    fn merges_and_sorts_by_name() {
        let sets: Vec<RuleSetBox> = vec![
            Box::new(Fixed { name: "b", rules: &["zeta", "alpha"] }),
            Box::new(Fixed { name: "a", rules: &["mid"] }),
        ];
        let registry = RuleRegistry::from_sets(&sets).unwrap();
        let names: Vec<&str> = registry.rules().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["alpha", "mid", "zeta"]);
        assert_eq!(registry.get("mid").unwrap().rule_set, "a");
        assert!(registry.get("missing").is_none());
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let sets: Vec<RuleSetBox> = vec![
            Box::new(Fixed { name: "first", rules: &["same"] }),
            Box::new(Fixed { name: "second", rules: &["same"] }),
        ];
        let err = RuleRegistry::from_sets(&sets).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Duplicate rule name 'same' in rule sets 'first' and 'second'"
        );
    }
}
