//! Fluent rule definition.

use std::sync::Arc;

use super::{BodyOutcome, Priority, Rule, RuleBody, RuleError};
use crate::condition::{never, ArchCondition};
use crate::model::{ClassGraph, Entity, JavaClass, JavaField, JavaMethod};
use crate::predicate::DescribedPredicate;

/// What a rule selects from the graph.
struct Selector<T> {
    plural: &'static str,
    collect: fn(&ClassGraph) -> Vec<T>,
}

impl<T> Clone for Selector<T> {
    fn clone(&self) -> Self {
        Self {
            plural: self.plural,
            collect: self.collect,
        }
    }
}

fn all_classes(graph: &ClassGraph) -> Vec<JavaClass> {
    graph.classes()
}

fn all_methods(graph: &ClassGraph) -> Vec<JavaMethod> {
    graph.classes().iter().flat_map(JavaClass::methods).collect()
}

fn all_constructors(graph: &ClassGraph) -> Vec<JavaMethod> {
    graph
        .classes()
        .iter()
        .flat_map(JavaClass::constructors)
        .collect()
}

fn all_fields(graph: &ClassGraph) -> Vec<JavaField> {
    graph.classes().iter().flat_map(JavaClass::fields).collect()
}

/// Starts a rule at `priority`.
#[must_use]
pub fn priority(priority: Priority) -> PriorityBuilder {
    PriorityBuilder { priority }
}

/// Chooses what a rule selects.
#[derive(Debug, Clone, Copy)]
pub struct PriorityBuilder {
    priority: Priority,
}

impl PriorityBuilder {
    fn select<T>(
        self,
        negated: bool,
        plural: &'static str,
        collect: fn(&ClassGraph) -> Vec<T>,
    ) -> GivenBuilder<T> {
        GivenBuilder {
            priority: self.priority,
            negated,
            selector: Selector { plural, collect },
            predicate: None,
        }
    }

    /// Declared classes that should satisfy the condition.
    #[must_use]
    pub fn classes(self) -> GivenBuilder<JavaClass> {
        self.select(false, "classes", all_classes)
    }

    /// Declared classes that should never satisfy the condition.
    #[must_use]
    pub fn no_classes(self) -> GivenBuilder<JavaClass> {
        self.select(true, "classes", all_classes)
    }

    /// Declared methods that should satisfy the condition.
    #[must_use]
    pub fn methods(self) -> GivenBuilder<JavaMethod> {
        self.select(false, "methods", all_methods)
    }

    /// Declared methods that should never satisfy the condition.
    #[must_use]
    pub fn no_methods(self) -> GivenBuilder<JavaMethod> {
        self.select(true, "methods", all_methods)
    }

    /// Declared constructors that should satisfy the condition.
    #[must_use]
    pub fn constructors(self) -> GivenBuilder<JavaMethod> {
        self.select(false, "constructors", all_constructors)
    }

    /// Declared constructors that should never satisfy the condition.
    #[must_use]
    pub fn no_constructors(self) -> GivenBuilder<JavaMethod> {
        self.select(true, "constructors", all_constructors)
    }

    /// Declared fields that should satisfy the condition.
    #[must_use]
    pub fn fields(self) -> GivenBuilder<JavaField> {
        self.select(false, "fields", all_fields)
    }

    /// Declared fields that should never satisfy the condition.
    #[must_use]
    pub fn no_fields(self) -> GivenBuilder<JavaField> {
        self.select(true, "fields", all_fields)
    }
}

/// `classes()` at the default priority.
#[must_use]
pub fn classes() -> GivenBuilder<JavaClass> {
    priority(Priority::default()).classes()
}

/// `no_classes()` at the default priority.
#[must_use]
pub fn no_classes() -> GivenBuilder<JavaClass> {
    priority(Priority::default()).no_classes()
}

/// `methods()` at the default priority.
#[must_use]
pub fn methods() -> GivenBuilder<JavaMethod> {
    priority(Priority::default()).methods()
}

/// `no_methods()` at the default priority.
#[must_use]
pub fn no_methods() -> GivenBuilder<JavaMethod> {
    priority(Priority::default()).no_methods()
}

/// `constructors()` at the default priority.
#[must_use]
pub fn constructors() -> GivenBuilder<JavaMethod> {
    priority(Priority::default()).constructors()
}

/// `no_constructors()` at the default priority.
#[must_use]
pub fn no_constructors() -> GivenBuilder<JavaMethod> {
    priority(Priority::default()).no_constructors()
}

/// `fields()` at the default priority.
#[must_use]
pub fn fields() -> GivenBuilder<JavaField> {
    priority(Priority::default()).fields()
}

/// `no_fields()` at the default priority.
#[must_use]
pub fn no_fields() -> GivenBuilder<JavaField> {
    priority(Priority::default()).no_fields()
}

/// Selection stage: narrows the selected entities.
pub struct GivenBuilder<T> {
    priority: Priority,
    negated: bool,
    selector: Selector<T>,
    predicate: Option<DescribedPredicate<T>>,
}

impl<T> GivenBuilder<T>
where
    T: Entity + Clone + Send + Sync + 'static,
{
    /// Keeps only entities matching `predicate`; repeated calls are joined with `and`.
    #[must_use]
    pub fn that(mut self, predicate: DescribedPredicate<T>) -> Self {
        self.predicate = Some(match self.predicate.take() {
            Some(existing) => existing.and(predicate),
            None => predicate,
        });
        self
    }

    /// Sets the condition.
    #[must_use]
    pub fn should(self, condition: impl Into<ArchCondition<T>>) -> RuleBuilder<T> {
        let condition = condition.into();
        RuleBuilder {
            should_text: condition.description().to_string(),
            given: self,
            condition,
            allow_empty: false,
            description: None,
            because: None,
        }
    }

    fn selection_text(&self) -> String {
        let mut text = String::new();
        if self.negated {
            text.push_str("no ");
        }
        text.push_str(self.selector.plural);
        if let Some(predicate) = &self.predicate {
            text.push_str(" that ");
            text.push_str(predicate.description());
        }
        text
    }
}

/// Condition stage: combines conditions and finishes the rule.
pub struct RuleBuilder<T> {
    given: GivenBuilder<T>,
    condition: ArchCondition<T>,
    should_text: String,
    allow_empty: bool,
    description: Option<String>,
    because: Option<String>,
}

impl<T> RuleBuilder<T>
where
    T: Entity + Clone + Send + Sync + 'static,
{
    /// The rule holds when this or the next condition holds.
    #[must_use]
    pub fn or_should(mut self, condition: impl Into<ArchCondition<T>>) -> Self {
        let condition = condition.into();
        self.should_text.push_str(" or should ");
        self.should_text.push_str(condition.description());
        self.condition = self.condition.or(condition);
        self
    }

    /// The rule holds when this and the next condition hold.
    #[must_use]
    pub fn and_should(mut self, condition: impl Into<ArchCondition<T>>) -> Self {
        let condition = condition.into();
        self.should_text.push_str(" and should ");
        self.should_text.push_str(condition.description());
        self.condition = self.condition.and(condition);
        self
    }

    /// Allows the selection to match nothing.
    #[must_use]
    pub fn allow_empty_should(mut self, allow: bool) -> Self {
        self.allow_empty = allow;
        self
    }

    /// Replaces the generated rule text.
    #[must_use]
    pub fn described_as(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends `, because <reason>` to the rule text.
    #[must_use]
    pub fn because(mut self, reason: impl Into<String>) -> Self {
        self.because = Some(reason.into());
        self
    }

    /// Finishes the rule.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::EmptySelection`] when the selection predicate can
    /// never match and empty matches are not allowed.
    pub fn build(self) -> Result<Rule, RuleError> {
        let mut description = self.description.unwrap_or_else(|| {
            format!("{} should {}", self.given.selection_text(), self.should_text)
        });
        if let Some(reason) = &self.because {
            description.push_str(", because ");
            description.push_str(reason);
        }

        let statically_empty = self
            .given
            .predicate
            .as_ref()
            .is_some_and(DescribedPredicate::is_always_false);
        if statically_empty && !self.allow_empty {
            return Err(RuleError::EmptySelection {
                rule: description,
                plural: self.given.selector.plural,
            });
        }

        let condition = if self.given.negated {
            never(self.condition)
        } else {
            self.condition
        };
        Ok(Rule {
            description,
            priority: self.given.priority,
            allow_empty: self.allow_empty,
            body: Arc::new(Body {
                selector: self.given.selector,
                predicate: self.given.predicate,
                condition,
            }),
        })
    }
}

struct Body<T> {
    selector: Selector<T>,
    predicate: Option<DescribedPredicate<T>>,
    condition: ArchCondition<T>,
}

impl<T> RuleBody for Body<T>
where
    T: Entity + Clone + Send + Sync + 'static,
{
    fn plural(&self) -> &'static str {
        self.selector.plural
    }

    fn check(&self, graph: &ClassGraph) -> BodyOutcome {
        let mut items = (self.selector.collect)(graph);
        if let Some(predicate) = &self.predicate {
            items.retain(|item| predicate.test(item));
        }
        BodyOutcome {
            checked: items.len(),
            events: self.condition.evaluate(&items),
        }
    }
}
