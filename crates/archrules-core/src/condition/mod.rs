//! Conditions: checks that turn entities into violation events.

mod any_match;
pub mod conditions;
mod event;

pub use any_match::{AnyDependencyCondition, AnyMatchCondition};
pub use event::ViolationEvent;

use std::fmt;
use std::sync::Arc;

use crate::model::Entity;
use crate::predicate::DescribedPredicate;

type CheckFn<T> = dyn Fn(&T) -> Vec<ViolationEvent> + Send + Sync;

/// A described check producing events for one item at a time.
///
/// A check may return no events for an item; that item counts as satisfied.
pub struct ArchCondition<T> {
    description: String,
    check: Arc<CheckFn<T>>,
}

impl<T> Clone for ArchCondition<T> {
    fn clone(&self) -> Self {
        Self {
            description: self.description.clone(),
            check: Arc::clone(&self.check),
        }
    }
}

impl<T: Entity + 'static> ArchCondition<T> {
    /// Creates a condition from a check function.
    pub fn new<F>(description: impl Into<String>, check: F) -> Self
    where
        F: Fn(&T) -> Vec<ViolationEvent> + Send + Sync + 'static,
    {
        Self {
            description: description.into(),
            check: Arc::new(check),
        }
    }

    /// One event per item: `<item> does <p>` or `<item> does not <p>`.
    #[must_use]
    pub fn from_predicate(predicate: DescribedPredicate<T>) -> Self {
        let description = predicate.description().to_string();
        Self::phrased(description, predicate, "does", "does not")
    }

    /// `have <p>`; messages `<item> has <p>` or `<item> does not have <p>`.
    #[must_use]
    pub fn have(predicate: DescribedPredicate<T>) -> Self {
        let description = format!("have {}", predicate.description());
        Self::phrased(description, predicate, "has", "does not have")
    }

    /// `be <p>`; messages `<item> is <p>` or `<item> is not <p>`.
    #[must_use]
    pub fn be(predicate: DescribedPredicate<T>) -> Self {
        let description = format!("be {}", predicate.description());
        Self::phrased(description, predicate, "is", "is not")
    }

    fn phrased(
        description: String,
        predicate: DescribedPredicate<T>,
        positive: &'static str,
        negative: &'static str,
    ) -> Self {
        Self::new(description, move |item: &T| {
            let satisfied = predicate.test(item);
            let verb = if satisfied { positive } else { negative };
            let message = format!("{} {verb} {}", item.description(), predicate.description());
            vec![ViolationEvent::new(item.subject(), satisfied, message)]
        })
    }

    /// The description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Events for one item.
    pub fn check(&self, item: &T) -> Vec<ViolationEvent> {
        (self.check)(item)
    }

    /// Events for every item, in item order.
    pub fn evaluate(&self, items: &[T]) -> Vec<ViolationEvent> {
        items.iter().flat_map(|item| self.check(item)).collect()
    }

    /// Satisfied when both conditions are.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        let description = format!("{} and {}", self.description, other.description);
        let (a, b) = (self.check, other.check);
        Self::new(description, move |item: &T| {
            let mut events = a(item);
            events.extend(b(item));
            vec![ViolationEvent::all_of(item.subject(), events)]
        })
    }

    /// Satisfied when either condition is.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        let description = format!("{} or {}", self.description, other.description);
        let (a, b) = (self.check, other.check);
        Self::new(description, move |item: &T| {
            let subject = item.subject();
            let left = ViolationEvent::all_of(subject.clone(), a(item));
            let right = ViolationEvent::all_of(subject.clone(), b(item));
            vec![ViolationEvent::any_of(subject, vec![left, right], String::new())]
        })
    }

    /// Same check, new description.
    #[must_use]
    pub fn described_as(self, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            check: self.check,
        }
    }
}

/// Negates a condition; described as `never <c>`.
#[must_use]
pub fn never<T: Entity + 'static>(condition: ArchCondition<T>) -> ArchCondition<T> {
    let description = format!("never {}", condition.description);
    let check = condition.check;
    ArchCondition::new(description, move |item: &T| {
        check(item).into_iter().map(ViolationEvent::invert).collect()
    })
}

impl<T> fmt::Debug for ArchCondition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchCondition")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
