//! Violation events.

use serde::Serialize;

use crate::model::Subject;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct Face {
    satisfied: bool,
    messages: Vec<String>,
}

impl Face {
    fn new(satisfied: bool, messages: Vec<String>) -> Self {
        Self {
            satisfied,
            messages,
        }
    }
}

/// Outcome of checking one subject against a condition.
///
/// Every event carries two faces: the outcome as checked and the outcome of
/// the negated condition. [`invert`](Self::invert) swaps them, which is how
/// `never(..)` and `no_classes()` rules phrase their messages without
/// re-running the check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViolationEvent {
    subject: Subject,
    #[serde(flatten)]
    outcome: Face,
    #[serde(skip)]
    inverse: Face,
}

impl ViolationEvent {
    /// An event whose message is the same on both faces.
    #[must_use]
    pub fn new(subject: Subject, satisfied: bool, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            subject,
            outcome: Face::new(satisfied, vec![message.clone()]),
            inverse: Face::new(!satisfied, vec![message]),
        }
    }

    /// A violation.
    #[must_use]
    pub fn violated(subject: Subject, message: impl Into<String>) -> Self {
        Self::new(subject, false, message)
    }

    /// A satisfied event.
    #[must_use]
    pub fn satisfied(subject: Subject, message: impl Into<String>) -> Self {
        Self::new(subject, true, message)
    }

    /// Satisfied when any event is satisfied. Messages of a violated result
    /// are those of all violated events, or `fallback` when there are none.
    ///
    /// The inverse is satisfied only when every inverse is satisfied.
    #[must_use]
    pub fn any_of(subject: Subject, events: Vec<Self>, fallback: impl Into<String>) -> Self {
        if events.is_empty() {
            return Self {
                subject,
                outcome: Face::new(false, vec![fallback.into()]),
                inverse: Face::new(true, Vec::new()),
            };
        }
        let satisfied = events.iter().any(|e| e.outcome.satisfied);
        let inverse_satisfied = events.iter().all(|e| e.inverse.satisfied);
        Self {
            subject,
            outcome: Face::new(satisfied, collect(&events, |e| &e.outcome, satisfied)),
            inverse: Face::new(
                inverse_satisfied,
                collect(&events, |e| &e.inverse, inverse_satisfied),
            ),
        }
    }

    /// Satisfied when every event is satisfied; an empty set is satisfied
    /// on both faces.
    #[must_use]
    pub fn all_of(subject: Subject, events: Vec<Self>) -> Self {
        if events.is_empty() {
            return Self {
                subject,
                outcome: Face::new(true, Vec::new()),
                inverse: Face::new(true, Vec::new()),
            };
        }
        let satisfied = events.iter().all(|e| e.outcome.satisfied);
        let inverse_satisfied = events.iter().any(|e| e.inverse.satisfied);
        Self {
            subject,
            outcome: Face::new(satisfied, collect(&events, |e| &e.outcome, satisfied)),
            inverse: Face::new(
                inverse_satisfied,
                collect(&events, |e| &e.inverse, inverse_satisfied),
            ),
        }
    }

    /// Swaps the outcome with the outcome of the negated condition.
    #[must_use]
    pub fn invert(self) -> Self {
        Self {
            subject: self.subject,
            outcome: self.inverse,
            inverse: self.outcome,
        }
    }

    /// The subject.
    #[must_use]
    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    /// Returns `true` if the event reports a violation.
    #[must_use]
    pub fn is_violation(&self) -> bool {
        !self.outcome.satisfied
    }

    /// Messages of this outcome.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.outcome.messages
    }
}

/// Messages of the faces matching the combined result: satisfied messages
/// explain a satisfied result, violated messages a violated one.
fn collect(
    events: &[ViolationEvent],
    face: impl Fn(&ViolationEvent) -> &Face,
    satisfied: bool,
) -> Vec<String> {
    events
        .iter()
        .map(&face)
        .filter(|f| f.satisfied == satisfied)
        .flat_map(|f| f.messages.iter().cloned())
        .collect()
}
