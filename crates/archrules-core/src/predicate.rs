//! Described predicates and their combinators.
//!
//! A [`DescribedPredicate`] is a shared closure paired with a description.
//! Combinators never mutate; they return new predicates whose descriptions
//! are derived from the operands.
//!
//! ```
//! use archrules_core::predicate::{not, DescribedPredicate};
//!
//! let even = DescribedPredicate::new("even", |n: &u32| n % 2 == 0);
//! let small = DescribedPredicate::new("small", |n: &u32| *n < 10);
//! let p = even.and(not(small));
//! assert_eq!(p.description(), "even and not small");
//! assert!(p.test(&12));
//! ```

use std::fmt;
use std::sync::Arc;

type TestFn<T> = dyn Fn(&T) -> bool + Send + Sync;

/// A boolean test over `T` with a human-readable description.
pub struct DescribedPredicate<T: ?Sized> {
    description: String,
    test: Arc<TestFn<T>>,
    constant: Option<bool>,
}

impl<T: ?Sized> Clone for DescribedPredicate<T> {
    fn clone(&self) -> Self {
        Self {
            description: self.description.clone(),
            test: Arc::clone(&self.test),
            constant: self.constant,
        }
    }
}

impl<T: ?Sized + 'static> DescribedPredicate<T> {
    /// Creates a predicate from a closure.
    pub fn new<F>(description: impl Into<String>, test: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            description: description.into(),
            test: Arc::new(test),
            constant: None,
        }
    }

    /// A predicate that never matches.
    #[must_use]
    pub fn always_false(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            test: Arc::new(|_: &T| false),
            constant: Some(false),
        }
    }

    /// A predicate that always matches.
    #[must_use]
    pub fn always_true(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            test: Arc::new(|_: &T| true),
            constant: Some(true),
        }
    }

    /// Evaluates the predicate.
    pub fn test(&self, value: &T) -> bool {
        (self.test)(value)
    }

    /// The description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns `true` if the predicate is statically known to never match.
    #[must_use]
    pub fn is_always_false(&self) -> bool {
        self.constant == Some(false)
    }

    /// Both predicates. `other` is skipped when `self` fails.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        let description = format!("{} and {}", self.description, other.description);
        let constant = match (self.constant, other.constant) {
            (Some(false), _) | (_, Some(false)) => Some(false),
            (Some(true), Some(true)) => Some(true),
            _ => None,
        };
        let (a, b) = (self.test, other.test);
        Self {
            description,
            test: Arc::new(move |v: &T| a(v) && b(v)),
            constant,
        }
    }

    /// Either predicate. `other` is skipped when `self` matches.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        let description = format!("{} or {}", self.description, other.description);
        let constant = match (self.constant, other.constant) {
            (Some(true), _) | (_, Some(true)) => Some(true),
            (Some(false), Some(false)) => Some(false),
            _ => None,
        };
        let (a, b) = (self.test, other.test);
        Self {
            description,
            test: Arc::new(move |v: &T| a(v) || b(v)),
            constant,
        }
    }

    /// Same test, new description.
    #[must_use]
    pub fn described_as(self, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..self
        }
    }

    /// Applies this predicate to the result of `f`.
    #[must_use]
    pub fn on_result_of<S, F>(self, f: F) -> DescribedPredicate<S>
    where
        S: ?Sized + 'static,
        F: Fn(&S) -> T + Send + Sync + 'static,
        T: Sized,
    {
        let test = self.test;
        DescribedPredicate {
            description: self.description,
            test: Arc::new(move |s: &S| test(&f(s))),
            constant: self.constant,
        }
    }

    /// Applies this predicate to a borrowed part of `S`.
    #[must_use]
    pub fn forward<S, F>(self, f: F) -> DescribedPredicate<S>
    where
        S: ?Sized + 'static,
        F: Fn(&S) -> &T + Send + Sync + 'static,
    {
        let test = self.test;
        DescribedPredicate {
            description: self.description,
            test: Arc::new(move |s: &S| test(f(s))),
            constant: self.constant,
        }
    }
}

impl<T: ?Sized> fmt::Debug for DescribedPredicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescribedPredicate")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl<T: ?Sized> fmt::Display for DescribedPredicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

/// Inverts a predicate; description `not <p>`.
#[must_use]
pub fn not<T: ?Sized + 'static>(predicate: DescribedPredicate<T>) -> DescribedPredicate<T> {
    let test = predicate.test;
    DescribedPredicate {
        description: format!("not {}", predicate.description),
        test: Arc::new(move |v: &T| !test(v)),
        constant: predicate.constant.map(|c| !c),
    }
}

/// OR-chain over a named set of predicates, described as `<set_description>`.
///
/// An empty set yields an always-false predicate that still carries the
/// set's description.
#[must_use]
pub fn any_of<T, I>(set_description: impl Into<String>, predicates: I) -> DescribedPredicate<T>
where
    T: ?Sized + 'static,
    I: IntoIterator<Item = DescribedPredicate<T>>,
{
    let set_description = set_description.into();
    predicates
        .into_iter()
        .reduce(DescribedPredicate::or)
        .map_or_else(
            || DescribedPredicate::always_false(set_description.clone()),
            |p| p.described_as(set_description.clone()),
        )
}

/// Prefixes the description with `is `.
#[must_use]
pub fn is<T: ?Sized + 'static>(predicate: DescribedPredicate<T>) -> DescribedPredicate<T> {
    prefixed("is", predicate)
}

/// Prefixes the description with `are `.
#[must_use]
pub fn are<T: ?Sized + 'static>(predicate: DescribedPredicate<T>) -> DescribedPredicate<T> {
    prefixed("are", predicate)
}

/// Inverts and prefixes the description with `are not `.
#[must_use]
pub fn are_not<T: ?Sized + 'static>(predicate: DescribedPredicate<T>) -> DescribedPredicate<T> {
    let description = format!("are not {}", predicate.description);
    not(predicate).described_as(description)
}

/// Prefixes the description with `has `.
#[must_use]
pub fn has<T: ?Sized + 'static>(predicate: DescribedPredicate<T>) -> DescribedPredicate<T> {
    prefixed("has", predicate)
}

/// Prefixes the description with `have `.
#[must_use]
pub fn have<T: ?Sized + 'static>(predicate: DescribedPredicate<T>) -> DescribedPredicate<T> {
    prefixed("have", predicate)
}

fn prefixed<T: ?Sized + 'static>(prefix: &str, predicate: DescribedPredicate<T>) -> DescribedPredicate<T> {
    let description = format!("{prefix} {}", predicate.description);
    predicate.described_as(description)
}
