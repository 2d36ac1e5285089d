//! Deprecated and internal Gradle API usage, checked for plugins and tasks.

use archrules_core::deprecation;
use archrules_core::model::{AccessTarget, Entity, JavaAccess, JavaClass};
use archrules_core::predicates::class::reside_in_a_package;
use archrules_core::rule::{self, Priority, Rule, RuleError};
use archrules_core::{ArchCondition, DescribedPredicate, ViolationEvent};

use super::predicates::{plugins, tasks};

const UPGRADE_GUIDE: &str = "https://docs.gradle.org/current/userguide/upgrading_version_8.html";
const JAVADOC: &str = "https://docs.gradle.org/current/javadoc/";

/// One violation per access from the class that satisfies `matches`.
fn not_use(
    description: &'static str,
    matches: DescribedPredicate<JavaAccess>,
    message: fn(&JavaClass, &JavaAccess) -> String,
) -> ArchCondition<JavaClass> {
    ArchCondition::new(description, move |class: &JavaClass| {
        class
            .accesses_from_self()
            .into_iter()
            .filter(|a| matches.test(a))
            .map(|a| ViolationEvent::violated(a.subject(), message(class, &a)))
            .collect()
    })
}

/// Targets declared in `org.gradle..` that are deprecated themselves or
/// whose owner is.
fn deprecated_gradle_api() -> DescribedPredicate<JavaAccess> {
    let gradle = reside_in_a_package("org.gradle..");
    let deprecated_target = deprecation::deprecated::<AccessTarget>();
    let deprecated_owner = deprecation::deprecated::<JavaClass>();
    DescribedPredicate::new("deprecated Gradle API", move |a: &JavaAccess| {
        let owner = a.target_owner();
        gradle.test(&owner) && (deprecated_owner.test(&owner) || deprecated_target.test(&a.target()))
    })
}

/// Target owners in an `..internal..` package below `org.gradle`.
fn internal_gradle_api() -> DescribedPredicate<JavaAccess> {
    let internal = reside_in_a_package("org.gradle..").and(reside_in_a_package("..internal.."));
    DescribedPredicate::new("internal Gradle API", move |a: &JavaAccess| {
        internal.test(&a.target_owner())
    })
}

fn not_use_deprecated_gradle_apis() -> ArchCondition<JavaClass> {
    not_use("not use deprecated Gradle APIs", deprecated_gradle_api(), |class, access| {
        format!(
            "Class {} uses deprecated Gradle API: {}. \
             This API will be removed in a future Gradle version. \
             Consult Gradle upgrade guides for alternatives.",
            class.simple_name(),
            access.description()
        )
    })
}

fn not_use_internal_gradle_apis() -> ArchCondition<JavaClass> {
    not_use("not use internal Gradle APIs", internal_gradle_api(), |class, access| {
        format!(
            "Class {} uses internal Gradle API: {}. \
             Internal APIs (packages containing '.internal.') are not stable and may change without notice. \
             Use public Gradle APIs instead.",
            class.simple_name(),
            access.description()
        )
    })
}

/// Which classes a rule checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subjects {
    /// `org.gradle.api.Plugin` implementations.
    Plugins,
    /// Concrete `org.gradle.api.Task` implementations.
    Tasks,
}

impl Subjects {
    fn predicate(self) -> DescribedPredicate<JavaClass> {
        match self {
            Self::Plugins => plugins(),
            Self::Tasks => tasks(),
        }
    }

    fn noun(self) -> &'static str {
        match self {
            Self::Plugins => "Plugins",
            Self::Tasks => "Tasks",
        }
    }
}

/// No deprecated Gradle API use from `subjects`.
///
/// # Errors
///
/// Returns an error if the rule definition is invalid.
pub fn deprecated_apis(subjects: Subjects) -> Result<Rule, RuleError> {
    rule::priority(Priority::Medium)
        .classes()
        .that(subjects.predicate())
        .should(not_use_deprecated_gradle_apis())
        .allow_empty_should(true)
        .because(format!(
            "{} should not use deprecated Gradle APIs as they will be removed in future versions. \
             Consult Gradle upgrade guides for modern alternatives. See {UPGRADE_GUIDE}",
            subjects.noun()
        ))
        .build()
}

/// No internal Gradle API use from `subjects`.
///
/// # Errors
///
/// Returns an error if the rule definition is invalid.
pub fn internal_apis(subjects: Subjects) -> Result<Rule, RuleError> {
    rule::priority(Priority::High)
        .classes()
        .that(subjects.predicate())
        .should(not_use_internal_gradle_apis())
        .allow_empty_should(true)
        .because(format!(
            "{} should not use internal Gradle APIs (packages containing '.internal.'). \
             Internal APIs are not stable and may change or be removed without notice. \
             Use only public Gradle APIs documented at {JAVADOC}",
            subjects.noun()
        ))
        .build()
}
