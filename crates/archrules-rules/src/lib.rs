//! # archrules-rules
//!
//! Built-in rule sets for archrules.
//!
//! ## Available Rule Sets
//!
//! | Set | Type | Rules |
//! |-----|------|-------|
//! | `deprecation` | [`DeprecationRules`] | `deprecated`, `deprecatedForRemoval` |
//! | `testing-frameworks` | [`TestcontainersRules`] | Testcontainers 1.x to 2.x migration |
//! | `gradle-plugin-development` | [`GradlePluginRules`] | Gradle plugin best practices |
//! | `guava` | [`GuavaRules`] | `guava optional`, `guava collections` |
//! | `javax` | [`JavaxRules`] | `javaxRule` |
//! | `joda` | [`JodaRules`] | `jodaRule` |
//! | `nullability` | [`NullabilityRules`] | JSpecify adoption |
//! | `security` | [`CveRules`] | known CVE call sites |
//!
//! ## Usage
//!
//! ```
//! use archrules_core::model::{ClassDto, ModelDocument};
//! use archrules_core::{ClassGraph, Evaluator};
//! use archrules_rules::{Preset, JodaRules};
//!
//! let graph = ClassGraph::from_document(ModelDocument::new().with_class(ClassDto::new("app.Main")))?;
//! let evaluator = Evaluator::builder()
//!     .rule_sets(Preset::Security.rule_sets())
//!     .rule_set(JodaRules)
//!     .build()?;
//! let report = evaluator.evaluate(&graph)?;
//! assert_eq!(report.violation_count(), 0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod deprecation;
pub mod gradle;
pub mod guava;
pub mod javax;
pub mod joda;
pub mod nullability;
mod presets;
pub mod security;
pub mod testing_frameworks;

pub use deprecation::DeprecationRules;
pub use gradle::GradlePluginRules;
pub use guava::GuavaRules;
pub use javax::JavaxRules;
pub use joda::JodaRules;
pub use nullability::NullabilityRules;
pub use presets::{all_rule_sets, rule_set, Preset};
pub use security::CveRules;
pub use testing_frameworks::TestcontainersRules;

/// Re-export core types for convenience.
pub use archrules_core::{Priority, Rule, RuleSet, RuleSetBox};
