//! # archrules-core
//!
//! Core framework for architecture rules over a structural model of
//! compiled code.
//!
//! This crate provides:
//!
//! - [`ClassGraph`], the immutable model loaded from provider JSON
//! - [`DescribedPredicate`] and the reusable predicates in [`predicates`]
//! - [`ArchCondition`] and the two-faced [`ViolationEvent`]
//! - the fluent rule DSL in [`rule`]
//! - [`Evaluator`] for running [`RuleSet`]s and producing a [`Report`]
//!
//! ## Example
//!
//! ```
//! use archrules_core::condition::conditions::have_any_dependencies_that;
//! use archrules_core::deprecation::deprecated;
//! use archrules_core::model::{AnnotationDto, ClassDto, FieldDto, ModelDocument};
//! use archrules_core::predicates::dependency::{reside_in_same_package, target_class};
//! use archrules_core::{no_classes, ClassGraph};
//!
//! let graph = ClassGraph::from_document(
//!     ModelDocument::new()
//!         .with_class(ClassDto::new("p1.A").with_field(FieldDto::new("b", "p2.B")))
//!         .with_class(ClassDto::new("p2.B").with_annotation(AnnotationDto::new("java.lang.Deprecated"))),
//! )?;
//!
//! let rule = no_classes()
//!     .should(
//!         have_any_dependencies_that(target_class(deprecated()))
//!             .ignore_dependency(reside_in_same_package()),
//!     )
//!     .build()?;
//!
//! let result = rule.evaluate(&graph);
//! assert_eq!(result.violations.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod condition;
pub mod config;
pub mod deprecation;
pub mod evaluator;
pub mod hierarchy;
pub mod model;
pub mod naming;
pub mod predicate;
pub mod predicates;
pub mod reachability;
pub mod registry;
pub mod report;
pub mod rule;

/// Utility modules for rule implementations.
pub mod utils;

pub use condition::{ArchCondition, ViolationEvent};
pub use config::{Config, ConfigError};
pub use evaluator::{Evaluator, EvaluatorBuilder, EvaluatorError};
pub use model::{ClassGraph, ModelError};
pub use predicate::DescribedPredicate;
pub use registry::{RuleMap, RuleRegistry, RuleSet, RuleSetBox};
pub use report::{Report, RuleOutcome};
pub use rule::{classes, no_classes, priority, EvaluationResult, Priority, Rule, RuleError};
