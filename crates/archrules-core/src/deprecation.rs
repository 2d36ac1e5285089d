//! Deprecation markers across the Java and Kotlin dialects.

use crate::model::{AnnotationValue, CanBeAnnotated, JavaAnnotation};
use crate::predicate::DescribedPredicate;

/// `java.lang.Deprecated`
pub const JAVA_DEPRECATED: &str = "java.lang.Deprecated";
/// `kotlin.Deprecated`
pub const KOTLIN_DEPRECATED: &str = "kotlin.Deprecated";
/// `kotlin.DeprecatedSinceKotlin`
pub const KOTLIN_DEPRECATED_SINCE: &str = "kotlin.DeprecatedSinceKotlin";
/// Attribute of the primary marker scheduling removal.
pub const FOR_REMOVAL: &str = "forRemoval";

/// Resolves whether entities are deprecated.
///
/// The primary marker is the only one that can schedule removal; secondary
/// markers only ever mean "deprecated".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeprecationResolver {
    primary: &'static str,
    secondary: Vec<&'static str>,
}

impl Default for DeprecationResolver {
    fn default() -> Self {
        Self {
            primary: JAVA_DEPRECATED,
            secondary: vec![KOTLIN_DEPRECATED, KOTLIN_DEPRECATED_SINCE],
        }
    }
}

impl DeprecationResolver {
    /// Java and Kotlin markers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recognized marker types, primary first.
    pub fn markers(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.primary).chain(self.secondary.iter().copied())
    }

    /// Returns `true` if the annotation is any recognized marker.
    #[must_use]
    pub fn is_marker(&self, annotation: &JavaAnnotation) -> bool {
        self.markers().any(|m| annotation.is_of_type(m))
    }

    /// Returns `true` only for the primary marker with `forRemoval` set to
    /// boolean `true`. Missing or non-boolean values resolve to `false`.
    #[must_use]
    pub fn marks_removal(&self, annotation: &JavaAnnotation) -> bool {
        annotation.is_of_type(self.primary)
            && matches!(annotation.value(FOR_REMOVAL), Some(AnnotationValue::Bool(true)))
    }

    /// Carries any recognized marker, regardless of attributes.
    #[must_use]
    pub fn is_deprecated(&self, entity: &impl CanBeAnnotated) -> bool {
        entity.annotations().iter().any(|a| self.is_marker(a))
    }

    /// Carries the primary marker with `forRemoval = true`.
    #[must_use]
    pub fn is_deprecated_for_removal(&self, entity: &impl CanBeAnnotated) -> bool {
        entity.annotations().iter().any(|a| self.marks_removal(a))
    }
}

/// Annotation predicate `@Deprecated(forRemoval=true)`.
#[must_use]
pub fn annotation_deprecated_for_removal() -> DescribedPredicate<JavaAnnotation> {
    let resolver = DeprecationResolver::new();
    DescribedPredicate::new("@Deprecated(forRemoval=true)", move |a: &JavaAnnotation| {
        resolver.marks_removal(a)
    })
}

/// Entities carrying any deprecation marker; described as `deprecated`.
#[must_use]
pub fn deprecated<T: CanBeAnnotated + 'static>() -> DescribedPredicate<T> {
    let resolver = DeprecationResolver::new();
    DescribedPredicate::new("deprecated", move |e: &T| resolver.is_deprecated(e))
}

/// Entities scheduled for removal; described as `deprecated for removal`.
#[must_use]
pub fn deprecated_for_removal<T: CanBeAnnotated + 'static>() -> DescribedPredicate<T> {
    let annotation = annotation_deprecated_for_removal();
    DescribedPredicate::new("deprecated for removal", move |e: &T| {
        e.annotations().iter().any(|a| annotation.test(a))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnnotationDto, ClassDto, ClassGraph, JavaClass, ModelDocument};

    fn class_with(annotation: Option<AnnotationDto>) -> JavaClass {
        let mut class = ClassDto::new("p.A");
        if let Some(a) = annotation {
            class = class.with_annotation(a);
        }
        let graph = ClassGraph::from_document(ModelDocument::new().with_class(class)).unwrap();
        graph.get("p.A").unwrap()
    }

    #[test]
    fn every_marker_means_deprecated() {
        let resolver = DeprecationResolver::new();
        for marker in [JAVA_DEPRECATED, KOTLIN_DEPRECATED, KOTLIN_DEPRECATED_SINCE] {
            assert!(resolver.is_deprecated(&class_with(Some(AnnotationDto::new(marker)))));
        }
        assert!(!resolver.is_deprecated(&class_with(None)));
        assert!(!resolver.is_deprecated(&class_with(Some(AnnotationDto::new("p.Other")))));
    }

    #[test]
    fn removal_requires_boolean_true_on_primary_marker() {
        let resolver = DeprecationResolver::new();
        let cases = [
            (None, false),
            (Some(AnnotationDto::new(JAVA_DEPRECATED)), false),
            (
                Some(AnnotationDto::new(JAVA_DEPRECATED).with_value(FOR_REMOVAL, false)),
                false,
            ),
            (
                Some(AnnotationDto::new(JAVA_DEPRECATED).with_value(FOR_REMOVAL, "true")),
                false,
            ),
            (
                Some(AnnotationDto::new(JAVA_DEPRECATED).with_value(FOR_REMOVAL, 1_i64)),
                false,
            ),
            (
                Some(AnnotationDto::new(KOTLIN_DEPRECATED).with_value(FOR_REMOVAL, true)),
                false,
            ),
            (
                Some(AnnotationDto::new(JAVA_DEPRECATED).with_value(FOR_REMOVAL, true)),
                true,
            ),
        ];
        for (annotation, expected) in cases {
            let class = class_with(annotation);
            assert_eq!(resolver.is_deprecated_for_removal(&class), expected);
            assert_eq!(deprecated_for_removal::<JavaClass>().test(&class), expected);
        }
    }

    #[test]
    fn predicate_descriptions() {
        assert_eq!(deprecated::<JavaClass>().description(), "deprecated");
        assert_eq!(
            deprecated_for_removal::<JavaClass>().description(),
            "deprecated for removal"
        );
        assert_eq!(
            annotation_deprecated_for_removal().description(),
            "@Deprecated(forRemoval=true)"
        );
    }
}
