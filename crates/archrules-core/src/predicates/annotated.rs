//! Annotation predicates, generic over annotated entities.

use crate::model::{CanBeAnnotated, JavaAnnotation};
use crate::predicate::{any_of, DescribedPredicate};

use super::simple;

/// Annotated with the given type; described as `annotated with @Simple`.
#[must_use]
pub fn annotated_with<T: CanBeAnnotated + 'static>(type_name: &str) -> DescribedPredicate<T> {
    let type_name = type_name.to_string();
    DescribedPredicate::new(
        format!("annotated with @{}", simple(&type_name)),
        move |e: &T| e.is_annotated_with(&type_name),
    )
}

/// Annotated with an annotation satisfying `predicate`.
#[must_use]
pub fn annotated_with_where<T: CanBeAnnotated + 'static>(
    predicate: DescribedPredicate<JavaAnnotation>,
) -> DescribedPredicate<T> {
    let description = format!("annotated with {}", predicate.description());
    DescribedPredicate::new(description, move |e: &T| {
        e.annotations().iter().any(|a| predicate.test(a))
    })
}

/// Annotated with any of the given types.
///
/// An empty set never matches.
#[must_use]
pub fn annotated_with_any<T, I, S>(type_names: I) -> DescribedPredicate<T>
where
    T: CanBeAnnotated + 'static,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let names: Vec<String> = type_names
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect();
    let description = format!("annotated with any [{}]", names.join(", "));
    any_of(description, names.iter().map(|n| annotated_with::<T>(n)))
}

/// Annotated with the type directly or through a meta-annotation.
#[must_use]
pub fn meta_annotated_with<T: CanBeAnnotated + 'static>(type_name: &str) -> DescribedPredicate<T> {
    let type_name = type_name.to_string();
    DescribedPredicate::new(
        format!("meta-annotated with @{}", simple(&type_name)),
        move |e: &T| e.is_meta_annotated_with(&type_name),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnnotationDto, ClassDto, ClassGraph, ClassKind, JavaClass, ModelDocument};

    fn graph() -> ClassGraph {
        ClassGraph::from_document(
            ModelDocument::new()
                .with_class(ClassDto::new("p.A").with_annotation(AnnotationDto::new("x.Service")))
                .with_class(
                    ClassDto::new("x.Service")
                        .with_kind(ClassKind::Annotation)
                        .with_annotation(AnnotationDto::new("x.Component")),
                )
                .with_class(ClassDto::new("p.B")),
        )
        .unwrap()
    }

    #[test]
    fn direct_and_meta_annotation() {
        let g = graph();
        let a = g.get("p.A").unwrap();
        assert!(annotated_with::<JavaClass>("x.Service").test(&a));
        assert!(!annotated_with::<JavaClass>("x.Component").test(&a));
        assert!(meta_annotated_with::<JavaClass>("x.Component").test(&a));
        assert_eq!(
            annotated_with::<JavaClass>("x.Service").description(),
            "annotated with @Service"
        );
    }

    #[test]
    fn any_of_set() {
        let g = graph();
        let p = annotated_with_any::<JavaClass, _, _>(["x.Other", "x.Service"]);
        assert!(p.test(&g.get("p.A").unwrap()));
        assert!(!p.test(&g.get("p.B").unwrap()));
        assert_eq!(p.description(), "annotated with any [x.Other, x.Service]");

        let empty = annotated_with_any::<JavaClass, _, &str>([]);
        assert!(!empty.test(&g.get("p.A").unwrap()));
        assert!(empty.is_always_false());
        assert_eq!(empty.description(), "annotated with any []");
    }
}
