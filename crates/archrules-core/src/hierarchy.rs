//! Transitive class-hierarchy traversal and member search.

use std::collections::{HashSet, VecDeque};

use crate::model::{JavaClass, JavaField, JavaMethod};
use crate::predicate::DescribedPredicate;

/// The class, its superclasses up to the root, then every implemented or
/// extended interface (breadth first). Each class appears once.
///
/// Stub ancestors appear by name but contribute no further ancestors.
#[must_use]
pub fn class_hierarchy(class: &JavaClass) -> Vec<JavaClass> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    let mut current = Some(class.clone());
    while let Some(c) = current {
        if !seen.insert(c.id()) {
            break;
        }
        current = c.superclass();
        out.push(c);
    }

    let mut queue: VecDeque<JavaClass> = out.iter().flat_map(JavaClass::interfaces).collect();
    while let Some(interface) = queue.pop_front() {
        if seen.insert(interface.id()) {
            queue.extend(interface.interfaces());
            out.push(interface);
        }
    }
    out
}

/// Members that can be searched across a hierarchy.
pub trait HierarchyMember: Sized + 'static {
    /// Plural noun used in descriptions (`methods`, `fields`).
    const PLURAL: &'static str;

    /// Members declared directly on `class`.
    fn declared_in(class: &JavaClass) -> Vec<Self>;
}

impl HierarchyMember for JavaMethod {
    const PLURAL: &'static str = "methods";

    fn declared_in(class: &JavaClass) -> Vec<Self> {
        class.methods()
    }
}

impl HierarchyMember for JavaField {
    const PLURAL: &'static str = "fields";

    fn declared_in(class: &JavaClass) -> Vec<Self> {
        class.fields()
    }
}

/// All members of kind `M` declared by the class or any ancestor.
#[must_use]
pub fn all_members<M: HierarchyMember>(class: &JavaClass) -> Vec<M> {
    class_hierarchy(class)
        .iter()
        .flat_map(M::declared_in)
        .collect()
}

/// Returns `true` as soon as a member anywhere in the hierarchy matches.
#[must_use]
pub fn contains_member_in_hierarchy<M: HierarchyMember>(
    class: &JavaClass,
    predicate: &DescribedPredicate<M>,
) -> bool {
    class_hierarchy(class)
        .iter()
        .any(|c| M::declared_in(c).iter().any(|m| predicate.test(m)))
}

/// `contain any <members> that <p>`, searching the whole hierarchy.
#[must_use]
pub fn contain_any_members_in_class_hierarchy_that<M: HierarchyMember>(
    predicate: DescribedPredicate<M>,
) -> DescribedPredicate<JavaClass> {
    let description = format!("contain any {} that {}", M::PLURAL, predicate.description());
    DescribedPredicate::new(description, move |class: &JavaClass| {
        contains_member_in_hierarchy(class, &predicate)
    })
}

/// `contain any methods that <p>`, searching the whole hierarchy.
#[must_use]
pub fn contain_any_methods_in_class_hierarchy_that(
    predicate: DescribedPredicate<JavaMethod>,
) -> DescribedPredicate<JavaClass> {
    contain_any_members_in_class_hierarchy_that(predicate)
}

/// `contain any fields that <p>`, searching the whole hierarchy.
#[must_use]
pub fn contain_any_fields_in_class_hierarchy_that(
    predicate: DescribedPredicate<JavaField>,
) -> DescribedPredicate<JavaClass> {
    contain_any_members_in_class_hierarchy_that(predicate)
}

/// `contain any methods that <p>`, declared members only.
#[must_use]
pub fn contain_any_methods_that(
    predicate: DescribedPredicate<JavaMethod>,
) -> DescribedPredicate<JavaClass> {
    let description = format!("contain any methods that {}", predicate.description());
    DescribedPredicate::new(description, move |class: &JavaClass| {
        class.methods().iter().any(|m| predicate.test(m))
    })
}

/// `contain any code units that <p>`: declared methods, constructors and
/// static initializers.
#[must_use]
pub fn contain_any_code_units_that(
    predicate: DescribedPredicate<JavaMethod>,
) -> DescribedPredicate<JavaClass> {
    let description = format!("contain any code units that {}", predicate.description());
    DescribedPredicate::new(description, move |class: &JavaClass| {
        class.code_units().iter().any(|m| predicate.test(m))
    })
}

/// `contain any fields that <p>`, declared members only.
#[must_use]
pub fn contain_any_fields_that(
    predicate: DescribedPredicate<JavaField>,
) -> DescribedPredicate<JavaClass> {
    let description = format!("contain any fields that {}", predicate.description());
    DescribedPredicate::new(description, move |class: &JavaClass| {
        class.fields().iter().any(|f| predicate.test(f))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClassDto, ClassGraph, ClassKind, FieldDto, MethodDto, ModelDocument};

    fn graph() -> ClassGraph {
        ClassGraph::from_document(
            ModelDocument::new()
                .with_class(
                    ClassDto::new("p.Leaf")
                        .extending("p.Middle")
                        .implementing("p.Named")
                        .with_method(MethodDto::new("leaf")),
                )
                .with_class(
                    ClassDto::new("p.Middle")
                        .extending("p.Root")
                        .with_field(FieldDto::new("middleField", "int")),
                )
                .with_class(
                    ClassDto::new("p.Root")
                        .extending("external.Base")
                        .implementing("p.Named"),
                )
                .with_class(
                    ClassDto::new("p.Named")
                        .with_kind(ClassKind::Interface)
                        .implementing("p.Marker")
                        .with_method(MethodDto::new("getName").returning("java.lang.String")),
                )
                .with_class(
                    ClassDto::new("p.Marker")
                        .with_kind(ClassKind::Interface)
                        .with_method(MethodDto::new("mark")),
                )
                .with_class(ClassDto::new("p.Alone")),
        )
        .unwrap()
    }

    fn named(name: &'static str) -> DescribedPredicate<JavaMethod> {
        DescribedPredicate::new(format!("named {name}"), move |m: &JavaMethod| m.name() == name)
    }

    #[test]
    fn hierarchy_order_is_superclasses_then_interfaces() {
        let g = graph();
        let names: Vec<String> = class_hierarchy(&g.get("p.Leaf").unwrap())
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(
            names,
            vec!["p.Leaf", "p.Middle", "p.Root", "external.Base", "p.Named", "p.Marker"]
        );
    }

    #[test]
    fn finds_members_declared_on_ancestors() {
        let g = graph();
        let leaf = g.get("p.Leaf").unwrap();
        assert!(contains_member_in_hierarchy(&leaf, &named("leaf")));
        assert!(contains_member_in_hierarchy(&leaf, &named("getName")));
        assert!(contains_member_in_hierarchy(&leaf, &named("mark")));
        assert!(!contains_member_in_hierarchy(&leaf, &named("missing")));

        let with_field = contain_any_fields_in_class_hierarchy_that(DescribedPredicate::new(
            "named middleField",
            |f: &JavaField| f.name() == "middleField",
        ));
        assert!(with_field.test(&leaf));
        assert_eq!(with_field.description(), "contain any fields that named middleField");
    }

    #[test]
    fn class_without_ancestors_or_members_never_matches() {
        let g = graph();
        let alone = g.get("p.Alone").unwrap();
        let any = DescribedPredicate::<JavaMethod>::always_true("anything");
        assert!(!contains_member_in_hierarchy(&alone, &any));
    }

    #[test]
    fn declared_only_search_ignores_ancestors() {
        let g = graph();
        let leaf = g.get("p.Leaf").unwrap();
        assert!(!contain_any_methods_that(named("mark")).test(&leaf));
        assert!(contain_any_methods_in_class_hierarchy_that(named("mark")).test(&leaf));
        assert_eq!(all_members::<JavaMethod>(&leaf).len(), 3);
    }

    #[test]
    fn code_unit_search_includes_constructors() {
        let g = ClassGraph::from_document(
            ModelDocument::new().with_class(
                ClassDto::new("p.Only").with_method(MethodDto::constructor()),
            ),
        )
        .unwrap();
        let only = g.get("p.Only").unwrap();
        let any = DescribedPredicate::<JavaMethod>::always_true("anything");
        assert!(!contain_any_methods_that(any.clone()).test(&only));
        let code_units = contain_any_code_units_that(any);
        assert!(code_units.test(&only));
        assert_eq!(code_units.description(), "contain any code units that anything");
    }
}
