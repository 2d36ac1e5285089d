//! Predicates over members and named entities.

use crate::model::{HasModifiers, HasName, HasOwner, JavaClass, JavaField, JavaMethod, Modifier};
use crate::predicate::DescribedPredicate;

/// Name equals `expected`; described as `name 'expected'`.
#[must_use]
pub fn name<T: HasName + 'static>(expected: &str) -> DescribedPredicate<T> {
    let expected = expected.to_string();
    DescribedPredicate::new(format!("name '{expected}'"), move |e: &T| {
        e.name() == expected
    })
}

/// Name starts with `prefix`.
#[must_use]
pub fn name_starting_with<T: HasName + 'static>(prefix: &str) -> DescribedPredicate<T> {
    let prefix = prefix.to_string();
    DescribedPredicate::new(format!("name starting with '{prefix}'"), move |e: &T| {
        e.name().starts_with(&prefix)
    })
}

/// Declares the modifier; described as `modifier PUBLIC`.
#[must_use]
pub fn modifier<T: HasModifiers + 'static>(modifier: Modifier) -> DescribedPredicate<T> {
    DescribedPredicate::new(format!("modifier {modifier}"), move |e: &T| {
        e.has_modifier(modifier)
    })
}

/// Static members; described as `static`.
#[must_use]
pub fn static_member<T: HasModifiers + 'static>() -> DescribedPredicate<T> {
    modifier(Modifier::Static).described_as("static")
}

/// Declared in a class matching `predicate`.
#[must_use]
pub fn declared_in<T: HasOwner + 'static>(
    predicate: DescribedPredicate<JavaClass>,
) -> DescribedPredicate<T> {
    let description = format!("declared in {}", predicate.description());
    DescribedPredicate::new(description, move |e: &T| predicate.test(&e.owner()))
}

/// [`declared_in`], described as `declared in class that <predicate>`.
#[must_use]
pub fn declared_in_class_that<T: HasOwner + 'static>(
    predicate: DescribedPredicate<JavaClass>,
) -> DescribedPredicate<T> {
    let description = format!("declared in class that {}", predicate.description());
    declared_in(predicate).described_as(description)
}

/// Declared in exactly the named class.
#[must_use]
pub fn declared_in_class(type_name: &str) -> DescribedPredicate<JavaMethod> {
    let type_name = type_name.to_string();
    DescribedPredicate::new(format!("declared in {type_name}"), move |m: &JavaMethod| {
        m.owner().name() == type_name
    })
}

/// Fields whose erased type is exactly `type_name`.
#[must_use]
pub fn have_raw_type(type_name: &str) -> DescribedPredicate<JavaField> {
    let type_name = type_name.to_string();
    DescribedPredicate::new(format!("have raw type {type_name}"), move |f: &JavaField| {
        f.raw_type().name() == type_name
    })
}

/// Fields whose erased type satisfies `predicate`.
#[must_use]
pub fn raw_type(predicate: DescribedPredicate<JavaClass>) -> DescribedPredicate<JavaField> {
    let description = format!("raw type {}", predicate.description());
    DescribedPredicate::new(description, move |f: &JavaField| predicate.test(&f.raw_type()))
}

/// Methods whose erased return type satisfies `predicate`.
#[must_use]
pub fn raw_return_type(predicate: DescribedPredicate<JavaClass>) -> DescribedPredicate<JavaMethod> {
    let description = format!("raw return type {}", predicate.description());
    DescribedPredicate::new(description, move |m: &JavaMethod| {
        predicate.test(&m.return_type())
    })
}

/// Code units whose erased parameter list is exactly `types`.
#[must_use]
pub fn have_raw_parameter_types<I, S>(types: I) -> DescribedPredicate<JavaMethod>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let types: Vec<String> = types.into_iter().map(Into::into).collect();
    DescribedPredicate::new(
        format!("have raw parameter types [{}]", types.join(", ")),
        move |m: &JavaMethod| m.parameter_type_names() == types,
    )
}

/// JavaBeans getters; described as `getter`.
///
/// A getter is non-static, takes no parameters and is either
/// - `getX`: at least four characters, the fourth not lowercase, or
/// - `isX`: at least three characters, the third not lowercase, and not
///   returning `boolean` / `java.lang.Boolean`.
///
/// Case uses Unicode lowercase classification; characters without case
/// (digits, `_`, `$`) count as not lowercase.
#[must_use]
pub fn a_getter() -> DescribedPredicate<JavaMethod> {
    DescribedPredicate::new("getter", is_getter)
}

fn is_getter(method: &JavaMethod) -> bool {
    if method.has_modifier(Modifier::Static) || !method.parameter_type_names().is_empty() {
        return false;
    }
    let name = method.name();
    if let Some(rest) = name.strip_prefix("get") {
        return rest.chars().next().is_some_and(|c| !c.is_lowercase());
    }
    if let Some(rest) = name.strip_prefix("is") {
        let return_type = method.return_type();
        if matches!(return_type.name(), "boolean" | "java.lang.Boolean") {
            return false;
        }
        return rest.chars().next().is_some_and(|c| !c.is_lowercase());
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClassDto, ClassGraph, FieldDto, MethodDto, ModelDocument};

    fn method(dto: MethodDto) -> JavaMethod {
        let graph = ClassGraph::from_document(
            ModelDocument::new().with_class(ClassDto::new("p.A").with_method(dto)),
        )
        .unwrap();
        graph.get("p.A").unwrap().methods().remove(0)
    }

    #[test]
    fn getter_detection() {
        let getter = a_getter();
        assert!(getter.test(&method(MethodDto::new("getThing").returning("p.Thing"))));
        assert!(!getter.test(&method(MethodDto::new("get"))));
        assert!(!getter.test(&method(MethodDto::new("getter"))));
        assert!(!getter.test(&method(MethodDto::new("isDeprecated").returning("boolean"))));
        assert!(!getter.test(&method(
            MethodDto::new("isDeprecated").returning("java.lang.Boolean")
        )));
        assert!(getter.test(&method(MethodDto::new("isEnabled").returning("p.Flag"))));
        assert!(!getter.test(&method(MethodDto::new("is").returning("p.Flag"))));
        assert!(!getter.test(&method(MethodDto::new("isolate").returning("p.Flag"))));
        assert!(!getter.test(&method(
            MethodDto::new("getThing").with_parameters(["int"])
        )));
        assert!(!getter.test(&method(
            MethodDto::new("getThing").with_modifiers([Modifier::Public, Modifier::Static])
        )));
        assert!(!getter.test(&method(MethodDto::new("thing"))));
        assert_eq!(getter.description(), "getter");
    }

    #[test]
    fn getter_case_rule_is_unicode_aware() {
        let getter = a_getter();
        assert!(getter.test(&method(MethodDto::new("getÉtat"))));
        assert!(!getter.test(&method(MethodDto::new("getétat"))));
        assert!(getter.test(&method(MethodDto::new("get_value"))));
        assert!(getter.test(&method(MethodDto::new("get2"))));
    }

    #[test]
    fn raw_types() {
        let graph = ClassGraph::from_document(
            ModelDocument::new().with_class(
                ClassDto::new("p.A")
                    .with_field(FieldDto::new("value", "java.util.Optional"))
                    .with_method(MethodDto::new("set").with_parameters(["java.util.Optional"])),
            ),
        )
        .unwrap();
        let class = graph.get("p.A").unwrap();
        assert!(have_raw_type("java.util.Optional").test(&class.fields()[0]));
        assert!(have_raw_parameter_types(["java.util.Optional"]).test(&class.methods()[0]));
        assert!(!have_raw_parameter_types(Vec::<String>::new()).test(&class.methods()[0]));
        assert!(name::<JavaMethod>("set").test(&class.methods()[0]));
        assert!(modifier::<JavaField>(Modifier::Private).test(&class.fields()[0]));
        assert_eq!(
            modifier::<JavaField>(Modifier::Private).description(),
            "modifier PRIVATE"
        );
    }

    #[test]
    fn owner_predicates() {
        let set = method(MethodDto::new("set"));
        let in_a = declared_in_class_that::<JavaMethod>(crate::predicates::class::simple_name("A"));
        assert!(in_a.test(&set));
        assert_eq!(in_a.description(), "declared in class that simple name 'A'");
        assert!(!declared_in_class("p.B").test(&set));
    }
}
