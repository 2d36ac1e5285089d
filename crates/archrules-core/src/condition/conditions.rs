//! Ready-made conditions for rule bodies.

use super::{AnyDependencyCondition, AnyMatchCondition, ArchCondition};
use crate::model::{
    AccessKind, CanBeAnnotated, Dependency, Entity, HasModifiers, JavaAccess, JavaClass,
    JavaField, JavaMethod, Modifier,
};
use crate::predicate::DescribedPredicate;
use crate::predicates::{self, dependency, member};

/// Any direct dependency from the class satisfies `predicate`.
#[must_use]
pub fn have_any_dependencies_that(
    predicate: DescribedPredicate<Dependency>,
) -> AnyDependencyCondition {
    AnyMatchCondition::new(
        format!("have any dependencies that {}", predicate.description()),
        predicate,
        JavaClass::direct_dependencies_from_self,
    )
}

/// Any direct dependency targets a class satisfying `predicate`.
#[must_use]
pub fn depend_on_classes_that(predicate: DescribedPredicate<JavaClass>) -> AnyDependencyCondition {
    let description = format!("depend on classes that {}", predicate.description());
    have_any_dependencies_that(dependency::target_class(predicate)).described_as(description)
}

/// Any access from the class satisfies `predicate`.
#[must_use]
pub fn access_target_where(
    predicate: DescribedPredicate<JavaAccess>,
) -> AnyMatchCondition<JavaAccess> {
    AnyMatchCondition::new(
        format!("access target where {}", predicate.description()),
        predicate,
        JavaClass::accesses_from_self,
    )
}

/// Any method call or method reference from the class satisfies `predicate`.
#[must_use]
pub fn call_method_where(
    predicate: DescribedPredicate<JavaAccess>,
) -> AnyMatchCondition<JavaAccess> {
    AnyMatchCondition::new(
        format!("call method where {}", predicate.description()),
        predicate,
        |class: &JavaClass| accesses_of(class, |k| !k.is_field_access() && !k.is_constructor()),
    )
}

/// Any constructor call or reference from the class satisfies `predicate`.
#[must_use]
pub fn call_constructor_where(
    predicate: DescribedPredicate<JavaAccess>,
) -> AnyMatchCondition<JavaAccess> {
    AnyMatchCondition::new(
        format!("call constructor where {}", predicate.description()),
        predicate,
        |class: &JavaClass| accesses_of(class, AccessKind::is_constructor),
    )
}

/// Calls `owner.name(parameters)` with `owner` matched exactly.
#[must_use]
pub fn call_method(owner: &str, name: &str, parameters: &[&str]) -> AnyMatchCondition<JavaAccess> {
    let signature = format!("{owner}.{name}({})", parameters.join(", "));
    let owner = owner.to_string();
    let name = name.to_string();
    let parameters: Vec<String> = parameters.iter().map(ToString::to_string).collect();
    let matcher = DescribedPredicate::new(signature.clone(), move |a: &JavaAccess| {
        let target = a.target();
        target.owner().name() == owner
            && target.name() == name
            && target.parameter_type_names() == parameters
    });
    call_method_where(matcher).described_as(format!("call method {signature}"))
}

fn accesses_of(class: &JavaClass, kind: impl Fn(AccessKind) -> bool) -> Vec<JavaAccess> {
    class
        .accesses_from_self()
        .into_iter()
        .filter(|a| kind(a.kind()))
        .collect()
}

/// `have modifier <m>`.
#[must_use]
pub fn have_modifier<T>(modifier: Modifier) -> ArchCondition<T>
where
    T: Entity + HasModifiers + 'static,
{
    ArchCondition::have(predicates::modifier(modifier))
}

/// `be annotated with @<type>`.
#[must_use]
pub fn be_annotated_with<T>(type_name: &str) -> ArchCondition<T>
where
    T: Entity + CanBeAnnotated + 'static,
{
    ArchCondition::be(predicates::annotated_with(type_name))
}

/// `have raw type <type>` for fields.
#[must_use]
pub fn have_raw_type(type_name: &str) -> ArchCondition<JavaField> {
    let predicate = member::have_raw_type(type_name).described_as(format!("raw type {type_name}"));
    ArchCondition::have(predicate)
}

/// `have raw parameter types [..]` for code units.
#[must_use]
pub fn have_raw_parameter_types<I, S>(types: I) -> ArchCondition<JavaMethod>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let types: Vec<String> = types.into_iter().map(Into::into).collect();
    let description = format!("raw parameter types [{}]", types.join(", "));
    ArchCondition::have(member::have_raw_parameter_types(types).described_as(description))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::{never, ViolationEvent};
    use crate::model::{AccessDto, ClassDto, ClassGraph, FieldDto, MethodDto, ModelDocument};
    use crate::predicates::access::target_owner;
    use crate::predicates::class::{reside_in_a_package, simple_name};

    fn graph() -> ClassGraph {
        ClassGraph::from_document(
            ModelDocument::new()
                .with_class(
                    ClassDto::new("app.Service")
                        .with_field(FieldDto::new("count", "int"))
                        .with_method(
                            MethodDto::new("run")
                                .with_access(AccessDto::construct("lib.Client").at_line(3))
                                .with_access(
                                    AccessDto::call("lib.Client", "send")
                                        .with_parameters(["java.lang.String"])
                                        .at_line(4),
                                )
                                .with_access(AccessDto::get_field("lib.Client", "TIMEOUT").at_line(5)),
                        ),
                )
                .with_class(ClassDto::new("app.Idle")),
        )
        .unwrap()
    }

    fn messages(condition: &ArchCondition<JavaClass>, class: &str) -> Vec<String> {
        condition
            .check(&graph().get(class).unwrap())
            .into_iter()
            .filter(ViolationEvent::is_violation)
            .flat_map(|e| e.messages().to_vec())
            .collect()
    }

    #[test]
    fn access_kinds_are_separated() {
        let to_lib = || target_owner(reside_in_a_package("lib.."));
        let calls = never(ArchCondition::from(call_method_where(to_lib())));
        assert_eq!(
            messages(&calls, "app.Service"),
            vec!["Method <app.Service.run()> calls method <lib.Client.send(java.lang.String)> in (Service.java:4)"]
        );
        let constructors = never(ArchCondition::from(call_constructor_where(to_lib())));
        assert_eq!(messages(&constructors, "app.Service").len(), 1);
        let all = never(ArchCondition::from(access_target_where(to_lib())));
        assert_eq!(messages(&all, "app.Service").len(), 3);
    }

    #[test]
    fn call_method_matches_exact_signature() {
        let exact = call_method("lib.Client", "send", &["java.lang.String"]);
        assert_eq!(exact.description(), "call method lib.Client.send(java.lang.String)");
        assert_eq!(messages(&never(ArchCondition::from(exact)), "app.Service").len(), 1);
        let other = call_method("lib.Client", "send", &[]);
        assert!(messages(&never(ArchCondition::from(other)), "app.Service").is_empty());
    }

    #[test]
    fn depend_on_classes_that_describes_itself() {
        let c = depend_on_classes_that(simple_name("Client"));
        assert_eq!(c.description(), "depend on classes that simple name 'Client'");
        assert!(messages(&never(ArchCondition::from(c.clone())), "app.Idle").is_empty());
        assert!(!messages(&never(ArchCondition::from(c)), "app.Service").is_empty());
    }

    #[test]
    fn member_conditions_phrase_messages() {
        let g = graph();
        let field = g.get("app.Service").unwrap().fields().remove(0);
        let c = have_modifier::<JavaField>(Modifier::Final);
        assert_eq!(c.description(), "have modifier FINAL");
        assert_eq!(
            c.check(&field)[0].messages(),
            ["Field <app.Service.count> does not have modifier FINAL"]
        );
        assert!(!have_raw_type("int").check(&field)[0].is_violation());

        let method = g.get("app.Service").unwrap().methods().remove(0);
        let annotated = be_annotated_with::<JavaMethod>("org.junit.jupiter.api.Test");
        assert_eq!(
            annotated.check(&method)[0].messages(),
            ["Method <app.Service.run()> is not annotated with @Test"]
        );
        assert!(!have_raw_parameter_types(Vec::<String>::new()).check(&method)[0].is_violation());
    }
}
