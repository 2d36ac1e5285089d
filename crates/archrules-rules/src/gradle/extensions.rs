//! Plugin extension rules.
//!
//! Extensions are classes named `*Extension` that plugin code uses within
//! two hops (see [`archrules_core::reachability`]). Naming alone is not
//! enough: a `FooExtension` nothing in a plugin touches is not checked.

use archrules_core::condition::conditions::have_modifier;
use archrules_core::model::{Entity, JavaClass, JavaMethod, Modifier};
use archrules_core::predicate::are;
use archrules_core::predicates::member::{a_getter, declared_in};
use archrules_core::rule::{self, Priority, Rule, RuleError};
use archrules_core::{ArchCondition, ViolationEvent};

use super::predicates::{all_fields, is_provider_api_type, plugin_extension_class, rich_property_getters};

/// Plain types extension properties should wrap in a Provider API type.
const TYPES_REQUIRING_PROVIDER: [&str; 6] = [
    "java.lang.String",
    "java.lang.Integer",
    "java.lang.Long",
    "java.lang.Boolean",
    "java.util.List",
    "java.util.Set",
];

fn should_use_provider_api(class: &JavaClass) -> bool {
    TYPES_REQUIRING_PROVIDER.contains(&class.name()) && !is_provider_api_type(class)
}

fn use_provider_api_for_properties() -> ArchCondition<JavaClass> {
    ArchCondition::new("use Provider API for properties", |extension: &JavaClass| {
        let mut events: Vec<ViolationEvent> = all_fields(extension)
            .into_iter()
            .filter(|f| !f.has_modifier(Modifier::Static) && should_use_provider_api(&f.raw_type()))
            .map(|f| {
                let type_name = f.raw_type().simple_name().to_string();
                let message = format!(
                    "Extension {} has field '{}' of type {type_name}. Use Property<{type_name}> for lazy configuration.",
                    extension.simple_name(),
                    f.name()
                );
                ViolationEvent::violated(f.subject(), message)
            })
            .collect();

        let getter = a_getter();
        events.extend(
            extension
                .methods()
                .into_iter()
                .filter(|m| getter.test(m) && should_use_provider_api(&m.return_type()))
                .map(|m| {
                    let type_name = m.return_type().simple_name().to_string();
                    let message = format!(
                        "Extension {} has getter '{}()' returning type {type_name}. Use Property<{type_name}> for lazy configuration.",
                        extension.simple_name(),
                        m.name()
                    );
                    ViolationEvent::violated(m.subject(), message)
                }),
        );
        events
    })
}

/// Extension properties use lazy property types.
///
/// # Errors
///
/// Returns an error if the rule definition is invalid.
pub fn properties_use_provider_api() -> Result<Rule, RuleError> {
    rule::priority(Priority::Medium)
        .classes()
        .that(are(plugin_extension_class()))
        .should(use_provider_api_for_properties())
        .allow_empty_should(true)
        .because(
            "Plugin extension properties should use Provider API types (Property<T>, ListProperty<T>, \
             SetProperty<T>) instead of plain mutable types. \
             This enables lazy configuration and better integration with Gradle's configuration system. \
             See https://docs.gradle.org/current/userguide/lazy_configuration.html",
        )
        .build()
}

/// Lazy extension getters are abstract.
///
/// # Errors
///
/// Returns an error if the rule definition is invalid.
pub fn abstract_getters() -> Result<Rule, RuleError> {
    let getters = rich_property_getters()
        .and(declared_in::<JavaMethod>(plugin_extension_class()))
        .described_as("extension property getters");
    rule::priority(Priority::Medium)
        .methods()
        .that(are(getters))
        .should(have_modifier::<JavaMethod>(Modifier::Abstract))
        .allow_empty_should(true)
        .because(
            "Extension property getters returning Provider API types should be abstract. \
             This allows Gradle to generate the implementation at runtime. \
             See https://docs.gradle.org/current/userguide/custom_plugins.html#sec:implementing_an_extension",
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradle::predicates::PLUGIN;
    use archrules_core::model::{AccessDto, ClassDto, ClassGraph, FieldDto, MethodDto, ModelDocument};

    fn graph() -> ClassGraph {
        ClassGraph::from_document(
            ModelDocument::new()
                .with_class(ClassDto::new("app.GreetingPlugin").implementing(PLUGIN).with_method(
                    MethodDto::new("apply")
                        .with_access(AccessDto::construct("app.GreetingExtension"))
                        .with_access(AccessDto::call("app.Wiring", "connect")),
                ))
                .with_class(
                    ClassDto::new("app.GreetingExtension")
                        .with_field(FieldDto::new("message", "java.lang.String"))
                        .with_field(FieldDto::new("enabled", "org.gradle.api.provider.Property"))
                        .with_field(
                            FieldDto::new("DEFAULT", "java.lang.String")
                                .with_modifiers([Modifier::Public, Modifier::Static, Modifier::Final]),
                        )
                        .with_method(MethodDto::new("getRecipients").returning("java.util.List"))
                        .with_method(MethodDto::new("getGreeting").returning("org.gradle.api.provider.Property")),
                )
                .with_class(ClassDto::new("app.Wiring").with_method(
                    MethodDto::new("connect").with_access(AccessDto::construct("app.NestedExtension")),
                ))
                .with_class(
                    ClassDto::new("app.NestedExtension")
                        .with_method(
                            MethodDto::new("getTarget")
                                .returning("org.gradle.api.file.DirectoryProperty")
                                .with_modifiers([Modifier::Public, Modifier::Abstract]),
                        ),
                )
                .with_class(
                    ClassDto::new("app.UnusedExtension")
                        .with_field(FieldDto::new("message", "java.lang.String")),
                ),
        )
        .unwrap()
    }

    #[test]
    fn plain_extension_properties() {
        let result = properties_use_provider_api().unwrap().evaluate(&graph());
        assert_eq!(
            result.messages(),
            [
                "Extension GreetingExtension has field 'message' of type String. Use Property<String> for lazy configuration.",
                "Extension GreetingExtension has getter 'getRecipients()' returning type List. Use Property<List> for lazy configuration.",
            ]
        );
    }

    #[test]
    fn lazy_extension_getters_are_abstract() {
        let result = abstract_getters().unwrap().evaluate(&graph());
        let subjects: Vec<&str> = result.violations.iter().map(|v| v.subject().name.as_str()).collect();
        assert_eq!(subjects, ["app.GreetingExtension.getGreeting()"]);
    }
}
