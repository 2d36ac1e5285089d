//! Plugin implementation rules: configuration avoidance, service injection
//! and configuration cache compatibility.

use archrules_core::condition::conditions::call_method_where;
use archrules_core::model::{Entity, JavaAccess, JavaClass};
use archrules_core::predicate::not;
use archrules_core::predicates::access::{calls_method_on_any, target_owner};
use archrules_core::predicates::class::assignable_to;
use archrules_core::rule::{self, Priority, Rule, RuleError};
use archrules_core::{ArchCondition, DescribedPredicate, ViolationEvent};

use super::predicates::{all_fields, calls_method_on, plugins, PROJECT, TASK_COLLECTION, TASK_CONTAINER};

const TASK_CONFIGURATION_AVOIDANCE: &str =
    "https://docs.gradle.org/current/userguide/task_configuration_avoidance.html";

const EAGER_TASK_CREATION_METHODS: [&str; 2] = ["task", "create"];

fn is_eager_task_creation(access: &JavaAccess) -> bool {
    let kind = access.kind();
    if kind.is_field_access() || kind.is_constructor() {
        return false;
    }
    let owner = access.target_owner();
    EAGER_TASK_CREATION_METHODS.contains(&access.target().name())
        && (owner.is_assignable_to(PROJECT) || owner.is_assignable_to(TASK_CONTAINER))
}

fn use_lazy_task_registration() -> ArchCondition<JavaClass> {
    ArchCondition::new(
        "use lazy task registration (tasks.register())",
        |plugin: &JavaClass| {
            plugin
                .accesses_from_self()
                .into_iter()
                .filter(is_eager_task_creation)
                .map(|call| {
                    let target = call.target();
                    let message = format!(
                        "Plugin {} uses eager task creation with {}.{}() at {}. \
                         Use tasks.register() instead for lazy task registration.",
                        plugin.simple_name(),
                        call.target_owner().simple_name(),
                        target.name(),
                        call.description()
                    );
                    ViolationEvent::violated(call.subject(), message)
                })
                .collect()
        },
    )
}

/// Plugins register tasks lazily.
///
/// # Errors
///
/// Returns an error if the rule definition is invalid.
pub fn lazy_task_registration() -> Result<Rule, RuleError> {
    rule::priority(Priority::Medium)
        .classes()
        .that(plugins())
        .should(use_lazy_task_registration())
        .allow_empty_should(true)
        .because(format!(
            "Plugins should use tasks.register() instead of task() or tasks.create() for lazy task registration. \
             Eager task creation runs during configuration phase on EVERY build, significantly impacting performance. \
             Lazy registration with tasks.register() only creates tasks when needed. \
             See {TASK_CONFIGURATION_AVOIDANCE}"
        ))
        .build()
}

/// No plugin calls a method matching `calls`.
fn plugins_never_call(calls: DescribedPredicate<JavaAccess>) -> rule::RuleBuilder<JavaClass> {
    rule::priority(Priority::Medium)
        .no_classes()
        .that(plugins())
        .should(call_method_where(calls))
        .allow_empty_should(true)
}

/// Plugins look tasks up with `named()`.
///
/// # Errors
///
/// Returns an error if the rule definition is invalid.
pub fn use_named_instead_of_get_by_name() -> Result<Rule, RuleError> {
    plugins_never_call(calls_method_on_any("getByName", &[TASK_CONTAINER, TASK_COLLECTION]))
        .because(format!(
            "Plugins should use tasks.named() instead of tasks.getByName() for lazy task lookup. \
             getByName() forces immediate task realization during configuration phase, impacting performance. \
             named() returns a TaskProvider that delays task creation until needed. \
             See {TASK_CONFIGURATION_AVOIDANCE}"
        ))
        .build()
}

/// Plugins configure collections with `configureEach()`.
///
/// `all()` on a configuration container is exempt.
///
/// # Errors
///
/// Returns an error if the rule definition is invalid.
pub fn use_configure_each_instead_of_all() -> Result<Rule, RuleError> {
    let calls_all = calls_method_on_any(
        "all",
        &["org.gradle.api.DomainObjectCollection", TASK_CONTAINER, TASK_COLLECTION],
    )
    .and(not(target_owner(assignable_to(
        "org.gradle.api.artifacts.ConfigurationContainer",
    ))));
    plugins_never_call(calls_all)
        .because(format!(
            "Plugins should use configureEach() instead of all() for lazy task configuration. \
             all() realizes and configures all matching tasks immediately during configuration phase. \
             configureEach() only configures tasks when they are realized. \
             See {TASK_CONFIGURATION_AVOIDANCE}"
        ))
        .build()
}

fn injection_reason(service: &str, getter: &str, parameter: &str) -> String {
    format!(
        "Plugins should inject {service} via constructor instead of calling project.{getter}(). \
         Use @Inject constructor parameter for better testability and to follow Gradle best practices. \
         Example: @Inject public MyPlugin({service} {parameter}) {{ this.{parameter} = {parameter}; }} \
         See https://docs.gradle.org/current/userguide/service_injection.html"
    )
}

/// Plugins inject `ObjectFactory` instead of calling `project.getObjects()`.
///
/// # Errors
///
/// Returns an error if the rule definition is invalid.
pub fn inject_object_factory() -> Result<Rule, RuleError> {
    plugins_never_call(calls_method_on("getObjects", PROJECT))
        .because(injection_reason("ObjectFactory", "getObjects", "objects"))
        .build()
}

/// Plugins inject `ProviderFactory` instead of calling `project.getProviders()`.
///
/// # Errors
///
/// Returns an error if the rule definition is invalid.
pub fn inject_provider_factory() -> Result<Rule, RuleError> {
    plugins_never_call(calls_method_on("getProviders", PROJECT))
        .because(injection_reason("ProviderFactory", "getProviders", "providers"))
        .build()
}

fn not_have_project_fields() -> ArchCondition<JavaClass> {
    ArchCondition::new("not have Project fields", |plugin: &JavaClass| {
        all_fields(plugin)
            .into_iter()
            .filter(|f| f.raw_type().is_assignable_to(PROJECT))
            .map(|f| {
                let message = format!(
                    "Plugin {} has field '{}' of type {}. \
                     Storing Project references breaks configuration cache. \
                     Extract needed values in apply() or use service injection.",
                    plugin.simple_name(),
                    f.name(),
                    f.raw_type().simple_name()
                );
                ViolationEvent::violated(f.subject(), message)
            })
            .collect()
    })
}

/// Plugins keep no `Project` in fields, including inherited ones.
///
/// # Errors
///
/// Returns an error if the rule definition is invalid.
pub fn project_references() -> Result<Rule, RuleError> {
    rule::priority(Priority::High)
        .classes()
        .that(plugins())
        .should(not_have_project_fields())
        .allow_empty_should(true)
        .because(
            "Plugins should not store Project references as fields. \
             This breaks configuration cache and prevents garbage collection. \
             Extract needed values in apply() method or use service injection instead. \
             See https://docs.gradle.org/current/userguide/configuration_cache.html",
        )
        .build()
}
