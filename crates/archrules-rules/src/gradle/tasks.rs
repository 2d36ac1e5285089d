//! Task implementation rules: lazy properties, task actions, declared
//! inputs and outputs, and build cache relocatability.

use archrules_core::condition::conditions::have_modifier;
use archrules_core::model::{
    CanBeAnnotated, Entity, HasName, JavaAccess, JavaClass, JavaField, JavaMethod, Modifier,
};
use archrules_core::predicate::{are, not};
use archrules_core::predicates::class::simple_name;
use archrules_core::predicates::member::{a_getter, declared_in, declared_in_class};
use archrules_core::predicates::annotated_with;
use archrules_core::rule::{self, Priority, Rule, RuleError};
use archrules_core::{ArchCondition, DescribedPredicate, ViolationEvent};

use super::predicates::{
    all_fields, all_methods, annotated_with_file_input, concrete_subtypes_of,
    has_input_output_annotation, is_provider_api_type, rich_property_getters, tasks,
    CACHEABLE_TASK, DEFAULT_TASK, INPUT_DIRECTORY, INPUT_FILE, OUTPUT_DIRECTORY, OUTPUT_FILE,
    PATH_SENSITIVE, PROJECT, TASK, TASK_ACTION,
};

const LAZY_CONFIGURATION_DOCS: &str = "https://docs.gradle.org/current/userguide/lazy_configuration.html";

/// Plain types that task inputs and outputs should wrap in a Provider API type.
const TYPES_REQUIRING_PROVIDER: [&str; 10] = [
    "java.lang.String",
    "java.lang.Integer",
    "java.lang.Long",
    "java.lang.Boolean",
    "java.lang.Double",
    "java.lang.Float",
    "java.io.File",
    "java.util.List",
    "java.util.Set",
    "java.util.Map",
];

fn requires_provider(class: &JavaClass) -> bool {
    TYPES_REQUIRING_PROVIDER.contains(&class.name()) && !is_provider_api_type(class)
}

/// Lazy replacement for a plain property type, refined by the file or
/// directory annotation on the member.
fn recommendation(type_: &JavaClass, member: &impl CanBeAnnotated) -> String {
    let annotated = |names: [&str; 2]| names.iter().any(|n| member.is_annotated_with(n));
    match type_.name() {
        "java.io.File" if annotated([INPUT_FILE, OUTPUT_FILE]) => "RegularFileProperty".to_string(),
        "java.io.File" if annotated([INPUT_DIRECTORY, OUTPUT_DIRECTORY]) => {
            "DirectoryProperty".to_string()
        }
        "java.io.File" => "RegularFileProperty or DirectoryProperty".to_string(),
        "java.util.List" => "ListProperty<T>".to_string(),
        "java.util.Set" => "SetProperty<T>".to_string(),
        "java.util.Map" => "MapProperty<K, V>".to_string(),
        _ => format!("Property<{}>", type_.simple_name()),
    }
}

fn use_provider_api_for_input_output_properties() -> ArchCondition<JavaClass> {
    ArchCondition::new(
        "use Provider API for input/output properties",
        |task: &JavaClass| {
            let io = has_input_output_annotation::<JavaField>();
            let mut events: Vec<ViolationEvent> = all_fields(task)
                .into_iter()
                .filter(|f| io.test(f) && requires_provider(&f.raw_type()))
                .map(|f| {
                    let type_ = f.raw_type();
                    let message = format!(
                        "Task {} has field '{}' of type {} with input/output annotation. \
                         Use {} for lazy configuration.",
                        task.simple_name(),
                        f.name(),
                        type_.simple_name(),
                        recommendation(&type_, &f)
                    );
                    ViolationEvent::violated(f.subject(), message)
                })
                .collect();

            let io = has_input_output_annotation::<JavaMethod>();
            let getter = a_getter();
            events.extend(
                all_methods(task)
                    .into_iter()
                    .filter(|m| io.test(m) && getter.test(m) && requires_provider(&m.return_type()))
                    .map(|m| {
                        let type_ = m.return_type();
                        let message = format!(
                            "Task {} has getter '{}()' returning type {} with input/output annotation. \
                             Use {} for lazy configuration.",
                            task.simple_name(),
                            m.name(),
                            type_.simple_name(),
                            recommendation(&type_, &m)
                        );
                        ViolationEvent::violated(m.subject(), message)
                    }),
            );
            events
        },
    )
}

/// Task inputs and outputs use lazy property types.
///
/// # Errors
///
/// Returns an error if the rule definition is invalid.
pub fn provider_properties() -> Result<Rule, RuleError> {
    rule::priority(Priority::Medium)
        .classes()
        .that(tasks())
        .should(use_provider_api_for_input_output_properties())
        .allow_empty_should(true)
        .because(format!(
            "Task input/output properties should use Provider API types (Property<T>, RegularFileProperty, \
             DirectoryProperty, ConfigurableFileCollection) instead of plain types. \
             This enables lazy configuration and configuration avoidance, which significantly improves build performance. \
             See {LAZY_CONFIGURATION_DOCS}"
        ))
        .build()
}

fn task_property_getters() -> DescribedPredicate<JavaMethod> {
    rich_property_getters()
        .and(not(annotated_with("org.gradle.api.tasks.options.OptionValues")))
        .and(declared_in(tasks()))
        .and(not(declared_in_class(TASK)))
        .and(not(declared_in_class(DEFAULT_TASK)))
        .and(not(declared_in_class("org.gradle.api.internal.AbstractTask")))
        .described_as("task property getters")
}

/// Lazy task property getters are abstract so Gradle can generate them.
///
/// # Errors
///
/// Returns an error if the rule definition is invalid.
pub fn abstract_getters() -> Result<Rule, RuleError> {
    rule::priority(Priority::Medium)
        .methods()
        .that(are(task_property_getters()))
        .should(have_modifier::<JavaMethod>(Modifier::Abstract))
        .allow_empty_should(true)
        .because("task implementations should define properties as abstract getters")
        .build()
}

/// `not access <display>`: any access whose owner is `type_name`, a
/// `getter` call on a task, or a field access of that type.
fn not_access(display: &'static str, type_name: &'static str, getter: &'static str) -> ArchCondition<JavaMethod> {
    let matches = move |access: &JavaAccess| {
        let owner = access.target_owner();
        let target = access.target();
        owner.name() == type_name
            || (target.name() == getter && (owner.is_assignable_to(TASK) || owner.is_assignable_to(DEFAULT_TASK)))
            || (access.kind().is_field_access()
                && target.raw_type().is_some_and(|t| t.is_assignable_to(type_name)))
    };
    ArchCondition::new(format!("not access {display}"), move |method: &JavaMethod| {
        method
            .accesses()
            .into_iter()
            .filter(|a| matches(a))
            .map(|a| {
                let message = format!(
                    "Method {}.{}() accesses {display} at {}",
                    method.owner().simple_name(),
                    method.name(),
                    a.description()
                );
                ViolationEvent::violated(a.subject(), message)
            })
            .collect()
    })
}

fn task_actions() -> DescribedPredicate<JavaMethod> {
    annotated_with(TASK_ACTION).described_as("are annotated with @TaskAction")
}

/// `@TaskAction` methods do not touch `Project`.
///
/// # Errors
///
/// Returns an error if the rule definition is invalid.
pub fn task_project_access() -> Result<Rule, RuleError> {
    rule::priority(Priority::Medium)
        .methods()
        .that(task_actions())
        .should(not_access("Project", PROJECT, "getProject"))
        .allow_empty_should(true)
        .because(
            "Accessing Project in @TaskAction methods breaks configuration cache and will be removed in Gradle 10. \
             Move Project access to task configuration time and use task inputs/properties instead. \
             See https://docs.gradle.org/9.2.0/userguide/upgrading_version_7.html#task_project",
        )
        .build()
}

/// `@TaskAction` methods do not query task dependencies.
///
/// # Errors
///
/// Returns an error if the rule definition is invalid.
pub fn task_dependencies() -> Result<Rule, RuleError> {
    rule::priority(Priority::Medium)
        .methods()
        .that(task_actions())
        .should(not_access(
            "TaskDependency",
            "org.gradle.api.tasks.TaskDependency",
            "getTaskDependencies",
        ))
        .allow_empty_should(true)
        .because(
            "Calling getTaskDependencies() in @TaskAction methods breaks configuration cache and will be removed in Gradle 10. \
             Declare task dependencies at configuration time instead. \
             See https://docs.gradle.org/9.2.0/userguide/upgrading_version_7.html#task_dependencies",
        )
        .build()
}

fn declare_inputs_or_outputs() -> ArchCondition<JavaClass> {
    ArchCondition::new("declare at least one input or output", |task: &JavaClass| {
        let methods = all_methods(task);
        if !methods.iter().any(|m| m.is_annotated_with(TASK_ACTION)) {
            return Vec::new();
        }
        let field_io = has_input_output_annotation::<JavaField>();
        let method_io = has_input_output_annotation::<JavaMethod>();
        if all_fields(task).iter().any(|f| field_io.test(f)) || methods.iter().any(|m| method_io.test(m)) {
            return Vec::new();
        }
        let message = format!(
            "Task {} has @TaskAction method(s) but no declared inputs or outputs. \
             Add @Input, @InputFile, @InputDirectory, @Output, @OutputFile, or @OutputDirectory \
             annotations to enable incremental builds and caching.",
            task.simple_name()
        );
        vec![ViolationEvent::violated(task.subject(), message)]
    })
}

/// Tasks with actions declare at least one input or output.
///
/// # Errors
///
/// Returns an error if the rule definition is invalid.
pub fn inputs_outputs() -> Result<Rule, RuleError> {
    rule::priority(Priority::High)
        .classes()
        .that(concrete_subtypes_of(DEFAULT_TASK))
        .that(not(simple_name("DefaultTask")).described_as("do not have simple name 'DefaultTask'"))
        .should(declare_inputs_or_outputs())
        .allow_empty_should(true)
        .because(
            "Tasks must declare inputs and outputs using @Input, @InputFile, @InputDirectory, \
             @Output, @OutputFile, or @OutputDirectory annotations. \
             This is required for incremental builds and caching to work correctly. \
             See https://docs.gradle.org/current/userguide/incremental_build.html",
        )
        .build()
}

const PATH_SENSITIVITY_REASON: &str = "Cacheable tasks with file inputs must declare @PathSensitive to specify how paths \
     affect cache keys. This ensures build cache entries are relocatable across machines. \
     See https://docs.gradle.org/current/userguide/build_cache.html#sec:task_output_caching_inputs";

/// `declare @PathSensitive on file input <members>` over `M` in the hierarchy.
fn declare_path_sensitivity<M>(
    members: fn(&JavaClass) -> Vec<M>,
    label: &'static str,
) -> ArchCondition<JavaClass>
where
    M: CanBeAnnotated + Entity + HasName + 'static,
{
    ArchCondition::new(
        format!("declare @PathSensitive on file input {label}s"),
        move |task: &JavaClass| {
            let file_input = annotated_with_file_input::<M>();
            members(task)
                .into_iter()
                .filter(|m| file_input.test(m) && !m.is_annotated_with(PATH_SENSITIVE))
                .map(|m| {
                    let shown = if label == "method" {
                        format!("{}()", m.name())
                    } else {
                        m.name().to_string()
                    };
                    let message = format!(
                        "Cacheable task {} has {label} '{shown}' with file input annotation but missing @PathSensitive. \
                         Add @PathSensitive to specify how file paths affect cache keys.",
                        task.simple_name()
                    );
                    ViolationEvent::violated(m.subject(), message)
                })
                .collect()
        },
    )
}

fn cacheable_tasks() -> DescribedPredicate<JavaClass> {
    are(annotated_with(CACHEABLE_TASK))
}

/// File input fields of cacheable tasks are `@PathSensitive`.
///
/// # Errors
///
/// Returns an error if the rule definition is invalid.
pub fn fields_path_sensitivity() -> Result<Rule, RuleError> {
    rule::priority(Priority::High)
        .classes()
        .that(cacheable_tasks())
        .should(declare_path_sensitivity(all_fields, "field"))
        .allow_empty_should(true)
        .because(PATH_SENSITIVITY_REASON)
        .build()
}

/// File input getters of cacheable tasks are `@PathSensitive`.
///
/// # Errors
///
/// Returns an error if the rule definition is invalid.
pub fn methods_path_sensitivity() -> Result<Rule, RuleError> {
    rule::priority(Priority::High)
        .classes()
        .that(cacheable_tasks())
        .should(declare_path_sensitivity(all_methods, "method"))
        .allow_empty_should(true)
        .because(PATH_SENSITIVITY_REASON)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use archrules_core::model::{AccessDto, AnnotationDto, ClassDto, ClassGraph, FieldDto, MethodDto, ModelDocument};

    fn annotated(name: &str) -> AnnotationDto {
        AnnotationDto::new(name)
    }

    fn task(name: &str) -> ClassDto {
        ClassDto::new(name).extending(DEFAULT_TASK)
    }

    fn action() -> MethodDto {
        MethodDto::new("run").with_annotation(annotated(TASK_ACTION))
    }

    fn graph(classes: impl IntoIterator<Item = ClassDto>) -> ClassGraph {
        let document = classes
            .into_iter()
            .fold(ModelDocument::new(), ModelDocument::with_class);
        ClassGraph::from_document(document).unwrap()
    }

    #[test]
    fn plain_input_types_get_specific_advice() {
        let g = graph([task("app.Copy")
            .with_field(FieldDto::new("source", "java.io.File").with_annotation(annotated(INPUT_FILE)))
            .with_field(FieldDto::new("names", "java.util.List").with_annotation(annotated(
                "org.gradle.api.tasks.Input",
            )))
            .with_field(FieldDto::new("untracked", "java.lang.String"))
            .with_field(
                FieldDto::new("target", "org.gradle.api.file.DirectoryProperty")
                    .with_annotation(annotated(OUTPUT_DIRECTORY)),
            )
            .with_method(
                MethodDto::new("getLevel")
                    .returning("java.lang.Integer")
                    .with_annotation(annotated("org.gradle.api.tasks.Input")),
            )]);

        let result = provider_properties().unwrap().evaluate(&g);
        assert_eq!(
            result.messages(),
            [
                "Task Copy has field 'source' of type File with input/output annotation. Use RegularFileProperty for lazy configuration.",
                "Task Copy has field 'names' of type List with input/output annotation. Use ListProperty<T> for lazy configuration.",
                "Task Copy has getter 'getLevel()' returning type Integer with input/output annotation. Use Property<Integer> for lazy configuration.",
            ]
        );
    }

    #[test]
    fn lazy_getters_must_be_abstract() {
        let g = graph([
            task("app.Lazy")
                .with_method(MethodDto::new("getOutput").returning("org.gradle.api.file.RegularFileProperty"))
                .with_method(
                    MethodDto::new("getInput")
                        .returning("org.gradle.api.provider.Property")
                        .with_modifiers([Modifier::Public, Modifier::Abstract]),
                )
                .with_method(
                    MethodDto::new("getObjects")
                        .returning("org.gradle.api.provider.Provider")
                        .with_annotation(annotated("javax.inject.Inject")),
                ),
            ClassDto::new("app.NotATask")
                .with_method(MethodDto::new("getValue").returning("org.gradle.api.provider.Property")),
        ]);

        let result = abstract_getters().unwrap().evaluate(&g);
        let subjects: Vec<&str> = result.violations.iter().map(|v| v.subject().name.as_str()).collect();
        assert_eq!(subjects, ["app.Lazy.getOutput()"]);
    }

    #[test]
    fn task_actions_must_not_reach_project() {
        let g = graph([
            task("app.Deploy").with_method(
                action()
                    .with_access(AccessDto::call("app.Deploy", "getProject").at_line(12))
                    .with_access(AccessDto::call(PROJECT, "getName").at_line(13)),
            ),
            task("app.Clean").with_method(action().with_access(AccessDto::call("app.Clean", "getName"))),
        ]);

        let result = task_project_access().unwrap().evaluate(&g);
        assert_eq!(
            result.messages(),
            [
                "Method Deploy.run() accesses Project at Method <app.Deploy.run()> calls method <app.Deploy.getProject()> in (Deploy.java:12)",
                "Method Deploy.run() accesses Project at Method <app.Deploy.run()> calls method <org.gradle.api.Project.getName()> in (Deploy.java:13)",
            ]
        );
        assert!(!task_dependencies().unwrap().evaluate(&g).has_violation());
    }

    #[test]
    fn task_actions_need_inputs_or_outputs() {
        let g = graph([
            task("app.Silent").with_method(action()),
            task("app.Declared")
                .with_method(action())
                .with_field(FieldDto::new("out", "org.gradle.api.file.RegularFileProperty").with_annotation(annotated(OUTPUT_FILE))),
            task("app.Configuring"),
        ]);

        let result = inputs_outputs().unwrap().evaluate(&g);
        assert_eq!(result.violations.len(), 1);
        assert!(result.messages()[0].starts_with("Task Silent has @TaskAction method(s)"));
        assert_eq!(result.priority, Priority::High);
    }

    #[test]
    fn cacheable_file_inputs_need_path_sensitivity() {
        let g = graph([
            task("app.Compile")
                .with_annotation(annotated(CACHEABLE_TASK))
                .with_field(FieldDto::new("sources", "org.gradle.api.file.ConfigurableFileCollection").with_annotation(annotated(INPUT_FILE)))
                .with_method(MethodDto::new("getClasspath").with_annotation(annotated("org.gradle.api.tasks.InputFiles")))
                .with_method(
                    MethodDto::new("getConfig")
                        .with_annotation(annotated(INPUT_FILE))
                        .with_annotation(annotated(PATH_SENSITIVE)),
                ),
            task("app.Uncached")
                .with_field(FieldDto::new("sources", "java.io.File").with_annotation(annotated(INPUT_FILE))),
        ]);

        assert_eq!(
            fields_path_sensitivity().unwrap().evaluate(&g).messages(),
            ["Cacheable task Compile has field 'sources' with file input annotation but missing @PathSensitive. \
              Add @PathSensitive to specify how file paths affect cache keys."]
        );
        assert_eq!(
            methods_path_sensitivity().unwrap().evaluate(&g).messages(),
            ["Cacheable task Compile has method 'getClasspath()' with file input annotation but missing @PathSensitive. \
              Add @PathSensitive to specify how file paths affect cache keys."]
        );
    }
}
