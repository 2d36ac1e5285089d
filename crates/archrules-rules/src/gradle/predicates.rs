//! Predicates and type tables shared by the Gradle rules.

use archrules_core::hierarchy::{all_members, contain_any_methods_in_class_hierarchy_that};
use archrules_core::model::{CanBeAnnotated, JavaAccess, JavaClass, JavaField, JavaMethod, Modifier};
use archrules_core::predicate::{are, not};
use archrules_core::predicates::access::calls_method_on_any;
use archrules_core::predicates::class::{assignable_to, interfaces, simple_name_ending_with};
use archrules_core::predicates::member::{a_getter, raw_return_type};
use archrules_core::predicates::{annotated_with, annotated_with_any, modifier};
use archrules_core::reachability::referenced_from;
use archrules_core::DescribedPredicate;

pub(crate) const PLUGIN: &str = "org.gradle.api.Plugin";
pub(crate) const PROJECT: &str = "org.gradle.api.Project";
pub(crate) const TASK: &str = "org.gradle.api.Task";
pub(crate) const DEFAULT_TASK: &str = "org.gradle.api.DefaultTask";
pub(crate) const TASK_CONTAINER: &str = "org.gradle.api.tasks.TaskContainer";
pub(crate) const TASK_COLLECTION: &str = "org.gradle.api.tasks.TaskCollection";
pub(crate) const TASK_ACTION: &str = "org.gradle.api.tasks.TaskAction";
pub(crate) const JAVAX_INJECT: &str = "javax.inject.Inject";

pub(crate) const INPUT: &str = "org.gradle.api.tasks.Input";
pub(crate) const INPUT_FILE: &str = "org.gradle.api.tasks.InputFile";
pub(crate) const INPUT_FILES: &str = "org.gradle.api.tasks.InputFiles";
pub(crate) const INPUT_DIRECTORY: &str = "org.gradle.api.tasks.InputDirectory";
pub(crate) const OUTPUT_FILE: &str = "org.gradle.api.tasks.OutputFile";
pub(crate) const OUTPUT_FILES: &str = "org.gradle.api.tasks.OutputFiles";
pub(crate) const OUTPUT_DIRECTORY: &str = "org.gradle.api.tasks.OutputDirectory";
pub(crate) const OUTPUT_DIRECTORIES: &str = "org.gradle.api.tasks.OutputDirectories";
pub(crate) const CACHEABLE_TASK: &str = "org.gradle.api.tasks.CacheableTask";
pub(crate) const PATH_SENSITIVE: &str = "org.gradle.api.tasks.PathSensitive";

pub(crate) const INPUT_OUTPUT_ANNOTATIONS: [&str; 8] = [
    INPUT,
    INPUT_FILE,
    INPUT_FILES,
    INPUT_DIRECTORY,
    OUTPUT_FILE,
    OUTPUT_FILES,
    OUTPUT_DIRECTORY,
    OUTPUT_DIRECTORIES,
];

pub(crate) const FILE_INPUT_ANNOTATIONS: [&str; 3] = [INPUT_FILE, INPUT_FILES, INPUT_DIRECTORY];

/// Lazy types; a member of any of these (or a subtype) is already lazy.
const PROVIDER_API_TYPES: [&str; 9] = [
    "org.gradle.api.provider.Property",
    "org.gradle.api.provider.Provider",
    "org.gradle.api.provider.ListProperty",
    "org.gradle.api.provider.SetProperty",
    "org.gradle.api.provider.MapProperty",
    "org.gradle.api.file.RegularFileProperty",
    "org.gradle.api.file.DirectoryProperty",
    "org.gradle.api.file.ConfigurableFileCollection",
    "org.gradle.api.file.FileCollection",
];

/// Returns `true` for Provider API and file collection types.
pub(crate) fn is_provider_api_type(class: &JavaClass) -> bool {
    PROVIDER_API_TYPES.iter().any(|t| class.is_assignable_to(t))
}

/// Concrete classes implementing `org.gradle.api.Plugin`.
pub(crate) fn plugins() -> DescribedPredicate<JavaClass> {
    assignable_to(PLUGIN)
        .and(not(interfaces()))
        .described_as(format!("implement {PLUGIN}"))
}

/// Concrete classes assignable to `type_name`.
pub(crate) fn concrete_subtypes_of(type_name: &str) -> DescribedPredicate<JavaClass> {
    assignable_to(type_name).and(are(not(interfaces())))
}

/// Concrete task classes.
///
/// `DefaultTask` is matched by name as well: a model that stubs the Gradle
/// API does not record that it implements `Task`.
pub(crate) fn tasks() -> DescribedPredicate<JavaClass> {
    assignable_to(TASK)
        .or(assignable_to(DEFAULT_TASK))
        .and(not(interfaces()))
        .described_as(format!("are assignable to {TASK} and are not interfaces"))
}

/// Methods and fields annotated with any task input or output annotation.
pub(crate) fn has_input_output_annotation<T: CanBeAnnotated + 'static>() -> DescribedPredicate<T> {
    annotated_with_any(INPUT_OUTPUT_ANNOTATIONS).described_as("has input or output annotation")
}

/// Annotated with `@InputFile`, `@InputFiles` or `@InputDirectory`.
pub(crate) fn annotated_with_file_input<T: CanBeAnnotated + 'static>() -> DescribedPredicate<T> {
    annotated_with_any(FILE_INPUT_ANNOTATIONS).described_as("annotated with Input file annotations")
}

/// `is Provider API type`
pub(crate) fn provider_api_type() -> DescribedPredicate<JavaClass> {
    DescribedPredicate::new("is Provider API type", is_provider_api_type)
}

/// `has rich property return type`: returns a Provider API or file collection type.
///
/// Gradle types are usually stubs in a model, so the lazy types are listed
/// by name instead of relying on their supertypes.
pub(crate) fn has_rich_property_return_type() -> DescribedPredicate<JavaMethod> {
    raw_return_type(provider_api_type()).described_as("has rich property return type")
}

/// Non-private getters of Provider API or file collection types, excluding
/// `@Inject` service getters.
pub(crate) fn rich_property_getters() -> DescribedPredicate<JavaMethod> {
    are(a_getter())
        .and(are(has_rich_property_return_type()))
        .and(not(modifier(Modifier::Private)))
        .and(not(annotated_with(JAVAX_INJECT)))
}

/// `calls <method> on <owner>`, owner matched by assignability.
pub(crate) fn calls_method_on(method: &str, owner: &str) -> DescribedPredicate<JavaAccess> {
    calls_method_on_any(method, &[owner]).described_as(format!("calls {method} on {owner}"))
}

/// Classes with at least one `@TaskAction` method in their hierarchy.
pub(crate) fn have_task_action() -> DescribedPredicate<JavaClass> {
    contain_any_methods_in_class_hierarchy_that(annotated_with(TASK_ACTION))
        .described_as("have task action")
}

/// `plugin extension class`: named `*Extension`, not an interface, and used
/// from plugin code within two hops.
pub(crate) fn plugin_extension_class() -> DescribedPredicate<JavaClass> {
    simple_name_ending_with("Extension")
        .and(not(interfaces()))
        .and(referenced_from(assignable_to(PLUGIN)))
        .described_as("plugin extension class")
}

/// Fields of the class and its ancestors.
pub(crate) fn all_fields(class: &JavaClass) -> Vec<JavaField> {
    all_members::<JavaField>(class)
}

/// Methods of the class and its ancestors.
pub(crate) fn all_methods(class: &JavaClass) -> Vec<JavaMethod> {
    all_members::<JavaMethod>(class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use archrules_core::model::{AccessDto, AnnotationDto, ClassDto, ClassGraph, ClassKind, FieldDto, MethodDto, ModelDocument};

    fn graph() -> ClassGraph {
        ClassGraph::from_document(
            ModelDocument::new()
                .with_class(
                    ClassDto::new("app.MyPlugin")
                        .implementing(PLUGIN)
                        .with_method(
                            MethodDto::new("apply")
                                .with_parameters([PROJECT])
                                .with_access(AccessDto::construct("app.MyExtension"))
                                .with_access(AccessDto::call(TASK_CONTAINER, "getByName")),
                        ),
                )
                .with_class(ClassDto::new("app.MyExtension"))
                .with_class(ClassDto::new("app.OrphanExtension"))
                .with_class(ClassDto::new("app.PluginApi").with_kind(ClassKind::Interface).implementing(PLUGIN))
                .with_class(
                    ClassDto::new("app.BaseTask").extending(DEFAULT_TASK).with_method(
                        MethodDto::new("run").with_annotation(AnnotationDto::new(TASK_ACTION)),
                    ),
                )
                .with_class(ClassDto::new("app.ChildTask").extending("app.BaseTask"))
                .with_class(
                    ClassDto::new("app.Props")
                        .with_field(
                            FieldDto::new("in", "java.io.File").with_annotation(AnnotationDto::new(INPUT_FILE)),
                        )
                        .with_method(MethodDto::new("getOutput").returning("org.gradle.api.provider.Property"))
                        .with_method(
                            MethodDto::new("getObjects")
                                .returning("org.gradle.api.file.ConfigurableFileCollection")
                                .with_annotation(AnnotationDto::new(JAVAX_INJECT)),
                        ),
                ),
        )
        .unwrap()
    }

    fn class(name: &str) -> JavaClass {
        graph().get(name).unwrap()
    }

    #[test]
    fn plugin_selection_skips_interfaces() {
        assert!(plugins().test(&class("app.MyPlugin")));
        assert!(!plugins().test(&class("app.PluginApi")));
    }

    #[test]
    fn extension_needs_plugin_reference() {
        let extension = plugin_extension_class();
        assert!(extension.test(&class("app.MyExtension")));
        assert!(!extension.test(&class("app.OrphanExtension")));
        assert_eq!(extension.description(), "plugin extension class");
    }

    #[test]
    fn task_action_is_inherited() {
        assert!(have_task_action().test(&class("app.ChildTask")));
        assert!(!have_task_action().test(&class("app.MyPlugin")));
    }

    #[test]
    fn provider_api_types() {
        let props = class("app.Props");
        let getters: Vec<String> = props
            .methods()
            .iter()
            .filter(|m| rich_property_getters().test(m))
            .map(|m| m.name().to_string())
            .collect();
        assert_eq!(getters, ["getOutput"]);
        assert!(is_provider_api_type(&graph().get("org.gradle.api.provider.Property").unwrap()));
        assert!(!is_provider_api_type(&graph().get("java.io.File").unwrap()));
        assert!(annotated_with_file_input::<JavaField>().test(&props.fields()[0]));
    }

    #[test]
    fn method_calls_by_owner() {
        let plugin = class("app.MyPlugin");
        let calls = calls_method_on("getByName", TASK_CONTAINER);
        assert_eq!(calls.description(), format!("calls getByName on {TASK_CONTAINER}"));
        assert!(plugin.accesses_from_self().iter().any(|a| calls.test(a)));
    }
}
