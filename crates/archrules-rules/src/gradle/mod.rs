//! Gradle plugin development best practices.
//!
//! Rules over plugin classes (`org.gradle.api.Plugin` implementations),
//! task classes and plugin extensions:
//!
//! | Area | Rules |
//! |------|-------|
//! | [`tasks`] | lazy properties, abstract getters, task action hygiene, inputs/outputs, path sensitivity |
//! | [`plugins`] | configuration avoidance, service injection, `Project` fields |
//! | [`api_usage`] | deprecated and internal Gradle APIs |
//! | [`extensions`] | lazy extension properties |
//!
//! Gradle types are rarely part of the analysed model; the rules match
//! them by name and tolerate stubs without supertypes.

pub mod api_usage;
pub mod extensions;
pub mod plugins;
mod predicates;
pub mod tasks;

use archrules_core::rule::RuleError;
use archrules_core::{RuleMap, RuleSet};

use api_usage::Subjects;

/// Gradle plugin development rule set.
#[derive(Debug, Clone, Copy, Default)]
pub struct GradlePluginRules;

impl RuleSet for GradlePluginRules {
    fn name(&self) -> &'static str {
        "gradle-plugin-development"
    }

    fn description(&self) -> &'static str {
        "Gradle plugin development best practices"
    }

    fn rules(&self) -> Result<RuleMap, RuleError> {
        let rules = [
            ("provider properties", tasks::provider_properties()?),
            ("abstract getters", tasks::abstract_getters()?),
            ("task project access", tasks::task_project_access()?),
            ("task dependencies", tasks::task_dependencies()?),
            ("lazy task registration", plugins::lazy_task_registration()?),
            ("use named instead of getByName", plugins::use_named_instead_of_get_by_name()?),
            ("use configureEach instead of all", plugins::use_configure_each_instead_of_all()?),
            ("Plugin using deprecated gradle APIs", api_usage::deprecated_apis(Subjects::Plugins)?),
            ("Task using deprecated gradle APIs", api_usage::deprecated_apis(Subjects::Tasks)?),
            ("Plugin using internal gradle APIs", api_usage::internal_apis(Subjects::Plugins)?),
            ("Task using internal gradle APIs", api_usage::internal_apis(Subjects::Tasks)?),
            ("Plugin storing Project references", plugins::project_references()?),
            ("Plugin should inject ObjectFactory", plugins::inject_object_factory()?),
            ("Plugin should inject ProviderFactory", plugins::inject_provider_factory()?),
            ("Extension properties use Provider API", extensions::properties_use_provider_api()?),
            ("Extension abstract getters", extensions::abstract_getters()?),
            ("Task declares inputs and/or outputs", tasks::inputs_outputs()?),
            ("Cacheable Task input field path sensitivity", tasks::fields_path_sensitivity()?),
            ("Cacheable Task input method path sensitivity", tasks::methods_path_sensitivity()?),
        ];
        Ok(rules
            .into_iter()
            .map(|(name, rule)| (name.to_string(), rule))
            .collect())
    }
}
