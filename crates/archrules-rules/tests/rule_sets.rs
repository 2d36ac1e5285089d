//! Built-in rule sets registered together.

use archrules_core::model::{
    AccessDto, AnnotationDto, ClassDto, FieldDto, MethodDto, ModelDocument,
};
use archrules_core::{ClassGraph, Config, Evaluator, Priority, RuleRegistry};
use archrules_rules::nullability::NULL_MARKED;
use archrules_rules::{all_rule_sets, Preset};

fn clean_graph() -> ClassGraph {
    ClassGraph::from_document(
        ModelDocument::new().with_class(
            ClassDto::new("app.Main")
                .with_annotation(AnnotationDto::new(NULL_MARKED))
                .with_field(FieldDto::new("name", "java.lang.String"))
                .with_method(MethodDto::new("main").with_parameters(["java.lang.String[]"])),
        ),
    )
    .unwrap()
}

#[test]
fn rule_names_are_unique_across_sets() {
    let registry = RuleRegistry::from_sets(&all_rule_sets()).unwrap();
    let per_set: usize = all_rule_sets().iter().map(|s| s.rules().unwrap().len()).sum();
    assert_eq!(registry.len(), per_set);
}

#[test]
fn set_names() {
    let names: Vec<&str> = all_rule_sets().iter().map(|s| s.name()).collect();
    insta::assert_snapshot!(names.join("\n"), @r"
    deprecation
    testing-frameworks
    gradle-plugin-development
    guava
    javax
    joda
    nullability
    security
    ");
}

#[test]
fn clean_model_passes_every_rule() {
    let evaluator = Evaluator::builder()
        .rule_sets(all_rule_sets())
        .build()
        .unwrap();
    let report = evaluator.evaluate(&clean_graph()).unwrap();
    let failing: Vec<&str> = report.failing(Priority::Low).map(|o| o.name.as_str()).collect();
    assert!(failing.is_empty(), "{failing:?}");
    assert!(report.outcomes.iter().all(|o| o.result.violations.is_empty()));
}

#[test]
fn each_set_reports_nothing_on_a_clean_model() {
    let graph = clean_graph();
    for set in all_rule_sets() {
        let violations: usize = set
            .rules()
            .unwrap()
            .values()
            .map(|rule| rule.evaluate(&graph).violations.len())
            .sum();
        assert_eq!(violations, 0, "rule set {}", set.name());
    }
}

#[test]
fn migration_preset_flags_joda_and_respects_overrides() {
    let graph = ClassGraph::from_document(
        ModelDocument::new().with_class(ClassDto::new("app.Clock").with_method(
            MethodDto::new("now").with_access(AccessDto::call("org.joda.time.DateTime", "now").at_line(3)),
        )),
    )
    .unwrap();

    let config = Config::parse(
        r#"
        [rules."jodaRule"]
        priority = "high"
        "#,
    )
    .unwrap();
    let report = Evaluator::builder()
        .rule_sets(Preset::Migration.rule_sets())
        .config(config)
        .build()
        .unwrap()
        .evaluate(&graph)
        .unwrap();

    let failing: Vec<(&str, Priority)> = report
        .failing(Priority::High)
        .map(|o| (o.name.as_str(), o.result.priority))
        .collect();
    assert_eq!(failing, [("jodaRule", Priority::High)]);
}
