//! Rules for APIs affected by known CVEs.
//!
//! | Rule | Vulnerable API |
//! |------|----------------|
//! | `CVE-2020-29582` | Kotlin `createTempDir` / `createTempFile` |
//! | `CVE-2023-2976` | Guava `FileBackedOutputStream` |
//! | `CVE-2020-8908` | Guava `Files.createTempDir()` |
//! | `CVE-2018-10237` | Guava `AtomicDoubleArray`, `CompoundOrdering` |
//! | `CVE-2024-6763` | Jetty `HttpURI` |
//!
//! All rules are `HIGH`.

use archrules_core::condition::conditions::{access_target_where, call_method, depend_on_classes_that};
use archrules_core::model::JavaClass;
use archrules_core::predicate::have;
use archrules_core::predicates::access::target_owner;
use archrules_core::predicates::class::{assignable_to_class_that, fully_qualified_name, simple_name};
use archrules_core::rule::{self, Priority, Rule, RuleError};
use archrules_core::{ArchCondition, RuleMap, RuleSet};

const KOTLIN_FILES: &str = "kotlin.io.FilesKt";
const KOTLIN_TEMP_PARAMETERS: &[&str] = &["java.lang.String", "java.lang.String", "java.io.File"];

const TEMP_DIRECTORY_ADVICE: &str = "We recommend migrating to the Java 7 API \
    java.nio.file.Files.createTempDirectory() which explicitly configures permissions of 700";

/// CVE rule set.
#[derive(Debug, Clone, Copy, Default)]
pub struct CveRules;

/// Dependency on, and member access to, a class named `simple` or a subtype.
fn depend_on_or_access(simple: &str) -> [ArchCondition<JavaClass>; 2] {
    [
        depend_on_classes_that(have(simple_name(simple))).into(),
        access_target_where(target_owner(assignable_to_class_that(simple_name(simple)))).into(),
    ]
}

/// `CVE-2020-29582`: Kotlin temp files readable by other local users.
///
/// # Errors
///
/// Returns an error if the rule definition is invalid.
pub fn cve_2020_29582() -> Result<Rule, RuleError> {
    rule::priority(Priority::High)
        .no_classes()
        .should(call_method(KOTLIN_FILES, "createTempDir", KOTLIN_TEMP_PARAMETERS))
        .or_should(call_method(KOTLIN_FILES, "createTempFile", KOTLIN_TEMP_PARAMETERS))
        .because(format!(
            "A Kotlin application using createTempDir or createTempFile \
             and placing sensitive information within either of these locations \
             would be leaking this information in a read-only way to other users also on this system. \
             {TEMP_DIRECTORY_ADVICE}"
        ))
        .build()
}

/// `CVE-2023-2976`: Guava `FileBackedOutputStream` uses the shared temp directory.
///
/// # Errors
///
/// Returns an error if the rule definition is invalid.
pub fn cve_2023_2976() -> Result<Rule, RuleError> {
    let [depend, access] = depend_on_or_access("FileBackedOutputStream");
    rule::priority(Priority::High)
        .no_classes()
        .should(depend)
        .or_should(access)
        .because(
            "CVE-2023-2976: Use of Java's default temporary directory for file creation in \
             `FileBackedOutputStream` in Google Guava versions 1.0 to 31.1 on Unix systems \
             and Android Ice Cream Sandwich allows other users and apps on the machine \
             with access to the default Java temporary directory to be able to access the \
             files created by the class.",
        )
        .build()
}

/// `CVE-2020-8908`: Guava `Files.createTempDir()` creates world-readable directories.
///
/// # Errors
///
/// Returns an error if the rule definition is invalid.
pub fn cve_2020_8908() -> Result<Rule, RuleError> {
    rule::priority(Priority::High)
        .no_classes()
        .should(call_method("com.google.common.io.Files", "createTempDir", &[]))
        .because(format!(
            "A temp directory creation vulnerability exists in all versions of Guava, \
             allowing an attacker with access to the machine to potentially access data in a temporary directory \
             created by the Guava API com.google.common.io.Files.createTempDir(). \
             By default, on unix-like systems, the created directory is world-readable \
             (readable by an attacker with access to the system). \
             {TEMP_DIRECTORY_ADVICE}"
        ))
        .build()
}

/// `CVE-2018-10237`: eager allocation when deserializing two Guava types.
///
/// # Errors
///
/// Returns an error if the rule definition is invalid.
pub fn cve_2018_10237() -> Result<Rule, RuleError> {
    let [depend_atomic, access_atomic] = depend_on_or_access("AtomicDoubleArray");
    let [depend_ordering, access_ordering] = depend_on_or_access("CompoundOrdering");
    rule::priority(Priority::High)
        .no_classes()
        .should(depend_atomic)
        .or_should(access_atomic)
        .or_should(depend_ordering)
        .or_should(access_ordering)
        .because(
            "Unbounded memory allocation in Google Guava 11.0 through 24.x before 24.1.1 \
             allows remote attackers to conduct denial of service attacks against servers \
             that depend on this library and deserialize attacker-provided data, \
             because the AtomicDoubleArray class (when serialized with Java serialization) \
             and the CompoundOrdering class (when serialized with GWT serialization) \
             perform eager allocation without appropriate checks on what a client has sent \
             and whether the data size is reasonable. ",
        )
        .build()
}

/// `CVE-2024-6763`: Jetty `HttpURI` authority validation.
///
/// # Errors
///
/// Returns an error if the rule definition is invalid.
pub fn cve_2024_6763() -> Result<Rule, RuleError> {
    rule::priority(Priority::High)
        .no_classes()
        .should(depend_on_classes_that(have(fully_qualified_name(
            "org.eclipse.jetty.http.HttpURI",
        ))))
        .because("The HttpURI class does insufficient validation on the authority segment of a URI.")
        .build()
}

impl RuleSet for CveRules {
    fn name(&self) -> &'static str {
        "security"
    }

    fn description(&self) -> &'static str {
        "Usage of APIs affected by known CVEs"
    }

    fn rules(&self) -> Result<RuleMap, RuleError> {
        Ok(RuleMap::from([
            ("CVE-2020-29582".to_string(), cve_2020_29582()?),
            ("CVE-2023-2976".to_string(), cve_2023_2976()?),
            ("CVE-2020-8908".to_string(), cve_2020_8908()?),
            ("CVE-2018-10237".to_string(), cve_2018_10237()?),
            ("CVE-2024-6763".to_string(), cve_2024_6763()?),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archrules_core::model::{AccessDto, ClassDto, ClassGraph, FieldDto, MethodDto, ModelDocument};

    fn caller(name: &str, access: AccessDto) -> ClassDto {
        ClassDto::new(name).with_method(MethodDto::new("run").with_access(access))
    }

    fn graph() -> ClassGraph {
        ClassGraph::from_document(
            ModelDocument::new()
                .with_class(caller(
                    "app.KotlinTemp",
                    AccessDto::call(KOTLIN_FILES, "createTempFile")
                        .with_parameters(KOTLIN_TEMP_PARAMETERS.iter().copied())
                        .at_line(4),
                ))
                .with_class(caller(
                    "app.KotlinTempOther",
                    AccessDto::call(KOTLIN_FILES, "createTempFile").with_parameters(["java.lang.String"]),
                ))
                .with_class(caller(
                    "app.GuavaTemp",
                    AccessDto::call("com.google.common.io.Files", "createTempDir").at_line(11),
                ))
                .with_class(caller(
                    "app.Buffer",
                    AccessDto::call("app.SafeStream", "write"),
                ))
                .with_class(
                    ClassDto::new("app.SafeStream")
                        .extending("com.google.common.io.FileBackedOutputStream"),
                )
                .with_class(
                    ClassDto::new("app.Ordering")
                        .with_field(FieldDto::new("order", "com.google.common.collect.CompoundOrdering")),
                )
                .with_class(
                    ClassDto::new("app.Http")
                        .with_field(FieldDto::new("uri", "org.eclipse.jetty.http.HttpURI")),
                ),
        )
        .unwrap()
    }

    fn violating(rule: &Rule) -> Vec<String> {
        rule.evaluate(&graph())
            .violations
            .iter()
            .map(|v| v.subject().name.clone())
            .collect()
    }

    #[test]
    fn kotlin_temp_files_require_exact_signature() {
        assert_eq!(violating(&cve_2020_29582().unwrap()), ["app.KotlinTemp"]);
    }

    #[test]
    fn guava_temp_dir() {
        let result = cve_2020_8908().unwrap().evaluate(&graph());
        assert_eq!(
            result.messages(),
            ["Method <app.GuavaTemp.run()> calls method <com.google.common.io.Files.createTempDir()> in (GuavaTemp.java:11)"]
        );
    }

    #[test]
    fn file_backed_output_stream_subtypes_are_flagged() {
        assert_eq!(
            violating(&cve_2023_2976().unwrap()),
            ["app.Buffer", "app.SafeStream"]
        );
    }

    #[test]
    fn either_guava_serialization_type_is_flagged() {
        assert_eq!(violating(&cve_2018_10237().unwrap()), ["app.Ordering"]);
    }

    #[test]
    fn jetty_http_uri() {
        assert_eq!(violating(&cve_2024_6763().unwrap()), ["app.Http"]);
    }

    #[test]
    fn all_rules_are_high() {
        let rules = CveRules.rules().unwrap();
        assert_eq!(rules.len(), 5);
        assert!(rules.values().all(|r| r.priority() == Priority::High));
    }
}
