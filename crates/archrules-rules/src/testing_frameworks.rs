//! Testcontainers migration rules.
//!
//! Two groups:
//!
//! - `testcontainers1x-*` rules run before an upgrade to 2.x and find code
//!   that will break (renamed classes, removed methods) or that is not
//!   reproducible (no-argument container constructors).
//! - `testcontainers2x-legacyContainerPackage` runs after the upgrade and
//!   finds imports of the deprecated compatibility shims left in
//!   `org.testcontainers.containers`.
//!
//! # Detected Patterns
//!
//! ```text
//! new DockerComposeContainer(file)            // renamed to ComposeContainer
//! container.getContainerIpAddress()           // use getHost()
//! new PostgreSQLContainer()                   // no explicit image
//! import org.testcontainers.containers.PostgreSQLContainer;   // 2.x shim
//! ```

use archrules_core::condition::conditions::{
    call_constructor_where, call_method, depend_on_classes_that,
};
use archrules_core::model::{AccessTarget, JavaClass};
use archrules_core::naming::ModuleNameTable;
use archrules_core::predicate::have;
use archrules_core::predicates::access::target;
use archrules_core::predicates::class::simple_name;
use archrules_core::rule::{self, Priority, Rule, RuleError};
use archrules_core::{DescribedPredicate, RuleMap, RuleSet};

/// Package holding the 1.x container classes and the 2.x shims.
pub const LEGACY_PACKAGE: &str = "org.testcontainers.containers";

const TESTCONTAINERS: &str = "testcontainers";
const CONTAINER_SUFFIX: &str = "Container";

/// Base classes that stay in [`LEGACY_PACKAGE`] in 2.x.
const RETAINED_IN_LEGACY_PACKAGE: [&str; 3] =
    ["GenericContainer", "ComposeContainer", "DockerComposeContainer"];

/// Containers whose 2.x module name cannot be derived by lowercasing.
const MODULE_OVERRIDES: [(&str, &str); 18] = [
    ("PostgreSQLContainer", "postgresql"),
    ("MySQLContainer", "mysql"),
    ("MariaDBContainer", "mariadb"),
    ("MSSQLServerContainer", "mssqlserver"),
    ("MongoDBContainer", "mongodb"),
    ("ScyllaDBContainer", "scylladb"),
    ("OracleContainer", "oracle-xe"),
    ("LocalStackContainer", "localstack"),
    ("MockServerContainer", "mockserver"),
    ("OpenFGAContainer", "openfga"),
    ("HiveMQContainer", "hivemq"),
    ("K3sContainer", "k3s"),
    ("K6Container", "k6"),
    ("TiDBContainer", "tidb"),
    ("OceanBaseContainer", "oceanbase"),
    ("QdrantContainer", "qdrant"),
    ("QuestDBContainer", "questdb"),
    ("R2DBCDatabaseContainer", "r2dbc"),
];

/// Rule name: `DockerComposeContainer` usage.
pub const DOCKER_COMPOSE_CONTAINER: &str = "testcontainers1x-dockerComposeContainer";
/// Rule name: `getContainerIpAddress()` calls.
pub const CONTAINER_IP_ADDRESS: &str = "testcontainers1x-containerIpAddressMethod";
/// Rule name: no-argument container constructors.
pub const NO_ARG_CONSTRUCTOR: &str = "testcontainers1x-noArgConstructor";
/// Rule name: 2.x shim imports.
pub const LEGACY_CONTAINER_PACKAGE: &str = "testcontainers2x-legacyContainerPackage";

/// Simple name to 2.x module table for Testcontainers containers.
#[must_use]
pub fn container_modules() -> ModuleNameTable {
    ModuleNameTable::new(CONTAINER_SUFFIX, "org.testcontainers").with_overrides(MODULE_OVERRIDES)
}

/// Testcontainers rule set.
#[derive(Debug, Clone, Copy, Default)]
pub struct TestcontainersRules;

/// # Errors
///
/// Returns an error if the rule definition is invalid.
pub fn docker_compose_container_rule() -> Result<Rule, RuleError> {
    rule::priority(Priority::Medium)
        .no_classes()
        .should(depend_on_classes_that(have(simple_name("DockerComposeContainer"))))
        .allow_empty_should(true)
        .described_as("No code should use DockerComposeContainer")
        .because(
            "DockerComposeContainer was renamed to ComposeContainer in Testcontainers 2.x. \
             Update imports to use org.testcontainers.containers.ComposeContainer",
        )
        .build()
}

/// # Errors
///
/// Returns an error if the rule definition is invalid.
pub fn container_ip_address_rule() -> Result<Rule, RuleError> {
    rule::priority(Priority::Medium)
        .no_classes()
        .should(call_method(
            "org.testcontainers.containers.ContainerState",
            "getContainerIpAddress",
            &[],
        ))
        .allow_empty_should(true)
        .described_as("No code should use getContainerIpAddress() method")
        .because(
            "getContainerIpAddress() was replaced with getHost() in Testcontainers 2.x. \
             Replace calls with getHost()",
        )
        .build()
}

fn no_arg_container_constructor() -> DescribedPredicate<AccessTarget> {
    DescribedPredicate::new(
        "no-arg Testcontainers container constructor",
        |t: &AccessTarget| {
            let owner = t.owner();
            t.kind().is_constructor()
                && t.parameter_type_names().is_empty()
                && owner.package_name().starts_with("org.testcontainers")
                && owner.simple_name().ends_with(CONTAINER_SUFFIX)
        },
    )
}

/// # Errors
///
/// Returns an error if the rule definition is invalid.
pub fn no_arg_constructor_rule() -> Result<Rule, RuleError> {
    rule::priority(Priority::Medium)
        .no_classes()
        .should(call_constructor_where(target(no_arg_container_constructor())))
        .allow_empty_should(true)
        .described_as("No code should use no-argument constructors on Testcontainers container classes")
        .because(
            "Containers should specify explicit images with versions for reproducibility. \
             Use explicit image specifications \
             (e.g., new PostgreSQLContainer(DockerImageName.parse(\"postgres:16-alpine\")))",
        )
        .build()
}

/// A container shim in [`LEGACY_PACKAGE`] that has a 2.x module location.
///
/// Only matches once 2.x is present: the model declares `testcontainers`
/// 2 or later, or references the class at its module location.
fn deprecated_container_in_legacy_package(modules: ModuleNameTable) -> DescribedPredicate<JavaClass> {
    DescribedPredicate::new(
        "deprecated container class in old package",
        move |c: &JavaClass| {
            let simple = c.simple_name();
            if c.package_name() != LEGACY_PACKAGE
                || !simple.ends_with(CONTAINER_SUFFIX)
                || RETAINED_IN_LEGACY_PACKAGE.contains(&simple)
                || c.is_interface()
            {
                return false;
            }
            let Some(module_package) = modules.module_package(simple) else {
                return false;
            };
            let graph = c.graph();
            graph.ecosystem().has_at_least(TESTCONTAINERS, 2)
                || graph.get(&format!("{module_package}.{simple}")).is_some()
        },
    )
}

/// # Errors
///
/// Returns an error if the rule definition is invalid.
pub fn legacy_container_package_rule() -> Result<Rule, RuleError> {
    rule::priority(Priority::Low)
        .no_classes()
        .should(depend_on_classes_that(deprecated_container_in_legacy_package(
            container_modules(),
        )))
        .allow_empty_should(true)
        .described_as(
            "Code should use module-specific Testcontainers packages instead of org.testcontainers.containers",
        )
        .because(
            "In Testcontainers 2.x, container classes moved to module-specific packages \
             (e.g., PostgreSQLContainer → org.testcontainers.postgresql.PostgreSQLContainer). \
             The old locations are deprecated compatibility shims.",
        )
        .build()
}

impl RuleSet for TestcontainersRules {
    fn name(&self) -> &'static str {
        "testing-frameworks"
    }

    fn description(&self) -> &'static str {
        "Testcontainers 1.x to 2.x migration"
    }

    fn rules(&self) -> Result<RuleMap, RuleError> {
        Ok(RuleMap::from([
            (DOCKER_COMPOSE_CONTAINER.to_string(), docker_compose_container_rule()?),
            (CONTAINER_IP_ADDRESS.to_string(), container_ip_address_rule()?),
            (NO_ARG_CONSTRUCTOR.to_string(), no_arg_constructor_rule()?),
            (LEGACY_CONTAINER_PACKAGE.to_string(), legacy_container_package_rule()?),
        ]))
    }
}
