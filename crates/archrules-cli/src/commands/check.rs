//! Check command implementation.

use std::path::{Path, PathBuf};

use anyhow::Result;
use archrules_core::{Config, Evaluator, Priority, RuleRegistry};
use archrules_rules::{all_rule_sets, Preset};

use crate::config_resolver::LoadedConfig;
use crate::OutputFormat;

/// Arguments of `archrules check`.
pub struct CheckArgs<'a> {
    /// Project directory; relative model paths resolve against it.
    pub project_dir: &'a Path,
    /// Model path overriding the configured one.
    pub model: Option<&'a Path>,
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated rule names.
    pub rules_filter: Option<&'a str>,
    /// Rule sets to run.
    pub preset: Preset,
    /// Fail threshold overriding the configured one.
    pub fail_on: Option<Priority>,
    /// Loaded configuration.
    pub loaded: LoadedConfig,
}

/// Runs the check command. Returns `true` when violations at or above the
/// fail threshold were found.
pub fn run(args: &CheckArgs<'_>) -> Result<bool> {
    let base_dir = args.loaded.base_dir(args.project_dir);
    let config = &args.loaded.config;
    let fail_on = args.fail_on.unwrap_or(config.fail_on);
    let model_path = model_path(&base_dir, args.model, config);

    let mut builder = Evaluator::builder()
        .rule_sets(args.preset.rule_sets())
        .config(config.clone());
    if let Some(filter) = args.rules_filter {
        builder = builder.only(parse_filter(filter));
    }
    let evaluator = builder.build()?;
    let known = RuleRegistry::from_sets(&all_rule_sets())?;
    for name in args.loaded.unknown_rules(&known) {
        tracing::warn!("Unknown rule in config: {}", name);
    }

    tracing::info!(
        "Checking {} with {} rule(s) (preset: {})",
        model_path.display(),
        evaluator.registry().len(),
        args.preset
    );

    let report = evaluator.evaluate_path(&model_path)?;
    super::output::print(&report, args.format, fail_on)?;

    Ok(report.has_violations_at(fail_on))
}

fn model_path(base_dir: &Path, explicit: Option<&Path>, config: &Config) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None if config.model.path.is_absolute() => config.model.path.clone(),
        None => base_dir.join(&config.model.path),
    }
}

fn parse_filter(filter: &str) -> Vec<String> {
    filter
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const MODEL: &str = r#"{
        "classes": [
            {
                "name": "app.Clock",
                "methods": [
                    {
                        "name": "now",
                        "accesses": [
                            { "kind": "method_call", "owner": "org.joda.time.DateTime", "name": "now", "line": 4 }
                        ]
                    }
                ]
            }
        ]
    }"#;

    fn project(config: &str) -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("build/archrules")).unwrap();
        fs::write(tmp.path().join("build/archrules/model.json"), MODEL).unwrap();
        fs::write(tmp.path().join("archrules.toml"), config).unwrap();
        tmp
    }

    fn check_in(dir: &Path, fail_on: Option<Priority>) -> Result<bool> {
        run(&CheckArgs {
            project_dir: dir,
            model: None,
            format: OutputFormat::Compact,
            rules_filter: Some("jodaRule, javaxRule"),
            preset: Preset::Migration,
            fail_on,
            loaded: crate::config_resolver::load(dir, None)?,
        })
    }

    fn check(tmp: &TempDir, fail_on: Option<Priority>) -> Result<bool> {
        check_in(tmp.path(), fail_on)
    }

    #[test]
    fn violations_fail_at_configured_threshold() {
        let tmp = project("fail_on = \"medium\"\n");
        assert!(check(&tmp, None).unwrap());
        assert!(!check(&tmp, Some(Priority::High)).unwrap());
    }

    #[test]
    fn disabled_rule_passes() {
        let tmp = project("[rules.\"jodaRule\"]\nenabled = false\n");
        assert!(!check(&tmp, Some(Priority::Low)).unwrap());
    }

    #[test]
    fn missing_model_is_an_error() {
        let tmp = project("[model]\npath = \"nowhere\"\n");
        assert!(check(&tmp, None).is_err());
    }

    #[test]
    fn subproject_finds_model_next_to_root_config() {
        let tmp = project("fail_on = \"medium\"\n");
        let sub = tmp.path().join("plugins/core");
        fs::create_dir_all(&sub).unwrap();
        assert!(check_in(&sub, None).unwrap());
    }

    #[test]
    fn filter_ignores_blank_entries() {
        assert_eq!(parse_filter("a, b,,"), ["a", "b"]);
    }

    #[test]
    fn relative_model_paths_join_the_project() {
        let config = Config::default();
        assert_eq!(
            model_path(Path::new("/work"), None, &config),
            PathBuf::from("/work/build/archrules")
        );
        assert_eq!(
            model_path(Path::new("/work"), Some(Path::new("m.json")), &config),
            PathBuf::from("m.json")
        );
    }
}
