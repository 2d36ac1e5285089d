//! Locating and loading `archrules.toml`.
//!
//! The `--config` flag wins. Otherwise the project directory and then each
//! of its ancestors is searched for `archrules.toml` (or `.archrules.toml`),
//! so running inside a subproject of a multi-project build picks up the
//! root configuration. Last comes the user file
//! `$ARCHRULES_CONFIG_DIR/config.toml` (default `~/.archrules/config.toml`).
//! With no file at all the defaults apply.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use archrules_core::{Config, RuleRegistry};

const PROJECT_FILES: [&str; 2] = ["archrules.toml", ".archrules.toml"];
const USER_FILE: &str = "config.toml";
const USER_DIR_ENV: &str = "ARCHRULES_CONFIG_DIR";

/// How the configuration file was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Named by `--config`.
    Flag,
    /// Found in the project directory or one of its ancestors.
    Project,
    /// The per-user file.
    User,
    /// No file; built-in defaults.
    Defaults,
}

/// A parsed configuration and where it came from.
#[derive(Debug)]
pub struct LoadedConfig {
    /// Parsed settings.
    pub config: Config,
    /// Lookup step that produced the file.
    pub origin: Origin,
    /// The file read, if any.
    pub file: Option<PathBuf>,
}

impl LoadedConfig {
    /// Directory relative `[model] path` values resolve against.
    ///
    /// A project file anchors them at its own directory; everything else at
    /// the checked project.
    #[must_use]
    pub fn base_dir(&self, project_dir: &Path) -> PathBuf {
        match (&self.origin, self.file.as_deref().and_then(Path::parent)) {
            (Origin::Project, Some(dir)) => dir.to_path_buf(),
            _ => project_dir.to_path_buf(),
        }
    }

    /// Names under `[rules]` that match no registered rule, sorted.
    #[must_use]
    pub fn unknown_rules(&self, registry: &RuleRegistry) -> Vec<&str> {
        let mut unknown: Vec<&str> = self
            .config
            .rules
            .keys()
            .map(String::as_str)
            .filter(|name| registry.get(name).is_none())
            .collect();
        unknown.sort_unstable();
        unknown
    }
}

/// Finds and parses the configuration for `project_dir`.
///
/// # Errors
///
/// Fails when the chosen file cannot be read or is not a valid
/// configuration. An explicit `--config` path that does not exist is an
/// error rather than a fallback to defaults.
pub fn load(project_dir: &Path, explicit: Option<&Path>) -> Result<LoadedConfig> {
    load_from(project_dir, explicit, user_config_dir().as_deref())
}

fn load_from(
    project_dir: &Path,
    explicit: Option<&Path>,
    user_dir: Option<&Path>,
) -> Result<LoadedConfig> {
    let found = explicit
        .map(|path| (Origin::Flag, path.to_path_buf()))
        .or_else(|| find_project_file(project_dir).map(|path| (Origin::Project, path)))
        .or_else(|| {
            user_dir
                .map(|dir| dir.join(USER_FILE))
                .filter(|path| path.is_file())
                .map(|path| (Origin::User, path))
        });

    let Some((origin, file)) = found else {
        tracing::debug!("No archrules configuration found; using defaults");
        return Ok(LoadedConfig {
            config: Config::default(),
            origin: Origin::Defaults,
            file: None,
        });
    };

    let config = Config::from_file(&file)
        .with_context(|| format!("Failed to load config: {}", file.display()))?;
    tracing::info!(
        "Using {:?} config {} ({} rule override(s))",
        origin,
        file.display(),
        config.rules.len()
    );
    Ok(LoadedConfig {
        config,
        origin,
        file: Some(file),
    })
}

/// Nearest `archrules.toml` / `.archrules.toml`, walking up from `start`.
fn find_project_file(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        PROJECT_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}

fn user_config_dir() -> Option<PathBuf> {
    match std::env::var_os(USER_DIR_ENV) {
        Some(dir) => Some(PathBuf::from(dir)),
        None => home::home_dir().map(|home| home.join(".archrules")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archrules_core::Priority;
    use archrules_rules::all_rule_sets;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn subproject_uses_the_root_config() {
        let root = TempDir::new().unwrap();
        fs::write(
            root.path().join("archrules.toml"),
            "[rules.\"jodaRule\"]\nenabled = false\n",
        )
        .unwrap();
        let sub = root.path().join("plugins/core");
        fs::create_dir_all(&sub).unwrap();

        let loaded = load_from(&sub, None, None).unwrap();
        assert_eq!(loaded.origin, Origin::Project);
        assert!(!loaded.config.is_rule_enabled("jodaRule"));
        assert_eq!(loaded.base_dir(&sub), root.path());
    }

    #[test]
    fn nearest_project_file_wins() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("archrules.toml"), "fail_on = \"low\"\n").unwrap();
        let sub = root.path().join("app");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join(".archrules.toml"), "fail_on = \"high\"\n").unwrap();

        let loaded = load_from(&sub, None, None).unwrap();
        assert_eq!(loaded.config.fail_on, Priority::High);
        assert_eq!(loaded.file, Some(sub.join(".archrules.toml")));
    }

    #[test]
    fn flag_overrides_project_and_user_files() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("archrules.toml"), "fail_on = \"low\"\n").unwrap();
        let custom = project.path().join("ci.toml");
        fs::write(&custom, "[rules.\"guava optional\"]\npriority = \"high\"\n").unwrap();

        let loaded = load_from(project.path(), Some(&custom), None).unwrap();
        assert_eq!(loaded.origin, Origin::Flag);
        assert_eq!(
            loaded.config.rule_priority("guava optional"),
            Some(Priority::High)
        );
        assert_eq!(loaded.base_dir(Path::new("/work")), PathBuf::from("/work"));
    }

    #[test]
    fn missing_flag_file_is_an_error() {
        let project = TempDir::new().unwrap();
        let err = load_from(project.path(), Some(Path::new("/no/such/archrules.toml")), None)
            .unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }

    #[test]
    fn user_file_then_defaults() {
        let project = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();

        let loaded = load_from(project.path(), None, Some(user.path())).unwrap();
        assert_eq!(loaded.origin, Origin::Defaults);
        assert!(loaded.file.is_none());

        fs::write(user.path().join("config.toml"), "fail_on = \"high\"\n").unwrap();
        let loaded = load_from(project.path(), None, Some(user.path())).unwrap();
        assert_eq!(loaded.origin, Origin::User);
        assert_eq!(loaded.config.fail_on, Priority::High);
    }

    #[test]
    fn invalid_project_file_is_reported() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("archrules.toml"), "fail_on = \"urgent\"\n").unwrap();
        assert!(load_from(project.path(), None, None).is_err());
    }

    #[test]
    fn unknown_rule_names_are_listed() {
        let project = TempDir::new().unwrap();
        fs::write(
            project.path().join("archrules.toml"),
            "[rules.\"jodaRule\"]\nenabled = false\n\n[rules.\"jodaRules\"]\nenabled = false\n",
        )
        .unwrap();
        let registry = RuleRegistry::from_sets(&all_rule_sets()).unwrap();

        let loaded = load_from(project.path(), None, None).unwrap();
        assert_eq!(loaded.unknown_rules(&registry), ["jodaRules"]);
    }
}
