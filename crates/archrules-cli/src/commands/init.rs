//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# archrules configuration

# Lowest priority whose violations fail `archrules check`: low, medium or high
fail_on = "medium"

[evaluation]
# Evaluate rules in parallel
parallel = true
# threads = 4

[model]
# Model JSON file or directory written by the model provider
path = "build/archrules"

# Rule configurations, keyed by rule name (see `archrules list-rules`)
# Each rule can be disabled and have its priority overridden

# [rules."deprecated"]
# enabled = false

# [rules."guava optional"]
# priority = "high"
"#;

const CONFIG_FILE: &str = "archrules.toml";

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new(CONFIG_FILE), force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Point [model] path at the exported class model");
    println!("  2. Run: archrules check");

    Ok(())
}

fn write_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }
    std::fs::write(path, DEFAULT_CONFIG)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use archrules_core::{Config, Priority};
    use tempfile::TempDir;

    #[test]
    fn default_config_parses() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.fail_on, Priority::Medium);
        assert!(config.evaluation.parallel);
        assert!(config.rules.is_empty());
    }

    #[test]
    fn existing_config_needs_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        std::fs::write(&path, "fail_on = \"high\"\n").unwrap();

        assert!(write_config(&path, false).is_err());
        write_config(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
