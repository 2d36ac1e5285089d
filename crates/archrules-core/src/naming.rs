//! Simple-name → module-name derivation with an override table.

use std::collections::BTreeMap;

/// Maps class simple names to module names.
///
/// Overrides always win. Otherwise a name ending in the suffix maps to the
/// remainder, lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleNameTable {
    overrides: BTreeMap<String, String>,
    suffix: String,
    package_prefix: String,
}

impl ModuleNameTable {
    /// Creates a table with no overrides.
    #[must_use]
    pub fn new(suffix: impl Into<String>, package_prefix: impl Into<String>) -> Self {
        Self {
            overrides: BTreeMap::new(),
            suffix: suffix.into(),
            package_prefix: package_prefix.into(),
        }
    }

    /// Adds overrides.
    #[must_use]
    pub fn with_overrides<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.overrides
            .extend(overrides.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// The suffix token stripped by the heuristic.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Module for a simple name, or `None` when none can be derived.
    ///
    /// A name that is exactly the suffix (`Container`) has an empty stem and
    /// yields `None` rather than an empty module name.
    #[must_use]
    pub fn derive_target_module(&self, simple_name: &str) -> Option<String> {
        if let Some(module) = self.overrides.get(simple_name) {
            return Some(module.clone());
        }
        let stem = simple_name.strip_suffix(self.suffix.as_str())?;
        if stem.is_empty() {
            return None;
        }
        Some(stem.to_lowercase())
    }

    /// Package the module lives in: `<prefix>.<module>`.
    #[must_use]
    pub fn module_package(&self, simple_name: &str) -> Option<String> {
        self.derive_target_module(simple_name)
            .map(|module| format!("{}.{module}", self.package_prefix))
    }

    /// Number of overrides.
    #[must_use]
    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }
}
