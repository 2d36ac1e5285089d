//! Rule set presets.

use std::fmt;
use std::str::FromStr;

use archrules_core::RuleSetBox;

use crate::{
    CveRules, DeprecationRules, GradlePluginRules, GuavaRules, JavaxRules, JodaRules,
    NullabilityRules, TestcontainersRules,
};

/// Named groups of rule sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Every built-in set.
    #[default]
    All,
    /// Library migrations: deprecation, Guava, Javax, Joda and Testcontainers.
    Migration,
    /// Known vulnerable call sites only.
    Security,
}

impl Preset {
    /// Every preset, in display order.
    pub const ALL: [Self; 3] = [Self::All, Self::Migration, Self::Security];

    /// Preset name as accepted by [`FromStr`].
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Migration => "migration",
            Self::Security => "security",
        }
    }

    /// Returns the rule sets of this preset.
    #[must_use]
    pub fn rule_sets(self) -> Vec<RuleSetBox> {
        match self {
            Self::All => all_rule_sets(),
            Self::Migration => vec![
                Box::new(DeprecationRules),
                Box::new(GuavaRules),
                Box::new(JavaxRules),
                Box::new(JodaRules),
                Box::new(TestcontainersRules),
            ],
            Self::Security => vec![Box::new(CveRules)],
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown preset '{s}' (expected all, migration or security)"))
    }
}

/// Returns every built-in rule set.
#[must_use]
pub fn all_rule_sets() -> Vec<RuleSetBox> {
    vec![
        Box::new(DeprecationRules),
        Box::new(TestcontainersRules),
        Box::new(GradlePluginRules),
        Box::new(GuavaRules),
        Box::new(JavaxRules),
        Box::new(JodaRules),
        Box::new(NullabilityRules),
        Box::new(CveRules),
    ]
}

/// Looks up a built-in rule set by name.
#[must_use]
pub fn rule_set(name: &str) -> Option<RuleSetBox> {
    all_rule_sets().into_iter().find(|s| s.name() == name)
}
