//! List rules command implementation.

use anyhow::Result;
use archrules_core::RuleRegistry;
use archrules_rules::{all_rule_sets, Preset};

const DESCRIPTION_WIDTH: usize = 80;

/// Runs the list-rules command.
pub fn run() -> Result<()> {
    let sets = all_rule_sets();
    let registry = RuleRegistry::from_sets(&sets)?;

    println!("Available rules:\n");
    println!("{:<28} {:<48} {:<8} Description", "Rule set", "Name", "Priority");
    println!("{}", "-".repeat(140));

    for registered in registry.rules() {
        println!(
            "{:<28} {:<48} {:<8} {}",
            registered.rule_set,
            registered.name,
            registered.rule.priority(),
            truncate(registered.rule.description(), DESCRIPTION_WIDTH)
        );
    }

    println!("\nRule sets:");
    for set in &sets {
        println!("  {:<28} {}", set.name(), set.description());
    }

    println!("\nPresets:");
    for preset in Preset::ALL {
        let names: Vec<&str> = preset.rule_sets().iter().map(|s| s.name()).collect();
        println!("  {:<12} {}", preset.name(), names.join(", "));
    }

    println!("\nUse --rules or --preset to select rules, e.g.:");
    println!("  archrules check --rules jodaRule,javaxRule");
    println!("  archrules check --preset security");
    Ok(())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_descriptions_are_cut() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer description", 10), "a longe...");
    }
}
