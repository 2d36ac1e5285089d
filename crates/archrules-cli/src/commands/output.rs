//! Shared output formatting for evaluation reports.

use anyhow::Result;
use archrules_core::{Priority, Report};

use crate::OutputFormat;

/// Print the report in the specified format.
pub fn print(report: &Report, format: OutputFormat, fail_on: Priority) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(report, fail_on),
        OutputFormat::Json => return print_json(report),
        OutputFormat::Compact => print_compact(report),
    }
    Ok(())
}

fn priority_indicator(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "\x1b[31mhigh\x1b[0m",
        Priority::Medium => "\x1b[33mmedium\x1b[0m",
        Priority::Low => "\x1b[34mlow\x1b[0m",
    }
}

fn print_text(report: &Report, fail_on: Priority) {
    for outcome in report.outcomes.iter().filter(|o| o.has_violation()) {
        println!(
            "{} {} ({})",
            priority_indicator(outcome.result.priority),
            outcome.name,
            outcome.rule_set
        );
        println!("  = rule: {}", outcome.result.description);
        for message in outcome.result.messages() {
            println!("  - {message}");
        }
        println!();
    }

    let (high, medium, low) = report.count_by_priority();
    let summary_color = if report.has_violations_at(fail_on) {
        "\x1b[31m"
    } else if high + medium + low > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} high, {} medium, {} low violation(s) in {} class(es)\x1b[0m",
        summary_color, high, medium, low, report.classes_checked
    );
}

fn print_json(report: &Report) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}

fn print_compact(report: &Report) {
    for line in compact_lines(report) {
        println!("{line}");
    }
}

fn compact_lines(report: &Report) -> Vec<String> {
    report
        .outcomes
        .iter()
        .flat_map(|outcome| {
            outcome.result.violations.iter().flat_map(move |event| {
                event.messages().iter().map(move |message| {
                    format!(
                        "{}: {} [{}] {}",
                        event.subject().name,
                        outcome.result.priority,
                        outcome.name,
                        message
                    )
                })
            })
        })
        .collect()
}
