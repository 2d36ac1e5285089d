//! archrules CLI tool.
//!
//! Usage:
//! ```bash
//! archrules check [OPTIONS] [PATH]
//! archrules list-rules
//! archrules init
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use archrules_core::{EvaluatorError, Priority};
use archrules_rules::Preset;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Architecture rules for compiled JVM code
#[derive(Parser)]
#[command(name = "archrules")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate rules against a class model
    Check {
        /// Project directory (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Model file or directory (default: `[model] path` from config)
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run specific rules (comma-separated)
        #[arg(long)]
        rules: Option<String>,

        /// Rule sets to run: all, migration or security
        #[arg(long, default_value_t = Preset::All)]
        preset: Preset,

        /// Lowest priority that fails the check (default: `fail_on` from config)
        #[arg(long)]
        fail_on: Option<FailOn>,
    },

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for evaluation reports.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
}

/// Fail threshold.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum FailOn {
    /// Any violation fails.
    Low,
    /// Medium and high violations fail.
    Medium,
    /// Only high violations fail.
    High,
}

impl From<FailOn> for Priority {
    fn from(value: FailOn) -> Self {
        match value {
            FailOn::Low => Self::Low,
            FailOn::Medium => Self::Medium,
            FailOn::High => Self::High,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(true) => ExitCode::from(1),
        Ok(false) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(err);
            ExitCode::from(2)
        }
    }
}

/// Returns `true` when the check failed.
fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Commands::Check {
            path,
            model,
            format,
            rules,
            preset,
            fail_on,
        } => {
            let loaded = config_resolver::load(&path, cli.config.as_deref())?;
            commands::check::run(&commands::check::CheckArgs {
                project_dir: &path,
                model: model.as_deref(),
                format,
                rules_filter: rules.as_deref(),
                preset,
                fail_on: fail_on.map(Priority::from),
                loaded,
            })
        }
        Commands::ListRules => {
            commands::list_rules::run()?;
            Ok(false)
        }
        Commands::Init { force } => {
            commands::init::run(force)?;
            Ok(false)
        }
    }
}

fn report_error(err: anyhow::Error) {
    match err.downcast::<EvaluatorError>() {
        Ok(EvaluatorError::Rule(rule_error)) => {
            eprintln!("{:?}", miette::Report::new(rule_error));
        }
        Ok(other) => eprintln!("Error: {other}"),
        Err(err) => eprintln!("Error: {err:?}"),
    }
}
