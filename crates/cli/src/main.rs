//! freightctl: validate, build, and submit export schedule definitions.
//!
//! Definitions are YAML files deserialized straight into
//! [`ScheduleDefinition`]. `validate` runs the lint (gate rules plus
//! advisory warnings), `build` prints the wire payload without touching
//! the network, `submit` persists via the configured scheduler endpoint.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use freight_actions::ActionRegistry;
use freight_client::{HttpPersistence, SchedulePersistence};
use freight_core::config::{load_dotenv, Config};
use freight_schedule::{build_request, lint_definition, LintReport, ScheduleDefinition};

#[derive(Parser, Debug)]
#[command(name = "freightctl", version, about)]
struct Cli {
    /// Path to the action-type registry YAML.
    #[arg(long, env = "FREIGHT_REGISTRY")]
    registry: Option<PathBuf>,

    /// Treat unknown action types as errors.
    #[arg(long, env = "FREIGHT_STRICT_ACTIONS")]
    strict_actions: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a definition against the submission gate and lint rules.
    Validate { file: PathBuf },
    /// Print the wire payload for a definition (dry run).
    Build { file: PathBuf },
    /// Build a definition and submit it to the scheduler endpoint.
    Submit { file: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    load_dotenv();
    let config = Config::from_env();
    let cli = Cli::parse();

    let registry = match cli.registry.as_deref().or(config.editor.registry_path.as_deref()) {
        Some(path) => Some(
            ActionRegistry::from_path(path)
                .with_context(|| format!("failed to load registry from {}", path.display()))?,
        ),
        None => None,
    };
    let strict = cli.strict_actions || config.editor.strict_actions;

    match cli.command {
        Command::Validate { file } => {
            let def = load_definition(&file, &config.editor.fallback_timezone)?;
            let report = lint_definition(&def, registry.as_ref(), strict);
            print_report(&report);
            if report.has_errors() {
                bail!("{} blocking issue(s) in {}", report.errors.len(), file.display());
            }
            println!("{} is valid", file.display());
        }
        Command::Build { file } => {
            let def = load_definition(&file, &config.editor.fallback_timezone)?;
            let payload = build_request(&def)?;
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        Command::Submit { file } => {
            let def = load_definition(&file, &config.editor.fallback_timezone)?;

            let report = lint_definition(&def, registry.as_ref(), strict);
            print_report(&report);
            if report.has_errors() {
                bail!("refusing to submit: {} blocking issue(s)", report.errors.len());
            }

            let payload = build_request(&def)?;
            let persistence = HttpPersistence::new(&config.scheduler)?;
            info!(endpoint = %config.scheduler.endpoint, "submitting schedule");
            let ack = persistence.submit(&payload).await?;
            match ack.message {
                Some(message) => println!("saved: {message}"),
                None => println!("saved"),
            }
        }
    }

    Ok(())
}

fn load_definition(path: &Path, fallback_timezone: &str) -> Result<ScheduleDefinition> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let mut def: ScheduleDefinition = serde_yaml::from_str(&raw)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    def.ensure_timezone(fallback_timezone);
    Ok(def)
}

fn print_report(report: &LintReport) {
    for issue in &report.errors {
        match &issue.suggestion {
            Some(hint) => eprintln!("error   {}: {} ({hint})", issue.path, issue.message),
            None => eprintln!("error   {}: {}", issue.path, issue.message),
        }
    }
    for issue in &report.warnings {
        match &issue.suggestion {
            Some(hint) => eprintln!("warning {}: {} ({hint})", issue.path, issue.message),
            None => eprintln!("warning {}: {}", issue.path, issue.message),
        }
    }
}
