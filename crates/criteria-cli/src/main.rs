//! Criteria command line tool
//!
//! Inspects saved criteria payloads: completeness, referenced fields, legal
//! operators, canonical formatting.

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::Command;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "criteria")]
#[command(about = "Inspect and validate saved filter criteria", long_about = None)]
struct Args {
    /// Editor configuration file (YAML or JSON)
    #[arg(short, long, global = true, env = "CRITERIA_CONFIG")]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<ExitCode> {
    init_tracing()?;

    let args = Args::parse();
    commands::run(args.command, args.config.as_deref())
}

/// Initialize tracing subscriber
fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "criteria_cli=info,criteria_sdk=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
