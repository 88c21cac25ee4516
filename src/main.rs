//! rolegrant CLI
//!
//! Usage: rolegrant <COMMAND>
//!
//! Commands:
//!   inspect  Show the menu tree of a system with the current selection
//!   stats    Count selected and known permissions
//!   apply    Apply a toggle script and print the saved payload

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;

use rolegrant::Config;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(&cli)?;

    match cli.command {
        Commands::Inspect {
            forest,
            granted,
            system,
            keyword,
        } => commands::inspect::cmd_inspect(
            &forest,
            granted.as_deref(),
            system.as_deref(),
            keyword.as_deref(),
            cli.json,
        ),
        Commands::Stats { forest, granted } => {
            commands::stats::cmd_stats(&forest, granted.as_deref(), cli.json)
        }
        Commands::Apply {
            forest,
            granted,
            resources,
            script,
            role,
        } => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("failed to start async runtime")?;
            runtime.block_on(commands::apply::cmd_apply(
                commands::apply::ApplyArgs {
                    forest: &forest,
                    granted: granted.as_deref(),
                    resources: resources.as_deref(),
                    script: &script,
                    role: &role,
                },
                &config,
                cli.json,
            ))
        }
    }
}

/// `-v` raises the level; `RUST_LOG` wins when set. Logs go to stderr so
/// stdout stays clean for JSON output.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let Some(path) = &cli.config else {
        let cwd = std::env::current_dir().context("cannot read working directory")?;
        return Ok(Config::load_or_default(Some(&cwd)));
    };

    let (config, warnings) = Config::load_with_warnings(path)
        .with_context(|| format!("failed to load config {}", path.display()))?;
    for warning in &warnings {
        warn!("{warning}");
    }
    Ok(config.with_env_overrides())
}
