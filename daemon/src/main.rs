//! Ballot daemon: entry point for running an election from the command line.

use anyhow::Context;
use ballot_daemon::{report, runner, ElectionConfig, Report, Script};
use ballot_election::Election;
use ballot_utils::{init_logging, LogFormat};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ballot", about = "Single-election voting ledger")]
struct Cli {
    /// Log format: "human" or "json". Overrides the config file.
    #[arg(long, global = true, env = "BALLOT_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    /// Overrides the config file.
    #[arg(long, global = true, env = "BALLOT_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Create an election from a config file and replay a script against it.
    Run {
        /// Path to the election TOML configuration.
        #[arg(long, env = "BALLOT_CONFIG")]
        config: PathBuf,

        /// Path to the TOML command script.
        #[arg(long)]
        script: PathBuf,

        /// Abort on the first rejected step instead of recording it.
        #[arg(long)]
        strict: bool,

        /// Write a binary snapshot of the final election here.
        #[arg(long)]
        snapshot_out: Option<PathBuf>,
    },
    /// Print the election phases and the transition out of each.
    Phases,
    /// Print the report for a previously saved snapshot.
    Inspect {
        /// Path to a snapshot written by `run --snapshot-out`.
        #[arg(long)]
        snapshot: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            config,
            script,
            strict,
            snapshot_out,
        } => {
            let config = ElectionConfig::from_toml_file(&config)
                .with_context(|| format!("loading config {}", config.display()))?;
            init_logging(
                cli.log_format.unwrap_or(config.log_format),
                cli.log_level.as_deref().unwrap_or(&config.log_level),
            );

            let script = Script::from_toml_file(&script)
                .with_context(|| format!("loading script {}", script.display()))?;
            tracing::info!(
                owner = %config.owner,
                steps = script.steps.len(),
                strict,
                "starting election run"
            );

            let mut election = runner::bootstrap(&config)?;
            let steps = runner::run_script(&mut election, &script, strict)?;

            if let Some(path) = snapshot_out {
                let bytes = election.save_state()?;
                std::fs::write(&path, bytes)
                    .with_context(|| format!("writing snapshot {}", path.display()))?;
                tracing::info!("snapshot written to {}", path.display());
            }

            println!("{}", Report::new(&election, steps).to_json()?);
        }
        Command::Phases => {
            println!("{}", report::phase_table());
        }
        Command::Inspect { snapshot } => {
            init_logging(
                cli.log_format.unwrap_or_default(),
                cli.log_level.as_deref().unwrap_or("info"),
            );
            let bytes = std::fs::read(&snapshot)
                .with_context(|| format!("reading snapshot {}", snapshot.display()))?;
            let election = Election::load_state(&bytes)?;
            println!("{}", Report::new(&election, Vec::new()).to_json()?);
        }
    }

    Ok(())
}
