//! civic-sim: check governance configs and replay scenarios against an
//! in-memory host.

mod scenario;

use anyhow::Context;
use civic_governance::{EventBus, GovernanceConfig};
use civic_utils::{format_blocks, init_logging, LogFormat};
use clap::Parser;
use scenario::{Scenario, Simulation};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "civic-sim", about = "Stake-weighted governance simulator")]
struct Cli {
    /// Path to a TOML configuration file. CLI flags and env vars override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use short devnet windows when no config file is given.
    #[arg(long, global = true, env = "CIVIC_DEVNET")]
    devnet: bool,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, global = true, env = "CIVIC_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, global = true, env = "CIVIC_LOG_FORMAT")]
    log_format: Option<String>,

    /// Seconds per block, used only to describe windows in the logs.
    #[arg(long, global = true, default_value_t = 12, env = "CIVIC_BLOCK_SECS")]
    block_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Inspect configuration files.
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Replay a JSON scenario and print every event as a JSON line.
    Run {
        scenario: PathBuf,

        /// Abort on the first failed step.
        #[arg(long)]
        strict: bool,

        /// Write the final engine state (bincode) to this file.
        #[arg(long)]
        save_state: Option<PathBuf>,
    },
}

#[derive(clap::Subcommand)]
enum ConfigAction {
    /// Parse and validate a config file, then print it back with defaults filled in.
    Check { path: PathBuf },
    /// Print the default configuration.
    Defaults,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Command::Config { action } = &cli.command {
        return match action {
            ConfigAction::Check { path } => {
                let config = GovernanceConfig::from_toml_file(path)
                    .with_context(|| format!("config {} rejected", path.display()))?;
                print!("{}", config.to_toml_string()?);
                Ok(())
            }
            ConfigAction::Defaults => {
                let config = if cli.devnet {
                    GovernanceConfig::devnet()
                } else {
                    GovernanceConfig::default()
                };
                print!("{}", config.to_toml_string()?);
                Ok(())
            }
        };
    }

    let mut config = match &cli.config {
        Some(path) => GovernanceConfig::from_toml_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None if cli.devnet => GovernanceConfig::devnet(),
        None => GovernanceConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    let log_format: LogFormat = config.log_format.parse()?;
    init_logging(log_format, &config.log_level);

    let Command::Run {
        scenario,
        strict,
        save_state,
    } = cli.command
    else {
        return Ok(());
    };

    tracing::info!(
        account = %config.governance_account,
        quorum = config.quorum,
        voting_period = %format_blocks(config.voting_period, cli.block_secs),
        execution_delay = %format_blocks(config.execution_delay, cli.block_secs),
        "starting simulation"
    );

    let scenario = Scenario::from_json_file(&scenario)?;
    let events = Arc::new(EventBus::new());
    events.subscribe(|event| match serde_json::to_string(event) {
        Ok(line) => println!("{line}"),
        Err(e) => tracing::warn!(error = %e, "failed to serialize event"),
    });

    let sim = Simulation::new(&config, &scenario, events)?;
    let summary = sim.run(&scenario.steps, strict)?;

    for (id, state) in &summary.proposals {
        tracing::info!(proposal = %id, state = ?state, "final proposal state");
    }
    for (param, value) in &summary.parameters {
        tracing::info!(param = param.name(), value = %value, "final parameter value");
    }

    if let Some(path) = save_state {
        let bytes = sim.engine().save_state()?;
        std::fs::write(&path, bytes)
            .with_context(|| format!("failed to write state to {}", path.display()))?;
        tracing::info!(path = %path.display(), "engine state saved");
    }

    if summary.failed > 0 {
        eprintln!("{} of {} steps failed", summary.failed, scenario.steps.len());
    }
    Ok(())
}
