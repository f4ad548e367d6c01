//! `conductor` — the fleet orchestrator's command-line entry point.
//!
//! Loads a plan file and a layered config (§4.13), wires up the
//! [`Scheduler`](conductor_scheduler::Scheduler) with every other
//! component it owns, and drives the auto-mode main loop (§4.10) to
//! completion, printing the final progress snapshot.

mod plan_file;

use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap::Subcommand;
use conductor_config::Config;
use conductor_error::ErrorExt;
use conductor_scheduler::AutoOutcome;
use conductor_scheduler::Scheduler;
use conductor_scheduler::plan::resolve_plan;
use sha2::Digest;
use sha2::Sha256;
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "conductor", version, about = "Orchestrates worker subprocesses against a feature plan")]
struct Cli {
    /// Directory the worker subprocesses are launched in.
    #[arg(long, global = true, default_value = ".")]
    cwd: PathBuf,

    /// Path to `conductor.toml`; defaults to `<cwd>/conductor.toml`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the scheduler's auto-mode loop against a plan file until every
    /// feature reaches a terminal state (§4.10).
    Run {
        /// Path to the plan JSON document (see `plan_file::PlanFile`).
        plan: PathBuf,
        /// Override the worker command from config.
        #[arg(long)]
        worker_command: Option<String>,
        /// Override the max-concurrency cap from config.
        #[arg(long)]
        max_concurrency: Option<usize>,
    },
    /// Resume auto mode from an existing progress snapshot: roots the
    /// snapshot already recorded as terminal are not redispatched (§4.11
    /// "reload on startup").
    Resume {
        /// Path to the plan JSON document the original run used.
        plan: PathBuf,
        /// Path to the progress snapshot to resume from.
        progress: PathBuf,
    },
    /// Print the current progress snapshot (§4.11, §6).
    Status,
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(error = %err, "conductor failed");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config_path = cli.config.clone().unwrap_or_else(|| cli.cwd.join(conductor_config::DEFAULT_CONFIG_FILE));
    let mut config = conductor_config::load(&config_path).with_context(|| format!("loading config from {}", config_path.display()))?;

    match cli.command {
        Command::Run { plan, worker_command, max_concurrency } => {
            if let Some(cmd) = worker_command {
                config.worker_command = cmd;
            }
            if let Some(cap) = max_concurrency {
                config.max_concurrency = cap;
            }
            run_plan(config, &cli.cwd, &plan, false).await
        }
        Command::Resume { plan, progress } => {
            config.progress_path = progress.display().to_string();
            run_plan(config, &cli.cwd, &plan, true).await
        }
        Command::Status => print_status(&config),
    }
}

async fn run_plan(config: Config, cwd: &Path, plan_path: &Path, resume: bool) -> Result<ExitCode> {
    let plan_entries = plan_file::load_plan_file(plan_path).with_context(|| format!("loading plan from {}", plan_path.display()))?;
    let prd_hash = Some(hash_plan_file(plan_path)?);

    let scheduler = Scheduler::new(config, cwd.to_path_buf(), prd_hash).map_err(scheduler_err_to_anyhow)?;
    scheduler.load_plan(resolve_plan(plan_entries));
    if resume {
        scheduler.reconcile_with_snapshot();
    }

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("received interrupt, stopping all workers");
        shutdown.cancel();
    });

    let scheduler_ref = &scheduler;
    let outcome = tokio::select! {
        outcome = scheduler_ref.run_auto() => outcome.map_err(scheduler_err_to_anyhow)?,
        _ = cancel.cancelled() => {
            scheduler.stop_all();
            println!("stopped: interrupted");
            return Ok(ExitCode::FAILURE);
        }
    };

    print_snapshot(&scheduler.progress());

    match outcome {
        AutoOutcome::AllCompleted => {
            println!("all completed");
            Ok(ExitCode::SUCCESS)
        }
        AutoOutcome::SomeFailed { failed_ids } => {
            println!("stopped: some features failed after max retries ({})", failed_ids.join(", "));
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_status(config: &Config) -> Result<ExitCode> {
    let snapshot = conductor_progress::ProgressStore::load_or_init(
        &config.progress_path,
        &config.legacy_progress_path,
        None,
        conductor_protocol::snapshot::SnapshotConfig { max_retries: config.max_retries, max_concurrency: config.max_concurrency as i32 },
    )
    .context("loading progress snapshot")?
    .snapshot();

    print_snapshot(&snapshot);
    Ok(ExitCode::SUCCESS)
}

fn print_snapshot(snapshot: &conductor_protocol::snapshot::ProgressSnapshot) {
    match serde_json::to_string_pretty(snapshot) {
        Ok(json) => println!("{json}"),
        Err(err) => tracing::error!(error = %err, "failed to serialize progress snapshot"),
    }
}

fn hash_plan_file(path: &Path) -> Result<String> {
    let contents = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let digest = Sha256::digest(&contents);
    Ok(format!("{digest:x}"))
}

fn scheduler_err_to_anyhow(err: conductor_scheduler::SchedulerError) -> anyhow::Error {
    anyhow::anyhow!("{}", err.output_msg())
}

#[cfg(test)]
#[path = "main.test.rs"]
mod tests;
