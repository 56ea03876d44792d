use std::io::Write as _;
use std::process::ExitCode;

use clap::Parser as _;
use dotenvy::dotenv;
use duty_transfer::cli::{Cli, Commands, RunCmd};
use duty_transfer::config::load_config_from_run_cmd;
use duty_transfer::core::{ProcessTransferClient, TerminalPrompt};
use duty_transfer::utils::logging::init_logging;
use duty_transfer::utils::startup_info::log_startup_info;
use duty_transfer::worker::ManifestWorker;
use duty_transfer::DutyResult;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    if let Err(e) = init_logging() {
        // The subscriber is not available yet
        let _ = writeln!(std::io::stderr(), "Failed to initialise logging: {:#}", e);
        return ExitCode::FAILURE;
    }
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Run { run_command } => run_transfers(run_command).await,
        Commands::Plan { run_command } => plan_transfers(run_command).await,
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, error_chain = ?e, "duty-transfer aborted");
            ExitCode::FAILURE
        }
    }
}

async fn run_transfers(run_cmd: &RunCmd) -> DutyResult<ExitCode> {
    let config = load_config_from_run_cmd(run_cmd)?;
    log_startup_info(&config, run_cmd.manifest.as_deref());

    let prompt = TerminalPrompt::new();
    let client = ProcessTransferClient::new(config.transfer.clone());
    let worker = ManifestWorker::new(&config, &prompt, &client);

    let summary = worker.run(run_cmd.manifest.as_deref()).await?;
    summary.log();
    if summary.has_archive_failures() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

async fn plan_transfers(run_cmd: &RunCmd) -> DutyResult<ExitCode> {
    let config = load_config_from_run_cmd(run_cmd)?;
    let prompt = TerminalPrompt::new();
    let client = ProcessTransferClient::new(config.transfer.clone());
    let worker = ManifestWorker::new(&config, &prompt, &client);

    let mut stdout = std::io::stdout().lock();
    for path in worker.manifests(run_cmd.manifest.as_deref())? {
        let preview = worker.preview(&path).await?;
        info!(manifest = %preview.name.file_name, jobs = preview.plan.job_count(), "Planned");

        writeln!(stdout, "# {} ({} mode, {})", preview.name.file_name, preview.mode, preview.plan.project)?;
        for dir in &preview.plan.directories {
            writeln!(stdout, "mkdir {}", dir.display())?;
        }
        for (batch, command) in preview.batches.iter().zip(&preview.command_lines) {
            writeln!(stdout, "[batch {} of {}, {} jobs] {}", batch.index, preview.batches.len(), batch.len(), command)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
