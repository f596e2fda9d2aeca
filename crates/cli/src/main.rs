//! Mobydick - distribute the workflow file to every repository of an organisation
//! and check Dockerfiles for versioned base images

mod args;
mod config;
mod output;
mod telemetry;

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, info_span, warn, Instrument};

use args::{Cli, Commands, ValidateArgs};
use config::DistributeConfig;
use mobydick_core::application::{cancellation_channel, DistributionManager, WorkerPool};
use mobydick_core::port::time_provider::SystemTimeProvider;
use mobydick_infra_github::OctocrabRepositories;
use mobydick_infra_template::load_workflow_file;
use mobydick_validate::{validate_tree, ValidationStatus};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let Cli {
        organisation,
        token,
        api_url,
        command,
    } = Cli::parse();

    // Keep the guard alive until exit so buffered file logs are flushed
    let _log_guard = telemetry::init_logging()?;
    info!("Mobydick v{} starting...", mobydick_core::VERSION);

    match command {
        Commands::Distribute(args) => {
            let config = DistributeConfig::new(organisation, token, api_url, args);
            distribute(config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Validate(args) => validate(args),
    }
}

fn validate(args: ValidateArgs) -> Result<ExitCode> {
    let report = validate_tree(&args.path)
        .with_context(|| format!("failed to scan {}", args.path.display()))?;
    output::print_validation(&report, args.output)?;

    match report.status() {
        ValidationStatus::Fail => Ok(ExitCode::FAILURE),
        ValidationStatus::Skip | ValidationStatus::Pass => Ok(ExitCode::SUCCESS),
    }
}

async fn distribute(config: DistributeConfig) -> Result<()> {
    // 1. Configuration errors abort before any network activity
    config.validate()?;
    let workflow_file = load_workflow_file(&config.file, &config.version)
        .context("failed to load workflow file")?;

    // 2. Setup dependencies (DI wiring)
    let repositories = Arc::new(
        OctocrabRepositories::from_token(&config.token, config.api_url.as_deref())
            .context("failed to create GitHub client")?,
    );
    let worker_pool = WorkerPool::new(config.concurrency)?;
    let manager = DistributionManager::new(
        config.organisation.clone(),
        config.dry_run,
        workflow_file,
        worker_pool,
        repositories,
        Arc::new(SystemTimeProvider),
    );

    // 3. Ctrl+C cancels in-flight commits; every result is still collected
    let (cancel, ctx) = cancellation_channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling in-flight commits");
            cancel.cancel();
        }
    });

    // 4. Run
    let run_id = uuid::Uuid::new_v4();
    let span = info_span!("distribute", run_id = %run_id, organisation = %config.organisation);
    let report = manager
        .distribute(&ctx, config.visibility())
        .instrument(span)
        .await?;

    output::print_report(&report, config.output)?;
    Ok(())
}
