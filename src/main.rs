//! mp3sync
//!
//! Usage:
//!     mp3sync --config config.json [--yes] [--log-level info]

mod cli;

use anyhow::Context;
use bridge_desktop::{
    AssumeYes, ConsoleReporter, FileErrorLog, Fs2DiskSpaceProbe, TerminalPrompt,
};
use bridge_traits::prompt::Prompt;
use clap::Parser;
use cli::Args;
use core_metadata::MetadataExtractor;
use core_runtime::{
    config::SyncConfig,
    logging::{init_logging, LoggingConfig},
};
use core_sync::{SyncCoordinator, SyncError, SyncOutcome};
use std::process::ExitCode;
use std::sync::Arc;

const EXIT_FAILURE: u8 = 1;
const EXIT_ABORTED: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let logging = LoggingConfig::default()
        .with_format(args.log_format)
        .with_level(args.log_level);
    if let Err(e) = init_logging(logging) {
        eprintln!("{}", e);
        return ExitCode::from(EXIT_FAILURE);
    }

    let reporter = Arc::new(ConsoleReporter::new());

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            reporter.print_failure(&format!("{:#}", e));
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    reporter.print_header(&config.source, &config.destination);

    match run(config, &args, reporter.clone()).await {
        Ok(outcome) if outcome.has_errors() => {
            let log = outcome
                .log_file
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_default();
            reporter.print_failure(&format!("{} errors, see log {}", outcome.errors, log));
            ExitCode::from(EXIT_FAILURE)
        }
        Ok(_) => {
            reporter.print_success();
            ExitCode::SUCCESS
        }
        Err(e) => {
            let aborted = e
                .downcast_ref::<SyncError>()
                .map(SyncError::is_user_abort)
                .unwrap_or(false);
            reporter.print_failure(&format!("{:#}", e));
            if aborted {
                ExitCode::from(EXIT_ABORTED)
            } else {
                ExitCode::from(EXIT_FAILURE)
            }
        }
    }
}

fn load_config(args: &Args) -> anyhow::Result<SyncConfig> {
    let mut config = SyncConfig::load(&args.config).context("failed to load config")?;

    if let Some(log_dir) = &args.log_dir {
        config.log_dir = log_dir.clone();
    }

    Ok(config)
}

async fn run(
    config: SyncConfig,
    args: &Args,
    reporter: Arc<ConsoleReporter>,
) -> anyhow::Result<SyncOutcome> {
    let prompt: Arc<dyn Prompt> = if args.yes {
        Arc::new(AssumeYes)
    } else {
        Arc::new(TerminalPrompt::new())
    };
    let error_log = Arc::new(FileErrorLog::new(config.log_dir.clone()));

    tracing::info!(
        source = %config.source.display(),
        destination = %config.destination.display(),
        "Starting sync"
    );

    let coordinator = SyncCoordinator::new(
        config,
        Arc::new(MetadataExtractor::new()),
        prompt,
        error_log,
        Arc::new(Fs2DiskSpaceProbe::new()),
        reporter,
    )?;

    Ok(coordinator.run().await?)
}
