//! # Sync Coordinator
//!
//! Runs a complete sync from the source library into the destination tree.
//!
//! ## Workflow
//!
//! 1. Scan source (extension filtered) and destination trees concurrently
//! 2. Read tags, apply the whitelist/blacklist and compute destination paths
//! 3. Log per-file tag errors and ask whether to continue without them
//! 4. Diff against the destination listing
//! 5. Offer to list the planned copies
//! 6. Check free disk space on the destination volume
//! 7. Ask for confirmation and copy the plan
//! 8. Log per-file copy errors
//!
//! The coordinator never prints. Everything the user sees goes through the
//! [`SyncObserver`] and [`Prompt`] collaborators.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use core_sync::SyncCoordinator;
//! use std::sync::Arc;
//!
//! let coordinator = SyncCoordinator::new(
//!     config,
//!     Arc::new(MetadataExtractor::new()),
//!     Arc::new(TerminalPrompt::new()),
//!     Arc::new(FileErrorLog::new("logs")),
//!     Arc::new(Fs2DiskSpaceProbe),
//!     Arc::new(ConsoleReporter::new()),
//! )?;
//!
//! let outcome = coordinator.run().await?;
//! println!("{} files synced", outcome.synced);
//! ```

use bridge_traits::{
    prompt::{Answer, Prompt},
    report::{PlannedCopy, SyncObserver},
    storage::{DiskSpaceProbe, ErrorLog},
};
use core_metadata::TagExtractor;
use core_runtime::config::SyncConfig;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};

use crate::{
    diff::diff,
    disk_space::check_space,
    executor::execute,
    filter::Filter,
    models::{SyncFile, SyncOutcome},
    scanner::{scan_both, ScanFilter},
    transform::PathTransformer,
    Result, SyncError,
};

pub const CONTINUE_QUESTION: &str = "Continue (errored files will be skipped)? [Y/n/s = show files] ";
pub const SHOW_PLAN_QUESTION: &str = "Show files to sync? [Y/n] ";
pub const START_QUESTION: &str = "Start Sync? [Y/n] ";

/// Drives one sync run
pub struct SyncCoordinator {
    config: SyncConfig,
    scan_filter: ScanFilter,
    transformer: PathTransformer,
    extractor: Arc<dyn TagExtractor>,
    prompt: Arc<dyn Prompt>,
    error_log: Arc<dyn ErrorLog>,
    disk_probe: Arc<dyn DiskSpaceProbe>,
    observer: Arc<dyn SyncObserver>,
}

impl SyncCoordinator {
    /// Create a coordinator for a validated configuration
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Config`] if the configuration does not validate.
    pub fn new(
        config: SyncConfig,
        extractor: Arc<dyn TagExtractor>,
        prompt: Arc<dyn Prompt>,
        error_log: Arc<dyn ErrorLog>,
        disk_probe: Arc<dyn DiskSpaceProbe>,
        observer: Arc<dyn SyncObserver>,
    ) -> Result<Self> {
        config.validate()?;

        let scan_filter = ScanFilter::new(&config.extensions);
        let transformer = PathTransformer::new(
            config.source.clone(),
            config.destination.clone(),
            Filter::from_config(&config.filter),
        );

        Ok(Self {
            config,
            scan_filter,
            transformer,
            extractor,
            prompt,
            error_log,
            disk_probe,
            observer,
        })
    }

    /// Run the full workflow
    ///
    /// Per-file errors do not fail the run; they are counted in the returned
    /// [`SyncOutcome`] and written to the error log.
    ///
    /// # Errors
    ///
    /// - [`SyncError::Aborted`] when the user declines a prompt
    /// - [`SyncError::InsufficientDiskSpace`] when the plan does not fit
    /// - any fatal scan, disk, prompt or error log failure
    #[instrument(skip(self), fields(source = %self.config.source.display(), destination = %self.config.destination.display()))]
    pub async fn run(&self) -> Result<SyncOutcome> {
        let mut outcome = SyncOutcome::default();

        let (source_scan, destination_scan) = scan_both(
            self.config.source.clone(),
            Some(self.scan_filter.clone()),
            self.config.destination.clone(),
        )
        .await?;
        self.observer.scan_finished(
            &self.config.source,
            source_scan.entries.len(),
            source_scan.elapsed,
        );
        self.observer.scan_finished(
            &self.config.destination,
            destination_scan.entries.len(),
            destination_scan.elapsed,
        );
        let source_files = source_scan.entries;
        let destination_files = destination_scan.entries;
        outcome.scanned = source_files.len();

        let started = Instant::now();
        let (transformed, errors) = self
            .transformer
            .transform_all(&source_files, self.extractor.as_ref())
            .await;
        self.observer
            .transform_finished(source_files.len(), transformed.len(), started.elapsed());
        outcome.transformed = transformed.len();

        if !errors.is_empty() {
            let messages = messages(&errors);
            outcome.errors += errors.len();
            outcome.log_file = Some(self.log_errors(&messages).await?);

            match self.ask(CONTINUE_QUESTION).await? {
                Answer::No => return Err(SyncError::Aborted),
                Answer::Show => self.observer.show_errors(&messages),
                Answer::Yes => {}
            }
        }

        let plan = diff(&transformed, &destination_files);
        outcome.planned = plan.len();

        if plan.is_empty() {
            info!("Nothing to sync");
            self.observer.sync_finished(0, 0, Duration::ZERO);
            return Ok(outcome);
        }

        if !self.ask(SHOW_PLAN_QUESTION).await?.is_no() {
            let planned: Vec<PlannedCopy> = plan.iter().map(SyncFile::to_planned_copy).collect();
            self.observer.show_plan(&planned);
        }

        let report = check_space(&plan, &self.config.destination, self.disk_probe.as_ref())?;
        self.observer.disk_space(&report.summary());
        report.ensure_admissible()?;

        if self.ask(START_QUESTION).await?.is_no() {
            return Err(SyncError::Aborted);
        }

        let started = Instant::now();
        self.observer.sync_started(plan.len());
        let errors = execute(&plan, self.observer.as_ref()).await;
        outcome.synced = plan.len() - errors.len();
        self.observer
            .sync_finished(outcome.synced, errors.len(), started.elapsed());

        if !errors.is_empty() {
            outcome.errors += errors.len();
            outcome.log_file = Some(self.log_errors(&messages(&errors)).await?);
        }

        info!(
            synced = outcome.synced,
            errors = outcome.errors,
            "Sync finished"
        );
        Ok(outcome)
    }

    async fn ask(&self, question: &str) -> Result<Answer> {
        let raw = self
            .prompt
            .ask(question)
            .await
            .map_err(|e| SyncError::Prompt(e.to_string()))?;
        Ok(Answer::parse(&raw))
    }

    async fn log_errors(&self, messages: &[String]) -> Result<PathBuf> {
        warn!("Found {} errors", messages.len());

        let log_file = self
            .error_log
            .log_errors(messages)
            .await
            .map_err(|e| SyncError::ErrorLog(e.to_string()))?;

        self.observer.errors_logged(messages.len(), &log_file);
        Ok(log_file)
    }
}

fn messages(errors: &[SyncError]) -> Vec<String> {
    errors.iter().map(ToString::to_string).collect()
}
