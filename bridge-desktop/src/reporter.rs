//! Console presentation of sync progress
//!
//! Status lines use `console` colors, the copy phase gets an `indicatif`
//! progress bar and byte counts are formatted with `humansize`.

use bridge_traits::report::{DiskSpaceSummary, PlannedCopy, SyncObserver};
use console::style;
use humansize::{format_size, BINARY};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

const PROGRESS_TEMPLATE: &str = "{bar:40.cyan/blue} {pos}/{len} [{elapsed_precise}] {wide_msg}";

/// Prints run status to stdout
pub struct ConsoleReporter {
    progress: Mutex<Option<ProgressBar>>,
    hidden: bool,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self {
            progress: Mutex::new(None),
            hidden: false,
        }
    }

    /// Reporter whose progress bar never draws
    pub fn hidden() -> Self {
        Self {
            progress: Mutex::new(None),
            hidden: true,
        }
    }

    pub fn print_header(&self, source: &Path, destination: &Path) {
        println!("{}", style("MP3 sync started ...").green().bold());
        println!();
        println!(
            "{} {}",
            style("Source:").green(),
            style(source.display()).yellow()
        );
        println!(
            "{} {}",
            style("Destination:").green(),
            style(destination.display()).yellow()
        );
        println!();
    }

    pub fn print_success(&self) {
        println!();
        println!("{}", style("MP3 sync finished successful!").green().bold());
    }

    pub fn print_failure(&self, message: &str) {
        println!();
        println!(
            "{}",
            style(format!("MP3 sync finished with error: {}", message)).red()
        );
    }

    fn new_bar(&self, total: usize) -> ProgressBar {
        let bar = ProgressBar::new(total as u64);
        if self.hidden {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        if let Ok(template) = ProgressStyle::with_template(PROGRESS_TEMPLATE) {
            bar.set_style(template.progress_chars("=> "));
        }
        bar
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.progress.lock() {
            if let Some(bar) = guard.as_ref() {
                f(bar);
            }
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Human-readable size of a possibly negative byte count
pub(crate) fn format_signed(bytes: i64) -> String {
    let size = format_size(bytes.unsigned_abs(), BINARY);
    if bytes < 0 {
        format!("-{}", size)
    } else {
        size
    }
}

pub(crate) fn plan_line(copy: &PlannedCopy) -> String {
    let action = if copy.overwrite { "overwrite" } else { "copy" };
    format!(
        "{} {} -> {} ({})",
        action,
        copy.source.display(),
        copy.destination.display(),
        format_size(copy.size, BINARY)
    )
}

impl SyncObserver for ConsoleReporter {
    fn scan_finished(&self, root: &Path, files: usize, elapsed: Duration) {
        println!(
            "{}",
            style(format!(
                "{} files found in {} in {:?}",
                files,
                root.display(),
                elapsed
            ))
            .green()
        );
    }

    fn transform_finished(&self, scanned: usize, transformed: usize, elapsed: Duration) {
        println!(
            "{}",
            style(format!(
                "{} files filtered and transformed result in {} files in {:?}",
                scanned, transformed, elapsed
            ))
            .green()
        );
        println!();
    }

    fn errors_logged(&self, count: usize, log_file: &Path) {
        println!("{}", style(format!("found {} errors", count)).red());
        println!(
            "{}",
            style(format!("logged errors in file {}", log_file.display())).red()
        );
    }

    fn show_errors(&self, errors: &[String]) {
        for error in errors {
            println!("{}", style(error).red());
        }
    }

    fn show_plan(&self, plan: &[PlannedCopy]) {
        for copy in plan {
            println!("{}", style(plan_line(copy)).blue().bright());
        }
        println!();
    }

    fn disk_space(&self, summary: &DiskSpaceSummary) {
        let line = |label: &str, value: String| {
            println!("{}", style(format!("{}: {}", label, value)).blue().bright());
        };
        line("Free Disk Space", format_size(summary.free, BINARY));
        line("Disk Space Needed", format_size(summary.needed, BINARY));
        line("Disk Space Left", format_signed(summary.left));
        println!();
    }

    fn sync_started(&self, total: usize) {
        let bar = self.new_bar(total);
        if let Ok(mut guard) = self.progress.lock() {
            *guard = Some(bar);
        }
    }

    fn file_processed(&self, destination: &Path, ok: bool) {
        self.with_bar(|bar| {
            if !ok {
                bar.println(format!(
                    "{}",
                    style(format!("failed: {}", destination.display())).red()
                ));
            }
            bar.set_message(destination.display().to_string());
            bar.inc(1);
        });
    }

    fn sync_finished(&self, synced: usize, failed: usize, elapsed: Duration) {
        if let Ok(mut guard) = self.progress.lock() {
            if let Some(bar) = guard.take() {
                bar.finish_and_clear();
            }
        }

        if synced == 0 && failed == 0 {
            println!("{}", style("Nothing to sync").green());
            return;
        }

        println!(
            "{}",
            style(format!("{} files synced in {:?}", synced, elapsed)).green()
        );
        if failed > 0 {
            println!("{}", style(format!("{} files failed", failed)).red());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_signed() {
        let kib = format_size(1024u64, BINARY);
        assert_eq!(format_signed(1024), kib);
        assert_eq!(format_signed(-1024), format!("-{}", kib));
        assert!(!format_signed(0).starts_with('-'));
    }

    #[test]
    fn test_plan_line() {
        let copy = PlannedCopy {
            source: PathBuf::from("/music/queen/05.mp3"),
            destination: PathBuf::from("/player/Q/Queen - Jazz.mp3"),
            size: 2048,
            overwrite: true,
        };
        assert_eq!(
            plan_line(&copy),
            format!(
                "overwrite /music/queen/05.mp3 -> /player/Q/Queen - Jazz.mp3 ({})",
                format_size(2048u64, BINARY)
            )
        );
    }

    #[test]
    fn test_progress_lifecycle() {
        let reporter = ConsoleReporter::hidden();
        reporter.sync_started(3);
        reporter.file_processed(Path::new("/player/A/a.mp3"), true);
        reporter.file_processed(Path::new("/player/B/b.mp3"), true);

        let position = reporter
            .progress
            .lock()
            .unwrap()
            .as_ref()
            .map(|bar| bar.position());
        assert_eq!(position, Some(2));

        reporter.sync_finished(2, 1, Duration::from_millis(5));
        assert!(reporter.progress.lock().unwrap().is_none());
    }

    #[test]
    fn test_ticks_without_bar_are_ignored() {
        let reporter = ConsoleReporter::hidden();
        reporter.file_processed(Path::new("/player/A/a.mp3"), false);
        assert!(reporter.progress.lock().unwrap().is_none());
    }
}
