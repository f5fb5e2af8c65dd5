use std::path::Path;
use std::time::Instant;

use crate::pipeline::tag_file_use_case::{FileReport, TagFileError};

/// Receives per-file outcomes as a batch run progresses.
///
/// Only the thread driving the batch calls into the reporter, so
/// implementations need no locking.
pub trait RunReporter: Send {
    fn file_tagged(&mut self, report: &FileReport);

    fn file_failed(&mut self, path: &Path, error: &TagFileError);

    /// An input that never reached processing (missing, unreadable).
    fn input_skipped(&mut self, path: &Path, reason: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Discards all events.
pub struct NullRunReporter;

impl RunReporter for NullRunReporter {
    fn file_tagged(&mut self, _report: &FileReport) {}
    fn file_failed(&mut self, _path: &Path, _error: &TagFileError) {}
    fn input_skipped(&mut self, _path: &Path, _reason: &str) {}
}

/// Running totals over a batch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunTotals {
    pub files_processed: usize,
    pub files_written: usize,
    pub files_failed: usize,
    pub inputs_skipped: usize,
    pub tags_added: usize,
    pub identified: usize,
    pub unknown: usize,
}

impl RunTotals {
    pub fn has_failures(&self) -> bool {
        self.files_failed > 0 || self.inputs_skipped > 0
    }
}

/// Prints human-readable per-file lines to stdout and keeps totals for the
/// closing summary.
pub struct StdoutRunReporter {
    totals: RunTotals,
    start_time: Instant,
}

impl StdoutRunReporter {
    pub fn new() -> Self {
        Self {
            totals: RunTotals::default(),
            start_time: Instant::now(),
        }
    }

    pub fn totals(&self) -> &RunTotals {
        &self.totals
    }

    pub fn summary_string(&self) -> String {
        let t = &self.totals;
        let mut line = format!(
            "Processed {} file(s) in {:.1}s: {} tag(s) added to {} file(s), {} face(s) identified, {} unknown",
            t.files_processed,
            self.start_time.elapsed().as_secs_f64(),
            t.tags_added,
            t.files_written,
            t.identified,
            t.unknown
        );
        if t.has_failures() {
            line.push_str(&format!(
                ". {} file(s) failed, {} input(s) skipped",
                t.files_failed, t.inputs_skipped
            ));
        }
        line
    }
}

impl Default for StdoutRunReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl RunReporter for StdoutRunReporter {
    fn file_tagged(&mut self, report: &FileReport) {
        self.totals.files_processed += 1;
        self.totals.tags_added += report.newly_added.len();
        self.totals.identified += report.identified_faces;
        self.totals.unknown += report.unknown_count;
        if report.metadata_written {
            self.totals.files_written += 1;
        }
        for line in report_lines(report) {
            println!("{line}");
        }
    }

    fn file_failed(&mut self, path: &Path, error: &TagFileError) {
        self.totals.files_failed += 1;
        log::error!("Failed to process {}: {error}", path.display());
    }

    fn input_skipped(&mut self, path: &Path, reason: &str) {
        self.totals.inputs_skipped += 1;
        log::warn!("Cannot read {} ({reason}), skipping", path.display());
    }

    fn summary(&self) {
        println!("{}", self.summary_string());
    }
}

/// User-facing lines describing one file's outcome.
pub fn report_lines(report: &FileReport) -> Vec<String> {
    let file = report.path.display();
    let mut lines = Vec::new();
    if report.faces_detected == 0 {
        lines.push(format!(
            "No persons, not even unknown ones, identified in {file}."
        ));
    }
    for name in &report.newly_added {
        lines.push(format!("Found {name} in {file}. Updating metadata!"));
    }
    for name in &report.already_tagged {
        lines.push(format!(
            "{name} is already tagged in {file}. Not adding them again."
        ));
    }
    if report.unknown_count > 0 {
        lines.push(format!(
            "{} unknown person(s) detected in {file}. Please check manually!",
            report.unknown_count
        ));
    }
    lines.push(format!(
        "{file}: {} identified, {} unknown.",
        report.identified_faces,
        report.unknown_count
    ));
    lines
}
