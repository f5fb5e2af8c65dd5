use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::pipeline::batch_executor::{BatchError, BatchExecutor};
use crate::pipeline::run_reporter::RunReporter;
use crate::pipeline::tag_file_use_case::{FileReport, FileTagger, TagFileError};

type Outcome = (PathBuf, Result<FileReport, TagFileError>);

/// Tags files on a fixed pool of scoped worker threads.
///
/// Layout: `job queue → N workers → main [report]`
///
/// Workers pull paths from a shared queue and send outcomes back; the
/// calling thread owns the reporter. Completion order across workers is
/// not deterministic.
pub struct ThreadedBatchExecutor {
    workers: usize,
}

impl ThreadedBatchExecutor {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }
}

impl Default for ThreadedBatchExecutor {
    fn default() -> Self {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self::new(workers)
    }
}

impl BatchExecutor for ThreadedBatchExecutor {
    fn execute(
        &self,
        files: &[PathBuf],
        tagger: &dyn FileTagger,
        reporter: &mut dyn RunReporter,
    ) -> Result<(), BatchError> {
        if files.is_empty() {
            return Ok(());
        }
        let worker_count = self.workers.min(files.len());
        log::debug!("Tagging {} file(s) on {worker_count} worker(s)", files.len());

        let (job_tx, job_rx) = crossbeam_channel::unbounded::<&Path>();
        for file in files {
            // Receiver is alive; send cannot fail.
            let _ = job_tx.send(file.as_path());
        }
        drop(job_tx);

        let (outcome_tx, outcome_rx) = crossbeam_channel::unbounded::<Outcome>();
        let aborted = AtomicBool::new(false);

        let fatal = std::thread::scope(|scope| {
            for _ in 0..worker_count {
                let job_rx = job_rx.clone();
                let outcome_tx = outcome_tx.clone();
                let aborted = &aborted;
                scope.spawn(move || run_worker(tagger, job_rx, outcome_tx, aborted));
            }
            drop(outcome_tx);

            let mut fatal: Option<TagFileError> = None;
            for (path, outcome) in outcome_rx {
                match outcome {
                    Ok(report) => reporter.file_tagged(&report),
                    Err(e) if e.is_fatal() => {
                        log::error!("Fatal error on {}: {e}", path.display());
                        if fatal.is_none() {
                            fatal = Some(e);
                        }
                    }
                    Err(e) => reporter.file_failed(&path, &e),
                }
            }
            fatal
        });

        match fatal {
            Some(e) => Err(BatchError::Aborted(e)),
            None => Ok(()),
        }
    }
}

fn run_worker(
    tagger: &dyn FileTagger,
    job_rx: crossbeam_channel::Receiver<&Path>,
    outcome_tx: crossbeam_channel::Sender<Outcome>,
    aborted: &AtomicBool,
) {
    for path in job_rx {
        if aborted.load(Ordering::Relaxed) {
            break;
        }
        let outcome = tagger.tag_file(path);
        if matches!(&outcome, Err(e) if e.is_fatal()) {
            aborted.store(true, Ordering::Relaxed);
        }
        if outcome_tx.send((path.to_path_buf(), outcome)).is_err() {
            break;
        }
    }
}
