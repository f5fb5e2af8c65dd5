use std::path::PathBuf;

use thiserror::Error;

use crate::pipeline::run_reporter::RunReporter;
use crate::pipeline::tag_file_use_case::{FileTagger, TagFileError};

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("run aborted: {0}")]
    Aborted(#[source] TagFileError),
}

/// Abstracts how a list of files is pushed through a [`FileTagger`].
///
/// Per-file failures go to the reporter and never stop the batch. A fatal
/// failure stops dispatching new files and is returned once in-flight work
/// has drained.
pub trait BatchExecutor: Send {
    fn execute(
        &self,
        files: &[PathBuf],
        tagger: &dyn FileTagger,
        reporter: &mut dyn RunReporter,
    ) -> Result<(), BatchError>;
}
