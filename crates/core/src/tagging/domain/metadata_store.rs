use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("failed to run metadata tool on {path}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("metadata tool exited with {status} on {path}: {stderr}")]
    ToolFailed {
        path: PathBuf,
        status: String,
        stderr: String,
    },
    #[error("unexpected metadata output for {path}: {reason}")]
    Parse { path: PathBuf, reason: String },
}

/// Capability interface over a file's person tags.
pub trait MetadataStore: Send + Sync {
    fn read_tags(&self, path: &Path) -> Result<Vec<String>, MetadataError>;

    /// Adds `names` to the file's person-tag fields. Existing entries are
    /// neither removed, reordered nor copied between fields.
    fn write_tags(&self, path: &Path, names: &[String]) -> Result<(), MetadataError>;
}
