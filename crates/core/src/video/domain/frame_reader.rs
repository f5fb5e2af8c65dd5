use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("unsupported file type: {0}")]
    Unsupported(PathBuf),
    #[error("cannot read {path}: {reason}")]
    Unreadable { path: PathBuf, reason: String },
    #[error("no decodable frame in {0}")]
    NoFrame(PathBuf),
}

impl DecodeError {
    pub fn unreadable(path: &Path, reason: impl ToString) -> Self {
        Self::Unreadable {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

/// Produces the single representative frame of an image or video file.
///
/// Shared across workers, so implementations must not keep per-file state.
pub trait FrameReader: Send + Sync {
    fn read_frame(&self, path: &Path) -> Result<Frame, DecodeError>;
}
