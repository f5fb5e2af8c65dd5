use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::detection::domain::embedding_provider::EmbeddingProvider;
use crate::recognition::domain::gallery::Gallery;
use crate::recognition::domain::matcher::{match_face, MatchResult};
use crate::tagging::domain::metadata_store::{MetadataError, MetadataStore};
use crate::tagging::domain::tag_reconciler::reconcile;
use crate::video::domain::frame_reader::{DecodeError, FrameReader};

#[derive(Error, Debug)]
pub enum TagFileError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("face analysis failed for {path}: {reason}")]
    Embedding { path: PathBuf, reason: String },
    #[error(transparent)]
    Metadata(#[from] MetadataError),
    #[error(
        "embedding for {path} has {actual} dimensions but the reference gallery uses {expected}"
    )]
    DimensionMismatch {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },
}

impl TagFileError {
    /// Fatal errors mean every remaining file would fail the same way.
    pub fn is_fatal(&self) -> bool {
        matches!(self, TagFileError::DimensionMismatch { .. })
    }
}

/// Outcome of tagging one file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub faces_detected: usize,
    /// Names written to the file by this run.
    pub newly_added: Vec<String>,
    /// Names identified but already present in the file's tags.
    pub already_tagged: Vec<String>,
    /// Faces matched to a known identity; several faces may share a name.
    pub identified_faces: usize,
    pub unknown_count: usize,
    pub metadata_written: bool,
}

/// Unit of work the batch executor hands to its workers.
pub trait FileTagger: Sync {
    fn tag_file(&self, path: &Path) -> Result<FileReport, TagFileError>;
}

/// Frame → faces → identities → tags for a single file.
///
/// Borrows every collaborator so one instance can be shared by all workers.
pub struct TagFileUseCase<'a> {
    reader: &'a dyn FrameReader,
    provider: &'a dyn EmbeddingProvider,
    gallery: &'a Gallery,
    store: &'a dyn MetadataStore,
    tolerance: f32,
}

impl<'a> TagFileUseCase<'a> {
    pub fn new(
        reader: &'a dyn FrameReader,
        provider: &'a dyn EmbeddingProvider,
        gallery: &'a Gallery,
        store: &'a dyn MetadataStore,
        tolerance: f32,
    ) -> Self {
        Self {
            reader,
            provider,
            gallery,
            store,
            tolerance,
        }
    }

    pub fn execute(&self, path: &Path) -> Result<FileReport, TagFileError> {
        log::debug!("Starting analysis of {}", path.display());
        let frame = self.reader.read_frame(path)?;

        let faces = self
            .provider
            .detect_faces(&frame)
            .map_err(|e| TagFileError::Embedding {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let mut report = FileReport {
            path: path.to_path_buf(),
            faces_detected: faces.len(),
            ..FileReport::default()
        };
        if faces.is_empty() {
            return Ok(report);
        }

        if let Some(expected) = self.gallery.dimension() {
            if let Some(face) = faces.iter().find(|f| f.embedding.len() != expected) {
                return Err(TagFileError::DimensionMismatch {
                    path: path.to_path_buf(),
                    expected,
                    actual: face.embedding.len(),
                });
            }
        }

        let results: Vec<MatchResult> = faces
            .iter()
            .map(|face| {
                let result = match_face(face, self.gallery, self.tolerance);
                log::debug!("{}: face at {:?} -> {:?}", path.display(), face.region, result);
                result
            })
            .collect();

        if results.iter().all(MatchResult::is_unknown) {
            report.unknown_count = results.len();
            return Ok(report);
        }

        let existing = self.store.read_tags(path)?;
        let reconciliation = reconcile(&existing, &results);
        if reconciliation.needs_write() {
            self.store.write_tags(path, &reconciliation.newly_added)?;
            report.metadata_written = true;
        }

        report.identified_faces = results.len() - reconciliation.unknown_count;
        report.newly_added = reconciliation.newly_added;
        report.already_tagged = reconciliation.already_tagged;
        report.unknown_count = reconciliation.unknown_count;
        Ok(report)
    }
}

impl FileTagger for TagFileUseCase<'_> {
    fn tag_file(&self, path: &Path) -> Result<FileReport, TagFileError> {
        self.execute(path)
    }
}
