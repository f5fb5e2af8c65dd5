use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::detection::domain::embedding_provider::EmbeddingProvider;
use crate::recognition::domain::gallery::{Gallery, GalleryError};
use crate::recognition::domain::identity::Identity;
use crate::shared::embedding::Embedding;
use crate::video::domain::frame_reader::FrameReader;
use crate::video::domain::media_kind::MediaKind;

/// How imperfect reference images are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReferencePolicy {
    /// Skip (no face, unreadable) or take the first face (several faces), with a warning.
    #[default]
    Lenient,
    /// Any imperfect reference image aborts gallery construction.
    Strict,
}

/// Builds the reference gallery from a directory of labeled images.
///
/// Layout: each subdirectory is one identity named after the directory; each
/// image directly in the root is an identity named after its file stem.
/// Entries are visited in sorted file-name order, which fixes the gallery's
/// iteration order.
pub struct BuildGalleryUseCase<'a> {
    reader: &'a dyn FrameReader,
    provider: &'a dyn EmbeddingProvider,
    policy: ReferencePolicy,
}

impl<'a> BuildGalleryUseCase<'a> {
    pub fn new(
        reader: &'a dyn FrameReader,
        provider: &'a dyn EmbeddingProvider,
        policy: ReferencePolicy,
    ) -> Self {
        Self {
            reader,
            provider,
            policy,
        }
    }

    pub fn execute(&self, reference_dir: &Path) -> Result<Gallery, GalleryError> {
        if !reference_dir.exists() {
            return Err(GalleryError::NotFound(reference_dir.to_path_buf()));
        }
        if !reference_dir.is_dir() {
            return Err(GalleryError::NotADirectory(reference_dir.to_path_buf()));
        }

        let mut labeled: Vec<(String, Vec<Embedding>)> = Vec::new();
        let mut image_count = 0;

        for entry in sorted_entries(reference_dir)? {
            let (label, images) = if entry.is_dir() {
                let Some(label) = file_name(&entry) else {
                    continue;
                };
                let images: Vec<PathBuf> = sorted_entries(&entry)?
                    .into_iter()
                    .filter(|p| is_reference_image(p))
                    .collect();
                (label, images)
            } else if is_reference_image(&entry) {
                let Some(label) = entry.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                (label.to_string(), vec![entry.clone()])
            } else {
                log::debug!("Ignoring non-image reference entry {}", entry.display());
                continue;
            };

            let index = match labeled.iter().position(|(name, _)| *name == label) {
                Some(index) => index,
                None => {
                    labeled.push((label, Vec::new()));
                    labeled.len() - 1
                }
            };
            for image in images {
                image_count += 1;
                if let Some(embedding) = self.reference_embedding(&image)? {
                    labeled[index].1.push(embedding);
                }
            }
        }

        let identities: Vec<Identity> = labeled
            .into_iter()
            .filter_map(|(name, references)| {
                let identity = Identity::new(name.clone(), references);
                if identity.is_none() {
                    log::warn!("No usable reference image for {name}; identity skipped");
                }
                identity
            })
            .collect();

        if identities.is_empty() {
            return Err(GalleryError::Empty(reference_dir.to_path_buf()));
        }

        let gallery = Gallery::new(identities)?;
        log::info!(
            "Loaded {} identities ({} of {} reference images usable) from {}",
            gallery.len(),
            gallery.reference_count(),
            image_count,
            reference_dir.display()
        );
        Ok(gallery)
    }

    fn reference_embedding(&self, path: &Path) -> Result<Option<Embedding>, GalleryError> {
        let frame = match self.reader.read_frame(path) {
            Ok(frame) => frame,
            Err(e) => return self.reject(path, e.to_string()),
        };

        let faces = self
            .provider
            .detect_faces(&frame)
            .map_err(|e| GalleryError::Provider {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let count = faces.len();
        let Some(first) = faces.into_iter().next() else {
            return self.reject(path, "no face detected".to_string());
        };
        if count > 1 {
            if self.policy == ReferencePolicy::Strict {
                return self.reject(path, format!("{count} faces detected, expected one"));
            }
            log::warn!(
                "{count} faces in reference image {}; using the most confident one",
                path.display()
            );
        }
        Ok(Some(first.embedding))
    }

    fn reject(&self, path: &Path, reason: String) -> Result<Option<Embedding>, GalleryError> {
        match self.policy {
            ReferencePolicy::Strict => Err(GalleryError::RejectedReference {
                path: path.to_path_buf(),
                reason,
            }),
            ReferencePolicy::Lenient => {
                log::warn!("Skipping reference image {}: {reason}", path.display());
                Ok(None)
            }
        }
    }
}

/// Non-hidden directory entries sorted by file name.
fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, GalleryError> {
    let io_err = |source| GalleryError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut entries: Vec<(OsString, PathBuf)> = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let name = entry.file_name();
        if name.to_string_lossy().starts_with('.') {
            continue;
        }
        entries.push((name, entry.path()));
    }
    entries.sort();
    Ok(entries.into_iter().map(|(_, path)| path).collect())
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.to_string())
}

fn is_reference_image(path: &Path) -> bool {
    path.is_file() && MediaKind::of(path) == Some(MediaKind::Image)
}
