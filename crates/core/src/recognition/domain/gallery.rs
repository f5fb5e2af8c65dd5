use std::collections::HashSet;
use std::path::PathBuf;

use thiserror::Error;

use crate::recognition::domain::identity::Identity;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("reference directory not found: {0}")]
    NotFound(PathBuf),
    #[error("reference path is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("failed to list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no usable identities found in {0}")]
    Empty(PathBuf),
    #[error("reference image {path} rejected: {reason}")]
    RejectedReference { path: PathBuf, reason: String },
    #[error("embedding provider failed on {path}: {reason}")]
    Provider { path: PathBuf, reason: String },
    #[error("identity {name} has {actual}-dimensional embeddings, expected {expected}")]
    DimensionMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("identity {0} appears more than once")]
    DuplicateIdentity(String),
}

/// The full set of known identities, in a fixed iteration order.
///
/// Built once before any file is processed and shared read-only by all
/// workers. Every reference embedding has the same dimension.
#[derive(Clone, Debug, Default)]
pub struct Gallery {
    identities: Vec<Identity>,
    dimension: Option<usize>,
}

impl Gallery {
    pub fn new(identities: Vec<Identity>) -> Result<Self, GalleryError> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut dimension = None;

        for identity in &identities {
            if !seen.insert(identity.name()) {
                return Err(GalleryError::DuplicateIdentity(identity.name().to_string()));
            }
            for reference in identity.references() {
                let expected = *dimension.get_or_insert(reference.len());
                if reference.len() != expected {
                    return Err(GalleryError::DimensionMismatch {
                        name: identity.name().to_string(),
                        expected,
                        actual: reference.len(),
                    });
                }
            }
        }

        Ok(Self {
            identities,
            dimension,
        })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn identities(&self) -> &[Identity] {
        &self.identities
    }

    /// Embedding dimension shared by all references; `None` for an empty gallery.
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    pub fn reference_count(&self) -> usize {
        self.identities.iter().map(|i| i.references().len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::embedding::Embedding;

    fn identity(name: &str, refs: &[&[f32]]) -> Identity {
        Identity::new(
            name,
            refs.iter().map(|r| Embedding::new(r.to_vec())).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_new_preserves_order() {
        let gallery = Gallery::new(vec![
            identity("Zoe", &[&[0.0, 1.0]]),
            identity("Adam", &[&[1.0, 0.0], &[0.5, 0.5]]),
        ])
        .unwrap();
        let names: Vec<&str> = gallery.identities().iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["Zoe", "Adam"]);
        assert_eq!(gallery.len(), 2);
        assert_eq!(gallery.reference_count(), 3);
        assert_eq!(gallery.dimension(), Some(2));
    }

    #[test]
    fn test_new_rejects_mixed_dimensions() {
        let result = Gallery::new(vec![
            identity("Alice", &[&[0.0, 1.0]]),
            identity("Bob", &[&[1.0, 0.0, 0.0]]),
        ]);
        assert!(matches!(
            result,
            Err(GalleryError::DimensionMismatch { expected: 2, actual: 3, .. })
        ));
    }

    #[test]
    fn test_new_rejects_duplicate_names() {
        let result = Gallery::new(vec![
            identity("Alice", &[&[0.0]]),
            identity("Alice", &[&[1.0]]),
        ]);
        assert!(matches!(result, Err(GalleryError::DuplicateIdentity(name)) if name == "Alice"));
    }

    #[test]
    fn test_empty_gallery() {
        let gallery = Gallery::empty();
        assert!(gallery.is_empty());
        assert_eq!(gallery.dimension(), None);
        assert_eq!(gallery.reference_count(), 0);
    }
}
