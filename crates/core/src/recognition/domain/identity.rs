use crate::shared::embedding::Embedding;

/// A named person and their reference embeddings.
///
/// Always holds at least one reference; immutable once the gallery is built.
#[derive(Clone, Debug, PartialEq)]
pub struct Identity {
    name: String,
    references: Vec<Embedding>,
}

impl Identity {
    /// Returns `None` when `references` is empty.
    pub fn new(name: impl Into<String>, references: Vec<Embedding>) -> Option<Self> {
        if references.is_empty() {
            return None;
        }
        Some(Self {
            name: name.into(),
            references,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn references(&self) -> &[Embedding] {
        &self.references
    }

    /// Smallest distance from `embedding` to any of this identity's references.
    pub fn min_distance(&self, embedding: &Embedding) -> f32 {
        self.references
            .iter()
            .map(|r| r.distance(embedding))
            .fold(f32::INFINITY, f32::min)
    }
}
