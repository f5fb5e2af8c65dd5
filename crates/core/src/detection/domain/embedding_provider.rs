use crate::shared::embedding::Embedding;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

pub type ProviderError = Box<dyn std::error::Error + Send + Sync>;

/// One detected face in one processed file.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceObservation {
    pub region: Region,
    pub embedding: Embedding,
}

/// Capability interface for face detection plus embedding extraction.
///
/// A single instance is shared by every worker of a run, hence `&self` and
/// `Sync`. Implementations must return faces in descending detection
/// confidence and embeddings of one fixed dimension.
pub trait EmbeddingProvider: Send + Sync {
    fn detect_faces(&self, frame: &Frame) -> Result<Vec<FaceObservation>, ProviderError>;
}
