use std::path::Path;
use std::sync::Mutex;

use crate::detection::domain::embedding_provider::{
    EmbeddingProvider, FaceObservation, ProviderError,
};
use crate::detection::domain::face_detector::FaceDetector;
use crate::detection::domain::face_embedder::FaceEmbedder;
use crate::detection::infrastructure::arcface_embedder::ArcFaceEmbedder;
use crate::detection::infrastructure::onnx_yolo_detector::OnnxYoloDetector;
use crate::shared::frame::Frame;

/// Margin added around detector boxes before embedding, as a fraction of box size.
const CROP_PADDING: f64 = 0.1;

/// Embedding provider that runs a face detector, crops each face and embeds it.
///
/// Both models sit behind mutexes so one provider can be shared by all
/// workers; ONNX Runtime parallelizes inside each call.
pub struct OnnxEmbeddingProvider {
    detector: Mutex<Box<dyn FaceDetector>>,
    embedder: Mutex<Box<dyn FaceEmbedder>>,
}

impl OnnxEmbeddingProvider {
    pub fn new(detector: Box<dyn FaceDetector>, embedder: Box<dyn FaceEmbedder>) -> Self {
        Self {
            detector: Mutex::new(detector),
            embedder: Mutex::new(embedder),
        }
    }

    /// Loads the YOLO face detector and ArcFace embedder from model files.
    pub fn from_models(
        detector_model: &Path,
        embedder_model: &Path,
        confidence: f64,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let detector = OnnxYoloDetector::new(detector_model, confidence)?;
        let embedder = ArcFaceEmbedder::new(embedder_model)?;
        Ok(Self::new(Box::new(detector), Box::new(embedder)))
    }
}

impl EmbeddingProvider for OnnxEmbeddingProvider {
    fn detect_faces(&self, frame: &Frame) -> Result<Vec<FaceObservation>, ProviderError> {
        let regions = {
            let mut detector = self
                .detector
                .lock()
                .map_err(|e| format!("Lock poisoned: {e}"))?;
            detector
                .detect(frame)
                .map_err(|e| -> ProviderError { e.to_string().into() })?
        };

        let mut embedder = self
            .embedder
            .lock()
            .map_err(|e| format!("Lock poisoned: {e}"))?;

        let mut observations = Vec::with_capacity(regions.len());
        for region in regions {
            let Some(crop) = frame.crop(&region.padded(CROP_PADDING)) else {
                log::debug!("Skipping face outside frame bounds: {region:?}");
                continue;
            };
            let embedding = embedder
                .embed(&crop)
                .map_err(|e| -> ProviderError { e.to_string().into() })?;
            observations.push(FaceObservation { region, embedding });
        }
        Ok(observations)
    }
}
