pub mod embedding_provider;
pub mod face_detector;
pub mod face_embedder;
