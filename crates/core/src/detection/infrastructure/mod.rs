pub mod arcface_embedder;
pub mod onnx_embedding_provider;
pub mod onnx_session;
pub mod onnx_yolo_detector;
