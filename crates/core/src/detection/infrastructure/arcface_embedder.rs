//! ArcFace face embedder using ONNX Runtime.
//!
//! Produces L2-normalized identity embeddings from face crops using the
//! w600k_r50 model.

use std::path::Path;

use crate::detection::domain::face_embedder::FaceEmbedder;
use crate::detection::infrastructure::onnx_session::open_session;
use crate::shared::embedding::Embedding;
use crate::shared::frame::Frame;

const INPUT_SIZE: usize = 112;
const NORM_MEAN: f32 = 127.5;
const NORM_STD: f32 = 127.5;

pub struct ArcFaceEmbedder {
    session: ort::session::Session,
}

impl ArcFaceEmbedder {
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            session: open_session(model_path)?,
        })
    }
}

impl FaceEmbedder for ArcFaceEmbedder {
    fn embed(&mut self, face: &Frame) -> Result<Embedding, Box<dyn std::error::Error>> {
        let tensor = preprocess(face.data(), face.width(), face.height(), face.channels());
        let input_value = ort::value::Tensor::from_array(tensor)?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        let embedding_array = outputs[0].try_extract_array::<f32>()?;
        let embedding_slice = embedding_array
            .as_slice()
            .ok_or("Cannot get embedding slice")?;

        Ok(Embedding::normalized(embedding_slice.to_vec()))
    }
}

/// Resize crop to 112x112, normalize, NCHW layout.
fn preprocess(data: &[u8], width: u32, height: u32, channels: u8) -> ndarray::Array4<f32> {
    let src_w = width as usize;
    let src_h = height as usize;
    let ch = channels as usize;

    let mut tensor = ndarray::Array4::<f32>::zeros((1, 3, INPUT_SIZE, INPUT_SIZE));
    if src_w == 0 || src_h == 0 || ch < 3 {
        return tensor;
    }

    for y in 0..INPUT_SIZE {
        let src_y = (((y as f64 + 0.5) * src_h as f64 / INPUT_SIZE as f64) as usize).min(src_h - 1);
        for x in 0..INPUT_SIZE {
            let src_x =
                (((x as f64 + 0.5) * src_w as f64 / INPUT_SIZE as f64) as usize).min(src_w - 1);
            let offset = (src_y * src_w + src_x) * ch;
            if offset + 2 < data.len() {
                for c in 0..3 {
                    tensor[[0, c, y, x]] = (data[offset + c] as f32 - NORM_MEAN) / NORM_STD;
                }
            }
        }
    }

    tensor
}
