use std::path::Path;

use crate::shared::frame::Frame;
use crate::video::domain::frame_reader::{DecodeError, FrameReader};

/// Decodes still images with the pure-Rust `image` crate.
///
/// Any pixel format is converted to 8-bit RGB.
#[derive(Default)]
pub struct ImageFileReader;

impl ImageFileReader {
    pub fn new() -> Self {
        Self
    }
}

impl FrameReader for ImageFileReader {
    fn read_frame(&self, path: &Path) -> Result<Frame, DecodeError> {
        let image = image::open(path).map_err(|e| DecodeError::unreadable(path, e))?;
        if image.width() == 0 || image.height() == 0 {
            return Err(DecodeError::NoFrame(path.to_path_buf()));
        }
        Ok(Frame::from_rgb_image(image.to_rgb8()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_test_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        let mut img = image::RgbImage::new(width, height);
        for pixel in img.pixels_mut() {
            *pixel = image::Rgb([50, 100, 200]);
        }
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_reads_png_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_image(dir.path(), "test.png", 100, 80);
        let frame = ImageFileReader::new().read_frame(&path).unwrap();
        assert_eq!(frame.width(), 100);
        assert_eq!(frame.height(), 80);
    }

    #[test]
    fn test_frame_is_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_image(dir.path(), "test.png", 10, 10);
        let frame = ImageFileReader::new().read_frame(&path).unwrap();
        assert_eq!(frame.channels(), 3);
        assert_eq!(&frame.data()[..3], &[50, 100, 200]);
    }

    #[test]
    fn test_nonexistent_file_is_unreadable() {
        let result = ImageFileReader::new().read_frame(Path::new("/nonexistent/test.png"));
        assert!(matches!(result, Err(DecodeError::Unreadable { .. })));
    }

    #[test]
    fn test_garbage_bytes_are_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"definitely not a jpeg").unwrap();
        let result = ImageFileReader::new().read_frame(&path);
        assert!(matches!(result, Err(DecodeError::Unreadable { .. })));
    }
}
