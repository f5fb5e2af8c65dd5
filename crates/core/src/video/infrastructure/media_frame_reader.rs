use std::path::Path;

use crate::shared::frame::Frame;
use crate::video::domain::frame_reader::{DecodeError, FrameReader};
use crate::video::domain::media_kind::MediaKind;
use crate::video::infrastructure::ffmpeg_first_frame_reader::FfmpegFirstFrameReader;
use crate::video::infrastructure::image_file_reader::ImageFileReader;

/// Routes each path to the image or video reader based on its extension.
pub struct MediaFrameReader {
    image_reader: Box<dyn FrameReader>,
    video_reader: Box<dyn FrameReader>,
}

impl MediaFrameReader {
    pub fn new(image_reader: Box<dyn FrameReader>, video_reader: Box<dyn FrameReader>) -> Self {
        Self {
            image_reader,
            video_reader,
        }
    }
}

impl Default for MediaFrameReader {
    fn default() -> Self {
        Self::new(
            Box::new(ImageFileReader::new()),
            Box::new(FfmpegFirstFrameReader::new()),
        )
    }
}

impl FrameReader for MediaFrameReader {
    fn read_frame(&self, path: &Path) -> Result<Frame, DecodeError> {
        match MediaKind::of(path) {
            Some(MediaKind::Image) => self.image_reader.read_frame(path),
            Some(MediaKind::Video) => {
                log::debug!("Extracting first frame of {}", path.display());
                self.video_reader.read_frame(path)
            }
            None => Err(DecodeError::Unsupported(path.to_path_buf())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TaggedReader(u8);

    impl FrameReader for TaggedReader {
        fn read_frame(&self, _path: &Path) -> Result<Frame, DecodeError> {
            Ok(Frame::new(vec![self.0; 3], 1, 1, 3))
        }
    }

    fn reader() -> MediaFrameReader {
        MediaFrameReader::new(Box::new(TaggedReader(1)), Box::new(TaggedReader(2)))
    }

    #[test]
    fn test_images_use_image_reader() {
        let frame = reader().read_frame(Path::new("a/photo.JPG")).unwrap();
        assert_eq!(frame.data()[0], 1);
    }

    #[test]
    fn test_videos_use_video_reader() {
        let frame = reader().read_frame(Path::new("a/clip.mkv")).unwrap();
        assert_eq!(frame.data()[0], 2);
    }

    #[test]
    fn test_unknown_extension_is_unsupported() {
        let result = reader().read_frame(Path::new("a/readme.md"));
        assert!(matches!(result, Err(DecodeError::Unsupported(_))));
    }
}
