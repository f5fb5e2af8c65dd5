use std::path::Path;

use crate::shared::constants::{IMAGE_EXTENSIONS, VIDEO_EXTENSIONS};

/// Input classification by file extension (case-insensitive).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn of(path: &Path) -> Option<MediaKind> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaKind::Image)
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaKind::Video)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("photo.jpg", Some(MediaKind::Image))]
    #[case("photo.JPEG", Some(MediaKind::Image))]
    #[case("scan.tif", Some(MediaKind::Image))]
    #[case("dir/holiday.png", Some(MediaKind::Image))]
    #[case("clip.mp4", Some(MediaKind::Video))]
    #[case("clip.MOV", Some(MediaKind::Video))]
    #[case("camera.mts", Some(MediaKind::Video))]
    #[case("notes.txt", None)]
    #[case("no_extension", None)]
    #[case(".hidden", None)]
    fn test_media_kind_of(#[case] path: &str, #[case] expected: Option<MediaKind>) {
        assert_eq!(MediaKind::of(Path::new(path)), expected);
    }
}
