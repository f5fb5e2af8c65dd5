pub const YOLO_MODEL_NAME: &str = "yolo11n-pose_widerface.onnx";
pub const YOLO_MODEL_URL: &str =
    "https://github.com/neutrinographics/faceguard/releases/download/v0.1.0/yolo11n-pose_widerface.onnx";

pub const EMBEDDING_MODEL_NAME: &str = "w600k_r50.onnx";
pub const EMBEDDING_MODEL_URL: &str =
    "https://github.com/neutrinographics/faceguard/releases/download/v0.1.0/w600k_r50.onnx";

/// Maximum embedding distance for a positive identity match.
pub const DEFAULT_TOLERANCE: f32 = 0.55;

/// Face detection confidence threshold used by the CLI.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];

/// Video containers; only the first frame is analyzed.
pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "m4v", "mov", "avi", "mkv", "wmv", "mts", "m2ts", "3gp", "webm",
];

pub const EXIFTOOL_BINARY: &str = "exiftool";

/// Metadata fields every recognized person is added to.
pub const TAG_FIELDS: &[&str] = &["Keywords", "Subject", "HierarchicalSubject"];

/// Fields consulted when loading a file's existing tags.
pub const READ_TAG_FIELDS: &[&str] = &["Keywords", "Subject"];
