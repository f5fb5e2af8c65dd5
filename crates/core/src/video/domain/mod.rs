pub mod frame_reader;
pub mod media_kind;
