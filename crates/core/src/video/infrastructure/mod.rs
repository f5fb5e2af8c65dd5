pub mod ffmpeg_first_frame_reader;
pub mod image_file_reader;
pub mod media_frame_reader;
