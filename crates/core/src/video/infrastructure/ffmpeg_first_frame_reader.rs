use std::path::Path;

use crate::shared::frame::Frame;
use crate::video::domain::frame_reader::{DecodeError, FrameReader};

type FfmpegResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Decodes the first video frame via ffmpeg-next (libavformat + libavcodec).
///
/// A fresh input context is opened per call, so one reader can serve many
/// workers.
#[derive(Default)]
pub struct FfmpegFirstFrameReader;

impl FfmpegFirstFrameReader {
    pub fn new() -> Self {
        Self
    }
}

impl FrameReader for FfmpegFirstFrameReader {
    fn read_frame(&self, path: &Path) -> Result<Frame, DecodeError> {
        match decode_first_frame(path) {
            Ok(Some(frame)) => Ok(frame),
            Ok(None) => Err(DecodeError::NoFrame(path.to_path_buf())),
            Err(e) => Err(DecodeError::unreadable(path, e)),
        }
    }
}

fn decode_first_frame(path: &Path) -> FfmpegResult<Option<Frame>> {
    ffmpeg_next::init()?;

    let mut ictx = ffmpeg_next::format::input(path)?;

    let stream = ictx
        .streams()
        .best(ffmpeg_next::media::Type::Video)
        .ok_or("No video stream found")?;
    let video_stream_index = stream.index();

    let codec_ctx = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())?;
    let mut decoder = codec_ctx.decoder().video()?;

    let width = decoder.width();
    let height = decoder.height();
    if width == 0 || height == 0 {
        return Ok(None);
    }

    let mut scaler = ffmpeg_next::software::scaling::Context::get(
        decoder.format(),
        width,
        height,
        ffmpeg_next::format::Pixel::RGB24,
        width,
        height,
        ffmpeg_next::software::scaling::Flags::BILINEAR,
    )?;

    for (stream, packet) in ictx.packets() {
        if stream.index() != video_stream_index {
            continue;
        }
        if decoder.send_packet(&packet).is_err() {
            continue;
        }
        if let Some(frame) = try_receive_frame(&mut decoder, &mut scaler, width, height)? {
            return Ok(Some(frame));
        }
    }

    // Flush decoders that buffer frames until end of stream.
    let _ = decoder.send_eof();
    try_receive_frame(&mut decoder, &mut scaler, width, height)
}

fn try_receive_frame(
    decoder: &mut ffmpeg_next::decoder::Video,
    scaler: &mut ffmpeg_next::software::scaling::Context,
    width: u32,
    height: u32,
) -> FfmpegResult<Option<Frame>> {
    let mut decoded = ffmpeg_next::util::frame::video::Video::empty();
    if decoder.receive_frame(&mut decoded).is_err() {
        return Ok(None);
    }
    let mut rgb_frame = ffmpeg_next::util::frame::video::Video::empty();
    scaler.run(&decoded, &mut rgb_frame)?;
    let pixels = extract_rgb_pixels(&rgb_frame, width, height);
    Ok(Some(Frame::new(pixels, width, height, 3)))
}

/// Copies RGB24 rows, dropping ffmpeg's per-row stride padding.
fn extract_rgb_pixels(
    rgb_frame: &ffmpeg_next::util::frame::video::Video,
    width: u32,
    height: u32,
) -> Vec<u8> {
    let stride = rgb_frame.stride(0);
    let data = rgb_frame.data(0);
    let w = width as usize;
    let h = height as usize;

    let mut pixels = Vec::with_capacity(w * h * 3);
    for row in 0..h {
        let row_start = row * stride;
        pixels.extend_from_slice(&data[row_start..row_start + w * 3]);
    }
    pixels
}
