use ndarray::ArrayView3;

use crate::shared::region::Region;

/// A decoded still frame: contiguous RGB bytes in row-major order.
///
/// Images yield exactly one frame; videos contribute their first frame.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
        }
    }

    pub fn from_rgb_image(image: image::RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Self::new(image.into_raw(), width, height, 3)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    /// Copies the pixels under `region` (clamped to the frame) into a new frame.
    ///
    /// Returns `None` when the clamped region is empty.
    pub fn crop(&self, region: &Region) -> Option<Frame> {
        let clamped = region.clamp_to(self.width, self.height)?;
        let ch = self.channels as usize;
        let src_stride = self.width as usize * ch;
        let row_len = clamped.width as usize * ch;

        let mut data = Vec::with_capacity(row_len * clamped.height as usize);
        for row in 0..clamped.height as usize {
            let start = (clamped.y as usize + row) * src_stride + clamped.x as usize * ch;
            data.extend_from_slice(&self.data[start..start + row_len]);
        }
        Some(Frame::new(
            data,
            clamped.width as u32,
            clamped.height as u32,
            self.channels,
        ))
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}
