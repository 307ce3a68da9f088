use ndarray::ArrayView3;

/// A single decoded video/image frame: contiguous RGB8 bytes in row-major
/// order, three channels, no padding between rows.
///
/// Pixel format conversion happens in the frame sources; everything above
/// them (texture upload, detection preprocessing) assumes this layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    data: Vec<u8>,
    width: usize,
    height: usize,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: usize, height: usize, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            width * height * 3,
            "data length must equal width * height * 3"
        );
        Self {
            data,
            width,
            height,
            index,
        }
    }

    /// A `width` x `height` frame filled with one color.
    pub fn filled(width: usize, height: usize, rgb: [u8; 3], index: usize) -> Self {
        let mut data = Vec::with_capacity(width * height * 3);
        for _ in 0..width * height {
            data.extend_from_slice(&rgb);
        }
        Self::new(data, width, height, index)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Position of this frame in its source clip.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        debug_assert!(x < self.width && y < self.height);
        let i = (y * self.width + x) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        debug_assert!(x < self.width && y < self.height);
        let i = (y * self.width + x) * 3;
        self.data[i..i + 3].copy_from_slice(&rgb);
    }

    /// Fill an axis-aligned block, clipped to the frame bounds.
    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, rgb: [u8; 3]) {
        let x1 = (x + w).min(self.width);
        let y1 = (y + h).min(self.height);
        for py in y..y1 {
            for px in x..x1 {
                self.set_pixel(px, py, rgb);
            }
        }
    }

    /// View as `height` x `width` x `3` (HWC), the layout detection
    /// preprocessing expects.
    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape((self.height, self.width, 3), &self.data)
            .expect("frame data length must match dimensions")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_and_accessors() {
        let data = vec![0_u8; 12]; // 2x2 RGB
        let frame = Frame::new(data.clone(), 2, 2, 5);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.index(), 5);
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * 3")]
    fn mismatched_data_length_panics_in_debug() {
        let data = vec![0_u8; 10]; // wrong size for 2x2 RGB
        Frame::new(data, 2, 2, 0);
    }

    #[test]
    fn filled_sets_every_pixel() {
        let frame = Frame::filled(3, 2, [10, 20, 30], 0);
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(frame.pixel(x, y), [10, 20, 30]);
            }
        }
    }

    #[test]
    fn set_and_get_pixel_round_trip() {
        let mut frame = Frame::filled(4, 4, [0, 0, 0], 0);
        frame.set_pixel(3, 1, [255, 128, 64]);
        assert_eq!(frame.pixel(3, 1), [255, 128, 64]);
        assert_eq!(frame.pixel(2, 1), [0, 0, 0]);
    }

    #[test]
    fn fill_rect_clips_to_bounds() {
        let mut frame = Frame::filled(4, 4, [0, 0, 0], 0);
        frame.fill_rect(2, 2, 10, 10, [9, 9, 9]);
        assert_eq!(frame.pixel(3, 3), [9, 9, 9]);
        assert_eq!(frame.pixel(1, 1), [0, 0, 0]);
    }

    #[test]
    fn as_ndarray_shape_and_pixel_access() {
        let mut data = vec![0_u8; 24]; // 2 rows x 4 cols RGB
        data[12] = 255; // row 1, col 0, R
        let frame = Frame::new(data, 4, 2, 0);
        let arr = frame.as_ndarray();
        assert_eq!(arr.shape(), &[2, 4, 3]);
        assert_eq!(arr[[1, 0, 0]], 255);
        assert_eq!(arr[[1, 0, 1]], 0);
    }
}
