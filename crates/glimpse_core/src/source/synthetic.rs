use super::{FrameSource, SourceError, SourceInfo};
use crate::frame::Frame;
use crate::rect::RectPx;

/// Procedurally generated clip: a dark drifting background, a thin moving
/// scanline, and one bright face-like elliptical blob wandering on a
/// Lissajous path.
///
/// Deterministic per frame index, so demos and tests get the same pixels
/// every run without any asset files. The blob is bright enough for
/// [`BlobDetector`](crate::detect::BlobDetector) to find, and
/// [`Self::face_rect`] exposes its true bounding box.
pub struct SyntheticClip {
    info: SourceInfo,
}

/// Blob half-extents as fractions of the frame size.
const BLOB_RX: f32 = 0.12;
const BLOB_RY: f32 = 0.16;

impl SyntheticClip {
    pub const DEFAULT_WIDTH: usize = 640;
    pub const DEFAULT_HEIGHT: usize = 360;
    pub const DEFAULT_FPS: f64 = 30.0;

    pub fn new(frame_count: usize) -> Self {
        Self::with_size(Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT, frame_count)
    }

    pub fn with_size(width: usize, height: usize, frame_count: usize) -> Self {
        Self {
            info: SourceInfo {
                width,
                height,
                fps: Self::DEFAULT_FPS,
                frame_count,
                name: "synthetic".to_owned(),
            },
        }
    }

    fn blob_center(&self, index: usize) -> (f32, f32) {
        let t = index as f32 * 0.1;
        let w = self.info.width as f32;
        let h = self.info.height as f32;
        let cx = w * (0.5 + 0.30 * (t * 0.9).sin());
        let cy = h * (0.5 + 0.22 * (t * 0.7).cos());
        (cx, cy)
    }

    /// True bounding box of the blob in frame `index`, in pixels.
    pub fn face_rect(&self, index: usize) -> RectPx {
        let (cx, cy) = self.blob_center(index);
        let rx = self.info.width as f32 * BLOB_RX;
        let ry = self.info.height as f32 * BLOB_RY;
        RectPx::new(cx - rx, cy - ry, 2.0 * rx, 2.0 * ry)
    }

    fn render(&self, index: usize) -> Frame {
        let (w, h) = (self.info.width, self.info.height);
        let (cx, cy) = self.blob_center(index);
        let rx = w as f32 * BLOB_RX;
        let ry = h as f32 * BLOB_RY;
        let stripe_x = if w == 0 { 0 } else { (index * 7) % w };

        let mut frame = Frame::filled(w, h, [0, 0, 0], index);
        for y in 0..h {
            for x in 0..w {
                let mut rgb = [
                    18,
                    22 + (x * 24 / w.max(1)) as u8,
                    30 + (y * 16 / h.max(1)) as u8,
                ];
                if x.abs_diff(stripe_x) < 2 {
                    rgb = [40, 70, 110];
                }
                let dx = (x as f32 - cx) / rx;
                let dy = (y as f32 - cy) / ry;
                let d2 = dx * dx + dy * dy;
                if d2 < 1.0 {
                    let shade = 1.0 - 0.35 * d2;
                    rgb = [
                        (250.0 * shade) as u8,
                        (220.0 * shade) as u8,
                        (195.0 * shade) as u8,
                    ];
                }
                frame.set_pixel(x, y, rgb);
            }
        }
        frame
    }
}

impl FrameSource for SyntheticClip {
    fn info(&self) -> &SourceInfo {
        &self.info
    }

    fn frame_at(&mut self, index: usize) -> Result<Frame, SourceError> {
        if index >= self.info.frame_count {
            return Err(SourceError::OutOfRange {
                index,
                len: self.info.frame_count,
            });
        }
        Ok(self.render(index))
    }
}
