use super::{DEFAULT_MIN_CONFIDENCE, DetectError, FaceBox, FaceDetector};
use crate::frame::Frame;
use crate::rect::RectPx;

/// Widest bounding-box aspect ratio (either way) still considered face-like.
const ASPECT_LIMIT: f32 = 3.0;

/// Brightness-blob "detector": connected regions of bright pixels on a dark
/// background, filtered by area and aspect ratio.
///
/// This is not a real face detector. It exists so the overlay demos work
/// out of the box, with no model file and no native libraries, and it
/// reliably finds the face blob of
/// [`SyntheticClip`](crate::source::SyntheticClip). Confidence is the mean
/// relative luminance of the blob.
pub struct BlobDetector {
    /// Pixels at or above this luminance belong to a blob.
    pub luminance_threshold: u8,
    /// Blobs smaller than this fraction of the frame are noise.
    pub min_area_fraction: f32,
    pub min_confidence: f32,
}

impl Default for BlobDetector {
    fn default() -> Self {
        Self {
            luminance_threshold: 140,
            min_area_fraction: 0.001,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }
}

impl FaceDetector for BlobDetector {
    fn name(&self) -> &'static str {
        "blob"
    }

    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceBox>, DetectError> {
        let (w, h) = (frame.width(), frame.height());
        if w == 0 || h == 0 {
            return Err(DetectError::BadInput {
                width: w,
                height: h,
            });
        }

        let src = frame.as_ndarray();
        let mut lum = vec![0_u8; w * h];
        for y in 0..h {
            for x in 0..w {
                let r = u32::from(src[[y, x, 0]]);
                let g = u32::from(src[[y, x, 1]]);
                let b = u32::from(src[[y, x, 2]]);
                lum[y * w + x] = ((r * 299 + g * 587 + b * 114) / 1000) as u8;
            }
        }

        let threshold = self.luminance_threshold;
        let min_area = ((w * h) as f32 * self.min_area_fraction).max(1.0) as usize;
        let mut visited = vec![false; w * h];
        let mut stack: Vec<usize> = Vec::new();
        let mut faces = Vec::new();

        for start in 0..w * h {
            if visited[start] || lum[start] < threshold {
                continue;
            }

            // Flood-fill one 4-connected component, tracking its extent.
            let (mut min_x, mut max_x) = (start % w, start % w);
            let (mut min_y, mut max_y) = (start / w, start / w);
            let mut count = 0_usize;
            let mut lum_sum = 0_u64;
            visited[start] = true;
            stack.push(start);
            while let Some(i) = stack.pop() {
                count += 1;
                lum_sum += u64::from(lum[i]);
                let (x, y) = (i % w, i / w);
                min_x = min_x.min(x);
                max_x = max_x.max(x);
                min_y = min_y.min(y);
                max_y = max_y.max(y);

                let mut try_push = |j: usize| {
                    if !visited[j] && lum[j] >= threshold {
                        visited[j] = true;
                        stack.push(j);
                    }
                };
                if x > 0 {
                    try_push(i - 1);
                }
                if x + 1 < w {
                    try_push(i + 1);
                }
                if y > 0 {
                    try_push(i - w);
                }
                if y + 1 < h {
                    try_push(i + w);
                }
            }

            if count < min_area {
                continue;
            }
            let bw = (max_x - min_x + 1) as f32;
            let bh = (max_y - min_y + 1) as f32;
            let aspect = bw / bh;
            if !(1.0 / ASPECT_LIMIT..=ASPECT_LIMIT).contains(&aspect) {
                continue;
            }
            let confidence = (lum_sum as f32 / count as f32) / 255.0;
            if confidence < self.min_confidence {
                continue;
            }
            faces.push(FaceBox {
                rect: RectPx::new(min_x as f32, min_y as f32, bw, bh),
                confidence,
            });
        }

        faces.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        Ok(faces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{FrameSource as _, SyntheticClip};

    #[test]
    fn finds_the_synthetic_face_blob() {
        let mut clip = SyntheticClip::new(100);
        let mut detector = BlobDetector::default();
        for index in [0, 25, 60] {
            let frame = clip.frame_at(index).unwrap();
            let faces = detector.detect(&frame).unwrap();
            assert_eq!(faces.len(), 1, "frame {index}: {faces:?}");
            let iou = faces[0].rect.iou(&clip.face_rect(index));
            assert!(iou > 0.8, "frame {index}: iou {iou}");
            assert!(faces[0].confidence > 0.6);
        }
    }

    #[test]
    fn black_frame_has_no_faces() {
        let frame = Frame::filled(64, 64, [0, 0, 0], 0);
        let faces = BlobDetector::default().detect(&frame).unwrap();
        assert!(faces.is_empty());
    }

    #[test]
    fn two_bright_squares_give_two_boxes_brightest_first() {
        let mut frame = Frame::filled(200, 100, [0, 0, 0], 0);
        frame.fill_rect(10, 10, 40, 40, [180, 180, 180]);
        frame.fill_rect(120, 10, 40, 40, [255, 255, 255]);

        let faces = BlobDetector::default().detect(&frame).unwrap();
        assert_eq!(faces.len(), 2);
        assert_eq!(faces[0].rect, RectPx::new(120.0, 10.0, 40.0, 40.0));
        assert_eq!(faces[1].rect, RectPx::new(10.0, 10.0, 40.0, 40.0));
        assert!(faces[0].confidence > faces[1].confidence);
    }

    #[test]
    fn thin_stripe_is_rejected_by_aspect() {
        let mut frame = Frame::filled(200, 100, [0, 0, 0], 0);
        frame.fill_rect(50, 0, 4, 100, [255, 255, 255]);
        let faces = BlobDetector::default().detect(&frame).unwrap();
        assert!(faces.is_empty());
    }

    #[test]
    fn tiny_speck_is_rejected_by_area() {
        let mut frame = Frame::filled(200, 100, [0, 0, 0], 0);
        frame.fill_rect(50, 50, 2, 2, [255, 255, 255]);
        let faces = BlobDetector::default().detect(&frame).unwrap();
        assert!(faces.is_empty());
    }

    #[test]
    fn empty_frame_is_a_bad_input() {
        let frame = Frame::new(Vec::new(), 0, 0, 0);
        let err = BlobDetector::default().detect(&frame).unwrap_err();
        assert!(matches!(err, DetectError::BadInput { .. }));
    }
}
