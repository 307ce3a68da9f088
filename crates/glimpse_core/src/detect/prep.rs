use crate::frame::Frame;
use crate::rect::RectPx;

/// Geometry of a letterboxed frame: source pixels were scaled by `scale`
/// and shifted by `(pad_x, pad_y)` into the detector input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Letterbox {
    pub scale: f32,
    pub pad_x: f32,
    pub pad_y: f32,
}

/// Gray level used for the letterbox padding, normalized.
pub const PAD_VALUE: f32 = 114.0 / 255.0;

/// Aspect-preserving resize of `frame` into a `dst_w` x `dst_h` canvas,
/// padded with gray, normalized to `0..=1`.
///
/// Returns the pixels as CHW planes (`3 * dst_h * dst_w` values, plane
/// major) plus the [`Letterbox`] needed to map detections back. Resampling
/// is nearest-neighbor; detectors do not care about interpolation quality.
///
/// `frame` must be non-empty. This is only debug-asserted (a release build
/// returns an all-padding tensor with an unusable scale); both detector
/// backends reject empty frames as `DetectError::BadInput` before
/// preprocessing.
pub fn letterbox(frame: &Frame, dst_w: usize, dst_h: usize) -> (Vec<f32>, Letterbox) {
    let src_w = frame.width();
    let src_h = frame.height();
    debug_assert!(src_w > 0 && src_h > 0, "cannot letterbox an empty frame");

    let scale = (dst_w as f32 / src_w as f32).min(dst_h as f32 / src_h as f32);
    let new_w = ((src_w as f32 * scale).round() as usize).min(dst_w);
    let new_h = ((src_h as f32 * scale).round() as usize).min(dst_h);
    let pad_x = (dst_w - new_w) / 2;
    let pad_y = (dst_h - new_h) / 2;

    let plane = dst_w * dst_h;
    let mut planes = vec![PAD_VALUE; 3 * plane];
    for y in 0..new_h {
        let src_y = ((y as f32 / scale) as usize).min(src_h - 1);
        for x in 0..new_w {
            let src_x = ((x as f32 / scale) as usize).min(src_w - 1);
            let rgb = frame.pixel(src_x, src_y);
            let dst = (pad_y + y) * dst_w + (pad_x + x);
            for (c, value) in rgb.iter().enumerate() {
                planes[c * plane + dst] = f32::from(*value) / 255.0;
            }
        }
    }

    (
        planes,
        Letterbox {
            scale,
            pad_x: pad_x as f32,
            pad_y: pad_y as f32,
        },
    )
}

/// Map a rectangle in detector-input pixels back to source pixels.
pub fn unletterbox(rect: RectPx, lb: Letterbox) -> RectPx {
    RectPx {
        x: (rect.x - lb.pad_x) / lb.scale,
        y: (rect.y - lb.pad_y) / lb.scale,
        w: rect.w / lb.scale,
        h: rect.h / lb.scale,
    }
}
