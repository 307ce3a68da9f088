use std::path::Path;

use tract_onnx::prelude::*;

use super::{
    DEFAULT_MIN_CONFIDENCE, DEFAULT_NMS_IOU, DetectError, FaceBox, FaceDetector, nms, prep,
};
use crate::frame::Frame;
use crate::rect::RectPx;

/// Fixed input size of the UltraFace RFB-320 network.
pub const INPUT_WIDTH: usize = 320;
pub const INPUT_HEIGHT: usize = 240;

/// ONNX face detector running on [tract](https://github.com/sonos/tract).
///
/// Built for the UltraFace `version-RFB-320` model: one `1x3x240x320` f32
/// RGB input in `0..=1`, and two outputs per frame, `scores` of shape
/// `1xNx2` (background, face) and `boxes` of shape `1xNx4` (corner
/// coordinates normalized to the input size). Frames are letterboxed to
/// the input size and detections mapped back to source pixels.
///
/// Inference is pure CPU and touches no files after [`Self::load`].
pub struct OnnxDetector {
    plan: TypedSimplePlan<TypedModel>,
    /// Candidates scoring below this are dropped before NMS.
    pub min_confidence: f32,
    pub nms_iou: f32,
}

impl OnnxDetector {
    /// Load an ONNX model from disk, fix its input shape and optimize it
    /// into a runnable plan.
    pub fn load(path: &Path) -> Result<Self, DetectError> {
        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|model| {
                model.with_input_fact(
                    0,
                    InferenceFact::dt_shape(
                        f32::datum_type(),
                        tvec!(1, 3, INPUT_HEIGHT, INPUT_WIDTH),
                    ),
                )
            })
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| DetectError::Model {
                path: path.to_owned(),
                source: e.into(),
            })?;
        Ok(Self {
            plan,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            nms_iou: DEFAULT_NMS_IOU,
        })
    }
}

impl FaceDetector for OnnxDetector {
    fn name(&self) -> &'static str {
        "ultraface"
    }

    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceBox>, DetectError> {
        let (src_w, src_h) = (frame.width(), frame.height());
        if src_w == 0 || src_h == 0 {
            return Err(DetectError::BadInput {
                width: src_w,
                height: src_h,
            });
        }

        let (planes, lb) = prep::letterbox(frame, INPUT_WIDTH, INPUT_HEIGHT);
        let input = tract_ndarray::Array4::from_shape_vec((1, 3, INPUT_HEIGHT, INPUT_WIDTH), planes)
            .map_err(|e| DetectError::Inference(e.into()))?
            .into_tensor();
        let outputs = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| DetectError::Inference(e.into()))?;

        let (Some(scores), Some(boxes)) = (outputs.first(), outputs.get(1)) else {
            return Err(DetectError::BadOutput {
                shape: vec![outputs.len()],
            });
        };
        let scores = scores
            .to_array_view::<f32>()
            .map_err(|e| DetectError::Inference(e.into()))?;
        let boxes = boxes
            .to_array_view::<f32>()
            .map_err(|e| DetectError::Inference(e.into()))?;
        if scores.ndim() != 3 || scores.shape()[2] != 2 {
            return Err(DetectError::BadOutput {
                shape: scores.shape().to_vec(),
            });
        }
        if boxes.ndim() != 3 || boxes.shape()[1] != scores.shape()[1] || boxes.shape()[2] != 4 {
            return Err(DetectError::BadOutput {
                shape: boxes.shape().to_vec(),
            });
        }

        let mut candidates = Vec::new();
        for i in 0..scores.shape()[1] {
            let confidence = scores[[0, i, 1]];
            if confidence < self.min_confidence {
                continue;
            }
            let x0 = boxes[[0, i, 0]] * INPUT_WIDTH as f32;
            let y0 = boxes[[0, i, 1]] * INPUT_HEIGHT as f32;
            let x1 = boxes[[0, i, 2]] * INPUT_WIDTH as f32;
            let y1 = boxes[[0, i, 3]] * INPUT_HEIGHT as f32;
            let rect = prep::unletterbox(RectPx::from_corners((x0, y0), (x1, y1)), lb)
                .clamp_to(src_w as f32, src_h as f32);
            if rect.is_empty() {
                continue;
            }
            candidates.push(FaceBox { rect, confidence });
        }
        Ok(nms(candidates, self.nms_iou))
    }
}
