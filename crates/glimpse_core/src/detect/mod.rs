//! Face detection over decoded frames.
//!
//! Most of the work here is backend-independent: [`prep::letterbox`] gets a
//! frame into the detector's input geometry, and [`nms`] cleans up the
//! overlapping candidates that come back. Backends implement
//! [`FaceDetector`]:
//! - [`BlobDetector`]: pure-Rust brightness heuristic, always available,
//!   tuned for the synthetic clip. Keeps the overlay demos self-contained.
//! - [`OnnxDetector`] (feature `onnx`): a pretrained UltraFace-style model
//!   run by tract.
//!
//! Backends return every candidate above a low floor
//! ([`DEFAULT_MIN_CONFIDENCE`]); the UI applies the user-facing threshold at
//! display time, so moving the confidence slider never re-runs inference.

mod blob;
#[cfg(feature = "onnx")]
mod onnx;
pub mod prep;

pub use blob::BlobDetector;
#[cfg(feature = "onnx")]
pub use onnx::OnnxDetector;

use std::path::PathBuf;

use thiserror::Error;

use crate::frame::Frame;
use crate::rect::RectPx;

/// Floor below which backends discard candidates outright.
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.3;

/// Default user-facing confidence threshold for showing a detection.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.7;

/// Greedy NMS suppresses a candidate overlapping a kept box by more than this.
pub const DEFAULT_NMS_IOU: f32 = 0.3;

/// One detected face in source-pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceBox {
    pub rect: RectPx,
    pub confidence: f32,
}

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("failed to load model {}", path.display())]
    Model {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("inference failed")]
    Inference(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("unexpected model output shape {shape:?}")]
    BadOutput { shape: Vec<usize> },

    #[error("frame too small to detect in ({width}x{height})")]
    BadInput { width: usize, height: usize },
}

/// A face detection backend.
///
/// `detect` takes `&mut self` so backends can reuse scratch buffers and
/// sessions; detectors are `Send` so a worker thread can own one.
pub trait FaceDetector: Send {
    /// Short backend name for display.
    fn name(&self) -> &'static str;

    /// Faces in `frame`, most confident first.
    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceBox>, DetectError>;
}

/// Greedy non-maximum suppression: keep candidates best-first, dropping any
/// that overlap an already-kept box by more than `iou_threshold`.
pub fn nms(mut candidates: Vec<FaceBox>, iou_threshold: f32) -> Vec<FaceBox> {
    candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    let mut kept: Vec<FaceBox> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let suppressed = kept
            .iter()
            .any(|k| k.rect.iou(&candidate.rect) > iou_threshold);
        if !suppressed {
            kept.push(candidate);
        }
    }
    kept
}
