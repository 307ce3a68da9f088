//! Core building blocks for the glimpse demo programs.
//!
//! This crate is GUI-free. It provides decoded [`Frame`]s, screen-space
//! rectangles and per-frame [`AnnotationStore`]s, random-access
//! [`source::FrameSource`]s (synthetic clip, still image, image sequence and,
//! behind the `ffmpeg` feature, video files), and face detection with
//! pluggable backends ([`detect`]).
//!
//! ## Feature flags
//! - `serde`: serde derives on rectangles and annotations.
//! - `ffmpeg`: [`source::VideoFile`], decoding through the ffmpeg libraries.
//! - `onnx`: [`detect::OnnxDetector`], a pretrained face model run by tract.

#![forbid(unsafe_code)]

pub mod annot;
pub mod detect;
pub mod frame;
pub mod model;
pub mod rect;
pub mod source;

pub use annot::{Annotation, AnnotationOrigin, AnnotationStore};
pub use frame::Frame;
pub use rect::RectPx;
