//! The combined glimpse app: demo windows, video player, annotation canvas
//! and face detection behind a shared top bar.

#![forbid(unsafe_code)]

mod wrap_app;

pub use wrap_app::{Anchor, WrapApp};
