//! Demo panels for the glimpse workspace.
//!
//! Everything the `demos/*` binaries and the combined app are assembled from:
//! the [`DemoWindows`] registry of toggleable demo windows, the video
//! [`PlayerPanel`], the [`AnnotateCanvas`] for drawing rectangles on frames,
//! and the [`DetectPanel`] with its background [`DetectWorker`].
//!
//! This crate is also used for benchmarks and headless tests.
//!
//! ## Feature flags
//! - `serde`: persist demo state across runs.
//! - `ffmpeg`: decode real video files.
//! - `onnx`: the pretrained face-detection backend.

#![forbid(unsafe_code)]

mod annotate;
pub mod demo;
mod detect_panel;
mod frame_tex;
mod player;
mod run;
mod worker;

pub use annotate::AnnotateCanvas;
pub use demo::{Demo, DemoWindows, View};
pub use detect_panel::DetectPanel;
pub use frame_tex::FrameTex;
pub use player::PlayerPanel;
pub use run::{run_demo, source_or_synthetic};
pub use worker::{DetectWorker, Detection};

// ----------------------------------------------------------------------------

#[test]
fn demo_windows_paint_in_a_headless_run() {
    let mut demo_windows = DemoWindows::default();
    let ctx = egui::Context::default();
    let raw_input = egui::RawInput::default();

    const NUM_FRAMES: usize = 5;
    for _ in 0..NUM_FRAMES {
        let full_output = ctx.run(raw_input.clone(), |ctx| {
            demo_windows.ui(ctx);
        });
        let clipped_primitives = ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        assert!(!clipped_primitives.is_empty());
    }
}

#[test]
fn zero_window_size_paints_nothing() {
    let mut demo_windows = DemoWindows::default();
    let ctx = egui::Context::default();
    let raw_input = egui::RawInput {
        screen_rect: Some(egui::Rect::from_min_max(egui::Pos2::ZERO, egui::Pos2::ZERO)),
        ..Default::default()
    };

    const NUM_FRAMES: usize = 5;
    for _ in 0..NUM_FRAMES {
        let full_output = ctx.run(raw_input.clone(), |ctx| {
            demo_windows.ui(ctx);
        });
        let clipped_primitives = ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        assert!(
            clipped_primitives.is_empty(),
            "there should be nothing to paint, got {clipped_primitives:?}"
        );
    }
}
