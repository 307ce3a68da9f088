//! Face boxes drawn over a playing clip.
//!
//! Detection runs on a worker thread so the UI never stalls; the overlay
//! updates as results come back. By default a brightness-blob stand-in
//! detector is used. Build with the `onnx` feature (and point
//! `GLIMPSE_MODEL` at the model file) for the real one.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::path::PathBuf;

use clap::Parser;

use glimpse_core::AnnotationStore;
use glimpse_demo_lib::{AnnotateCanvas, DetectPanel, PlayerPanel, source_or_synthetic};

/// Face boxes over a playing clip.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// A video file, a still image, or a directory of numbered images.
    input: Option<PathBuf>,
}

fn main() -> eframe::Result {
    let cli = Cli::parse();
    glimpse_demo_lib::run_demo(
        "face overlay",
        [960.0, 720.0],
        Box::new(move |_cc| {
            let player = PlayerPanel::new(source_or_synthetic(cli.input.as_deref()));
            let mut detect = detect_panel();
            detect.auto = true;
            Ok(Box::new(FaceOverlay {
                player,
                detect,
                canvas: AnnotateCanvas::default(),
                annotations: AnnotationStore::default(),
            }))
        }),
    )
}

fn detect_panel() -> DetectPanel {
    #[cfg(feature = "onnx")]
    match onnx_panel() {
        Ok(panel) => return panel,
        Err(err) => log::warn!("falling back to the blob detector: {err}"),
    }

    match DetectPanel::with_default_backend() {
        Ok(panel) => panel,
        Err(err) => {
            log::warn!("could not start the detection worker: {err}");
            DetectPanel::default()
        }
    }
}

#[cfg(feature = "onnx")]
fn onnx_panel() -> Result<DetectPanel, Box<dyn std::error::Error>> {
    let path = glimpse_core::model::resolve_model(None)?;
    let detector = glimpse_core::detect::OnnxDetector::load(&path)?;
    let worker = glimpse_demo_lib::DetectWorker::spawn(Box::new(detector))?;
    Ok(DetectPanel::with_worker(worker))
}

struct FaceOverlay {
    player: PlayerPanel,
    detect: DetectPanel,
    canvas: AnnotateCanvas,
    annotations: AnnotationStore,
}

impl eframe::App for FaceOverlay {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.player.controls_ui(ui);
            ui.separator();
            self.detect.ui(ui, &mut self.player, &mut self.annotations);
            ui.separator();
            self.canvas.min_confidence = self.detect.confidence_threshold;
            self.canvas.ui(ui, &mut self.player, &mut self.annotations);
        });
    }
}
