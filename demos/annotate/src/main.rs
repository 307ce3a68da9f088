//! Draw rectangles on the frames of a clip.
//!
//! Rectangles stick to the frame they were drawn on: scrub away and back
//! and they reappear, in the order they were drawn.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::path::PathBuf;

use clap::Parser;

use glimpse_core::AnnotationStore;
use glimpse_demo_lib::{AnnotateCanvas, PlayerPanel, source_or_synthetic};

/// Draw rectangles on the frames of a clip.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// A video file, a still image, or a directory of numbered images.
    input: Option<PathBuf>,
}

fn main() -> eframe::Result {
    let cli = Cli::parse();
    glimpse_demo_lib::run_demo(
        "annotate",
        [960.0, 680.0],
        Box::new(move |_cc| {
            let player = PlayerPanel::new(source_or_synthetic(cli.input.as_deref()));
            Ok(Box::new(Annotate {
                player,
                canvas: AnnotateCanvas::default(),
                annotations: AnnotationStore::default(),
            }))
        }),
    )
}

struct Annotate {
    player: PlayerPanel,
    canvas: AnnotateCanvas,
    annotations: AnnotationStore,
}

impl eframe::App for Annotate {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.player.controls_ui(ui);
            ui.separator();
            self.canvas.ui(ui, &mut self.player, &mut self.annotations);
        });
    }
}
