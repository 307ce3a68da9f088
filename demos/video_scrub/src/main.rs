//! Scrub through a clip frame by frame, or let it play at its own pace.
//!
//! Pass a video file, a still image or a directory of numbered images;
//! without one, a synthetic clip is shown. Video files need the `ffmpeg`
//! feature.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::path::PathBuf;

use clap::Parser;

use glimpse_demo_lib::{PlayerPanel, source_or_synthetic};

/// Scrub through a clip.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// A video file, a still image, or a directory of numbered images.
    input: Option<PathBuf>,
}

fn main() -> eframe::Result {
    let cli = Cli::parse();
    glimpse_demo_lib::run_demo(
        "video scrub",
        [960.0, 600.0],
        Box::new(move |_cc| {
            let player = PlayerPanel::new(source_or_synthetic(cli.input.as_deref()));
            Ok(Box::new(VideoScrub { player }))
        }),
    )
}

struct VideoScrub {
    player: PlayerPanel,
}

impl eframe::App for VideoScrub {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.player.ui(ui);
        });
    }
}
