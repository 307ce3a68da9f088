//! The combined glimpse demo app.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::path::PathBuf;

use clap::Parser;

use glimpse_demo_app::WrapApp;

/// Play a clip, draw rectangles on it, and run face detection over it.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// A video file, a still image, or a directory of numbered images.
    ///
    /// Without one, a synthetic test clip is loaded.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Use a synthetic clip of this many frames instead of a file.
    #[arg(long, value_name = "FRAMES", conflicts_with = "input")]
    synthetic: Option<usize>,

    /// Path to the face-detection ONNX model.
    #[cfg(feature = "onnx")]
    #[arg(long)]
    model: Option<PathBuf>,

    /// Hide detections below this confidence (0 to 1).
    #[arg(long)]
    confidence: Option<f32>,
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(confidence) = cli.confidence {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(format!("confidence must be between 0.0 and 1.0, got {confidence}").into());
        }
    }
    if let Some(frames) = cli.synthetic {
        if frames == 0 {
            return Err("a synthetic clip needs at least one frame".into());
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    validate(&cli)?;

    // Open whatever the command line names before any window exists, so a
    // bad path fails on stderr instead of in a dialog.
    let source = match &cli.input {
        Some(path) => Some(glimpse_core::source::open_source(path)?),
        None => None,
    };
    #[cfg(feature = "onnx")]
    let worker = onnx_worker(cli.model.as_deref())?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("glimpse demo app")
            .with_inner_size([1280.0, 1024.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    eframe::run_native(
        "glimpse demo app",
        options,
        Box::new(move |cc| {
            let mut app = WrapApp::new(cc);
            if let Some(confidence) = cli.confidence {
                app.detect.confidence_threshold = confidence;
            }
            #[cfg(feature = "onnx")]
            if let Some(worker) = worker {
                app.detect.set_worker(worker);
            }
            if let Some(source) = source {
                app.set_source(source);
            }
            if let Some(frames) = cli.synthetic {
                app.set_synthetic(frames);
            }
            Ok(Box::new(app))
        }),
    )?;
    Ok(())
}

/// Build the ONNX detection worker, or `None` to stay on the blob backend.
///
/// A model named on the command line or in the environment has to load;
/// when nothing is configured, not finding one is routine.
#[cfg(feature = "onnx")]
fn onnx_worker(
    model: Option<&std::path::Path>,
) -> Result<Option<glimpse_demo_lib::DetectWorker>, Box<dyn std::error::Error>> {
    use glimpse_core::model::{ModelError, resolve_model};

    let path = match resolve_model(model) {
        Ok(path) => path,
        Err(err @ ModelError::Missing { .. }) => return Err(err.into()),
        Err(err) => {
            log::info!("{err}");
            return Ok(None);
        }
    };
    let detector = glimpse_core::detect::OnnxDetector::load(&path)?;
    let worker = glimpse_demo_lib::DetectWorker::spawn(Box::new(detector))?;
    Ok(Some(worker))
}
