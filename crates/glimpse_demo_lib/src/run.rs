use std::path::Path;

use glimpse_core::source::{FrameSource, SyntheticClip, open_source};

/// Shared bootstrap for the `demos/*` binaries: logger, window, run loop.
///
/// Logging defaults to `info`; `RUST_LOG` overrides it as usual.
pub fn run_demo(
    title: &str,
    initial_size: [f32; 2],
    app_creator: eframe::AppCreator<'_>,
) -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title)
            .with_inner_size(initial_size)
            .with_drag_and_drop(true),
        ..Default::default()
    };
    eframe::run_native(title, options, app_creator)
}

/// Open `path`, or fall back to the built-in synthetic clip.
///
/// Demos always have something to show, even with no file at hand.
pub fn source_or_synthetic(path: Option<&Path>) -> Box<dyn FrameSource> {
    if let Some(path) = path {
        match open_source(path) {
            Ok(source) => return source,
            Err(err) => {
                log::error!(
                    "could not open {}: {err}; showing the synthetic clip",
                    path.display()
                );
            }
        }
    }
    Box::new(SyntheticClip::new(120))
}
