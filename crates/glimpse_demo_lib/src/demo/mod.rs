//! Floating demo windows and the registry that shows them.

mod demo_windows;
pub mod signal_plot;
pub mod theme_lab;
pub mod widget_tour;

pub use demo_windows::DemoWindows;

// ----------------------------------------------------------------------------

/// Something to view inside a demo window.
pub trait View {
    fn ui(&mut self, ui: &mut egui::Ui);
}

/// A demo that shows itself as a floating [`egui::Window`].
pub trait Demo {
    /// `&'static` so it can double as the window id.
    fn name(&self) -> &'static str;

    /// Show the window (or not, depending on `open`).
    fn show(&mut self, ctx: &egui::Context, open: &mut bool);
}
