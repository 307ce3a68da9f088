//! The first demo: open a window and rebuild an immediate-mode UI in it
//! every frame.
//!
//! The demo windows themselves (widget tour, signal plot, theme lab) come
//! from `glimpse_demo_lib`; this binary is just the window boilerplate.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use glimpse_demo_lib::DemoWindows;

fn main() -> eframe::Result {
    glimpse_demo_lib::run_demo(
        "hello window",
        [1024.0, 768.0],
        Box::new(|_cc| Ok(Box::<HelloWindow>::default())),
    )
}

#[derive(Default)]
struct HelloWindow {
    demos: DemoWindows,
}

impl eframe::App for HelloWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.demos.ui(ctx);
    }
}
