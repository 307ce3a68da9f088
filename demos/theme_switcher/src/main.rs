//! Dark/light/system theme switching, with an accent color to make the
//! difference obvious.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use glimpse_demo_lib::View as _;
use glimpse_demo_lib::demo::theme_lab::ThemeLab;

fn main() -> eframe::Result {
    glimpse_demo_lib::run_demo(
        "theme switcher",
        [340.0, 360.0],
        Box::new(|_cc| Ok(Box::<ThemeSwitcher>::default())),
    )
}

#[derive(Default)]
struct ThemeSwitcher {
    theme_lab: ThemeLab,
}

impl eframe::App for ThemeSwitcher {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.theme_lab.ui(ui);
        });
    }
}
