use egui::NumExt as _;
use egui_plot::{Legend, Line, Plot, PlotPoints};

/// An animated sine trace, the hello-world of plotting.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SignalPlot {
    amplitude: f32,
    frequency: f32,
    paused: bool,

    #[cfg_attr(feature = "serde", serde(skip))]
    time: f64,
}

impl Default for SignalPlot {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            frequency: 1.0,
            paused: false,
            time: 0.0,
        }
    }
}

impl super::Demo for SignalPlot {
    fn name(&self) -> &'static str {
        "📈 Signal plot"
    }

    fn show(&mut self, ctx: &egui::Context, open: &mut bool) {
        egui::Window::new(self.name())
            .open(open)
            .default_size([420.0, 300.0])
            .vscroll(false)
            .show(ctx, |ui| {
                use super::View as _;
                self.ui(ui);
            });
    }
}

impl super::View for SignalPlot {
    fn ui(&mut self, ui: &mut egui::Ui) {
        if !self.paused {
            // Cap dt so a dragged-out frame does not jump the phase.
            self.time += f64::from(ui.input(|i| i.stable_dt).at_most(1.0 / 30.0));
            ui.ctx().request_repaint();
        }

        ui.horizontal(|ui| {
            ui.checkbox(&mut self.paused, "Paused");
            if ui.button("Reset").clicked() {
                *self = Self::default();
            }
        });
        ui.add(egui::Slider::new(&mut self.amplitude, 0.0..=2.0).text("amplitude"));
        ui.add(egui::Slider::new(&mut self.frequency, 0.1..=8.0).text("frequency"));

        let line = Line::new(self.points()).name("sin");
        Plot::new("signal_plot")
            .legend(Legend::default())
            .allow_scroll(false)
            .include_y(-2.2)
            .include_y(2.2)
            .show(ui, |plot_ui| plot_ui.line(line));
    }
}

impl SignalPlot {
    fn points(&self) -> PlotPoints<'static> {
        let amplitude = f64::from(self.amplitude);
        let frequency = f64::from(self.frequency);
        let time = self.time;
        let n = 512;
        (0..=n)
            .map(|i| {
                let x = i as f64 / n as f64 * std::f64::consts::TAU;
                [x, amplitude * (frequency * (x + time)).sin()]
            })
            .collect()
    }
}
