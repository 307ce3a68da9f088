#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
enum Flavor {
    Vanilla,
    Strawberry,
    Chocolate,
}

/// One of each major widget type, with no logic behind them: the state
/// here exists only to be poked at.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WidgetTour {
    enabled: bool,
    boolean: bool,
    radio: Flavor,
    scalar: f32,
    count: u32,
    string: String,
    color: egui::Color32,
}

impl Default for WidgetTour {
    fn default() -> Self {
        Self {
            enabled: true,
            boolean: false,
            radio: Flavor::Vanilla,
            scalar: 42.0,
            count: 3,
            string: String::new(),
            color: egui::Color32::LIGHT_BLUE.linear_multiply(0.5),
        }
    }
}

impl super::Demo for WidgetTour {
    fn name(&self) -> &'static str {
        "🗄 Widget tour"
    }

    fn show(&mut self, ctx: &egui::Context, open: &mut bool) {
        egui::Window::new(self.name())
            .open(open)
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| {
                use super::View as _;
                self.ui(ui);
            });
    }
}

impl super::View for WidgetTour {
    fn ui(&mut self, ui: &mut egui::Ui) {
        ui.add_enabled_ui(self.enabled, |ui| {
            egui::Grid::new("widget_tour_grid")
                .num_columns(2)
                .spacing([40.0, 4.0])
                .striped(true)
                .show(ui, |ui| {
                    self.grid_contents(ui);
                });
        });

        ui.separator();

        ui.horizontal(|ui| {
            ui.checkbox(&mut self.enabled, "Interactive")
                .on_hover_text("Uncheck to inspect how the widgets look when disabled.");
            if ui.button("Reset").clicked() {
                *self = Self::default();
            }
        });
    }
}

impl WidgetTour {
    fn grid_contents(&mut self, ui: &mut egui::Ui) {
        let Self {
            enabled: _,
            boolean,
            radio,
            scalar,
            count,
            string,
            color,
        } = self;

        ui.label("Label:");
        ui.label("Welcome to the widget tour!");
        ui.end_row();

        ui.label("TextEdit:");
        ui.add(egui::TextEdit::singleline(string).hint_text("Write something here"));
        ui.end_row();

        ui.label("Button:");
        if ui.button("Click me!").clicked() {
            *boolean = !*boolean;
        }
        ui.end_row();

        ui.label("Checkbox:");
        ui.checkbox(boolean, "Checkbox");
        ui.end_row();

        ui.label("RadioButton:");
        ui.horizontal(|ui| {
            ui.radio_value(radio, Flavor::Vanilla, "Vanilla");
            ui.radio_value(radio, Flavor::Strawberry, "Strawberry");
            ui.radio_value(radio, Flavor::Chocolate, "Chocolate");
        });
        ui.end_row();

        ui.label("ComboBox:");
        egui::ComboBox::from_label("Take your pick")
            .selected_text(format!("{radio:?}"))
            .show_ui(ui, |ui| {
                ui.selectable_value(radio, Flavor::Vanilla, "Vanilla");
                ui.selectable_value(radio, Flavor::Strawberry, "Strawberry");
                ui.selectable_value(radio, Flavor::Chocolate, "Chocolate");
            });
        ui.end_row();

        ui.label("Slider:");
        ui.add(egui::Slider::new(scalar, 0.0..=360.0).suffix("°"));
        ui.end_row();

        ui.label("DragValue:");
        ui.add(egui::DragValue::new(count).range(0..=100).speed(1.0));
        ui.end_row();

        ui.label("ProgressBar:");
        ui.add(egui::ProgressBar::new(*scalar / 360.0).show_percentage());
        ui.end_row();

        ui.label("Color picker:");
        ui.color_edit_button_srgba(color);
        ui.end_row();
    }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use egui_kittest::Harness;
    use egui_kittest::kittest::Queryable as _;

    use super::super::View as _;
    use super::*;

    #[test]
    fn the_button_toggles_the_checkbox() {
        let mut harness = Harness::new_ui_state(
            |ui, tour: &mut WidgetTour| {
                tour.ui(ui);
            },
            WidgetTour::default(),
        );

        assert!(!harness.state().boolean);

        harness.get_by_label("Click me!").click();
        harness.run();

        assert!(harness.state().boolean);
    }

    #[test]
    fn reset_restores_the_defaults() {
        let mut harness = Harness::new_ui_state(
            |ui, tour: &mut WidgetTour| {
                tour.ui(ui);
            },
            WidgetTour::default(),
        );
        harness.state_mut().radio = Flavor::Chocolate;
        harness.state_mut().count = 77;

        harness.get_by_label("Reset").click();
        harness.run();

        assert_eq!(harness.state().radio, Flavor::Vanilla);
        assert_eq!(harness.state().count, 3);
    }
}
