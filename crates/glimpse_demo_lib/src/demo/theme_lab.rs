use egui::Color32;

/// Switch between dark, light and follow-system themes, and try out an
/// accent color. Theme preference lives in the [`egui::Context`] (and is
/// persisted with it); only the accent override is ours.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ThemeLab {
    accent: Color32,
    override_accent: bool,
    preview: f32,
}

impl Default for ThemeLab {
    fn default() -> Self {
        Self {
            accent: Color32::from_rgb(0, 155, 255),
            override_accent: false,
            preview: 0.6,
        }
    }
}

impl super::Demo for ThemeLab {
    fn name(&self) -> &'static str {
        "🎨 Theme lab"
    }

    fn show(&mut self, ctx: &egui::Context, open: &mut bool) {
        egui::Window::new(self.name())
            .open(open)
            .resizable(false)
            .default_width(260.0)
            .show(ctx, |ui| {
                use super::View as _;
                self.ui(ui);
            });
    }
}

impl super::View for ThemeLab {
    fn ui(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Theme:");
            egui::widgets::global_theme_preference_buttons(ui);
        });

        ui.separator();

        ui.checkbox(&mut self.override_accent, "Override accent color");
        ui.horizontal(|ui| {
            ui.label("Accent:");
            ui.add_enabled_ui(self.override_accent, |ui| {
                ui.color_edit_button_srgba(&mut self.accent);
            });
        });
        self.apply_accent(ui.ctx());

        ui.separator();

        ui.label("Preview:");
        let _ = ui.selectable_label(true, "A selected label");
        ui.hyperlink_to("A hyperlink", "https://www.egui.rs");
        ui.add(egui::Slider::new(&mut self.preview, 0.0..=1.0).text("slider"));
        ui.add(egui::ProgressBar::new(self.preview).show_percentage());
    }
}

impl ThemeLab {
    /// Re-applied every frame so unchecking restores the stock visuals of
    /// whichever theme is active.
    fn apply_accent(&self, ctx: &egui::Context) {
        let stock = if ctx.style().visuals.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        let (selection_fill, link) = if self.override_accent {
            (self.accent, self.accent)
        } else {
            (stock.selection.bg_fill, stock.hyperlink_color)
        };
        ctx.style_mut(|style| {
            style.visuals.selection.bg_fill = selection_fill;
            style.visuals.hyperlink_color = link;
        });
    }
}
