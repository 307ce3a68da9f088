use std::path::Path;

use glimpse_core::AnnotationStore;
use glimpse_core::detect::DEFAULT_CONFIDENCE_THRESHOLD;
use glimpse_core::source::{FrameSource, SyntheticClip};
use glimpse_demo_lib::{AnnotateCanvas, DemoWindows, DetectPanel, PlayerPanel};

// ----------------------------------------------------------------------------

/// The panels the top bar switches between.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Anchor {
    #[default]
    Widgets,
    Player,
    Annotate,
    Detect,
}

impl Anchor {
    fn all() -> [Self; 4] {
        [Self::Widgets, Self::Player, Self::Annotate, Self::Detect]
    }

    fn label(self) -> &'static str {
        match self {
            Self::Widgets => "🗄 Widgets",
            Self::Player => "▶ Player",
            Self::Annotate => "✏ Annotate",
            Self::Detect => "👁 Detect",
        }
    }
}

// ----------------------------------------------------------------------------

/// The state that we persist (serialize).
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct State {
    demos: DemoWindows,
    selected_anchor: Anchor,
    annotations: AnnotationStore,
    confidence_threshold: f32,
}

impl Default for State {
    fn default() -> Self {
        Self {
            demos: DemoWindows::default(),
            selected_anchor: Anchor::default(),
            annotations: AnnotationStore::default(),
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }
}

/// Wraps the demo windows and the video panels into one app.
///
/// The player, the annotation store and the canvas are shared: rectangles
/// drawn in the annotate panel stay visible in the detect panel and vice
/// versa.
pub struct WrapApp {
    pub state: State,

    player: PlayerPanel,
    canvas: AnnotateCanvas,
    pub detect: DetectPanel,

    open_error: Option<String>,
}

impl WrapApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let detect = match DetectPanel::with_default_backend() {
            Ok(panel) => panel,
            Err(err) => {
                log::warn!("could not start the detection worker: {err}");
                DetectPanel::default()
            }
        };

        let mut slf = Self {
            state: State::default(),
            player: PlayerPanel::new(Box::new(SyntheticClip::new(120))),
            canvas: AnnotateCanvas::default(),
            detect,
            open_error: None,
        };

        #[cfg(feature = "persistence")]
        if let Some(storage) = cc.storage {
            if let Some(state) = eframe::get_value(storage, eframe::APP_KEY) {
                slf.state = state;
            }
        }

        #[cfg(not(feature = "persistence"))]
        let _ = cc;

        // Stored detections belong to a previous session's run; manual
        // rectangles are the part worth keeping.
        let annotated: Vec<usize> = slf.state.annotations.annotated_frames().collect();
        for frame in annotated {
            slf.state.annotations.clear_detected(frame);
        }
        slf.detect.confidence_threshold = slf.state.confidence_threshold;

        slf
    }

    /// Put an already opened source into the player, discarding annotations
    /// for the old one.
    pub fn set_source(&mut self, source: Box<dyn FrameSource>) {
        self.player.replace_source(source);
        self.state.annotations.clear_all();
        self.state.selected_anchor = Anchor::Player;
    }

    /// Load `path` into the player. Failures show up in a window, not in the
    /// terminal: this is what dropped files go through.
    pub fn open_path(&mut self, path: &Path) {
        match glimpse_core::source::open_source(path) {
            Ok(source) => {
                self.set_source(source);
                self.open_error = None;
            }
            Err(err) => {
                log::error!("could not open {}: {err}", path.display());
                self.open_error = Some(format!("Could not open {}:\n{err}", path.display()));
            }
        }
    }

    /// Swap in a synthetic clip of the given length.
    pub fn set_synthetic(&mut self, frame_count: usize) {
        self.player
            .replace_source(Box::new(SyntheticClip::new(frame_count)));
        self.state.annotations.clear_all();
    }
}

impl eframe::App for WrapApp {
    #[cfg(feature = "persistence")]
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.state.confidence_threshold = self.detect.confidence_threshold;
        eframe::set_value(storage, eframe::APP_KEY, &self.state);
    }

    fn clear_color(&self, visuals: &egui::Visuals) -> [f32; 4] {
        // Give the area behind the floating windows a different color, because it looks better:
        let color = egui::lerp(
            egui::Rgba::from(visuals.panel_fill)..=egui::Rgba::from(visuals.extreme_bg_color),
            0.5,
        );
        let color = egui::Color32::from(color);
        color.to_normalized_gamma_f32()
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        profiling::function_scope!();

        if ctx.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::F11)) {
            let fullscreen = ctx.input(|i| i.viewport().fullscreen.unwrap_or(false));
            ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(!fullscreen));
        }

        egui::TopBottomPanel::top("wrap_app_top_bar")
            .frame(egui::Frame::new().inner_margin(4))
            .show(ctx, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.visuals_mut().button_frame = false;
                    self.bar_contents(ui);
                });
            });

        // The threshold slider lives in the detect panel; the canvas only draws.
        self.canvas.min_confidence = self.detect.confidence_threshold;

        self.show_selected_app(ctx);

        self.ui_file_drag_and_drop(ctx);
        self.ui_open_error(ctx);
    }
}

impl WrapApp {
    fn bar_contents(&mut self, ui: &mut egui::Ui) {
        egui::widgets::global_theme_preference_switch(ui);

        ui.separator();

        let mut selected_anchor = self.state.selected_anchor;
        for anchor in Anchor::all() {
            if ui
                .selectable_label(selected_anchor == anchor, anchor.label())
                .clicked()
            {
                selected_anchor = anchor;
            }
        }
        self.state.selected_anchor = selected_anchor;

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            egui::warn_if_debug_build(ui);
        });
    }

    fn show_selected_app(&mut self, ctx: &egui::Context) {
        match self.state.selected_anchor {
            Anchor::Widgets => self.state.demos.ui(ctx),
            Anchor::Player => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    self.player.ui(ui);
                });
            }
            Anchor::Annotate => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    self.player.controls_ui(ui);
                    ui.separator();
                    self.canvas
                        .ui(ui, &mut self.player, &mut self.state.annotations);
                });
            }
            Anchor::Detect => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    self.player.controls_ui(ui);
                    ui.separator();
                    self.detect
                        .ui(ui, &mut self.player, &mut self.state.annotations);
                    ui.separator();
                    self.canvas
                        .ui(ui, &mut self.player, &mut self.state.annotations);
                });
            }
        }
    }

    fn ui_file_drag_and_drop(&mut self, ctx: &egui::Context) {
        use egui::{Align2, Color32, Id, LayerId, Order, TextStyle};
        use std::fmt::Write as _;

        // Preview hovering files:
        if !ctx.input(|i| i.raw.hovered_files.is_empty()) {
            let text = ctx.input(|i| {
                let mut text = "Drop to open:".to_owned();
                for file in &i.raw.hovered_files {
                    if let Some(path) = &file.path {
                        write!(text, "\n{}", path.display()).ok();
                    } else if !file.mime.is_empty() {
                        write!(text, "\n{}", file.mime).ok();
                    } else {
                        text += "\n???";
                    }
                }
                text
            });

            let painter =
                ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));

            let screen_rect = ctx.screen_rect();
            painter.rect_filled(screen_rect, 0, Color32::from_black_alpha(192));
            painter.text(
                screen_rect.center(),
                Align2::CENTER_CENTER,
                text,
                TextStyle::Heading.resolve(&ctx.style()),
                Color32::WHITE,
            );
        }

        // Open dropped files:
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        for file in dropped {
            if let Some(path) = file.path {
                self.open_path(&path);
            }
        }
    }

    fn ui_open_error(&mut self, ctx: &egui::Context) {
        if let Some(error) = &self.open_error {
            let mut open = true;
            egui::Window::new("Open failed")
                .open(&mut open)
                .collapsible(false)
                .show(ctx, |ui| {
                    ui.label(error);
                });
            if !open {
                self.open_error = None;
            }
        }
    }
}
