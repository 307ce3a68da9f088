use egui::emath::RectTransform;
use egui::{Align2, Color32, CornerRadius, Pos2, Rect, Sense, Stroke, StrokeKind, pos2};

use glimpse_core::{AnnotationOrigin, AnnotationStore, RectPx};

use crate::PlayerPanel;

/// Rectangles narrower or shorter than this (in source pixels) are
/// considered accidental clicks and not committed.
const MIN_RECT_SIDE: f32 = 2.0;

/// Draws the current frame and lets the user drag out rectangles on it.
///
/// All hit-testing happens in source-pixel space: a `RectTransform` maps
/// between the on-screen image rect and `width x height` pixels, so
/// annotations stay glued to the image however the window is resized.
pub struct AnnotateCanvas {
    /// Drag anchor in source pixels while a rubber-band drag is live.
    drag_start: Option<Pos2>,

    pub manual_stroke: Stroke,
    pub detected_stroke: Stroke,
    /// Detected boxes below this confidence are hidden (manual boxes
    /// always show).
    pub min_confidence: f32,
}

impl Default for AnnotateCanvas {
    fn default() -> Self {
        Self {
            drag_start: None,
            manual_stroke: Stroke::new(2.0, Color32::LIGHT_GREEN),
            detected_stroke: Stroke::new(2.0, Color32::from_rgb(255, 179, 0)),
            min_confidence: 0.0,
        }
    }
}

impl AnnotateCanvas {
    /// Toolbar plus canvas. `player` supplies the frame and texture,
    /// `store` receives committed rectangles.
    pub fn ui(
        &mut self,
        ui: &mut egui::Ui,
        player: &mut PlayerPanel,
        store: &mut AnnotationStore,
    ) {
        let frame_index = player.current_index();

        ui.horizontal(|ui| {
            let has_any = !store.frame(frame_index).is_empty();
            if ui
                .add_enabled(has_any, egui::Button::new("Undo"))
                .clicked()
            {
                store.undo(frame_index);
            }
            if ui
                .add_enabled(has_any, egui::Button::new("Clear frame"))
                .clicked()
            {
                store.clear_frame(frame_index);
            }
            if ui
                .add_enabled(!store.is_empty(), egui::Button::new("Clear all"))
                .clicked()
            {
                store.clear_all();
            }

            let (manual, detected) = store.counts(frame_index);
            ui.label(format!("{manual} manual + {detected} detected"));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.weak("Drag on the image to add a rectangle");
            });
        });

        egui::Frame::canvas(ui.style()).show(ui, |ui| {
            self.canvas_ui(ui, player, store, frame_index);
        });
    }

    fn canvas_ui(
        &mut self,
        ui: &mut egui::Ui,
        player: &mut PlayerPanel,
        store: &mut AnnotationStore,
        frame_index: usize,
    ) {
        let Some(texture) = player.tex().texture() else {
            ui.label("No frame to annotate");
            return;
        };
        let texture_id = texture.id();

        let (width, height) = {
            let info = player.info();
            (info.width as f32, info.height as f32)
        };
        let image_space = Rect::from_min_size(Pos2::ZERO, egui::vec2(width, height));

        let size = player
            .tex()
            .fit_into(ui.available_size())
            .unwrap_or(egui::vec2(width, height));
        let (response, painter) = ui.allocate_painter(size, Sense::drag());

        painter.image(
            texture_id,
            response.rect,
            Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
            Color32::WHITE,
        );

        let to_screen = RectTransform::from_to(image_space, response.rect);
        let from_screen = to_screen.inverse();

        let pointer_in_image = response
            .interact_pointer_pos()
            .map(|pos| from_screen.transform_pos_clamped(pos));

        if response.drag_started() {
            self.drag_start = pointer_in_image;
        }

        let live = match (self.drag_start, pointer_in_image) {
            (Some(a), Some(b)) => Some(RectPx::from_corners((a.x, a.y), (b.x, b.y))),
            _ => None,
        };

        if response.drag_stopped() {
            if let Some(rect) = live {
                if rect.w >= MIN_RECT_SIDE && rect.h >= MIN_RECT_SIDE {
                    store.push_manual(frame_index, rect);
                }
            }
            self.drag_start = None;
        }

        // Stored rectangles, in insertion order.
        let label_font = egui::TextStyle::Small.resolve(ui.style());
        for annotation in store.frame(frame_index) {
            let screen_rect = image_to_screen(&to_screen, annotation.rect);
            match annotation.origin {
                AnnotationOrigin::Manual => {
                    painter.rect_stroke(
                        screen_rect,
                        CornerRadius::ZERO,
                        self.manual_stroke,
                        StrokeKind::Inside,
                    );
                }
                AnnotationOrigin::Detected { confidence } => {
                    if confidence < self.min_confidence {
                        continue;
                    }
                    painter.rect_stroke(
                        screen_rect,
                        CornerRadius::ZERO,
                        self.detected_stroke,
                        StrokeKind::Inside,
                    );
                    painter.text(
                        screen_rect.left_top(),
                        Align2::LEFT_BOTTOM,
                        format!("{:.0}%", confidence * 100.0),
                        label_font.clone(),
                        self.detected_stroke.color,
                    );
                }
            }
        }

        // Live rubber band on top.
        if let Some(rect) = live {
            if self.drag_start.is_some() {
                painter.rect_stroke(
                    image_to_screen(&to_screen, rect),
                    CornerRadius::ZERO,
                    Stroke::new(1.0, self.manual_stroke.color),
                    StrokeKind::Inside,
                );
            }
        }
    }
}

fn image_to_screen(to_screen: &RectTransform, rect: RectPx) -> Rect {
    Rect::from_min_max(
        to_screen.transform_pos(pos2(rect.x, rect.y)),
        to_screen.transform_pos(pos2(rect.right(), rect.bottom())),
    )
}
