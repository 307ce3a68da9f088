use glimpse_core::detect::{BlobDetector, DEFAULT_CONFIDENCE_THRESHOLD};
use glimpse_core::{AnnotationOrigin, AnnotationStore};

use crate::{DetectWorker, PlayerPanel};

/// Controls for the background face detector.
///
/// Results land in the shared [`AnnotationStore`] via `set_detected`, so
/// the annotate canvas draws them like any other rectangle. The confidence
/// slider only filters what is drawn; everything above the backend floor
/// stays stored, so moving the slider never re-runs inference.
pub struct DetectPanel {
    worker: Option<DetectWorker>,
    pub confidence_threshold: f32,
    /// Detect every frame the player lands on.
    pub auto: bool,
    last_requested: Option<usize>,
    pending: bool,
    last_error: Option<String>,
}

impl Default for DetectPanel {
    fn default() -> Self {
        Self {
            worker: None,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            auto: false,
            last_requested: None,
            pending: false,
            last_error: None,
        }
    }
}

impl DetectPanel {
    /// A panel driving `worker`.
    pub fn with_worker(worker: DetectWorker) -> Self {
        Self {
            worker: Some(worker),
            ..Self::default()
        }
    }

    /// A panel driving the built-in brightness-blob backend.
    pub fn with_default_backend() -> std::io::Result<Self> {
        let worker = DetectWorker::spawn(Box::new(BlobDetector::default()))?;
        Ok(Self::with_worker(worker))
    }

    pub fn set_worker(&mut self, worker: DetectWorker) {
        self.worker = Some(worker);
        self.last_requested = None;
        self.pending = false;
        self.last_error = None;
    }

    pub fn backend(&self) -> Option<&'static str> {
        self.worker.as_ref().map(DetectWorker::backend)
    }

    pub fn ui(
        &mut self,
        ui: &mut egui::Ui,
        player: &mut PlayerPanel,
        store: &mut AnnotationStore,
    ) {
        // Collect finished work before drawing anything.
        if let Some(worker) = &self.worker {
            if let Some(detection) = worker.try_recv() {
                self.pending = false;
                match detection.result {
                    Ok(faces) => {
                        store.set_detected(detection.frame_index, &faces);
                        self.last_error = None;
                    }
                    Err(err) => self.last_error = Some(err),
                }
            }
        }

        ui.horizontal(|ui| {
            let backend = self.backend().unwrap_or("none");
            ui.label(format!("Backend: {backend}"));

            if ui
                .add_enabled(self.worker.is_some(), egui::Button::new("Detect this frame"))
                .clicked()
            {
                self.request_current(player);
            }
            ui.checkbox(&mut self.auto, "Auto")
                .on_hover_text("Run detection on every frame the player shows");

            if self.pending {
                ui.spinner();
            }
        });

        ui.add(
            egui::Slider::new(&mut self.confidence_threshold, 0.0..=1.0)
                .text("min confidence"),
        );

        if self.auto && self.worker.is_some() && self.last_requested != Some(player.current_index())
        {
            self.request_current(player);
        }
        if self.pending {
            // Keep polling for the response.
            ui.ctx().request_repaint();
        }

        let frame_index = player.current_index();
        let (_, detected) = store.counts(frame_index);
        let shown = store
            .frame(frame_index)
            .iter()
            .filter(|a| match a.origin {
                AnnotationOrigin::Detected { confidence } => {
                    confidence >= self.confidence_threshold
                }
                AnnotationOrigin::Manual => false,
            })
            .count();
        ui.label(format!("{shown} of {detected} detections above threshold"));

        if let Some(err) = &self.last_error {
            ui.colored_label(ui.visuals().warn_fg_color, err);
        }
    }

    fn request_current(&mut self, player: &PlayerPanel) {
        if let (Some(worker), Some(frame)) = (&self.worker, player.frame()) {
            self.last_requested = Some(frame.index());
            self.pending = true;
            worker.request(frame.clone());
        }
    }
}
