use egui::NumExt as _;

use glimpse_core::Frame;
use glimpse_core::source::{FrameSource, SourceInfo};

use crate::FrameTex;

/// Scrub-and-play transport over a [`FrameSource`].
///
/// Owns the source, a decoded copy of the current frame, and the uploaded
/// texture. Random access makes the scrub slider a plain seek; while
/// playing, frames advance on a wall-clock accumulator fed by `stable_dt`,
/// so playback speed follows the source fps rather than the repaint rate.
pub struct PlayerPanel {
    source: Box<dyn FrameSource>,
    tex: FrameTex,
    frame: Option<Frame>,
    current: usize,
    playing: bool,
    looping: bool,
    time_debt: f32,
    status: Option<String>,
    failed_at: Option<usize>,
}

impl PlayerPanel {
    pub fn new(source: Box<dyn FrameSource>) -> Self {
        Self {
            source,
            tex: FrameTex::new("player"),
            frame: None,
            current: 0,
            playing: false,
            looping: true,
            time_debt: 0.0,
            status: None,
            failed_at: None,
        }
    }

    /// Swap in a new source, rewinding the transport.
    pub fn replace_source(&mut self, source: Box<dyn FrameSource>) {
        self.source = source;
        self.tex = FrameTex::new("player");
        self.frame = None;
        self.current = 0;
        self.playing = false;
        self.time_debt = 0.0;
        self.status = None;
        self.failed_at = None;
    }

    pub fn info(&self) -> &SourceInfo {
        self.source.info()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The decoded current frame, once [`Self::ui`] has run.
    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    pub fn tex(&self) -> &FrameTex {
        &self.tex
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn seek(&mut self, index: usize) {
        self.current = index.min(self.source.len().saturating_sub(1));
        self.playing = false;
    }

    /// Transport buttons, scrub slider and readout. Does not draw the
    /// frame; callers follow up with [`Self::frame_ui`] or their own
    /// canvas (see `AnnotateCanvas`).
    pub fn controls_ui(&mut self, ui: &mut egui::Ui) {
        let len = self.source.len();
        if len == 0 {
            ui.label("Empty source");
            return;
        }

        if self.playing {
            let dt = ui.input(|i| i.stable_dt).at_most(0.1);
            self.advance(dt);
            ui.ctx().request_repaint();
        }
        self.sync(ui.ctx());

        let (fps, name) = {
            let info = self.source.info();
            (info.fps, info.name.clone())
        };

        ui.horizontal(|ui| {
            let play_label = if self.playing { "⏸" } else { "▶" };
            if ui
                .add_enabled(fps > 0.0 && len > 1, egui::Button::new(play_label))
                .clicked()
            {
                self.playing = !self.playing;
                self.time_debt = 0.0;
            }
            if ui.button("⏮").clicked() {
                self.seek(0);
            }
            if ui
                .add_enabled(self.current > 0, egui::Button::new("⏴"))
                .clicked()
            {
                self.seek(self.current - 1);
            }
            if ui
                .add_enabled(self.current + 1 < len, egui::Button::new("⏵"))
                .clicked()
            {
                self.seek(self.current + 1);
            }
            ui.checkbox(&mut self.looping, "Loop");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("{name} — {}/{len} @ {fps:.1} fps", self.current + 1));
            });
        });

        let mut scrub = self.current;
        ui.add(
            egui::Slider::new(&mut scrub, 0..=len - 1)
                .integer()
                .text("frame"),
        );
        if scrub != self.current {
            self.seek(scrub);
        }

        if let Some(status) = &self.status {
            ui.colored_label(ui.visuals().warn_fg_color, status);
        }
    }

    /// Draw the current frame, fitted into the remaining space.
    pub fn frame_ui(&mut self, ui: &mut egui::Ui) {
        egui::Frame::canvas(ui.style()).show(ui, |ui| {
            if self.tex.show(ui).is_none() {
                ui.label("No frame to show");
            }
        });
    }

    /// Controls above the frame; the common arrangement.
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        self.controls_ui(ui);
        ui.separator();
        self.frame_ui(ui);
    }

    fn advance(&mut self, dt: f32) {
        let len = self.source.len();
        let fps = self.source.info().fps;
        if len <= 1 || fps <= 0.0 {
            self.playing = false;
            return;
        }
        // Cap the debt so stalls skip ahead instead of fast-forwarding.
        self.time_debt = (self.time_debt + dt).at_most(0.5);
        let seconds_per_frame = (1.0 / fps) as f32;
        while self.time_debt >= seconds_per_frame {
            self.time_debt -= seconds_per_frame;
            if self.current + 1 < len {
                self.current += 1;
            } else if self.looping {
                self.current = 0;
            } else {
                self.playing = false;
                self.time_debt = 0.0;
                break;
            }
        }
    }

    /// Decode and upload the current frame if the texture is stale.
    fn sync(&mut self, ctx: &egui::Context) {
        profiling::function_scope!();
        let up_to_date = self.tex.frame_index() == Some(self.current)
            && self.frame.as_ref().map(Frame::index) == Some(self.current);
        if up_to_date || self.failed_at == Some(self.current) {
            return;
        }
        match self.source.frame_at(self.current) {
            Ok(frame) => {
                self.tex.upload(ctx, &frame);
                self.frame = Some(frame);
                self.status = None;
                self.failed_at = None;
            }
            Err(err) => {
                log::warn!("failed to decode frame {}: {err}", self.current);
                self.status = Some(format!("frame {}: {err}", self.current));
                self.failed_at = Some(self.current);
                self.playing = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glimpse_core::source::SyntheticClip;

    fn run_once(ctx: &egui::Context, panel: &mut PlayerPanel) {
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| panel.ui(ui));
        });
    }

    #[test]
    fn first_frame_is_decoded_and_uploaded() {
        let ctx = egui::Context::default();
        let mut panel = PlayerPanel::new(Box::new(SyntheticClip::new(5)));
        run_once(&ctx, &mut panel);

        assert_eq!(panel.current_index(), 0);
        assert_eq!(panel.frame().map(Frame::index), Some(0));
        assert_eq!(panel.tex().frame_index(), Some(0));
    }

    #[test]
    fn seek_clamps_and_pauses() {
        let ctx = egui::Context::default();
        let mut panel = PlayerPanel::new(Box::new(SyntheticClip::new(5)));
        panel.seek(99);
        run_once(&ctx, &mut panel);

        assert_eq!(panel.current_index(), 4);
        assert!(!panel.is_playing());
        assert_eq!(panel.frame().map(Frame::index), Some(4));
    }

    #[test]
    fn replace_source_rewinds() {
        let ctx = egui::Context::default();
        let mut panel = PlayerPanel::new(Box::new(SyntheticClip::new(5)));
        panel.seek(3);
        run_once(&ctx, &mut panel);

        panel.replace_source(Box::new(SyntheticClip::with_size(64, 48, 2)));
        run_once(&ctx, &mut panel);

        assert_eq!(panel.current_index(), 0);
        assert_eq!(panel.info().width, 64);
        assert_eq!(panel.tex().image_size(), Some(egui::vec2(64.0, 48.0)));
    }

    #[test]
    fn advance_paces_by_fps_and_loops() {
        let mut panel = PlayerPanel::new(Box::new(SyntheticClip::new(3)));
        panel.playing = true;

        // 30 fps source: two frames' worth of time.
        panel.advance(2.5 / 30.0);
        assert_eq!(panel.current, 2);

        panel.advance(1.0 / 30.0);
        assert_eq!(panel.current, 0, "should wrap around when looping");

        panel.looping = false;
        panel.current = 2;
        panel.advance(1.0 / 30.0);
        assert_eq!(panel.current, 2);
        assert!(!panel.playing, "should stop at the last frame");
    }

    #[test]
    fn the_step_button_advances_one_frame() {
        use egui_kittest::Harness;
        use egui_kittest::kittest::Queryable as _;

        let mut harness = Harness::new_ui_state(
            |ui, panel: &mut PlayerPanel| panel.controls_ui(ui),
            PlayerPanel::new(Box::new(SyntheticClip::new(5))),
        );
        harness.run();
        assert_eq!(harness.state().current_index(), 0);

        harness.get_by_label("⏵").click();
        harness.run();
        assert_eq!(harness.state().current_index(), 1);

        harness.get_by_label("⏮").click();
        harness.run();
        assert_eq!(harness.state().current_index(), 0);
    }
}
