use egui::{ColorImage, TextureHandle, TextureOptions, Vec2};

use glimpse_core::Frame;

/// An egui texture holding one uploaded [`Frame`].
///
/// The GPU texture lives as long as the inner [`TextureHandle`]: uploading
/// again reuses the same slot (any size), and dropping the value frees it.
pub struct FrameTex {
    name: String,
    texture: Option<TextureHandle>,
    frame_index: Option<usize>,
}

impl FrameTex {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            texture: None,
            frame_index: None,
        }
    }

    /// Upload `frame`, replacing whatever was shown before.
    pub fn upload(&mut self, ctx: &egui::Context, frame: &Frame) {
        let image = ColorImage::from_rgb([frame.width(), frame.height()], frame.data());
        match &mut self.texture {
            Some(texture) => texture.set(image, TextureOptions::LINEAR),
            None => {
                self.texture =
                    Some(ctx.load_texture(self.name.clone(), image, TextureOptions::LINEAR));
            }
        }
        self.frame_index = Some(frame.index());
    }

    /// Source index of the uploaded frame, if any.
    pub fn frame_index(&self) -> Option<usize> {
        self.frame_index
    }

    pub fn texture(&self) -> Option<&TextureHandle> {
        self.texture.as_ref()
    }

    /// Size of the uploaded image in points.
    pub fn image_size(&self) -> Option<Vec2> {
        self.texture.as_ref().map(TextureHandle::size_vec2)
    }

    /// Largest size with the image's aspect ratio that fits into `avail`.
    pub fn fit_into(&self, avail: Vec2) -> Option<Vec2> {
        let size = self.image_size()?;
        if size.x <= 0.0 || size.y <= 0.0 || avail.x <= 0.0 || avail.y <= 0.0 {
            return None;
        }
        let scale = (avail.x / size.x).min(avail.y / size.y);
        Some(size * scale)
    }

    /// Show the image scaled to fit the available space.
    pub fn show(&self, ui: &mut egui::Ui) -> Option<egui::Response> {
        let texture = self.texture.as_ref()?;
        let size = self.fit_into(ui.available_size())?;
        Some(ui.image((texture.id(), size)))
    }
}
