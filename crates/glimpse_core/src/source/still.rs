use std::path::Path;

use super::{FrameSource, SourceError, SourceInfo};
use crate::frame::Frame;

/// A single still image presented as a one-frame source with `fps` 0.
pub struct StillImage {
    info: SourceInfo,
    frame: Frame,
}

impl StillImage {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let decoded = image::open(path)
            .map_err(|source| SourceError::Image {
                path: path.into(),
                source,
            })?
            .to_rgb8();
        let (width, height) = (decoded.width() as usize, decoded.height() as usize);
        let frame = Frame::new(decoded.into_raw(), width, height, 0);
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("image")
            .to_owned();
        Ok(Self {
            info: SourceInfo {
                width,
                height,
                fps: 0.0,
                frame_count: 1,
                name,
            },
            frame,
        })
    }
}

impl FrameSource for StillImage {
    fn info(&self) -> &SourceInfo {
        &self.info
    }

    fn frame_at(&mut self, index: usize) -> Result<Frame, SourceError> {
        if index != 0 {
            return Err(SourceError::OutOfRange { index, len: 1 });
        }
        Ok(self.frame.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn write_test_png(dir: &Path, name: &str, w: u32, h: u32) -> std::path::PathBuf {
        let mut img = RgbImage::new(w, h);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        let path = dir.join(name);
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn open_decodes_one_frame() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_png(dir.path(), "still.png", 8, 6);

        let mut still = StillImage::open(&path).unwrap();
        assert_eq!(still.len(), 1);
        assert_eq!(still.info().fps, 0.0);
        assert_eq!(still.info().name, "still");

        let frame = still.frame_at(0).unwrap();
        assert_eq!((frame.width(), frame.height()), (8, 6));
        assert_eq!(frame.pixel(0, 0), [255, 0, 0]);
        assert_eq!(frame.pixel(1, 0), [0, 0, 0]);
    }

    #[test]
    fn only_index_zero_exists() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_png(dir.path(), "still.png", 2, 2);
        let mut still = StillImage::open(&path).unwrap();
        assert!(matches!(
            still.frame_at(1),
            Err(SourceError::OutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn missing_file_reports_image_error() {
        let err = StillImage::open(Path::new("does-not-exist.png")).unwrap_err();
        assert!(matches!(err, SourceError::Image { .. }));
    }
}
