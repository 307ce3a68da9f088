use std::path::{Path, PathBuf};

use super::{FrameSource, SourceError, SourceInfo, is_image_path};
use crate::frame::Frame;

/// A directory of stills played as a clip, ordered alphanumerically
/// (`frame2.png` before `frame10.png`). Frames are decoded lazily per
/// access; [`SourceInfo`] reports the first frame's dimensions.
pub struct ImageSequence {
    info: SourceInfo,
    paths: Vec<PathBuf>,
}

impl ImageSequence {
    /// Playback rate assumed for sequences, which carry no timing of their own.
    pub const FPS: f64 = 12.0;

    pub fn open(dir: &Path) -> Result<Self, SourceError> {
        let entries = std::fs::read_dir(dir).map_err(|source| SourceError::Io {
            path: dir.into(),
            source,
        })?;
        let mut paths: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && is_image_path(path))
            .collect();
        alphanumeric_sort::sort_path_slice(&mut paths);
        if paths.is_empty() {
            return Err(SourceError::EmptySequence { path: dir.into() });
        }

        let first = decode(&paths[0], 0)?;
        let name = dir
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("sequence")
            .to_owned();
        Ok(Self {
            info: SourceInfo {
                width: first.width(),
                height: first.height(),
                fps: Self::FPS,
                frame_count: paths.len(),
                name,
            },
            paths,
        })
    }
}

fn decode(path: &Path, index: usize) -> Result<Frame, SourceError> {
    let decoded = image::open(path)
        .map_err(|source| SourceError::Image {
            path: path.into(),
            source,
        })?
        .to_rgb8();
    let (width, height) = (decoded.width() as usize, decoded.height() as usize);
    Ok(Frame::new(decoded.into_raw(), width, height, index))
}

impl FrameSource for ImageSequence {
    fn info(&self) -> &SourceInfo {
        &self.info
    }

    fn frame_at(&mut self, index: usize) -> Result<Frame, SourceError> {
        let Some(path) = self.paths.get(index) else {
            return Err(SourceError::OutOfRange {
                index,
                len: self.paths.len(),
            });
        };
        decode(path, index)
    }
}
