//! Frame sources: random access to the decoded frames of a clip.
//!
//! Available sources:
//! - [`SyntheticClip`]: procedural test pattern, always available.
//! - [`StillImage`]: one PNG/JPEG as a single-frame source.
//! - [`ImageSequence`]: a directory of stills in alphanumeric order.
//! - [`VideoFile`]: any video ffmpeg can decode (feature `ffmpeg`).

mod sequence;
mod still;
mod synthetic;
#[cfg(feature = "ffmpeg")]
mod video;

pub use sequence::ImageSequence;
pub use still::StillImage;
pub use synthetic::SyntheticClip;
#[cfg(feature = "ffmpeg")]
pub use video::VideoFile;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::frame::Frame;

/// Static facts about an open source.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceInfo {
    pub width: usize,
    pub height: usize,
    /// Nominal playback rate; `0.0` for still images.
    pub fps: f64,
    pub frame_count: usize,
    /// Short display name (file stem, directory name, "synthetic").
    pub name: String,
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image {}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("no decodable images in {}", path.display())]
    EmptySequence { path: PathBuf },

    #[error("frame {index} out of range (source has {len} frames)")]
    OutOfRange { index: usize, len: usize },

    #[error("no video stream in {}", path.display())]
    NoVideoStream { path: PathBuf },

    #[error("don't know how to open {} (build with the `ffmpeg` feature for video files)", path.display())]
    Unsupported { path: PathBuf },

    #[cfg(feature = "ffmpeg")]
    #[error("video decode failed")]
    Video(#[from] ffmpeg_next::Error),
}

/// Random access to the decoded frames of a clip, image or directory.
///
/// Sources live on the thread that created them; the [`Frame`]s they hand
/// out are owned and `Send`, so decoded frames can be shipped to workers.
pub trait FrameSource {
    fn info(&self) -> &SourceInfo;

    /// Decode the frame at `index`. Backwards seeks are allowed; a source
    /// may satisfy them by decoding forward from an earlier position.
    fn frame_at(&mut self, index: usize) -> Result<Frame, SourceError>;

    fn len(&self) -> usize {
        self.info().frame_count
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

const IMAGE_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png"];

pub(crate) fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Open `path` with whichever source fits: a directory becomes an
/// [`ImageSequence`], a PNG/JPEG a [`StillImage`], anything else a
/// [`VideoFile`] when the `ffmpeg` feature is enabled.
pub fn open_source(path: &Path) -> Result<Box<dyn FrameSource>, SourceError> {
    let source: Box<dyn FrameSource> = if path.is_dir() {
        Box::new(ImageSequence::open(path)?)
    } else if is_image_path(path) {
        Box::new(StillImage::open(path)?)
    } else {
        #[cfg(feature = "ffmpeg")]
        {
            Box::new(VideoFile::open(path)?)
        }
        #[cfg(not(feature = "ffmpeg"))]
        {
            return Err(SourceError::Unsupported { path: path.into() });
        }
    };

    let info = source.info();
    log::info!(
        "opened {}: {}x{}, {} frame(s) at {:.3} fps",
        path.display(),
        info.width,
        info.height,
        info.frame_count,
        info.fps
    );
    Ok(source)
}
