use std::path::{Path, PathBuf};

use ffmpeg_next as ffmpeg;

use super::{FrameSource, SourceError, SourceInfo};
use crate::frame::Frame;

/// Decodes a video file through ffmpeg (libavformat + libavcodec), converting
/// each frame to tightly packed RGB24.
///
/// Decoding is forward-only at the codec level; a backwards seek reopens the
/// file and decodes up to the target, which keeps scrubbing frame-accurate on
/// every codec at the cost of long backward jumps in large files. The most
/// recently decoded frame is cached so repeated reads of the current frame
/// are free.
pub struct VideoFile {
    path: PathBuf,
    info: SourceInfo,
    input: ffmpeg::format::context::Input,
    decoder: ffmpeg::decoder::Video,
    scaler: ffmpeg::software::scaling::Context,
    stream_index: usize,
    /// Index the next decoded frame will get.
    next_index: usize,
    flushed: bool,
    last: Option<Frame>,
}

impl VideoFile {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        ffmpeg::init()?;
        let input = ffmpeg::format::input(path)?;

        let (stream_index, fps, stream_frames, parameters) = {
            let stream = input
                .streams()
                .best(ffmpeg::media::Type::Video)
                .ok_or_else(|| SourceError::NoVideoStream { path: path.into() })?;
            let rate = stream.rate();
            let fps = if rate.denominator() != 0 {
                f64::from(rate.numerator()) / f64::from(rate.denominator())
            } else {
                0.0
            };
            (
                stream.index(),
                fps,
                stream.frames().max(0) as usize,
                stream.parameters(),
            )
        };

        let mut frame_count = stream_frames;
        if frame_count == 0 {
            // Some containers do not record a frame count; estimate from
            // the duration.
            let duration = input.duration();
            if duration > 0 && fps > 0.0 {
                let seconds = duration as f64 / f64::from(ffmpeg::ffi::AV_TIME_BASE);
                frame_count = (seconds * fps).round() as usize;
            }
        }

        let decoder = ffmpeg::codec::context::Context::from_parameters(parameters)?
            .decoder()
            .video()?;
        let (width, height) = (decoder.width(), decoder.height());
        let scaler = ffmpeg::software::scaling::Context::get(
            decoder.format(),
            width,
            height,
            ffmpeg::format::Pixel::RGB24,
            width,
            height,
            ffmpeg::software::scaling::Flags::BILINEAR,
        )?;

        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("video")
            .to_owned();
        Ok(Self {
            path: path.into(),
            info: SourceInfo {
                width: width as usize,
                height: height as usize,
                fps,
                frame_count,
                name,
            },
            input,
            decoder,
            scaler,
            stream_index,
            next_index: 0,
            flushed: false,
            last: None,
        })
    }

    fn reopen(&mut self) -> Result<(), SourceError> {
        let path = self.path.clone();
        log::debug!("reopening {} for a backwards seek", path.display());
        *self = Self::open(&path)?;
        Ok(())
    }

    /// Next decoded (but not yet converted) frame, or `None` at end of stream.
    fn next_decoded(
        &mut self,
    ) -> Result<Option<ffmpeg::util::frame::video::Video>, ffmpeg::Error> {
        loop {
            let mut decoded = ffmpeg::util::frame::video::Video::empty();
            if self.decoder.receive_frame(&mut decoded).is_ok() {
                return Ok(Some(decoded));
            }
            if self.flushed {
                return Ok(None);
            }

            let next = self
                .input
                .packets()
                .next()
                .map(|(stream, packet)| (stream.index(), packet));
            match next {
                Some((index, packet)) if index == self.stream_index => {
                    if let Err(err) = self.decoder.send_packet(&packet) {
                        log::warn!("dropping undecodable packet: {err}");
                    }
                }
                Some(_) => {}
                None => {
                    self.decoder.send_eof()?;
                    self.flushed = true;
                }
            }
        }
    }

    fn to_rgb(
        &mut self,
        decoded: &ffmpeg::util::frame::video::Video,
    ) -> Result<Frame, SourceError> {
        let mut rgb = ffmpeg::util::frame::video::Video::empty();
        self.scaler.run(decoded, &mut rgb)?;

        let (w, h) = (self.info.width, self.info.height);
        let stride = rgb.stride(0);
        let data = rgb.data(0);
        // Strip row padding: ffmpeg may use stride > width * 3.
        let mut pixels = Vec::with_capacity(w * h * 3);
        for row in 0..h {
            let start = row * stride;
            pixels.extend_from_slice(&data[start..start + w * 3]);
        }
        Ok(Frame::new(pixels, w, h, self.next_index))
    }
}

impl FrameSource for VideoFile {
    fn info(&self) -> &SourceInfo {
        &self.info
    }

    fn frame_at(&mut self, index: usize) -> Result<Frame, SourceError> {
        if index >= self.info.frame_count {
            return Err(SourceError::OutOfRange {
                index,
                len: self.info.frame_count,
            });
        }
        if let Some(last) = &self.last {
            if last.index() == index {
                return Ok(last.clone());
            }
        }
        if index < self.next_index {
            self.reopen()?;
        }

        while self.next_index <= index {
            match self.next_decoded()? {
                Some(decoded) => {
                    let frame = self.to_rgb(&decoded)?;
                    self.next_index += 1;
                    self.last = Some(frame);
                }
                None => {
                    // The container promised more frames than the stream
                    // actually holds; trim our count to what we saw.
                    let len = self.next_index;
                    self.info.frame_count = len;
                    return Err(SourceError::OutOfRange { index, len });
                }
            }
        }
        self.last.clone().ok_or(SourceError::OutOfRange {
            index,
            len: self.info.frame_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Gray level encoded into test frame `i`. Flat frames survive the
    /// YUV round trip to within a few levels.
    fn gray_for(i: usize) -> u8 {
        (40 + i * 30) as u8
    }

    fn create_test_video(path: &Path, num_frames: usize, width: u32, height: u32, fps: i32) {
        ffmpeg::init().unwrap();

        let mut octx = ffmpeg::format::output(path).unwrap();
        let global_header = octx
            .format()
            .flags()
            .contains(ffmpeg::format::Flags::GLOBAL_HEADER);

        let codec = ffmpeg::encoder::find(ffmpeg::codec::Id::MPEG4).unwrap();
        let mut ost = octx.add_stream(Some(codec)).unwrap();

        let mut encoder_ctx = ffmpeg::codec::context::Context::new_with_codec(codec)
            .encoder()
            .video()
            .unwrap();
        encoder_ctx.set_width(width);
        encoder_ctx.set_height(height);
        encoder_ctx.set_format(ffmpeg::format::Pixel::YUV420P);
        encoder_ctx.set_time_base(ffmpeg::Rational(1, fps));
        encoder_ctx.set_frame_rate(Some(ffmpeg::Rational(fps, 1)));
        if global_header {
            encoder_ctx.set_flags(ffmpeg::codec::Flags::GLOBAL_HEADER);
        }

        let mut encoder = encoder_ctx.open_with(ffmpeg::Dictionary::new()).unwrap();
        ost.set_parameters(&encoder);
        octx.write_header().unwrap();
        let ost_time_base = octx.stream(0).unwrap().time_base();

        let mut scaler = ffmpeg::software::scaling::Context::get(
            ffmpeg::format::Pixel::RGB24,
            width,
            height,
            ffmpeg::format::Pixel::YUV420P,
            width,
            height,
            ffmpeg::software::scaling::Flags::BILINEAR,
        )
        .unwrap();

        for i in 0..num_frames {
            let mut rgb_frame =
                ffmpeg::util::frame::video::Video::new(ffmpeg::format::Pixel::RGB24, width, height);
            let stride = rgb_frame.stride(0);
            let data = rgb_frame.data_mut(0);
            let value = gray_for(i);
            for row in 0..height as usize {
                for col in 0..width as usize {
                    let offset = row * stride + col * 3;
                    data[offset..offset + 3].copy_from_slice(&[value, value, value]);
                }
            }

            let mut yuv_frame = ffmpeg::util::frame::video::Video::empty();
            scaler.run(&rgb_frame, &mut yuv_frame).unwrap();
            yuv_frame.set_pts(Some(i as i64));
            encoder.send_frame(&yuv_frame).unwrap();
            drain_encoder(&mut encoder, &mut octx, fps, ost_time_base);
        }

        encoder.send_eof().unwrap();
        drain_encoder(&mut encoder, &mut octx, fps, ost_time_base);
        octx.write_trailer().unwrap();
    }

    fn drain_encoder(
        encoder: &mut ffmpeg::encoder::Video,
        octx: &mut ffmpeg::format::context::Output,
        fps: i32,
        ost_time_base: ffmpeg::Rational,
    ) {
        let mut encoded = ffmpeg::Packet::empty();
        while encoder.receive_packet(&mut encoded).is_ok() {
            encoded.set_stream(0);
            encoded.rescale_ts(ffmpeg::Rational(1, fps), ost_time_base);
            encoded.write_interleaved(octx).unwrap();
        }
    }

    fn assert_gray(frame: &Frame, expected: u8) {
        let [r, g, b] = frame.pixel(frame.width() / 2, frame.height() / 2);
        for channel in [r, g, b] {
            assert!(
                channel.abs_diff(expected) <= 12,
                "expected ~{expected}, got ({r}, {g}, {b})"
            );
        }
    }

    #[test]
    fn open_reads_stream_facts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        create_test_video(&path, 5, 160, 120, 30);

        let video = VideoFile::open(&path).unwrap();
        assert_eq!(video.info().width, 160);
        assert_eq!(video.info().height, 120);
        assert_eq!(video.info().frame_count, 5);
        assert!(video.info().fps > 0.0);
        assert_eq!(video.info().name, "clip");
    }

    #[test]
    fn open_nonexistent_errors() {
        assert!(VideoFile::open(Path::new("/nonexistent/clip.mp4")).is_err());
    }

    #[test]
    fn sequential_reads_decode_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        create_test_video(&path, 5, 160, 120, 30);

        let mut video = VideoFile::open(&path).unwrap();
        for i in 0..5 {
            let frame = video.frame_at(i).unwrap();
            assert_eq!(frame.index(), i);
            assert_gray(&frame, gray_for(i));
        }
    }

    #[test]
    fn forward_jump_skips_intermediate_frames() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        create_test_video(&path, 6, 160, 120, 30);

        let mut video = VideoFile::open(&path).unwrap();
        let frame = video.frame_at(4).unwrap();
        assert_eq!(frame.index(), 4);
        assert_gray(&frame, gray_for(4));
    }

    #[test]
    fn backwards_seek_reopens_and_lands_on_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        create_test_video(&path, 6, 160, 120, 30);

        let mut video = VideoFile::open(&path).unwrap();
        video.frame_at(5).unwrap();
        let frame = video.frame_at(1).unwrap();
        assert_eq!(frame.index(), 1);
        assert_gray(&frame, gray_for(1));
    }

    #[test]
    fn rereading_current_frame_uses_the_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        create_test_video(&path, 3, 160, 120, 30);

        let mut video = VideoFile::open(&path).unwrap();
        let a = video.frame_at(2).unwrap();
        let b = video.frame_at(2).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn out_of_range_index_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        create_test_video(&path, 3, 160, 120, 30);

        let mut video = VideoFile::open(&path).unwrap();
        assert!(matches!(
            video.frame_at(3),
            Err(SourceError::OutOfRange { index: 3, len: 3 })
        ));
    }
}
