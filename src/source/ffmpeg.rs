//! FFmpeg-backed video source.
//!
//! Frames are decoded on demand: every read seeks the demuxer to the target
//! index, flushes the decoder, and decodes forward until the requested frame
//! is reached. The scaler converts whatever the codec produces into packed
//! BGR24 at the native resolution, which is the channel order the rest of
//! the pipeline expects.

use ffmpeg_next as ffmpeg;

use super::{Frame, SourceError, VideoSource};
use std::path::Path;

/// Video source backed by the system FFmpeg libraries.
pub struct FfmpegVideo {
    input: ffmpeg::format::context::Input,
    decoder: ffmpeg::codec::decoder::Video,
    scaler: ffmpeg::software::scaling::Context,
    stream_index: usize,
    time_base: ffmpeg::Rational,
    frame_count: u64,
    fps: f64,
    width: u32,
    height: u32,
}

impl FfmpegVideo {
    /// Opens a video file and prepares a decoder for its best video stream.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();

        ffmpeg::init().map_err(|e| SourceError::OpenFailed(e.to_string()))?;

        let input = ffmpeg::format::input(&path)
            .map_err(|e| SourceError::OpenFailed(format!("{}: {}", path.display(), e)))?;

        let stream = input
            .streams()
            .best(ffmpeg::media::Type::Video)
            .ok_or_else(|| SourceError::NoVideoStream(path.display().to_string()))?;
        let stream_index = stream.index();
        let time_base = stream.time_base();

        let rate = stream.avg_frame_rate();
        let fps = if rate.denominator() == 0 {
            0.0
        } else {
            rate.numerator() as f64 / rate.denominator() as f64
        };
        if fps <= 0.0 {
            return Err(SourceError::OpenFailed(format!(
                "{}: stream reports no frame rate",
                path.display()
            )));
        }

        // Containers that do not record a frame count get one estimated
        // from the duration.
        let frame_count = if stream.frames() > 0 {
            stream.frames() as u64
        } else {
            let duration_s = input.duration() as f64 / f64::from(ffmpeg::ffi::AV_TIME_BASE);
            (duration_s.max(0.0) * fps) as u64
        };

        let context = ffmpeg::codec::context::Context::from_parameters(stream.parameters())
            .map_err(|e| SourceError::OpenFailed(e.to_string()))?;
        let decoder = context
            .decoder()
            .video()
            .map_err(|e| SourceError::OpenFailed(e.to_string()))?;

        let width = decoder.width();
        let height = decoder.height();

        let scaler = ffmpeg::software::scaling::Context::get(
            decoder.format(),
            width,
            height,
            ffmpeg::util::format::pixel::Pixel::BGR24,
            width,
            height,
            ffmpeg::software::scaling::flag::Flags::BILINEAR,
        )
        .map_err(|e| SourceError::OpenFailed(e.to_string()))?;

        tracing::debug!(
            path = %path.display(),
            frame_count,
            fps,
            width,
            height,
            "opened video source"
        );

        Ok(Self {
            input,
            decoder,
            scaler,
            stream_index,
            time_base,
            frame_count,
            fps,
            width,
            height,
        })
    }
}

/// Frame number of a decoded frame, from its presentation timestamp.
fn pts_to_frame_number(pts: i64, time_base: ffmpeg::Rational, fps: f64) -> u64 {
    let seconds =
        pts as f64 * time_base.numerator() as f64 / time_base.denominator().max(1) as f64;
    (seconds * fps).round().max(0.0) as u64
}

/// Scales a decoded frame to BGR24 and copies it out, dropping any
/// per-row padding the scaler may leave after each line.
fn scale_to_bgr(
    scaler: &mut ffmpeg::software::scaling::Context,
    decoded: &ffmpeg::frame::Video,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, ffmpeg::Error> {
    let mut bgr = ffmpeg::frame::Video::empty();
    scaler.run(decoded, &mut bgr)?;

    let row_bytes = width as usize * 3;
    let stride = bgr.stride(0);
    let data = bgr.data(0);

    if stride == row_bytes {
        return Ok(data.to_vec());
    }

    let mut pixels = Vec::with_capacity(row_bytes * height as usize);
    for row in 0..height as usize {
        let start = row * stride;
        pixels.extend_from_slice(&data[start..start + row_bytes]);
    }
    Ok(pixels)
}

impl VideoSource for FfmpegVideo {
    fn frame_count(&self) -> u64 {
        self.frame_count
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fps(&self) -> f64 {
        self.fps
    }

    fn read_frame(&mut self, index: u64) -> Result<Frame, SourceError> {
        // Seek to the nearest keyframe at or before the target, then
        // decode forward until the target index is reached.
        let seek_ts =
            (index as f64 / self.fps * f64::from(ffmpeg::ffi::AV_TIME_BASE)) as i64;
        self.input
            .seek(seek_ts, ..seek_ts)
            .map_err(|_| SourceError::DecodeFailed { index })?;
        self.decoder.flush();

        let (time_base, fps) = (self.time_base, self.fps);
        let (width, height) = (self.width, self.height);
        let stream_index = self.stream_index;
        let mut decoded = ffmpeg::frame::Video::empty();

        for (stream, packet) in self.input.packets() {
            if stream.index() != stream_index {
                continue;
            }

            if self.decoder.send_packet(&packet).is_err() {
                return Err(SourceError::DecodeFailed { index });
            }

            while self.decoder.receive_frame(&mut decoded).is_ok() {
                let pts = decoded.pts().unwrap_or(0);
                if pts_to_frame_number(pts, time_base, fps) >= index {
                    let pixels = scale_to_bgr(&mut self.scaler, &decoded, width, height)
                        .map_err(|_| SourceError::DecodeFailed { index })?;
                    return Ok(Frame::new(pixels, width, height, index));
                }
            }
        }

        // Drain whatever the decoder still buffers.
        if self.decoder.send_eof().is_ok() {
            while self.decoder.receive_frame(&mut decoded).is_ok() {
                let pts = decoded.pts().unwrap_or(0);
                if pts_to_frame_number(pts, time_base, fps) >= index {
                    let pixels = scale_to_bgr(&mut self.scaler, &decoded, width, height)
                        .map_err(|_| SourceError::DecodeFailed { index })?;
                    return Ok(Frame::new(pixels, width, height, index));
                }
            }
        }
        self.decoder.flush();

        Err(SourceError::DecodeFailed { index })
    }
}
