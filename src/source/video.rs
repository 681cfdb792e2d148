//! Video source abstraction for random-access frame reads.
//!
//! This module provides a trait-based abstraction over video decoders,
//! allowing for both a real FFmpeg-backed implementation and a mock
//! implementation for testing.

use super::Frame;
use thiserror::Error;

/// Errors that can occur while opening or reading a video source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The file could not be opened or recognized by the decoder.
    #[error("failed to open video source: {0}")]
    OpenFailed(String),
    /// The container was opened but holds no video stream.
    #[error("no video stream found in '{0}'")]
    NoVideoStream(String),
    /// A single frame could not be decoded. Non-fatal: sampling skips it.
    #[error("failed to decode frame {index}")]
    DecodeFailed {
        /// The frame index that failed to decode.
        index: u64,
    },
    /// The crate was built without a decoder backend.
    #[error("video decoding support not compiled in (enable the `ffmpeg` feature)")]
    Unsupported,
}

/// Trait for video sources that can be read frame by frame.
///
/// A source is consumed by exactly one barcode build and dropped when the
/// build finishes. `read_frame` seeks by absolute index, so it repositions
/// the decoder's internal read cursor on every call; a source handle must
/// therefore not be shared across concurrent reads.
pub trait VideoSource {
    /// Total number of frames in the video.
    fn frame_count(&self) -> u64;

    /// Native frame width in pixels.
    fn width(&self) -> u32;

    /// Native frame height in pixels.
    fn height(&self) -> u32;

    /// Frames per second as reported by the container.
    fn fps(&self) -> f64;

    /// Seeks to `index` and decodes that frame.
    ///
    /// Returns [`SourceError::DecodeFailed`] when the frame at `index`
    /// cannot be produced (out of range, corrupt data). Callers treat that
    /// case as skippable.
    fn read_frame(&mut self, index: u64) -> Result<Frame, SourceError>;
}

/// Mock video source that serves flat-colored synthetic frames.
///
/// Each entry in `frames` is either a BGR fill color or `None` to simulate
/// a frame that fails to decode. Intended for tests and for exercising the
/// pipeline without FFmpeg.
#[derive(Debug, Clone)]
pub struct MockVideo {
    frames: Vec<Option<[u8; 3]>>,
    width: u32,
    height: u32,
    fps: f64,
    cursor: u64,
}

impl MockVideo {
    /// Creates a mock video where every frame is the same BGR color.
    pub fn solid(width: u32, height: u32, frame_count: usize, bgr: [u8; 3]) -> Self {
        Self::from_colors(width, height, vec![Some(bgr); frame_count])
    }

    /// Creates a mock video from per-frame BGR colors.
    ///
    /// `None` entries decode-fail when read.
    pub fn from_colors(width: u32, height: u32, frames: Vec<Option<[u8; 3]>>) -> Self {
        Self {
            frames,
            width,
            height,
            fps: 30.0,
            cursor: 0,
        }
    }

    /// Sets the reported frame rate.
    pub fn with_fps(mut self, fps: f64) -> Self {
        self.fps = fps;
        self
    }

    /// Returns the current read cursor position (last sought index).
    pub fn cursor(&self) -> u64 {
        self.cursor
    }
}

impl VideoSource for MockVideo {
    fn frame_count(&self) -> u64 {
        self.frames.len() as u64
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
        self.cursor = index;

        let color = self
            .frames
            .get(index as usize)
            .copied()
            .flatten()
            .ok_or(SourceError::DecodeFailed { index })?;

        let mut pixels = Vec::with_capacity(self.width as usize * self.height as usize * 3);
        for _ in 0..(self.width as usize * self.height as usize) {
            pixels.extend_from_slice(&color);
        }

        Ok(Frame::new(pixels, self.width, self.height, index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_reads_in_range() {
        let mut video = MockVideo::solid(4, 2, 3, [10, 20, 30]);

        let frame = video.read_frame(1).unwrap();
        assert!(frame.is_valid());
        assert_eq!(frame.index(), 1);
        assert_eq!(&frame.pixels()[..3], &[10, 20, 30]);
        assert_eq!(video.cursor(), 1);
    }

    #[test]
    fn test_mock_out_of_range_fails() {
        let mut video = MockVideo::solid(4, 2, 3, [0, 0, 0]);

        assert!(matches!(
            video.read_frame(3),
            Err(SourceError::DecodeFailed { index: 3 })
        ));
    }

    #[test]
    fn test_mock_marked_frame_fails() {
        let mut video = MockVideo::from_colors(2, 2, vec![Some([1, 2, 3]), None]);

        assert!(video.read_frame(0).is_ok());
        assert!(matches!(
            video.read_frame(1),
            Err(SourceError::DecodeFailed { index: 1 })
        ));
    }
}
