//! Video input and frame handling.
//!
//! This module provides abstractions for reading individual frames out of
//! a video file by absolute frame index. The video is treated as a random
//! access source of raw pixel data; everything downstream (sampling,
//! reduction, assembly) is decoder-agnostic.

mod frame;
mod video;

#[cfg(feature = "ffmpeg")]
mod ffmpeg;

pub use frame::Frame;
pub use video::{MockVideo, SourceError, VideoSource};

#[cfg(feature = "ffmpeg")]
pub use ffmpeg::FfmpegVideo;
