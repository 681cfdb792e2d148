//! Movie Barcode Library
//!
//! Converts a video file into a single still image (a "barcode") that
//! summarizes the video's color progression over time. Frames are sampled
//! at a configurable stride, each sampled frame is reduced to a thin
//! vertical strip, and the ordered strips are composed into one image with
//! the video's native dimensions.
//!
//! # Architecture
//!
//! The system follows an explicit data flow:
//!
//! ```text
//! source → sampling → reduction → assembly
//!                                     ↓
//!                          build (orchestration)
//! ```
//!
//! # Design Principles
//!
//! - **Streaming**: frames and strips are created and consumed one at a
//!   time in sampling order; nothing is retained past its reduction
//! - **Skip, don't abort**: an individual frame that fails to decode is
//!   skipped and only lowers the frame count in the returned stats
//! - **One channel swap**: pixel data stays in the decoder's BGR order all
//!   the way to the assembler, which swaps to RGB exactly once
//!
//! # Example
//!
//! ```no_run
//! use movie_barcode::{BarPolicy, BarcodeBuilder, BuildOptions, MockVideo};
//!
//! let video = MockVideo::solid(640, 480, 300, [30, 60, 90]);
//!
//! let mut options = BuildOptions::new(BarPolicy::Average);
//! options.stride_frames = Some(10);
//!
//! let builder = BarcodeBuilder::new(options).unwrap();
//! let output = builder.build(video).unwrap();
//!
//! println!(
//!     "used {} frames in {:?}",
//!     output.stats.frames_used, output.stats.elapsed
//! );
//! output.image.save("barcode.png").unwrap();
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod assemble;
pub mod build;
pub mod reduce;
pub mod sampling;
pub mod source;

// Re-export commonly used types at crate root
pub use assemble::{AssembleError, BarcodeImage};
pub use build::{
    BarcodeBuilder, BarcodeError, BuildOptions, BuildOutput, BuildStats, ConfigError, FileConfig,
    PersistError,
};
pub use reduce::{BarPolicy, Strip};
pub use sampling::{FrameSampler, SamplingPlan};
pub use source::{Frame, MockVideo, SourceError, VideoSource};

#[cfg(feature = "ffmpeg")]
pub use source::FfmpegVideo;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
