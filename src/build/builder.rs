//! The barcode build orchestrator.

use super::{BuildOptions, ConfigError};
use crate::assemble::{assemble, AssembleError, BarcodeImage};
use crate::reduce::Strip;
use crate::sampling::{FrameSampler, SamplingPlan};
use crate::source::{SourceError, VideoSource};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Errors that abort a barcode build.
#[derive(Debug, Error)]
pub enum BarcodeError {
    /// The build parameters are invalid; nothing was read.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// The video source could not be opened or has no video stream.
    #[error(transparent)]
    Source(#[from] SourceError),
    /// Assembly failed, typically because zero frames were sampled.
    #[error(transparent)]
    Assemble(#[from] AssembleError),
}

/// Failure to persist the finished barcode.
///
/// Reported alongside the image in [`BuildOutput`]; it never invalidates
/// the in-memory barcode.
#[derive(Debug, Error)]
#[error("failed to write barcode to {path}: {source}")]
pub struct PersistError {
    /// The path the write was attempted at.
    pub path: PathBuf,
    /// The underlying encode or I/O error.
    #[source]
    pub source: image::ImageError,
}

/// Summary statistics for one build.
#[derive(Debug, Clone)]
pub struct BuildStats {
    /// Wall-clock time the build took.
    pub elapsed: Duration,
    /// Number of frames that were decoded and turned into strips.
    pub frames_used: u64,
    /// Number of sampled indices that failed to decode and were skipped.
    pub frames_skipped: u64,
    /// Number of sampling attempts made.
    pub attempts: u64,
    /// The resolved frame stride.
    pub stride: u64,
}

/// Everything one build produces.
#[derive(Debug)]
pub struct BuildOutput {
    /// The finished barcode image.
    pub image: BarcodeImage,
    /// Build statistics.
    pub stats: BuildStats,
    /// Persistence outcome: `None` when persistence was not requested,
    /// otherwise the written path or the error that kept the file from
    /// being written.
    pub persisted: Option<Result<PathBuf, PersistError>>,
}

/// Drives the sampling → reduction → assembly pipeline for one video.
///
/// The builder validates its options on construction, so an invalid
/// configuration is rejected before any frame is read.
pub struct BarcodeBuilder {
    options: BuildOptions,
    cancel: Option<Arc<AtomicBool>>,
}

impl BarcodeBuilder {
    /// Creates a builder after validating `options`.
    pub fn new(options: BuildOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        Ok(Self {
            options,
            cancel: None,
        })
    }

    /// Attaches a cancellation flag, checked between sampling steps.
    ///
    /// When the flag is set, sampling stops early and the strips gathered
    /// so far are assembled; a build cancelled before its first strip fails
    /// with the empty-result error.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Returns the validated options this builder runs with.
    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .map(|flag| flag.load(Ordering::Relaxed))
            .unwrap_or(false)
    }

    /// Builds a barcode from `source`.
    ///
    /// The source is consumed and dropped when the build finishes, whether
    /// it succeeds or fails.
    pub fn build<S: VideoSource>(&self, mut source: S) -> Result<BuildOutput, BarcodeError> {
        let start = Instant::now();

        let fps = source.fps();
        let stride = self.options.resolve_stride(fps);
        let plan = SamplingPlan::new(stride, self.options.stop_fraction);
        let native_width = source.width();
        let native_height = source.height();

        tracing::info!(
            policy = %self.options.policy,
            stride,
            stop_fraction = self.options.stop_fraction,
            "creating movie barcode, this may take a few minutes"
        );

        let mut strips: Vec<Strip> = Vec::new();
        let mut sampler = FrameSampler::new(&mut source, plan);

        loop {
            if self.is_cancelled() {
                tracing::warn!(
                    strips = strips.len(),
                    "build cancelled, assembling partial barcode"
                );
                break;
            }
            let Some((_, frame)) = sampler.next() else {
                break;
            };
            strips.push(self.options.policy.reduce(&frame, self.options.bar_width));
        }

        let attempts = sampler.attempted();
        let frames_skipped = sampler.skipped();
        drop(sampler);

        let image = assemble(&strips, native_width, native_height)?;

        let stats = BuildStats {
            elapsed: start.elapsed(),
            frames_used: strips.len() as u64,
            frames_skipped,
            attempts,
            stride,
        };

        tracing::info!(
            elapsed_s = stats.elapsed.as_secs_f64(),
            frames_used = stats.frames_used,
            frames_skipped = stats.frames_skipped,
            "movie barcode assembled"
        );

        let persisted = if self.options.persist {
            Some(self.persist(&image))
        } else {
            None
        };

        Ok(BuildOutput {
            image,
            stats,
            persisted,
        })
    }

    fn persist(&self, image: &BarcodeImage) -> Result<PathBuf, PersistError> {
        let path = self.options.output_path();
        match image.save(&path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "movie barcode saved");
                Ok(path)
            }
            Err(source) => {
                tracing::warn!(path = %path.display(), %source, "failed to save movie barcode");
                Err(PersistError { path, source })
            }
        }
    }
}
