//! Barcode build orchestration.
//!
//! This module owns parameter resolution and drives the pipeline:
//! sampling, strip reduction, assembly, and optional persistence of the
//! finished image.

mod builder;
mod options;

pub use builder::{BarcodeBuilder, BarcodeError, BuildOutput, BuildStats, PersistError};
pub use options::{BuildOptions, ConfigError, FileConfig};
