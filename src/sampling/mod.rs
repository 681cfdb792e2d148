//! Frame sampling.
//!
//! This module decides which frame indices of a video are read. A
//! [`SamplingPlan`] fixes the stride and the stop fraction once per build;
//! the [`FrameSampler`] walks the index space lazily, seeking the source
//! for every sampled index and silently skipping frames that fail to
//! decode.

mod plan;
mod sampler;

pub use plan::SamplingPlan;
pub use sampler::FrameSampler;
