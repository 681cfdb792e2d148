//! Immutable description of one sampling pass.

/// How a video's frame index space is walked.
///
/// Derived once per build from the user parameters. The stride is the frame
/// index increment between consecutive samples; the stop fraction bounds how
/// far into the video sampling goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingPlan {
    stride: u64,
    stop_fraction: f64,
}

impl SamplingPlan {
    /// Creates a plan from a stride and a stop fraction.
    ///
    /// A stride of zero is coerced to one so the sampler always advances.
    /// The stop fraction is expected to lie in `(0, 1]`; option validation
    /// rejects anything else before a plan is built.
    pub fn new(stride: u64, stop_fraction: f64) -> Self {
        Self {
            stride: stride.max(1),
            stop_fraction,
        }
    }

    /// Frame index increment between consecutive samples. Always >= 1.
    #[inline]
    pub fn stride(&self) -> u64 {
        self.stride
    }

    /// Fraction of the video's total frames to cover, in `(0, 1]`.
    #[inline]
    pub fn stop_fraction(&self) -> f64 {
        self.stop_fraction
    }

    /// Highest frame index sampling may attempt, inclusive.
    pub fn last_index(&self, frame_count: u64) -> u64 {
        (frame_count as f64 * self.stop_fraction) as u64
    }

    /// Number of sampling attempts for a video with `frame_count` frames,
    /// before accounting for decode skips.
    pub fn attempts(&self, frame_count: u64) -> u64 {
        self.last_index(frame_count) / self.stride + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_stride_coerced() {
        let plan = SamplingPlan::new(0, 1.0);
        assert_eq!(plan.stride(), 1);
    }

    #[test]
    fn test_half_stop_on_hundred_frames() {
        // Indices 0, 10, ..., 50: six attempts.
        let plan = SamplingPlan::new(10, 0.5);
        assert_eq!(plan.last_index(100), 50);
        assert_eq!(plan.attempts(100), 6);
    }

    #[test]
    fn test_full_stop_attempts_past_last_frame() {
        // stop = 1.0 makes the final attempt land on frame_count itself,
        // which is out of range and decode-fails. Attempts still count it.
        let plan = SamplingPlan::new(1, 1.0);
        assert_eq!(plan.attempts(10), 11);
    }
}
