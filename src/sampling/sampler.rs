//! Lazy iterator over sampled frames.

use super::SamplingPlan;
use crate::source::{Frame, VideoSource};

/// Iterates a video's frame index space according to a [`SamplingPlan`].
///
/// Starts at index 0 and advances by the plan's stride after every attempt,
/// stopping once the index exceeds `frame_count * stop_fraction` (truncated).
/// Each attempt seeks the source, so the source's read cursor is repositioned
/// on every step. An index that fails to decode is skipped and the iterator
/// moves on to the next stride-advanced index; skips are counted but never
/// surfaced as errors.
pub struct FrameSampler<'a, S: VideoSource + ?Sized> {
    source: &'a mut S,
    plan: SamplingPlan,
    next_index: u64,
    last_index: u64,
    attempted: u64,
    skipped: u64,
}

impl<'a, S: VideoSource + ?Sized> FrameSampler<'a, S> {
    /// Creates a sampler over `source` following `plan`.
    pub fn new(source: &'a mut S, plan: SamplingPlan) -> Self {
        let last_index = plan.last_index(source.frame_count());
        Self {
            source,
            plan,
            next_index: 0,
            last_index,
            attempted: 0,
            skipped: 0,
        }
    }

    /// Number of indices attempted so far (decoded or skipped).
    pub fn attempted(&self) -> u64 {
        self.attempted
    }

    /// Number of attempted indices that failed to decode.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}

impl<S: VideoSource + ?Sized> Iterator for FrameSampler<'_, S> {
    type Item = (u64, Frame);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.next_index > self.last_index {
                return None;
            }

            let index = self.next_index;
            self.next_index += self.plan.stride();
            self.attempted += 1;

            match self.source.read_frame(index) {
                Ok(frame) => return Some((index, frame)),
                Err(err) => {
                    self.skipped += 1;
                    tracing::debug!(index, %err, "skipping undecodable frame");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MockVideo;
    use proptest::prelude::*;

    #[test]
    fn test_indices_follow_stride() {
        let mut video = MockVideo::solid(2, 2, 100, [1, 2, 3]);
        let plan = SamplingPlan::new(10, 0.5);

        let indices: Vec<u64> = FrameSampler::new(&mut video, plan)
            .map(|(i, _)| i)
            .collect();

        assert_eq!(indices, vec![0, 10, 20, 30, 40, 50]);
    }

    #[test]
    fn test_failed_frames_are_skipped() {
        let colors = vec![
            Some([0, 0, 1]),
            None,
            Some([0, 0, 2]),
            None,
            Some([0, 0, 3]),
        ];
        let mut video = MockVideo::from_colors(2, 2, colors);
        let plan = SamplingPlan::new(1, 0.8); // last index = 4

        let mut sampler = FrameSampler::new(&mut video, plan);
        let indices: Vec<u64> = sampler.by_ref().map(|(i, _)| i).collect();

        assert_eq!(indices, vec![0, 2, 4]);
        assert_eq!(sampler.attempted(), 5);
        assert_eq!(sampler.skipped(), 2);
    }

    #[test]
    fn test_empty_video_yields_nothing() {
        let mut video = MockVideo::solid(2, 2, 0, [0, 0, 0]);
        let plan = SamplingPlan::new(1, 1.0);

        let mut sampler = FrameSampler::new(&mut video, plan);
        assert!(sampler.next().is_none());
        // Index 0 is still attempted (and fails) before stopping.
        assert_eq!(sampler.attempted(), 1);
        assert_eq!(sampler.skipped(), 1);
    }

    proptest! {
        #[test]
        fn prop_attempt_count_matches_plan(
            frame_count in 0u64..400,
            stride in 1u64..50,
            stop_fraction in 0.01f64..=1.0,
        ) {
            let mut video = MockVideo::solid(2, 2, frame_count as usize, [9, 9, 9]);
            let plan = SamplingPlan::new(stride, stop_fraction);

            let mut sampler = FrameSampler::new(&mut video, plan);
            let indices: Vec<u64> = sampler.by_ref().map(|(i, _)| i).collect();

            prop_assert_eq!(sampler.attempted(), plan.attempts(frame_count));

            // Yielded indices are ascending multiples of the stride within bounds.
            for (n, &index) in indices.iter().enumerate() {
                prop_assert_eq!(index % stride, 0);
                prop_assert!(index <= plan.last_index(frame_count));
                prop_assert!(index < frame_count);
                if n > 0 {
                    prop_assert!(index > indices[n - 1]);
                }
            }
        }
    }
}
