//! Strip reduction policies.
//!
//! The two policies form a small closed set selected once per build.
//! `Squeeze` keeps the frame's vertical color variation by resizing the
//! whole frame to the bar width; `Average` collapses the frame to its
//! root-mean-square color. RMS rather than the arithmetic mean weights
//! bright and saturated regions more heavily.

use super::Strip;
use crate::source::Frame;
use image::imageops::{self, FilterType};
use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a policy name is not recognized.
#[derive(Debug, Clone, Error)]
#[error("unknown bar policy '{0}' (expected 'squeeze' or 'average')")]
pub struct UnknownPolicy(pub String);

/// Strategy for reducing one frame to one strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarPolicy {
    /// Resize the frame to the bar width, keeping vertical color detail.
    Squeeze,
    /// Fill the strip with the frame's per-channel RMS color.
    Average,
}

impl BarPolicy {
    /// Short lowercase name, used in log output and persisted filenames.
    pub fn name(&self) -> &'static str {
        match self {
            BarPolicy::Squeeze => "squeeze",
            BarPolicy::Average => "average",
        }
    }

    /// Reduces one frame to one strip of `bar_width` pixels.
    ///
    /// The strip keeps the frame's height and channel order; both policies
    /// produce identically shaped strips for a given frame.
    pub fn reduce(&self, frame: &Frame, bar_width: u32) -> Strip {
        match self {
            BarPolicy::Squeeze => squeeze(frame, bar_width),
            BarPolicy::Average => average(frame, bar_width),
        }
    }
}

impl std::fmt::Display for BarPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BarPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "squeeze" => Ok(BarPolicy::Squeeze),
            "average" => Ok(BarPolicy::Average),
            other => Err(UnknownPolicy(other.to_string())),
        }
    }
}

/// Resizes the frame to exactly `(bar_width, height)` with bilinear
/// filtering.
fn squeeze(frame: &Frame, bar_width: u32) -> Strip {
    // The image buffer is nominally RGB but carries the decoder's BGR
    // bytes; resizing is channel-agnostic, so the order survives intact.
    let image = match RgbImage::from_raw(frame.width(), frame.height(), frame.pixels().to_vec()) {
        Some(image) => image,
        None => return Strip::flat([0, 0, 0], bar_width, frame.height(), frame.index()),
    };

    let resized = imageops::resize(&image, bar_width, frame.height(), FilterType::Triangle);
    Strip::from_pixels(
        resized.into_raw(),
        bar_width,
        frame.height(),
        frame.index(),
    )
}

/// Collapses the frame to its per-channel RMS color.
///
/// channel = trunc(sqrt(mean(channel^2))) over all pixels.
fn average(frame: &Frame, bar_width: u32) -> Strip {
    let count = frame.pixel_count();
    if count == 0 {
        return Strip::flat([0, 0, 0], bar_width, frame.height(), frame.index());
    }

    let mut sums = [0.0f64; 3];
    for pixel in frame.pixels().chunks_exact(3) {
        for (sum, &value) in sums.iter_mut().zip(pixel) {
            *sum += (value as f64) * (value as f64);
        }
    }

    let n = count as f64;
    let color = [
        (sums[0] / n).sqrt() as u8,
        (sums[1] / n).sqrt() as u8,
        (sums[2] / n).sqrt() as u8,
    ];

    Strip::flat(color, bar_width, frame.height(), frame.index())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn frame_from_pixels(pixels: Vec<u8>, width: u32, height: u32) -> Frame {
        Frame::new(pixels, width, height, 0)
    }

    #[test]
    fn test_parse_policy_names() {
        assert_eq!("squeeze".parse::<BarPolicy>().unwrap(), BarPolicy::Squeeze);
        assert_eq!("AVERAGE".parse::<BarPolicy>().unwrap(), BarPolicy::Average);
        assert!("mosaic".parse::<BarPolicy>().is_err());
    }

    #[test]
    fn test_squeeze_strip_dimensions() {
        let frame = frame_from_pixels(vec![128; 64 * 48 * 3], 64, 48);

        for bar_width in [1, 3, 10] {
            let strip = BarPolicy::Squeeze.reduce(&frame, bar_width);
            assert_eq!(strip.width(), bar_width);
            assert_eq!(strip.height(), 48);
        }
    }

    #[test]
    fn test_squeeze_keeps_vertical_detail() {
        // Top half one color, bottom half another; the squeezed strip must
        // keep the split while the averaged strip flattens it.
        let width = 8u32;
        let height = 8u32;
        let mut pixels = Vec::new();
        for y in 0..height {
            let color = if y < height / 2 { [200, 0, 0] } else { [0, 0, 200] };
            for _ in 0..width {
                pixels.extend_from_slice(&color);
            }
        }
        let frame = frame_from_pixels(pixels, width, height);

        let strip = BarPolicy::Squeeze.reduce(&frame, 1);
        assert_eq!(strip.pixel(0, 0), [200, 0, 0]);
        assert_eq!(strip.pixel(0, height - 1), [0, 0, 200]);
    }

    #[test]
    fn test_average_is_rms_not_mean() {
        // Half the pixels 0, half 200: mean = 100 but RMS = sqrt(20000) ~ 141.
        let mut pixels = Vec::new();
        for i in 0..4 {
            let v = if i < 2 { 0 } else { 200 };
            pixels.extend_from_slice(&[v, v, v]);
        }
        let frame = frame_from_pixels(pixels, 2, 2);

        let strip = BarPolicy::Average.reduce(&frame, 1);
        assert_eq!(strip.pixel(0, 0), [141, 141, 141]);
    }

    #[test]
    fn test_average_solid_color_is_identity() {
        let mut pixels = Vec::new();
        for _ in 0..9 {
            pixels.extend_from_slice(&[10, 20, 250]);
        }
        let frame = frame_from_pixels(pixels, 3, 3);

        let strip = BarPolicy::Average.reduce(&frame, 2);
        assert_eq!(strip.width(), 2);
        assert_eq!(strip.height(), 3);
        assert_eq!(strip.pixel(1, 2), [10, 20, 250]);
    }

    proptest! {
        #[test]
        fn prop_average_invariant_under_pixel_permutation(
            pixels in proptest::collection::vec(0u8..=255, 3..=300)
        ) {
            // Truncate to whole BGR triples and lay them out as one row.
            let count = (pixels.len() / 3).max(1);
            let pixels = pixels[..count * 3].to_vec();

            let mut permuted: Vec<[u8; 3]> = pixels
                .chunks_exact(3)
                .map(|p| [p[0], p[1], p[2]])
                .collect();
            permuted.reverse();
            permuted.rotate_left(count / 3);
            let permuted: Vec<u8> = permuted.into_iter().flatten().collect();

            let a = frame_from_pixels(pixels, count as u32, 1);
            let b = frame_from_pixels(permuted, count as u32, 1);

            let strip_a = BarPolicy::Average.reduce(&a, 1);
            let strip_b = BarPolicy::Average.reduce(&b, 1);
            prop_assert_eq!(strip_a.pixel(0, 0), strip_b.pixel(0, 0));
        }
    }
}
