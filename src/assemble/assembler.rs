//! Strip concatenation and final orientation/resize pass.

use super::BarcodeImage;
use crate::reduce::Strip;
use image::imageops::{self, FilterType};
use image::RgbImage;
use thiserror::Error;

/// Errors that can occur during barcode assembly.
#[derive(Debug, Clone, Error)]
pub enum AssembleError {
    /// Zero frames were successfully sampled; there is nothing to show.
    #[error("no frames were sampled, cannot assemble a barcode")]
    EmptyStripSequence,
    /// A strip's dimensions differ from the first strip's.
    #[error("strip dimensions differ: expected {expected_width}x{expected_height}, got {width}x{height}")]
    MismatchedStrip {
        /// Width of the first strip.
        expected_width: u32,
        /// Height of the first strip.
        expected_height: u32,
        /// Width of the offending strip.
        width: u32,
        /// Height of the offending strip.
        height: u32,
    },
}

/// Concatenates the ordered strips into the final barcode image.
///
/// The strips are laid out left to right in the order given (callers supply
/// them in ascending frame index order), the BGR bytes are swapped to RGB
/// while the composite is filled, and the result is resized to exactly
/// `(native_width, native_height)`.
pub fn assemble(
    strips: &[Strip],
    native_width: u32,
    native_height: u32,
) -> Result<BarcodeImage, AssembleError> {
    let first = strips.first().ok_or(AssembleError::EmptyStripSequence)?;
    let bar_width = first.width();
    let strip_height = first.height();

    for strip in strips {
        if strip.width() != bar_width || strip.height() != strip_height {
            return Err(AssembleError::MismatchedStrip {
                expected_width: bar_width,
                expected_height: strip_height,
                width: strip.width(),
                height: strip.height(),
            });
        }
    }

    let composite_width = bar_width * strips.len() as u32;
    let mut composite = RgbImage::new(composite_width, strip_height);

    for (slot, strip) in strips.iter().enumerate() {
        let x_offset = slot as u32 * bar_width;
        for y in 0..strip_height {
            for x in 0..bar_width {
                let [b, g, r] = strip.pixel(x, y);
                composite.put_pixel(x_offset + x, y, image::Rgb([r, g, b]));
            }
        }
    }

    let resized = if composite.dimensions() == (native_width, native_height) {
        composite
    } else {
        imageops::resize(&composite, native_width, native_height, FilterType::Triangle)
    };

    Ok(BarcodeImage::new(resized))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sequence_is_an_error() {
        assert!(matches!(
            assemble(&[], 100, 100),
            Err(AssembleError::EmptyStripSequence)
        ));
    }

    #[test]
    fn test_mismatched_strips_are_rejected() {
        let strips = vec![
            Strip::flat([0, 0, 0], 1, 10, 0),
            Strip::flat([0, 0, 0], 1, 12, 1),
        ];
        assert!(matches!(
            assemble(&strips, 100, 100),
            Err(AssembleError::MismatchedStrip { .. })
        ));
    }

    #[test]
    fn test_output_has_native_dimensions() {
        let strips: Vec<Strip> = (0..7)
            .map(|i| Strip::flat([i as u8, 0, 0], 3, 20, i))
            .collect();

        let barcode = assemble(&strips, 640, 480).unwrap();
        assert_eq!(barcode.width(), 640);
        assert_eq!(barcode.height(), 480);
    }

    #[test]
    fn test_channel_order_is_swapped_once() {
        // A BGR-red strip must come out as RGB red.
        let strips = vec![Strip::flat([0, 0, 255], 2, 2, 0)];

        let barcode = assemble(&strips, 2, 2).unwrap();
        for pixel in barcode.as_rgb().pixels() {
            assert_eq!(pixel.0, [255, 0, 0]);
        }
    }

    #[test]
    fn test_strips_keep_sampling_order() {
        // Two flat strips, blue then green (BGR), native size equal to the
        // composite so no resampling blurs the boundary.
        let strips = vec![
            Strip::flat([255, 0, 0], 1, 2, 0),
            Strip::flat([0, 255, 0], 1, 2, 10),
        ];

        let barcode = assemble(&strips, 2, 2).unwrap();
        let rgb = barcode.as_rgb();
        assert_eq!(rgb.get_pixel(0, 0).0, [0, 0, 255]); // left: blue
        assert_eq!(rgb.get_pixel(1, 0).0, [0, 255, 0]); // right: green
    }
}
