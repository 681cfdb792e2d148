//! The finished barcode image.

use image::RgbImage;
use std::path::Path;

/// The composite barcode image, in display (RGB) channel order.
///
/// This is the sole artifact a build produces; it is immutable once
/// assembled and always has the source video's native dimensions.
#[derive(Clone)]
pub struct BarcodeImage {
    inner: RgbImage,
}

impl BarcodeImage {
    pub(crate) fn new(inner: RgbImage) -> Self {
        Self { inner }
    }

    /// Image width in pixels (the video's native width).
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Image height in pixels (the video's native height).
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Borrows the underlying pixel buffer.
    pub fn as_rgb(&self) -> &RgbImage {
        &self.inner
    }

    /// Consumes the barcode, returning the underlying pixel buffer.
    pub fn into_rgb(self) -> RgbImage {
        self.inner
    }

    /// Writes the image to `path`; the format is inferred from the
    /// extension (builds persist as PNG).
    pub fn save(&self, path: impl AsRef<Path>) -> image::ImageResult<()> {
        self.inner.save(path)
    }
}

impl std::fmt::Debug for BarcodeImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BarcodeImage")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}
