//! Frame type representing one decoded video frame.

/// A single decoded frame.
///
/// Pixel data is row-major, three bytes per pixel, in the decoder's native
/// BGR channel order. The swap to display (RGB) order happens exactly once,
/// in the assembler, so frames and strips stay byte-compatible with what the
/// decoder produced.
#[derive(Clone)]
pub struct Frame {
    /// Raw pixel data (BGR, row-major).
    pixels: Vec<u8>,
    /// Frame width in pixels.
    width: u32,
    /// Frame height in pixels.
    height: u32,
    /// Absolute frame index within the source.
    index: u64,
}

impl Frame {
    /// Creates a new frame with the given parameters.
    pub fn new(pixels: Vec<u8>, width: u32, height: u32, index: u64) -> Self {
        Self {
            pixels,
            width,
            height,
            index,
        }
    }

    /// Returns a reference to the raw pixel data.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Returns the frame width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the frame height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the absolute frame index this frame was decoded from.
    #[inline]
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Returns the total number of pixels (width * height).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Validates that the pixel buffer size matches the dimensions.
    pub fn is_valid(&self) -> bool {
        self.pixels.len() == self.pixel_count() * 3
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("index", &self.index)
            .field("pixel_bytes", &self.pixels.len())
            .finish()
    }
}
