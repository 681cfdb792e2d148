//! Strip type representing one frame's contribution to the barcode.

/// A narrow image buffer produced from exactly one frame.
///
/// Width equals the configured bar width, height equals the native frame
/// height. Pixel bytes stay in the decoder's BGR order; the assembler
/// performs the single swap to RGB. Strips are ordered by the frame index
/// they were derived from.
#[derive(Clone)]
pub struct Strip {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    frame_index: u64,
}

impl Strip {
    /// Creates a strip from raw BGR pixel data.
    pub fn from_pixels(pixels: Vec<u8>, width: u32, height: u32, frame_index: u64) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize * 3);
        Self {
            pixels,
            width,
            height,
            frame_index,
        }
    }

    /// Creates a strip filled with one flat BGR color.
    pub fn flat(bgr: [u8; 3], width: u32, height: u32, frame_index: u64) -> Self {
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * 3);
        for _ in 0..count {
            pixels.extend_from_slice(&bgr);
        }
        Self {
            pixels,
            width,
            height,
            frame_index,
        }
    }

    /// Returns the raw BGR pixel data.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Returns the strip width (the bar width).
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the strip height (the native frame height).
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the index of the frame this strip was derived from.
    #[inline]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Returns the BGR bytes of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let offset = (y as usize * self.width as usize + x as usize) * 3;
        [
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
        ]
    }
}

impl std::fmt::Debug for Strip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Strip")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("frame_index", &self.frame_index)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_strip() {
        let strip = Strip::flat([5, 10, 15], 2, 3, 42);

        assert_eq!(strip.width(), 2);
        assert_eq!(strip.height(), 3);
        assert_eq!(strip.frame_index(), 42);
        assert_eq!(strip.pixels().len(), 2 * 3 * 3);
        assert_eq!(strip.pixel(1, 2), [5, 10, 15]);
    }
}
