//! Barcode assembly.
//!
//! This module folds the ordered strip sequence into the final image:
//! strips are concatenated left to right in ascending frame index order,
//! the decoder's BGR channel order is swapped to RGB exactly once, and the
//! composite is resized to the video's native dimensions.

mod assembler;
mod barcode;

pub use assembler::{assemble, AssembleError};
pub use barcode::BarcodeImage;
