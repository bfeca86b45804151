//! Bit-depth conversion between 8-bit rasters and the float working format.
//!
//! The transforms operate on f64 values in 0.0-1.0; display and storage
//! collaborators usually hand over 8-bit buffers. These helpers bridge the
//! two at the binding boundary.

use ndarray::{Array3, ArrayView3};

/// Convert a u8 image (0-255) to f64 (0.0-1.0)
pub fn u8_to_f64(input: ArrayView3<u8>) -> Array3<f64> {
    input.mapv(|v| v as f64 / 255.0)
}

/// Convert an f64 image (0.0-1.0) to u8 (0-255)
pub fn f64_to_u8(input: ArrayView3<f64>) -> Array3<u8> {
    input.mapv(|v| (v.clamp(0.0, 1.0) * 255.0) as u8)
}
