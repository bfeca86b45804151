//! Intensity histograms over the luma/gray channel.
//!
//! The histogram-based transforms (quantization, equalization) all start
//! from the same 256-bin tally of the working channel: the luma channel for
//! RGB images, the single channel for grayscale. This module owns that
//! tally, its running sum, and the normalized stretch table derived from it,
//! plus the shared level-mapping step that pushes a 256-entry lookup table
//! back through an image.

use ndarray::{Array3, ArrayView3, Axis};
use rayon::prelude::*;

use super::color_space;
use super::error::{Result, TransformError};

/// Number of discrete intensity levels.
pub const LEVELS: usize = 256;

/// Intensity level of a [0,1] value, rounding ties to even.
#[inline]
pub(crate) fn level_of(v: f64) -> usize {
    (v * 255.0).round_ties_even().clamp(0.0, 255.0) as usize
}

/// Build the intensity histogram of an image.
///
/// RGB images are tallied over their luma (Y) channel, grayscale images
/// over their single channel.
///
/// # Arguments
/// * `input` - Image with 1 or 3 channels (height, width, channels), values 0.0-1.0
///
/// # Returns
/// 256 per-level counts summing to the channel's pixel count
pub fn build(input: ArrayView3<f64>) -> Result<[u32; LEVELS]> {
    let gray = color_space::luminance(input)?;

    let mut hist = [0u32; LEVELS];
    for &v in gray.iter() {
        hist[level_of(v)] += 1;
    }
    Ok(hist)
}

/// Running sum of a histogram.
///
/// The result is non-decreasing and its last entry equals the total pixel
/// count.
pub fn cumulative(hist: &[u32; LEVELS]) -> [u32; LEVELS] {
    let mut cum = [0u32; LEVELS];
    let mut sum = 0u32;
    for (out, &count) in cum.iter_mut().zip(hist.iter()) {
        sum += count;
        *out = sum;
    }
    cum
}

/// Normalize a cumulative histogram into a 256-entry stretch table.
///
/// Each cumulative count `c` maps to `round((c - c_min) * 255 / (c_max -
/// c_min))` where `c_min` is the smallest strictly positive cumulative count
/// and `c_max` the total. Anchoring at `c_min` ignores leading zero-count
/// levels that would otherwise compress the stretch; those levels receive a
/// clamped placeholder and are never looked up.
///
/// # Arguments
/// * `cum` - Cumulative histogram from [`cumulative`]
///
/// # Returns
/// Output level per input level, spanning 0-255
///
/// # Errors
/// [`TransformError::DegenerateInput`] when the histogram is empty or has a
/// single populated level (zero variance), leaving the stretch undefined.
pub fn normalize(cum: &[u32; LEVELS]) -> Result<[u8; LEVELS]> {
    let c_max = cum[LEVELS - 1];
    let c_min = match cum.iter().find(|&&c| c > 0) {
        Some(&c) => c,
        None => return Err(TransformError::DegenerateInput),
    };
    if c_max == c_min {
        return Err(TransformError::DegenerateInput);
    }

    let span = (c_max - c_min) as f64;
    let mut table = [0u8; LEVELS];
    for (out, &c) in table.iter_mut().zip(cum.iter()) {
        let stretched = ((c as f64 - c_min as f64) * 255.0 / span).round_ties_even();
        *out = stretched.clamp(0.0, 255.0) as u8;
    }
    Ok(table)
}

/// Map the working channel of an image through a 256-entry value table.
///
/// Element 0 of every pixel is replaced by `lut[level]` of its current
/// value; remaining channels (chroma, for YIQ images) are untouched.
pub(crate) fn map_levels(image: &mut Array3<f64>, lut: &[f64; LEVELS]) {
    let channels = image.dim().2;
    match image.as_slice_mut() {
        Some(buf) => buf
            .par_chunks_mut(channels)
            .for_each(|px| px[0] = lut[level_of(px[0])]),
        None => {
            for mut px in image.lanes_mut(Axis(2)) {
                px[0] = lut[level_of(px[0])];
            }
        }
    }
}
