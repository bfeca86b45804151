//! Global histogram equalization.
//!
//! Remaps intensities through the normalized cumulative histogram so the
//! value distribution spreads across the full 0.0-1.0 range.
//!
//! ## Supported Formats
//!
//! - **Grayscale (1 channel)**: equalized directly
//! - **RGB (3 channels)**: equalized on the luma channel in YIQ space,
//!   chroma untouched, converted back and clamped to 0.0-1.0
//!
//! Equalizing twice is not guaranteed to be a no-op; a second pass only
//! leaves the image alone when the cumulative histogram is already linear.

use ndarray::{Array3, ArrayView3};

use super::color_space;
use super::error::{Result, TransformError};
use super::histogram::{self, LEVELS};

/// Equalize an image's intensity histogram.
///
/// A flat image (single populated level) has no contrast to stretch and is
/// returned unchanged; an empty image is rejected.
///
/// # Arguments
/// * `input` - Image with 1 or 3 channels (height, width, channels), values 0.0-1.0
///
/// # Returns
/// Image of the same shape with its luma/gray values stretched over 0.0-1.0
///
/// # Errors
/// * [`TransformError::InvalidShape`] - channel count is not 1 or 3
/// * [`TransformError::DegenerateInput`] - empty image
pub fn equalize(input: ArrayView3<f64>) -> Result<Array3<f64>> {
    let channels = input.dim().2;
    if channels != 1 && channels != 3 {
        return Err(TransformError::InvalidShape {
            expected: "1 or 3",
            got: channels,
        });
    }

    let hist = histogram::build(input)?;
    let cum = histogram::cumulative(&hist);
    let table = match histogram::normalize(&cum) {
        Ok(table) => table,
        // Single populated level: nothing to stretch
        Err(TransformError::DegenerateInput) if cum[LEVELS - 1] > 0 => {
            return Ok(input.to_owned());
        }
        Err(e) => return Err(e),
    };

    let mut lut = [0f64; LEVELS];
    for (out, &level) in lut.iter_mut().zip(table.iter()) {
        *out = level as f64 / 255.0;
    }

    match channels {
        1 => {
            let mut out = input.to_owned();
            histogram::map_levels(&mut out, &lut);
            Ok(out)
        }
        _ => {
            let mut yiq = color_space::rgb_to_yiq(input)?;
            histogram::map_levels(&mut yiq, &lut);
            let mut rgb = color_space::yiq_to_rgb(yiq.view())?;
            // Editing Y can push the reconstruction slightly out of gamut
            rgb.mapv_inplace(|v| v.clamp(0.0, 1.0));
            Ok(rgb)
        }
    }
}
