//! RGB/YIQ color space conversion.
//!
//! The NTSC YIQ space separates brightness (Y) from chroma (I, Q), so the
//! histogram transforms can edit brightness without touching color.
//!
//! ## Supported Formats
//!
//! - **RGB (3 channels)**: full conversion
//! - **Grayscale (1 channel)**: accepted by [`luminance`] only, as a copy
//!
//! Values are f64 in 0.0-1.0. Neither conversion clamps its output: the two
//! directions must stay exact inverses of each other, so gamut clipping is
//! left to the transforms that re-enter RGB after editing Y.

use ndarray::{Array3, ArrayView3, Axis};
use rayon::prelude::*;

use super::error::{Result, TransformError};

/// NTSC RGB -> YIQ transform matrix (row-major).
const YIQ_FROM_RGB: [[f64; 3]; 3] = [
    [0.299, 0.587, 0.114],
    [0.596, -0.275, -0.321],
    [0.212, -0.523, 0.311],
];

/// Invert a 3x3 matrix by cofactor expansion.
fn invert_3x3(m: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let det = m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0]);
    let inv_det = 1.0 / det;

    [
        [
            (m[1][1] * m[2][2] - m[1][2] * m[2][1]) * inv_det,
            (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * inv_det,
            (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv_det,
        ],
        [
            (m[1][2] * m[2][0] - m[1][0] * m[2][2]) * inv_det,
            (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv_det,
            (m[0][2] * m[1][0] - m[0][0] * m[1][2]) * inv_det,
        ],
        [
            (m[1][0] * m[2][1] - m[1][1] * m[2][0]) * inv_det,
            (m[0][1] * m[2][0] - m[0][0] * m[2][1]) * inv_det,
            (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * inv_det,
        ],
    ]
}

#[inline]
fn mul_pixel(m: &[[f64; 3]; 3], a: f64, b: f64, c: f64) -> (f64, f64, f64) {
    (
        m[0][0] * a + m[0][1] * b + m[0][2] * c,
        m[1][0] * a + m[1][1] * b + m[1][2] * c,
        m[2][0] * a + m[2][1] * b + m[2][2] * c,
    )
}

/// Apply a 3x3 linear map to every pixel of a 3-channel image.
fn apply_matrix(input: ArrayView3<f64>, m: &[[f64; 3]; 3]) -> Result<Array3<f64>> {
    let (_, _, channels) = input.dim();
    if channels != 3 {
        return Err(TransformError::InvalidShape {
            expected: "3",
            got: channels,
        });
    }

    let mut out = input.to_owned();
    match out.as_slice_mut() {
        // Contiguous pixel rows: map chunks of 3 in parallel
        Some(buf) => buf.par_chunks_mut(3).for_each(|px| {
            let (a, b, c) = mul_pixel(m, px[0], px[1], px[2]);
            px[0] = a;
            px[1] = b;
            px[2] = c;
        }),
        // Non-standard layout after to_owned (Fortran-order inputs)
        None => {
            for mut px in out.lanes_mut(Axis(2)) {
                let (a, b, c) = mul_pixel(m, px[0], px[1], px[2]);
                px[0] = a;
                px[1] = b;
                px[2] = c;
            }
        }
    }
    Ok(out)
}

/// Convert an RGB image to YIQ.
///
/// # Arguments
/// * `input` - RGB image of shape (height, width, 3), values 0.0-1.0
///
/// # Returns
/// YIQ image of the same shape; Y lies in 0.0-1.0, I and Q are signed
pub fn rgb_to_yiq(input: ArrayView3<f64>) -> Result<Array3<f64>> {
    apply_matrix(input, &YIQ_FROM_RGB)
}

/// Convert a YIQ image back to RGB.
///
/// Applies the exact matrix inverse of [`rgb_to_yiq`]; the round trip
/// reproduces the input to within 1e-9 per element.
///
/// # Arguments
/// * `input` - YIQ image of shape (height, width, 3)
///
/// # Returns
/// RGB image of the same shape, unclamped
pub fn yiq_to_rgb(input: ArrayView3<f64>) -> Result<Array3<f64>> {
    apply_matrix(input, &invert_3x3(&YIQ_FROM_RGB))
}

/// Extract the luma (Y) channel of an image.
///
/// RGB input yields the Y row of the YIQ transform; grayscale input passes
/// through as a copy.
///
/// # Arguments
/// * `input` - Image with 1 or 3 channels (height, width, channels)
///
/// # Returns
/// Single-channel image of shape (height, width, 1), values 0.0-1.0
pub fn luminance(input: ArrayView3<f64>) -> Result<Array3<f64>> {
    let (height, width, channels) = input.dim();
    match channels {
        1 => Ok(input.to_owned()),
        3 => {
            let y_row = &YIQ_FROM_RGB[0];
            let mut out = Array3::<f64>::zeros((height, width, 1));
            for y in 0..height {
                for x in 0..width {
                    out[[y, x, 0]] = y_row[0] * input[[y, x, 0]]
                        + y_row[1] * input[[y, x, 1]]
                        + y_row[2] * input[[y, x, 2]];
                }
            }
            Ok(out)
        }
        _ => Err(TransformError::InvalidShape {
            expected: "1 or 3",
            got: channels,
        }),
    }
}
