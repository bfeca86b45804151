//! Gradient-magnitude edge extraction.
//!
//! Horizontal and vertical first derivatives come from the centered
//! difference kernel [0.5, 0, -0.5] and its transpose, sampled with
//! clamp-to-edge padding so a uniform border produces no response. The
//! per-pixel gradient magnitude is binarized at a fixed threshold.
//!
//! ## Supported Formats
//!
//! - **Grayscale (1 channel)** only; callers extract luma first for RGB

use ndarray::{Array3, ArrayView3};

use super::error::{Result, TransformError};

/// Gradient magnitudes above this count as edges. Fixed design constant,
/// not user-configurable.
const EDGE_THRESHOLD: f64 = 0.03;

/// Detect edges in a grayscale image.
///
/// # Arguments
/// * `input` - Grayscale image of shape (height, width, 1), values 0.0-1.0
///
/// # Returns
/// Binary mask of the same shape: 1.0 where the gradient magnitude exceeds
/// the threshold, 0.0 elsewhere
///
/// # Errors
/// [`TransformError::InvalidShape`] unless the image has exactly 1 channel.
pub fn edges(input: ArrayView3<f64>) -> Result<Array3<f64>> {
    let (height, width, channels) = input.dim();
    if channels != 1 {
        return Err(TransformError::InvalidShape {
            expected: "1",
            got: channels,
        });
    }

    let mut out = Array3::<f64>::zeros((height, width, 1));
    for y in 0..height {
        let up = y.saturating_sub(1);
        let down = (y + 1).min(height - 1);
        for x in 0..width {
            let left = x.saturating_sub(1);
            let right = (x + 1).min(width - 1);

            let dx = 0.5 * (input[[y, right, 0]] - input[[y, left, 0]]);
            let dy = 0.5 * (input[[down, x, 0]] - input[[up, x, 0]]);
            let magnitude = (dx * dx + dy * dy).sqrt();

            out[[y, x, 0]] = if magnitude > EDGE_THRESHOLD { 1.0 } else { 0.0 };
        }
    }
    Ok(out)
}

/// Render a sketch: edge mask inverted to black strokes on white.
///
/// # Arguments
/// * `input` - Grayscale image of shape (height, width, 1), values 0.0-1.0
///
/// # Returns
/// Image of the same shape with 0.0 at edges and 1.0 elsewhere
pub fn sketch(input: ArrayView3<f64>) -> Result<Array3<f64>> {
    let mut mask = edges(input)?;
    mask.mapv_inplace(|v| 1.0 - v);
    Ok(mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_image_has_no_edges() {
        let img = Array3::<f64>::from_elem((5, 5, 1), 0.5);
        let result = edges(img.view()).unwrap();
        assert!(result.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_vertical_step_marks_only_step_columns() {
        // Left half 0, right half 1, step between columns 2 and 3
        let mut img = Array3::<f64>::zeros((6, 6, 1));
        for y in 0..6 {
            for x in 3..6 {
                img[[y, x, 0]] = 1.0;
            }
        }

        let result = edges(img.view()).unwrap();
        for y in 0..6 {
            for x in 0..6 {
                let expected = if x == 2 || x == 3 { 1.0 } else { 0.0 };
                assert_eq!(result[[y, x, 0]], expected, "pixel ({y}, {x})");
            }
        }
    }

    #[test]
    fn test_horizontal_step_marks_only_step_rows() {
        let mut img = Array3::<f64>::zeros((6, 4, 1));
        for y in 3..6 {
            for x in 0..4 {
                img[[y, x, 0]] = 1.0;
            }
        }

        let result = edges(img.view()).unwrap();
        for y in 0..6 {
            for x in 0..4 {
                let expected = if y == 2 || y == 3 { 1.0 } else { 0.0 };
                assert_eq!(result[[y, x, 0]], expected, "pixel ({y}, {x})");
            }
        }
    }

    #[test]
    fn test_gentle_slope_stays_below_threshold() {
        // Neighbor difference of 0.01 gives a gradient magnitude of 0.01
        let mut img = Array3::<f64>::zeros((1, 8, 1));
        for x in 0..8 {
            img[[0, x, 0]] = x as f64 * 0.01;
        }

        let result = edges(img.view()).unwrap();
        assert!(result.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_single_pixel_image() {
        let img = Array3::<f64>::from_elem((1, 1, 1), 1.0);
        let result = edges(img.view()).unwrap();
        assert_eq!(result[[0, 0, 0]], 0.0);
    }

    #[test]
    fn test_sketch_inverts_mask() {
        let mut img = Array3::<f64>::zeros((4, 4, 1));
        for y in 0..4 {
            for x in 2..4 {
                img[[y, x, 0]] = 1.0;
            }
        }

        let mask = edges(img.view()).unwrap();
        let inverted = sketch(img.view()).unwrap();
        for (m, s) in mask.iter().zip(inverted.iter()) {
            assert_eq!(*s, 1.0 - *m);
        }
    }

    #[test]
    fn test_rejects_rgb_input() {
        let img = Array3::<f64>::zeros((2, 2, 3));
        assert!(matches!(
            edges(img.view()),
            Err(TransformError::InvalidShape { got: 3, .. })
        ));
    }
}
