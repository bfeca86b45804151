//! Optimal intensity quantization (Lloyd-Max).
//!
//! Reduces the luma/gray channel of an image to at most `n_quant` distinct
//! values by alternating two optimality conditions over the intensity
//! histogram: given partition boundaries, each interval's best representative
//! is its histogram-weighted mean; given representatives, each interior
//! boundary's best position is the midpoint between neighbors. The loop
//! stops at a bit-exact boundary fixed point or after `n_iter` rounds,
//! whichever comes first.
//!
//! ## Supported Formats
//!
//! - **Grayscale (1 channel)**: quantized directly
//! - **RGB (3 channels)**: quantized on the luma channel in YIQ space,
//!   chroma untouched, converted back and clamped to 0.0-1.0

use ndarray::{Array3, ArrayView3};

use super::color_space;
use super::error::{Result, TransformError};
use super::histogram::{self, LEVELS};

/// Partition boundaries for the initial equal-mass split.
///
/// Boundary k is the smallest level whose cumulative probability reaches
/// k/n_quant; the outer boundaries are pinned to -1 and 255 so the
/// half-open intervals (z[i], z[i+1]] cover every level exactly once.
fn initial_boundaries(cum: &[u32; LEVELS], total: u64, n_quant: usize) -> Vec<i32> {
    let mut z = Vec::with_capacity(n_quant + 1);
    z.push(-1);
    for k in 1..n_quant {
        let quantile = k as f64 / n_quant as f64;
        let level = cum
            .iter()
            .position(|&c| c as f64 / total as f64 >= quantile)
            .unwrap_or(LEVELS - 1);
        z.push(level as i32);
    }
    z.push(255);
    z
}

/// Recompute every interval's representative as its histogram-weighted mean.
///
/// An interval that holds no pixels inherits the representative of the
/// interval below it. The first interval always contains the lowest
/// populated level, so inheritance is total for non-empty histograms; an
/// empty first interval is reported rather than divided by zero.
fn representatives(hist: &[u32; LEVELS], z: &[i32], q: &mut [f64]) -> Result<()> {
    for i in 0..q.len() {
        let lo = (z[i] + 1).max(0) as usize;
        let hi = z[i + 1];

        let mut weighted = 0u64;
        let mut count = 0u64;
        if hi >= lo as i32 {
            for (level, &c) in hist.iter().enumerate().take(hi as usize + 1).skip(lo) {
                weighted += level as u64 * c as u64;
                count += c as u64;
            }
        }

        if count == 0 {
            if i == 0 {
                return Err(TransformError::NumericDivergence);
            }
            q[i] = q[i - 1];
        } else {
            q[i] = weighted as f64 / count as f64;
        }
    }
    Ok(())
}

/// Recompute interior boundaries as rounded midpoints between neighboring
/// representatives; the endpoints stay pinned at -1 and 255.
fn boundaries_from(q: &[f64]) -> Vec<i32> {
    let mut z = Vec::with_capacity(q.len() + 1);
    z.push(-1);
    for pair in q.windows(2) {
        z.push(((pair[0] + pair[1]) / 2.0).round_ties_even() as i32);
    }
    z.push(255);
    z
}

fn ensure_monotone(z: &[i32]) -> Result<()> {
    if z.windows(2).all(|w| w[0] <= w[1]) {
        Ok(())
    } else {
        Err(TransformError::NumericDivergence)
    }
}

/// Quantize an image to at most `n_quant` intensity levels.
///
/// # Arguments
/// * `input` - Image with 1 or 3 channels (height, width, channels), values 0.0-1.0
/// * `n_quant` - Number of output intensity levels, 1-256
/// * `n_iter` - Maximum refinement rounds; 0 keeps the initial partition
///
/// # Returns
/// Image of the same shape and range whose luma/gray channel takes at most
/// `n_quant` distinct values
///
/// # Errors
/// * [`TransformError::InvalidArgument`] - `n_quant` outside 1-256
/// * [`TransformError::InvalidShape`] - channel count is not 1 or 3
/// * [`TransformError::DegenerateInput`] - empty image
/// * [`TransformError::NumericDivergence`] - partition degenerated
pub fn quantize(input: ArrayView3<f64>, n_quant: usize, n_iter: usize) -> Result<Array3<f64>> {
    if n_quant < 1 || n_quant > LEVELS {
        return Err(TransformError::InvalidArgument(
            "n_quant must be between 1 and 256",
        ));
    }
    let channels = input.dim().2;
    if channels != 1 && channels != 3 {
        return Err(TransformError::InvalidShape {
            expected: "1 or 3",
            got: channels,
        });
    }

    let hist = histogram::build(input)?;
    let total: u64 = hist.iter().map(|&c| c as u64).sum();
    if total == 0 {
        return Err(TransformError::DegenerateInput);
    }

    let cum = histogram::cumulative(&hist);
    let mut z = initial_boundaries(&cum, total, n_quant);
    let mut q = vec![0f64; n_quant];
    representatives(&hist, &z, &mut q)?;

    for round in 0..n_iter {
        let next = boundaries_from(&q);
        ensure_monotone(&next)?;
        if next == z {
            log::debug!("quantizer converged after {round} rounds");
            break;
        }
        z = next;
        representatives(&hist, &z, &mut q)?;
    }

    // Piecewise-constant mapping: level g in (z[i], z[i+1]] -> q[i]
    let mut lut = [0f64; LEVELS];
    for (g, out) in lut.iter_mut().enumerate() {
        let i = z.partition_point(|&b| b < g as i32) - 1;
        *out = q[i] / 255.0;
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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn distinct_values(image: &Array3<f64>) -> Vec<f64> {
        let mut values: Vec<f64> = image.iter().copied().collect();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap());
        values.dedup_by(|a, b| (*a - *b).abs() < 1e-12);
        values
    }

    #[test]
    fn test_two_cluster_image_is_a_fixed_point() {
        // Levels 51 and 204 quantize to themselves with n_quant=2
        let mut img = Array3::<f64>::zeros((4, 4, 1));
        for y in 0..4 {
            for x in 0..4 {
                img[[y, x, 0]] = if x < 2 { 0.2 } else { 0.8 };
            }
        }

        let result = quantize(img.view(), 2, 5).unwrap();
        for (orig, quant) in img.iter().zip(result.iter()) {
            assert_relative_eq!(orig, quant, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_all_gray_is_visually_unchanged() {
        let img = Array3::<f64>::from_elem((4, 4, 1), 0.5);

        let result = quantize(img.view(), 2, 5).unwrap();
        let values = distinct_values(&result);
        assert_eq!(values.len(), 1);
        // 0.5 rounds to level 128; its interval's weighted mean is exactly 128
        assert_relative_eq!(values[0], 128.0 / 255.0, epsilon = 1e-12);
        assert!((values[0] - 0.5).abs() <= 0.5 / 255.0 + 1e-12);
    }

    #[test]
    fn test_output_has_at_most_n_quant_values() {
        // Gradient across all 16 pixels
        let mut img = Array3::<f64>::zeros((4, 4, 1));
        for y in 0..4 {
            for x in 0..4 {
                img[[y, x, 0]] = (y * 4 + x) as f64 / 15.0;
            }
        }

        for n_quant in [1, 2, 3, 4, 7, 16] {
            let result = quantize(img.view(), n_quant, 5).unwrap();
            assert!(
                distinct_values(&result).len() <= n_quant,
                "n_quant={n_quant} produced too many values"
            );
        }
    }

    #[test]
    fn test_zero_iterations_keeps_initial_partition() {
        let mut img = Array3::<f64>::zeros((2, 2, 1));
        img[[0, 0, 0]] = 0.1;
        img[[0, 1, 0]] = 0.4;
        img[[1, 0, 0]] = 0.6;
        img[[1, 1, 0]] = 0.9;

        let result = quantize(img.view(), 2, 0).unwrap();
        assert!(distinct_values(&result).len() <= 2);
        for &v in result.iter() {
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_empty_intervals_inherit_downward() {
        // A single populated level with n_quant=3 leaves two empty intervals
        let img = Array3::<f64>::from_elem((2, 2, 1), 0.5);

        let result = quantize(img.view(), 3, 5).unwrap();
        let values = distinct_values(&result);
        assert_eq!(values.len(), 1);
        assert_relative_eq!(values[0], 128.0 / 255.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rgb_quantization_stays_in_range() {
        // Mid-range colors keep the reconstruction inside the RGB gamut
        let mut img = Array3::<f64>::zeros((3, 3, 3));
        for y in 0..3 {
            for x in 0..3 {
                img[[y, x, 0]] = 0.2 + (y as f64) * 0.2;
                img[[y, x, 1]] = 0.2 + (x as f64) * 0.2;
                img[[y, x, 2]] = 0.3;
            }
        }

        let result = quantize(img.view(), 3, 5).unwrap();
        assert_eq!(result.dim(), (3, 3, 3));
        for &v in result.iter() {
            assert!((0.0..=1.0).contains(&v));
        }

        // Luma channel of the result carries at most n_quant values
        let luma = color_space::luminance(result.view()).unwrap();
        assert!(distinct_values(&luma).len() <= 3);
    }

    #[test]
    fn test_rejects_out_of_range_n_quant() {
        let img = Array3::<f64>::from_elem((2, 2, 1), 0.5);
        assert!(matches!(
            quantize(img.view(), 0, 5),
            Err(TransformError::InvalidArgument(_))
        ));
        assert!(matches!(
            quantize(img.view(), 257, 5),
            Err(TransformError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_rejects_wrong_channel_count() {
        let img = Array3::<f64>::zeros((2, 2, 2));
        assert!(matches!(
            quantize(img.view(), 4, 5),
            Err(TransformError::InvalidShape { got: 2, .. })
        ));
    }

    #[test]
    fn test_rejects_empty_image() {
        let img = Array3::<f64>::zeros((0, 0, 1));
        assert_eq!(
            quantize(img.view(), 4, 5),
            Err(TransformError::DegenerateInput)
        );
    }

    #[test]
    fn test_initial_boundaries_are_monotone() {
        let mut hist = [0u32; LEVELS];
        hist[10] = 100;
        hist[30] = 1;
        hist[200] = 50;

        let total: u64 = hist.iter().map(|&c| c as u64).sum();
        let cum = histogram::cumulative(&hist);
        let z = initial_boundaries(&cum, total, 5);

        assert_eq!(z.len(), 6);
        assert_eq!(z[0], -1);
        assert_eq!(z[5], 255);
        assert!(z.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_boundaries_round_midpoints_ties_to_even() {
        // (51 + 204) / 2 = 127.5 -> 128
        let z = boundaries_from(&[51.0, 204.0]);
        assert_eq!(z, vec![-1, 128, 255]);
    }
}
