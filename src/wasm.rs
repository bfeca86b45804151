//! WebAssembly exports for the ImageTone transforms.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Images cross
//! the boundary as flat f64 buffers (row-major, channel-interleaved) with
//! explicit dimensions; shape and argument failures surface as thrown JS
//! errors.

use ndarray::Array3;
use wasm_bindgen::prelude::*;

use crate::filters::color_space;
use crate::filters::edge;
use crate::filters::equalize;
use crate::filters::quantize;

fn to_array(
    data: &[f64],
    height: usize,
    width: usize,
    channels: usize,
) -> Result<Array3<f64>, JsError> {
    Array3::from_shape_vec((height, width, channels), data.to_vec())
        .map_err(|e| JsError::new(&e.to_string()))
}

/// Quantize an image to at most `n_quant` intensity levels.
///
/// # Arguments
/// * `data` - Flat array of f64 values (length = height * width * channels), values 0.0-1.0
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `channels` - 1 (grayscale) or 3 (RGB)
/// * `n_quant` - Number of output intensity levels (1-256)
/// * `n_iter` - Maximum refinement rounds
///
/// # Returns
/// Flat array of quantized f64 values
#[wasm_bindgen]
pub fn quantize_wasm(
    data: &[f64],
    width: usize,
    height: usize,
    channels: usize,
    n_quant: usize,
    n_iter: usize,
) -> Result<Vec<f64>, JsError> {
    let input = to_array(data, height, width, channels)?;
    let result = quantize::quantize(input.view(), n_quant, n_iter)
        .map_err(|e| JsError::new(&e.to_string()))?;
    Ok(result.into_raw_vec_and_offset().0)
}

/// Equalize an image's intensity histogram.
///
/// # Arguments
/// * `data` - Flat array of f64 values (length = height * width * channels), values 0.0-1.0
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `channels` - 1 (grayscale) or 3 (RGB)
///
/// # Returns
/// Flat array of equalized f64 values
#[wasm_bindgen]
pub fn equalize_wasm(
    data: &[f64],
    width: usize,
    height: usize,
    channels: usize,
) -> Result<Vec<f64>, JsError> {
    let input = to_array(data, height, width, channels)?;
    let result =
        equalize::equalize(input.view()).map_err(|e| JsError::new(&e.to_string()))?;
    Ok(result.into_raw_vec_and_offset().0)
}

/// Binary edge mask of a grayscale image.
///
/// # Arguments
/// * `data` - Flat array of f64 values (length = height * width), values 0.0-1.0
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Returns
/// Flat binary mask: 1.0 at edges, 0.0 elsewhere
#[wasm_bindgen]
pub fn edges_wasm(data: &[f64], width: usize, height: usize) -> Result<Vec<f64>, JsError> {
    let input = to_array(data, height, width, 1)?;
    let result = edge::edges(input.view()).map_err(|e| JsError::new(&e.to_string()))?;
    Ok(result.into_raw_vec_and_offset().0)
}

/// Inverted edge mask: black strokes on white.
///
/// # Arguments
/// * `data` - Flat array of f64 values (length = height * width), values 0.0-1.0
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Returns
/// Flat sketch rendering: 0.0 at edges, 1.0 elsewhere
#[wasm_bindgen]
pub fn sketch_wasm(data: &[f64], width: usize, height: usize) -> Result<Vec<f64>, JsError> {
    let input = to_array(data, height, width, 1)?;
    let result = edge::sketch(input.view()).map_err(|e| JsError::new(&e.to_string()))?;
    Ok(result.into_raw_vec_and_offset().0)
}

/// Extract the luma (Y) channel of an RGB image.
///
/// # Arguments
/// * `data` - Flat array of f64 RGB values (length = height * width * 3), values 0.0-1.0
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Returns
/// Flat single-channel array of luma values
#[wasm_bindgen]
pub fn luminance_wasm(data: &[f64], width: usize, height: usize) -> Result<Vec<f64>, JsError> {
    let input = to_array(data, height, width, 3)?;
    let result =
        color_space::luminance(input.view()).map_err(|e| JsError::new(&e.to_string()))?;
    Ok(result.into_raw_vec_and_offset().0)
}
