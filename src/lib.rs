//! ImageTone Rust core
//!
//! Numeric raster-image transforms implemented in Rust with Python bindings
//! via PyO3 and WASM bindings for JavaScript: RGB/YIQ color-space
//! conversion, optimal (Lloyd-Max) intensity quantization, global histogram
//! equalization, and gradient-magnitude edge extraction.
//!
//! ## Image Format
//! Transforms operate on float images in 0.0-1.0:
//! - **Grayscale**: (height, width, 1) - single intensity channel
//! - **RGB**: (height, width, 3) - 3 color channels
//!
//! Channel count is inferred from input array dimensions. Decoding,
//! encoding, and alpha compositing stay with the calling presentation
//! layer; the core receives decoded pixels and returns a fresh array of the
//! same shape and range, or an error - never partial output.

pub mod filters;

#[cfg(feature = "wasm")]
pub mod wasm;

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::filters::color_space;
    use crate::filters::convert;
    use crate::filters::edge;
    use crate::filters::equalize as equalize_mod;
    use crate::filters::error::TransformError;
    use crate::filters::quantize as quantize_mod;

    fn to_py_err(e: TransformError) -> PyErr {
        PyValueError::new_err(e.to_string())
    }

    // ========================================================================
    // Color Space
    // ========================================================================

    /// Convert an RGB f64 image to YIQ.
    #[pyfunction]
    pub fn rgb_to_yiq<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, f64>,
    ) -> PyResult<Bound<'py, PyArray3<f64>>> {
        let result = color_space::rgb_to_yiq(image.as_array()).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Convert a YIQ f64 image back to RGB.
    #[pyfunction]
    pub fn yiq_to_rgb<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, f64>,
    ) -> PyResult<Bound<'py, PyArray3<f64>>> {
        let result = color_space::yiq_to_rgb(image.as_array()).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Extract the luma (Y) channel as a single-channel image.
    #[pyfunction]
    pub fn luminance<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, f64>,
    ) -> PyResult<Bound<'py, PyArray3<f64>>> {
        let result = color_space::luminance(image.as_array()).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    // ========================================================================
    // Histogram Transforms
    // ========================================================================

    /// Quantize an image to at most `n_quant` intensity levels.
    ///
    /// # Arguments
    /// * `image` - Grayscale (H, W, 1) or RGB (H, W, 3) image, values 0.0-1.0
    /// * `n_quant` - Number of output intensity levels (1-256)
    /// * `n_iter` - Maximum Lloyd-Max refinement rounds (default: 5)
    #[pyfunction]
    #[pyo3(signature = (image, n_quant, n_iter=5))]
    pub fn quantize<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, f64>,
        n_quant: usize,
        n_iter: usize,
    ) -> PyResult<Bound<'py, PyArray3<f64>>> {
        let result = quantize_mod::quantize(image.as_array(), n_quant, n_iter).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Equalize an image's intensity histogram.
    #[pyfunction]
    pub fn equalize<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, f64>,
    ) -> PyResult<Bound<'py, PyArray3<f64>>> {
        let result = equalize_mod::equalize(image.as_array()).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    // ========================================================================
    // Edge Detection
    // ========================================================================

    /// Binary edge mask of a grayscale image.
    #[pyfunction]
    pub fn edges<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, f64>,
    ) -> PyResult<Bound<'py, PyArray3<f64>>> {
        let result = edge::edges(image.as_array()).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Inverted edge mask: black strokes on white.
    #[pyfunction]
    pub fn sketch<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, f64>,
    ) -> PyResult<Bound<'py, PyArray3<f64>>> {
        let result = edge::sketch(image.as_array()).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    // ========================================================================
    // Conversion Utilities
    // ========================================================================

    /// Convert a u8 image (0-255) to f64 (0.0-1.0)
    #[pyfunction]
    pub fn convert_u8_to_f64<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> Bound<'py, PyArray3<f64>> {
        convert::u8_to_f64(image.as_array()).into_pyarray(py)
    }

    /// Convert an f64 image (0.0-1.0) to u8 (0-255)
    #[pyfunction]
    pub fn convert_f64_to_u8<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, f64>,
    ) -> Bound<'py, PyArray3<u8>> {
        convert::f64_to_u8(image.as_array()).into_pyarray(py)
    }

    /// ImageTone Rust extension module
    #[pymodule]
    pub fn imagetone_rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
        // Color space
        m.add_function(wrap_pyfunction!(rgb_to_yiq, m)?)?;
        m.add_function(wrap_pyfunction!(yiq_to_rgb, m)?)?;
        m.add_function(wrap_pyfunction!(luminance, m)?)?;

        // Histogram transforms
        m.add_function(wrap_pyfunction!(quantize, m)?)?;
        m.add_function(wrap_pyfunction!(equalize, m)?)?;

        // Edge detection
        m.add_function(wrap_pyfunction!(edges, m)?)?;
        m.add_function(wrap_pyfunction!(sketch, m)?)?;

        // Conversion utilities
        m.add_function(wrap_pyfunction!(convert_u8_to_f64, m)?)?;
        m.add_function(wrap_pyfunction!(convert_f64_to_u8, m)?)?;

        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::imagetone_rust;
