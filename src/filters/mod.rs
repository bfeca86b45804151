//! Transform modules for raster-image tone manipulation.
//!
//! ## Supported Formats
//!
//! All transforms accept float images with 1 or 3 channels:
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | Grayscale | (H, W, 1) | f64 | Single intensity channel, 0.0-1.0 |
//! | RGB | (H, W, 3) | f64 | Red, green, blue, 0.0-1.0 |
//!
//! Channel count is inferred from input array dimensions. Grayscale is a
//! single-channel 3D array so every transform shares one entry type.
//! Alpha is not supported; callers composite to opaque RGB before handoff.
//!
//! ## Architecture
//!
//! All transforms follow these principles:
//! - **Pure** - A fresh output array per call; the caller's buffer is never
//!   mutated, and no state survives the call
//! - **Fallible** - Shape and argument problems surface as
//!   [`error::TransformError`], never as partial output
//! - **Channel strategy** - RGB images are processed on the luma (Y) channel
//!   in YIQ space and converted back; grayscale images are processed directly
//! - **Thread-safe** - Per-pixel math uses rayon internally where available
//!
//! ## Transform Categories
//!
//! - **Color space**: rgb_to_yiq, yiq_to_rgb, luminance
//! - **Histogram-based**: quantize (Lloyd-Max), equalize
//! - **Derivative-based**: edges, sketch
//! - **Conversion**: u8_to_f64, f64_to_u8

pub mod color_space;
pub mod convert;
pub mod edge;
pub mod equalize;
pub mod error;
pub mod histogram;
pub mod quantize;
