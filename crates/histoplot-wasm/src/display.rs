//! Bar-chart histogram display WASM bindings.
//!
//! Two entry points mirror the two ways a bar chart can be fed: from an
//! already computed histogram, or straight from source pixels.

use histoplot_core::{
    compute_channel_counts, encode_png, BarChartDisplay, HistogramConfig, HistogramDisplay,
    RawPixelBuffer,
};
use wasm_bindgen::prelude::*;

use crate::histogram::JsHistogram;

/// Render a computed histogram as a 256 × `height` bar chart PNG.
///
/// # Arguments
/// * `histogram` - Histogram from `compute_histogram`
/// * `height` - Chart height in pixels (default 200)
/// * `high_limit` - Fraction of full scale at the top (default 1.0)
/// * `low_limit` - Fraction of full scale at the bottom (default 0.0)
#[wasm_bindgen]
pub fn render_bar_chart(
    histogram: &JsHistogram,
    height: u32,
    high_limit: f32,
    low_limit: f32,
) -> Result<Vec<u8>, JsValue> {
    let display = BarChartDisplay::new(height, high_limit, low_limit);
    let image = display
        .display(histogram.as_core())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    encode_png(&image).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Count channel statistics of RGBA pixels and render them as a bar chart PNG.
#[wasm_bindgen]
pub fn render_bar_chart_from_pixels(
    pixels: &[u8],
    width: u32,
    height: u32,
    chart_height: u32,
    high_limit: f32,
    low_limit: f32,
) -> Result<Vec<u8>, JsValue> {
    let buffer = RawPixelBuffer::new(pixels, width, height);
    let counts = compute_channel_counts(&buffer, &HistogramConfig::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let display = BarChartDisplay::new(chart_height, high_limit, low_limit);
    let image = display
        .display_counts(&counts)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    encode_png(&image).map_err(|e| JsValue::from_str(&e.to_string()))
}
