//! Histogram computation WASM bindings.
//!
//! This module provides JavaScript bindings for computing normalized RGB
//! histograms from RGBA pixel data (e.g. `ImageData.data` from a canvas).

use histoplot_core::{
    compute_histogram_with, pack_records, Channel, HistogramConfig, NormalizedHistogram,
    PackedLayout, RawPixelBuffer,
};
use wasm_bindgen::prelude::*;


/// Normalized histogram accessible from JavaScript.
///
/// Holds 256 bins per channel with values rescaled so the most frequent
/// intensity across all channels is 255.
#[wasm_bindgen]
pub struct JsHistogram {
    inner: NormalizedHistogram,
}

#[wasm_bindgen]
impl JsHistogram {
    /// Get red channel values (256 bins).
    pub fn red(&self) -> Vec<u8> {
        self.channel(Channel::Red)
    }

    /// Get green channel values (256 bins).
    pub fn green(&self) -> Vec<u8> {
        self.channel(Channel::Green)
    }

    /// Get blue channel values (256 bins).
    pub fn blue(&self) -> Vec<u8> {
        self.channel(Channel::Blue)
    }

    /// Largest value across all channels (255 unless the histogram is empty).
    #[wasm_bindgen(getter)]
    pub fn peak(&self) -> u8 {
        self.inner.peak()
    }

    /// True if every bin is zero.
    #[wasm_bindgen(getter)]
    pub fn is_empty(&self) -> bool {
        self.inner.is_all_zero()
    }

    /// Pack the 256 records as a flat byte buffer (1024 bytes).
    ///
    /// `layout`: 0 = ARGB, 1 = RGBA, 2 = BGRA. Other values default to ARGB.
    pub fn packed(&self, layout: u8) -> Vec<u8> {
        pack_records(&self.inner, layout_from_u8(layout))
    }
}

impl JsHistogram {
    pub(crate) fn from_core(inner: NormalizedHistogram) -> Self {
        Self { inner }
    }

    pub(crate) fn as_core(&self) -> &NormalizedHistogram {
        &self.inner
    }

    fn channel(&self, channel: Channel) -> Vec<u8> {
        self.inner.channel_values(channel).collect()
    }
}

/// Compute a histogram from RGBA pixel data.
///
/// # Arguments
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Errors
/// Throws if width or height is zero, or the buffer is too short.
///
/// # Example (TypeScript)
/// ```typescript
/// const hist = compute_histogram(imageData.data, width, height);
/// const redBins = hist.red();   // Uint8Array[256]
/// hist.free();
/// ```
#[wasm_bindgen]
pub fn compute_histogram(pixels: &[u8], width: u32, height: u32) -> Result<JsHistogram, JsValue> {
    compute(pixels, width, height, &HistogramConfig::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Compute a histogram with explicit settings.
///
/// `config` is an object such as
/// `{ source_layout: "Bgra", sample_extent: "Full" }`; missing fields use
/// their defaults.
#[wasm_bindgen]
pub fn compute_histogram_with_config(
    pixels: &[u8],
    width: u32,
    height: u32,
    config: JsValue,
) -> Result<JsHistogram, JsValue> {
    let config: HistogramConfig = serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Invalid histogram config: {}", e)))?;
    compute(pixels, width, height, &config).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn compute(
    pixels: &[u8],
    width: u32,
    height: u32,
    config: &HistogramConfig,
) -> Result<JsHistogram, histoplot_core::HistogramError> {
    let buffer = RawPixelBuffer::new(pixels, width, height);
    compute_histogram_with(&buffer, config).map(JsHistogram::from_core)
}

/// Convert a u8 layout value to the core PackedLayout enum.
///
/// Values:
/// - 0 = ARGB (alpha first)
/// - 1 = RGBA
/// - 2 = BGRA
///
/// Any other value defaults to ARGB.
pub(crate) fn layout_from_u8(value: u8) -> PackedLayout {
    match value {
        1 => PackedLayout::Rgba,
        2 => PackedLayout::Bgra,
        _ => PackedLayout::Argb,
    }
}
