//! Histoplot WASM - WebAssembly bindings for Histoplot
//!
//! This crate exposes the histoplot-core histogram computation and rendering
//! to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `histogram` - Histogram computation and record packing
//! - `render` - Line-plot rendering onto a canvas or into PNG bytes
//! - `display` - Bar-chart histogram display
//!
//! # Usage
//!
//! ```typescript
//! import init, { compute_histogram, draw_histogram } from '@histoplot/wasm';
//!
//! await init();
//!
//! const imageData = ctx.getImageData(0, 0, width, height);
//! const hist = compute_histogram(imageData.data, width, height);
//! draw_histogram(plotCtx, hist, plotCanvas.width, plotCanvas.height);
//! ```

use wasm_bindgen::prelude::*;

mod display;
mod histogram;
mod render;

pub use display::{render_bar_chart, render_bar_chart_from_pixels};
pub use histogram::{compute_histogram, compute_histogram_with_config, JsHistogram};
pub use render::{draw_histogram, histogram_polylines, render_line_plot_png};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
