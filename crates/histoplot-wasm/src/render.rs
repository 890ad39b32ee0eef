//! Line-plot rendering WASM bindings.
//!
//! Draws the three channel curves onto a browser canvas, exports their
//! geometry as plain objects, or renders them off-screen into PNG bytes.
//!
//! # Example
//!
//! ```typescript
//! const ctx = canvas.getContext('2d');
//! draw_histogram(ctx, hist, canvas.width, canvas.height);
//!
//! // Or take the geometry and draw it yourself
//! const lines = histogram_polylines(hist, 512, 200);
//! ```

use histoplot_core::{
    channel_polylines, encode_png, render_histogram, render_to_image, DrawSurface, Point,
    StrokeColor,
};
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

use crate::histogram::JsHistogram;

/// [`DrawSurface`] over a 2D canvas context.
struct CanvasSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl DrawSurface for CanvasSurface<'_> {
    fn stroke_polyline(&mut self, points: &[Point], color: StrokeColor) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for point in rest {
            self.ctx.line_to(point.x as f64, point.y as f64);
        }
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.stroke();
    }
}

/// Stroke the red, green and blue curves onto a canvas.
///
/// The curves span `width` × `height` from the canvas origin. The context's
/// state (stroke style, path) is restored afterwards. A zero-size target
/// draws nothing.
#[wasm_bindgen]
pub fn draw_histogram(
    ctx: &CanvasRenderingContext2d,
    histogram: &JsHistogram,
    width: f64,
    height: f64,
) {
    ctx.save();
    let mut surface = CanvasSurface { ctx };
    render_histogram(histogram.as_core(), &mut surface, width as f32, height as f32);
    ctx.restore();
}

/// Get the three channel polylines for a target size.
///
/// Returns an array of `{ channel, color: { r, g, b }, points: [{ x, y }] }`
/// objects, empty for a zero-size target.
#[wasm_bindgen]
pub fn histogram_polylines(
    histogram: &JsHistogram,
    width: f32,
    height: f32,
) -> Result<JsValue, JsValue> {
    let lines = channel_polylines(histogram.as_core(), width, height);
    serde_wasm_bindgen::to_value(&lines).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Render the line plot off-screen and encode it as PNG.
#[wasm_bindgen]
pub fn render_line_plot_png(
    histogram: &JsHistogram,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, JsValue> {
    let image = render_to_image(histogram.as_core(), width, height)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    encode_png(&image).map_err(|e| JsValue::from_str(&e.to_string()))
}
