//! Line-plot rendering of normalized histograms.
//!
//! Each channel becomes a polyline of 256 points spanning the full target
//! width. Bin 0 sits on the left edge and bin 255 on the right edge. Larger
//! values plot higher, so the y axis is inverted relative to surface
//! coordinates.

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_line_segment_mut;
use serde::Serialize;

use crate::display::{DisplayError, MAX_IMAGE_DIMENSION};
use crate::{Channel, NormalizedHistogram, BIN_COUNT};

/// Largest normalized channel value.
const MAX_INTENSITY: f32 = 255.0;

/// Distance in bins between the first and last point.
const BIN_SPAN: f32 = (BIN_COUNT - 1) as f32;

/// A point in surface coordinates (origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Opaque stroke color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct StrokeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl StrokeColor {
    pub const RED: StrokeColor = StrokeColor { r: 255, g: 0, b: 0 };
    pub const GREEN: StrokeColor = StrokeColor { r: 0, g: 255, b: 0 };
    pub const BLUE: StrokeColor = StrokeColor { r: 0, g: 0, b: 255 };

    /// CSS color string, e.g. `rgb(255, 0, 0)`.
    pub fn to_css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 255])
    }
}

impl Channel {
    /// Fixed plot color of this channel.
    pub fn stroke_color(self) -> StrokeColor {
        match self {
            Channel::Red => StrokeColor::RED,
            Channel::Green => StrokeColor::GREEN,
            Channel::Blue => StrokeColor::BLUE,
        }
    }
}

/// One channel's curve, ready to stroke.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline {
    pub channel: Channel,
    pub color: StrokeColor,
    pub points: Vec<Point>,
}

/// Mapping from (bin, value) to surface coordinates for one target area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderGeometry {
    width: f32,
    height: f32,
}

impl RenderGeometry {
    /// Geometry for a target area, or `None` if it has no drawable area.
    pub fn new(width: f32, height: f32) -> Option<Self> {
        let drawable = width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0;
        drawable.then_some(Self { width, height })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Horizontal distance between adjacent bins.
    pub fn x_scale(&self) -> f32 {
        self.width / BIN_SPAN
    }

    /// Vertical distance per intensity step.
    pub fn y_scale(&self) -> f32 {
        self.height / MAX_INTENSITY
    }

    /// Surface position of a bin's value.
    #[inline]
    pub fn point(&self, bin: usize, value: u8) -> Point {
        // Multiply before dividing so the extreme bins and values land
        // exactly on the target edges.
        Point {
            x: bin as f32 * self.width / BIN_SPAN,
            y: self.height - value as f32 * self.height / MAX_INTENSITY,
        }
    }
}

/// Something that can stroke polylines, e.g. a canvas or raster image.
pub trait DrawSurface {
    /// Stroke connected segments through `points` without filling.
    fn stroke_polyline(&mut self, points: &[Point], color: StrokeColor);
}

/// Build the red, green and blue polylines for a target area.
///
/// Returns an empty vector if the target has no drawable area.
pub fn channel_polylines(
    histogram: &NormalizedHistogram,
    target_width: f32,
    target_height: f32,
) -> Vec<Polyline> {
    let Some(geometry) = RenderGeometry::new(target_width, target_height) else {
        return Vec::new();
    };

    Channel::ALL
        .iter()
        .map(|&channel| Polyline {
            channel,
            color: channel.stroke_color(),
            points: histogram
                .channel_values(channel)
                .enumerate()
                .map(|(bin, value)| geometry.point(bin, value))
                .collect(),
        })
        .collect()
}

/// Stroke the three channel polylines onto `surface`.
///
/// A zero-area or non-finite target draws nothing.
pub fn render_histogram<S: DrawSurface + ?Sized>(
    histogram: &NormalizedHistogram,
    surface: &mut S,
    target_width: f32,
    target_height: f32,
) {
    let lines = channel_polylines(histogram, target_width, target_height);
    if lines.is_empty() {
        tracing::trace!(target_width, target_height, "skipping render of empty target");
        return;
    }
    for line in &lines {
        surface.stroke_polyline(&line.points, line.color);
    }
}

/// Off-screen [`DrawSurface`] backed by an RGBA image.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    image: RgbaImage,
}

impl RasterSurface {
    /// Transparent surface of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_background(width, height, Rgba([0, 0, 0, 0]))
    }

    pub fn with_background(width: u32, height: u32, background: Rgba<u8>) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, background),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

impl DrawSurface for RasterSurface {
    fn stroke_polyline(&mut self, points: &[Point], color: StrokeColor) {
        let color = color.to_rgba();
        for segment in points.windows(2) {
            draw_line_segment_mut(
                &mut self.image,
                (segment[0].x, segment[0].y),
                (segment[1].x, segment[1].y),
                color,
            );
        }
    }
}

/// Render the line plot into a new transparent image.
///
/// The plot spans the last pixel column and row, so the drawing target is
/// one pixel smaller than the image in each direction.
///
/// # Errors
/// [`DisplayError::InvalidParameters`] if either dimension exceeds
/// [`MAX_IMAGE_DIMENSION`].
pub fn render_to_image(
    histogram: &NormalizedHistogram,
    width: u32,
    height: u32,
) -> Result<RgbaImage, DisplayError> {
    if width > MAX_IMAGE_DIMENSION || height > MAX_IMAGE_DIMENSION {
        return Err(DisplayError::InvalidParameters(format!(
            "image size {}x{} exceeds maximum of {}",
            width, height, MAX_IMAGE_DIMENSION
        )));
    }

    let mut surface = RasterSurface::new(width, height);
    render_histogram(
        histogram,
        &mut surface,
        width.saturating_sub(1) as f32,
        height.saturating_sub(1) as f32,
    );
    Ok(surface.into_image())
}
