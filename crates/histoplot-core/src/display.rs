//! Pluggable histogram visualizations.
//!
//! A [`HistogramDisplay`] turns histogram statistics into an image. The
//! built-in [`BarChartDisplay`] draws one column per bin with the red, green
//! and blue bars composited additively on black, so overlapping bars show
//! as yellow, cyan, magenta or white.

use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::histogram::normalize;
use crate::{pack, Channel, ChannelCounts, NormalizedHistogram, BIN_COUNT};

/// Largest width or height of a rendered histogram image.
pub const MAX_IMAGE_DIMENSION: u32 = 16384;

/// Errors that can occur while producing a histogram visualization.
#[derive(Debug, Error)]
pub enum DisplayError {
    /// Display parameters are out of range
    #[error("Invalid display parameters: {0}")]
    InvalidParameters(String),

    /// PNG encoding failed
    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Produces a visualization from histogram statistics.
pub trait HistogramDisplay {
    /// Render a normalized histogram.
    fn display(&self, histogram: &NormalizedHistogram) -> Result<RgbaImage, DisplayError>;

    /// Render raw channel counts, normalizing them first.
    fn display_counts(&self, counts: &ChannelCounts) -> Result<RgbaImage, DisplayError> {
        self.display(&normalize(counts))
    }

    /// Render a 256×1 histogram strip as produced by [`pack::to_rgba_image`].
    fn display_strip(&self, strip: &RgbaImage) -> Result<RgbaImage, DisplayError> {
        let histogram = pack::from_rgba_image(strip).ok_or_else(|| {
            let (width, height) = strip.dimensions();
            DisplayError::InvalidParameters(format!(
                "histogram strip must be {}x1, got {}x{}",
                BIN_COUNT, width, height
            ))
        })?;
        self.display(&histogram)
    }
}

/// Bar chart with one column per bin.
///
/// Values are mapped through `[low_limit, high_limit]` (fractions of full
/// scale) before scaling to `height`, so narrowing the limits zooms into
/// part of the value range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarChartDisplay {
    /// Output image height in pixels
    pub height: u32,
    /// Fraction of full scale drawn at the top (0.0 to 1.0)
    pub high_limit: f32,
    /// Fraction of full scale drawn at the bottom (0.0 to 1.0)
    pub low_limit: f32,
}

impl Default for BarChartDisplay {
    fn default() -> Self {
        Self {
            height: 200,
            high_limit: 1.0,
            low_limit: 0.0,
        }
    }
}

impl BarChartDisplay {
    pub fn new(height: u32, high_limit: f32, low_limit: f32) -> Self {
        Self {
            height,
            high_limit,
            low_limit,
        }
    }

    /// Check that `0 < height <= MAX_IMAGE_DIMENSION` and `0 <= low < high <= 1`.
    pub fn validate(&self) -> Result<(), DisplayError> {
        if self.height == 0 {
            return Err(DisplayError::InvalidParameters(
                "height must be non-zero".to_string(),
            ));
        }
        if self.height > MAX_IMAGE_DIMENSION {
            return Err(DisplayError::InvalidParameters(format!(
                "height {} exceeds maximum of {}",
                self.height, MAX_IMAGE_DIMENSION
            )));
        }
        let (low, high) = (self.low_limit, self.high_limit);
        if !(0.0..=1.0).contains(&low) || !(0.0..=1.0).contains(&high) || low >= high {
            return Err(DisplayError::InvalidParameters(format!(
                "limits must satisfy 0 <= low < high <= 1, got low={} high={}",
                low, high
            )));
        }
        Ok(())
    }

    /// Bar height in pixels for a normalized value.
    fn bar_height(&self, value: u8) -> u32 {
        let fraction = value as f32 / 255.0;
        let span = self.high_limit - self.low_limit;
        let mapped = ((fraction - self.low_limit) / span).clamp(0.0, 1.0);
        (mapped * self.height as f32).round() as u32
    }
}

impl HistogramDisplay for BarChartDisplay {
    fn display(&self, histogram: &NormalizedHistogram) -> Result<RgbaImage, DisplayError> {
        self.validate()?;

        let background = Rgba([0, 0, 0, 255]);
        let mut image = RgbaImage::from_pixel(BIN_COUNT as u32, self.height, background);
        for (x, record) in histogram.records().iter().enumerate() {
            for (component, channel) in Channel::ALL.into_iter().enumerate() {
                let bar = self.bar_height(record.channel(channel));
                for y in (self.height - bar)..self.height {
                    image.get_pixel_mut(x as u32, y).0[component] = 255;
                }
            }
        }

        tracing::debug!(height = self.height, "rendered histogram bar chart");
        Ok(image)
    }
}

/// Encode an RGBA image as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, DisplayError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(DisplayError::InvalidParameters(format!(
            "cannot encode empty {}x{} image",
            width, height
        )));
    }

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(image.as_raw(), width, height, ExtendedColorType::Rgba8)
        .map_err(|e| DisplayError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
