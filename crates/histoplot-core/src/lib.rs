//! Histoplot Core - Histogram computation and rendering library
//!
//! This crate computes per-channel intensity histograms from decoded RGBA
//! pixel buffers, normalizes them into 256 displayable pixel records, and
//! renders them as line plots or bar charts.

pub mod display;
pub mod gallery;
pub mod histogram;
pub mod pack;
pub mod render;

pub use display::{
    encode_png, BarChartDisplay, DisplayError, HistogramDisplay, MAX_IMAGE_DIMENSION,
};
pub use gallery::select_next;
pub use histogram::{
    compute_channel_counts, compute_histogram, compute_histogram_with, normalize, HistogramError,
};
pub use pack::{pack_records, to_rgba_image, PackedLayout};
pub use render::{
    channel_polylines, render_histogram, render_to_image, DrawSurface, Point, Polyline,
    RasterSurface, RenderGeometry, StrokeColor,
};

use serde::{Deserialize, Serialize};

/// Number of intensity bins in every histogram.
pub const BIN_COUNT: usize = 256;

/// Bytes per pixel in a raw source buffer.
pub const BYTES_PER_PIXEL: usize = 4;

/// One of the three color channels tracked by a histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// All channels in drawing order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];
}

/// Byte order of the 4-byte pixels in a source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SourceLayout {
    /// Red, green, blue, then an ignored fourth byte.
    #[default]
    Rgba,
    /// Blue, green, red, then an ignored fourth byte.
    Bgra,
    /// An ignored first byte, then red, green, blue.
    Argb,
}

impl SourceLayout {
    /// Byte offsets of the red, green and blue components within a pixel.
    #[inline]
    pub fn channel_offsets(self) -> [usize; 3] {
        match self {
            SourceLayout::Rgba => [0, 1, 2],
            SourceLayout::Bgra => [2, 1, 0],
            SourceLayout::Argb => [1, 2, 3],
        }
    }
}

/// How many pixels of the source buffer are sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SampleExtent {
    /// Every pixel: `width * height`.
    #[default]
    Full,
    /// `width * width` pixels, matching legacy callers that assumed square
    /// images. Only equivalent to `Full` when width == height.
    SquareWidth,
}

impl SampleExtent {
    /// Number of pixels to sample, or `None` if it overflows `usize`.
    pub fn pixel_count(self, width: u32, height: u32) -> Option<usize> {
        let rows = match self {
            SampleExtent::Full => height,
            SampleExtent::SquareWidth => width,
        };
        (width as usize).checked_mul(rows as usize)
    }
}

/// Settings for histogram computation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistogramConfig {
    /// Byte order of the source pixels
    pub source_layout: SourceLayout,
    /// Which pixels are counted
    pub sample_extent: SampleExtent,
}

impl HistogramConfig {
    /// Create a config with default values (RGBA source, every pixel).
    pub fn new() -> Self {
        Self::default()
    }
}

/// A borrowed, read-only view of decoded pixels with 4 bytes per pixel.
///
/// The buffer may be longer than `width * height * 4`; trailing bytes are
/// never read.
#[derive(Debug, Clone, Copy)]
pub struct RawPixelBuffer<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
}

impl<'a> RawPixelBuffer<'a> {
    pub fn new(data: &'a [u8], width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
        }
    }

    /// Borrow the pixels of an `image::RgbaImage`.
    pub fn from_rgba_image(image: &'a image::RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self::new(image.as_raw(), width, height)
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Raw per-channel occurrence counts for 256 intensity bins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelCounts {
    /// Red channel counts (256 bins)
    pub red: [u64; BIN_COUNT],
    /// Green channel counts (256 bins)
    pub green: [u64; BIN_COUNT],
    /// Blue channel counts (256 bins)
    pub blue: [u64; BIN_COUNT],
}

impl Default for ChannelCounts {
    fn default() -> Self {
        Self {
            red: [0; BIN_COUNT],
            green: [0; BIN_COUNT],
            blue: [0; BIN_COUNT],
        }
    }
}

impl ChannelCounts {
    /// Create a new zeroed set of counts
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts for one channel.
    pub fn channel(&self, channel: Channel) -> &[u64; BIN_COUNT] {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
        }
    }

    /// Find the maximum count across all bins and channels
    pub fn max_count(&self) -> u64 {
        Channel::ALL
            .iter()
            .flat_map(|&c| self.channel(c).iter().copied())
            .max()
            .unwrap_or(0)
    }

    /// True if no pixel has been counted.
    pub fn is_empty(&self) -> bool {
        self.max_count() == 0
    }
}

/// A packed histogram pixel: full alpha plus one intensity per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelRecord {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for PixelRecord {
    fn default() -> Self {
        Self::new(0, 0, 0)
    }
}

impl PixelRecord {
    /// Create an opaque record.
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { a: 255, r, g, b }
    }

    /// Create an opaque gray record.
    pub fn gray(value: u8) -> Self {
        Self::new(value, value, value)
    }

    /// Intensity of one channel.
    #[inline]
    pub fn channel(&self, channel: Channel) -> u8 {
        match channel {
            Channel::Red => self.r,
            Channel::Green => self.g,
            Channel::Blue => self.b,
        }
    }
}

/// Exactly 256 records with channel values rescaled into 0..=255.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedHistogram {
    records: Vec<PixelRecord>,
}

impl Default for NormalizedHistogram {
    fn default() -> Self {
        Self::from_fn(|_| PixelRecord::default())
    }
}

impl NormalizedHistogram {
    /// All-zero histogram (opaque black records).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a histogram by evaluating `f` for every bin index.
    pub fn from_fn(f: impl FnMut(usize) -> PixelRecord) -> Self {
        Self {
            records: (0..BIN_COUNT).map(f).collect(),
        }
    }

    pub fn from_records(records: [PixelRecord; BIN_COUNT]) -> Self {
        Self {
            records: records.to_vec(),
        }
    }

    /// The 256 records in bin order.
    pub fn records(&self) -> &[PixelRecord] {
        &self.records
    }

    /// Record for one bin, if in range.
    pub fn get(&self, bin: usize) -> Option<&PixelRecord> {
        self.records.get(bin)
    }

    /// Intensities of one channel in bin order.
    pub fn channel_values(&self, channel: Channel) -> impl Iterator<Item = u8> + '_ {
        self.records.iter().map(move |r| r.channel(channel))
    }

    /// Largest channel value in the histogram.
    pub fn peak(&self) -> u8 {
        self.records
            .iter()
            .map(|r| r.r.max(r.g).max(r.b))
            .max()
            .unwrap_or(0)
    }

    /// True if every channel value is zero.
    pub fn is_all_zero(&self) -> bool {
        self.peak() == 0
    }
}
