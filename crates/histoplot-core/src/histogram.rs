//! Histogram computation from RGBA pixel data.
//!
//! This module counts per-channel intensity occurrences into 256 bins and
//! rescales the counts into displayable [`PixelRecord`]s using a single
//! global scale factor shared by all three channels.

use thiserror::Error;

use crate::{
    ChannelCounts, HistogramConfig, NormalizedHistogram, PixelRecord, RawPixelBuffer,
    BYTES_PER_PIXEL,
};

/// Errors that can occur during histogram computation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistogramError {
    /// Width or height is zero, or their product overflows
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel data is shorter than the dimensions require
    #[error("Buffer too small: expected at least {expected} bytes, got {actual}")]
    BufferTooSmall { expected: usize, actual: usize },
}

/// Count channel intensities of every sampled pixel.
///
/// # Arguments
/// * `buffer` - Pixel data, 4 bytes per pixel
/// * `config` - Source byte order and sampling extent
///
/// # Errors
/// * [`HistogramError::InvalidDimensions`] if width or height is zero
/// * [`HistogramError::BufferTooSmall`] if the buffer does not cover the
///   sampled pixels
///
/// # Performance
/// Single pass, O(n) in the number of sampled pixels. Auxiliary memory is
/// the fixed 6KB of bins.
pub fn compute_channel_counts(
    buffer: &RawPixelBuffer<'_>,
    config: &HistogramConfig,
) -> Result<ChannelCounts, HistogramError> {
    let (width, height) = (buffer.width(), buffer.height());
    if width == 0 || height == 0 {
        return Err(HistogramError::InvalidDimensions { width, height });
    }

    let expected_len = config
        .sample_extent
        .pixel_count(width, height)
        .and_then(|count| count.checked_mul(BYTES_PER_PIXEL))
        .ok_or(HistogramError::InvalidDimensions { width, height })?;

    let data = buffer.data();
    if data.len() < expected_len {
        return Err(HistogramError::BufferTooSmall {
            expected: expected_len,
            actual: data.len(),
        });
    }

    let [r_off, g_off, b_off] = config.source_layout.channel_offsets();
    let mut counts = ChannelCounts::new();

    for pixel in data[..expected_len].chunks_exact(BYTES_PER_PIXEL) {
        counts.red[pixel[r_off] as usize] += 1;
        counts.green[pixel[g_off] as usize] += 1;
        counts.blue[pixel[b_off] as usize] += 1;
    }

    tracing::debug!(
        width,
        height,
        pixels = expected_len / BYTES_PER_PIXEL,
        layout = ?config.source_layout,
        "counted channel intensities"
    );

    Ok(counts)
}

/// Rescale counts so the largest count across all channels becomes 255.
///
/// Every channel value is `floor(count * 255 / max_count)`. When every
/// count is zero the result is an all-zero histogram.
pub fn normalize(counts: &ChannelCounts) -> NormalizedHistogram {
    let max_count = counts.max_count();
    if max_count == 0 {
        tracing::debug!("all channel counts are zero, emitting empty histogram");
        return NormalizedHistogram::empty();
    }

    tracing::trace!(max_count, "normalizing histogram");

    NormalizedHistogram::from_fn(|bin| {
        PixelRecord::new(
            scale_count(counts.red[bin], max_count),
            scale_count(counts.green[bin], max_count),
            scale_count(counts.blue[bin], max_count),
        )
    })
}

/// Compute the normalized histogram of an RGBA buffer with default settings.
///
/// # Example
/// ```
/// use histoplot_core::{compute_histogram, RawPixelBuffer};
///
/// let pixels = [10, 20, 30, 255, 10, 20, 30, 255];
/// let hist = compute_histogram(&RawPixelBuffer::new(&pixels, 2, 1)).unwrap();
/// assert_eq!(hist.records()[10].r, 255);
/// ```
pub fn compute_histogram(
    buffer: &RawPixelBuffer<'_>,
) -> Result<NormalizedHistogram, HistogramError> {
    compute_histogram_with(buffer, &HistogramConfig::default())
}

/// Compute the normalized histogram using explicit settings.
pub fn compute_histogram_with(
    buffer: &RawPixelBuffer<'_>,
    config: &HistogramConfig,
) -> Result<NormalizedHistogram, HistogramError> {
    let counts = compute_channel_counts(buffer, config)?;
    Ok(normalize(&counts))
}

/// `floor(count * 255 / max)`, with `count <= max`.
#[inline]
fn scale_count(count: u64, max: u64) -> u8 {
    (count as u128 * 255 / max as u128) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Channel, SampleExtent, SourceLayout, BIN_COUNT};

    fn rgba(pixels: &[[u8; 4]]) -> Vec<u8> {
        pixels.iter().flatten().copied().collect()
    }

    #[test]
    fn test_two_pixel_scenario() {
        let pixels = rgba(&[[10, 20, 30, 255], [10, 20, 30, 255]]);
        let buffer = RawPixelBuffer::new(&pixels, 2, 1);

        let counts = compute_channel_counts(&buffer, &HistogramConfig::default()).unwrap();
        assert_eq!(counts.red[10], 2);
        assert_eq!(counts.green[20], 2);
        assert_eq!(counts.blue[30], 2);
        assert_eq!(counts.max_count(), 2);

        let hist = compute_histogram(&buffer).unwrap();
        assert_eq!(hist.records().len(), BIN_COUNT);
        for (bin, rec) in hist.records().iter().enumerate() {
            assert_eq!(rec.r, if bin == 10 { 255 } else { 0 }, "red bin {}", bin);
            assert_eq!(rec.g, if bin == 20 { 255 } else { 0 }, "green bin {}", bin);
            assert_eq!(rec.b, if bin == 30 { 255 } else { 0 }, "blue bin {}", bin);
            assert_eq!(rec.a, 255);
        }
    }

    #[test]
    fn test_fourth_byte_ignored() {
        let pixels = rgba(&[[1, 2, 3, 0], [1, 2, 3, 77], [1, 2, 3, 255]]);
        let counts =
            compute_channel_counts(&RawPixelBuffer::new(&pixels, 3, 1), &HistogramConfig::default())
                .unwrap();
        assert_eq!(counts.red[1], 3);
        assert_eq!(counts.red.iter().sum::<u64>(), 3);
        assert_eq!(counts.red[0], 0);
        assert_eq!(counts.red[255], 0);
    }

    #[test]
    fn test_zero_width_rejected() {
        let pixels = vec![0u8; 16];
        let result = compute_histogram(&RawPixelBuffer::new(&pixels, 0, 4));
        assert_eq!(
            result,
            Err(HistogramError::InvalidDimensions {
                width: 0,
                height: 4
            })
        );
    }

    #[test]
    fn test_zero_height_rejected() {
        let pixels = vec![0u8; 16];
        let result = compute_histogram(&RawPixelBuffer::new(&pixels, 4, 0));
        assert!(matches!(
            result,
            Err(HistogramError::InvalidDimensions { width: 4, height: 0 })
        ));
    }

    #[test]
    fn test_short_buffer_rejected() {
        let pixels = vec![0u8; 15];
        let result = compute_histogram(&RawPixelBuffer::new(&pixels, 2, 2));
        assert_eq!(
            result,
            Err(HistogramError::BufferTooSmall {
                expected: 16,
                actual: 15
            })
        );
    }

    #[test]
    fn test_empty_buffer_rejected() {
        let result = compute_histogram(&RawPixelBuffer::new(&[], 1, 1));
        assert!(matches!(
            result,
            Err(HistogramError::BufferTooSmall { expected: 4, actual: 0 })
        ));
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        // Row padding beyond width * height * 4 must not be counted
        let mut pixels = rgba(&[[5, 5, 5, 255]]);
        pixels.extend_from_slice(&[200, 200, 200, 255]);
        let counts =
            compute_channel_counts(&RawPixelBuffer::new(&pixels, 1, 1), &HistogramConfig::default())
                .unwrap();
        assert_eq!(counts.red[5], 1);
        assert_eq!(counts.red[200], 0);
    }

    #[test]
    fn test_bgra_layout() {
        let pixels = rgba(&[[30, 20, 10, 255]]);
        let config = HistogramConfig {
            source_layout: SourceLayout::Bgra,
            ..Default::default()
        };
        let hist = compute_histogram_with(&RawPixelBuffer::new(&pixels, 1, 1), &config).unwrap();
        assert_eq!(hist.records()[10].r, 255);
        assert_eq!(hist.records()[20].g, 255);
        assert_eq!(hist.records()[30].b, 255);
    }

    #[test]
    fn test_argb_layout() {
        let pixels = rgba(&[[255, 10, 20, 30]]);
        let config = HistogramConfig {
            source_layout: SourceLayout::Argb,
            ..Default::default()
        };
        let counts = compute_channel_counts(&RawPixelBuffer::new(&pixels, 1, 1), &config).unwrap();
        assert_eq!(counts.red[10], 1);
        assert_eq!(counts.green[20], 1);
        assert_eq!(counts.blue[30], 1);
        assert_eq!(counts.red[255], 0);
    }

    #[test]
    fn test_square_width_extent_on_wide_image() {
        // 2x1 image sampled as 2x2 needs 16 bytes
        let pixels = rgba(&[[10, 20, 30, 255], [10, 20, 30, 255]]);
        let config = HistogramConfig {
            sample_extent: SampleExtent::SquareWidth,
            ..Default::default()
        };
        let result = compute_histogram_with(&RawPixelBuffer::new(&pixels, 2, 1), &config);
        assert_eq!(
            result,
            Err(HistogramError::BufferTooSmall {
                expected: 16,
                actual: 8
            })
        );
    }

    #[test]
    fn test_square_width_extent_on_tall_image() {
        // 1x3 image sampled as 1x1 only sees the first pixel
        let pixels = rgba(&[[1, 1, 1, 255], [2, 2, 2, 255], [3, 3, 3, 255]]);
        let config = HistogramConfig {
            sample_extent: SampleExtent::SquareWidth,
            ..Default::default()
        };
        let counts = compute_channel_counts(&RawPixelBuffer::new(&pixels, 1, 3), &config).unwrap();
        assert_eq!(counts.red[1], 1);
        assert_eq!(counts.red[2], 0);
        assert_eq!(counts.red[3], 0);
    }

    #[test]
    fn test_normalize_all_zero_counts() {
        let hist = normalize(&ChannelCounts::new());
        assert_eq!(hist, NormalizedHistogram::empty());
        assert!(hist.is_all_zero());
    }

    #[test]
    fn test_normalize_truncates() {
        let mut counts = ChannelCounts::new();
        counts.red[0] = 3;
        counts.green[0] = 2;
        counts.blue[0] = 1;
        let hist = normalize(&counts);
        assert_eq!(hist.records()[0].r, 255);
        assert_eq!(hist.records()[0].g, 170);
        assert_eq!(hist.records()[0].b, 85);

        counts.red[0] = 7;
        let hist = normalize(&counts);
        // 2 * 255 / 7 = 72.86, 1 * 255 / 7 = 36.43
        assert_eq!(hist.records()[0].g, 72);
        assert_eq!(hist.records()[0].b, 36);
    }

    #[test]
    fn test_single_global_scale_factor() {
        // Channels share one maximum; green never reaches 255 here
        let pixels = rgba(&[
            [100, 50, 0, 255],
            [100, 60, 0, 255],
            [100, 70, 0, 255],
            [100, 80, 0, 255],
        ]);
        let hist = compute_histogram(&RawPixelBuffer::new(&pixels, 2, 2)).unwrap();
        assert_eq!(hist.records()[100].r, 255);
        assert_eq!(hist.records()[0].b, 255);
        assert_eq!(hist.records()[50].g, 63);
        assert_eq!(hist.channel_values(Channel::Green).max(), Some(63));
    }

    #[test]
    fn test_all_black_image() {
        let pixels = rgba(&[[0, 0, 0, 255]; 16]);
        let hist = compute_histogram(&RawPixelBuffer::new(&pixels, 4, 4)).unwrap();
        assert_eq!(hist.records()[0], PixelRecord::new(255, 255, 255));
        assert!(hist.records()[1..].iter().all(|r| *r == PixelRecord::default()));
    }

    #[test]
    fn test_gradient_image() {
        let pixels: Vec<u8> = (0..=255u8).flat_map(|v| [v, v, v, 255]).collect();
        let hist = compute_histogram(&RawPixelBuffer::new(&pixels, 256, 1)).unwrap();
        assert!(hist.records().iter().all(|r| *r == PixelRecord::gray(255)));
    }

    #[test]
    fn test_error_display() {
        let err = HistogramError::InvalidDimensions {
            width: 0,
            height: 3,
        };
        assert_eq!(
            err.to_string(),
            "Invalid dimensions: width (0) and height (3) must be non-zero"
        );

        let err = HistogramError::BufferTooSmall {
            expected: 16,
            actual: 4,
        };
        assert_eq!(
            err.to_string(),
            "Buffer too small: expected at least 16 bytes, got 4"
        );
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
