//! Serialization of histogram records into flat pixel buffers.
//!
//! A [`NormalizedHistogram`] is laid out as a 256×1 image, one 4-byte record
//! per bin in bin order. The byte order within each record is chosen by
//! [`PackedLayout`]:
//!
//! | Layout | Byte 0 | Byte 1 | Byte 2 | Byte 3 |
//! |--------|--------|--------|--------|--------|
//! | `Argb` | alpha  | red    | green  | blue   |
//! | `Rgba` | red    | green  | blue   | alpha  |
//! | `Bgra` | blue   | green  | red    | alpha  |
//!
//! Alpha is always 255, so premultiplied and straight alpha consumers see
//! the same values.

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::{NormalizedHistogram, PixelRecord, BIN_COUNT};

/// Size of one packed record in bytes.
pub const PACKED_RECORD_SIZE: usize = 4;

/// Byte order of a packed histogram record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PackedLayout {
    /// Alpha first, then red, green, blue.
    #[default]
    Argb,
    /// Red, green, blue, then alpha.
    Rgba,
    /// Blue, green, red, then alpha.
    Bgra,
}

impl PackedLayout {
    /// Encode one record in this layout.
    #[inline]
    pub fn pack(self, record: &PixelRecord) -> [u8; PACKED_RECORD_SIZE] {
        let PixelRecord { a, r, g, b } = *record;
        match self {
            PackedLayout::Argb => [a, r, g, b],
            PackedLayout::Rgba => [r, g, b, a],
            PackedLayout::Bgra => [b, g, r, a],
        }
    }
}

/// Pack all 256 records into a flat buffer of `256 * 4` bytes.
pub fn pack_records(histogram: &NormalizedHistogram, layout: PackedLayout) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(BIN_COUNT * PACKED_RECORD_SIZE);
    for record in histogram.records() {
        bytes.extend_from_slice(&layout.pack(record));
    }
    bytes
}

/// Wrap the records into a 256×1 RGBA image.
pub fn to_rgba_image(histogram: &NormalizedHistogram) -> RgbaImage {
    RgbaImage::from_fn(BIN_COUNT as u32, 1, |x, _| {
        let record = histogram.records()[x as usize];
        Rgba(PackedLayout::Rgba.pack(&record))
    })
}

/// Read a 256×1 RGBA strip back into a histogram.
///
/// Returns `None` if the image is not exactly 256×1.
pub fn from_rgba_image(image: &RgbaImage) -> Option<NormalizedHistogram> {
    if image.dimensions() != (BIN_COUNT as u32, 1) {
        return None;
    }
    Some(NormalizedHistogram::from_fn(|bin| {
        let [r, g, b, a] = image.get_pixel(bin as u32, 0).0;
        PixelRecord { a, r, g, b }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_histogram() -> NormalizedHistogram {
        NormalizedHistogram::from_fn(|bin| match bin {
            0 => PixelRecord::new(10, 20, 30),
            255 => PixelRecord::new(255, 128, 1),
            _ => PixelRecord::default(),
        })
    }

    #[test]
    fn test_pack_layouts() {
        let rec = PixelRecord::new(1, 2, 3);
        assert_eq!(PackedLayout::Argb.pack(&rec), [255, 1, 2, 3]);
        assert_eq!(PackedLayout::Rgba.pack(&rec), [1, 2, 3, 255]);
        assert_eq!(PackedLayout::Bgra.pack(&rec), [3, 2, 1, 255]);
    }

    #[test]
    fn test_default_layout_is_alpha_first() {
        assert_eq!(PackedLayout::default(), PackedLayout::Argb);
    }

    #[test]
    fn test_pack_records_length_and_order() {
        let bytes = pack_records(&sample_histogram(), PackedLayout::Argb);
        assert_eq!(bytes.len(), 1024);
        assert_eq!(&bytes[0..4], &[255, 10, 20, 30]);
        assert_eq!(&bytes[4..8], &[255, 0, 0, 0]);
        assert_eq!(&bytes[1020..1024], &[255, 255, 128, 1]);
    }

    #[test]
    fn test_pack_records_bgra() {
        let bytes = pack_records(&sample_histogram(), PackedLayout::Bgra);
        assert_eq!(&bytes[0..4], &[30, 20, 10, 255]);
    }

    #[test]
    fn test_to_rgba_image() {
        let img = to_rgba_image(&sample_histogram());
        assert_eq!(img.dimensions(), (256, 1));
        assert_eq!(img.get_pixel(0, 0).0, [10, 20, 30, 255]);
        assert_eq!(img.get_pixel(255, 0).0, [255, 128, 1, 255]);
        assert_eq!(img.as_raw(), &pack_records(&sample_histogram(), PackedLayout::Rgba));
    }

    #[test]
    fn test_from_rgba_image() {
        let hist = sample_histogram();
        let strip = to_rgba_image(&hist);
        assert_eq!(from_rgba_image(&strip), Some(hist));
    }

    #[test]
    fn test_from_rgba_image_wrong_shape() {
        assert!(from_rgba_image(&RgbaImage::new(255, 1)).is_none());
        assert!(from_rgba_image(&RgbaImage::new(256, 2)).is_none());
    }
}
