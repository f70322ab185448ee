extern crate alloc;
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::color;
use crate::filter::{self, Filter};

/// Bits kept per channel when bucketing pixel colors. Caps the histogram at
/// 2^15 distinct entries regardless of input size.
pub(crate) const QUANTIZE_WORD_WIDTH: u32 = 5;

const QUANTIZE_WORD_MASK: u16 = (1 << QUANTIZE_WORD_WIDTH) - 1;

/// A population histogram over bit-reduced colors.
///
/// Entries are `(quantized color, pixel population)` in ascending color-key
/// order, which keeps every downstream step deterministic.
pub(crate) type Histogram = Vec<(u16, u32)>;

/// Quantize an 8-bit channel down to the histogram word width.
#[inline]
pub(crate) fn quantize_component(value: u8) -> u16 {
    (value >> (8 - QUANTIZE_WORD_WIDTH)) as u16
}

/// Pack three quantized channels into one histogram key.
#[inline]
pub(crate) fn pack(r: u16, g: u16, b: u16) -> u16 {
    r << (2 * QUANTIZE_WORD_WIDTH) | g << QUANTIZE_WORD_WIDTH | b
}

#[inline]
pub(crate) fn quantized_red(color: u16) -> u16 {
    (color >> (2 * QUANTIZE_WORD_WIDTH)) & QUANTIZE_WORD_MASK
}

#[inline]
pub(crate) fn quantized_green(color: u16) -> u16 {
    (color >> QUANTIZE_WORD_WIDTH) & QUANTIZE_WORD_MASK
}

#[inline]
pub(crate) fn quantized_blue(color: u16) -> u16 {
    color & QUANTIZE_WORD_MASK
}

/// Scale a quantized color back up to full-width RGB888.
pub(crate) fn approximate_to_rgb888(color: u16) -> rgb::RGB<u8> {
    let shift = 8 - QUANTIZE_WORD_WIDTH;
    rgb::RGB {
        r: (quantized_red(color) << shift) as u8,
        g: (quantized_green(color) << shift) as u8,
        b: (quantized_blue(color) << shift) as u8,
    }
}

/// Build the pruned color histogram for a pixel buffer.
///
/// Pixels are bucketed at the reduced bit depth; distinct colors rejected by
/// the filter chain are dropped along with their whole populations. Alpha is
/// carried in the input but does not affect bucketing.
pub(crate) fn build_histogram(pixels: &[rgb::RGBA<u8>], filters: &[Box<dyn Filter>]) -> Histogram {
    let mut buckets: BTreeMap<u16, u32> = BTreeMap::new();

    for pixel in pixels {
        let key = pack(
            quantize_component(pixel.r),
            quantize_component(pixel.g),
            quantize_component(pixel.b),
        );
        *buckets.entry(key).or_insert(0) += 1;
    }

    buckets
        .into_iter()
        .filter(|&(key, _)| {
            let rgb = approximate_to_rgb888(key);
            filter::allowed_by_all(filters, rgb, color::rgb_to_hsl(rgb))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn px(r: u8, g: u8, b: u8) -> rgb::RGBA<u8> {
        rgb::RGBA { r, g, b, a: 255 }
    }

    #[test]
    fn single_color_one_bucket() {
        let pixels = vec![px(128, 64, 32); 100];
        let hist = build_histogram(&pixels, &[]);
        assert_eq!(hist.len(), 1);
        assert_eq!(hist[0].1, 100);
    }

    #[test]
    fn distinct_colors_separate_buckets() {
        let pixels = vec![px(0, 0, 0), px(255, 255, 255), px(255, 0, 0)];
        let hist = build_histogram(&pixels, &[]);
        assert_eq!(hist.len(), 3);
    }

    #[test]
    fn nearby_colors_share_a_bucket() {
        // Same 5-bit bucket: 128 >> 3 == 135 >> 3
        let pixels = vec![px(128, 128, 128), px(135, 135, 135)];
        let hist = build_histogram(&pixels, &[]);
        assert_eq!(hist.len(), 1);
        assert_eq!(hist[0].1, 2);
    }

    #[test]
    fn population_is_conserved() {
        let pixels: Vec<_> = (0..=255u8).map(|v| px(v, v.wrapping_mul(3), 7)).collect();
        let hist = build_histogram(&pixels, &[]);
        let total: u32 = hist.iter().map(|&(_, pop)| pop).sum();
        assert_eq!(total as usize, pixels.len());
    }

    #[test]
    fn filtered_colors_drop_their_population() {
        let filters: Vec<Box<dyn crate::Filter>> = vec![Box::new(crate::DefaultFilter)];
        let pixels = vec![px(0, 0, 0); 10];
        let hist = build_histogram(&pixels, &filters);
        assert!(hist.is_empty());
    }

    #[test]
    fn approximation_reverses_quantization_of_high_bits() {
        let key = pack(
            quantize_component(248),
            quantize_component(0),
            quantize_component(96),
        );
        let rgb = approximate_to_rgb888(key);
        assert_eq!(rgb, rgb::RGB { r: 248, g: 0, b: 96 });
    }
}
