//! Color-cut quantization: repeatedly split the most populous box of
//! distinct reduced colors at the population-weighted median along its
//! widest channel.

extern crate alloc;
use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;

use crate::filter::{self, Filter};
use crate::histogram::{
    approximate_to_rgb888, quantized_blue, quantized_green, quantized_red, Histogram,
};
use crate::swatch::Swatch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
    Red,
    Green,
    Blue,
}

/// A box of distinct quantized colors under median-cut subdivision.
///
/// Owns its `(color, population)` entries; total population and per-channel
/// bounds are tight over the current entries and recomputed whenever a box
/// is created.
#[derive(Debug, Clone)]
struct ColorBox {
    colors: Vec<(u16, u32)>,
    population: u32,
    min_red: u16,
    max_red: u16,
    min_green: u16,
    max_green: u16,
    min_blue: u16,
    max_blue: u16,
}

impl ColorBox {
    fn new(colors: Vec<(u16, u32)>) -> Self {
        debug_assert!(!colors.is_empty());

        let mut population = 0u32;
        let mut min_red = u16::MAX;
        let mut max_red = 0;
        let mut min_green = u16::MAX;
        let mut max_green = 0;
        let mut min_blue = u16::MAX;
        let mut max_blue = 0;

        for &(c, pop) in &colors {
            population += pop;
            min_red = min_red.min(quantized_red(c));
            max_red = max_red.max(quantized_red(c));
            min_green = min_green.min(quantized_green(c));
            max_green = max_green.max(quantized_green(c));
            min_blue = min_blue.min(quantized_blue(c));
            max_blue = max_blue.max(quantized_blue(c));
        }

        Self {
            colors,
            population,
            min_red,
            max_red,
            min_green,
            max_green,
            min_blue,
            max_blue,
        }
    }

    fn can_split(&self) -> bool {
        self.colors.len() >= 2
    }

    /// The channel with the greatest numeric range. Ties resolve red, then
    /// green, then blue.
    fn widest_channel(&self) -> Channel {
        let red = self.max_red - self.min_red;
        let green = self.max_green - self.min_green;
        let blue = self.max_blue - self.min_blue;

        if red >= green && red >= blue {
            Channel::Red
        } else if green >= red && green >= blue {
            Channel::Green
        } else {
            Channel::Blue
        }
    }

    /// Split at the population-weighted median along the widest channel.
    ///
    /// The split point is where cumulative population first reaches half of
    /// the box's total, clamped so each child keeps at least one color.
    fn split(mut self) -> (ColorBox, ColorBox) {
        let channel = self.widest_channel();

        // Secondary key keeps the order fully deterministic when several
        // colors share a channel value.
        self.colors
            .sort_unstable_by_key(|&(c, _)| (component(c, channel), c));

        let half = self.population / 2;
        let mut accumulated = 0u32;
        let mut split_idx = self.colors.len() - 1;

        for (i, &(_, pop)) in self.colors.iter().enumerate() {
            accumulated += pop;
            if accumulated >= half {
                // Clamp so the right child keeps at least one color even
                // when the median lands on the last entry.
                split_idx = (i + 1).min(self.colors.len() - 1);
                break;
            }
        }

        let right = self.colors.split_off(split_idx);
        (ColorBox::new(self.colors), ColorBox::new(right))
    }

    /// The box's average color, weighted by each member's pixel population.
    fn average_swatch(&self) -> Swatch {
        let mut red_sum = 0u64;
        let mut green_sum = 0u64;
        let mut blue_sum = 0u64;

        for &(c, pop) in &self.colors {
            let pop = pop as u64;
            red_sum += quantized_red(c) as u64 * pop;
            green_sum += quantized_green(c) as u64 * pop;
            blue_sum += quantized_blue(c) as u64 * pop;
        }

        let total = self.population as f64;
        let mean = |sum: u64| (sum as f64 / total + 0.5) as u16;
        let quantized = crate::histogram::pack(mean(red_sum), mean(green_sum), mean(blue_sum));

        Swatch::new(approximate_to_rgb888(quantized), self.population)
    }
}

#[inline]
fn component(color: u16, channel: Channel) -> u16 {
    match channel {
        Channel::Red => quantized_red(color),
        Channel::Green => quantized_green(color),
        Channel::Blue => quantized_blue(color),
    }
}

/// Reduce a histogram to at most `max_colors` swatches.
///
/// When the histogram already holds no more distinct colors than requested,
/// each distinct color becomes its own swatch with no splitting. The filter
/// chain prunes the final averaged swatches, so fewer than `max_colors`
/// entries may come back.
pub(crate) fn quantize(
    histogram: Histogram,
    max_colors: usize,
    filters: &[Box<dyn Filter>],
) -> Vec<Swatch> {
    if histogram.is_empty() {
        return Vec::new();
    }

    let boxes = if histogram.len() <= max_colors {
        histogram
            .into_iter()
            .map(|entry| ColorBox::new(vec![entry]))
            .collect()
    } else {
        split_boxes(ColorBox::new(histogram), max_colors)
    };

    boxes
        .iter()
        .map(ColorBox::average_swatch)
        .filter(|swatch| filter::allowed_by_all(filters, swatch.rgb(), swatch.hsl()))
        .collect()
}

fn split_boxes(seed: ColorBox, max_colors: usize) -> Vec<ColorBox> {
    let mut boxes = Vec::with_capacity(max_colors);
    boxes.push(seed);

    while boxes.len() < max_colors {
        // Most populous splittable box; the first encountered wins ties.
        let mut best: Option<(usize, u32)> = None;
        for (i, b) in boxes.iter().enumerate() {
            if b.can_split() && best.map_or(true, |(_, pop)| b.population > pop) {
                best = Some((i, b.population));
            }
        }

        let Some((idx, _)) = best else {
            break;
        };

        let (left, right) = boxes.swap_remove(idx).split();
        boxes.push(left);
        boxes.push(right);
    }

    boxes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::histogram::{build_histogram, pack, quantize_component};

    fn px(r: u8, g: u8, b: u8) -> rgb::RGBA<u8> {
        rgb::RGBA { r, g, b, a: 255 }
    }

    fn entry(r: u8, g: u8, b: u8, pop: u32) -> (u16, u32) {
        (
            pack(
                quantize_component(r),
                quantize_component(g),
                quantize_component(b),
            ),
            pop,
        )
    }

    #[test]
    fn empty_histogram_yields_no_swatches() {
        assert!(quantize(Vec::new(), 16, &[]).is_empty());
    }

    #[test]
    fn fewer_distinct_colors_than_max_pass_through() {
        let hist = vec![entry(255, 0, 0, 30), entry(0, 0, 255, 70)];
        let swatches = quantize(hist, 16, &[]);
        assert_eq!(swatches.len(), 2);
        let total: u32 = swatches.iter().map(Swatch::population).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn caps_swatch_count_at_max_colors() {
        let pixels: Vec<_> = (0..100u32)
            .map(|i| px((i * 8 % 256) as u8, (i * 5 % 256) as u8, (i * 11 % 256) as u8))
            .collect();
        let hist = build_histogram(&pixels, &[]);
        assert!(hist.len() > 4);

        let swatches = quantize(hist, 4, &[]);
        assert!(swatches.len() <= 4);
        assert!(!swatches.is_empty());
    }

    #[test]
    fn populations_are_conserved_through_splitting() {
        let pixels: Vec<_> = (0..256u32)
            .map(|i| px(i as u8, (i * 7 % 256) as u8, (i * 13 % 256) as u8))
            .collect();
        let hist = build_histogram(&pixels, &[]);
        let swatches = quantize(hist, 8, &[]);

        let total: u32 = swatches.iter().map(Swatch::population).sum();
        assert_eq!(total as usize, pixels.len());
    }

    #[test]
    fn quantization_is_deterministic() {
        let pixels: Vec<_> = (0..500u32)
            .map(|i| px((i % 200) as u8, (i * 3 % 256) as u8, (i * 17 % 256) as u8))
            .collect();

        let a = quantize(build_histogram(&pixels, &[]), 6, &[]);
        let b = quantize(build_histogram(&pixels, &[]), 6, &[]);
        assert_eq!(a, b);
    }

    #[test]
    fn weighted_median_split_respects_population() {
        // One heavy color and many light ones: the heavy color should end
        // up isolated rather than averaged into its neighbors.
        let mut hist = vec![entry(0, 0, 0, 1000)];
        for i in 1..8u8 {
            hist.push(entry(i << 3, 0, 0, 1));
        }
        hist.sort_unstable_by_key(|&(c, _)| c);

        let swatches = quantize(hist, 2, &[]);
        assert_eq!(swatches.len(), 2);

        let heavy = swatches
            .iter()
            .max_by_key(|s| s.population())
            .expect("non-empty");
        assert_eq!(heavy.population(), 1000);
        assert_eq!(heavy.rgb(), rgb::RGB { r: 0, g: 0, b: 0 });
    }

    #[test]
    fn weighted_median_isolates_heavy_color_at_high_end() {
        // Heavy color at the top of the red channel: cumulative population
        // first reaches half at the last sorted color, which must still end
        // up alone in its own box.
        let hist = vec![entry(0, 0, 0, 1), entry(8, 0, 0, 1), entry(248, 0, 0, 100)];
        let swatches = quantize(hist, 2, &[]);
        assert_eq!(swatches.len(), 2);

        let mut pops: Vec<u32> = swatches.iter().map(Swatch::population).collect();
        pops.sort_unstable();
        assert_eq!(pops, vec![2, 100]);

        let heavy = swatches
            .iter()
            .max_by_key(|s| s.population())
            .expect("non-empty");
        assert_eq!(heavy.rgb(), rgb::RGB { r: 248, g: 0, b: 0 });
    }

    #[test]
    fn splits_along_widest_channel() {
        // Colors spread only along green; a single split must separate the
        // green extremes.
        let hist = vec![
            entry(128, 0, 64, 50),
            entry(128, 248, 64, 50),
            entry(128, 120, 64, 50),
        ];
        let swatches = quantize(hist, 2, &[]);
        assert_eq!(swatches.len(), 2);
        assert!(swatches.iter().all(|s| s.rgb().r == swatches[0].rgb().r));
        let greens: Vec<u8> = swatches.iter().map(|s| s.rgb().g).collect();
        assert_ne!(greens[0], greens[1]);
    }

    #[test]
    fn average_color_is_population_weighted() {
        // 3 parts dark red, 1 part bright red in one box.
        let hist = vec![entry(0, 0, 0, 3), entry(248, 0, 0, 1)];
        let swatches = quantize(hist, 1, &[]);
        assert_eq!(swatches.len(), 1);
        // Mean of quantized reds (0,0,0,31) is round(31/4) = 8 -> 64 in 888.
        assert_eq!(swatches[0].rgb(), rgb::RGB { r: 64, g: 0, b: 0 });
        assert_eq!(swatches[0].population(), 4);
    }

    #[test]
    fn final_filter_prunes_averaged_swatches() {
        let filters: Vec<Box<dyn Filter>> = vec![Box::new(crate::DefaultFilter)];
        // Two near-white colors whose average is still near-white.
        let hist = vec![entry(240, 240, 240, 5), entry(248, 248, 248, 5)];
        let swatches = quantize(hist, 1, &filters);
        assert!(swatches.is_empty());
    }
}
