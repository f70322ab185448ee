#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod color;
pub mod contrast;
pub mod error;
pub mod filter;
pub mod palette;
pub mod swatch;
pub mod target;

mod color_cut;
mod histogram;

pub use error::PaletteError;
pub use filter::{DefaultFilter, Filter};
pub use palette::Palette;
pub use swatch::Swatch;
pub use target::Target;

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

/// Default cap on the number of swatches generated from an image.
pub const DEFAULT_MAX_COLORS: u32 = 16;

/// Default pixel-area ceiling for [`ResizePolicy::Area`].
pub const DEFAULT_RESIZE_AREA: u32 = 112 * 112;

/// How to shrink an image before palette extraction.
///
/// Extraction quality degrades little below roughly 100x100 pixels while the
/// histogram pass gets much cheaper, so callers decoding their own bitmaps
/// can use [`scaled_dimensions`] to pick a downscale size up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizePolicy {
    /// Scale down until the total pixel count is at most this many.
    Area(u32),
    /// Scale down until neither dimension exceeds this many pixels.
    MaxDimension(u32),
    /// Use the image as-is.
    Disabled,
}

impl Default for ResizePolicy {
    fn default() -> Self {
        Self::Area(DEFAULT_RESIZE_AREA)
    }
}

/// The dimensions an image should be resampled to under `policy`.
///
/// Aspect ratio is preserved and images already within bounds come back
/// unchanged. Both returned dimensions are at least 1. Requires the `std`
/// feature for the scaling math.
#[cfg(feature = "std")]
pub fn scaled_dimensions(width: usize, height: usize, policy: ResizePolicy) -> (usize, usize) {
    let ratio = match policy {
        ResizePolicy::Area(max_area) => {
            let area = width as u64 * height as u64;
            if area <= max_area as u64 {
                return (width, height);
            }
            (max_area as f64 / area as f64).sqrt()
        }
        ResizePolicy::MaxDimension(max_dimension) => {
            let largest = width.max(height);
            if largest <= max_dimension as usize {
                return (width, height);
            }
            max_dimension as f64 / largest as f64
        }
        ResizePolicy::Disabled => return (width, height),
    };

    let scale = |d: usize| ((d as f64 * ratio).ceil() as usize).max(1);
    (scale(width), scale(height))
}

/// Configuration for palette extraction.
pub struct PaletteConfig {
    /// Maximum number of swatches to generate (at least 1).
    pub max_colors: u32,
    /// Targets to select swatches for, in priority order.
    pub targets: Vec<Target>,
    /// Filters applied to candidate colors. An empty list allows everything.
    pub filters: Vec<Box<dyn Filter>>,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            max_colors: DEFAULT_MAX_COLORS,
            targets: vec![
                Target::LIGHT_VIBRANT,
                Target::VIBRANT,
                Target::DARK_VIBRANT,
                Target::LIGHT_MUTED,
                Target::MUTED,
                Target::DARK_MUTED,
            ],
            filters: vec![Box::new(DefaultFilter)],
        }
    }
}

impl PaletteConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_colors(mut self, n: u32) -> Self {
        self.max_colors = n;
        self
    }

    pub fn add_target(mut self, target: Target) -> Self {
        self.targets.push(target);
        self
    }

    pub fn clear_targets(mut self) -> Self {
        self.targets.clear();
        self
    }

    pub fn add_filter(mut self, filter: Box<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn clear_filters(mut self) -> Self {
        self.filters.clear();
        self
    }
}

impl fmt::Debug for PaletteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaletteConfig")
            .field("max_colors", &self.max_colors)
            .field("targets", &self.targets)
            .field("filters", &self.filters.len())
            .finish()
    }
}

/// Extract a palette from an RGBA pixel buffer.
///
/// Alpha is carried in the input but does not affect bucketing. The pipeline
/// is fully deterministic: the same buffer and configuration always produce
/// bit-identical swatches and selections.
pub fn extract_palette(
    pixels: &[rgb::RGBA<u8>],
    width: usize,
    height: usize,
    config: &PaletteConfig,
) -> Result<Palette, PaletteError> {
    validate_inputs(pixels.len(), width, height, config)?;

    // 1. Bucket pixels at reduced bit depth, pruning filtered colors
    let hist = histogram::build_histogram(pixels, &config.filters);

    // 2. Median cut down to the requested swatch count
    let swatches = color_cut::quantize(hist, config.max_colors as usize, &config.filters);

    // 3. Score swatches against the configured targets
    Ok(Palette::generate(swatches, config.targets.clone()))
}

fn validate_inputs(
    pixel_count: usize,
    width: usize,
    height: usize,
    config: &PaletteConfig,
) -> Result<(), PaletteError> {
    if width == 0 || height == 0 {
        return Err(PaletteError::ZeroDimension);
    }
    if pixel_count != width * height {
        return Err(PaletteError::DimensionMismatch {
            len: pixel_count,
            width,
            height,
        });
    }
    if config.max_colors < 1 {
        return Err(PaletteError::InvalidMaxColors(config.max_colors));
    }
    Ok(())
}
