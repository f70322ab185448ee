extern crate alloc;
use alloc::boxed::Box;

/// Fine-grained control over which quantized colors may enter a palette.
///
/// Filters are pure predicates. When several are configured they compose as a
/// short-circuit AND, in the order they were added; an empty filter list
/// allows every color.
pub trait Filter {
    /// Whether `rgb` (with its precomputed `[hue, saturation, lightness]`
    /// triple) is allowed in the palette.
    fn is_allowed(&self, rgb: rgb::RGB<u8>, hsl: [f32; 3]) -> bool;
}

/// The built-in filter: rejects near-black, near-white, and colors on the
/// red side of the I line (which tend to read as skin tones).
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFilter;

const BLACK_MAX_LIGHTNESS: f32 = 0.05;
const WHITE_MIN_LIGHTNESS: f32 = 0.95;

impl DefaultFilter {
    fn is_black(hsl: [f32; 3]) -> bool {
        hsl[2] <= BLACK_MAX_LIGHTNESS
    }

    fn is_white(hsl: [f32; 3]) -> bool {
        hsl[2] >= WHITE_MIN_LIGHTNESS
    }

    fn is_near_red_i_line(hsl: [f32; 3]) -> bool {
        hsl[0] >= 10.0 && hsl[0] <= 37.0 && hsl[1] <= 0.82
    }
}

impl Filter for DefaultFilter {
    fn is_allowed(&self, _rgb: rgb::RGB<u8>, hsl: [f32; 3]) -> bool {
        !Self::is_white(hsl) && !Self::is_black(hsl) && !Self::is_near_red_i_line(hsl)
    }
}

/// Apply the whole filter chain to one color.
pub(crate) fn allowed_by_all(filters: &[Box<dyn Filter>], rgb: rgb::RGB<u8>, hsl: [f32; 3]) -> bool {
    filters.iter().all(|f| f.is_allowed(rgb, hsl))
}
