//! WCAG-style luminance contrast and minimum-alpha resolution for overlay
//! text colors.

use crate::color;

/// Minimum contrast ratio for large "title" text over a swatch.
pub const MIN_CONTRAST_TITLE_TEXT: f32 = 3.0;

/// Minimum contrast ratio for "body" text over a swatch.
pub const MIN_CONTRAST_BODY_TEXT: f32 = 4.5;

const MIN_ALPHA_SEARCH_MAX_ITERATIONS: u32 = 10;
const MIN_ALPHA_SEARCH_PRECISION: u32 = 1;

/// Relative luminance of a packed ARGB color (alpha ignored), in `[0, 1]`.
///
/// Channels are gamma-decoded to linear light and combined with the D65
/// Rec.709 weights; this is the Y component of the color's XYZ
/// representation.
pub fn luminance(color: u32) -> f32 {
    let r = linear_srgb::default::srgb_u8_to_linear(color::red(color));
    let g = linear_srgb::default::srgb_u8_to_linear(color::green(color));
    let b = linear_srgb::default::srgb_u8_to_linear(color::blue(color));
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

/// Composite a translucent foreground over a background, both packed ARGB.
pub fn composite_over(foreground: u32, background: u32) -> u32 {
    let bg_alpha = color::alpha(background) as u32;
    let fg_alpha = color::alpha(foreground) as u32;
    let a = composite_alpha(fg_alpha, bg_alpha);

    let r = composite_component(
        color::red(foreground) as u32,
        fg_alpha,
        color::red(background) as u32,
        bg_alpha,
        a,
    );
    let g = composite_component(
        color::green(foreground) as u32,
        fg_alpha,
        color::green(background) as u32,
        bg_alpha,
        a,
    );
    let b = composite_component(
        color::blue(foreground) as u32,
        fg_alpha,
        color::blue(background) as u32,
        bg_alpha,
        a,
    );

    color::argb(a as u8, r as u8, g as u8, b as u8)
}

fn composite_alpha(fg_alpha: u32, bg_alpha: u32) -> u32 {
    0xFF - ((0xFF - bg_alpha) * (0xFF - fg_alpha)) / 0xFF
}

fn composite_component(fg: u32, fg_alpha: u32, bg: u32, bg_alpha: u32, out_alpha: u32) -> u32 {
    if out_alpha == 0 {
        return 0;
    }
    (0xFF * fg * fg_alpha + bg * bg_alpha * (0xFF - fg_alpha)) / (out_alpha * 0xFF)
}

/// Contrast ratio between `foreground` and `background`, in `[1, 21]`.
///
/// The background's alpha channel is ignored and it is treated as opaque.
/// A translucent foreground is composited over it first.
pub fn contrast_ratio(foreground: u32, background: u32) -> f32 {
    let background = color::with_alpha(background, 255);

    let foreground = if color::alpha(foreground) < 255 {
        composite_over(foreground, background)
    } else {
        foreground
    };

    let l1 = luminance(foreground) + 0.05;
    let l2 = luminance(background) + 0.05;
    l1.max(l2) / l1.min(l2)
}

/// Minimum alpha for `foreground` over `background` (treated as opaque)
/// such that the composited contrast ratio is at least `min_contrast`.
///
/// Returns `None` when even a fully opaque foreground falls short. The
/// search is a bounded bisection; contrast is monotonic non-decreasing in
/// alpha, and the returned value is the passing upper end of the final
/// bracket.
pub fn min_alpha(foreground: u32, background: u32, min_contrast: f32) -> Option<u8> {
    if contrast_ratio(color::with_alpha(foreground, 255), background) < min_contrast {
        return None;
    }

    let mut min_alpha: u32 = 0;
    let mut max_alpha: u32 = 255;
    let mut iterations = 0;

    while iterations <= MIN_ALPHA_SEARCH_MAX_ITERATIONS
        && max_alpha - min_alpha > MIN_ALPHA_SEARCH_PRECISION
    {
        let test_alpha = (min_alpha + max_alpha) / 2;
        let ratio = contrast_ratio(color::with_alpha(foreground, test_alpha as u8), background);

        if ratio < min_contrast {
            min_alpha = test_alpha;
        } else {
            max_alpha = test_alpha;
        }
        iterations += 1;
    }

    Some(max_alpha as u8)
}

/// Overlay text colors resolved for one background, packed ARGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextColors {
    /// Color for title text (contrast ratio >= 3.0).
    pub title: u32,
    /// Color for body text (contrast ratio >= 4.5).
    pub body: u32,
}

/// Resolve title and body text colors over an opaque background.
///
/// Tries translucent white first, then translucent black. If neither base
/// color satisfies both thresholds on its own, the result mixes bases per
/// threshold — a documented mismatch, not an error.
pub fn text_colors(background: u32) -> TextColors {
    let light_body = min_alpha(color::WHITE, background, MIN_CONTRAST_BODY_TEXT);
    let light_title = min_alpha(color::WHITE, background, MIN_CONTRAST_TITLE_TEXT);

    if let (Some(body), Some(title)) = (light_body, light_title) {
        return TextColors {
            title: color::with_alpha(color::WHITE, title),
            body: color::with_alpha(color::WHITE, body),
        };
    }

    let dark_body = min_alpha(color::BLACK, background, MIN_CONTRAST_BODY_TEXT);
    let dark_title = min_alpha(color::BLACK, background, MIN_CONTRAST_TITLE_TEXT);

    if let (Some(body), Some(title)) = (dark_body, dark_title) {
        return TextColors {
            title: color::with_alpha(color::BLACK, title),
            body: color::with_alpha(color::BLACK, body),
        };
    }

    TextColors {
        title: mismatched(light_title, dark_title),
        body: mismatched(light_body, dark_body),
    }
}

fn mismatched(light: Option<u8>, dark: Option<u8>) -> u32 {
    match (light, dark) {
        (Some(alpha), _) => color::with_alpha(color::WHITE, alpha),
        (None, Some(alpha)) => color::with_alpha(color::BLACK, alpha),
        // Unreachable over an opaque background: opaque white or opaque
        // black always clears 4.5 against any such color.
        (None, None) => color::WHITE,
    }
}
