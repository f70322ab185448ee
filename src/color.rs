//! Packed-ARGB channel math and RGB <-> HSL conversion.
//!
//! The rest of the crate treats colors either as `rgb::RGB<u8>` triples or as
//! packed 32-bit ARGB words (alpha in the top byte). This module is the seam
//! between the two, plus the hue/saturation/lightness derivation the filters
//! and targets score against.

/// Fully opaque white, packed ARGB.
pub const WHITE: u32 = 0xFFFF_FFFF;

/// Fully opaque black, packed ARGB.
pub const BLACK: u32 = 0xFF00_0000;

/// Alpha channel of a packed ARGB color.
#[inline]
pub const fn alpha(color: u32) -> u8 {
    (color >> 24) as u8
}

/// Red channel of a packed ARGB color.
#[inline]
pub const fn red(color: u32) -> u8 {
    (color >> 16) as u8
}

/// Green channel of a packed ARGB color.
#[inline]
pub const fn green(color: u32) -> u8 {
    (color >> 8) as u8
}

/// Blue channel of a packed ARGB color.
#[inline]
pub const fn blue(color: u32) -> u8 {
    color as u8
}

/// Pack ARGB channels into a 32-bit word.
#[inline]
pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Pack an opaque RGB triple into a 32-bit ARGB word.
#[inline]
pub const fn pack_rgb(rgb: rgb::RGB<u8>) -> u32 {
    argb(0xFF, rgb.r, rgb.g, rgb.b)
}

/// Replace the alpha channel of a packed ARGB color.
#[inline]
pub const fn with_alpha(color: u32, alpha: u8) -> u32 {
    (color & 0x00FF_FFFF) | (alpha as u32) << 24
}

/// Convert an RGB triple to HSL.
///
/// Returns `[hue, saturation, lightness]` with hue in `[0, 360)` degrees and
/// saturation/lightness in `[0, 1]`.
pub fn rgb_to_hsl(rgb: rgb::RGB<u8>) -> [f32; 3] {
    let rf = rgb.r as f32 / 255.0;
    let gf = rgb.g as f32 / 255.0;
    let bf = rgb.b as f32 / 255.0;

    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let l = (max + min) / 2.0;
    let (h, s) = if delta == 0.0 {
        // Monochromatic
        (0.0, 0.0)
    } else {
        let h = if max == rf {
            ((gf - bf) / delta) % 6.0
        } else if max == gf {
            (bf - rf) / delta + 2.0
        } else {
            (rf - gf) / delta + 4.0
        };
        let s = delta / (1.0 - (2.0 * l - 1.0).abs());
        (h, s)
    };

    let mut h = (h * 60.0) % 360.0;
    if h < 0.0 {
        h += 360.0;
    }

    [h.clamp(0.0, 360.0), s.clamp(0.0, 1.0), l.clamp(0.0, 1.0)]
}

/// Convert HSL components back to an RGB triple.
///
/// Out-of-range components are pinned to their valid ranges.
pub fn hsl_to_rgb(hsl: [f32; 3]) -> rgb::RGB<u8> {
    let [h, s, l] = hsl;

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let m = l - 0.5 * c;
    let x = c * (1.0 - ((h / 60.0 % 2.0) - 1.0).abs());

    let (r, g, b) = match (h / 60.0) as u32 {
        0 => (c + m, x + m, m),
        1 => (x + m, c + m, m),
        2 => (m, c + m, x + m),
        3 => (m, x + m, c + m),
        4 => (x + m, m, c + m),
        _ => (c + m, m, x + m),
    };

    // Float-to-int casts saturate, pinning out-of-range components.
    rgb::RGB {
        r: (255.0 * r + 0.5) as u8,
        g: (255.0 * g + 0.5) as u8,
        b: (255.0 * b + 0.5) as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(r: u8, g: u8, b: u8) -> rgb::RGB<u8> {
        rgb::RGB { r, g, b }
    }

    #[test]
    fn channel_extraction() {
        let color = argb(0x12, 0x34, 0x56, 0x78);
        assert_eq!(alpha(color), 0x12);
        assert_eq!(red(color), 0x34);
        assert_eq!(green(color), 0x56);
        assert_eq!(blue(color), 0x78);
    }

    #[test]
    fn with_alpha_preserves_rgb() {
        let color = with_alpha(WHITE, 0x80);
        assert_eq!(alpha(color), 0x80);
        assert_eq!(red(color), 0xFF);
        assert_eq!(green(color), 0xFF);
        assert_eq!(blue(color), 0xFF);
    }

    #[test]
    fn pure_red_hsl() {
        let [h, s, l] = rgb_to_hsl(rgb(255, 0, 0));
        assert!(h.abs() < 0.001);
        assert!((s - 1.0).abs() < 0.001);
        assert!((l - 0.5).abs() < 0.001);
    }

    #[test]
    fn black_and_white_hsl() {
        let [_, s, l] = rgb_to_hsl(rgb(0, 0, 0));
        assert_eq!(s, 0.0);
        assert_eq!(l, 0.0);

        let [_, s, l] = rgb_to_hsl(rgb(255, 255, 255));
        assert_eq!(s, 0.0);
        assert_eq!(l, 1.0);
    }

    #[test]
    fn gray_is_monochromatic() {
        let [h, s, l] = rgb_to_hsl(rgb(128, 128, 128));
        assert_eq!(h, 0.0);
        assert_eq!(s, 0.0);
        assert!((l - 128.0 / 255.0).abs() < 0.01);
    }

    #[test]
    fn blue_hue_segment() {
        let [h, s, _] = rgb_to_hsl(rgb(0, 0, 255));
        assert!((h - 240.0).abs() < 0.5);
        assert!((s - 1.0).abs() < 0.001);
    }

    #[test]
    fn primary_roundtrips() {
        for color in [
            rgb(255, 0, 0),
            rgb(0, 255, 0),
            rgb(0, 0, 255),
            rgb(255, 255, 0),
            rgb(0, 255, 255),
        ] {
            let back = hsl_to_rgb(rgb_to_hsl(color));
            assert_eq!(back, color);
        }
    }

    #[test]
    fn arbitrary_roundtrip_is_close() {
        let color = rgb(180, 92, 40);
        let back = hsl_to_rgb(rgb_to_hsl(color));
        assert!((back.r as i16 - color.r as i16).unsigned_abs() <= 1);
        assert!((back.g as i16 - color.g as i16).unsigned_abs() <= 1);
        assert!((back.b as i16 - color.b as i16).unsigned_abs() <= 1);
    }
}
