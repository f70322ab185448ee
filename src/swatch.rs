use crate::color;
use crate::contrast::{self, TextColors};

/// A representative color plus the pixel population it stands in for.
///
/// Immutable once constructed; the HSL triple is derived from the RGB value
/// at construction time. Equality considers only the color and population.
#[derive(Debug, Clone, Copy)]
pub struct Swatch {
    rgb: rgb::RGB<u8>,
    population: u32,
    hsl: [f32; 3],
}

impl Swatch {
    /// Create a swatch for a known color and population.
    pub fn new(rgb: rgb::RGB<u8>, population: u32) -> Self {
        Self {
            rgb,
            population,
            hsl: color::rgb_to_hsl(rgb),
        }
    }

    /// Create a swatch from a packed ARGB color (alpha ignored).
    pub fn from_argb(argb: u32, population: u32) -> Self {
        Self::new(
            rgb::RGB {
                r: color::red(argb),
                g: color::green(argb),
                b: color::blue(argb),
            },
            population,
        )
    }

    /// This swatch's RGB color.
    pub fn rgb(&self) -> rgb::RGB<u8> {
        self.rgb
    }

    /// This swatch's color as an opaque packed ARGB word.
    pub fn argb(&self) -> u32 {
        color::pack_rgb(self.rgb)
    }

    /// The number of pixels this swatch represents.
    pub fn population(&self) -> u32 {
        self.population
    }

    /// `[hue, saturation, lightness]` of this swatch's color. Hue is in
    /// `[0, 360)` degrees, the rest in `[0, 1]`.
    pub fn hsl(&self) -> [f32; 3] {
        self.hsl
    }

    pub fn saturation(&self) -> f32 {
        self.hsl[1]
    }

    pub fn lightness(&self) -> f32 {
        self.hsl[2]
    }

    /// A color for title text displayed over this swatch, packed ARGB with
    /// resolved alpha. Guaranteed to meet the title contrast ratio whenever
    /// any white or black overlay can.
    pub fn title_text_color(&self) -> u32 {
        self.text_colors().title
    }

    /// A color for body text displayed over this swatch, packed ARGB with
    /// resolved alpha.
    pub fn body_text_color(&self) -> u32 {
        self.text_colors().body
    }

    /// Resolve both overlay text colors at once.
    pub fn text_colors(&self) -> TextColors {
        contrast::text_colors(self.argb())
    }
}

impl PartialEq for Swatch {
    fn eq(&self, other: &Self) -> bool {
        self.rgb == other.rgb && self.population == other.population
    }
}

impl Eq for Swatch {}
