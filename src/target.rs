//! Scoring profiles for swatch selection.

const TARGET_DARK_LUMA: f32 = 0.26;
const MAX_DARK_LUMA: f32 = 0.45;

const MIN_LIGHT_LUMA: f32 = 0.55;
const TARGET_LIGHT_LUMA: f32 = 0.74;

const MIN_NORMAL_LUMA: f32 = 0.3;
const TARGET_NORMAL_LUMA: f32 = 0.5;
const MAX_NORMAL_LUMA: f32 = 0.7;

const TARGET_MUTED_SATURATION: f32 = 0.3;
const MAX_MUTED_SATURATION: f32 = 0.4;

const TARGET_VIBRANT_SATURATION: f32 = 1.0;
const MIN_VIBRANT_SATURATION: f32 = 0.35;

const WEIGHT_SATURATION: f32 = 0.24;
const WEIGHT_LIGHTNESS: f32 = 0.52;
const WEIGHT_POPULATION: f32 = 0.24;

/// A named scoring profile used to pick one best swatch from a palette.
///
/// A swatch is eligible for a target only when its saturation and lightness
/// both fall within the closed `[min, max]` bounds; among eligible swatches
/// the one with the highest weighted score wins. Targets are plain immutable
/// records; the six classic profiles are provided as associated constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub min_saturation: f32,
    pub target_saturation: f32,
    pub max_saturation: f32,
    pub min_lightness: f32,
    pub target_lightness: f32,
    pub max_lightness: f32,
    pub saturation_weight: f32,
    pub lightness_weight: f32,
    pub population_weight: f32,
    /// Whether a swatch selected for this target is withheld from targets
    /// processed later in the same generation pass.
    pub exclusive: bool,
}

const BASE: Target = Target {
    min_saturation: 0.0,
    target_saturation: 0.5,
    max_saturation: 1.0,
    min_lightness: 0.0,
    target_lightness: 0.5,
    max_lightness: 1.0,
    saturation_weight: WEIGHT_SATURATION,
    lightness_weight: WEIGHT_LIGHTNESS,
    population_weight: WEIGHT_POPULATION,
    exclusive: true,
};

impl Target {
    /// Saturated colors in the mid lightness band.
    pub const VIBRANT: Target = Target {
        min_saturation: MIN_VIBRANT_SATURATION,
        target_saturation: TARGET_VIBRANT_SATURATION,
        min_lightness: MIN_NORMAL_LUMA,
        target_lightness: TARGET_NORMAL_LUMA,
        max_lightness: MAX_NORMAL_LUMA,
        ..BASE
    };

    /// Saturated, light colors.
    pub const LIGHT_VIBRANT: Target = Target {
        min_saturation: MIN_VIBRANT_SATURATION,
        target_saturation: TARGET_VIBRANT_SATURATION,
        min_lightness: MIN_LIGHT_LUMA,
        target_lightness: TARGET_LIGHT_LUMA,
        ..BASE
    };

    /// Saturated, dark colors.
    pub const DARK_VIBRANT: Target = Target {
        min_saturation: MIN_VIBRANT_SATURATION,
        target_saturation: TARGET_VIBRANT_SATURATION,
        target_lightness: TARGET_DARK_LUMA,
        max_lightness: MAX_DARK_LUMA,
        ..BASE
    };

    /// Desaturated colors in the mid lightness band.
    pub const MUTED: Target = Target {
        target_saturation: TARGET_MUTED_SATURATION,
        max_saturation: MAX_MUTED_SATURATION,
        min_lightness: MIN_NORMAL_LUMA,
        target_lightness: TARGET_NORMAL_LUMA,
        max_lightness: MAX_NORMAL_LUMA,
        ..BASE
    };

    /// Desaturated, light colors.
    pub const LIGHT_MUTED: Target = Target {
        target_saturation: TARGET_MUTED_SATURATION,
        max_saturation: MAX_MUTED_SATURATION,
        min_lightness: MIN_LIGHT_LUMA,
        target_lightness: TARGET_LIGHT_LUMA,
        ..BASE
    };

    /// Desaturated, dark colors.
    pub const DARK_MUTED: Target = Target {
        target_saturation: TARGET_MUTED_SATURATION,
        max_saturation: MAX_MUTED_SATURATION,
        target_lightness: TARGET_DARK_LUMA,
        max_lightness: MAX_DARK_LUMA,
        ..BASE
    };

    /// The `[saturation, lightness, population]` weights scaled to sum to 1.
    ///
    /// Evaluated fresh each generation pass, so it is idempotent by
    /// construction. All-zero weights are left all-zero; scoring then
    /// degenerates to picking the first eligible swatch.
    pub fn normalized_weights(&self) -> [f32; 3] {
        let sum = self.saturation_weight + self.lightness_weight + self.population_weight;
        if sum <= 0.0 {
            return [0.0; 3];
        }
        [
            self.saturation_weight / sum,
            self.lightness_weight / sum,
            self.population_weight / sum,
        ]
    }

    /// Whether a swatch with this saturation and lightness is eligible.
    pub fn contains(&self, saturation: f32, lightness: f32) -> bool {
        saturation >= self.min_saturation
            && saturation <= self.max_saturation
            && lightness >= self.min_lightness
            && lightness <= self.max_lightness
    }
}

impl Default for Target {
    fn default() -> Self {
        BASE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_normalize_to_one() {
        let [s, l, p] = Target::VIBRANT.normalized_weights();
        assert!((s + l + p - 1.0).abs() < 1e-6);
        assert!((s - 0.24).abs() < 1e-6);
        assert!((l - 0.52).abs() < 1e-6);
    }

    #[test]
    fn normalization_is_idempotent_across_passes() {
        let target = Target::MUTED;
        assert_eq!(target.normalized_weights(), target.normalized_weights());
    }

    #[test]
    fn zero_weights_stay_zero() {
        let target = Target {
            saturation_weight: 0.0,
            lightness_weight: 0.0,
            population_weight: 0.0,
            ..Target::default()
        };
        assert_eq!(target.normalized_weights(), [0.0; 3]);
    }

    #[test]
    fn bounds_are_closed_intervals() {
        let vibrant = Target::VIBRANT;
        assert!(vibrant.contains(vibrant.min_saturation, vibrant.min_lightness));
        assert!(vibrant.contains(vibrant.max_saturation, vibrant.max_lightness));
        assert!(!vibrant.contains(vibrant.min_saturation - 0.01, 0.5));
        assert!(!vibrant.contains(0.5, vibrant.max_lightness + 0.01));
    }

    #[test]
    fn pure_red_fits_vibrant_not_muted() {
        // Saturation 1.0, lightness ~0.49
        assert!(Target::VIBRANT.contains(1.0, 0.49));
        assert!(!Target::MUTED.contains(1.0, 0.49));
        assert!(!Target::DARK_MUTED.contains(1.0, 0.49));
    }
}
