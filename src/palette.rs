extern crate alloc;
use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use crate::swatch::Swatch;
use crate::target::Target;

/// The generated palette: the full swatch list, the dominant swatch, and one
/// selected swatch (or none) per target.
///
/// Selection happens once, at construction. The used-color bookkeeping that
/// enforces target exclusivity is local to that pass and never stored.
#[derive(Debug, Clone)]
pub struct Palette {
    swatches: Vec<Swatch>,
    targets: Vec<Target>,
    selected: Vec<Option<Swatch>>,
    dominant: Option<Swatch>,
}

impl Palette {
    /// Score `swatches` against `targets`, in target order.
    pub(crate) fn generate(swatches: Vec<Swatch>, targets: Vec<Target>) -> Self {
        let dominant = find_dominant(&swatches);
        let selected = select_for_targets(&swatches, &targets, dominant.as_ref());
        Self {
            swatches,
            targets,
            selected,
            dominant,
        }
    }

    /// Build a palette from a pre-generated swatch list, skipping
    /// quantization. Useful for tests or for resurrecting a palette.
    pub fn from_swatches(swatches: Vec<Swatch>, targets: Vec<Target>) -> Self {
        Self::generate(swatches, targets)
    }

    /// All swatches that make up the palette.
    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    /// The targets used to generate this palette, in processing order.
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// The swatch with the greatest pixel population, independent of any
    /// target. Absent only when the swatch list is empty.
    pub fn dominant_swatch(&self) -> Option<&Swatch> {
        self.dominant.as_ref()
    }

    /// The dominant swatch's color, or `default` if there is none.
    pub fn dominant_color(&self, default: u32) -> u32 {
        self.dominant.as_ref().map_or(default, Swatch::argb)
    }

    /// The swatch selected for `target`, if the target was part of this
    /// palette's generation and an eligible swatch existed.
    pub fn swatch_for_target(&self, target: &Target) -> Option<&Swatch> {
        self.targets
            .iter()
            .position(|t| t == target)
            .and_then(|i| self.selected[i].as_ref())
    }

    /// The color selected for `target`, or `default` if none was.
    pub fn color_for_target(&self, target: &Target, default: u32) -> u32 {
        self.swatch_for_target(target).map_or(default, Swatch::argb)
    }

    pub fn vibrant_swatch(&self) -> Option<&Swatch> {
        self.swatch_for_target(&Target::VIBRANT)
    }

    pub fn light_vibrant_swatch(&self) -> Option<&Swatch> {
        self.swatch_for_target(&Target::LIGHT_VIBRANT)
    }

    pub fn dark_vibrant_swatch(&self) -> Option<&Swatch> {
        self.swatch_for_target(&Target::DARK_VIBRANT)
    }

    pub fn muted_swatch(&self) -> Option<&Swatch> {
        self.swatch_for_target(&Target::MUTED)
    }

    pub fn light_muted_swatch(&self) -> Option<&Swatch> {
        self.swatch_for_target(&Target::LIGHT_MUTED)
    }

    pub fn dark_muted_swatch(&self) -> Option<&Swatch> {
        self.swatch_for_target(&Target::DARK_MUTED)
    }
}

fn find_dominant(swatches: &[Swatch]) -> Option<Swatch> {
    let mut best: Option<&Swatch> = None;
    for swatch in swatches {
        if best.map_or(true, |b| swatch.population() > b.population()) {
            best = Some(swatch);
        }
    }
    best.copied()
}

/// One selection per target, in order. Colors claimed by exclusive targets
/// accumulate in a set scoped to this pass only.
fn select_for_targets(
    swatches: &[Swatch],
    targets: &[Target],
    dominant: Option<&Swatch>,
) -> Vec<Option<Swatch>> {
    let mut used_colors: BTreeSet<u32> = BTreeSet::new();

    targets
        .iter()
        .map(|target| {
            let pick = max_scored_swatch(swatches, target, dominant, &used_colors);
            if let Some(swatch) = pick {
                if target.exclusive {
                    used_colors.insert(swatch.argb());
                }
            }
            pick.copied()
        })
        .collect()
}

fn max_scored_swatch<'a>(
    swatches: &'a [Swatch],
    target: &Target,
    dominant: Option<&Swatch>,
    used_colors: &BTreeSet<u32>,
) -> Option<&'a Swatch> {
    let weights = target.normalized_weights();
    let max_population = dominant.map_or(1, Swatch::population);

    let mut best: Option<(&Swatch, f32)> = None;
    for swatch in swatches {
        if !target.contains(swatch.saturation(), swatch.lightness())
            || used_colors.contains(&swatch.argb())
        {
            continue;
        }
        let score = score(swatch, target, weights, max_population);
        // Strictly greater, so the first swatch encountered wins ties.
        if best.map_or(true, |(_, max)| score > max) {
            best = Some((swatch, score));
        }
    }
    best.map(|(swatch, _)| swatch)
}

fn score(swatch: &Swatch, target: &Target, weights: [f32; 3], max_population: u32) -> f32 {
    let [saturation_weight, lightness_weight, population_weight] = weights;
    let mut total = 0.0;

    if saturation_weight > 0.0 {
        total += saturation_weight
            * (1.0 - (swatch.saturation() - target.target_saturation).abs());
    }
    if lightness_weight > 0.0 {
        total +=
            lightness_weight * (1.0 - (swatch.lightness() - target.target_lightness).abs());
    }
    if population_weight > 0.0 {
        total += population_weight * (swatch.population() as f32 / max_population as f32);
    }

    total
}
