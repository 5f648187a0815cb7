use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Draws one variant uniformly and flattens it into the round's target.
pub fn select_target<R: Rng + ?Sized>(
    catalog: &Catalog,
    rng: &mut R,
) -> (usize, &'static AnimalVariant, TargetPattern) {
    let index = rng.random_range(0..catalog.len());
    let variant = &catalog.list()[index];
    (index, variant, TargetPattern::from_variant(variant))
}

/// Picks the decoy count for a round, uniformly within the configured bounds.
pub fn draw_decoy_count<R: Rng + ?Sized>(config: &RoundConfig, rng: &mut R) -> u8 {
    let low = config.min_decoys.min(config.max_decoys);
    let high = config.min_decoys.max(config.max_decoys);
    rng.random_range(low..=high)
}

/// Builds the shuffled pool: one tile per target color plus `decoy_count` colors sampled from the other variants.
///
/// Decoys are not deduplicated against the target, a decoy may well have the same color as a required tile.
pub fn build_pool<R: Rng + ?Sized>(
    target: &TargetPattern,
    catalog: &Catalog,
    chosen: usize,
    decoy_count: u8,
    ids: &mut TileIdAllocator,
    rng: &mut R,
) -> Vec<Tile> {
    let mut colors: Vec<Color> = target.colors().collect();

    let others: Vec<_> = catalog.others(chosen).collect();
    if others.is_empty() && decoy_count > 0 {
        log::warn!(
            "No other variants to draw decoys from, skipping {} decoys",
            decoy_count
        );
    } else {
        for _ in 0..decoy_count {
            let Some(source) = others.choose(rng) else {
                break;
            };
            let row = rng.random_range(0..GRID_SIDE);
            let col = rng.random_range(0..GRID_SIDE);
            colors.push(source.color_at((row, col)));
        }
    }

    colors.shuffle(rng);
    colors.into_iter().map(|color| ids.tile(color)).collect()
}

/// Generation strategy that is purely random, driven by a seeded small rng.
#[derive(Clone, Debug)]
pub struct RandomRoundGenerator {
    rng: SmallRng,
}

impl RandomRoundGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl RoundGenerator for RandomRoundGenerator {
    fn generate(
        &mut self,
        catalog: &Catalog,
        config: &RoundConfig,
        ids: &mut TileIdAllocator,
    ) -> RoundSetup {
        let (variant_index, variant, target) = select_target(catalog, &mut self.rng);
        let decoy_count = draw_decoy_count(config, &mut self.rng);
        let pool = build_pool(
            &target,
            catalog,
            variant_index,
            decoy_count,
            ids,
            &mut self.rng,
        );
        let decoy_count = (pool.len() - target.colors().count())
            .try_into()
            .unwrap_or(u8::MAX);

        log::debug!(
            "generated round: {} with {} tiles ({} decoys)",
            variant.key,
            pool.len(),
            decoy_count
        );
        RoundSetup {
            variant_index,
            variant,
            target,
            pool,
            decoy_count,
        }
    }
}
