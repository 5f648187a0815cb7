use alloc::vec::Vec;

use crate::*;
pub use random::*;

mod random;

/// Everything a new round starts from.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundSetup {
    pub variant_index: usize,
    pub variant: &'static AnimalVariant,
    pub target: TargetPattern,
    pub pool: Vec<Tile>,
    pub decoy_count: u8,
}

pub trait RoundGenerator {
    fn generate(
        &mut self,
        catalog: &Catalog,
        config: &RoundConfig,
        ids: &mut TileIdAllocator,
    ) -> RoundSetup;
}
