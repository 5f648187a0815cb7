#![no_std]

extern crate alloc;

use core::time::Duration;
use serde::{Deserialize, Serialize};

pub use catalog::*;
pub use color::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use pattern::*;
pub use session::*;
pub use tile::*;
pub use types::*;

mod catalog;
mod color;
mod engine;
mod error;
mod generator;
mod pattern;
mod session;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundConfig {
    pub min_decoys: u8,
    pub max_decoys: u8,
    pub score_award: u32,
    pub celebration_delay: Duration,
}

impl RoundConfig {
    pub const DEFAULT_MIN_DECOYS: u8 = 3;
    pub const DEFAULT_MAX_DECOYS: u8 = 5;
    pub const DEFAULT_SCORE_AWARD: u32 = 100;
    pub const DEFAULT_CELEBRATION_DELAY: Duration = Duration::from_secs(5);

    pub const fn new_unchecked(
        min_decoys: u8,
        max_decoys: u8,
        score_award: u32,
        celebration_delay: Duration,
    ) -> Self {
        Self {
            min_decoys,
            max_decoys,
            score_award,
            celebration_delay,
        }
    }

    /// Builds a config, swapping the decoy bounds if they are given in the wrong order.
    pub fn new(
        (min_decoys, max_decoys): (u8, u8),
        score_award: u32,
        celebration_delay: Duration,
    ) -> Self {
        let (min_decoys, max_decoys) = if min_decoys <= max_decoys {
            (min_decoys, max_decoys)
        } else {
            (max_decoys, min_decoys)
        };
        Self::new_unchecked(min_decoys, max_decoys, score_award, celebration_delay)
    }

    pub const fn with_celebration_delay(self, celebration_delay: Duration) -> Self {
        Self {
            celebration_delay,
            ..self
        }
    }
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self::new_unchecked(
            Self::DEFAULT_MIN_DECOYS,
            Self::DEFAULT_MAX_DECOYS,
            Self::DEFAULT_SCORE_AWARD,
            Self::DEFAULT_CELEBRATION_DELAY,
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaceOutcome {
    Placed,
    Completed,
}

impl PlaceOutcome {
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_the_classic_game() {
        let config = RoundConfig::default();
        assert_eq!((config.min_decoys, config.max_decoys), (3, 5));
        assert_eq!(config.score_award, 100);
        assert_eq!(config.celebration_delay, Duration::from_secs(5));
    }

    #[test]
    fn config_orders_decoy_bounds() {
        let config = RoundConfig::new((6, 2), 50, Duration::from_millis(10));
        assert_eq!((config.min_decoys, config.max_decoys), (2, 6));
    }
}
