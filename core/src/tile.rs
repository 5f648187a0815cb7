use core::fmt;
use core::num::ParseIntError;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::Color;

/// Identifier of a pool tile, never reused within a session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(u32);

impl TileId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for TileId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub color: Color,
}

/// Monotonic source of tile ids.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileIdAllocator {
    next: u32,
}

impl TileIdAllocator {
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    pub fn mint(&mut self) -> TileId {
        let id = TileId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }

    pub fn tile(&mut self, color: Color) -> Tile {
        Tile {
            id: self.mint(),
            color,
        }
    }
}
