use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Placement state for one round: the goal, the board and the tiles still available.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacementEngine {
    target: TargetPattern,
    board: Board,
    pool: Vec<Tile>,
}

impl PlacementEngine {
    pub fn new(target: TargetPattern, pool: Vec<Tile>) -> Self {
        Self {
            target,
            board: Board::empty(),
            pool,
        }
    }

    pub fn target(&self) -> &TargetPattern {
        &self.target
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn pool(&self) -> &[Tile] {
        &self.pool
    }

    pub fn pool_tile(&self, id: TileId) -> Option<&Tile> {
        self.pool.iter().find(|tile| tile.id == id)
    }

    pub fn slot_at(&self, index: SlotIndex) -> Option<Color> {
        self.board.at(index)
    }

    /// Placed plus available tiles, constant for the whole round.
    pub fn tile_count(&self) -> usize {
        self.board.occupied_count() + self.pool.len()
    }

    pub fn is_complete(&self) -> bool {
        is_complete(&self.board, &self.target)
    }

    /// Moves a pool tile onto an empty slot.
    ///
    /// Only the tile's color is kept on the board, its id is gone once placed.
    pub fn place(&mut self, tile_id: TileId, index: SlotIndex) -> Result<PlaceOutcome> {
        let index = validate_slot(index)?;

        if self.board.is_occupied(index) {
            return Err(GameError::SlotOccupied);
        }

        let position = self
            .pool
            .iter()
            .position(|tile| tile.id == tile_id)
            .ok_or(GameError::TileNotFound)?;
        let tile = self.pool.remove(position);
        self.board.set(index, tile.color);

        Ok(if self.is_complete() {
            PlaceOutcome::Completed
        } else {
            PlaceOutcome::Placed
        })
    }

    /// Clears a slot and returns its color to the pool as a freshly minted tile.
    pub fn remove(&mut self, index: SlotIndex, ids: &mut TileIdAllocator) -> Result<Tile> {
        let index = validate_slot(index)?;
        let color = self
            .board
            .take(index)
            .ok_or(GameError::EmptySlotRemoval)?;
        let tile = ids.tile(color);
        self.pool.push(tile);
        Ok(tile)
    }
}

fn validate_slot(index: SlotIndex) -> Result<SlotIndex> {
    if is_valid_slot(index) {
        Ok(index)
    } else {
        Err(GameError::InvalidSlot)
    }
}
