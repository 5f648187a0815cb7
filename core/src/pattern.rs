use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

fn grid_shape() -> [usize; 2] {
    (GRID_SIDE, GRID_SIDE).to_nd_index()
}

/// The 16-slot goal of a round.
///
/// A slot may be undefined, in which case the matching board slot must stay empty for the round to count as complete.
/// Patterns built from the catalog always define every slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetPattern {
    slots: Array2<Option<Color>>,
}

impl TargetPattern {
    pub fn from_variant(variant: &AnimalVariant) -> Self {
        Self {
            slots: Array2::from_shape_fn(grid_shape(), |(row, col)| {
                Some(variant.colors[row][col])
            }),
        }
    }

    pub fn from_slots(slots: [Option<Color>; SLOT_COUNT as usize]) -> Self {
        Self {
            slots: Array2::from_shape_fn(grid_shape(), |(row, col)| {
                slots[row * usize::from(GRID_SIDE) + col]
            }),
        }
    }

    /// `None` for an undefined slot and for an index off the grid.
    pub fn at(&self, index: SlotIndex) -> Option<Color> {
        if !is_valid_slot(index) {
            return None;
        }
        self.slots[index.to_nd_index()]
    }

    /// Row-major view of the 16 target slots.
    pub fn iter(&self) -> impl Iterator<Item = Option<Color>> + '_ {
        self.slots.iter().copied()
    }

    /// Only the defined colors, in row-major order.
    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.iter().flatten()
    }
}

/// Mutable grid of placed colors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Option<Color>>,
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: Array2::from_elem(grid_shape(), None),
        }
    }

    pub fn at(&self, index: SlotIndex) -> Option<Color> {
        if !is_valid_slot(index) {
            return None;
        }
        self.cells[index.to_nd_index()]
    }

    pub fn is_occupied(&self, index: SlotIndex) -> bool {
        self.at(index).is_some()
    }

    pub(crate) fn set(&mut self, index: SlotIndex, color: Color) {
        self.cells[index.to_nd_index()] = Some(color);
    }

    pub(crate) fn take(&mut self, index: SlotIndex) -> Option<Color> {
        self.cells[index.to_nd_index()].take()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<Color>> + '_ {
        self.cells.iter().copied()
    }

    /// Checks the board against `target`, slot by slot, by color value.
    pub fn matches(&self, target: &TargetPattern) -> bool {
        self.iter()
            .zip(target.iter())
            .all(|(placed, wanted)| match wanted {
                Some(color) => placed == Some(color),
                None => placed.is_none(),
            })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Index<SlotIndex> for Board {
    type Output = Option<Color>;

    fn index(&self, index: SlotIndex) -> &Self::Output {
        &self.cells[index.to_nd_index()]
    }
}

pub fn is_complete(board: &Board, target: &TargetPattern) -> bool {
    board.matches(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(board: &mut Board, target: &TargetPattern) {
        for index in iter_slots() {
            if let Some(color) = target.at(index) {
                board.set(index, color);
            }
        }
    }

    #[test]
    fn target_flattens_variant_row_major() {
        let target = TargetPattern::from_variant(&CAT);
        let flat: alloc::vec::Vec<_> = target.colors().collect();
        let expected: alloc::vec::Vec<_> = CAT.iter_colors().collect();
        assert_eq!(flat, expected);
        assert_eq!(target.at(4), Some(Color::BLACK));
    }

    #[test]
    fn complete_only_when_every_slot_matches() {
        let target = TargetPattern::from_variant(&ELEPHANT);
        let mut board = Board::empty();
        assert!(!is_complete(&board, &target));

        fill(&mut board, &target);
        assert!(is_complete(&board, &target));

        for index in iter_slots() {
            let original = board.take(index).unwrap();
            assert!(!is_complete(&board, &target), "slot {index} left empty");

            let wrong = if original == Color::WHITE {
                Color::BLACK
            } else {
                Color::WHITE
            };
            board.set(index, wrong);
            assert!(!is_complete(&board, &target), "slot {index} has the wrong color");

            board.set(index, original);
            assert!(is_complete(&board, &target));
        }
    }

    #[test]
    fn off_grid_lookups_are_empty() {
        let target = TargetPattern::from_variant(&CAT);
        let mut board = Board::empty();
        fill(&mut board, &target);
        for index in [SLOT_COUNT, 17, u8::MAX] {
            assert_eq!(board.at(index), None);
            assert!(!board.is_occupied(index));
            assert_eq!(target.at(index), None);
        }
    }

    #[test]
    fn equal_colors_are_interchangeable() {
        // slots 0 and 3 share a color, which tile went where does not matter
        let target = TargetPattern::from_variant(&RABBIT);
        let mut board = Board::empty();
        fill(&mut board, &target);
        let color = board.take(3).unwrap();
        board.set(3, color);
        assert!(board.matches(&target));
    }

    #[test]
    fn undefined_target_slot_must_stay_empty() {
        let mut slots = [Some(Color::BLACK); SLOT_COUNT as usize];
        slots[7] = None;
        let target = TargetPattern::from_slots(slots);
        let mut board = Board::empty();
        fill(&mut board, &target);
        assert!(is_complete(&board, &target));

        board.set(7, Color::BLACK);
        assert!(!is_complete(&board, &target));
    }

    #[test]
    fn occupied_count_tracks_set_and_take() {
        let mut board = Board::empty();
        board.set(0, Color::WHITE);
        board.set(15, Color::BLACK);
        assert_eq!(board.occupied_count(), 2);
        assert_eq!(board.take(0), Some(Color::WHITE));
        assert_eq!(board.take(0), None);
        assert_eq!(board[15], Some(Color::BLACK));
        assert_eq!(board.occupied_count(), 1);
    }
}
