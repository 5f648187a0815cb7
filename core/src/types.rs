/// Single coordinate axis used for grid rows and columns.
pub type Coord = u8;

/// Position of a slot in the flattened, row-major grid.
pub type SlotIndex = u8;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Width and height of the puzzle grid.
pub const GRID_SIDE: Coord = 4;

/// Total number of slots on the grid.
pub const SLOT_COUNT: SlotIndex = GRID_SIDE * GRID_SIDE;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

impl ToNdIndex for SlotIndex {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        slot_coords(self).to_nd_index()
    }
}

pub const fn slot_coords(index: SlotIndex) -> Coord2 {
    (index / GRID_SIDE, index % GRID_SIDE)
}

pub const fn slot_index((row, col): Coord2) -> SlotIndex {
    row * GRID_SIDE + col
}

pub const fn is_valid_slot(index: SlotIndex) -> bool {
    index < SLOT_COUNT
}

/// Iterates every slot index in row-major order.
pub fn iter_slots() -> impl Iterator<Item = SlotIndex> + use<> {
    0..SLOT_COUNT
}
