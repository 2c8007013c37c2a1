//! Ship definitions: placement extent, sunk state and dead zone.

use alloc::vec::Vec;
use core::fmt;

use crate::common::{BoardError, Coord};
use crate::config::MAX_SHIP_SIZE;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A ship occupying `size` consecutive cells. The cell set is fixed at
/// construction.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ship {
    size: usize,
    cells: [Coord; MAX_SHIP_SIZE],
    sunk: bool,
}

impl Ship {
    /// Lay out a ship of `size` cells starting at `origin` and extending
    /// right (horizontal) or down (vertical).
    pub fn new(size: usize, orientation: Orientation, origin: Coord) -> Result<Self, BoardError> {
        if size == 0 || size > MAX_SHIP_SIZE {
            return Err(BoardError::InvalidShipSize(size));
        }
        let mut cells = [Coord::default(); MAX_SHIP_SIZE];
        for (i, cell) in cells.iter_mut().take(size).enumerate() {
            let step = i as i8;
            let next = match orientation {
                Orientation::Horizontal => origin.offset(0, step),
                Orientation::Vertical => origin.offset(step, 0),
            };
            *cell = next.ok_or(BoardError::ShipOutOfBounds)?;
        }
        Ok(Ship {
            size,
            cells,
            sunk: false,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Occupied cells, in order from the origin.
    pub fn cells(&self) -> &[Coord] {
        &self.cells[..self.size]
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.cells().contains(&coord)
    }

    pub fn is_sunk(&self) -> bool {
        self.sunk
    }

    /// Returns `false` if the ship was already sunk.
    pub(crate) fn mark_sunk(&mut self) -> bool {
        !core::mem::replace(&mut self.sunk, true)
    }

    /// Cells bordering the ship (8-neighbourhood, clipped to the board),
    /// excluding the ship itself. Sorted and free of duplicates.
    pub fn dead_zone(&self) -> Vec<Coord> {
        let mut zone: Vec<Coord> = self
            .cells()
            .iter()
            .flat_map(|c| c.neighbours())
            .filter(|c| !self.contains(*c))
            .collect();
        zone.sort_unstable();
        zone.dedup();
        zone
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ size: {}, cells: {:?}, sunk: {} }}",
            self.size,
            self.cells(),
            self.sunk
        )
    }
}
