//! The 10×10 cell grid owned by one player.

use core::fmt;

use crate::common::{BoardError, Coord};
use crate::config::BOARD_SIZE;
use crate::ship::Ship;

const N: usize = BOARD_SIZE as usize;

/// State of a single board cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Empty,
    Ship,
    Hit,
    Miss,
}

/// Occupancy grid for one player.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    grid: [[Cell; N]; N],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board.
    pub fn new() -> Self {
        Board {
            grid: [[Cell::Empty; N]; N],
        }
    }

    /// State of the cell at `coord`. Off-board coordinates read as empty.
    pub fn get(&self, coord: Coord) -> Cell {
        if !coord.in_bounds() {
            return Cell::Empty;
        }
        self.grid[coord.row as usize][coord.col as usize]
    }

    pub(crate) fn set(&mut self, coord: Coord, cell: Cell) {
        if coord.in_bounds() {
            self.grid[coord.row as usize][coord.col as usize] = cell;
        }
    }

    /// Check that `ship` neither overlaps nor touches anything already on
    /// the board.
    pub fn can_place(&self, ship: &Ship) -> Result<(), BoardError> {
        let cells = ship.cells();
        if cells.iter().any(|&c| self.get(c) != Cell::Empty) {
            return Err(BoardError::ShipOverlaps);
        }
        let touches = cells
            .iter()
            .flat_map(|c| c.neighbours())
            .any(|n| self.get(n) != Cell::Empty);
        if touches {
            return Err(BoardError::ShipTouches);
        }
        Ok(())
    }

    /// Mark the ship's cells as occupied.
    pub fn place(&mut self, ship: &Ship) -> Result<(), BoardError> {
        self.can_place(ship)?;
        for &cell in ship.cells() {
            self.set(cell, Cell::Ship);
        }
        Ok(())
    }

    /// Number of cells currently in the given state.
    pub fn count(&self, state: Cell) -> usize {
        self.grid.iter().flatten().filter(|&&c| c == state).count()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{")?;
        for row in self.grid.iter() {
            write!(f, "  ")?;
            for cell in row.iter() {
                let ch = match cell {
                    Cell::Empty => '.',
                    Cell::Ship => '#',
                    Cell::Hit => 'X',
                    Cell::Miss => 'o',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}
