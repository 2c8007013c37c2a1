//! One player's waters: board plus fleet, and shot resolution against them.

use alloc::vec::Vec;

use crate::board::{Board, Cell};
use crate::common::{BoardError, Coord};
use crate::fleet::Fleet;
use crate::ship::Ship;

/// A ship that the last shot finished off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SunkShip {
    /// The ship's cells, in order from its origin.
    pub cells: Vec<Coord>,
    /// Neighbouring cells that cannot hold another ship.
    pub dead_zone: Vec<Coord>,
}

/// Outcome of firing at a single cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShotOutcome {
    /// A ship segment was hit; `sunk` is set when that ship just went down.
    Hit { sunk: Option<SunkShip> },
    /// Open water.
    Miss,
    /// The cell was already resolved; nothing changed.
    Repeat,
}

impl ShotOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, ShotOutcome::Hit { .. })
    }
}

/// Board and fleet belonging to one player slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    board: Board,
    fleet: Fleet,
}

impl Layout {
    pub fn new(board: Board, fleet: Fleet) -> Self {
        Self { board, fleet }
    }

    /// Build a layout from explicit placements, applying the same spacing
    /// rules as random generation.
    pub fn from_ships<I: IntoIterator<Item = Ship>>(ships: I) -> Result<Self, BoardError> {
        let mut board = Board::new();
        let mut fleet = Fleet::new();
        for ship in ships {
            board.place(&ship)?;
            fleet.push(ship);
        }
        Ok(Self { board, fleet })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Resolve a shot at `coord`. Resolved cells are never overwritten.
    pub fn fire(&mut self, coord: Coord) -> ShotOutcome {
        match self.board.get(coord) {
            Cell::Ship => {
                self.board.set(coord, Cell::Hit);
                let sunk = self.fleet.sink_at(coord, &self.board).map(|ship| SunkShip {
                    cells: ship.cells().to_vec(),
                    dead_zone: ship.dead_zone(),
                });
                ShotOutcome::Hit { sunk }
            }
            Cell::Empty => {
                self.board.set(coord, Cell::Miss);
                ShotOutcome::Miss
            }
            Cell::Hit | Cell::Miss => ShotOutcome::Repeat,
        }
    }
}
