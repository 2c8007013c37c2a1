//! The set of ships owned by one player, and sunk detection.

use alloc::vec::Vec;

use crate::board::{Board, Cell};
use crate::common::Coord;
use crate::ship::Ship;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fleet {
    ships: Vec<Ship>,
}

impl Fleet {
    pub fn new() -> Self {
        Self { ships: Vec::new() }
    }

    pub(crate) fn push(&mut self, ship: Ship) {
        self.ships.push(ship);
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    /// The ship occupying `coord`, if any.
    pub fn ship_at(&self, coord: Coord) -> Option<&Ship> {
        self.ships.iter().find(|s| s.contains(coord))
    }

    /// Returns `true` when every ship is sunk.
    pub fn all_sunk(&self) -> bool {
        !self.ships.is_empty() && self.ships.iter().all(|s| s.is_sunk())
    }

    /// After a hit at `coord`, sink the afloat ship covering it if all of its
    /// cells are now `Hit` on `board`. Returns the newly sunk ship.
    pub fn sink_at(&mut self, coord: Coord, board: &Board) -> Option<&Ship> {
        let ship = self
            .ships
            .iter_mut()
            .find(|s| !s.is_sunk() && s.contains(coord))?;
        let all_hit = ship.cells().iter().all(|&c| board.get(c) == Cell::Hit);
        if all_hit && ship.mark_sunk() {
            Some(&*ship)
        } else {
            None
        }
    }
}
