//! Random fleet placement with retry-until-valid.

use alloc::vec::Vec;
use rand::Rng;

use crate::board::Board;
use crate::common::{BoardError, Coord, PlacementError};
use crate::config::{BOARD_SIZE, FLEET, MAX_PLACEMENT_ATTEMPTS, MAX_SHIP_SIZE};
use crate::fleet::Fleet;
use crate::game::Layout;
use crate::ship::{Orientation, Ship};

/// Builds a board and fleet by sampling a fresh orientation and anchor for
/// each ship until a legal spot turns up.
#[derive(Debug, Clone)]
pub struct BoardGenerator {
    sizes: Vec<usize>,
    max_attempts: u32,
}

impl Default for BoardGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardGenerator {
    /// Generator for the standard ten-ship fleet.
    pub fn new() -> Self {
        Self::with_fleet(&FLEET)
    }

    /// Generator for a custom list of ship sizes, placed in order.
    pub fn with_fleet(sizes: &[usize]) -> Self {
        Self {
            sizes: sizes.to_vec(),
            max_attempts: MAX_PLACEMENT_ATTEMPTS,
        }
    }

    /// Override the per-ship retry budget.
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Place every ship, failing with [`PlacementError`] if any ship runs out
    /// of attempts.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Layout, BoardError> {
        if let Some(&bad) = self.sizes.iter().find(|&&s| s == 0 || s > MAX_SHIP_SIZE) {
            return Err(BoardError::InvalidShipSize(bad));
        }
        let mut board = Board::new();
        let mut fleet = Fleet::new();
        for &size in self.sizes.iter() {
            let ship = self.random_placement(rng, &board, size)?;
            board.place(&ship)?;
            fleet.push(ship);
        }
        Ok(Layout::new(board, fleet))
    }

    /// Sample placements for one ship against the ships already on `board`.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        board: &Board,
        size: usize,
    ) -> Result<Ship, BoardError> {
        for _ in 0..self.max_attempts {
            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let anchor = Coord::new(
                rng.random_range(0..BOARD_SIZE),
                rng.random_range(0..BOARD_SIZE),
            );
            let ship = match Ship::new(size, orientation, anchor) {
                Ok(ship) => ship,
                Err(BoardError::ShipOutOfBounds) => continue,
                Err(e) => return Err(e),
            };
            if board.can_place(&ship).is_ok() {
                return Ok(ship);
            }
        }
        log::debug!(
            "gave up placing ship of size {} after {} attempts",
            size,
            self.max_attempts
        );
        Err(PlacementError {
            size,
            attempts: self.max_attempts,
        }
        .into())
    }
}
