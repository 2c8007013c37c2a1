//! Common types for Battleship: coordinates and board errors.

use crate::config::BOARD_SIZE;

/// A cell on the board, addressed by row and column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

impl Coord {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Build a coordinate, returning `None` when it lies off the board.
    pub fn checked(row: usize, col: usize) -> Option<Self> {
        let n = BOARD_SIZE as usize;
        if row < n && col < n {
            Some(Self::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Whether the coordinate lies on the board.
    pub fn in_bounds(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Flat wire index `row * 10 + col`.
    pub fn index(self) -> u8 {
        self.row * BOARD_SIZE + self.col
    }

    /// Inverse of [`Coord::index`].
    pub fn from_index(index: u8) -> Option<Self> {
        if index < BOARD_SIZE * BOARD_SIZE {
            Some(Self::new(index / BOARD_SIZE, index % BOARD_SIZE))
        } else {
            None
        }
    }

    /// Shift by (`dr`, `dc`), returning `None` if the result leaves the board.
    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row as i16 + dr as i16;
        let col = self.col as i16 + dc as i16;
        if row < 0 || col < 0 {
            return None;
        }
        Self::checked(row as usize, col as usize)
    }

    /// The up to eight in-bounds cells surrounding this one.
    pub fn neighbours(self) -> impl Iterator<Item = Coord> {
        (-1i8..=1)
            .flat_map(|dr| (-1i8..=1).map(move |dc| (dr, dc)))
            .filter(|&(dr, dc)| dr != 0 || dc != 0)
            .filter_map(move |(dr, dc)| self.offset(dr, dc))
    }
}

impl core::fmt::Display for Coord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Random placement gave up after exhausting its retry budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementError {
    /// Size of the ship that could not be placed.
    pub size: usize,
    /// Attempts made before giving up.
    pub attempts: u32,
}

impl core::fmt::Display for PlacementError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Unable to place ship of size {} after {} attempts",
            self.size, self.attempts
        )
    }
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Ship size is zero or larger than the longest allowed ship.
    InvalidShipSize(usize),
    /// Ship extends past the edge of the board.
    ShipOutOfBounds,
    /// Ship placement overlaps another ship.
    ShipOverlaps,
    /// Ship placement touches another ship, edge or corner.
    ShipTouches,
    /// Random placement failed.
    Placement(PlacementError),
}

impl From<PlacementError> for BoardError {
    fn from(err: PlacementError) -> Self {
        BoardError::Placement(err)
    }
}

impl core::fmt::Display for BoardError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BoardError::InvalidShipSize(size) => write!(f, "Invalid ship size: {}", size),
            BoardError::ShipOutOfBounds => write!(f, "Ship placement is out of bounds"),
            BoardError::ShipOverlaps => write!(f, "Ship placement overlaps with another ship"),
            BoardError::ShipTouches => write!(f, "Ship placement touches another ship"),
            BoardError::Placement(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}

#[cfg(feature = "std")]
impl std::error::Error for PlacementError {}
