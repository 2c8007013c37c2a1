//! JSON wire messages exchanged with game clients.
//!
//! Every frame is one JSON object tagged by its `type` field. Field names
//! follow the client's camelCase convention (`yourTurn`, `deadZone`).

use serde::{Deserialize, Serialize};

use crate::common::Coord;
use crate::game::SunkShip;
use crate::ship::Ship;

/// A player's own ship, as shown to them at the start of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipView {
    pub size: usize,
    /// Flat cell indices `row * 10 + col`.
    pub cells: Vec<u8>,
    pub sunk: bool,
}

impl From<&Ship> for ShipView {
    fn from(ship: &Ship) -> Self {
        ShipView {
            size: ship.size(),
            cells: ship.cells().iter().map(|c| c.index()).collect(),
            sunk: ship.is_sunk(),
        }
    }
}

/// A single cell in row/column form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRef {
    pub row: u8,
    pub col: u8,
}

impl From<Coord> for CellRef {
    fn from(c: Coord) -> Self {
        CellRef {
            row: c.row,
            col: c.col,
        }
    }
}

/// A shot submitted by the player whose turn it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shot {
    pub player: u8,
    pub row: u8,
    pub col: u8,
}

impl Shot {
    pub fn coord(&self) -> Coord {
        Coord::new(self.row, self.col)
    }
}

/// Messages sent by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    Shot(Shot),
}

/// Messages sent by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    /// Identity assignment plus the recipient's own fleet.
    Player { id: u8, ships: Vec<ShipView> },
    /// Game begins; `turn` tells the recipient whether it moves first.
    Start { turn: bool },
    /// The recipient's ship was hit.
    Hit { row: u8, col: u8 },
    /// A shot at the recipient's board missed.
    Miss { row: u8, col: u8 },
    /// Outcome of the recipient's own shot.
    #[serde(rename = "result")]
    ShotResult { row: u8, col: u8, hit: bool },
    /// A ship went down. Only the shooter gets the dead zone.
    Sunk {
        cells: Vec<u8>,
        #[serde(
            rename = "deadZone",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        dead_zone: Option<Vec<CellRef>>,
    },
    Turn {
        #[serde(rename = "yourTurn")]
        your_turn: bool,
    },
    Error { message: String },
}

impl ServerMessage {
    pub fn error(message: impl Into<String>) -> Self {
        ServerMessage::Error {
            message: message.into(),
        }
    }

    /// `sunk` notice; pass `with_dead_zone` only for the shooter.
    pub fn sunk(ship: &SunkShip, with_dead_zone: bool) -> Self {
        ServerMessage::Sunk {
            cells: ship.cells.iter().map(|c| c.index()).collect(),
            dead_zone: with_dead_zone
                .then(|| ship.dead_zone.iter().copied().map(CellRef::from).collect()),
        }
    }
}

/// Failures turning frames into messages and back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Inbound frame is not a valid client message.
    Malformed(String),
    /// Outbound message could not be serialized.
    Encode(String),
}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProtocolError::Malformed(e) => write!(f, "Malformed message: {}", e),
            ProtocolError::Encode(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for ProtocolError {}

impl ClientMessage {
    pub fn decode(frame: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(frame.trim()).map_err(|e| ProtocolError::Malformed(e.to_string()))
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(|e| ProtocolError::Encode(e.to_string()))
    }
}

impl ServerMessage {
    pub fn decode(frame: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(frame.trim()).map_err(|e| ProtocolError::Malformed(e.to_string()))
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(|e| ProtocolError::Encode(e.to_string()))
    }
}

/// What a transport hands up for each inbound frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    Message(ClientMessage),
    Malformed(ProtocolError),
}

impl Inbound {
    pub fn from_frame(frame: &str) -> Self {
        match ClientMessage::decode(frame) {
            Ok(msg) => Inbound::Message(msg),
            Err(e) => Inbound::Malformed(e),
        }
    }
}
