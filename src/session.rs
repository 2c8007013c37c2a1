//! The two-player match coordinator.
//!
//! A [`Session`] is sans-IO: every operation takes one inbound event and
//! returns the messages to deliver, in order. The caller owns delivery.

use log::{debug, info, warn};
use rand::Rng;

use crate::common::{BoardError, Coord};
use crate::game::{Layout, ShotOutcome};
use crate::generator::BoardGenerator;
use crate::protocol::{ServerMessage, Shot, ShipView};

/// Opaque handle for one client connection.
pub type ConnId = u64;

/// Player slot 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerId(u8);

impl PlayerId {
    pub const FIRST: PlayerId = PlayerId(0);
    pub const SECOND: PlayerId = PlayerId(1);

    pub fn new(id: u8) -> Option<Self> {
        (id < 2).then_some(PlayerId(id))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn id(self) -> u8 {
        self.0
    }

    pub fn opponent(self) -> Self {
        PlayerId(1 - self.0)
    }
}

/// A message addressed to one connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub to: ConnId,
    pub message: ServerMessage,
}

impl Envelope {
    pub fn new(to: ConnId, message: ServerMessage) -> Self {
        Self { to, message }
    }
}

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Zero or one player seated.
    WaitingForPlayers,
    /// Both seats taken, shots are being exchanged.
    Active,
    /// A player left; the next join starts over.
    Ended,
}

/// Reasons a connection could not be seated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinError {
    /// Both seats are already taken.
    SessionFull,
    /// The board generator could not lay out a fleet.
    Placement(BoardError),
}

impl std::fmt::Display for JoinError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JoinError::SessionFull => write!(f, "Game is full"),
            JoinError::Placement(e) => write!(f, "Could not generate board: {}", e),
        }
    }
}

impl std::error::Error for JoinError {}

#[derive(Debug)]
struct Seat {
    conn: ConnId,
    layout: Layout,
}

/// Two seats, the turn owner, and both players' waters.
#[derive(Debug)]
pub struct Session {
    seats: [Option<Seat>; 2],
    turn: PlayerId,
    phase: SessionPhase,
    generator: BoardGenerator,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_generator(BoardGenerator::new())
    }

    pub fn with_generator(generator: BoardGenerator) -> Self {
        Self {
            seats: [None, None],
            turn: PlayerId::FIRST,
            phase: SessionPhase::WaitingForPlayers,
            generator,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// The player currently allowed to shoot.
    pub fn turn(&self) -> PlayerId {
        self.turn
    }

    /// Number of occupied seats.
    pub fn player_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_some()).count()
    }

    /// Seat bound to `conn`, if any.
    pub fn player_of(&self, conn: ConnId) -> Option<PlayerId> {
        self.seats
            .iter()
            .position(|s| s.as_ref().is_some_and(|s| s.conn == conn))
            .map(|i| PlayerId(i as u8))
    }

    /// Connection seated at `player`.
    pub fn conn_of(&self, player: PlayerId) -> Option<ConnId> {
        self.seats[player.index()].as_ref().map(|s| s.conn)
    }

    /// Board and fleet of `player`.
    pub fn layout(&self, player: PlayerId) -> Option<&Layout> {
        self.seats[player.index()].as_ref().map(|s| &s.layout)
    }

    /// Seat a new connection, generating its board. The second join starts
    /// the game with player 0 to move.
    pub fn join<R: Rng + ?Sized>(
        &mut self,
        conn: ConnId,
        rng: &mut R,
    ) -> Result<Vec<Envelope>, JoinError> {
        if self.phase == SessionPhase::Ended {
            self.reset();
        }
        let slot = self
            .seats
            .iter()
            .position(Option::is_none)
            .ok_or(JoinError::SessionFull)?;
        let layout = self.generator.generate(rng).map_err(JoinError::Placement)?;
        let player = PlayerId(slot as u8);
        let ships = layout.fleet().ships().iter().map(ShipView::from).collect();
        self.seats[slot] = Some(Seat { conn, layout });
        info!("connection {} seated as player {}", conn, player.id());

        let mut out = vec![Envelope::new(
            conn,
            ServerMessage::Player {
                id: player.id(),
                ships,
            },
        )];
        if let [Some(first), Some(second)] = &self.seats {
            self.turn = PlayerId::FIRST;
            self.phase = SessionPhase::Active;
            info!("both players connected, game started");
            out.push(Envelope::new(first.conn, ServerMessage::Start { turn: true }));
            out.push(Envelope::new(second.conn, ServerMessage::Start { turn: false }));
        }
        Ok(out)
    }

    /// Resolve a shot sent by `conn`. Shots out of turn, outside an active
    /// game, from the wrong seat or off the board are dropped silently.
    pub fn handle_shot(&mut self, conn: ConnId, shot: Shot) -> Vec<Envelope> {
        if self.phase != SessionPhase::Active {
            debug!("shot from connection {} ignored: no active game", conn);
            return Vec::new();
        }
        let Some(shooter) = PlayerId::new(shot.player) else {
            warn!("connection {} sent shot for unknown player {}", conn, shot.player);
            return Vec::new();
        };
        if self.player_of(conn) != Some(shooter) {
            warn!(
                "connection {} sent shot on behalf of player {}",
                conn,
                shooter.id()
            );
            return Vec::new();
        }
        if shooter != self.turn {
            debug!("player {} shot out of turn", shooter.id());
            return Vec::new();
        }
        let coord = shot.coord();
        if !coord.in_bounds() {
            warn!("player {} shot off the board at {}", shooter.id(), coord);
            return Vec::new();
        }

        let opponent = shooter.opponent();
        let (Some(shooter_conn), Some(target)) = (
            self.conn_of(shooter),
            self.seats[opponent.index()].as_mut(),
        ) else {
            return Vec::new();
        };
        let target_conn = target.conn;
        let outcome = target.layout.fire(coord);
        let fleet_destroyed = target.layout.fleet().all_sunk();

        let mut out = Vec::new();
        let Coord { row, col } = coord;
        match &outcome {
            ShotOutcome::Hit { sunk } => {
                out.push(Envelope::new(target_conn, ServerMessage::Hit { row, col }));
                out.push(Envelope::new(
                    shooter_conn,
                    ServerMessage::ShotResult { row, col, hit: true },
                ));
                if let Some(ship) = sunk {
                    info!(
                        "player {} sank a ship of size {} at {}",
                        shooter.id(),
                        ship.cells.len(),
                        coord
                    );
                    out.push(Envelope::new(shooter_conn, ServerMessage::sunk(ship, true)));
                    out.push(Envelope::new(target_conn, ServerMessage::sunk(ship, false)));
                    if fleet_destroyed {
                        info!("fleet of player {} destroyed", opponent.id());
                    }
                }
            }
            ShotOutcome::Miss => {
                out.push(Envelope::new(target_conn, ServerMessage::Miss { row, col }));
                out.push(Envelope::new(
                    shooter_conn,
                    ServerMessage::ShotResult { row, col, hit: false },
                ));
            }
            ShotOutcome::Repeat => {
                debug!("player {} repeated a shot at {}", shooter.id(), coord);
            }
        }

        if !outcome.is_hit() {
            self.turn = opponent;
        }
        out.push(Envelope::new(
            shooter_conn,
            ServerMessage::Turn {
                your_turn: self.turn == shooter,
            },
        ));
        out.push(Envelope::new(
            target_conn,
            ServerMessage::Turn {
                your_turn: self.turn == opponent,
            },
        ));
        out
    }

    /// Release `conn`. If it was seated the whole session is cleared and the
    /// remaining player, if any, is told why.
    pub fn leave(&mut self, conn: ConnId) -> Vec<Envelope> {
        let Some(player) = self.player_of(conn) else {
            return Vec::new();
        };
        let remaining = self.conn_of(player.opponent());
        info!("player {} (connection {}) left, session reset", player.id(), conn);
        self.seats = [None, None];
        self.turn = PlayerId::FIRST;
        self.phase = SessionPhase::Ended;
        remaining
            .map(|to| {
                Envelope::new(
                    to,
                    ServerMessage::error("Opponent disconnected. Connect again to start a new game."),
                )
            })
            .into_iter()
            .collect()
    }

    fn reset(&mut self) {
        self.seats = [None, None];
        self.turn = PlayerId::FIRST;
        self.phase = SessionPhase::WaitingForPlayers;
    }
}
