//! Game constants and runtime server configuration.

/// Side length of the square board.
pub const BOARD_SIZE: u8 = 10;

/// Longest ship in any fleet.
pub const MAX_SHIP_SIZE: usize = 4;

/// Number of ships each player owns.
pub const NUM_SHIPS: usize = 10;

/// Ship sizes of the standard fleet, placed in this order.
pub const FLEET: [usize; NUM_SHIPS] = [4, 3, 3, 2, 2, 2, 1, 1, 1, 1];

/// Total number of ship segments used in the standard configuration.
pub const TOTAL_SHIP_CELLS: usize = 4 + 2 * 3 + 3 * 2 + 4;

/// Random placement attempts allowed per ship before giving up.
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;

#[cfg(feature = "std")]
pub use runtime::*;

#[cfg(feature = "std")]
mod runtime {
    /// Address the server listens on when none is given.
    pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

    /// Longest accepted inbound text frame, in bytes.
    pub const DEFAULT_MAX_LINE_LENGTH: usize = 8 * 1024;

    /// Runtime settings for [`crate::Server`].
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ServerConfig {
        /// Socket address to bind, e.g. `0.0.0.0:8080`.
        pub bind: String,
        /// Fixed RNG seed for reproducible board layouts.
        pub seed: Option<u64>,
        /// Frames longer than this terminate the connection.
        pub max_line_length: usize,
    }

    impl Default for ServerConfig {
        fn default() -> Self {
            Self {
                bind: DEFAULT_BIND.to_string(),
                seed: None,
                max_line_length: DEFAULT_MAX_LINE_LENGTH,
            }
        }
    }
}
