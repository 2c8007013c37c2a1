#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod board;
mod common;
mod config;
mod fleet;
mod game;
mod generator;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod protocol;
#[cfg(feature = "std")]
pub mod server;
#[cfg(feature = "std")]
pub mod session;
mod ship;
#[cfg(feature = "std")]
pub mod transport;

pub use board::*;
pub use common::*;
pub use config::*;
pub use fleet::*;
pub use game::*;
pub use generator::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, level_from, LOG_ENV};
#[cfg(feature = "std")]
pub use protocol::*;
#[cfg(feature = "std")]
pub use server::{spawn_coordinator, CoordinatorHandle, Server};
#[cfg(feature = "std")]
pub use session::*;
pub use ship::*;
#[cfg(feature = "std")]
pub use transport::{in_memory::InMemoryClient, in_memory::InMemoryTransport, tcp::TcpTransport, Transport};
