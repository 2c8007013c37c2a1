use crate::protocol::{Inbound, ServerMessage};

/// One client connection as seen by the server.
#[async_trait::async_trait]
pub trait Transport: Send {
    /// Deliver one message to the peer.
    async fn send(&mut self, msg: &ServerMessage) -> anyhow::Result<()>;

    /// Next inbound frame, or `None` once the peer has gone away.
    /// Must be cancel-safe; the connection loop races it against the outbox.
    async fn recv(&mut self) -> anyhow::Result<Option<Inbound>>;

    /// Close the connection after pending writes.
    async fn close(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

pub mod in_memory;
pub mod tcp;
