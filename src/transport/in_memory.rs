use tokio::sync::mpsc;

use crate::protocol::{ClientMessage, Inbound, ServerMessage};
use crate::transport::Transport;

/// Server side of an in-process connection. Frames travel as text, exactly
/// as they would over the socket.
pub struct InMemoryTransport {
    from_client: mpsc::UnboundedReceiver<String>,
    to_client: Option<mpsc::UnboundedSender<String>>,
}

/// Client side of an in-process connection.
pub struct InMemoryClient {
    to_server: Option<mpsc::UnboundedSender<String>>,
    from_server: mpsc::UnboundedReceiver<String>,
}

impl InMemoryTransport {
    pub fn pair() -> (Self, InMemoryClient) {
        let (client_tx, client_rx) = mpsc::unbounded_channel();
        let (server_tx, server_rx) = mpsc::unbounded_channel();
        (
            Self {
                from_client: client_rx,
                to_client: Some(server_tx),
            },
            InMemoryClient {
                to_server: Some(client_tx),
                from_server: server_rx,
            },
        )
    }
}

#[async_trait::async_trait]
impl Transport for InMemoryTransport {
    async fn send(&mut self, msg: &ServerMessage) -> anyhow::Result<()> {
        let line = msg.encode()?;
        self.to_client
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Transport is shut down"))?
            .send(line)
            .map_err(|_| anyhow::anyhow!("Connection closed by peer"))
    }

    async fn recv(&mut self) -> anyhow::Result<Option<Inbound>> {
        Ok(self
            .from_client
            .recv()
            .await
            .map(|line| Inbound::from_frame(&line)))
    }

    async fn close(&mut self) -> anyhow::Result<()> {
        self.to_client = None;
        Ok(())
    }
}

impl InMemoryClient {
    /// Send a raw text frame.
    pub fn send_raw(&self, frame: impl Into<String>) -> anyhow::Result<()> {
        self.to_server
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Transport is shut down"))?
            .send(frame.into())
            .map_err(|_| anyhow::anyhow!("Channel closed"))
    }

    pub fn send(&self, msg: &ClientMessage) -> anyhow::Result<()> {
        self.send_raw(msg.encode()?)
    }

    /// Next message from the server, `None` once the server closed us.
    pub async fn recv(&mut self) -> anyhow::Result<Option<ServerMessage>> {
        match self.from_server.recv().await {
            Some(line) => Ok(Some(ServerMessage::decode(&line)?)),
            None => Ok(None),
        }
    }

    /// Hang up; the server sees the connection drop.
    pub fn close(&mut self) {
        self.to_server = None;
    }
}
