use std::net::SocketAddr;

use futures::{SinkExt, StreamExt};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio_util::codec::{Framed, LinesCodec, LinesCodecError};

use crate::config::DEFAULT_MAX_LINE_LENGTH;
use crate::protocol::{Inbound, ServerMessage};
use crate::transport::Transport;

/// Newline-delimited JSON over TCP.
pub struct TcpTransport {
    framed: Framed<TcpStream, LinesCodec>,
    peer: Option<SocketAddr>,
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self::with_max_line_length(stream, DEFAULT_MAX_LINE_LENGTH)
    }

    pub fn with_max_line_length(stream: TcpStream, max_line_length: usize) -> Self {
        let peer = stream.peer_addr().ok();
        Self {
            framed: Framed::new(stream, LinesCodec::new_with_max_length(max_line_length)),
            peer,
        }
    }

    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.peer
    }
}

#[async_trait::async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, msg: &ServerMessage) -> anyhow::Result<()> {
        let line = msg.encode()?;
        self.framed.send(line).await.map_err(|e| match e {
            LinesCodecError::Io(e)
                if e.kind() == std::io::ErrorKind::BrokenPipe
                    || e.kind() == std::io::ErrorKind::ConnectionReset =>
            {
                anyhow::anyhow!("Connection closed by peer")
            }
            e => anyhow::anyhow!("Write error: {}", e),
        })
    }

    async fn recv(&mut self) -> anyhow::Result<Option<Inbound>> {
        match self.framed.next().await {
            None => Ok(None),
            Some(Ok(line)) => Ok(Some(Inbound::from_frame(&line))),
            Some(Err(LinesCodecError::MaxLineLengthExceeded)) => Err(anyhow::anyhow!(
                "Message too large (max: {} bytes)",
                self.framed.codec().max_length()
            )),
            Some(Err(LinesCodecError::Io(e)))
                if e.kind() == std::io::ErrorKind::ConnectionReset =>
            {
                Ok(None)
            }
            Some(Err(LinesCodecError::Io(e))) => Err(anyhow::anyhow!("Read error: {}", e)),
        }
    }

    async fn close(&mut self) -> anyhow::Result<()> {
        SinkExt::<String>::flush(&mut self.framed).await?;
        self.framed.get_mut().shutdown().await?;
        Ok(())
    }
}
