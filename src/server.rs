#![cfg(feature = "std")]

//! Connection handling around a single [`Session`].
//!
//! One coordinator task owns the session and handles events strictly one at
//! a time. Each connection runs its own task that pumps its transport and an
//! outbox channel; delivery is fire-and-forget.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::{debug, error, info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::ServerConfig;
use crate::protocol::{ClientMessage, Inbound, ServerMessage};
use crate::session::{ConnId, Envelope, JoinError, Session};
use crate::transport::tcp::TcpTransport;
use crate::transport::Transport;

/// Inbound events, in the order the coordinator must see them.
#[derive(Debug)]
enum Event {
    Connected {
        conn: ConnId,
        outbox: mpsc::UnboundedSender<ServerMessage>,
    },
    Message {
        conn: ConnId,
        msg: ClientMessage,
    },
    Disconnected {
        conn: ConnId,
    },
}

/// Cloneable handle used to attach connections to the coordinator.
#[derive(Clone)]
pub struct CoordinatorHandle {
    events: mpsc::UnboundedSender<Event>,
    next_conn: Arc<AtomicU64>,
}

/// Start the coordinator task with the given session and RNG.
pub fn spawn_coordinator(session: Session, rng: SmallRng) -> (CoordinatorHandle, JoinHandle<()>) {
    let (events, rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(run_coordinator(session, rx, rng));
    (
        CoordinatorHandle {
            events,
            next_conn: Arc::new(AtomicU64::new(0)),
        },
        task,
    )
}

async fn run_coordinator(
    mut session: Session,
    mut events: mpsc::UnboundedReceiver<Event>,
    mut rng: SmallRng,
) {
    let mut outboxes: HashMap<ConnId, mpsc::UnboundedSender<ServerMessage>> = HashMap::new();
    while let Some(event) = events.recv().await {
        let envelopes = match event {
            Event::Connected { conn, outbox } => {
                outboxes.insert(conn, outbox);
                match session.join(conn, &mut rng) {
                    Ok(envelopes) => envelopes,
                    Err(JoinError::SessionFull) => {
                        info!("connection {} refused: game is full", conn);
                        vec![Envelope::new(conn, ServerMessage::error("Game is full, try again later."))]
                    }
                    Err(e) => {
                        error!("connection {} could not join: {}", conn, e);
                        vec![Envelope::new(conn, ServerMessage::error(e.to_string()))]
                    }
                }
            }
            Event::Message { conn, msg } => match msg {
                ClientMessage::Shot(shot) => session.handle_shot(conn, shot),
            },
            Event::Disconnected { conn } => {
                outboxes.remove(&conn);
                session.leave(conn)
            }
        };
        for env in envelopes {
            match outboxes.get(&env.to) {
                Some(outbox) => {
                    if outbox.send(env.message).is_err() {
                        debug!("connection {} gone, message dropped", env.to);
                    }
                }
                None => debug!("no outbox for connection {}, message dropped", env.to),
            }
        }
        // Dropping an outbox closes its connection once it has drained.
        outboxes.retain(|conn, _| session.player_of(*conn).is_some());
    }
    debug!("coordinator stopped");
}

impl CoordinatorHandle {
    /// Drive one connection until either side closes it.
    pub async fn attach<T: Transport>(&self, mut transport: T) -> anyhow::Result<()> {
        let conn = self.next_conn.fetch_add(1, Ordering::Relaxed);
        let (outbox_tx, mut outbox) = mpsc::unbounded_channel();
        self.events
            .send(Event::Connected {
                conn,
                outbox: outbox_tx,
            })
            .map_err(|_| anyhow::anyhow!("Coordinator stopped"))?;

        let result = loop {
            tokio::select! {
                out = outbox.recv() => match out {
                    Some(msg) => {
                        if let Err(e) = transport.send(&msg).await {
                            break Err(e);
                        }
                    }
                    None => {
                        debug!("connection {} released by coordinator", conn);
                        break Ok(());
                    }
                },
                inbound = transport.recv() => match inbound {
                    Ok(Some(Inbound::Message(msg))) => {
                        if self.events.send(Event::Message { conn, msg }).is_err() {
                            break Err(anyhow::anyhow!("Coordinator stopped"));
                        }
                    }
                    Ok(Some(Inbound::Malformed(e))) => {
                        warn!("connection {}: {}", conn, e);
                    }
                    Ok(None) => {
                        info!("connection {} closed by peer", conn);
                        break Ok(());
                    }
                    Err(e) => break Err(e),
                },
            }
        };

        let _ = self.events.send(Event::Disconnected { conn });
        if let Err(e) = transport.close().await {
            debug!("connection {} close: {}", conn, e);
        }
        result
    }
}

/// TCP front end for the game.
pub struct Server {
    config: ServerConfig,
}

impl Server {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Bind the configured address and serve until ctrl-c.
    pub async fn run(self) -> anyhow::Result<()> {
        let listener = TcpListener::bind(&self.config.bind).await?;
        info!("listening on {}", listener.local_addr()?);
        tokio::select! {
            res = self.serve(listener) => res,
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                Ok(())
            }
        }
    }

    /// Accept connections on `listener` forever.
    pub async fn serve(self, listener: TcpListener) -> anyhow::Result<()> {
        let rng = match self.config.seed {
            Some(seed) => {
                info!("using fixed seed {}", seed);
                SmallRng::seed_from_u64(seed)
            }
            None => {
                let mut seed_rng = rand::rng();
                SmallRng::from_rng(&mut seed_rng)
            }
        };
        let (handle, _coordinator) = spawn_coordinator(Session::new(), rng);

        loop {
            let (stream, addr) = listener.accept().await?;
            info!("player connected from {}", addr);
            let transport = TcpTransport::with_max_line_length(stream, self.config.max_line_length);
            let handle = handle.clone();
            tokio::spawn(async move {
                if let Err(e) = handle.attach(transport).await {
                    warn!("connection from {} ended with an error: {}", addr, e);
                }
            });
        }
    }
}
