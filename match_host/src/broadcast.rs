//! Outbound delivery of authoritative state changes
//!
//! The session queues [`S2C`] messages as its state changes; [`Broadcaster::flush`]
//! encodes each one once and hands the bytes to every connected client in
//! queue order. Delivery is fire-and-forget: a failing client is logged and
//! skipped, never retried, and never holds up the tick.

use std::collections::VecDeque;

use log::{error, warn};
use proto::{ConnectionId, S2C};

use crate::error::TransportError;

/// Abstract connection so the session never touches a concrete transport
pub trait GameClient {
    fn connection_id(&self) -> ConnectionId;
    fn send_bytes(&self, bytes: &[u8]) -> Result<(), TransportError>;
}

#[derive(Default)]
pub struct Broadcaster {
    clients: Vec<Box<dyn GameClient>>,
    outbox: VecDeque<S2C>,
    delivered: u64,
}

impl Broadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connected participant. A later client with the same id
    /// replaces the earlier one.
    pub fn add_client(&mut self, client: Box<dyn GameClient>) {
        let id = client.connection_id();
        self.clients.retain(|c| c.connection_id() != id);
        self.clients.push(client);
    }

    /// Forget a participant. Returns false if it was not connected.
    pub fn remove_client(&mut self, id: ConnectionId) -> bool {
        let before = self.clients.len();
        self.clients.retain(|c| c.connection_id() != id);
        self.clients.len() != before
    }

    /// Drop every client, returning the ids that were connected
    pub fn clear_clients(&mut self) -> Vec<ConnectionId> {
        self.clients.drain(..).map(|c| c.connection_id()).collect()
    }

    pub fn client_ids(&self) -> Vec<ConnectionId> {
        self.clients.iter().map(|c| c.connection_id()).collect()
    }

    pub fn queue(&mut self, msg: S2C) {
        self.outbox.push_back(msg);
    }

    /// Messages waiting for the next flush, oldest first
    pub fn pending(&self) -> impl Iterator<Item = &S2C> {
        self.outbox.iter()
    }

    /// Number of messages flushed over the broadcaster's lifetime
    pub fn delivered(&self) -> u64 {
        self.delivered
    }

    /// Send every queued message to every client, in order.
    /// Returns how many messages left the queue.
    pub fn flush(&mut self) -> usize {
        let mut flushed = 0;
        while let Some(msg) = self.outbox.pop_front() {
            flushed += 1;
            let bytes = match msg.to_bytes() {
                Ok(bytes) => bytes,
                Err(e) => {
                    error!("Dropping {msg:?}: failed to encode: {e}");
                    continue;
                }
            };
            for client in &self.clients {
                if let Err(e) = client.send_bytes(&bytes) {
                    warn!("Broadcast to {} failed: {e}", client.connection_id());
                }
            }
        }
        self.delivered += flushed as u64;
        flushed
    }

    /// Unicast for connection-layer messages such as `Welcome`
    pub fn send_to(&self, id: ConnectionId, msg: &S2C) -> Result<(), TransportError> {
        let client = self
            .clients
            .iter()
            .find(|c| c.connection_id() == id)
            .ok_or(TransportError::Closed(id))?;
        let bytes = msg.to_bytes().map_err(|e| TransportError::Send {
            id,
            reason: e.to_string(),
        })?;
        client.send_bytes(&bytes)
    }
}
