use proto::ConnectionId;
use thiserror::Error;

use crate::session::MatchState;

/// Failures raised by the match session
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("roster must contain exactly two players, got {count}")]
    Roster { count: usize },

    #[error("roster lists peer {0} twice")]
    DuplicatePeer(ConnectionId),

    #[error("{op} rejected while the match is {state:?}")]
    InvalidTransition {
        op: &'static str,
        state: MatchState,
    },

    #[error("{op} rejected: this instance is not the simulation authority")]
    NotAuthority { op: &'static str },

    #[error("no player in slot {0}")]
    InvalidSlot(u8),

    #[error("malformed broadcast message: {0}")]
    Codec(#[from] postcard::Error),
}

/// Failures reported by a transport when delivering bytes
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("connection {0} is closed")]
    Closed(ConnectionId),

    #[error("send to {id} failed: {reason}")]
    Send { id: ConnectionId, reason: String },
}
