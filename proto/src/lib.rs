//! Network protocol for the match broadcast
//!
//! Uses postcard for efficient binary serialization

use postcard::{from_bytes, to_allocvec};
use serde::{Deserialize, Serialize};

/// Opaque identifier of a connected peer, assigned by the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConnectionId(pub u64);

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a match finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// A player reached the score limit
    Winner(ConnectionId),
    /// The match was cut short (disconnect or shutdown); nobody won
    Aborted,
}

// ============================================================================
// S2C Messages (Authority to every participant)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum S2C {
    /// Identity assignment, sent by the connection layer to one peer
    Welcome {
        connection_id: ConnectionId,
        slot: u8, // 0 = left, 1 = right
    },

    /// Both scores after any change; receivers overwrite their copy
    ScoreUpdate { score0: u32, score1: u32 },

    /// Sent exactly once per match
    MatchEnd(MatchOutcome),
}

// ============================================================================
// Serialization Helpers
// ============================================================================

impl S2C {
    /// Serialize S2C message to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        to_allocvec(self)
    }

    /// Deserialize S2C message from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        from_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_update_serialization() {
        let msg = S2C::ScoreUpdate {
            score0: 7,
            score1: 10,
        };
        let bytes = msg.to_bytes().expect("Serialization should succeed");
        let decoded = S2C::from_bytes(&bytes).expect("Deserialization should succeed");
        match decoded {
            S2C::ScoreUpdate { score0, score1 } => {
                assert_eq!(score0, 7);
                assert_eq!(score1, 10);
            }
            _ => panic!("Message type mismatch"),
        }
    }

    #[test]
    fn test_match_end_variants_are_distinct() {
        let won = S2C::MatchEnd(MatchOutcome::Winner(ConnectionId(42)))
            .to_bytes()
            .expect("Serialization should succeed");
        let aborted = S2C::MatchEnd(MatchOutcome::Aborted)
            .to_bytes()
            .expect("Serialization should succeed");
        assert_ne!(won, aborted);

        assert_eq!(
            S2C::from_bytes(&aborted).expect("Deserialization should succeed"),
            S2C::MatchEnd(MatchOutcome::Aborted),
            "Abnormal end is its own variant, not a missing winner"
        );
        assert_eq!(
            S2C::from_bytes(&won).expect("Deserialization should succeed"),
            S2C::MatchEnd(MatchOutcome::Winner(ConnectionId(42)))
        );
    }

    #[test]
    fn test_truncated_bytes_fail() {
        let bytes = S2C::Welcome {
            connection_id: ConnectionId(u64::MAX),
            slot: 1,
        }
        .to_bytes()
        .expect("Serialization should succeed");
        assert!(S2C::from_bytes(&bytes[..bytes.len() - 1]).is_err());
    }

    #[test]
    fn test_connection_id_display() {
        assert_eq!(ConnectionId(7).to_string(), "#7");
    }
}
