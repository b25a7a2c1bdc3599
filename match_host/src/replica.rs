//! Read-only projection of the match on a participant's machine

use log::{debug, info};
use proto::{ConnectionId, MatchOutcome, S2C};

use crate::error::SessionError;

/// How the match ended from this participant's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewOutcome {
    Won,
    Lost,
    Aborted,
}

/// Display state built purely from broadcast messages
#[derive(Debug, Clone, Default)]
pub struct MatchView {
    me: Option<ConnectionId>,
    slot: Option<u8>,
    scores: (u32, u32),
    outcome: Option<ViewOutcome>,
}

impl MatchView {
    /// View for a participant that already knows its identity
    pub fn new(me: ConnectionId) -> Self {
        Self {
            me: Some(me),
            ..Self::default()
        }
    }

    pub fn me(&self) -> Option<ConnectionId> {
        self.me
    }

    pub fn slot(&self) -> Option<u8> {
        self.slot
    }

    pub fn scores(&self) -> (u32, u32) {
        self.scores
    }

    pub fn outcome(&self) -> Option<ViewOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Scoreboard text, left score first
    pub fn score_text(&self) -> String {
        format!("{} : {}", self.scores.0, self.scores.1)
    }

    pub fn apply(&mut self, msg: &S2C) {
        if self.is_over() {
            debug!("Ignoring {msg:?} after match end");
            return;
        }

        match *msg {
            S2C::Welcome {
                connection_id,
                slot,
            } => {
                self.me = Some(connection_id);
                self.slot = Some(slot);
            }
            // Single writer, so the latest update always wins
            S2C::ScoreUpdate { score0, score1 } => self.scores = (score0, score1),
            S2C::MatchEnd(outcome) => {
                let view = match outcome {
                    MatchOutcome::Aborted => ViewOutcome::Aborted,
                    MatchOutcome::Winner(id) if Some(id) == self.me => ViewOutcome::Won,
                    MatchOutcome::Winner(_) => ViewOutcome::Lost,
                };
                info!("Match finished for {:?}: {view:?}", self.me);
                self.outcome = Some(view);
            }
        }
    }

    /// Decode and apply a broadcast frame
    pub fn apply_bytes(&mut self, bytes: &[u8]) -> Result<(), SessionError> {
        let msg = S2C::from_bytes(bytes)?;
        self.apply(&msg);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_updates_overwrite() {
        let mut view = MatchView::new(ConnectionId(1));
        view.apply(&S2C::ScoreUpdate { score0: 3, score1: 1 });
        view.apply(&S2C::ScoreUpdate { score0: 3, score1: 2 });
        assert_eq!(view.scores(), (3, 2));
        assert_eq!(view.score_text(), "3 : 2");
    }

    #[test]
    fn test_outcome_relative_to_identity() {
        let winner = S2C::MatchEnd(MatchOutcome::Winner(ConnectionId(1)));

        let mut mine = MatchView::new(ConnectionId(1));
        mine.apply(&winner);
        assert_eq!(mine.outcome(), Some(ViewOutcome::Won));

        let mut theirs = MatchView::new(ConnectionId(2));
        theirs.apply(&winner);
        assert_eq!(theirs.outcome(), Some(ViewOutcome::Lost));

        let mut aborted = MatchView::new(ConnectionId(2));
        aborted.apply(&S2C::MatchEnd(MatchOutcome::Aborted));
        assert_eq!(aborted.outcome(), Some(ViewOutcome::Aborted));
    }

    #[test]
    fn test_welcome_sets_identity() {
        let mut view = MatchView::default();
        view.apply(&S2C::Welcome {
            connection_id: ConnectionId(5),
            slot: 1,
        });
        assert_eq!(view.me(), Some(ConnectionId(5)));
        assert_eq!(view.slot(), Some(1));
        view.apply(&S2C::MatchEnd(MatchOutcome::Winner(ConnectionId(5))));
        assert_eq!(view.outcome(), Some(ViewOutcome::Won));
    }

    #[test]
    fn test_messages_after_end_are_ignored() {
        let mut view = MatchView::new(ConnectionId(1));
        view.apply(&S2C::MatchEnd(MatchOutcome::Aborted));
        view.apply(&S2C::ScoreUpdate { score0: 9, score1: 9 });
        view.apply(&S2C::MatchEnd(MatchOutcome::Winner(ConnectionId(1))));
        assert_eq!(view.scores(), (0, 0));
        assert_eq!(view.outcome(), Some(ViewOutcome::Aborted));
    }

    #[test]
    fn test_apply_bytes_rejects_garbage() {
        let mut view = MatchView::new(ConnectionId(1));
        assert!(matches!(
            view.apply_bytes(&[0xFF, 0xFF, 0xFF]),
            Err(SessionError::Codec(_))
        ));
        let bytes = S2C::ScoreUpdate { score0: 4, score1: 0 }
            .to_bytes()
            .expect("Serialization should succeed");
        view.apply_bytes(&bytes).expect("Valid frame applies");
        assert_eq!(view.scores(), (4, 0));
    }
}
