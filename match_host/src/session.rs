use game_core::*;
use glam::Vec2;
use hecs::World;
use log::{debug, error, info, warn};
use proto::{ConnectionId, MatchOutcome, S2C};

use crate::broadcast::{Broadcaster, GameClient};
use crate::error::SessionError;

/// Match lifecycle. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    /// Waiting for the roster
    Lobby,
    /// Simulation running
    Active,
    /// Terminal
    Ended,
}

/// Whether this instance owns the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Canonical simulation; mutates and broadcasts
    Authority,
    /// Mirrors the roster only; state arrives through `MatchView`
    Replica,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub slot: u8, // 0 = left, 1 = right
    pub connection_id: ConnectionId,
    pub score: u32,
    pub color: [f32; 4],
    pub spawn_position: Vec2,
}

/// Placement handed to the spawn collaborator once, at match start
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnAssignment {
    pub slot: u8,
    pub connection_id: ConnectionId,
    pub position: Vec2,
    pub color: [f32; 4],
}

/// What the connection layer must do after `shutdown`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShutdownSignal {
    /// Peers to disconnect
    pub release: Vec<ConnectionId>,
    pub outcome: Option<MatchOutcome>,
}

/// One match, from roster to result. Passed explicitly to whoever drives it.
pub struct MatchSession {
    role: Role,
    state: MatchState,
    config: Config,
    world: World,
    time: Time,
    events: Events,
    rng: GameRng,
    players: Option<[Player; 2]>,
    outcome: Option<MatchOutcome>,
    broadcaster: Broadcaster,
    tick: u32,
}

impl MatchSession {
    pub fn new(role: Role, config: Config, seed: u64) -> Self {
        Self {
            role,
            state: MatchState::Lobby,
            config,
            world: World::new(),
            time: Time::default(),
            events: Events::new(),
            rng: GameRng::new(seed),
            players: None,
            outcome: None,
            broadcaster: Broadcaster::new(),
            tick: 0,
        }
    }

    /// Authority session with default tuning
    pub fn authority(seed: u64) -> Self {
        Self::new(Role::Authority, Config::default(), seed)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn players(&self) -> Option<&[Player; 2]> {
        self.players.as_ref()
    }

    pub fn scores(&self) -> (u32, u32) {
        self.players
            .as_ref()
            .map_or((0, 0), |[p0, p1]| (p0.score, p1.score))
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.outcome
    }

    /// Copy of the ball, if one is in play
    pub fn ball(&self) -> Option<Ball> {
        ball_snapshot(&self.world)
    }

    pub fn ticks(&self) -> u32 {
        self.tick
    }

    pub fn add_client(&mut self, client: Box<dyn GameClient>) {
        self.broadcaster.add_client(client);
    }

    pub fn broadcaster(&self) -> &Broadcaster {
        &self.broadcaster
    }

    pub fn broadcaster_mut(&mut self) -> &mut Broadcaster {
        &mut self.broadcaster
    }

    /// Start the match with exactly two peers, in slot order
    pub fn register_players(
        &mut self,
        roster: &[ConnectionId],
    ) -> Result<[SpawnAssignment; 2], SessionError> {
        if self.state != MatchState::Lobby {
            return Err(self.rejected("register_players"));
        }

        let &[first, second] = roster else {
            let err = SessionError::Roster {
                count: roster.len(),
            };
            error!("Cannot start match: {err}");
            return Err(err);
        };
        if first == second {
            let err = SessionError::DuplicatePeer(first);
            error!("Cannot start match: {err}");
            return Err(err);
        }

        let players = [
            self.new_player(0, first),
            self.new_player(1, second),
        ];
        let assignments = players.clone().map(|p| SpawnAssignment {
            slot: p.slot,
            connection_id: p.connection_id,
            position: p.spawn_position,
            color: p.color,
        });

        // Replicas never own simulation entities
        if self.role == Role::Authority {
            for player in &players {
                create_paddle(&mut self.world, player.slot, player.spawn_position.y);
            }
            let ball = Ball::kickoff(&self.config, &mut self.rng);
            create_ball(&mut self.world, ball);
            self.broadcaster.queue(S2C::ScoreUpdate {
                score0: 0,
                score1: 0,
            });
        }

        info!(
            "Match started: {} (left) vs {} (right), first to {}",
            first, second, self.config.win_score
        );
        self.players = Some(players);
        self.state = MatchState::Active;

        Ok(assignments)
    }

    fn new_player(&self, slot: u8, connection_id: ConnectionId) -> Player {
        Player {
            slot,
            connection_id,
            score: 0,
            color: self.config.player_color(slot),
            spawn_position: self.config.spawn_position(slot),
        }
    }

    /// Credit `amount` points to `slot`, ending the match at the limit
    pub fn add_score(&mut self, slot: u8, amount: u32) -> Result<(), SessionError> {
        self.require_active("add_score")?;

        let new_score = match self
            .players
            .as_mut()
            .and_then(|players| players.get_mut(usize::from(slot)))
        {
            Some(player) => {
                player.score = player.score.saturating_add(amount);
                player.score
            }
            None => {
                error!("add_score for unknown slot {slot}, aborting match");
                self.end_match(None)?;
                return Err(SessionError::InvalidSlot(slot));
            }
        };

        let (score0, score1) = self.scores();
        info!("Score: {score0} : {score1}");
        self.broadcaster.queue(S2C::ScoreUpdate { score0, score1 });

        if new_score >= self.config.win_score {
            self.end_match(Some(slot))?;
        }
        Ok(())
    }

    /// Finish the match. `None` means nobody won (abnormal termination).
    /// Calling it again once ended does nothing.
    pub fn end_match(&mut self, winner: Option<u8>) -> Result<(), SessionError> {
        match self.state {
            MatchState::Ended => {
                debug!("end_match ignored: already ended");
                return Ok(());
            }
            MatchState::Lobby => return Err(self.rejected("end_match")),
            MatchState::Active => {}
        }
        if self.role != Role::Authority {
            return Err(SessionError::NotAuthority { op: "end_match" });
        }

        // Ball and paddles go away with the match
        self.world.clear();

        let outcome = winner
            .and_then(|slot| self.players.as_ref()?.get(usize::from(slot)))
            .map_or(MatchOutcome::Aborted, |p| MatchOutcome::Winner(p.connection_id));

        match outcome {
            MatchOutcome::Winner(id) => info!("Match over: {id} wins"),
            MatchOutcome::Aborted => warn!("Match aborted without a winner"),
        }

        self.outcome = Some(outcome);
        self.state = MatchState::Ended;
        self.broadcaster.queue(S2C::MatchEnd(outcome));
        Ok(())
    }

    /// A peer dropped. Mid-match this ends the match with no winner.
    /// Returns true if the match was terminated.
    pub fn on_peer_disconnected(&mut self, id: ConnectionId) -> bool {
        self.broadcaster.remove_client(id);

        if self.state != MatchState::Active || self.role != Role::Authority {
            debug!("Peer {id} disconnected while {:?}", self.state);
            return false;
        }
        let registered = self
            .players
            .as_ref()
            .is_some_and(|players| players.iter().any(|p| p.connection_id == id));
        if !registered {
            debug!("Ignoring disconnect of unregistered peer {id}");
            return false;
        }

        warn!("Abnormal termination: {id} disconnected mid-match");
        self.end_match(None).is_ok()
    }

    /// Tear the session down. Any live match ends without a winner, pending
    /// messages are flushed, and every peer is handed back for release.
    pub fn shutdown(mut self) -> ShutdownSignal {
        if self.state == MatchState::Active && self.role == Role::Authority {
            if let Err(e) = self.end_match(None) {
                warn!("Shutdown could not end match: {e}");
            }
        }
        self.broadcaster.flush();
        let release = self.broadcaster.clear_clients();
        info!("Session shut down, releasing {} peer(s)", release.len());

        ShutdownSignal {
            release,
            outcome: self.outcome,
        }
    }

    /// Paddle positions come from the input layer
    pub fn set_paddle_y(&mut self, slot: u8, y: f32) -> Result<(), SessionError> {
        self.require_active("set_paddle_y")?;
        let y = self.config.clamp_paddle_y(y);
        let paddle = self
            .world
            .query_mut::<&mut Paddle>()
            .into_iter()
            .map(|(_e, paddle)| paddle)
            .find(|paddle| paddle.slot == slot)
            .ok_or(SessionError::InvalidSlot(slot))?;
        paddle.y = y;
        Ok(())
    }

    pub fn paddle_y(&self, slot: u8) -> Option<f32> {
        self.world
            .query::<&Paddle>()
            .iter()
            .find(|(_e, paddle)| paddle.slot == slot)
            .map(|(_e, paddle)| paddle.y)
    }

    /// Advance one fixed tick. Does nothing unless this instance is the
    /// authority and the match is active. Returns the slot that scored.
    pub fn tick(&mut self, dt: f32) -> Option<u8> {
        if self.role != Role::Authority || self.state != MatchState::Active {
            return None;
        }

        self.time.dt = dt;
        self.tick += 1;

        let field = field_from_world(&self.world, &self.config);
        game_core::step(
            &mut self.world,
            &mut self.time,
            &field,
            &self.config,
            &mut self.events,
            &mut self.rng,
        );

        if self.tick % 250 == 0 {
            debug!(
                "Tick {}: ball {:?}, score {:?}",
                self.tick,
                self.ball().map(|b| b.pos),
                self.scores()
            );
        }

        let scorer = self.events.scorer()?;
        if let Err(e) = self.add_score(scorer, 1) {
            warn!("Score from tick {} not applied: {e}", self.tick);
        }
        Some(scorer)
    }

    fn require_active(&self, op: &'static str) -> Result<(), SessionError> {
        if self.role != Role::Authority {
            debug!("{op} rejected on replica");
            return Err(SessionError::NotAuthority { op });
        }
        if self.state != MatchState::Active {
            return Err(self.rejected(op));
        }
        Ok(())
    }

    fn rejected(&self, op: &'static str) -> SessionError {
        debug!("{op} rejected while {:?}", self.state);
        SessionError::InvalidTransition {
            op,
            state: self.state,
        }
    }
}
