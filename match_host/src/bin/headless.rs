//! Plays one match between two scripted paddles over a loopback transport.
//!
//! Usage: headless [seed]
//! Set RUST_LOG=debug for per-point detail.

use std::cell::RefCell;
use std::rc::Rc;

use log::{info, warn};
use match_host::{GameClient, MatchSession, MatchState, MatchView, TickDriver, TransportError};
use proto::{ConnectionId, S2C};

/// Paddle travel per second for the scripted players
const PADDLE_SPEED: f32 = 6.0;
/// Upper bound on simulated ticks (about half an hour of play)
const MAX_TICKS: u64 = 90_000;

/// Delivers bytes straight into an in-process view
struct Loopback {
    id: ConnectionId,
    view: Rc<RefCell<MatchView>>,
}

impl GameClient for Loopback {
    fn connection_id(&self) -> ConnectionId {
        self.id
    }

    fn send_bytes(&self, bytes: &[u8]) -> Result<(), TransportError> {
        self.view
            .borrow_mut()
            .apply_bytes(bytes)
            .map_err(|e| TransportError::Send {
                id: self.id,
                reason: e.to_string(),
            })
    }
}

/// Move each paddle toward the ball, no faster than `PADDLE_SPEED`
fn track_ball(session: &mut MatchSession, dt: f32) {
    let Some(ball) = session.ball() else {
        return;
    };
    for slot in 0..2u8 {
        let Some(y) = session.paddle_y(slot) else {
            continue;
        };
        let max_step = PADDLE_SPEED * dt;
        let target = y + (ball.pos.y - y).clamp(-max_step, max_step);
        if let Err(e) = session.set_paddle_y(slot, target) {
            warn!("Paddle {slot} not moved: {e}");
        }
    }
}

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(12345);

    let ids = [ConnectionId(1), ConnectionId(2)];
    let views = ids.map(|id| Rc::new(RefCell::new(MatchView::new(id))));

    let mut session = MatchSession::authority(seed);
    for (id, view) in ids.iter().zip(&views) {
        session.add_client(Box::new(Loopback {
            id: *id,
            view: view.clone(),
        }));
    }

    let spawns = match session.register_players(&ids) {
        Ok(spawns) => spawns,
        Err(e) => {
            eprintln!("Could not start match: {e}");
            std::process::exit(1);
        }
    };
    for spawn in &spawns {
        info!("{} takes slot {} at {:?}", spawn.connection_id, spawn.slot, spawn.position);
        let welcome = S2C::Welcome {
            connection_id: spawn.connection_id,
            slot: spawn.slot,
        };
        if let Err(e) = session.broadcaster().send_to(spawn.connection_id, &welcome) {
            warn!("Welcome not delivered: {e}");
        }
    }

    let mut driver = TickDriver::new();
    let dt = driver.step();
    while session.state() == MatchState::Active && driver.ticks() < MAX_TICKS {
        track_ball(&mut session, dt);
        driver.advance(&mut session, dt);
    }

    if session.state() == MatchState::Active {
        warn!("Tick limit reached, stopping match");
    }
    let signal = session.shutdown();

    for view in &views {
        let view = view.borrow();
        println!(
            "{}: slot {:?}, score {}, result {:?}",
            view.me().map_or_else(|| "?".to_string(), |id| id.to_string()),
            view.slot(),
            view.score_text(),
            view.outcome()
        );
    }
    println!(
        "Released {} peer(s), outcome {:?}",
        signal.release.len(),
        signal.outcome
    );
}
