//! Authoritative match host: session state machine, broadcast queue,
//! replica view and tick driver

pub mod broadcast;
pub mod driver;
pub mod error;
pub mod replica;
pub mod session;


pub use broadcast::{Broadcaster, GameClient};
pub use driver::TickDriver;
pub use error::{SessionError, TransportError};
pub use replica::{MatchView, ViewOutcome};
pub use session::{MatchSession, MatchState, Player, Role, ShutdownSignal, SpawnAssignment};
