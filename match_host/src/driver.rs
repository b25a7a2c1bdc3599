use game_core::Params;
use log::debug;

use crate::session::MatchSession;

/// Fixed-rate tick loop with catch-up, fed by wall-clock time
#[derive(Debug, Clone)]
pub struct TickDriver {
    step: f32,
    accumulator: f32,
    ticks: u64,
}

impl Default for TickDriver {
    fn default() -> Self {
        Self::with_step(Params::FIXED_DT)
    }
}

impl TickDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_step(step: f32) -> Self {
        Self {
            step,
            accumulator: 0.0,
            ticks: 0,
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Total ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Feed `elapsed` seconds and run every whole tick that fits, flushing
    /// broadcasts after each one. Returns the number of ticks run.
    pub fn advance(&mut self, session: &mut MatchSession, elapsed: f32) -> u32 {
        // Clamp to prevent a spiral of death after a stall
        self.accumulator += elapsed.clamp(0.0, Params::MAX_FRAME_TIME);

        let mut ran = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            session.tick(self.step);
            session.broadcaster_mut().flush();
            ran += 1;
        }

        self.ticks += u64::from(ran);
        if ran > 1 {
            debug!("Caught up {ran} ticks");
        }
        ran
    }
}
