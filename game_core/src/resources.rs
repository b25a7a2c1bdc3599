/// Time resource for tracking simulation time
#[derive(Debug, Clone, Copy)]
pub struct Time {
    pub dt: f32,  // Delta time for this step
    pub now: f32, // Total elapsed time
}

impl Time {
    pub fn new(dt: f32, now: f32) -> Self {
        Self { dt, now }
    }
}

impl Default for Time {
    fn default() -> Self {
        Self {
            dt: crate::Params::FIXED_DT,
            now: 0.0,
        }
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }

    /// Uniform draw from `[-half_range, half_range]`
    pub fn symmetric(&mut self, half_range: f32) -> f32 {
        use rand::Rng;
        if half_range <= 0.0 {
            return 0.0;
        }
        self.0.gen_range(-half_range..=half_range)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Events that occurred during this step
#[derive(Debug, Clone, Default)]
pub struct Events {
    pub left_scored: bool,  // Ball entered the right zone
    pub right_scored: bool, // Ball entered the left zone
    pub ball_hit_paddle: bool,
    pub ball_hit_wall: bool,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.left_scored = false;
        self.right_scored = false;
        self.ball_hit_paddle = false;
        self.ball_hit_wall = false;
    }

    /// Slot credited with a point this step, if any
    pub fn scorer(&self) -> Option<u8> {
        if self.left_scored {
            Some(0)
        } else if self.right_scored {
            Some(1)
        } else {
            None
        }
    }
}
