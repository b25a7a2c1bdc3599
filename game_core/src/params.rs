use glam::Vec2;

/// Game tuning parameters for Pong
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Field (centred on the origin)
    pub const FIELD_HALF_WIDTH: f32 = 9.0;
    pub const FIELD_HALF_HEIGHT: f32 = 5.0;
    pub const WALL_THICKNESS: f32 = 1.0;
    pub const SCORING_ZONE_DEPTH: f32 = 1.0;

    // Paddle
    pub const PADDLE_X: f32 = 8.0; // Distance of each paddle from the centre line
    pub const PADDLE_WIDTH: f32 = 0.3;
    pub const PADDLE_HEIGHT: f32 = 2.0;

    // Ball
    pub const BALL_START_SPEED: f32 = 3.0;
    pub const BALL_MAX_SPEED: f32 = 15.0;
    pub const BALL_SPEED_INCREMENT: f32 = 0.2; // Added on every bounce
    pub const BOUNCE_JITTER_RADIUS: f32 = 0.05;
    pub const SERVE_JITTER_RADIUS: f32 = 1.0;
    pub const SERVE_BAND: f32 = 3.0; // Serve y is drawn from [-SERVE_BAND, SERVE_BAND]

    // Score
    pub const WIN_SCORE: u32 = 11;

    // Physics
    pub const FIXED_DT: f32 = 0.02; // 50 Hz
    pub const MAX_DT: f32 = 0.1;
    pub const MAX_FRAME_TIME: f32 = 0.25; // Wall-clock catch-up limit for the tick driver

    // Presentation hand-off
    pub const PLAYER_COLORS: [[f32; 4]; 2] = [
        [0.95, 0.35, 0.35, 1.0], // Left: red
        [0.35, 0.55, 0.95, 1.0], // Right: blue
    ];
}

/// Game configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub field_half_width: f32,
    pub field_half_height: f32,
    pub wall_thickness: f32,
    pub scoring_zone_depth: f32,
    pub paddle_x: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub ball_start_speed: f32,
    pub ball_max_speed: f32,
    pub ball_speed_increment: f32,
    pub bounce_jitter_radius: f32,
    pub serve_jitter_radius: f32,
    pub serve_band: f32,
    pub win_score: u32,
    pub player_colors: [[f32; 4]; 2],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field_half_width: Params::FIELD_HALF_WIDTH,
            field_half_height: Params::FIELD_HALF_HEIGHT,
            wall_thickness: Params::WALL_THICKNESS,
            scoring_zone_depth: Params::SCORING_ZONE_DEPTH,
            paddle_x: Params::PADDLE_X,
            paddle_width: Params::PADDLE_WIDTH,
            paddle_height: Params::PADDLE_HEIGHT,
            ball_start_speed: Params::BALL_START_SPEED,
            ball_max_speed: Params::BALL_MAX_SPEED,
            ball_speed_increment: Params::BALL_SPEED_INCREMENT,
            bounce_jitter_radius: Params::BOUNCE_JITTER_RADIUS,
            serve_jitter_radius: Params::SERVE_JITTER_RADIUS,
            serve_band: Params::SERVE_BAND,
            win_score: Params::WIN_SCORE,
            player_colors: Params::PLAYER_COLORS,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get X position for paddle based on slot
    pub fn paddle_x(&self, slot: u8) -> f32 {
        if slot == 0 {
            -self.paddle_x // Left paddle
        } else {
            self.paddle_x // Right paddle
        }
    }

    /// Where the paddle for `slot` is placed when the match starts
    pub fn spawn_position(&self, slot: u8) -> Vec2 {
        Vec2::new(self.paddle_x(slot), 0.0)
    }

    pub fn player_color(&self, slot: u8) -> [f32; 4] {
        self.player_colors[usize::from(slot.min(1))]
    }

    /// Clamp paddle Y so the paddle stays between the walls
    pub fn clamp_paddle_y(&self, y: f32) -> f32 {
        let limit = self.field_half_height - self.paddle_height / 2.0;
        y.clamp(-limit, limit)
    }

    /// Speed after one more bounce
    pub fn bounced_speed(&self, speed: f32) -> f32 {
        (speed + self.ball_speed_increment).min(self.ball_max_speed)
    }
}
