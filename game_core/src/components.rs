use glam::Vec2;

use crate::geometry::serve_direction;
use crate::{Config, GameRng};

/// Side of the field, as seen from the centre line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Unit vector pointing from the centre toward this side
    pub fn axis(self) -> Vec2 {
        match self {
            Side::Left => Vec2::NEG_X,
            Side::Right => Vec2::X,
        }
    }

    /// Slot credited when the ball enters this side's scoring zone
    pub fn scorer(self) -> u8 {
        match self {
            Side::Left => 1,
            Side::Right => 0,
        }
    }

    /// Side whose scoring zone contains a point with this x
    pub fn of_x(x: f32) -> Self {
        if x < 0.0 {
            Side::Left
        } else {
            Side::Right
        }
    }
}

/// Paddle component - a player's paddle, moved by the input layer
#[derive(Debug, Clone, Copy)]
pub struct Paddle {
    pub slot: u8, // 0 = left, 1 = right
    pub y: f32,
}

impl Paddle {
    pub fn new(slot: u8, y: f32) -> Self {
        Self { slot, y }
    }
}

/// Ball component - the pong ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub dir: Vec2, // Always unit length
    pub speed: f32,
}

impl Ball {
    pub fn new(pos: Vec2, dir: Vec2, speed: f32) -> Self {
        Self { pos, dir, speed }
    }

    /// Opening ball: at the centre, served toward the left
    pub fn kickoff(config: &Config, rng: &mut GameRng) -> Self {
        let dir = serve_direction(Side::Left.axis(), config.serve_jitter_radius, rng);
        Self::new(Vec2::ZERO, dir, config.ball_start_speed)
    }

    /// Reset after a point: served toward `toward`, from a random height
    /// on the centre line, at start speed
    pub fn serve(&mut self, toward: Side, config: &Config, rng: &mut GameRng) {
        self.dir = serve_direction(toward.axis(), config.serve_jitter_radius, rng);
        self.pos = Vec2::new(0.0, rng.symmetric(config.serve_band));
        self.speed = config.ball_start_speed;
    }

    pub fn velocity(&self) -> Vec2 {
        self.dir * self.speed
    }
}
