use glam::Vec2;

use crate::{Config, Paddle, Side};

/// Penetration tolerated when a ray starts just past a face it is entering
const SURFACE_EPSILON: f32 = 1e-4;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Slab test. Returns the entry distance and the face normal of the
    /// first face crossed. Rays starting inside (or on the surface, moving
    /// out) never hit; rays starting a hair past the entry face hit at 0.
    pub fn ray_cast(&self, origin: Vec2, dir: Vec2, max_distance: f32) -> Option<(f32, Vec2)> {
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut normal = Vec2::ZERO;

        for (o, d, lo, hi, axis) in [
            (origin.x, dir.x, self.min.x, self.max.x, Vec2::X),
            (origin.y, dir.y, self.min.y, self.max.y, Vec2::Y),
        ] {
            if d.abs() <= f32::EPSILON {
                // Parallel to this slab
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let (t0, t1) = {
                let a = (lo - o) * inv;
                let b = (hi - o) * inv;
                if a <= b {
                    (a, b)
                } else {
                    (b, a)
                }
            };

            if t0 > t_enter {
                t_enter = t0;
                normal = axis * -d.signum();
            }
            t_exit = t_exit.min(t1);
            if t_enter > t_exit {
                return None;
            }
        }

        if t_enter < -SURFACE_EPSILON || t_enter > max_distance {
            return None;
        }
        Some((t_enter.max(0.0), normal))
    }
}

/// What a ray ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    Wall,
    Paddle(u8),
    ScoringZone(Side),
}

#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    pub point: Vec2,
    pub normal: Vec2,
    pub distance: f32,
    pub surface: SurfaceKind,
}

/// Ray query against the play field
pub trait CollisionQuery {
    fn cast_ray(&self, origin: Vec2, dir: Vec2, max_distance: f32) -> Option<RayHit>;
}

/// Static play field: two walls, two scoring zones and whatever paddles
/// are currently placed
#[derive(Debug, Clone)]
pub struct Field {
    surfaces: Vec<(Aabb, SurfaceKind)>,
}

impl Field {
    /// Walls and scoring zones only
    pub fn new(config: &Config) -> Self {
        let hw = config.field_half_width;
        let hh = config.field_half_height;
        let wall = config.wall_thickness;
        let depth = config.scoring_zone_depth;

        let surfaces = vec![
            // Top and bottom walls
            (
                Aabb::new(Vec2::new(-hw, hh), Vec2::new(hw, hh + wall)),
                SurfaceKind::Wall,
            ),
            (
                Aabb::new(Vec2::new(-hw, -hh - wall), Vec2::new(hw, -hh)),
                SurfaceKind::Wall,
            ),
            // Scoring zones beyond each boundary, covering the wall ends
            (
                Aabb::new(Vec2::new(-hw - depth, -hh - wall), Vec2::new(-hw, hh + wall)),
                SurfaceKind::ScoringZone(Side::Left),
            ),
            (
                Aabb::new(Vec2::new(hw, -hh - wall), Vec2::new(hw + depth, hh + wall)),
                SurfaceKind::ScoringZone(Side::Right),
            ),
        ];

        Self { surfaces }
    }

    /// Field with the given paddles placed
    pub fn with_paddles<'a>(config: &Config, paddles: impl IntoIterator<Item = &'a Paddle>) -> Self {
        let mut field = Self::new(config);
        for paddle in paddles {
            field.add_paddle(config, paddle);
        }
        field
    }

    pub fn add_paddle(&mut self, config: &Config, paddle: &Paddle) {
        let center = Vec2::new(config.paddle_x(paddle.slot), paddle.y);
        let size = Vec2::new(config.paddle_width, config.paddle_height);
        self.surfaces.push((
            Aabb::from_center_size(center, size),
            SurfaceKind::Paddle(paddle.slot),
        ));
    }

    pub fn surfaces(&self) -> &[(Aabb, SurfaceKind)] {
        &self.surfaces
    }
}

impl CollisionQuery for Field {
    fn cast_ray(&self, origin: Vec2, dir: Vec2, max_distance: f32) -> Option<RayHit> {
        let mut nearest: Option<RayHit> = None;
        for (aabb, surface) in &self.surfaces {
            // Already past the boundary: the rally is over
            if matches!(surface, SurfaceKind::ScoringZone(_)) && aabb.contains(origin) {
                return Some(RayHit {
                    point: origin,
                    normal: -dir,
                    distance: 0.0,
                    surface: *surface,
                });
            }
            if let Some((distance, normal)) = aabb.ray_cast(origin, dir, max_distance) {
                if nearest.map_or(true, |hit| distance < hit.distance) {
                    nearest = Some(RayHit {
                        point: origin + dir * distance,
                        normal,
                        distance,
                        surface: *surface,
                    });
                }
            }
        }
        nearest
    }
}
