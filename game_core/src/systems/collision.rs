use crate::geometry::{jitter, reflect};
use crate::{Ball, CollisionQuery, Config, Events, GameRng, RayHit, SurfaceKind};

/// Bounce off a wall or paddle: move to the contact, reflect with a small
/// random nudge, spend the leftover distance, speed up.
///
/// The leftover travel stops at a second contact; that one is resolved on
/// the next step.
pub fn bounce<Q: CollisionQuery + ?Sized>(
    ball: &mut Ball,
    hit: &RayHit,
    distance: f32,
    field: &Q,
    config: &Config,
    events: &mut Events,
    rng: &mut GameRng,
) {
    ball.pos = hit.point;
    let remaining = (distance - hit.distance).max(0.0);

    let reflected = reflect(ball.dir, hit.normal);
    let nudged = jitter(reflected, config.bounce_jitter_radius, rng);
    // Grazing contacts can nudge back into the surface
    ball.dir = if nudged.dot(hit.normal) > 0.0 {
        nudged
    } else {
        reflected.normalize_or_zero()
    };

    let travel = field
        .cast_ray(ball.pos, ball.dir, remaining)
        .map_or(remaining, |next| next.distance);
    ball.pos += ball.dir * travel;
    ball.speed = config.bounced_speed(ball.speed);

    match hit.surface {
        SurfaceKind::Paddle(_) => events.ball_hit_paddle = true,
        _ => events.ball_hit_wall = true,
    }
}
