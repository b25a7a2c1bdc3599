use crate::{Ball, CollisionQuery, Config, Events, GameRng, SurfaceKind, Time};
use hecs::World;

use super::{bounce, score_and_serve};

/// Advance the ball one fixed step, resolving at most one contact
pub fn move_ball<Q: CollisionQuery + ?Sized>(
    world: &mut World,
    time: &Time,
    field: &Q,
    config: &Config,
    events: &mut Events,
    rng: &mut GameRng,
) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        advance_ball(ball, time.dt, field, config, events, rng);
    }
}

/// Per-ball step: free flight, serve after a score, or bounce
pub fn advance_ball<Q: CollisionQuery + ?Sized>(
    ball: &mut Ball,
    dt: f32,
    field: &Q,
    config: &Config,
    events: &mut Events,
    rng: &mut GameRng,
) {
    let distance = ball.speed * dt;

    match field.cast_ray(ball.pos, ball.dir, distance) {
        None => ball.pos += ball.dir * distance,
        Some(hit) => match hit.surface {
            SurfaceKind::ScoringZone(_) => score_and_serve(ball, &hit, config, events, rng),
            SurfaceKind::Wall | SurfaceKind::Paddle(_) => {
                bounce(ball, &hit, distance, field, config, events, rng)
            }
        },
    }
}
