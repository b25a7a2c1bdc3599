pub mod components;
pub mod geometry;
pub mod map;
pub mod params;
pub mod resources;
pub mod systems;

pub use components::*;
pub use map::*;
pub use params::*;
pub use resources::*;

use hecs::World;
use systems::*;

/// Run the ball simulation for one tick
///
/// Only the authoritative instance calls this. `events` is cleared first and
/// reports what happened during the tick; once a point is scored the rest
/// of the tick is skipped so the caller can apply the score.
pub fn step<Q: CollisionQuery + ?Sized>(
    world: &mut World,
    time: &mut Time,
    field: &Q,
    config: &Config,
    events: &mut Events,
    rng: &mut GameRng,
) {
    events.clear();

    // Clamp dt to prevent large jumps
    let clamped_dt = time.dt.min(Params::MAX_DT);

    // Fixed micro-steps for stable physics
    let mut remaining_dt = clamped_dt;
    while remaining_dt > 0.0 {
        let step_dt = remaining_dt.min(Params::FIXED_DT);
        remaining_dt -= step_dt;

        let step_time = Time {
            dt: step_dt,
            now: time.now + (clamped_dt - remaining_dt),
        };

        move_ball(world, &step_time, field, config, events, rng);

        if events.scorer().is_some() {
            break;
        }
    }

    // Update time
    time.now += clamped_dt;
}

/// Helper to create a paddle entity
pub fn create_paddle(world: &mut World, slot: u8, y: f32) -> hecs::Entity {
    world.spawn((Paddle::new(slot, y),))
}

/// Helper to create the ball entity
pub fn create_ball(world: &mut World, ball: Ball) -> hecs::Entity {
    world.spawn((ball,))
}

/// Copy of the current ball, if one exists
pub fn ball_snapshot(world: &World) -> Option<Ball> {
    world.query::<&Ball>().iter().next().map(|(_e, ball)| *ball)
}

/// Field geometry with every paddle currently in the world
pub fn field_from_world(world: &World, config: &Config) -> Field {
    let mut field = Field::new(config);
    for (_e, paddle) in world.query::<&Paddle>().iter() {
        field.add_paddle(config, paddle);
    }
    field
}
