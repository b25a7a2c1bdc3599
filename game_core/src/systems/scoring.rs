use crate::{Ball, Config, Events, GameRng, RayHit, Side};

/// Ball reached a scoring zone: credit the opposite player and serve toward
/// the side that conceded. Leftover travel is dropped.
pub fn score_and_serve(
    ball: &mut Ball,
    hit: &RayHit,
    config: &Config,
    events: &mut Events,
    rng: &mut GameRng,
) {
    let side = Side::of_x(hit.point.x);
    match side.scorer() {
        0 => events.left_scored = true,
        _ => events.right_scored = true,
    }

    log::debug!("Ball entered {side:?} zone at {:?}", hit.point);
    ball.serve(side, config, rng);
}
