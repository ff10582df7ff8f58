//! Scroll speed progression

use super::state::World;
use crate::tuning::Tuning;

/// Add the per-tick increment to the scroll speed, honouring `max_speed` when set
pub fn ramp_speed(world: &mut World, tuning: &Tuning) {
    let next = world.speed + tuning.speed_increment;
    world.speed = match tuning.max_speed {
        Some(max) => next.min(max),
        None => next,
    };
}
