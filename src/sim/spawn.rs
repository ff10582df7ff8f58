//! Entity spawning at the right edge of the viewport

use rand::Rng;

use super::rect::Rect;
use super::state::{CollectibleKind, GameEvent, ObstacleKind, World};
use crate::tuning::Tuning;

/// Roll both spawn chances for this tick.
///
/// Obstacles sit on the floor; collectibles float at a random height at
/// least `collectible_margin` away from the top and bottom edges. There is no
/// cap on how many entities may be alive at once.
pub fn spawn_entities<R: Rng>(world: &mut World, tuning: &Tuning, rng: &mut R) {
    if rng.random::<f64>() < tuning.obstacle_spawn_chance {
        let kind = ObstacleKind::ALL[rng.random_range(0..ObstacleKind::ALL.len())];
        let rect = Rect::new(
            world.viewport.width,
            world.viewport.height - tuning.obstacle_ground_offset,
            tuning.obstacle_size,
            tuning.obstacle_size,
        );
        let id = world.push_obstacle(kind, rect);
        world.events.push(GameEvent::ObstacleSpawned { id, kind });
        log::debug!("Spawned {} #{} at tick {}", kind.as_str(), id, world.time_ticks);
    }

    if rng.random::<f64>() < tuning.collectible_spawn_chance {
        let kind = CollectibleKind::ALL[rng.random_range(0..CollectibleKind::ALL.len())];
        let band = (world.viewport.height - 2.0 * tuning.collectible_margin).max(0.0);
        let y = tuning.collectible_margin + rng.random::<f32>() * band;
        let rect = Rect::new(
            world.viewport.width,
            y,
            tuning.collectible_size,
            tuning.collectible_size,
        );
        let id = world.push_collectible(kind, rect);
        world.events.push(GameEvent::CollectibleSpawned { id, kind });
        log::debug!("Spawned {} #{} at tick {}", kind.as_str(), id, world.time_ticks);
    }
}
