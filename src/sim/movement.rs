//! Scrolling, player gravity and despawning

use super::state::{World, ground_line};
use crate::tuning::Tuning;

/// Advance every entity one tick.
///
/// Entities move left by the current scroll speed and are dropped once their
/// right edge is past x = 0. Removal goes through `retain` so neighbours of a
/// removed entity are never skipped.
pub fn move_entities(world: &mut World, tuning: &Tuning) {
    let speed = world.speed;

    for obstacle in &mut world.obstacles {
        obstacle.rect.pos.x -= speed;
    }
    for collectible in &mut world.collectibles {
        collectible.rect.pos.x -= speed;
    }

    let before = world.obstacles.len() + world.collectibles.len();
    world.obstacles.retain(|o| !o.rect.is_offscreen_left());
    world.collectibles.retain(|c| !c.rect.is_offscreen_left());
    let despawned = before - (world.obstacles.len() + world.collectibles.len());
    if despawned > 0 {
        log::debug!("Despawned {} entities at tick {}", despawned, world.time_ticks);
    }

    if tuning.variant.has_gravity() {
        apply_gravity(world, tuning);
    }
}

/// Integrate vertical velocity and land on the ground line
fn apply_gravity(world: &mut World, tuning: &Tuning) {
    let ground = ground_line(world.viewport, tuning);
    let player = &mut world.player;

    player.vel_y += tuning.gravity;
    player.rect.pos.y += player.vel_y;

    if player.rect.pos.y >= ground {
        player.rect.pos.y = ground;
        player.vel_y = 0.0;
        player.airborne = false;
    } else if player.rect.pos.y < 0.0 {
        // Bonk on the top of the viewport
        player.rect.pos.y = 0.0;
        player.vel_y = 0.0;
    }
}
