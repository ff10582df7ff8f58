//! Idle/demo mode - the AI plays the game
//!
//! Reads the world and suggests commands exactly like a player would send
//! them, so the simulation cannot tell the difference. Everything scrolls
//! across the full width, so horizontal position never decides a hit; the
//! only useful move is the jump. Without gravity the demo just rides along.

use crate::input::Command;
use crate::sim::{Rect, World, ground_line};
use crate::tuning::Tuning;

/// Jump once the nearest obstacle is this many ticks from contact
const JUMP_LEAD_TICKS: f32 = 4.0;

/// Height gained `t` ticks after a jump from the ground
pub fn jump_rise(tuning: &Tuning, t: u32) -> f32 {
    let t = t as f32;
    t * tuning.jump_impulse - tuning.gravity * t * (t + 1.0) / 2.0
}

/// Ticks a jump from the ground keeps the player airborne
pub fn airtime_ticks(tuning: &Tuning) -> u32 {
    if tuning.gravity <= 0.0 {
        return u32::MAX;
    }
    (2.0 * tuning.jump_impulse / tuning.gravity).ceil() as u32
}

/// Suggest the commands for the next tick
pub fn suggest(world: &World, tuning: &Tuning) -> Vec<Command> {
    if world.is_game_over() || !tuning.variant.has_gravity() || world.player.airborne {
        return Vec::new();
    }

    let player = world.player.rect;
    let speed = world.speed.max(f32::EPSILON);

    // Gap to the nearest obstacle still ahead of (or under) the player
    let gap = world
        .obstacles
        .iter()
        .filter(|o| o.rect.right() > player.left())
        .map(|o| o.rect.left() - player.right())
        .fold(f32::INFINITY, f32::min);

    // A move command can close the gap one extra step per tick
    if gap <= (speed + tuning.player_step) * JUMP_LEAD_TICKS {
        return vec![Command::Jump];
    }

    let airtime = airtime_ticks(tuning);
    let landing_clear = gap > speed * airtime as f32 + tuning.obstacle_size + player.size.x;
    if landing_clear && collectible_in_reach(world, tuning, airtime) {
        return vec![Command::Jump];
    }

    Vec::new()
}

/// Would a jump started now touch any collectible on the way up or down?
fn collectible_in_reach(world: &World, tuning: &Tuning, airtime: u32) -> bool {
    let player = world.player.rect;
    let ground = ground_line(world.viewport, tuning);

    (1..=airtime.min(240)).any(|t| {
        let y = (ground - jump_rise(tuning, t)).max(0.0);
        let at_t = Rect::new(player.left(), y, player.size.x, player.size.y);
        let scroll = world.speed * t as f32;
        world.collectibles.iter().any(|c| {
            let mut rect = c.rect;
            rect.pos.x -= scroll;
            at_t.overlaps(&rect)
        })
    })
}
