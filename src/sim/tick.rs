//! Per-frame simulation tick
//!
//! Core game loop that advances the world by one frame, strictly in the order
//! input → spawn → move → render → collide → ramp.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::resolve_collisions;
use super::difficulty::ramp_speed;
use super::movement::move_entities;
use super::spawn::spawn_entities;
use super::state::{GamePhase, World};
use crate::consts::MAX_QUEUED_EVENTS;
use crate::render::RenderSink;
use crate::tuning::Tuning;

/// Horizontal move direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Latest horizontal move received since the previous tick
    pub direction: Option<Direction>,
    /// Jump requested (ignored while airborne or without gravity)
    pub jump: bool,
}

/// Apply player input at the start of a tick
fn apply_input(world: &mut World, input: &TickInput, tuning: &Tuning) {
    if let Some(direction) = input.direction {
        let dx = match direction {
            Direction::Left => -tuning.player_step,
            Direction::Right => tuning.player_step,
        };
        world.player.shift_x(dx, world.viewport);
    }

    if input.jump && tuning.variant.has_gravity() && world.player.jump(tuning.jump_impulse) {
        log::debug!("Jump at tick {}", world.time_ticks);
    }
}

/// Advance the world by one frame.
///
/// Returns `true` while the run is still going and the caller should schedule
/// another frame; `false` once the world is (or already was) in `GameOver`.
pub fn tick<R: Rng>(
    world: &mut World,
    input: &TickInput,
    tuning: &Tuning,
    rng: &mut R,
    sink: &mut dyn RenderSink,
) -> bool {
    if world.phase == GamePhase::GameOver {
        return false;
    }

    world.time_ticks += 1;
    world.trim_events(MAX_QUEUED_EVENTS);

    apply_input(world, input, tuning);
    spawn_entities(world, tuning, rng);
    move_entities(world, tuning);

    sink.draw(world);

    if resolve_collisions(world, tuning).crashed {
        return false;
    }

    ramp_speed(world, tuning);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NullSink;
    use crate::sim::rect::Rect;
    use crate::sim::state::{CollectibleKind, GameEvent, ObstacleKind, Viewport};
    use crate::tuning::Variant;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Records how many obstacles/collectibles each frame showed
    #[derive(Default)]
    struct FrameLog {
        frames: Vec<(usize, usize, f32)>,
    }

    impl RenderSink for FrameLog {
        fn draw(&mut self, world: &World) {
            let first_x = world.obstacles.first().map(|o| o.rect.left()).unwrap_or(f32::NAN);
            self.frames
                .push((world.obstacles.len(), world.collectibles.len(), first_x));
        }
    }

    fn scripted(variant: Variant) -> (World, Tuning, Pcg32) {
        let tuning = Tuning::for_variant(variant).without_spawns();
        let world = World::new(Viewport::new(800.0, 400.0), &tuning);
        (world, tuning, Pcg32::seed_from_u64(0))
    }

    #[test]
    fn test_obstacle_crash_timing() {
        let (mut world, tuning, mut rng) = scripted(Variant::Classic);
        world.player.rect = Rect::new(100.0, 360.0, 30.0, 30.0);
        world.push_obstacle(ObstacleKind::Tree, Rect::new(500.0, 360.0, 40.0, 40.0));
        let input = TickInput::default();

        // Leading edge reaches the player's right edge (130) when
        // 500 - 5n < 130, i.e. first on tick 75 (x = 125)
        for n in 1..75 {
            assert!(
                tick(&mut world, &input, &tuning, &mut rng, &mut NullSink),
                "crashed early at tick {n}"
            );
        }
        assert_eq!(world.obstacles[0].rect.left(), 130.0);

        assert!(!tick(&mut world, &input, &tuning, &mut rng, &mut NullSink));
        assert_eq!(world.phase, GamePhase::GameOver);
        assert_eq!(world.time_ticks, 75);
        assert_eq!(world.obstacles[0].rect.left(), 125.0);
    }

    #[test]
    fn test_obstacle_at_95_overlaps_player() {
        // 500 - 5 * 81 = 95: well inside the player's span
        let obstacle = Rect::new(500.0 - 5.0 * 81.0, 360.0, 40.0, 40.0);
        let player = Rect::new(100.0, 360.0, 30.0, 30.0);
        assert_eq!(obstacle.left(), 95.0);
        assert!(player.overlaps(&obstacle));
    }

    #[test]
    fn test_game_over_halts_ticks() {
        let (mut world, tuning, mut rng) = scripted(Variant::Classic);
        world.push_obstacle(ObstacleKind::Car, world.player.rect);
        world.push_obstacle(ObstacleKind::Deer, Rect::new(700.0, 360.0, 40.0, 40.0));

        assert!(!tick(&mut world, &TickInput::default(), &tuning, &mut rng, &mut NullSink));
        let ticks = world.time_ticks;
        let far_x = world.obstacles[1].rect.left();

        for _ in 0..10 {
            assert!(!tick(&mut world, &TickInput::default(), &tuning, &mut rng, &mut NullSink));
        }
        assert_eq!(world.time_ticks, ticks);
        assert_eq!(world.obstacles[1].rect.left(), far_x);
        let crashes = world
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::Crashed { .. }))
            .count();
        assert_eq!(crashes, 1);
    }

    #[test]
    fn test_burger_aligned_with_player_scores_same_tick() {
        let (mut world, tuning, mut rng) = scripted(Variant::Classic);
        world.player.rect = Rect::new(100.0, 360.0, 30.0, 30.0);
        // After one scroll step it sits at 125..145, overlapping 100..130
        world.push_collectible(CollectibleKind::Burger, Rect::new(130.0, 360.0, 20.0, 20.0));

        assert!(tick(&mut world, &TickInput::default(), &tuning, &mut rng, &mut NullSink));

        assert_eq!(world.score, 5);
        assert!(world.collectibles.is_empty());
    }

    #[test]
    fn test_render_sees_moved_world_before_collision() {
        let (mut world, tuning, mut rng) = scripted(Variant::Classic);
        world.push_collectible(CollectibleKind::Drink, Rect::new(130.0, 360.0, 20.0, 20.0));
        world.push_obstacle(ObstacleKind::Tree, Rect::new(600.0, 360.0, 40.0, 40.0));
        let mut log = FrameLog::default();

        tick(&mut world, &TickInput::default(), &tuning, &mut rng, &mut log);

        // The drink is still drawn on the frame it gets picked up
        assert_eq!(log.frames, vec![(1, 1, 595.0)]);
        assert!(world.collectibles.is_empty());
    }

    #[test]
    fn test_input_moves_player_then_world() {
        let (mut world, tuning, mut rng) = scripted(Variant::Classic);
        let input = TickInput {
            direction: Some(Direction::Right),
            ..Default::default()
        };
        tick(&mut world, &input, &tuning, &mut rng, &mut NullSink);
        assert_eq!(world.player.rect.left(), 105.0);

        let input = TickInput {
            direction: Some(Direction::Left),
            ..Default::default()
        };
        tick(&mut world, &input, &tuning, &mut rng, &mut NullSink);
        tick(&mut world, &input, &tuning, &mut rng, &mut NullSink);
        assert_eq!(world.player.rect.left(), 95.0);
    }

    #[test]
    fn test_jump_ignored_in_classic() {
        let (mut world, tuning, mut rng) = scripted(Variant::Classic);
        let input = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut world, &input, &tuning, &mut rng, &mut NullSink);
        assert!(!world.player.airborne);
        assert_eq!(world.player.rect.top(), 350.0);
    }

    #[test]
    fn test_jump_clears_obstacle() {
        let (mut world, tuning, mut rng) = scripted(Variant::Jumper);
        // Obstacle leading edge 20 px ahead of the player
        world.push_obstacle(ObstacleKind::Bear, Rect::new(150.0, 360.0, 40.0, 40.0));

        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        assert!(tick(&mut world, &jump, &tuning, &mut rng, &mut NullSink));
        for _ in 0..60 {
            assert!(tick(&mut world, &TickInput::default(), &tuning, &mut rng, &mut NullSink));
        }
        assert!(!world.player.airborne);
    }

    #[test]
    fn test_jumper_speed_ramps_each_tick() {
        let (mut world, tuning, mut rng) = scripted(Variant::Jumper);
        for _ in 0..200 {
            tick(&mut world, &TickInput::default(), &tuning, &mut rng, &mut NullSink);
        }
        assert!((world.speed - 6.0).abs() < 0.001);
    }

    #[test]
    fn test_speed_does_not_ramp_on_crash_tick() {
        let (mut world, tuning, mut rng) = scripted(Variant::Jumper);
        world.push_obstacle(ObstacleKind::Car, world.player.rect);
        tick(&mut world, &TickInput::default(), &tuning, &mut rng, &mut NullSink);
        assert_eq!(world.speed, 5.0);
    }

    #[test]
    fn test_determinism() {
        let tuning = Tuning::for_variant(Variant::Jumper);
        let mut world1 = World::new(Viewport::default(), &tuning);
        let mut world2 = World::new(Viewport::default(), &tuning);
        let mut rng1 = Pcg32::seed_from_u64(99999);
        let mut rng2 = Pcg32::seed_from_u64(99999);

        let inputs = [
            TickInput {
                direction: Some(Direction::Right),
                ..Default::default()
            },
            TickInput {
                jump: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for i in 0..600 {
            let input = &inputs[i % inputs.len()];
            tick(&mut world1, input, &tuning, &mut rng1, &mut NullSink);
            tick(&mut world2, input, &tuning, &mut rng2, &mut NullSink);
        }

        assert_eq!(world1.time_ticks, world2.time_ticks);
        assert_eq!(world1.score, world2.score);
        assert_eq!(world1.phase, world2.phase);
        assert_eq!(world1.obstacles.len(), world2.obstacles.len());
        assert_eq!(world1.player.rect, world2.player.rect);
    }

    #[test]
    fn test_undrained_events_stay_bounded() {
        let mut tuning = Tuning::for_variant(Variant::Classic).without_spawns();
        tuning.collectible_spawn_chance = 1.0;
        let mut world = World::new(Viewport::new(800.0, 400.0), &tuning);
        world.player.rect.pos.y = 0.0;
        world.player.rect.size = glam::Vec2::new(1.0, 1.0);
        let mut rng = Pcg32::seed_from_u64(3);

        for _ in 0..20_000 {
            tick(&mut world, &TickInput::default(), &tuning, &mut rng, &mut NullSink);
            // One spawn event per tick on top of the kept backlog
            assert!(world.events.len() <= MAX_QUEUED_EVENTS + 1);
        }
        // The newest event is still the latest spawn
        assert!(matches!(
            world.events.last(),
            Some(GameEvent::CollectibleSpawned { .. })
        ));
    }

    #[test]
    fn test_long_run_entity_count_stays_bounded() {
        // Invincible-style run: no obstacles, collectibles spawn every tick
        let mut tuning = Tuning::for_variant(Variant::Classic).without_spawns();
        tuning.collectible_spawn_chance = 1.0;
        tuning.speed_increment = 0.005;
        let mut world = World::new(Viewport::new(800.0, 400.0), &tuning);
        // Park the player where nothing can reach it
        world.player.rect.pos.y = 0.0;
        world.player.rect.size = glam::Vec2::new(1.0, 1.0);
        let mut rng = Pcg32::seed_from_u64(5);

        let mut peak = 0;
        for _ in 0..50_000 {
            tick(&mut world, &TickInput::default(), &tuning, &mut rng, &mut NullSink);
            peak = peak.max(world.collectibles.len());
        }
        // At >= 5 px/tick an 820 px trip takes at most 164 ticks
        assert!(peak <= 165, "peak {peak}");
        assert_eq!(world.phase, GamePhase::Running);
    }
}
