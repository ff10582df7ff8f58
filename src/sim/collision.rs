//! Collision detection and response
//!
//! Player vs obstacle ends the run; player vs collectible scores and removes
//! the collectible.

use super::state::{GameEvent, GamePhase, World};
use crate::tuning::Tuning;

/// Result of resolving collisions for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionOutcome {
    /// An obstacle was hit this tick
    pub crashed: bool,
    /// Number of collectibles picked up
    pub collected: usize,
    /// Points awarded this tick
    pub points: u64,
}

/// Resolve all player collisions.
///
/// The obstacle scan stops at the first hit and flips the world to
/// `GameOver`; a crash ends the tick before any pickups are scored. The
/// collectible scan is exhaustive, so several overlapping pickups all score
/// in the same tick.
pub fn resolve_collisions(world: &mut World, tuning: &Tuning) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();
    let player = world.player.rect;

    if let Some(hit) = world.obstacles.iter().find(|o| player.overlaps(&o.rect)) {
        world.phase = GamePhase::GameOver;
        world.events.push(GameEvent::Crashed {
            id: hit.id,
            kind: hit.kind,
            final_score: world.score,
        });
        log::info!(
            "Hit a {} at tick {}, final score {}",
            hit.kind.as_str(),
            world.time_ticks,
            world.score
        );
        outcome.crashed = true;
        return outcome;
    }

    let events = &mut world.events;
    world.collectibles.retain(|item| {
        if !player.overlaps(&item.rect) {
            return true;
        }
        let points = item.kind.points(tuning);
        outcome.collected += 1;
        outcome.points += points;
        events.push(GameEvent::Collected {
            id: item.id,
            kind: item.kind,
            points,
        });
        false
    });
    world.score += outcome.points;

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rect::Rect;
    use crate::sim::state::{CollectibleKind, ObstacleKind, Viewport};

    fn world_with_player_at(x: f32, y: f32) -> (World, Tuning) {
        let tuning = Tuning::default();
        let mut world = World::new(Viewport::new(800.0, 400.0), &tuning);
        world.player.rect = Rect::new(x, y, 30.0, 30.0);
        (world, tuning)
    }

    #[test]
    fn test_burger_scores_five_and_is_removed() {
        let (mut world, tuning) = world_with_player_at(100.0, 360.0);
        world.push_collectible(CollectibleKind::Burger, Rect::new(110.0, 365.0, 20.0, 20.0));

        let outcome = resolve_collisions(&mut world, &tuning);

        assert_eq!(outcome.points, 5);
        assert_eq!(world.score, 5);
        assert!(world.collectibles.is_empty());
        assert_eq!(world.phase, GamePhase::Running);
    }

    #[test]
    fn test_drink_scores_one_and_is_removed() {
        let (mut world, tuning) = world_with_player_at(100.0, 360.0);
        world.push_collectible(CollectibleKind::Drink, Rect::new(90.0, 350.0, 20.0, 20.0));

        resolve_collisions(&mut world, &tuning);

        assert_eq!(world.score, 1);
        assert!(world.collectibles.is_empty());
    }

    #[test]
    fn test_collectible_touching_edge_is_not_collected() {
        let (mut world, tuning) = world_with_player_at(100.0, 360.0);
        // Left edge exactly on the player's right edge
        world.push_collectible(CollectibleKind::Burger, Rect::new(130.0, 360.0, 20.0, 20.0));

        resolve_collisions(&mut world, &tuning);

        assert_eq!(world.score, 0);
        assert_eq!(world.collectibles.len(), 1);
    }

    #[test]
    fn test_multiple_pickups_in_one_tick() {
        let (mut world, tuning) = world_with_player_at(100.0, 360.0);
        world.push_collectible(CollectibleKind::Burger, Rect::new(95.0, 355.0, 20.0, 20.0));
        world.push_collectible(CollectibleKind::Drink, Rect::new(115.0, 370.0, 20.0, 20.0));
        world.push_collectible(CollectibleKind::Burger, Rect::new(105.0, 380.0, 20.0, 20.0));
        let far = world.push_collectible(CollectibleKind::Drink, Rect::new(600.0, 100.0, 20.0, 20.0));

        let outcome = resolve_collisions(&mut world, &tuning);

        assert_eq!(outcome.collected, 3);
        assert_eq!(world.score, 11);
        assert_eq!(world.collectibles.len(), 1);
        assert_eq!(world.collectibles[0].id, far);
        let collected = world
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::Collected { .. }))
            .count();
        assert_eq!(collected, 3);
    }

    #[test]
    fn test_obstacle_hit_ends_game() {
        let (mut world, tuning) = world_with_player_at(100.0, 360.0);
        world.score = 12;
        let id = world.push_obstacle(ObstacleKind::Bear, Rect::new(95.0, 360.0, 40.0, 40.0));

        let outcome = resolve_collisions(&mut world, &tuning);

        assert!(outcome.crashed);
        assert_eq!(world.phase, GamePhase::GameOver);
        assert_eq!(
            world.events,
            vec![GameEvent::Crashed {
                id,
                kind: ObstacleKind::Bear,
                final_score: 12
            }]
        );
    }

    #[test]
    fn test_first_obstacle_hit_wins() {
        let (mut world, tuning) = world_with_player_at(100.0, 360.0);
        let first = world.push_obstacle(ObstacleKind::Deer, Rect::new(90.0, 360.0, 40.0, 40.0));
        world.push_obstacle(ObstacleKind::Car, Rect::new(110.0, 360.0, 40.0, 40.0));

        resolve_collisions(&mut world, &tuning);

        assert_eq!(world.events.len(), 1);
        assert!(matches!(world.events[0], GameEvent::Crashed { id, .. } if id == first));
    }

    #[test]
    fn test_crash_skips_pickups_in_same_tick() {
        let (mut world, tuning) = world_with_player_at(100.0, 360.0);
        world.push_obstacle(ObstacleKind::Tree, Rect::new(95.0, 360.0, 40.0, 40.0));
        world.push_collectible(CollectibleKind::Burger, Rect::new(100.0, 360.0, 20.0, 20.0));

        resolve_collisions(&mut world, &tuning);

        assert_eq!(world.score, 0);
        assert_eq!(world.collectibles.len(), 1);
    }

    #[test]
    fn test_obstacle_kind_does_not_matter() {
        for kind in ObstacleKind::ALL {
            let (mut world, tuning) = world_with_player_at(100.0, 360.0);
            world.push_obstacle(kind, Rect::new(110.0, 370.0, 40.0, 40.0));
            assert!(resolve_collisions(&mut world, &tuning).crashed);
        }
    }
}
