//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, fixed per-tick steps
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies beyond the `RenderSink` handoff

pub mod collision;
pub mod difficulty;
pub mod movement;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{CollisionOutcome, resolve_collisions};
pub use difficulty::ramp_speed;
pub use movement::move_entities;
pub use rect::Rect;
pub use spawn::spawn_entities;
pub use state::{
    Collectible, CollectibleKind, GameEvent, GamePhase, Obstacle, ObstacleKind, Player, Viewport,
    World, ground_line,
};
pub use tick::{Direction, TickInput, tick};
