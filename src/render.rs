//! Rendering handoff
//!
//! The simulation pushes a read-only view of the world to a [`RenderSink`]
//! once per tick. Sinks only draw; nothing flows back into the simulation.

use crate::sim::{CollectibleKind, ObstacleKind, World};

/// Receives the world once per tick, after movement and before collisions
pub trait RenderSink {
    fn draw(&mut self, world: &World);
}

/// Sink that draws nothing (headless runs, tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn draw(&mut self, _world: &World) {}
}

/// CSS fill colour for the player
pub const PLAYER_FILL: &str = "red";

/// CSS fill colour for an obstacle
pub fn obstacle_fill(kind: ObstacleKind) -> &'static str {
    match kind {
        ObstacleKind::Tree => "green",
        ObstacleKind::Bear => "brown",
        ObstacleKind::Deer => "tan",
        ObstacleKind::Car => "gray",
    }
}

/// CSS fill colour for a collectible
pub fn collectible_fill(kind: CollectibleKind) -> &'static str {
    match kind {
        CollectibleKind::Burger => "orange",
        CollectibleKind::Drink => "blue",
    }
}

/// A rectangle fill with its colour
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub color: &'static str,
}

/// Flatten the world into draw order: player, obstacles, collectibles
pub fn fill_rects(world: &World) -> Vec<FillRect> {
    let fill = |rect: &crate::sim::Rect, color| FillRect {
        x: rect.pos.x,
        y: rect.pos.y,
        w: rect.size.x,
        h: rect.size.y,
        color,
    };

    let mut rects = Vec::with_capacity(1 + world.obstacles.len() + world.collectibles.len());
    rects.push(fill(&world.player.rect, PLAYER_FILL));
    rects.extend(
        world
            .obstacles
            .iter()
            .map(|o| fill(&o.rect, obstacle_fill(o.kind))),
    );
    rects.extend(
        world
            .collectibles
            .iter()
            .map(|c| fill(&c.rect, collectible_fill(c.kind))),
    );
    rects
}
