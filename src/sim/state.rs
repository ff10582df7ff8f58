//! Game state and core simulation types
//!
//! Everything the simulation reads or writes lives in [`World`]; it is created
//! at game start and rebuilt wholesale on restart.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay, the loop re-arms every frame
    #[default]
    Running,
    /// Run ended on an obstacle hit; nothing ticks until restart
    GameOver,
}

/// Drawable area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(
            crate::consts::DEFAULT_VIEWPORT_WIDTH,
            crate::consts::DEFAULT_VIEWPORT_HEIGHT,
        )
    }
}

/// The player's sprite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// Vertical velocity (pixels/tick, positive = down)
    pub vel_y: f32,
    /// Off the ground mid-jump
    pub airborne: bool,
}

impl Player {
    /// Player standing on the ground line at the starting column, pulled
    /// inside the viewport when the column lies past its right edge
    pub fn spawn(viewport: Viewport, tuning: &Tuning) -> Self {
        let mut player = Self {
            rect: Rect::new(
                tuning.player_start_x,
                ground_line(viewport, tuning),
                tuning.player_size,
                tuning.player_size,
            ),
            vel_y: 0.0,
            airborne: false,
        };
        player.shift_x(0.0, viewport);
        player
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.rect.pos
    }

    /// Shift horizontally, staying inside `[0, viewport_width - width]`
    pub fn shift_x(&mut self, dx: f32, viewport: Viewport) {
        let max_x = (viewport.width - self.rect.size.x).max(0.0);
        self.rect.pos.x = (self.rect.pos.x + dx).clamp(0.0, max_x);
    }

    /// Start a jump if standing on the ground
    pub fn jump(&mut self, impulse: f32) -> bool {
        if self.airborne {
            return false;
        }
        self.vel_y = -impulse;
        self.airborne = true;
        true
    }
}

/// The y coordinate of the player's top edge when standing on the floor
pub fn ground_line(viewport: Viewport, tuning: &Tuning) -> f32 {
    (viewport.height - tuning.player_ground_offset).max(0.0)
}

/// Obstacle types (cosmetic, all collide identically)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Tree,
    Bear,
    Deer,
    Car,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 4] = [
        ObstacleKind::Tree,
        ObstacleKind::Bear,
        ObstacleKind::Deer,
        ObstacleKind::Car,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::Tree => "tree",
            ObstacleKind::Bear => "bear",
            ObstacleKind::Deer => "deer",
            ObstacleKind::Car => "car",
        }
    }
}

/// An obstacle scrolling toward the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub rect: Rect,
}

/// Collectible types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    Burger,
    Drink,
}

impl CollectibleKind {
    pub const ALL: [CollectibleKind; 2] = [CollectibleKind::Burger, CollectibleKind::Drink];

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectibleKind::Burger => "burger",
            CollectibleKind::Drink => "drink",
        }
    }

    /// Score awarded on pickup
    pub fn points(&self, tuning: &Tuning) -> u64 {
        match self {
            CollectibleKind::Burger => tuning.burger_points,
            CollectibleKind::Drink => tuning.drink_points,
        }
    }
}

/// A collectible scrolling toward the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub kind: CollectibleKind,
    pub rect: Rect,
}

/// Things that happened during a tick, drained by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ObstacleSpawned { id: u32, kind: ObstacleKind },
    CollectibleSpawned { id: u32, kind: CollectibleKind },
    Collected { id: u32, kind: CollectibleKind, points: u64 },
    Crashed { id: u32, kind: ObstacleKind, final_score: u64 },
    Restarted,
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub viewport: Viewport,
    pub player: Player,
    /// Active obstacles (spawn order)
    pub obstacles: Vec<Obstacle>,
    /// Active collectibles (spawn order)
    pub collectibles: Vec<Collectible>,
    pub score: u64,
    /// Leftward scroll speed (pixels/tick)
    pub speed: f32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events since the last drain. Only the newest
    /// [`MAX_QUEUED_EVENTS`](crate::consts::MAX_QUEUED_EVENTS) survive a tick
    /// when nobody drains them.
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl World {
    /// Fresh world for a new run
    pub fn new(viewport: Viewport, tuning: &Tuning) -> Self {
        Self {
            viewport,
            player: Player::spawn(viewport, tuning),
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            score: 0,
            speed: tuning.start_speed,
            phase: GamePhase::Running,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Adopt new viewport dimensions, keeping the player on screen and grounded.
    ///
    /// Obstacles follow the floor to its new height; collectibles keep their
    /// positions.
    pub fn resize(&mut self, viewport: Viewport, tuning: &Tuning) {
        self.viewport = viewport;
        let floor_y = viewport.height - tuning.obstacle_ground_offset;
        for obstacle in &mut self.obstacles {
            obstacle.rect.pos.y = floor_y;
        }
        let ground = ground_line(viewport, tuning);
        self.player.shift_x(0.0, viewport);
        if !self.player.airborne || self.player.rect.pos.y > ground {
            self.player.rect.pos.y = ground;
            self.player.vel_y = 0.0;
            self.player.airborne = false;
        }
    }

    /// Push an obstacle at an explicit position (scripted scenarios)
    pub fn push_obstacle(&mut self, kind: ObstacleKind, rect: Rect) -> u32 {
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle { id, kind, rect });
        id
    }

    /// Push a collectible at an explicit position (scripted scenarios)
    pub fn push_collectible(&mut self, kind: CollectibleKind, rect: Rect) -> u32 {
        let id = self.next_entity_id();
        self.collectibles.push(Collectible { id, kind, rect });
        id
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drop the oldest events beyond `max`
    pub fn trim_events(&mut self, max: usize) {
        let excess = self.events.len().saturating_sub(max);
        if excess > 0 {
            self.events.drain(..excess);
            log::debug!("Dropped {} undrained events", excess);
        }
    }
}
