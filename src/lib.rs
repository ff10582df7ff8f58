//! Roadkill Runner - A single-screen endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, collisions, scoring)
//! - `controller`: Running/GameOver state machine that owns the world
//! - `input`: Keyboard/touch command mapping
//! - `render`: Render sink trait and fill palette
//! - `tuning`: Data-driven game balance
//! - `autopilot`: Demo mode AI

pub mod autopilot;
pub mod controller;
pub mod input;
pub mod render;
pub mod sim;
pub mod tuning;

pub use controller::GameLoopController;
pub use input::{Command, TouchTracker};
pub use render::{NullSink, RenderSink};
pub use tuning::{Tuning, TuningError, Variant};

/// Game configuration constants
pub mod consts {
    /// Player defaults
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_SIZE: f32 = 30.0;
    /// Distance from the bottom of the viewport to the player's top edge
    pub const PLAYER_GROUND_OFFSET: f32 = 50.0;
    /// Horizontal step per move command (pixels)
    pub const PLAYER_STEP: f32 = 5.0;

    /// Obstacle defaults
    pub const OBSTACLE_SIZE: f32 = 40.0;
    pub const OBSTACLE_GROUND_OFFSET: f32 = 40.0;
    /// Chance per tick that an obstacle spawns
    pub const OBSTACLE_SPAWN_CHANCE: f64 = 0.02;

    /// Collectible defaults
    pub const COLLECTIBLE_SIZE: f32 = 20.0;
    /// Collectibles never spawn closer than this to the top or bottom edge
    pub const COLLECTIBLE_MARGIN: f32 = 50.0;
    /// Chance per tick that a collectible spawns
    pub const COLLECTIBLE_SPAWN_CHANCE: f64 = 0.01;

    /// Score values
    pub const BURGER_POINTS: u64 = 5;
    pub const DRINK_POINTS: u64 = 1;

    /// Scroll speed (pixels per tick)
    pub const START_SPEED: f32 = 5.0;
    /// Additive speed increase per tick (jumper variant)
    pub const SPEED_INCREMENT: f32 = 0.005;

    /// Gravity (pixels/tick², jumper variant)
    pub const GRAVITY: f32 = 0.5;
    /// Upward velocity applied on jump (pixels/tick)
    pub const JUMP_IMPULSE: f32 = 10.0;

    /// Horizontal swipe distance before a touch move registers
    pub const TOUCH_THRESHOLD: f32 = 20.0;

    /// Viewport used by the headless runner when none is given
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 800.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 400.0;

    /// Undrained events kept before the oldest are dropped
    pub const MAX_QUEUED_EVENTS: usize = 1024;
}
