//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`] so a run can be reshaped from a
//! JSON file without recompiling. Missing fields fall back to the variant
//! defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Game rule variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Horizontal movement only, constant scroll speed
    #[default]
    Classic,
    /// Jumping with gravity, scroll speed ramps up every tick
    Jumper,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classic => "classic",
            Variant::Jumper => "jumper",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "1" => Some(Variant::Classic),
            "jumper" | "jump" | "2" => Some(Variant::Jumper),
            _ => None,
        }
    }

    /// Whether the player is affected by gravity and may jump
    pub fn has_gravity(&self) -> bool {
        matches!(self, Variant::Jumper)
    }
}

/// Failures while loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gameplay constants for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub variant: Variant,

    // === Spawning ===
    /// Chance per tick of an obstacle spawning (0.0 - 1.0)
    pub obstacle_spawn_chance: f64,
    /// Chance per tick of a collectible spawning (0.0 - 1.0)
    pub collectible_spawn_chance: f64,

    // === Scrolling ===
    pub start_speed: f32,
    /// Added to scroll speed after every tick
    pub speed_increment: f32,
    /// Optional cap on scroll speed (None = grows without bound)
    pub max_speed: Option<f32>,

    // === Player ===
    pub player_start_x: f32,
    pub player_size: f32,
    pub player_ground_offset: f32,
    pub player_step: f32,
    pub gravity: f32,
    pub jump_impulse: f32,

    // === Entities ===
    pub obstacle_size: f32,
    pub obstacle_ground_offset: f32,
    pub collectible_size: f32,
    pub collectible_margin: f32,

    // === Scoring ===
    pub burger_points: u64,
    pub drink_points: u64,

    // === Input ===
    pub touch_threshold: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::for_variant(Variant::Classic)
    }
}

impl Tuning {
    /// Defaults for a variant
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            variant,

            obstacle_spawn_chance: OBSTACLE_SPAWN_CHANCE,
            collectible_spawn_chance: COLLECTIBLE_SPAWN_CHANCE,

            start_speed: START_SPEED,
            speed_increment: match variant {
                Variant::Classic => 0.0,
                Variant::Jumper => SPEED_INCREMENT,
            },
            max_speed: None,

            player_start_x: PLAYER_START_X,
            player_size: PLAYER_SIZE,
            player_ground_offset: PLAYER_GROUND_OFFSET,
            player_step: PLAYER_STEP,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,

            obstacle_size: OBSTACLE_SIZE,
            obstacle_ground_offset: OBSTACLE_GROUND_OFFSET,
            collectible_size: COLLECTIBLE_SIZE,
            collectible_margin: COLLECTIBLE_MARGIN,

            burger_points: BURGER_POINTS,
            drink_points: DRINK_POINTS,

            touch_threshold: TOUCH_THRESHOLD,
        }
    }

    /// Same tuning with both spawn chances zeroed (scripted scenarios, tests)
    pub fn without_spawns(mut self) -> Self {
        self.obstacle_spawn_chance = 0.0;
        self.collectible_spawn_chance = 0.0;
        self
    }

    /// Parse a (possibly partial) JSON override.
    ///
    /// A `variant` field selects the defaults the remaining fields fall back
    /// to, so `{"variant": "jumper"}` yields the full jumper tuning.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let raw: serde_json::Value = serde_json::from_str(json)?;
        let variant = raw
            .get("variant")
            .cloned()
            .map(serde_json::from_value::<Variant>)
            .transpose()?
            .unwrap_or_default();

        let mut merged = serde_json::to_value(Self::for_variant(variant))?;
        if let (Some(base), Some(overrides)) = (merged.as_object_mut(), raw.as_object()) {
            for (key, value) in overrides {
                base.insert(key.clone(), value.clone());
            }
        }

        let tuning: Self = serde_json::from_value(merged)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a tuning file from disk
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!(
            "Loaded {} tuning from {}",
            tuning.variant.as_str(),
            path.display()
        );
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |field, reason| Err(TuningError::Invalid { field, reason });

        if !(0.0..=1.0).contains(&self.obstacle_spawn_chance) {
            return invalid("obstacle_spawn_chance", "must be within 0.0..=1.0");
        }
        if !(0.0..=1.0).contains(&self.collectible_spawn_chance) {
            return invalid("collectible_spawn_chance", "must be within 0.0..=1.0");
        }
        if self.start_speed < 0.0 {
            return invalid("start_speed", "must not be negative");
        }
        if self.speed_increment < 0.0 {
            return invalid("speed_increment", "must not be negative");
        }
        if let Some(max) = self.max_speed {
            if max < self.start_speed {
                return invalid("max_speed", "must be at least start_speed");
            }
        }
        for (field, size) in [
            ("player_size", self.player_size),
            ("obstacle_size", self.obstacle_size),
            ("collectible_size", self.collectible_size),
        ] {
            if size <= 0.0 {
                return invalid(field, "must be positive");
            }
        }
        if self.player_step < 0.0 {
            return invalid("player_step", "must not be negative");
        }
        if self.gravity < 0.0 {
            return invalid("gravity", "must not be negative");
        }
        if self.jump_impulse < 0.0 {
            return invalid("jump_impulse", "must not be negative");
        }
        // Ground offsets measure from the bottom edge to the entity's top
        if self.player_ground_offset < self.player_size {
            return invalid("player_ground_offset", "must be at least player_size");
        }
        if self.obstacle_ground_offset < self.obstacle_size {
            return invalid("obstacle_ground_offset", "must be at least obstacle_size");
        }
        if self.collectible_margin < 0.0 {
            return invalid("collectible_margin", "must not be negative");
        }
        if self.touch_threshold < 0.0 {
            return invalid("touch_threshold", "must not be negative");
        }
        Ok(())
    }
}
