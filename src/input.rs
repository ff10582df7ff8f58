//! Player commands and their keyboard/touch sources
//!
//! Platform event handlers translate raw events into [`Command`]s and hand
//! them to the controller; nothing here touches the world directly.

use serde::{Deserialize, Serialize};

pub use crate::sim::Direction;

/// A discrete player command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Jump,
    Restart,
}

impl Command {
    /// Map a DOM `KeyboardEvent.key` value to a command
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Command::MoveLeft),
            "ArrowRight" | "d" | "D" => Some(Command::MoveRight),
            "ArrowUp" | " " | "w" | "W" => Some(Command::Jump),
            "Enter" | "r" | "R" => Some(Command::Restart),
            _ => None,
        }
    }

    /// Horizontal direction carried by this command, if any
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Command::MoveLeft => Some(Direction::Left),
            Command::MoveRight => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Turns a horizontal swipe into move commands.
///
/// Every move event re-anchors at the current finger position, so a long
/// swipe yields one command per event that travelled past the threshold.
#[derive(Debug, Clone, Default)]
pub struct TouchTracker {
    anchor_x: Option<f32>,
    threshold: f32,
}

impl TouchTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            anchor_x: None,
            threshold,
        }
    }

    /// Finger down
    pub fn start(&mut self, x: f32) {
        self.anchor_x = Some(x);
    }

    /// Finger moved; returns a command when the swipe passed the threshold
    pub fn moved(&mut self, x: f32) -> Option<Command> {
        let anchor = self.anchor_x.replace(x)?;
        let dx = x - anchor;
        if dx > self.threshold {
            Some(Command::MoveRight)
        } else if dx < -self.threshold {
            Some(Command::MoveLeft)
        } else {
            None
        }
    }

    /// Finger lifted
    pub fn end(&mut self) {
        self.anchor_x = None;
    }
}
