//! Game loop controller
//!
//! Owns the world, the tuning and the run RNG, buffers player commands between
//! frames and drives the Running/GameOver state machine. The presentation
//! layer calls [`GameLoopController::frame`] once per display refresh and stops
//! scheduling frames when it returns `false`.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::input::Command;
use crate::render::RenderSink;
use crate::sim::{GameEvent, GamePhase, TickInput, Viewport, World, tick};
use crate::tuning::Tuning;

pub struct GameLoopController {
    world: World,
    tuning: Tuning,
    rng: Pcg32,
    seed: u64,
    /// Commands buffered for the next tick
    pending: TickInput,
}

impl GameLoopController {
    /// Start a run in `Running` with a fresh world
    pub fn new(viewport: Viewport, tuning: Tuning, seed: u64) -> Self {
        log::info!(
            "Starting {} run with seed {} ({}x{})",
            tuning.variant.as_str(),
            seed,
            viewport.width,
            viewport.height
        );
        Self {
            world: World::new(viewport, &tuning),
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            seed,
            pending: TickInput::default(),
        }
    }

    /// Queue a command for the next tick.
    ///
    /// The latest horizontal move wins; a jump stays latched until consumed.
    /// Movement is ignored after game over, `Restart` is honoured any time.
    pub fn apply(&mut self, command: Command) {
        if command == Command::Restart {
            self.restart();
            return;
        }
        if self.world.is_game_over() {
            return;
        }
        match command {
            Command::MoveLeft | Command::MoveRight => self.pending.direction = command.direction(),
            Command::Jump => self.pending.jump = true,
            Command::Restart => {}
        }
    }

    /// Run one frame. Returns `true` if another frame should be scheduled.
    pub fn frame(&mut self, sink: &mut dyn RenderSink) -> bool {
        if self.world.is_game_over() {
            return false;
        }
        let input = std::mem::take(&mut self.pending);
        tick(&mut self.world, &input, &self.tuning, &mut self.rng, sink)
    }

    /// Rebuild the world from scratch and return to `Running`.
    ///
    /// The RNG keeps its stream, so consecutive runs differ.
    pub fn restart(&mut self) {
        let viewport = self.world.viewport;
        self.world = World::new(viewport, &self.tuning);
        self.world.events.push(GameEvent::Restarted);
        self.pending = TickInput::default();
        log::info!("Restarted run (seed {})", self.seed);
    }

    /// Adopt new viewport dimensions
    pub fn resize(&mut self, width: f32, height: f32) {
        self.world.resize(Viewport::new(width, height), &self.tuning);
        log::info!("Viewport resized to {}x{}", width, height);
    }

    pub fn score(&self) -> u64 {
        self.world.score
    }

    pub fn phase(&self) -> GamePhase {
        self.world.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.world.is_game_over()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Take events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.world.drain_events()
    }

    /// Mutable world access for scripted setups
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
