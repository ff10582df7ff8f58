//! Roadkill Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use roadkill_runner::render::fill_rects;
    use roadkill_runner::sim::{GameEvent, Viewport, World};
    use roadkill_runner::{
        Command, GameLoopController, RenderSink, TouchTracker, Tuning, Variant, autopilot,
    };

    /// Draws the world as filled rectangles on a 2D canvas
    struct CanvasSink {
        ctx: CanvasRenderingContext2d,
    }

    impl RenderSink for CanvasSink {
        fn draw(&mut self, world: &World) {
            let Viewport { width, height } = world.viewport;
            self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
            for rect in fill_rects(world) {
                self.ctx.set_fill_style_str(rect.color);
                self.ctx
                    .fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        controller: GameLoopController,
        sink: CanvasSink,
        touch: TouchTracker,
        /// Autopilot plays instead of the player
        demo: bool,
        /// A frame callback is currently scheduled
        running: bool,
    }

    impl Game {
        /// Forward a command; returns true if the loop needs re-arming
        fn command(&mut self, command: Command) -> bool {
            self.controller.apply(command);
            command == Command::Restart && !self.running
        }

        /// Run one frame and report whether to schedule another
        fn update(&mut self) -> bool {
            if self.demo {
                for command in autopilot::suggest(self.controller.world(), self.controller.tuning())
                {
                    self.controller.apply(command);
                }
            }
            let keep_going = self.controller.frame(&mut self.sink);
            for event in self.controller.drain_events() {
                if let GameEvent::Crashed { kind, final_score, .. } = event {
                    log::info!("Ran into a {} - final score {}", kind.as_str(), final_score);
                }
            }
            keep_going
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&format!("Score: {}", self.controller.score())));
            }

            if let Some(el) = document.get_element_by_id("gameOver") {
                if self.controller.is_game_over() {
                    let _ = el.set_attribute("style", "display: block");
                    if let Some(score_el) = document.get_element_by_id("finalScore") {
                        score_el.set_text_content(Some(&self.controller.score().to_string()));
                    }
                } else {
                    let _ = el.set_attribute("style", "display: none");
                }
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Roadkill Runner starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Size the canvas to its container
        let (width, height) = container_size(&canvas);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("2d context unavailable")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        // <canvas data-variant="jumper"> picks the rule set
        let variant = canvas
            .get_attribute("data-variant")
            .and_then(|v| Variant::from_str(&v))
            .unwrap_or_default();
        let tuning = Tuning::for_variant(variant);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            touch: TouchTracker::new(tuning.touch_threshold),
            controller: GameLoopController::new(Viewport::new(width, height), tuning, seed),
            sink: CanvasSink { ctx },
            demo: false,
            running: true,
        }));

        setup_input_handlers(&canvas, game.clone());
        setup_restart_button(game.clone());
        setup_resize(canvas, game.clone());

        request_animation_frame(game);

        log::info!("Roadkill Runner running ({})", variant.as_str());
    }

    /// Size of the canvas container, falling back to the canvas itself
    fn container_size(canvas: &HtmlCanvasElement) -> (f32, f32) {
        let container = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.query_selector(".game-container").ok().flatten());
        match container {
            Some(el) => (el.client_width() as f32, el.client_height() as f32),
            None => (canvas.client_width() as f32, canvas.client_height() as f32),
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if key == "i" || key == "I" {
                    let mut g = game.borrow_mut();
                    g.demo = !g.demo;
                    log::info!("Demo mode: {}", g.demo);
                    return;
                }
                if let Some(command) = Command::from_key(&key) {
                    if command == Command::Jump {
                        // Keep space/up from scrolling the page
                        event.prevent_default();
                    }
                    let rearm = game.borrow_mut().command(command);
                    if rearm {
                        start_loop(game.clone());
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let mut g = game.borrow_mut();
                if g.controller.is_game_over() {
                    return;
                }
                if let Some(touch) = event.touches().get(0) {
                    g.touch.start(touch.client_x() as f32);
                }
                // A second finger jumps
                if event.touches().length() > 1 {
                    g.command(Command::Jump);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let mut g = game.borrow_mut();
                if g.controller.is_game_over() {
                    return;
                }
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    if let Some(command) = g.touch.moved(touch.client_x() as f32) {
                        g.command(command);
                    }
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                game.borrow_mut().touch.end();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("restartButton") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let rearm = game.borrow_mut().command(Command::Restart);
                game.borrow().update_hud();
                if rearm {
                    start_loop(game.clone());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height) = container_size(&canvas);
            canvas.set_width(width as u32);
            canvas.set_height(height as u32);
            game.borrow_mut().controller.resize(width, height);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn start_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().running = true;
        request_animation_frame(game);
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let keep_going = {
            let mut g = game.borrow_mut();
            let keep_going = g.update();
            g.update_hud();
            g.running = keep_going;
            keep_going
        };

        // Stop scheduling frames once the run is over; restart re-arms
        if keep_going {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;

    use roadkill_runner::consts::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};
    use roadkill_runner::sim::{GameEvent, Viewport, World};
    use roadkill_runner::{GameLoopController, RenderSink, Tuning, Variant, autopilot};

    /// Run Roadkill Runner headless and report the score
    #[derive(Debug, Parser)]
    #[command(author, version, about, long_about = None)]
    struct Args {
        /// RNG seed (defaults to the current time)
        #[arg(long)]
        seed: Option<u64>,

        /// Rule set: classic (default) or jumper
        #[arg(long, value_parser = parse_variant)]
        variant: Option<Variant>,

        /// JSON tuning file (overrides --variant)
        #[arg(long, value_name = "FILE")]
        tuning: Option<PathBuf>,

        /// Frames to simulate across all runs
        #[arg(long, default_value_t = 36_000)]
        frames: u64,

        /// Number of runs; the game restarts after each crash
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        runs: u32,

        #[arg(long, default_value_t = DEFAULT_VIEWPORT_WIDTH)]
        width: f32,

        #[arg(long, default_value_t = DEFAULT_VIEWPORT_HEIGHT)]
        height: f32,

        /// Let the demo AI play
        #[arg(long)]
        autopilot: bool,

        /// Print the final world as JSON
        #[arg(long)]
        json: bool,
    }

    fn parse_variant(s: &str) -> Result<Variant, String> {
        Variant::from_str(s).ok_or_else(|| format!("unknown variant `{s}` (classic, jumper)"))
    }

    /// Logs entity counts every few seconds of game time
    struct ProgressSink {
        every: u64,
    }

    impl RenderSink for ProgressSink {
        fn draw(&mut self, world: &World) {
            if world.time_ticks % self.every == 0 {
                log::debug!(
                    "tick {}: score {}, speed {:.2}, {} obstacles, {} collectibles",
                    world.time_ticks,
                    world.score,
                    world.speed,
                    world.obstacles.len(),
                    world.collectibles.len()
                );
            }
        }
    }

    pub fn run() -> Result<()> {
        let args = Args::parse();

        let tuning = match &args.tuning {
            Some(path) => Tuning::load(path)
                .with_context(|| format!("loading tuning from {}", path.display()))?,
            None => Tuning::for_variant(args.variant.unwrap_or_default()),
        };
        if let Some(variant) = args.variant.filter(|v| *v != tuning.variant) {
            log::warn!(
                "Tuning file selects {}, ignoring --variant {}",
                tuning.variant.as_str(),
                variant.as_str()
            );
        }

        let seed = match args.seed {
            Some(seed) => seed,
            None => std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .context("system clock before 1970")?
                .as_millis() as u64,
        };

        let viewport = Viewport::new(args.width, args.height);
        let mut controller = GameLoopController::new(viewport, tuning, seed);
        let mut sink = ProgressSink { every: 600 };
        let mut scores = Vec::new();

        for _ in 0..args.frames {
            if args.autopilot {
                for command in autopilot::suggest(controller.world(), controller.tuning()) {
                    controller.apply(command);
                }
            }

            let keep_going = controller.frame(&mut sink);

            for event in controller.drain_events() {
                match event {
                    GameEvent::Collected { kind, points, .. } => {
                        log::debug!("Picked up a {} (+{})", kind.as_str(), points);
                    }
                    GameEvent::Crashed {
                        kind, final_score, ..
                    } => {
                        log::info!("Ran into a {} - final score {}", kind.as_str(), final_score);
                        scores.push(final_score);
                    }
                    _ => {}
                }
            }

            if !keep_going {
                if scores.len() as u32 >= args.runs {
                    break;
                }
                controller.restart();
            }
        }

        if !controller.is_game_over() {
            scores.push(controller.score());
            log::info!(
                "Out of frames after {} ticks, score {}",
                controller.world().time_ticks,
                controller.score()
            );
        }

        for (run, score) in scores.iter().enumerate() {
            println!("run {}: {}", run + 1, score);
        }
        if let Some(best) = scores.iter().max() {
            println!("best: {best}");
        }

        if args.json {
            println!("{}", serde_json::to_string_pretty(controller.world())?);
        }

        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Roadkill Runner (headless) starting...");
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
