//! Breakout entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use breakout::Tuning;
    use breakout::renderer::{DrawCommand, colors, layout, render};
    use breakout::sim::{FrameClock, GameState, StepInput, autopilot_input, step};

    /// Keys currently held down
    #[derive(Debug, Default)]
    struct HeldKeys {
        left: bool,
        right: bool,
        restart: bool,
    }

    impl HeldKeys {
        /// Update from a key event. Returns true if the key is one of ours.
        fn set(&mut self, key: &str, down: bool) -> bool {
            match key {
                "ArrowLeft" | "a" | "A" => self.left = down,
                "ArrowRight" | "d" | "D" => self.right = down,
                " " => self.restart = down,
                _ => return false,
            }
            true
        }

        fn to_input(&self) -> StepInput {
            StepInput {
                left: self.left,
                right: self.right,
                restart: self.restart,
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        clock: FrameClock,
        keys: HeldKeys,
        /// Autopilot drives the paddle
        idle_mode: bool,
        last_time: f64,
        ctx: CanvasRenderingContext2d,
        size: (u32, u32),
    }

    impl Game {
        /// Run simulation frames
        fn update(&mut self, dt: f32) {
            let frames = self.clock.advance(dt);
            for _ in 0..frames {
                let mut input = self.keys.to_input();
                if self.idle_mode {
                    let auto = autopilot_input(&self.state);
                    input.left = auto.left;
                    input.right = auto.right;
                }
                step(&mut self.state, &input);
            }
        }

        /// Paint the current frame
        fn render(&self) -> Result<(), JsValue> {
            let ctx = &self.ctx;
            ctx.set_fill_style_str(&colors::BACKGROUND.to_css());
            ctx.fill_rect(0.0, 0.0, self.size.0 as f64, self.size.1 as f64);

            for command in render(&self.state) {
                match command {
                    DrawCommand::Rect {
                        x,
                        y,
                        width,
                        height,
                        color,
                    } => {
                        ctx.set_fill_style_str(&color.to_css());
                        ctx.fill_rect(x as f64, y as f64, width as f64, height as f64);
                    }
                    DrawCommand::Text { text, x, y, color } => {
                        ctx.set_fill_style_str(&color.to_css());
                        ctx.fill_text(&text, x as f64, y as f64)?;
                    }
                }
            }
            Ok(())
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Breakout starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        document.set_title("Breakout");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Fixed logical resolution; CSS scales the canvas to the window
        let size = layout(canvas.client_width() as u32, canvas.client_height() as u32);
        canvas.set_width(size.0);
        canvas.set_height(size.1);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;
        ctx.set_font("14px monospace");
        ctx.set_text_baseline("top");

        let tuning = Tuning::load();
        let seed = js_sys::Date::now() as u64;
        let clock = FrameClock::new(&tuning);
        let game = Rc::new(RefCell::new(Game {
            state: GameState::with_tuning(seed, tuning),
            clock,
            keys: HeldKeys::default(),
            idle_mode: false,
            last_time: 0.0,
            ctx,
            size,
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone())?;

        // Start game loop
        request_animation_frame(game)?;

        log::info!("Breakout running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                if key == "i" || key == "I" {
                    if !event.repeat() {
                        g.idle_mode = !g.idle_mode;
                        log::info!("Idle mode: {}", g.idle_mode);
                    }
                } else if g.keys.set(&key, true) {
                    // Keep arrows and space from scrolling the page
                    event.prevent_default();
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keys.set(&event.key(), false);
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        window.request_animation_frame(closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                g.clock.frame_dt()
            };
            g.last_time = time;

            g.update(dt);
            if let Err(e) = g.render() {
                log::warn!("Render error: {:?}", e);
            }
        }

        if let Err(e) = request_animation_frame(game) {
            log::error!("Failed to schedule next frame: {:?}", e);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().inspect_err(|e| log::error!("Fatal: {:?}", e))
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use breakout::Tuning;
    use breakout::renderer::{DrawCommand, render};
    use breakout::sim::{GameEvent, GameState, autopilot_input, step};

    /// Five minutes of play at 60 Hz
    const MAX_DEMO_FRAMES: u32 = 60 * 60 * 5;

    env_logger::init();
    log::info!("Breakout (native) starting...");
    log::info!("Native mode runs a headless autopilot round - run with `trunk serve` to play");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match Tuning::load_file(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Failed to load tuning from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    let seed: u64 = rand::random();
    let mut state = GameState::with_tuning(seed, tuning);
    log::info!("Autopilot round with seed {}", state.seed);

    let mut paddle_hits = 0u32;
    let mut wall_bounces = 0u32;
    let mut bricks_destroyed = 0u32;

    for _ in 0..MAX_DEMO_FRAMES {
        let input = autopilot_input(&state);
        step(&mut state, &input);

        for event in &state.events {
            match event {
                GameEvent::PaddleHit { .. } => paddle_hits += 1,
                GameEvent::WallBounce => wall_bounces += 1,
                GameEvent::BrickDestroyed { .. } => bricks_destroyed += 1,
                _ => {}
            }
        }

        if state.phase.is_finished() {
            break;
        }
    }

    log::info!(
        "{} paddle hits, {} wall bounces, {} bricks destroyed",
        paddle_hits,
        wall_bounces,
        bricks_destroyed
    );

    for command in render(&state) {
        if let DrawCommand::Text { text, .. } = command {
            println!("{}", text);
        }
    }
    println!(
        "{:?} after {} frames ({} bricks left, seed {})",
        state.phase,
        state.frame,
        state.bricks_remaining(),
        state.seed
    );
}
