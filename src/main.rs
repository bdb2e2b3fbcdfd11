//! Lane Runner entry point
//!
//! Browser: canvas 2D host driven by `requestAnimationFrame`.
//! Native: headless reflex-mode run that logs snapshots.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use lane_runner::SimConfig;
    use lane_runner::input::KeyState;
    use lane_runner::renderer::{CanvasTarget, draw_frame};
    use lane_runner::sim::{Simulation, tick};

    const CANVAS_ID: &str = "simulatorCanvas";

    /// Game instance holding all state
    struct Game {
        sim: Simulation,
        keys: KeyState,
        target: CanvasTarget,
    }

    impl Game {
        fn frame(&mut self) {
            let input = self.keys.sample();
            tick(&mut self.sim, &input);
            draw_frame(&mut self.target, &self.sim);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
        }

        log::info!("Lane Runner starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or("no canvas")?
            .dyn_into()?;

        let config = SimConfig::default();
        canvas.set_width(config.road.viewport_width as u32);
        canvas.set_height(config.road.viewport_height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let sim = Simulation::new(config, seed).map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Simulation initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            sim,
            keys: KeyState::new(),
            target: CanvasTarget::new(ctx),
        }));

        setup_input_handlers(&window, game.clone());

        request_animation_frame(game);

        log::info!("Lane Runner running!");
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().keys.key_down(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().keys.key_up(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: held keys would otherwise stick
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().keys.clear();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("no window for animation frame");
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frame();
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Lane Runner failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Lane Runner (native) starting...");
    log::info!("Native mode runs headless - build for wasm32 to drive the canvas version");

    if let Err(e) = run_headless() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive the reflex controller for a fixed number of ticks.
///
/// Usage: `lane-runner [config.json] [ticks]`
#[cfg(not(target_arch = "wasm32"))]
fn run_headless() -> Result<(), Box<dyn std::error::Error>> {
    use lane_runner::SimConfig;
    use lane_runner::sim::{ControlMode, SimEvent, Simulation, TickInput, tick};

    const DEFAULT_TICKS: u64 = 3_600;
    const REPORT_EVERY: u64 = 600;

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => SimConfig::from_json(&std::fs::read_to_string(&path)?)?,
        None => SimConfig::default(),
    };
    let ticks = match args.next() {
        Some(n) => n.parse()?,
        None => DEFAULT_TICKS,
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_secs();
    let mut sim = Simulation::new(config, seed)?;
    sim.set_mode(ControlMode::Reflex);
    log::info!("Seed {}, running {} ticks", seed, ticks);

    let input = TickInput::default();
    let mut lane_changes = 0u32;
    for _ in 0..ticks {
        tick(&mut sim, &input);
        lane_changes += sim
            .events
            .iter()
            .filter(|e| matches!(e, SimEvent::LaneChanged { .. }))
            .count() as u32;

        if sim.time_ticks % REPORT_EVERY == 0 {
            log::info!("{}", serde_json::to_string(&sim.snapshot())?);
        }
    }

    println!(
        "ticks={} distance={:.1} lane_changes={} collisions={}",
        sim.time_ticks, sim.distance, lane_changes, sim.collisions
    );
    Ok(())
}
