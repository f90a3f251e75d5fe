//! Classic Pong entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use classic_pong::GameConfig;
    use classic_pong::platform::web::WebPlatform;
    use classic_pong::platform::{LoopControl, run_frame};
    use classic_pong::renderer::RenderState;
    use classic_pong::sim::GameState;

    /// Longest frame gap credited to the pacing accumulator (tab switches)
    const MAX_DT: f64 = 0.1;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        platform: WebPlatform,
        /// Seconds per game frame
        frame_dt: f64,
        accumulator: f64,
        last_time: f64,
    }

    impl Game {
        /// Run at most one game frame per animation frame, paced to the
        /// configured rate. Returns false once the loop should stop.
        fn advance(&mut self, time: f64) -> bool {
            let dt = if self.last_time > 0.0 {
                (time - self.last_time) / 1000.0
            } else {
                self.frame_dt
            };
            self.last_time = time;
            self.accumulator += dt.min(MAX_DT);

            if self.accumulator < self.frame_dt {
                return true;
            }
            self.accumulator = (self.accumulator - self.frame_dt).min(self.frame_dt);

            let (control, _events) = run_frame(&mut self.state, &mut self.platform);
            control == LoopControl::Continue
        }
    }

    fn canvas(document: &web_sys::Document, id: &str) -> Result<HtmlCanvasElement, JsValue> {
        document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("no #{} element", id)))?
            .dyn_into()
            .map_err(|_| JsValue::from_str(&format!("#{} is not a canvas", id)))
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Classic Pong starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let config = GameConfig::load();
        let court = (config.screen_width, config.screen_height);
        document.set_title(&config.title);

        let gpu_canvas = canvas(&document, "canvas")?;
        let text_canvas = canvas(&document, "text-canvas")?;
        gpu_canvas.set_width(court.0);
        gpu_canvas.set_height(court.1);

        let seed = config.seed.unwrap_or(js_sys::Date::now() as u64);
        let state = GameState::new(&config, seed);
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU (WebGL fallback)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(gpu_canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {}", e)))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {}", e)))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, court.0, court.1, court)
            .await
            .map_err(|e| JsValue::from_str(&format!("{:#}", e)))?;
        let platform = WebPlatform::new(render_state, &text_canvas)?;

        let game = Rc::new(RefCell::new(Game {
            state,
            platform,
            frame_dt: 1.0 / config.target_fps.max(1) as f64,
            accumulator: 0.0,
            last_time: 0.0,
        }));

        request_animation_frame(game);

        log::info!("Classic Pong running!");
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_running = game.borrow_mut().advance(time);
        if keep_running {
            request_animation_frame(game);
        } else {
            log::info!("Classic Pong stopped");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    // Backend init failure is fatal: the loop never starts
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use classic_pong::GameConfig;
    use classic_pong::platform::{HeadlessPlatform, LoopControl, run_frame};
    use classic_pong::sim::{FrameInput, GameMode, GameState};

    env_logger::init();
    log::info!("Classic Pong (native) starting...");
    log::info!("Native mode has no window backend - run with `trunk serve` for the web version");

    let config = GameConfig::load().context("Failed to load config")?;
    let seed = config.seed.unwrap_or_else(rand::random);
    let mut state = GameState::new(&config, seed);
    log::info!("Game initialized with seed: {}", seed);

    // Demo match: start from the menu, leave the player paddle idle
    let mut platform = HeadlessPlatform::scripted([FrameInput {
        enter_pressed: true,
        ..Default::default()
    }]);
    let max_frames = config.target_fps as u64 * 60 * 10;
    let mut frames = 0;
    while state.mode != GameMode::GameOver && frames < max_frames {
        frames += 1;
        if run_frame(&mut state, &mut platform).0 == LoopControl::Exit {
            break;
        }
    }

    if state.mode == GameMode::GameOver {
        log::info!(
            "Demo finished after {} frames: {}",
            frames,
            classic_pong::scene::winner_text(&state)
        );
    } else {
        log::info!("Demo stopped after {} frames without a winner", frames);
    }
    println!("player {} - cpu {}", state.scores.player, state.scores.cpu);

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
