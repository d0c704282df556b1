//! Gapwing entry point
//!
//! On the web this wires DOM input, the sprite manifest fetch and WebGPU
//! rendering around the fixed-step tick loop. The native build is a headless
//! driver: it flies the autopilot for a number of ticks and prints the final
//! snapshot as JSON.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use gapwing::assets::SpriteAtlas;
    use gapwing::consts::SIM_DT;
    use gapwing::input::{Action, InputState, Key, RawInput};
    use gapwing::renderer::RenderState;
    use gapwing::sim::{GameEvent, GamePhase, GameState, tick};
    use gapwing::timestep::FixedStep;
    use gapwing::WorldConfig;

    const MANIFEST_URL: &str = "assets/sprites.json";

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        atlas: SpriteAtlas,
        input: InputState,
        step: FixedStep,
        last_time: f64,
    }

    impl Game {
        fn new(state: GameState) -> Self {
            Self {
                state,
                render_state: None,
                atlas: SpriteAtlas::loading(),
                input: InputState::default(),
                step: FixedStep::default(),
                last_time: 0.0,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            for _ in 0..self.step.advance(dt) {
                // One-shot inputs are consumed by the first substep
                let input = self.input.take();
                for event in tick(&mut self.state, &input) {
                    self.on_event(event);
                }
            }
        }

        fn on_event(&self, event: GameEvent) {
            match event {
                GameEvent::Crashed(cause) => {
                    log::info!("Crashed into {:?} with score {}", cause, self.state.score)
                }
                GameEvent::Started => log::debug!("Run {} started", self.state.runs),
                _ => {}
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let snapshot = self.state.snapshot();
                match render_state.render_snapshot(&snapshot, &self.state.config, &self.atlas) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.config.width, render_state.config.height);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.score.to_string()));
            }

            let toggle = |id: &str, visible: bool| {
                if let Some(el) = document.get_element_by_id(id) {
                    let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
                }
            };
            toggle("start-prompt", self.state.phase == GamePhase::Idle);
            toggle("autopilot-badge", self.input.autopilot());

            toggle("game-over", self.state.phase == GamePhase::GameOver);
            if self.state.phase == GamePhase::GameOver {
                if let Some(el) = document.get_element_by_id("final-score") {
                    el.set_text_content(Some(&self.state.score.to_string()));
                }
            }
        }
    }

    async fn fetch_text(url: &str) -> Result<String, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let response: web_sys::Response = JsFuture::from(window.fetch_with_str(url))
            .await?
            .dyn_into()?;
        if !response.ok() {
            return Err(JsValue::from_str(&format!("HTTP {}", response.status())));
        }
        let body = JsFuture::from(response.text()?).await?;
        body.as_string()
            .ok_or_else(|| JsValue::from_str("response body is not text"))
    }

    /// Fetch the sprite manifest; the game keeps running while it loads
    async fn load_sprites(game: Rc<RefCell<Game>>) {
        let result = fetch_text(MANIFEST_URL).await;
        let mut g = game.borrow_mut();
        match result {
            Ok(json) => {
                if let Err(e) = g.atlas.apply_manifest(&json) {
                    g.atlas.fail_pending(&format!("bad manifest: {e}"));
                }
            }
            Err(e) => g.atlas.fail_pending(&format!("fetch failed: {e:?}")),
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Gapwing starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let config = WorldConfig::load();
        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(config, seed).expect("stored config is validated on load");
        let game = Rc::new(RefCell::new(Game::new(state)));

        log::info!("Game initialized with seed: {}", seed);

        wasm_bindgen_futures::spawn_local(load_sprites(game.clone()));

        // Input first: the tick runs even if the GPU never comes up
        setup_input_handlers(&canvas, game.clone());
        setup_restart_button(game.clone());

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => {
                let adapter = instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::HighPerformance,
                        compatible_surface: Some(&surface),
                        force_fallback_adapter: false,
                    })
                    .await;
                match adapter {
                    Ok(adapter) => {
                        log::info!("Using adapter: {:?}", adapter.get_info().name);
                        let world = game.borrow().state.config.clone();
                        match RenderState::new(surface, &adapter, width, height, &world).await {
                            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
                            Err(e) => log::error!("Renderer unavailable: {}", e),
                        }
                    }
                    Err(e) => log::error!("No GPU adapter: {}", e),
                }
            }
            Err(e) => log::error!("Failed to create surface: {}", e),
        }

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("Gapwing running!");
    }

    fn push_raw(game: &Rc<RefCell<Game>>, raw: RawInput) -> Option<Action> {
        game.borrow_mut().input.handle(raw)
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                push_raw(&game, RawInput::PointerDown);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                push_raw(&game, RawInput::TouchStart);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                let key = Key::from_dom_key(&event.key());
                if push_raw(&game, RawInput::KeyDown(key)) == Some(Action::Primary) {
                    // Keep space/arrow from scrolling the page
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                push_raw(&game, RawInput::RestartButton);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use gapwing::WorldConfig;
    use gapwing::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

    env_logger::init();

    // gapwing [seed] [max_ticks]
    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(0x5eed);
    let max_ticks: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(3600);

    log::info!("Gapwing (native) starting: seed {}, up to {} ticks", seed, max_ticks);

    let mut state = match GameState::new(WorldConfig::load(), seed) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Invalid world config: {}", e);
            std::process::exit(1);
        }
    };

    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };

    for _ in 0..max_ticks {
        for event in tick(&mut state, &input) {
            match event {
                GameEvent::Scored { score } => log::debug!("Score {}", score),
                GameEvent::Crashed(cause) => log::info!("Crashed into {:?}", cause),
                _ => {}
            }
        }
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    log::info!(
        "Finished after {} ticks with score {} ({:?})",
        state.time_ticks,
        state.score,
        state.phase
    );

    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
