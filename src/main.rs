//! Zombie Escape entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use zombie_escape::consts::*;
    use zombie_escape::platform::{InputState, joystick_vector, touch_controls_active};
    use zombie_escape::renderer::CanvasRenderer;
    use zombie_escape::sim::{GamePhase, GameState, tick};
    use zombie_escape::{BestScore, Settings};

    /// Radius of the on-screen stick in CSS pixels
    const JOYSTICK_RADIUS: f32 = 50.0;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        best: BestScore,
        renderer: Option<CanvasRenderer>,
        input: InputState,
        accumulator: f32,
        last_time: f64,
        /// Where the current joystick touch started
        stick_origin: Option<Vec2>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        /// A requestAnimationFrame callback is pending
        looping: bool,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            let mut state = GameState::new(seed);
            state.particle_limit = settings.max_particles();
            Self {
                state,
                input: InputState::new(settings.autopilot),
                settings,
                best: BestScore::load(),
                renderer: None,
                accumulator: 0.0,
                last_time: 0.0,
                stick_origin: None,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                looping: false,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.25);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.snapshot(now_ms());
                tick(&mut self.state, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;

                if !self.state.is_running() {
                    break;
                }
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        fn render(&self) {
            if let Some(ref renderer) = self.renderer {
                renderer.render(&self.state, &self.settings);
            }
        }

        /// Idle -> Running from the start screen
        fn start(&mut self) {
            self.input.release_all();
            self.accumulator = 0.0;
            self.last_time = 0.0;
            self.state.start();
            set_hidden("startScreen", true);
            set_hidden("gameOver", true);
        }

        /// GameOver -> Idle -> Running with a fresh world
        fn restart(&mut self, seed: u64) {
            self.state.reset(seed);
            self.state.particle_limit = self.settings.max_particles();
            self.start();
            log::info!("Game restarted with seed: {}", seed);
        }

        /// Record the result and show the game over screen
        fn finish(&mut self) {
            let score = self.state.final_score.unwrap_or(self.state.score);
            if self.best.submit(score) {
                self.best.save();
            }
            if let Some(document) = document() {
                set_text(&document, "finalScore", &score.to_string());
            }
            set_hidden("gameOver", false);
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = document() else {
                return;
            };
            set_text(&document, "healthValue", &self.state.player.health.to_string());
            set_text(&document, "scoreValue", &self.state.score.to_string());
            set_text(&document, "bestValue", &self.best.score.max(self.state.score).to_string());
            if self.settings.show_fps {
                set_text(&document, "fpsValue", &self.fps.to_string());
            }
        }

        /// Convert a client-space point to arena coordinates
        fn to_arena(&self, canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> Vec2 {
            let rect = canvas.get_bounding_client_rect();
            let scale_x = if rect.width() > 0.0 {
                self.state.arena.x as f64 / rect.width()
            } else {
                1.0
            };
            let scale_y = if rect.height() > 0.0 {
                self.state.arena.y as f64 / rect.height()
            } else {
                1.0
            };
            Vec2::new(
                ((client_x as f64 - rect.left()) * scale_x) as f32,
                ((client_y as f64 - rect.top()) * scale_y) as f32,
            )
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    /// Monotonic clock for weapon cooldowns
    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(id: &str, hidden: bool) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            let result = if hidden {
                el.class_list().add_1("hidden")
            } else {
                el.class_list().remove_1("hidden")
            };
            if result.is_err() {
                log::warn!("Could not toggle #{}", id);
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }
        log::info!("Zombie Escape starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));
        log::info!("Game initialized with seed: {}", seed);

        {
            let mut g = game.borrow_mut();
            let arena = g.state.arena;
            g.renderer = CanvasRenderer::new(&canvas, arena.x as u32, arena.y as u32);
            if g.renderer.is_none() {
                log::error!("Canvas 2D context unavailable");
            }
            if !g.settings.show_fps {
                set_hidden("fps", true);
            }
            let viewport = window
                .inner_width()
                .ok()
                .and_then(|w| w.as_f64())
                .unwrap_or(f64::MAX);
            set_hidden(
                "joystickContainer",
                !touch_controls_active(&g.settings, viewport),
            );
            g.render();
            g.update_hud();
        }

        setup_keyboard(game.clone());
        setup_mouse(&canvas, game.clone());
        setup_joystick(game.clone());
        setup_buttons(game);

        log::info!("Zombie Escape ready");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_down(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur (click outside) would otherwise leave keys stuck down
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().input.release_all();
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_mouse(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let mut g = game.borrow_mut();
            if !g.state.is_running() {
                return;
            }
            let target = g.to_arena(&canvas_clone, event.client_x(), event.client_y());
            g.input.fire_at(target);
        });
        let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_joystick(game: Rc<RefCell<Game>>) {
        let Some(zone) = document().and_then(|d| d.get_element_by_id("joystickContainer")) else {
            return;
        };

        // Touch start: the stick is centered where the thumb lands
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    g.stick_origin = Some(Vec2::new(
                        touch.client_x() as f32,
                        touch.client_y() as f32,
                    ));
                    g.input.joystick = Vec2::ZERO;
                }
            });
            let _ = zone
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    if let Some(origin) = g.stick_origin {
                        let current = Vec2::new(touch.client_x() as f32, touch.client_y() as f32);
                        g.input.joystick = joystick_vector(origin, current, JOYSTICK_RADIUS);
                    }
                }
            });
            let _ = zone
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                let mut g = game.borrow_mut();
                g.stick_origin = None;
                g.input.joystick = Vec2::ZERO;
            });
            let _ = zone
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = document() else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("startBtn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let started = {
                    let mut g = game.borrow_mut();
                    if g.state.phase == GamePhase::Idle {
                        g.start();
                    }
                    g.state.is_running()
                };
                if started {
                    ensure_loop(game.clone());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restartBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                game.borrow_mut().restart(seed);
                ensure_loop(game.clone());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Start the frame loop unless one is already scheduled
    fn ensure_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.looping {
                return;
            }
            g.looping = true;
        }
        request_animation_frame(game);
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
        let keep_going = {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            g.update_hud();

            if g.state.phase == GamePhase::GameOver {
                g.finish();
            }
            g.looping = g.state.is_running();
            g.looping
        };

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
fn main() {
    use zombie_escape::BestScore;
    use zombie_escape::consts::SIM_DT;
    use zombie_escape::sim::{GameState, TickInput, tick};

    /// Give up after ten simulated minutes
    const MAX_TICKS: u64 = 60 * 60 * 10;

    env_logger::init();
    log::info!("Zombie Escape (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(42);

    let mut state = GameState::new(seed);
    state.start();

    while state.is_running() && state.time_ticks < MAX_TICKS {
        let input = TickInput {
            autopilot: true,
            now_ms: state.time_ticks as f64 * SIM_DT as f64 * 1000.0,
            ..Default::default()
        };
        tick(&mut state, &input);
        if state.time_ticks.is_multiple_of(600) {
            log::debug!(
                "t={} health={} score={} enemies={}",
                state.time_ticks,
                state.player.health,
                state.score,
                state.enemies.len()
            );
        }
    }

    let mut best = BestScore::load();
    let score = state.final_score.unwrap_or(state.score);
    let record = best.submit(score);
    best.save();

    println!(
        "seed {}: {} after {} ticks, score {}, kills {}{}",
        seed,
        if state.is_running() { "survived" } else { "died" },
        state.time_ticks,
        score,
        state.kills_this_wave,
        if record { " (new best)" } else { "" }
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
