//! Catch the Object entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlInputElement, KeyboardEvent};

    use catch_the_object::audio::{AudioManager, cue_for};
    use catch_the_object::persistence::LocalStore;
    use catch_the_object::platform::{FrameClock, KeyAction, KeyState};
    use catch_the_object::renderer::{DomRenderer, hud};
    use catch_the_object::{DifficultyLevel, GameConfig, Session, SessionPhase, Settings};

    /// Game instance holding all state
    struct Game {
        session: Session,
        renderer: Option<DomRenderer>,
        audio: AudioManager,
        settings: Settings,
        settings_store: LocalStore,
        keys: KeyState,
        clock: FrameClock,
        document: Document,
        /// Phase the overlays were last drawn for
        shown_phase: Option<SessionPhase>,
    }

    impl Game {
        fn new(document: Document, seed: u64) -> Self {
            let settings_store = LocalStore::new();
            let settings = Settings::load(&settings_store);
            let session = Session::new(GameConfig::default(), Box::new(LocalStore::new()), seed);

            let mut audio = AudioManager::new();
            audio.set_volume(settings.effective_volume());

            let renderer = DomRenderer::new(document.clone());
            if renderer.is_none() {
                log::error!("No #gameArea element - nothing will be drawn");
            }

            let mut game = Self {
                session,
                renderer,
                audio,
                settings,
                settings_store,
                keys: KeyState::default(),
                clock: FrameClock::new(),
                document,
                shown_phase: None,
            };
            game.measure_playfield();
            game
        }

        /// Pick up the laid-out playfield and paddle sizes
        fn measure_playfield(&mut self) {
            let Some(renderer) = &self.renderer else {
                return;
            };
            let (w, h) = renderer.playfield_size();
            if w <= 0.0 || h <= 0.0 {
                return;
            }
            if let Some((pw, ph)) = renderer.paddle_size().filter(|(pw, ph)| *pw > 0.0 && *ph > 0.0) {
                let config = &mut self.session.state_mut().config;
                config.paddle_width = pw;
                config.paddle_height = ph;
            }
            self.session.resize(w, h);
            log::debug!("Playfield {}x{}", w, h);
        }

        /// Difficulty radio currently checked on the start screen
        fn selected_difficulty(&self) -> DifficultyLevel {
            self.document
                .query_selector("input[name=difficulty]:checked")
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                .and_then(|input| DifficultyLevel::from_str(&input.value()))
                .unwrap_or(self.settings.difficulty)
        }

        /// Check the radio for the remembered difficulty
        fn preselect_difficulty(&self) {
            let selector = format!(
                "input[name=difficulty][value={}]",
                self.settings.difficulty.as_str()
            );
            if let Some(input) = self
                .document
                .query_selector(&selector)
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            {
                input.set_checked(true);
            }
        }

        fn start(&mut self) {
            if self.session.is_running() {
                return;
            }
            let level = self.selected_difficulty();
            if level != self.settings.difficulty {
                self.settings.difficulty = level;
                if let Err(e) = self.settings.save(&mut self.settings_store) {
                    log::warn!("Could not save settings: {}", e);
                }
            }

            if let Some(renderer) = &mut self.renderer {
                renderer.clear();
            }
            self.measure_playfield();
            self.keys.clear();
            self.clock.reset();
            self.audio.resume();
            self.session.start_game(level);
            self.sync_overlays();
        }

        fn restart(&mut self) {
            if self.session.phase() != SessionPhase::Ended {
                return;
            }
            if let Some(renderer) = &mut self.renderer {
                renderer.clear();
            }
            self.keys.clear();
            self.clock.reset();
            self.session.restart();
            self.sync_overlays();
        }

        /// One animation frame
        fn frame(&mut self, time: f64) {
            let dt = self.clock.frame(time);
            let input = self.keys.tick_input();
            self.session.advance(dt, &input);

            for event in self.session.drain_events() {
                self.audio.play(cue_for(&event));
            }

            if let Some(renderer) = &mut self.renderer {
                renderer.render(self.session.state(), &self.settings);
            }
            let state = self.session.state();
            hud::update_hud(
                &self.document,
                state.score,
                state.lives,
                self.session.best_score(),
            );
            self.sync_overlays();
        }

        /// Show the overlay that matches the session phase
        fn sync_overlays(&mut self) {
            let phase = self.session.phase();
            if self.shown_phase == Some(phase) {
                return;
            }
            self.shown_phase = Some(phase);

            match phase {
                SessionPhase::Idle => {
                    hud::hide_summary(&self.document);
                    hud::show_start_screen(&self.document, true, self.session.best_score());
                }
                SessionPhase::Running => {
                    hud::hide_summary(&self.document);
                    hud::show_start_screen(&self.document, false, self.session.best_score());
                }
                SessionPhase::Ended => {
                    if let Some(summary) = self.session.summary() {
                        hud::show_summary(&self.document, &summary);
                    }
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("Catch the Object starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(document.clone(), seed)));
        {
            let mut g = game.borrow_mut();
            g.preselect_difficulty();
            g.sync_overlays();
        }
        log::info!("Game initialized with seed: {}", seed);

        setup_keyboard(&window, game.clone());
        setup_buttons(&document, game.clone());
        setup_window_events(&window, &document, game.clone());

        request_animation_frame(game);

        log::info!("Catch the Object running!");
    }

    fn setup_keyboard(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                let mut g = game.borrow_mut();
                match g.keys.key_down(&key) {
                    Some(KeyAction::Start) => match g.session.phase() {
                        SessionPhase::Idle => g.start(),
                        SessionPhase::Ended => g.restart(),
                        SessionPhase::Running => {}
                    },
                    Some(_) if g.session.is_running() => event.prevent_default(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keys.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("startBtn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().start();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("No #startBtn - press Enter to start");
        }

        if let Some(btn) = document.get_element_by_id("restartBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_window_events(window: &web_sys::Window, document: &Document, game: Rc<RefCell<Game>>) {
        // Resize re-measures the playfield
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().measure_playfield();
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keys released while unfocused never send keyup
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().keys.clear();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    g.keys.clear();
                    g.clock.reset();
                    log::info!("Tab hidden");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
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
        game.borrow_mut().frame(time);
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
    use catch_the_object::consts::TICK_MS;
    use catch_the_object::persistence::MemoryStore;
    use catch_the_object::{DifficultyLevel, GameConfig, Session, SessionPhase};

    env_logger::init();
    log::info!("Catch the Object (native) starting...");
    log::info!("Native mode runs a headless autoplay demo - use `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let level = args
        .next()
        .and_then(|s| DifficultyLevel::from_str(&s))
        .unwrap_or_default();
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);

    let mut session = Session::new(GameConfig::default(), Box::new(MemoryStore::new()), seed);

    // Ten simulated minutes per run at most
    let max_frames = (10 * 60 * 1000) / TICK_MS as u32;
    for run in 1..=3 {
        session.start_game(level);
        let mut frames = 0;
        while session.phase() == SessionPhase::Running && frames < max_frames {
            let input = autopilot::steer(session.state());
            session.advance(TICK_MS as f64, &input);
            session.drain_events();
            frames += 1;
        }
        if session.is_running() {
            session.game_over();
        }

        if let Some(summary) = session.summary() {
            println!(
                "Run {} ({}): score {}, best {}{}, {:.1}s",
                run,
                level.as_str(),
                summary.score,
                summary.best,
                if summary.new_best { " (new best)" } else { "" },
                frames as f32 * TICK_MS / 1000.0
            );
        }
        session.restart();
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use catch_the_object::sim::{Category, GameState, TickInput};

    /// Chase the lowest catchable object, dodge nothing
    pub fn steer(state: &GameState) -> TickInput {
        let paddle = state.player_rect();
        let center = paddle.center().x;
        let size = state.config.object_size;

        let target = state
            .objects
            .iter()
            .filter(|o| o.category != Category::Malus && o.y + size <= paddle.top)
            .max_by(|a, b| a.y.total_cmp(&b.y));

        let Some(target) = target else {
            return TickInput::default();
        };
        let target_x = target.x + size / 2.0;
        let dead_zone = state.player_speed;
        TickInput {
            left: target_x < center - dead_zone,
            right: target_x > center + dead_zone,
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
