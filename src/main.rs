//! Kolobok entry point
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

    use kolobok::audio::AudioManager;
    use kolobok::hud;
    use kolobok::platform::{KeyboardState, PerformanceClock};
    use kolobok::renderer::{RenderState, build_scene};
    use kolobok::sim::{GameLoop, TimeSource};
    use kolobok::{Settings, StartupError};

    /// Key that shows/hides the overlay
    const DEBUG_TOGGLE_KEY: &str = "`";

    /// Game instance holding all state
    struct Game {
        settings: Settings,
        game: GameLoop,
        keyboard: KeyboardState,
        audio: AudioManager,
        render_state: Option<RenderState>,
        debug_el: Option<web_sys::Element>,
    }

    impl Game {
        fn new(settings: Settings, now: std::time::Duration) -> Self {
            Self {
                game: GameLoop::new(settings.world(), now),
                keyboard: KeyboardState::new(),
                audio: AudioManager::new(&settings.audio),
                render_state: None,
                debug_el: None,
                settings,
            }
        }

        /// Advance the simulation to the frame timestamp
        fn update(&mut self, time: f64) {
            let now = PerformanceClock::from_millis(time);
            let report = self.game.frame(&self.keyboard, now);
            if report.reset {
                log::debug!("Reset handled this frame");
            }
            self.audio.handle_events(self.game.events(), now);
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let vertices = build_scene(
                &self.game.snapshot(),
                self.game.world(),
                self.settings.quality,
            );
            match render_state.render(&vertices) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    render_state.resize(render_state.size.0, render_state.size.1);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Update the debug overlay in the DOM
        fn update_hud(&self) {
            let Some(el) = &self.debug_el else { return };
            let text = if self.settings.show_debug {
                hud::overlay_text(&self.game.snapshot(), self.keyboard.held())
            } else {
                String::new()
            };
            el.set_text_content(Some(&text));
        }

        /// Show or hide the overlay and remember the choice
        fn toggle_debug(&mut self) {
            self.settings.show_debug = !self.settings.show_debug;
            self.settings.save();
            log::info!("Debug overlay: {}", self.settings.show_debug);
        }
    }

    pub async fn run() -> Result<(), StartupError> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Kolobok starting...");

        let settings = Settings::load();

        let window = web_sys::window().ok_or(StartupError::Renderer("no window".into()))?;
        let document = window
            .document()
            .ok_or(StartupError::Renderer("no document".into()))?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or(StartupError::Renderer("no canvas".into()))?
            .dyn_into()
            .map_err(|_| StartupError::Renderer("#canvas is not a canvas".into()))?;

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let clock = PerformanceClock::new();
        let game = Rc::new(RefCell::new(Game::new(settings, clock.now())));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| StartupError::Renderer(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| StartupError::Renderer(e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let world = *game.borrow().game.world();
        let world_size = (world.width as f32, world.height as f32);
        let render_state = RenderState::new(surface, &adapter, width, height, world_size).await?;

        {
            let mut g = game.borrow_mut();
            g.render_state = Some(render_state);

            g.debug_el = document.get_element_by_id("debug");
            if g.debug_el.is_none() {
                log::warn!("No #debug element, overlay disabled");
            }
        }

        setup_input_handlers(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Kolobok running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                // Browsers require a gesture before audio starts
                g.audio.resume();
                let key = event.key();
                if key == DEBUG_TOGGLE_KEY {
                    if !event.repeat() {
                        g.toggle_debug();
                    }
                } else if g.keyboard.key_down(&key) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if game.borrow_mut().keyboard.key_up(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: key-ups will never arrive
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().keyboard.release_all();
                log::info!("Window lost focus, released keys");
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::Duration;

    use kolobok::audio::AudioManager;
    use kolobok::hud;
    use kolobok::platform::SystemClock;
    use kolobok::sim::{GameLoop, Key, ManualClock, ScriptedInput, TimeSource};
    use kolobok::{Settings, StartupError};

    /// Simulated display refresh rate
    const RENDER_HZ: f64 = 144.0;

    /// Fall, roll right, hop in place, hop left, reset, settle
    fn session_script() -> ScriptedInput {
        ScriptedInput::new()
            .idle(144)
            .hold(&[Key::MoveRight], 144)
            .hold(&[Key::Jump], 144)
            .hold(&[Key::MoveLeft, Key::Jump], 72)
            .hold(&[Key::Reset], 1)
            .idle(215)
    }

    pub fn run() -> Result<(), StartupError> {
        let settings = match std::env::args().nth(1) {
            Some(path) => Settings::load_from(path)?,
            None => {
                log::info!("No settings file given, using defaults");
                Settings::default()
            }
        };
        let world = settings.world();
        log::info!(
            "World {}x{}, floor at {:.1}, {} Hz physics, {} quality",
            world.width,
            world.height,
            world.floor_level,
            (1.0 / world.dt()).round(),
            settings.quality.as_str()
        );

        let wall = SystemClock::new();
        let mut clock = ManualClock::new();
        let mut game = GameLoop::new(world, clock.now());
        let mut audio = AudioManager::new(&settings.audio);

        let frame_delta = Duration::from_secs_f64(1.0 / RENDER_HZ);
        let overlay_every = RENDER_HZ as u32;
        let script = session_script();
        let mut total_ticks = 0u64;
        let mut cues = 0usize;

        for frame in 0..script.len() {
            clock.advance(frame_delta);
            let keys = script.keys_at(frame);
            let report = game.frame(&keys, clock.now());
            total_ticks += u64::from(report.ticks);
            cues += audio.handle_events(game.events(), clock.now()).len();

            if settings.show_debug || frame % overlay_every == 0 {
                log::info!("\n{}", hud::overlay_text(&game.snapshot(), keys));
            }
        }

        log::info!(
            "Simulated {:.2}s: {} frames, {} ticks, {} sound cues in {:?}",
            clock.now().as_secs_f64(),
            script.len(),
            total_ticks,
            cues,
            wall.now()
        );

        let snapshot = game.snapshot();
        println!(
            "{}",
            serde_json::to_string_pretty(&snapshot).unwrap_or_default()
        );
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("{}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Kolobok (native) starting...");

    if let Err(e) = native::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
