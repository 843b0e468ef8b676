//! Squiggly Slider entry point
//!
//! Handles platform-specific initialization and runs the animation loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_widget {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent};

    use squiggly_slider::audio::AudioManager;
    use squiggly_slider::consts::*;
    use squiggly_slider::renderer::draw_frame;
    use squiggly_slider::sim::{
        FixedStep, PointerEvent, PointerKind, SimEvent, SliderState, handle_pointer, tick,
    };
    use squiggly_slider::{Settings, Tuning};

    const CANVAS_ID: &str = "squiggly-slider";
    const SOUND_ID: &str = "fallSound";

    /// Widget instance holding all state
    struct Widget {
        state: SliderState,
        tuning: Tuning,
        settings: Settings,
        ctx: CanvasRenderingContext2d,
        audio: AudioManager,
        step: FixedStep,
        last_time: f64,
    }

    impl Widget {
        /// Run simulation ticks for the elapsed frame time
        fn update(&mut self, dt: f32, time: f64) {
            for _ in 0..self.step.advance(dt) {
                tick(&mut self.state, &self.tuning, time);
            }

            self.dispatch_events();
        }

        /// React to simulation events
        fn dispatch_events(&mut self) {
            for event in self.state.drain_events() {
                match event {
                    SimEvent::Landed { impact_speed, .. } => {
                        self.audio.play_landing(impact_speed);
                    }
                    SimEvent::Detached { .. } => log::info!("Volume maxed out - ball detached"),
                    SimEvent::Reattached { pos } => {
                        log::info!("Ball back on the slider at x={:.0}", pos.x)
                    }
                    SimEvent::DwellArmed { .. } | SimEvent::DwellCancelled => {}
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            draw_frame(&mut self.ctx, &self.state, &self.tuning, &self.settings);
        }

        /// Forward a pointer event; returns whether the ball holds the gesture
        fn pointer(&mut self, kind: PointerKind, x: f32, y: f32) -> bool {
            let now = now_ms();
            let captured = handle_pointer(
                &mut self.state,
                &self.tuning,
                PointerEvent::new(kind, x, y),
                now,
            );
            self.dispatch_events();
            captured
        }
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    /// Client coordinates to canvas pixels (accounts for CSS scaling)
    fn canvas_point(canvas: &HtmlCanvasElement, client_x: f64, client_y: f64) -> (f32, f32) {
        let rect = canvas.get_bounding_client_rect();
        let x_css = client_x - rect.left();
        let y_css = client_y - rect.top();
        if rect.width() > 0.0 && rect.height() > 0.0 {
            (
                (x_css / rect.width() * canvas.width() as f64) as f32,
                (y_css / rect.height() * canvas.height() as f64) as f32,
            )
        } else {
            (x_css as f32, y_css as f32)
        }
    }

    /// Read tuning from `data-tuning`, keeping defaults on error
    fn load_tuning(canvas: &HtmlCanvasElement) -> Tuning {
        match canvas.get_attribute("data-tuning") {
            Some(json) => Tuning::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring data-tuning: {e}");
                Tuning::default()
            }),
            None => Tuning::default(),
        }
    }

    fn load_settings(canvas: &HtmlCanvasElement) -> Settings {
        canvas
            .get_attribute("data-settings")
            .map(|json| Settings::from_json_or_default(&json))
            .unwrap_or_default()
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {e}").into());
        }

        log::info!("Squiggly Slider starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or("no canvas")?
            .dyn_into()?;

        let tuning = load_tuning(&canvas);
        let settings = load_settings(&canvas);
        canvas.set_width(tuning.canvas_width as u32);
        canvas.set_height(tuning.canvas_height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2d context unavailable")?
            .dyn_into()?;

        let audio = AudioManager::new(&document, SOUND_ID, settings.effective_volume());

        let seed = js_sys::Date::now() as u64;
        let widget = Rc::new(RefCell::new(Widget {
            state: SliderState::new(&tuning, seed),
            tuning,
            settings,
            ctx,
            audio,
            step: FixedStep::new(),
            last_time: 0.0,
        }));

        log::info!("Widget initialized with seed: {}", seed);

        setup_input_handlers(&canvas, widget.clone())?;

        request_animation_frame(widget);

        log::info!("Squiggly Slider running!");
        Ok(())
    }

    fn add_mouse_listener(
        canvas: &HtmlCanvasElement,
        event: &str,
        kind: PointerKind,
        widget: Rc<RefCell<Widget>>,
    ) -> Result<(), JsValue> {
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let (x, y) = canvas_point(
                &canvas_clone,
                event.client_x() as f64,
                event.client_y() as f64,
            );
            widget.borrow_mut().pointer(kind, x, y);
        });
        canvas.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn add_touch_listener(
        canvas: &HtmlCanvasElement,
        event: &str,
        kind: PointerKind,
        widget: Rc<RefCell<Widget>>,
    ) -> Result<(), JsValue> {
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
            // touchend has no active touches; release at the last known spot
            let touch = event
                .touches()
                .get(0)
                .or_else(|| event.changed_touches().get(0));
            let (x, y) = match touch {
                Some(t) => canvas_point(&canvas_clone, t.client_x() as f64, t.client_y() as f64),
                None => (0.0, 0.0),
            };
            // Only swallow touches on the ball so the page still scrolls elsewhere
            if widget.borrow_mut().pointer(kind, x, y) {
                event.prevent_default();
            }
        });
        canvas.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        widget: Rc<RefCell<Widget>>,
    ) -> Result<(), JsValue> {
        add_mouse_listener(canvas, "mousedown", PointerKind::Press, widget.clone())?;
        add_mouse_listener(canvas, "mousemove", PointerKind::Move, widget.clone())?;
        add_mouse_listener(canvas, "mouseup", PointerKind::Release, widget.clone())?;
        add_mouse_listener(canvas, "mouseleave", PointerKind::Leave, widget.clone())?;

        add_touch_listener(canvas, "touchstart", PointerKind::Press, widget.clone())?;
        add_touch_listener(canvas, "touchmove", PointerKind::Move, widget.clone())?;
        add_touch_listener(canvas, "touchend", PointerKind::Release, widget.clone())?;
        add_touch_listener(canvas, "touchcancel", PointerKind::Leave, widget)?;
        Ok(())
    }

    fn request_animation_frame(widget: Rc<RefCell<Widget>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window - animation stopped");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame(widget, time);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {e:?}");
        }
        closure.forget();
    }

    fn frame(widget: Rc<RefCell<Widget>>, time: f64) {
        {
            let mut w = widget.borrow_mut();

            // Calculate delta time
            let dt = if w.last_time > 0.0 {
                ((time - w.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            w.last_time = time;

            w.update(dt, time);
            w.render();
        }

        request_animation_frame(widget);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_widget::run() {
        log::error!("Squiggly Slider failed to start: {e:?}");
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless run: roll off the end, fall, get picked up and dropped back on the curve
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use squiggly_slider::Tuning;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Squiggly Slider (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {path}");
                tuning
            }
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    headless::run(&tuning);
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use squiggly_slider::Tuning;
    use squiggly_slider::consts::SIM_DT;
    use squiggly_slider::sim::{
        BallState, PointerEvent, PointerKind, SimEvent, SliderState, handle_pointer, tick,
    };

    const TICK_MS: f64 = SIM_DT as f64 * 1000.0;
    const MAX_TICKS: u64 = 60 * 120;

    fn log_events(state: &mut SliderState, tuning: &Tuning) {
        for event in state.drain_events() {
            match event {
                SimEvent::Landed {
                    pos,
                    impact_speed,
                    bounced,
                } => log::info!(
                    "t={:>5} landed at x={:.0} impact={:.2} {}",
                    state.time_ticks,
                    pos.x,
                    impact_speed,
                    if bounced { "bounce" } else { "rest" }
                ),
                other => log::info!(
                    "t={:>5} {:?} volume={:.0}%",
                    state.time_ticks,
                    other,
                    state.volume(tuning) * 100.0
                ),
            }
        }
    }

    pub fn run(tuning: &Tuning) {
        let mut state = SliderState::new(tuning, 0x5eed);
        let mut now = 0.0;

        // Nudge the ball so it rolls to the end of the track
        state.ball.pos = tuning.curve.point_at(tuning.track.right - 1.0);
        state.ball.vel.x = 2.0;

        while state.ball.state != (BallState::Detached { resting: true }) {
            if state.time_ticks >= MAX_TICKS {
                log::warn!("Ball never came to rest");
                return;
            }
            tick(&mut state, tuning, now);
            now += TICK_MS;
            log_events(&mut state, tuning);
        }

        // Pick it up and hover it on the curve until the dwell elapses
        let grab = state.ball.pos;
        let x = (tuning.track.left + tuning.track.right) / 2.0;
        let y = tuning.curve.y_at(x);
        for event in [
            PointerEvent::new(PointerKind::Press, grab.x, grab.y),
            PointerEvent::new(PointerKind::Move, x, y),
        ] {
            handle_pointer(&mut state, tuning, event, now);
        }
        log_events(&mut state, tuning);

        let release_at = now + tuning.dwell_ms + TICK_MS;
        while now < release_at {
            tick(&mut state, tuning, now);
            now += TICK_MS;
        }
        log_events(&mut state, tuning);

        handle_pointer(
            &mut state,
            tuning,
            PointerEvent::new(PointerKind::Release, x, y),
            now,
        );
        for _ in 0..600 {
            tick(&mut state, tuning, now);
            now += TICK_MS;
        }
        log_events(&mut state, tuning);

        log::info!(
            "Settled at x={:.1} volume={:.0}% state={:?}",
            state.ball.pos.x,
            state.volume(tuning) * 100.0,
            state.ball.state
        );
        if let Ok(json) = serde_json::to_string(&state.ball) {
            log::info!("Final ball: {json}");
        }
    }
}
