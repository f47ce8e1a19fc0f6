//! Lane Rush entry point
//!
//! Web: canvas + DOM wiring around [`App`](lane_rush::App), driven by
//! `requestAnimationFrame`. Native: a headless autopilot run that logs its
//! progress.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::convert::FromWasmAbi;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, EventTarget, HtmlCanvasElement, HtmlElement,
        FocusEvent, KeyboardEvent, MouseEvent, TouchEvent,
    };

    use lane_rush::App;
    use lane_rush::Tuning;
    use lane_rush::audio::WebAudio;
    use lane_rush::hud::HudSnapshot;
    use lane_rush::persistence::LocalStorageStore;
    use lane_rush::platform::{AnimationFrameScheduler, drive};
    use lane_rush::renderer::Vertex;
    use lane_rush::renderer::vertex::css_color;
    use lane_rush::sim::{Control, GameEvent, GameSession, GestureSample, InputEvent};

    type Game = Rc<RefCell<App<WebAudio>>>;

    /// Largest play area the layout allows
    const MAX_SIDE: f64 = 600.0;

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    /// Attach a listener for the lifetime of the page
    fn listen<E>(target: &EventTarget, kind: &str, handler: impl FnMut(E) + 'static)
    where
        E: FromWasmAbi + 'static,
    {
        let closure = Closure::<dyn FnMut(E)>::new(handler);
        if target
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("Failed to attach {} listener", kind);
        }
        closure.forget();
    }

    fn set_text(doc: &Document, id: &str, text: &str) {
        if let Some(el) = doc.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_active(doc: &Document, id: &str, active: bool) {
        if let Some(el) = doc.get_element_by_id(id) {
            let classes = el.class_list();
            let _ = if active {
                classes.add_1("active")
            } else {
                classes.remove_1("active")
            };
        }
    }

    /// Size the canvas to its container and return the play-area size
    fn fit_canvas(canvas: &HtmlCanvasElement) -> (f32, f32) {
        let container_w = canvas
            .parent_element()
            .map(|p| f64::from(p.client_width()))
            .unwrap_or(MAX_SIDE + 40.0);
        let inner_h = web_sys::window()
            .and_then(|w| w.inner_height().ok())
            .and_then(|h| h.as_f64())
            .unwrap_or(MAX_SIDE + 300.0);

        let width = MAX_SIDE.min(container_w - 40.0).max(1.0);
        let height = MAX_SIDE.min(inner_h - 300.0).max(1.0);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
        (width as f32, height as f32)
    }

    /// Fill the triangle list, batching runs of the same color into one path
    fn paint(ctx: &CanvasRenderingContext2d, vertices: &[Vertex]) {
        let mut current: Option<String> = None;

        for tri in vertices.chunks_exact(3) {
            let mut color = [0.0; 4];
            for v in tri {
                for (c, vc) in color.iter_mut().zip(v.color) {
                    *c += vc / 3.0;
                }
            }
            let css = css_color(color);

            if current.as_deref() != Some(css.as_str()) {
                if current.is_some() {
                    ctx.fill();
                }
                ctx.set_fill_style_str(&css);
                ctx.begin_path();
                current = Some(css);
            }

            ctx.move_to(f64::from(tri[0].position[0]), f64::from(tri[0].position[1]));
            ctx.line_to(f64::from(tri[1].position[0]), f64::from(tri[1].position[1]));
            ctx.line_to(f64::from(tri[2].position[0]), f64::from(tri[2].position[1]));
            ctx.close_path();
        }

        if current.is_some() {
            ctx.fill();
        }
    }

    fn update_hud(doc: &Document, hud: &HudSnapshot) {
        set_text(doc, "score", &hud.score.to_string());
        set_text(doc, "level", &hud.level.to_string());
        set_text(doc, "speed", &hud.speed_display.to_string());
        set_text(doc, "distance", &format!("{}m", hud.distance_m));
    }

    fn show_events(doc: &Document, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::GameStarted => {
                    set_active(doc, "startScreen", false);
                    set_active(doc, "gameOverScreen", false);
                }
                GameEvent::Collision { summary, .. } => {
                    set_text(doc, "finalScore", &summary.score.to_string());
                    set_text(
                        doc,
                        "finalDistance",
                        &format!("{}m", summary.distance.max(0.0).floor()),
                    );
                    set_active(doc, "gameOverScreen", true);
                }
                GameEvent::ScoreIncrement { .. } => {}
            }
        }
    }

    fn show_mute(doc: &Document, muted: bool) {
        for (id, visible) in [("soundOnIcon", !muted), ("soundOffIcon", muted)] {
            if let Some(el) = doc
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                let _ = el
                    .style()
                    .set_property("display", if visible { "block" } else { "none" });
            }
        }
    }

    fn setup_keyboard(doc: &Document, game: Game) {
        {
            let game = game.clone();
            listen(doc, "keydown", move |event: KeyboardEvent| {
                let key = event.key();
                if event.repeat() && Control::from_key(&key).is_some() {
                    event.prevent_default();
                    return;
                }
                let mut g = game.borrow_mut();
                if let Some(control) = Control::from_key(&key) {
                    event.prevent_default();
                    g.push_input(InputEvent::press(control));
                    return;
                }
                match key.as_str() {
                    " " => {
                        event.prevent_default();
                        g.push_input(InputEvent::Confirm);
                    }
                    "i" | "I" => {
                        let enabled = !g.autopilot();
                        g.set_autopilot(enabled);
                    }
                    _ => {}
                }
            });
        }

        listen(doc, "keyup", move |event: KeyboardEvent| {
            if let Some(control) = Control::from_key(&event.key()) {
                game.borrow_mut().push_input(InputEvent::release(control));
            }
        });
    }

    /// On-screen arrow buttons behave like the arrow keys
    fn setup_touch_buttons(doc: &Document, game: &Game) {
        let buttons = [
            ("btnLeft", Control::SteerLeft),
            ("btnRight", Control::SteerRight),
            ("btnUp", Control::Accelerate),
            ("btnDown", Control::Decelerate),
        ];

        for (id, control) in buttons {
            let Some(button) = doc.get_element_by_id(id) else {
                continue;
            };

            for (kind, pressed) in [
                ("touchstart", true),
                ("touchend", false),
                ("mousedown", true),
                ("mouseup", false),
            ] {
                let game = game.clone();
                let el = button.clone();
                listen(&button, kind, move |event: web_sys::Event| {
                    event.prevent_default();
                    let classes = el.class_list();
                    let _ = if pressed {
                        classes.add_1("pressed")
                    } else {
                        classes.remove_1("pressed")
                    };
                    game.borrow_mut().push_input(InputEvent::Control { control, pressed });
                });
            }
        }
    }

    /// Swipes and taps on the play area
    fn setup_gestures(canvas: &HtmlCanvasElement, game: &Game) {
        let touch_start = Rc::new(RefCell::new(None::<(Vec2, f64)>));

        {
            let touch_start = touch_start.clone();
            listen(canvas, "touchstart", move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let at = Vec2::new(touch.client_x() as f32, touch.client_y() as f32);
                    *touch_start.borrow_mut() = Some((at, js_sys::Date::now()));
                }
            });
        }

        {
            let game = game.clone();
            listen(canvas, "touchend", move |event: TouchEvent| {
                event.prevent_default();
                if event.touches().length() > 0 {
                    return;
                }
                let Some((start, started_ms)) = touch_start.borrow_mut().take() else {
                    return;
                };
                let Some(touch) = event.changed_touches().get(0) else {
                    return;
                };
                let sample = GestureSample {
                    start,
                    end: Vec2::new(touch.client_x() as f32, touch.client_y() as f32),
                    elapsed_ms: js_sys::Date::now() - started_ms,
                };
                game.borrow_mut().push_input(InputEvent::Gesture(sample));
            });
        }

        listen(canvas, "touchmove", |event: TouchEvent| event.prevent_default());
    }

    fn setup_buttons(doc: &Document, game: &Game) {
        for id in ["startButton", "restartButton"] {
            if let Some(button) = doc.get_element_by_id(id) {
                let game = game.clone();
                listen(&button, "click", move |_event: MouseEvent| {
                    game.borrow_mut().push_input(InputEvent::Confirm);
                });
            }
        }

        if let Some(button) = doc.get_element_by_id("muteButton") {
            let game = game.clone();
            listen(&button, "click", move |_event: MouseEvent| {
                let muted = game.borrow_mut().toggle_mute();
                if let Some(doc) = document() {
                    show_mute(&doc, muted);
                }
            });
        }
    }

    fn setup_resize(canvas: HtmlCanvasElement, game: Game) {
        let Some(window) = web_sys::window() else {
            return;
        };
        listen(&window, "resize", move |_event: web_sys::Event| {
            let (w, h) = fit_canvas(&canvas);
            game.borrow_mut().resize(w, h);
        });
    }

    /// Key-ups are lost while the page is unfocused, so drop everything held
    fn setup_focus_loss(game: Game) {
        let Some(window) = web_sys::window() else {
            return;
        };
        listen(&window, "blur", move |_event: FocusEvent| {
            game.borrow_mut().release_all_input();
        });
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Lane Rush starting...");

        let doc = document().expect("no document");
        let canvas: HtmlCanvasElement = doc
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let (width, height) = fit_canvas(&canvas);
        let seed = js_sys::Date::now() as u64;
        let session = GameSession::new(seed, width, height, Tuning::default())
            .expect("default tuning is valid");
        let app = App::new(session, WebAudio::new(), Box::new(LocalStorageStore));
        show_mute(&doc, app.settings().muted);

        log::info!("Game initialized with seed: {}", seed);

        let game: Game = Rc::new(RefCell::new(app));
        setup_keyboard(&doc, game.clone());
        setup_touch_buttons(&doc, &game);
        setup_gestures(&canvas, &game);
        setup_buttons(&doc, &game);
        setup_resize(canvas.clone(), game.clone());
        setup_focus_loss(game.clone());

        drive(AnimationFrameScheduler, move |now_ms| {
            let mut g = game.borrow_mut();
            let events = g.frame(now_ms);
            paint(&ctx, &g.scene());
            update_hud(&doc, &g.hud());
            show_events(&doc, &events);
            true
        });

        log::info!("Lane Rush running!");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lane_rush::App;
    use lane_rush::Tuning;
    use lane_rush::audio::LogAudio;
    use lane_rush::persistence::MemoryStore;
    use lane_rush::platform::{SleepScheduler, drive};
    use lane_rush::sim::{GameEvent, GameSession, InputEvent};

    /// Simulated frames before the demo gives up (two minutes at 60 fps)
    const MAX_FRAMES: u64 = 60 * 120;

    env_logger::init();
    log::info!("Lane Rush (native) starting headless autopilot run...");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);

    let tuning = match std::env::var("LANE_RUSH_TUNING") {
        Ok(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Tuning::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring tuning file {}: {}", path, e);
                Tuning::default()
            }),
            Err(e) => {
                log::warn!("Cannot read tuning file {}: {}", path, e);
                Tuning::default()
            }
        },
        Err(_) => Tuning::default(),
    };

    let session = match GameSession::new(seed, 500.0, 600.0, tuning) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Cannot start session: {}", e);
            return;
        }
    };
    let mut app = App::new(session, LogAudio, Box::new(MemoryStore::new()));
    app.set_autopilot(true);
    app.push_input(InputEvent::Confirm);

    // Watchable run at wall-clock speed; otherwise simulate as fast as possible
    let scheduler = if std::env::var_os("LANE_RUSH_REALTIME").is_some() {
        SleepScheduler::new(60)
    } else {
        SleepScheduler::unpaced(60)
    };
    let frames = scheduler.clone();
    drive(scheduler.clone(), move |now_ms| {
        let events = app.frame(now_ms);
        for event in &events {
            if let GameEvent::Collision { summary, .. } = event {
                println!(
                    "seed {}: score {}, distance {}m, level {}",
                    seed,
                    summary.score,
                    summary.distance.floor(),
                    summary.level
                );
                return false;
            }
        }

        if frames.frames_run() >= MAX_FRAMES {
            let hud = app.hud();
            println!(
                "seed {}: still running after {} frames, score {}, distance {}m, level {}",
                seed, MAX_FRAMES, hud.score, hud.distance_m, hud.level
            );
            return false;
        }
        true
    });
    scheduler.run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
