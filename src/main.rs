//! Luxe Shore entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use luxe_shore::audio::{AudioManager, SoundEffect};
    use luxe_shore::persistence::LocalStore;
    use luxe_shore::renderer::{self, HeadlessBackend};
    use luxe_shore::scene::assembly::assemble;
    use luxe_shore::theme::{self, ColorTheme, LeatherPattern, ThemePreference, TimeMode};
    use luxe_shore::ui::Dashboard;
    use luxe_shore::{platform, sim, ProfilePreset, Scene, SceneProfile};

    /// Everything the page callbacks touch
    pub struct App {
        scene: Scene,
        backend: HeadlessBackend,
        dashboard: Dashboard,
        prefs: ThemePreference,
        store: LocalStore,
        audio: AudioManager,
    }

    thread_local! {
        static APP: RefCell<Option<Rc<RefCell<App>>>> = const { RefCell::new(None) };
    }

    /// Run `f` against the app if it has started
    pub fn with_app(f: impl FnOnce(&mut App)) {
        let app = APP.with(|slot| slot.borrow().clone());
        match app {
            Some(app) => f(&mut app.borrow_mut()),
            None => log::warn!("Page hook called before startup"),
        }
    }

    /// Profile named by `?profile=` in the page URL, else the default
    fn page_profile() -> SceneProfile {
        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        search
            .trim_start_matches('?')
            .split('&')
            .find_map(|pair| pair.strip_prefix("profile="))
            .and_then(ProfilePreset::from_str)
            .map(SceneProfile::from_preset)
            .unwrap_or_default()
    }

    fn viewport() -> (u32, u32) {
        let window = web_sys::window();
        let size = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64());
        let width = window.as_ref().and_then(|w| size(w.inner_width())).unwrap_or(1280.0);
        let height = window.as_ref().and_then(|w| size(w.inner_height())).unwrap_or(720.0);
        (width as u32, height as u32)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Luxe Shore starting...");

        let seed = js_sys::Date::now() as u64;
        let store = LocalStore;
        let prefs = ThemePreference::load(&store);

        let mut scene = assemble(page_profile(), seed);
        theme::apply_time_mode(&mut scene, prefs.time_mode);

        let (width, height) = viewport();
        let mut backend = HeadlessBackend::new(width, height);
        renderer::resize(&mut scene, &mut backend, width, height);

        let dashboard = Dashboard::new(platform::now_ms(), prefs.color_theme, seed.wrapping_add(1));
        build_gauge_faces(&dashboard);

        let app = Rc::new(RefCell::new(App {
            scene,
            backend,
            dashboard,
            prefs,
            store,
            audio: AudioManager::new(),
        }));
        APP.with(|slot| *slot.borrow_mut() = Some(app.clone()));

        setup_resize_handler(app.clone());
        request_animation_frame(app);

        log::info!("Luxe Shore running!");
    }

    fn setup_resize_handler(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height) = viewport();
            let mut a = app.borrow_mut();
            let App { scene, backend, .. } = &mut *a;
            renderer::resize(scene, backend, width, height);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            frame_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>) {
        {
            let mut a = app.borrow_mut();
            let now = platform::now_ms();
            let App {
                scene,
                backend,
                dashboard,
                ..
            } = &mut *a;

            sim::step(scene, now);
            renderer::render(scene, backend);

            dashboard.poll(now);
            mirror_dashboard(dashboard, now);
        }

        request_animation_frame(app);
    }

    /// Fill each `gauge-face-N` container with its ticks, numerals and bezel
    fn build_gauge_faces(dashboard: &Dashboard) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        for (i, gauge) in dashboard.gauges.iter().enumerate() {
            match document.get_element_by_id(&format!("gauge-face-{}", i)) {
                Some(face) => face.set_inner_html(&gauge.markup(&dashboard.layout)),
                None => log::warn!("No face element for gauge {}", gauge.label),
            }
        }
    }

    /// Copy needle angles and readouts onto the page's gauge elements
    fn mirror_dashboard(dashboard: &mut Dashboard, now: f64) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let palette = dashboard.palette();
        for (i, reading) in dashboard.readings(now).iter().enumerate() {
            if let Some(needle) = document
                .get_element_by_id(&format!("needle-{}", i))
                .and_then(|e| e.dyn_into::<web_sys::HtmlElement>().ok())
            {
                let _ = needle
                    .style()
                    .set_property("transform", &format!("rotate({:.2}deg)", reading.rotation));
                let glow = if reading.glowing {
                    format!("0 0 20px {}", palette.glow_rgba())
                } else {
                    String::new()
                };
                let _ = needle.style().set_property("box-shadow", &glow);
            }
            if let Some(value) = document.get_element_by_id(&format!("value-{}", i)) {
                value.set_text_content(Some(&reading.display.to_string()));
            }
        }
        if let Some(stat) = document.get_element_by_id("achievement") {
            stat.set_text_content(Some(&format!("{}%", dashboard.achievement(now))));
        }
    }

    pub fn set_time_mode(name: &str) {
        let Some(mode) = TimeMode::from_str(name) else {
            log::warn!("Unknown time mode {:?}", name);
            return;
        };
        with_app(|app| {
            theme::switch_time_mode(&mut app.scene, &mut app.prefs, &mut app.store, mode);
            app.audio.play(SoundEffect::Shimmer);
        });
    }

    pub fn set_color_theme(name: &str) {
        let Some(color_theme) = ColorTheme::from_str(name) else {
            log::warn!("Unknown color theme {:?}", name);
            return;
        };
        with_app(|app| {
            app.prefs.set_color_theme(color_theme, &mut app.store);
            app.dashboard.theme = color_theme;
            app.audio.play(SoundEffect::Shimmer);
        });
    }

    pub fn set_leather_pattern(name: &str) {
        let Some(pattern) = LeatherPattern::from_str(name) else {
            log::warn!("Unknown leather pattern {:?}", name);
            return;
        };
        with_app(|app| app.prefs.set_leather_pattern(pattern, &mut app.store));
    }

    pub fn gauge_click(index: usize) -> i32 {
        let mut result = -1;
        with_app(|app| {
            if let Some(value) = app.dashboard.click(index, platform::now_ms()) {
                app.audio.play(SoundEffect::Chime);
                result = value as i32;
            }
        });
        result
    }

    pub fn gauge_hover(index: usize) {
        with_app(|app| app.dashboard.hover(index, platform::now_ms()));
    }

    pub fn gauge_leave(index: usize) {
        with_app(|app| app.dashboard.leave(index));
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn set_time_mode(mode: &str) {
    wasm_app::set_time_mode(mode);
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn set_color_theme(theme: &str) {
    wasm_app::set_color_theme(theme);
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn set_leather_pattern(pattern: &str) {
    wasm_app::set_leather_pattern(pattern);
}

/// New gauge value, or -1 for an unknown gauge
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn gauge_click(index: usize) -> i32 {
    wasm_app::gauge_click(index)
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn gauge_hover(index: usize) {
    wasm_app::gauge_hover(index);
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn gauge_leave(index: usize) {
    wasm_app::gauge_leave(index);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless run: `luxe-shore [preset|profile.json] [frames]`
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use luxe_shore::renderer::{self, HeadlessBackend};
    use luxe_shore::scene::assembly::assemble;
    use luxe_shore::ui::{Dashboard, DashboardEvent};
    use luxe_shore::{MemoryStore, ProfilePreset, SceneProfile, ThemePreference, platform, sim, theme};

    env_logger::init();
    log::info!("Luxe Shore (native) starting...");

    let mut args = std::env::args().skip(1);
    let profile = match args.next() {
        Some(arg) if arg.ends_with(".json") => match std::fs::read_to_string(&arg) {
            Ok(json) => SceneProfile::from_json(&json).unwrap_or_else(|err| {
                log::warn!("Bad profile {}: {}, using default", arg, err);
                SceneProfile::default()
            }),
            Err(err) => {
                log::warn!("Cannot read {}: {}, using default", arg, err);
                SceneProfile::default()
            }
        },
        Some(arg) => ProfilePreset::from_str(&arg).map(SceneProfile::from_preset).unwrap_or_else(|| {
            log::warn!("Unknown preset {:?}, using default", arg);
            SceneProfile::default()
        }),
        None => SceneProfile::default(),
    };
    let frames: u32 = args.next().and_then(|n| n.parse().ok()).unwrap_or(600);

    let seed = platform::time_seed();
    let store = MemoryStore::new();
    let prefs = ThemePreference::load(&store);

    let mut scene = assemble(profile, seed);
    theme::apply_time_mode(&mut scene, prefs.time_mode);
    let mut backend = HeadlessBackend::new(1280, 720);
    renderer::resize(&mut scene, &mut backend, 1280, 720);
    let mut dashboard = Dashboard::new(0.0, prefs.color_theme, seed.wrapping_add(1));

    let frame_ms = 1000.0 / 60.0;
    let mut gauge_moves = 0;
    for frame in 0..frames {
        let now = frame as f64 * frame_ms;
        sim::step(&mut scene, now);
        renderer::render(&mut scene, &mut backend);
        gauge_moves += dashboard
            .poll(now)
            .iter()
            .filter(|e| matches!(e, DashboardEvent::GaugeMoved { .. }))
            .count();
    }

    let end = frames as f64 * frame_ms;
    println!(
        "Simulated {} frames ({:.1} s scene time) with seed {}",
        frames,
        scene.clock.elapsed_ms() / 1000.0,
        seed
    );
    println!(
        "  {} nodes, {} draw calls/frame, {} triangles total, {} particle uploads",
        scene.node_count(),
        backend.last_draw_calls,
        backend.triangles,
        backend.particle_uploads
    );
    println!(
        "  {} meshes uploaded, {:.1} KiB sent",
        backend.mesh_count(),
        backend.uploaded_bytes as f64 / 1024.0
    );
    println!(
        "  achievement {}%, {} gauge moves, {} floating diamonds",
        dashboard.achievement(end),
        gauge_moves,
        dashboard.particles.len()
    );
}
