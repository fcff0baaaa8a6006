//! SmartTeammates entry point
//!
//! Handles platform-specific initialization and runs the arena loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_app {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlInputElement, HtmlSelectElement};

    use smart_teammates::ArenaConfig;
    use smart_teammates::persistence::LocalStorage;
    use smart_teammates::platform::now_ms;
    use smart_teammates::preferences::PreferenceStore;
    use smart_teammates::renderer::CanvasSurface;
    use smart_teammates::settings::{DAMAGE_MULTIPLIER_OPTIONS, SpeedSetting};
    use smart_teammates::view::{ArenaStats, ArenaView};

    type Prefs = Rc<RefCell<PreferenceStore<LocalStorage>>>;

    /// Everything the frame callback touches
    struct App {
        view: ArenaView,
        surface: CanvasSurface,
        prefs: Prefs,
        /// Pending requestAnimationFrame handle
        frame_handle: Cell<Option<i32>>,
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }

    /// Reflect the effective preferences in the form and summary line
    fn sync_controls(prefs: &Prefs) {
        let prefs = prefs.borrow();
        let Some(document) = document() else {
            return;
        };

        if let Some(select) = document
            .get_element_by_id("damage-select")
            .and_then(|e| e.dyn_into::<HtmlSelectElement>().ok())
        {
            select.set_value(&prefs.damage_multiplier().to_string());
        }

        let current = prefs.speed_setting();
        for setting in SpeedSetting::ALL {
            let id = format!("speed-{}", setting.as_str());
            if let Some(input) = document
                .get_element_by_id(&id)
                .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
            {
                input.set_checked(setting == current);
            }
        }

        set_text("active-summary", &prefs.summary());
    }

    /// Persist in the background; never blocks a frame
    fn flush_later(prefs: Prefs) {
        wasm_bindgen_futures::spawn_local(async move {
            prefs.borrow_mut().flush();
        });
    }

    fn build_damage_select(document: &Document, prefs: Prefs) -> Result<(), JsValue> {
        let Some(select) = document
            .get_element_by_id("damage-select")
            .and_then(|e| e.dyn_into::<HtmlSelectElement>().ok())
        else {
            log::warn!("No #damage-select element, damage control disabled");
            return Ok(());
        };

        for option in DAMAGE_MULTIPLIER_OPTIONS {
            let el = document.create_element("option")?;
            el.set_attribute("value", &option.value.to_string())?;
            el.set_text_content(Some(option.label));
            select.append_child(&el)?;
        }

        let select_clone = select.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            match select_clone.value().parse::<f32>() {
                Ok(value) => {
                    prefs.borrow_mut().set_damage_multiplier(value);
                    log::info!("Damage multiplier set to {}", value);
                    sync_controls(&prefs);
                    flush_later(prefs.clone());
                }
                Err(e) => log::warn!("Ignoring damage option {:?}: {}", select_clone.value(), e),
            }
        });
        select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn build_speed_options(document: &Document, prefs: Prefs) -> Result<(), JsValue> {
        let Some(container) = document.get_element_by_id("speed-options") else {
            log::warn!("No #speed-options element, speed control disabled");
            return Ok(());
        };

        for setting in SpeedSetting::ALL {
            let label = document.create_element("label")?;
            let input: HtmlInputElement = document.create_element("input")?.dyn_into()?;
            input.set_type("radio");
            input.set_name("speed-option");
            input.set_id(&format!("speed-{}", setting.as_str()));
            input.set_value(setting.as_str());

            let title = document.create_element("span")?;
            title.set_text_content(Some(setting.label()));
            let description = document.create_element("p")?;
            description.set_text_content(Some(setting.description()));

            label.append_child(&input)?;
            label.append_child(&title)?;
            label.append_child(&description)?;
            container.append_child(&label)?;

            let prefs = prefs.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                prefs.borrow_mut().set_speed_setting(setting);
                log::info!("Speed set to {}", setting.as_str());
                sync_controls(&prefs);
                flush_later(prefs.clone());
            });
            input.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn show_stats(stats: &ArenaStats) {
        let [damage, defeated, elapsed] = stats.rows();
        set_text("stat-damage", &damage.1);
        set_text("stat-defeated", &defeated.1);
        set_text("stat-elapsed", &elapsed.1);
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("SmartTeammates starting...");

        let document = document().expect("no document");
        let prefs: Prefs = Rc::new(RefCell::new(PreferenceStore::new(LocalStorage)));

        if let Err(e) = build_damage_select(&document, prefs.clone()) {
            log::warn!("Failed to build damage select: {:?}", e);
        }
        if let Err(e) = build_speed_options(&document, prefs.clone()) {
            log::warn!("Failed to build speed options: {:?}", e);
        }
        // Defaults until hydration completes
        sync_controls(&prefs);

        {
            let prefs = prefs.clone();
            wasm_bindgen_futures::spawn_local(async move {
                prefs.borrow_mut().hydrate();
                sync_controls(&prefs);
                prefs.borrow_mut().flush();
            });
        }

        let Some(canvas) = document
            .get_element_by_id("arena-canvas")
            .and_then(|e| e.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::warn!("No #arena-canvas element, arena disabled");
            return;
        };
        canvas.set_width(smart_teammates::consts::CANVAS_WIDTH as u32);
        canvas.set_height(smart_teammates::consts::CANVAS_HEIGHT as u32);

        let Some(mut surface) = CanvasSurface::from_canvas(&canvas) else {
            log::warn!("2D canvas context unavailable, arena disabled");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let view = ArenaView::new(seed, ArenaConfig::default(), now_ms());
        view.draw_background(&mut surface);
        show_stats(&ArenaStats::default());

        let app = Rc::new(RefCell::new(App {
            view,
            surface,
            prefs,
            frame_handle: Cell::new(None),
        }));

        setup_teardown(app.clone());
        request_animation_frame(app);

        log::info!("SmartTeammates running!");
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let app_clone = app.clone();
        let closure = Closure::once(move |_time: f64| {
            frame_loop(app_clone);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(handle) => app.borrow().frame_handle.set(Some(handle)),
            Err(e) => log::warn!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>) {
        {
            let mut guard = app.borrow_mut();
            if guard.view.is_cancelled() {
                return;
            }
            guard.frame_handle.set(None);

            let snapshot = guard.prefs.borrow().snapshot();
            let App { view, surface, .. } = &mut *guard;
            if let Some(stats) = view.frame(now_ms(), &snapshot, surface) {
                show_stats(&stats);
            }
        }

        request_animation_frame(app);
    }

    /// Stop the loop when the page goes away; start a new arena if it comes
    /// back from the back-forward cache
    fn setup_teardown(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        let hide_app = app.clone();
        let on_hide = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let app = hide_app.borrow();
            app.view.teardown();
            if let (Some(handle), Some(window)) = (app.frame_handle.take(), web_sys::window()) {
                let _ = window.cancel_animation_frame(handle);
            }
        });
        let _ = window.add_event_listener_with_callback("pagehide", on_hide.as_ref().unchecked_ref());
        on_hide.forget();

        let on_show = Closure::<dyn FnMut(_)>::new(move |event: web_sys::PageTransitionEvent| {
            if !event.persisted() {
                return;
            }
            {
                let mut guard = app.borrow_mut();
                if !guard.view.is_cancelled() {
                    return;
                }
                let App { view, surface, .. } = &mut *guard;
                view.restart(js_sys::Date::now() as u64, now_ms());
                view.draw_background(surface);
            }
            request_animation_frame(app.clone());
        });
        let _ = window.add_event_listener_with_callback("pageshow", on_show.as_ref().unchecked_ref());
        on_show.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    web_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use smart_teammates::ArenaConfig;
    use smart_teammates::persistence::FileStore;
    use smart_teammates::platform::now_ms;
    use smart_teammates::preferences::PreferenceStore;
    use smart_teammates::renderer::CommandRecorder;
    use smart_teammates::view::{ArenaView, HeadlessLoop};

    env_logger::init();
    log::info!("SmartTeammates (native) starting...");

    let prefs_path = std::env::var("SMART_TEAMMATES_PREFS")
        .unwrap_or_else(|_| "smart_teammates_prefs.json".to_string());
    let mut prefs = PreferenceStore::new(FileStore::new(prefs_path));
    prefs.hydrate();
    prefs.flush();
    log::info!("{}", prefs.summary());

    let config = match std::env::var("SMART_TEAMMATES_CONFIG") {
        Ok(json) => ArenaConfig::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring SMART_TEAMMATES_CONFIG: {}", e);
            ArenaConfig::default()
        }),
        Err(_) => ArenaConfig::default(),
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let start = now_ms();
    let mut view = ArenaView::new(seed, config, start);
    let mut surface = CommandRecorder::new();
    let snapshot = prefs.snapshot();

    // Ten seconds at 60 Hz
    let runner = HeadlessLoop {
        max_frames: Some(600),
        ..Default::default()
    };
    let frames = runner.run(&mut view, start, || snapshot, &mut surface, |stats| {
        let rows = stats.rows();
        log::info!(
            "{}: {} | {}: {} | {}: {}",
            rows[0].0,
            rows[0].1,
            rows[1].0,
            rows[1].1,
            rows[2].0,
            rows[2].1
        );
    });

    log::info!(
        "Finished {} frames ({} draw commands in the last one)",
        frames,
        surface.last_frame.len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
