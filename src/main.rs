use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, KeyboardEvent, TouchEvent};
use yew::prelude::*;

mod components;
mod config;
mod dom;
mod engine;
mod model;
mod registry;
mod state;

use components::{DirectionPad, Panel, direction_pad};
use config::{DirectionBindings, GridwalkConfig};
use engine::{NavigationEngine, Transition};
use model::{Direction, GridIndex};
use state::SwipeState;

const CONTAINER_ID: &str = "gridwalk";
const MAP_ID: &str = "gridwalk-map";
/// Transitions switch on shortly after the initial placement so the
/// first position is applied without animation.
const READY_DELAY_MS: i32 = 120;

const STYLE: &str = "
#gridwalk { position:relative; width:100vw; height:100vh; overflow:hidden; background:#0e1116; color:#e6edf3; font-family:sans-serif; }
.gridwalk-plane { position:absolute; inset:0; }
#gridwalk.is-ready .gridwalk-plane { transition:transform 0.5s ease; }
.gridwalk-step { position:absolute; width:100%; height:100%; box-sizing:border-box; padding:48px; }
.gridwalk-controls button { background:rgba(22,27,34,0.9); color:#e6edf3; border:1px solid #30363d; border-radius:8px; font-size:16px; cursor:pointer; }
.gridwalk-controls button:disabled { opacity:0.35; cursor:default; }
.gridwalk-map-cell { width:14px; height:14px; background:#161b22; border:1px solid #30363d; border-radius:2px; }
.gridwalk-map-cell.is-step { background:#2f3641; cursor:pointer; }
.gridwalk-map-cell.is-active { background:#58a6ff; }
";

fn demo_config() -> GridwalkConfig {
    GridwalkConfig {
        direction_bindings: Some(DirectionBindings {
            up: Some(direction_pad::UP_ID.to_owned()),
            down: Some(direction_pad::DOWN_ID.to_owned()),
            left: Some(direction_pad::LEFT_ID.to_owned()),
            right: Some(direction_pad::RIGHT_ID.to_owned()),
        }),
        map_overview_container: Some(MAP_ID.to_owned()),
        ..GridwalkConfig::default()
    }
}

/// Host pages may override the demo options with a `gridwalkConfig`
/// JSON string on `window`.
fn page_config() -> GridwalkConfig {
    let Some(window) = web_sys::window() else {
        return demo_config();
    };
    let raw = js_sys::Reflect::get(window.as_ref(), &"gridwalkConfig".into())
        .ok()
        .and_then(|v| v.as_string());
    match raw {
        Some(json) => match GridwalkConfig::from_json(&json) {
            Ok(cfg) => cfg,
            Err(err) => {
                log::warn!("gridwalk: ignoring malformed gridwalkConfig: {err}");
                demo_config()
            }
        },
        None => demo_config(),
    }
}

/// Builds the whole navigation surface over the rendered markup: scan,
/// index, engine, startup jump, listener wiring. Returns the listener
/// teardown. A construction error aborts the mount with no partial
/// surface left behind.
fn mount(config: &GridwalkConfig) -> Result<Box<dyn FnOnce()>, dom::MountError> {
    let window = web_sys::window().expect("no global `window` exists");
    let document = window.document().expect("should have a document on window");
    let container = dom::find_container(&document, CONTAINER_ID)?;
    let plane = dom::find_plane(&container, CONTAINER_ID)?;

    let (decls, panels) = dom::scan_steps(&container);
    let debug = config.debug_diagnostics;
    let engine = registry::engine_for(CONTAINER_ID, move || {
        Ok(NavigationEngine::new(GridIndex::build(&decls)?, debug))
    })?;

    dom::place_steps(engine.borrow().index(), &panels);

    let map_el: Option<Element> = config
        .map_overview_container
        .as_deref()
        .and_then(|id| document.get_element_by_id(id));
    if let Some(map) = &map_el {
        dom::build_map_overview(&document, map, engine.borrow().index());
    }

    // Single consumer of position-changed transitions: viewport slide,
    // control enablement, map highlight.
    let sync: Rc<dyn Fn(&Transition)> = {
        let document = document.clone();
        let plane = plane.clone();
        let map_el = map_el.clone();
        let bindings = config.direction_bindings.clone();
        Rc::new(move |t: &Transition| {
            dom::apply_transform(&plane, t.row, t.col);
            if let Some(bindings) = &bindings {
                dom::sync_direction_controls(&document, bindings, t.available);
            }
            if let Some(map) = &map_el {
                dom::sync_map_highlight(map, t.row, t.col);
            }
        })
    };

    let dispatch_move: Rc<dyn Fn(Direction)> = {
        let engine = engine.clone();
        let sync = sync.clone();
        Rc::new(move |direction| {
            if let Ok(t) = engine.borrow_mut().move_direction(direction) {
                if t.moved {
                    sync(&t);
                }
            }
        })
    };

    // Startup jump. A remount reuses the memoized engine and keeps its
    // position, but the freshly rendered DOM still needs one sync.
    let startup = {
        let mut nav = engine.borrow_mut();
        match nav.current() {
            Some((row, col)) => nav.jump_to(row, col).ok(),
            None => nav.start(config.start_at.map(|s| s.key())),
        }
    };
    match &startup {
        Some(t) => sync(t),
        None => log::warn!("gridwalk: no steps declared, nothing to navigate"),
    }

    let control_listeners = config
        .direction_bindings
        .as_ref()
        .map(|b| dom::bind_direction_controls(&document, b, dispatch_move.clone()))
        .unwrap_or_default();

    // One delegated click listener covers every map cell.
    let map_click = map_el.map(|map| {
        let engine = engine.clone();
        let sync = sync.clone();
        let cb = Closure::wrap(Box::new(move |e: web_sys::Event| {
            if let Some((row, col)) = dom::map_cell_target(&e) {
                if let Ok(t) = engine.borrow_mut().jump_to(row, col) {
                    if t.moved {
                        sync(&t);
                    }
                }
            }
        }) as Box<dyn FnMut(_)>);
        map.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
            .ok();
        (map, cb)
    });

    let key_cb = if config.enable_arrow_key_nav {
        let dispatch_move = dispatch_move.clone();
        let cb = Closure::wrap(Box::new(move |e: KeyboardEvent| {
            let direction = match e.key().as_str() {
                "ArrowUp" => Direction::Up,
                "ArrowDown" => Direction::Down,
                "ArrowLeft" => Direction::Left,
                "ArrowRight" => Direction::Right,
                _ => return,
            };
            e.prevent_default();
            dispatch_move(direction);
        }) as Box<dyn FnMut(_)>);
        window
            .add_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref())
            .ok();
        Some(cb)
    } else {
        None
    };

    let touch_cbs = if config.enable_swipe_nav {
        let swipe = Rc::new(RefCell::new(SwipeState::default()));
        let threshold = config.swipe_threshold;
        let start_cb = {
            let swipe = swipe.clone();
            Closure::wrap(Box::new(move |e: TouchEvent| {
                if e.touches().length() == 1 {
                    if let Some(t0) = e.touches().item(0) {
                        swipe
                            .borrow_mut()
                            .begin(t0.client_x() as f64, t0.client_y() as f64);
                    }
                } else {
                    // Multi-touch is not a swipe.
                    swipe.borrow_mut().cancel();
                }
            }) as Box<dyn FnMut(_)>)
        };
        let end_cb = {
            let swipe = swipe.clone();
            let dispatch_move = dispatch_move.clone();
            Closure::wrap(Box::new(move |e: TouchEvent| {
                if let Some(t0) = e.changed_touches().item(0) {
                    if let Some(direction) = swipe.borrow_mut().end(
                        t0.client_x() as f64,
                        t0.client_y() as f64,
                        threshold,
                    ) {
                        dispatch_move(direction);
                    }
                }
            }) as Box<dyn FnMut(_)>)
        };
        container
            .add_event_listener_with_callback("touchstart", start_cb.as_ref().unchecked_ref())
            .ok();
        container
            .add_event_listener_with_callback("touchend", end_cb.as_ref().unchecked_ref())
            .ok();
        Some((start_cb, end_cb))
    } else {
        None
    };

    // Cosmetic ready flag, fire-and-forget.
    let ready_cb = {
        let container = container.clone();
        Closure::wrap(Box::new(move || {
            container.class_list().add_1("is-ready").ok();
        }) as Box<dyn FnMut()>)
    };
    window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            ready_cb.as_ref().unchecked_ref(),
            READY_DELAY_MS,
        )
        .ok();

    let window_clone = window.clone();
    let container_clone = container.clone();
    Ok(Box::new(move || {
        if let Some(cb) = &key_cb {
            let _ = window_clone
                .remove_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref());
        }
        if let Some((start_cb, end_cb)) = &touch_cbs {
            let _ = container_clone.remove_event_listener_with_callback(
                "touchstart",
                start_cb.as_ref().unchecked_ref(),
            );
            let _ = container_clone
                .remove_event_listener_with_callback("touchend", end_cb.as_ref().unchecked_ref());
        }
        for (el, cb) in &control_listeners {
            let _ = el.remove_event_listener_with_callback("click", cb.as_ref().unchecked_ref());
        }
        if let Some((map, cb)) = &map_click {
            let _ = map.remove_event_listener_with_callback("click", cb.as_ref().unchecked_ref());
        }
        // Keep closures in scope until teardown so they aren't dropped early.
        let _keep_alive = (&ready_cb,);
    }))
}

#[function_component(App)]
fn app() -> Html {
    use_effect_with((), move |_| {
        let config = page_config();
        match mount(&config) {
            Ok(cleanup) => cleanup,
            Err(err) => {
                log::error!("gridwalk: mount failed: {err}");
                Box::new(|| ()) as Box<dyn FnOnce()>
            }
        }
    });

    html! {
        <>
            <style>{ STYLE }</style>
            <div id={CONTAINER_ID}>
                <div class="gridwalk-plane">
                    <Panel row={0} col={0}>
                        <h1>{"Gridwalk"}</h1>
                        <p>{"Panels live on an infinite plane addressed by (row, col)."}</p>
                        <p>{"Move with the arrow keys, the pad, a swipe, or the map."}</p>
                    </Panel>
                    <Panel row={0} col={1}>
                        <h2>{"East wing"}</h2>
                        <p>{"Only directions with an adjacent panel stay enabled."}</p>
                    </Panel>
                    <Panel row={1} col={0}>
                        <h2>{"South wing"}</h2>
                        <p>{"The viewport slides one grid unit per move."}</p>
                    </Panel>
                    <Panel row={1} col={1}>
                        <h2>{"Courtyard"}</h2>
                        <p>{"An interior panel: every direction is available."}</p>
                    </Panel>
                    <Panel row={2} col={1}>
                        <h2>{"Cellar"}</h2>
                        <p>{"Dead end. Head back up."}</p>
                    </Panel>
                </div>
                <DirectionPad />
                <div
                    id={MAP_ID}
                    style="position:absolute; left:16px; bottom:16px; z-index:10;"
                ></div>
            </div>
        </>
    }
}

fn main() {
    let _ = console_log::init_with_level(log::Level::Debug);
    yew::Renderer::<App>::new().render();
}
