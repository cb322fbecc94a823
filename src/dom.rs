//! DOM glue: step discovery, panel placement, viewport transform and the
//! map overview. Everything in here consumes engine outputs; none of it
//! holds navigation state of its own.

use std::rc::Rc;

use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, HtmlElement};

use crate::config::DirectionBindings;
use crate::engine::DirectionSet;
use crate::model::{Direction, GridError, GridIndex, RawStep};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MountError {
    #[error("no container with id {0:?} exists")]
    ContainerNotFound(String),
    #[error("container {0:?} has no .gridwalk-plane element")]
    PlaneNotFound(String),
    #[error(transparent)]
    Grid(#[from] GridError),
}

pub fn find_container(document: &Document, id: &str) -> Result<Element, MountError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| MountError::ContainerNotFound(id.to_owned()))
}

pub fn find_plane(container: &Element, container_id: &str) -> Result<HtmlElement, MountError> {
    container
        .query_selector(".gridwalk-plane")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .ok_or_else(|| MountError::PlaneNotFound(container_id.to_owned()))
}

/// Collects descendants carrying a coordinate attribute, in document
/// order. Parsing and validation happen in [`GridIndex::build`]; the
/// element list stays parallel to the declaration list.
pub fn scan_steps(container: &Element) -> (Vec<RawStep>, Vec<HtmlElement>) {
    let mut decls = Vec::new();
    let mut panels = Vec::new();
    let Ok(nodes) = container.query_selector_all("[data-row], [data-col]") else {
        return (decls, panels);
    };
    for i in 0..nodes.length() {
        let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
            continue;
        };
        decls.push(RawStep::new(
            el.get_attribute("data-row"),
            el.get_attribute("data-col"),
        ));
        panels.push(el);
    }
    (decls, panels)
}

/// Tags every panel with its resolved integer coordinates and places it
/// on the plane at `(col·100%, row·100%)`. One grid unit = one viewport.
pub fn place_steps(index: &GridIndex, panels: &[HtmlElement]) {
    for step in index.steps() {
        let Some(el) = panels.get(step.panel) else {
            continue;
        };
        el.set_attribute("data-row", &step.row.to_string()).ok();
        el.set_attribute("data-col", &step.col.to_string()).ok();
        let style = el.style();
        style
            .set_property("left", &format!("{}%", step.col * 100))
            .ok();
        style
            .set_property("top", &format!("{}%", step.row * 100))
            .ok();
    }
}

/// Slides the plane so the step at `(row, col)` fills the viewport.
/// Final position only; the CSS transition supplies the animation.
pub fn apply_transform(plane: &HtmlElement, row: i32, col: i32) {
    plane
        .style()
        .set_property(
            "transform",
            &format!("translate({}%, {}%)", col * -100, row * -100),
        )
        .ok();
}

/// Wires click listeners onto the bound controls. The returned pairs
/// must stay alive for as long as the listeners are attached.
pub fn bind_direction_controls(
    document: &Document,
    bindings: &DirectionBindings,
    on_move: Rc<dyn Fn(Direction)>,
) -> Vec<(Element, Closure<dyn FnMut(web_sys::Event)>)> {
    let mut bound = Vec::new();
    for direction in Direction::ALL {
        let Some(el) = bindings.get(direction).and_then(|id| document.get_element_by_id(id))
        else {
            continue;
        };
        let on_move = on_move.clone();
        let cb = Closure::wrap(Box::new(move |_e: web_sys::Event| {
            on_move(direction);
        }) as Box<dyn FnMut(_)>);
        el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
            .ok();
        bound.push((el, cb));
    }
    bound
}

/// Enables exactly the controls whose direction has an adjacent step.
pub fn sync_direction_controls(
    document: &Document,
    bindings: &DirectionBindings,
    available: DirectionSet,
) {
    for direction in Direction::ALL {
        let Some(el) = bindings.get(direction).and_then(|id| document.get_element_by_id(id))
        else {
            continue;
        };
        if available.contains(direction) {
            el.remove_attribute("disabled").ok();
            el.class_list().remove_1("is-disabled").ok();
        } else {
            el.set_attribute("disabled", "").ok();
            el.class_list().add_1("is-disabled").ok();
        }
    }
}

/// Builds one cell per coordinate of the rectangular extent. Cells
/// backed by a step are clickable jump targets; the rest are fillers.
/// Steps at negative coordinates navigate normally but stay off the map.
pub fn build_map_overview(document: &Document, container: &Element, index: &GridIndex) {
    let Some((max_row, max_col)) = index.extent() else {
        return;
    };
    if max_row < 0 || max_col < 0 {
        return;
    }
    container.set_inner_html("");
    if let Some(el) = container.dyn_ref::<HtmlElement>() {
        let style = el.style();
        style.set_property("display", "grid").ok();
        style
            .set_property(
                "grid-template-columns",
                &format!("repeat({}, 14px)", max_col + 1),
            )
            .ok();
        style.set_property("gap", "3px").ok();
    }
    for row in 0..=max_row {
        for col in 0..=max_col {
            let Ok(cell) = document.create_element("div") else {
                continue;
            };
            cell.class_list().add_1("gridwalk-map-cell").ok();
            if index.contains(row, col) {
                cell.class_list().add_1("is-step").ok();
                cell.set_attribute("data-map-cell", &format!("{row},{col}")).ok();
            }
            container.append_child(&cell).ok();
        }
    }
}

/// Resolves a delegated click on the map to the clicked step cell.
pub fn map_cell_target(event: &web_sys::Event) -> Option<(i32, i32)> {
    let cell = event
        .target()?
        .dyn_into::<Element>()
        .ok()?
        .closest("[data-map-cell]")
        .ok()??;
    let value = cell.get_attribute("data-map-cell")?;
    let (row, col) = value.split_once(',')?;
    Some((row.parse().ok()?, col.parse().ok()?))
}

/// Moves the active highlight to the cell at `(row, col)`.
pub fn sync_map_highlight(container: &Element, row: i32, col: i32) {
    if let Ok(Some(prev)) = container.query_selector(".gridwalk-map-cell.is-active") {
        prev.class_list().remove_1("is-active").ok();
    }
    if let Ok(Some(cell)) =
        container.query_selector(&format!("[data-map-cell='{row},{col}']"))
    {
        cell.class_list().add_1("is-active").ok();
    }
}
