use yew::prelude::*;

// Stable ids the mount effect binds click listeners and enablement to.
pub const UP_ID: &str = "gridwalk-up";
pub const DOWN_ID: &str = "gridwalk-down";
pub const LEFT_ID: &str = "gridwalk-left";
pub const RIGHT_ID: &str = "gridwalk-right";

#[function_component(DirectionPad)]
pub fn direction_pad() -> Html {
    html! {
        <div class="gridwalk-controls" style="position:absolute; right:16px; bottom:16px; display:grid; grid-template-columns:repeat(3, 40px); grid-template-rows:repeat(2, 40px); gap:4px; z-index:10;">
            <span></span>
            <button id={UP_ID} disabled={true}>{"↑"}</button>
            <span></span>
            <button id={LEFT_ID} disabled={true}>{"←"}</button>
            <button id={DOWN_ID} disabled={true}>{"↓"}</button>
            <button id={RIGHT_ID} disabled={true}>{"→"}</button>
        </div>
    }
}
