use yew::prelude::*;

/// One content panel on the plane. The coordinate attributes are what
/// the mount scan discovers; absolute placement happens at mount time
/// once the coordinates have been resolved.
#[derive(Properties, PartialEq, Clone)]
pub struct PanelProps {
    pub row: i32,
    pub col: i32,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Panel)]
pub fn panel(props: &PanelProps) -> Html {
    html! {
        <section
            class="gridwalk-step"
            data-row={props.row.to_string()}
            data-col={props.col.to_string()}
        >
            { for props.children.iter() }
        </section>
    }
}
